use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Display;
use work_order_indexer::{ImportReport, IndexStatistics, IndexingRunStats, WorkOrder};

/// Prints command results either as text or as pretty JSON
#[derive(Debug, Clone, Copy)]
pub struct Printer {
    json: bool,
}

impl Printer {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    fn print_json<T: Serialize + ?Sized>(&self, value: &T) -> anyhow::Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    pub fn work_orders(&self, work_orders: &[WorkOrder]) -> anyhow::Result<()> {
        if self.json {
            return self.print_json(work_orders);
        }

        if work_orders.is_empty() {
            println!("No work orders found");
            return Ok(());
        }

        for wo in work_orders {
            println!(
                "{:<18} {:<16} {:<8} {}",
                wo.id,
                wo.status.to_string(),
                wo.priority.to_string(),
                wo.title
            );
        }
        println!("\n{} work order(s)", work_orders.len());
        Ok(())
    }

    pub fn work_order(&self, wo: &WorkOrder) -> anyhow::Result<()> {
        if self.json {
            return self.print_json(wo);
        }

        println!("ID:          {}", wo.id);
        println!("Title:       {}", wo.title);
        println!("Status:      {}", wo.status);
        println!("Priority:    {}", wo.priority);
        println!("Created:     {}", wo.created_at.to_rfc3339());
        println!("Updated:     {}", wo.updated_at.to_rfc3339());
        if let Some(ref assignee) = wo.assigned_to {
            println!("Assigned to: {}", assignee);
        }
        if let Some(due) = wo.due_date {
            println!("Due:         {}", due.to_rfc3339());
        }
        if !wo.tags.is_empty() {
            println!("Tags:        {}", wo.tags.join(", "));
        }
        println!("Source:      {}", wo.source);
        if let Some(url) = wo.source_url() {
            println!("Source URL:  {}", url);
        }
        if !wo.description.is_empty() {
            println!("\n{}", wo.description);
        }
        Ok(())
    }

    pub fn statistics(&self, stats: &IndexStatistics) -> anyhow::Result<()> {
        if self.json {
            return self.print_json(stats);
        }

        println!("Total work orders: {}", stats.total_work_orders);
        println!("Assignees:         {}", stats.assigned_count);
        println!("Tags:              {}", stats.tags_count);
        println!("Search tokens:     {}", stats.search_index_size);
        print_distribution("Status", &stats.status_distribution);
        print_distribution("Priority", &stats.priority_distribution);
        Ok(())
    }

    pub fn run(&self, stats: &IndexingRunStats) -> anyhow::Result<()> {
        if self.json {
            return self.print_json(stats);
        }

        println!(
            "Indexed {} of {} discovered work order(s) in {:.2}s ({} failed)",
            stats.indexed_count, stats.discovered_count, stats.duration_seconds, stats.failed_count
        );
        println!("Index now holds {} work order(s)", stats.total_work_orders);
        print_distribution("Status", &stats.status_distribution);
        print_distribution("Priority", &stats.priority_distribution);
        Ok(())
    }

    pub fn import(&self, report: &ImportReport) -> anyhow::Result<()> {
        if self.json {
            return self.print_json(report);
        }

        println!(
            "Imported {} work order(s), skipped {}",
            report.imported, report.skipped
        );
        Ok(())
    }

    pub fn message(&self, text: &str) {
        if !self.json {
            println!("{}", text);
        }
    }
}

fn print_distribution<K: Display>(label: &str, distribution: &BTreeMap<K, usize>) {
    println!("\n{}:", label);
    for (key, count) in distribution.iter().filter(|(_, count)| **count > 0) {
        println!("  {:<18} {}", key.to_string(), count);
    }
}
