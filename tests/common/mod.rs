//! Shared fixtures for integration tests

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use parking_lot::Mutex;
use std::sync::Arc;
use uuid::Uuid;
use work_order_indexer::{
    AppError, IndexingObserver, IndexingRunStats, RawRecord, WorkOrder, WorkOrderIndex,
    WorkOrderPriority, WorkOrderStatus,
};

pub fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 4, day, hour, 0, 0).unwrap()
}

/// Three orders covering every optional field
pub fn sample_work_orders() -> Vec<WorkOrder> {
    vec![
        WorkOrder::new("wo_1", "Fix login bug")
            .with_description("auth fails on the line terminal")
            .with_status(WorkOrderStatus::Queued)
            .with_priority(WorkOrderPriority::High)
            .with_assignee("alice")
            .with_tags(["bug", "auth"])
            .with_timestamps(at(1, 8), at(1, 9))
            .with_metadata("source_url", serde_json::json!("https://factory.local/api/tasks")),
        WorkOrder::new("wo_2", "Add dashboard")
            .with_status(WorkOrderStatus::InProgress)
            .with_priority(WorkOrderPriority::Medium)
            .with_tags(["feature"])
            .with_timestamps(at(2, 8), at(3, 8)),
        WorkOrder::new("wo_3", "Replace conveyor belt")
            .with_description("belt 3 is fraying")
            .with_status(WorkOrderStatus::OnHold)
            .with_priority(WorkOrderPriority::Critical)
            .with_assignee("bob")
            .with_due_date(at(20, 17))
            .with_tags(["mechanical"])
            .with_timestamps(at(3, 10), at(4, 11))
            .with_metadata("plant", serde_json::json!({"site": "north", "line": 3})),
    ]
}

pub fn seeded_index() -> WorkOrderIndex {
    let index = WorkOrderIndex::new();
    for wo in sample_work_orders() {
        index.add(wo);
    }
    index
}

pub fn ids(work_orders: &[WorkOrder]) -> Vec<String> {
    work_orders.iter().map(|wo| wo.id.clone()).collect()
}

/// Observer that records every callback as a short event string
#[derive(Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<String>>,
}

impl RecordingObserver {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn events(&self) -> Vec<String> {
        self.events.lock().clone()
    }

    fn push(&self, event: String) {
        self.events.lock().push(event);
    }
}

impl IndexingObserver for RecordingObserver {
    fn run_started(&self, _run_id: Uuid, discoverer: &str) {
        self.push(format!("started:{}", discoverer));
    }

    fn record_indexed(&self, _run_id: Uuid, work_order: &WorkOrder) {
        self.push(format!("indexed:{}", work_order.id));
    }

    fn normalization_failed(&self, _run_id: Uuid, record: &RawRecord, error: &AppError) {
        self.push(format!("failed:{}:{}", record.source_ref, error.error_code()));
    }

    fn run_completed(&self, stats: &IndexingRunStats) {
        self.push(format!("completed:{}", stats.indexed_count));
    }

    fn run_failed(&self, _run_id: Uuid, error: &AppError) {
        self.push(format!("run_failed:{}", error.error_code()));
    }
}
