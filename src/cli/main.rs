mod output;

use anyhow::Context;
use clap::{Parser, Subcommand};
use output::Printer;
use std::path::{Path, PathBuf};
use work_order_indexer::normalize::{priority_from_alias, status_from_alias};
use work_order_indexer::{
    serialization, telemetry, Config, IndexingService, WorkOrderFilter, WorkOrderIndex,
    WorkOrderPriority, WorkOrderStatus,
};

#[derive(Parser)]
#[command(name = "wo-indexer")]
#[command(about = "Index and query factory work orders", long_about = None, version)]
struct Cli {
    /// Configuration file layered over the built-in defaults
    #[arg(short, long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Index snapshot loaded before and saved after each command
    #[arg(short, long, global = true, value_name = "PATH", env = "WO_INDEXER_SNAPSHOT")]
    snapshot: Option<PathBuf>,

    /// Print machine-readable JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Discover and index work orders
    Index {
        /// Also write an export document to this path
        #[arg(short, long, value_name = "PATH")]
        export: Option<PathBuf>,
    },

    /// List work orders, newest first
    List {
        #[arg(long, value_parser = parse_status)]
        status: Option<WorkOrderStatus>,

        #[arg(long, value_parser = parse_priority)]
        priority: Option<WorkOrderPriority>,

        #[arg(long, value_name = "WHO")]
        assigned: Option<String>,

        #[arg(long)]
        tag: Option<String>,

        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Full-text search; every word must match
    Search {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show index statistics
    Stats,

    /// Show one work order
    Show {
        #[arg(value_name = "WORK_ORDER_ID")]
        id: String,
    },

    /// Export the index to a JSON document
    Export {
        #[arg(value_name = "PATH")]
        path: PathBuf,
    },

    /// Import work orders from an export document
    Import {
        #[arg(value_name = "PATH")]
        path: PathBuf,
    },
}

fn parse_status(value: &str) -> Result<WorkOrderStatus, String> {
    status_from_alias(value).ok_or_else(|| format!("unknown status {:?}", value))
}

fn parse_priority(value: &str) -> Result<WorkOrderPriority, String> {
    priority_from_alias(value).ok_or_else(|| format!("unknown priority {:?}", value))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    telemetry::init(&config.observability)?;

    let printer = Printer::new(cli.json);
    let snapshot = cli.snapshot.clone().or_else(|| config.index.snapshot_path.clone());

    let index = WorkOrderIndex::new();
    if let Some(ref path) = snapshot {
        load_snapshot(&index, path).await?;
    }

    match cli.command {
        Commands::Index { export } => {
            let service = IndexingService::from_config(&config, index.clone())?;
            let stats = service.run().await?;
            printer.run(&stats)?;

            save_snapshot(&index, snapshot.as_deref()).await?;
            if let Some(path) = export {
                serialization::export_to_path(&index, &path).await?;
                printer.message(&format!("Exported to {}", path.display()));
            }
        }

        Commands::List {
            status,
            priority,
            assigned,
            tag,
            limit,
        } => {
            let filter = WorkOrderFilter {
                status,
                priority,
                assignee: assigned,
                tag,
                limit,
            };
            printer.work_orders(&index.list(&filter))?;
        }

        Commands::Search { query, limit } => {
            let mut results = index.search(&query.join(" "));
            results.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            if let Some(limit) = limit {
                results.truncate(limit);
            }
            printer.work_orders(&results)?;
        }

        Commands::Stats => {
            printer.statistics(&index.statistics())?;
        }

        Commands::Show { id } => {
            let work_order = index.require(&id)?;
            printer.work_order(&work_order)?;
        }

        Commands::Export { path } => {
            let document = serialization::export_to_path(&index, &path).await?;
            printer.message(&format!(
                "Exported {} work order(s) to {}",
                document.work_orders.len(),
                path.display()
            ));
        }

        Commands::Import { path } => {
            let report = serialization::import_from_path(&index, &path)
                .await
                .with_context(|| format!("Failed to import {}", path.display()))?;
            printer.import(&report)?;
            save_snapshot(&index, snapshot.as_deref()).await?;
        }
    }

    Ok(())
}

async fn load_snapshot(index: &WorkOrderIndex, path: &Path) -> anyhow::Result<()> {
    if !tokio::fs::try_exists(path).await.unwrap_or(false) {
        tracing::debug!(path = %path.display(), "No snapshot yet");
        return Ok(());
    }

    serialization::import_from_path(index, path)
        .await
        .with_context(|| format!("Failed to load snapshot {}", path.display()))?;
    Ok(())
}

async fn save_snapshot(index: &WorkOrderIndex, path: Option<&Path>) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            serialization::export_to_path(index, path)
                .await
                .with_context(|| format!("Failed to save snapshot {}", path.display()))?;
        }
        None => {
            tracing::warn!("No snapshot path configured; results are not kept between runs");
        }
    }
    Ok(())
}
