//! Work order indexing and retrieval
//!
//! Discovers work orders from a factory API or local JSON files, normalizes
//! them into a canonical shape, and keeps them in an in-memory index with
//! status, priority, assignee and tag lookups plus full-text search. The
//! index can be exported to and imported from a JSON document.
//!
//! ```no_run
//! use std::sync::Arc;
//! use work_order_indexer::{discovery::StaticDiscoverer, IndexingService, WorkOrderIndex};
//!
//! # async fn demo() -> work_order_indexer::Result<()> {
//! let body = serde_json::json!({"tasks": [{"name": "Replace filter", "state": "active"}]});
//! let index = WorkOrderIndex::new();
//! let service = IndexingService::new(
//!     index.clone(),
//!     Arc::new(StaticDiscoverer::from_body(&body, "memory")),
//! );
//!
//! let stats = service.run().await?;
//! assert_eq!(stats.indexed_count, 1);
//! assert_eq!(index.search("filter").len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod discovery;
pub mod error;
pub mod index;
pub mod models;
pub mod normalize;
pub mod serialization;
pub mod service;
pub mod telemetry;

pub use config::Config;
pub use discovery::Discoverer;
pub use error::{AppError, Result};
pub use index::{IndexStatistics, WorkOrderFilter, WorkOrderIndex};
pub use models::{RawRecord, WorkOrder, WorkOrderPriority, WorkOrderStatus};
pub use normalize::RecordNormalizer;
pub use serialization::{ExportDocument, ImportReport};
pub use service::{IndexingObserver, IndexingRunStats, IndexingService, TracingObserver};
