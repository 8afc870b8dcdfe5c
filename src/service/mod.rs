//! Indexing orchestration: discover, normalize, index

mod indexer;
mod observer;

pub use indexer::{IndexingRunStats, IndexingService, ServiceStatistics};
pub use observer::{IndexingObserver, TracingObserver};
