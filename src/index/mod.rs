//! In-memory multi-index over work orders
//!
//! The index keeps one primary store and five derived structures:
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │   primary store   id → WorkOrder             │
//! ├──────────────────────────────────────────────┤
//! │   status          status   → [id] (ordered)  │
//! │   priority        priority → [id] (ordered)  │
//! │   assignee        who      → [id] (ordered)  │
//! │   tag             tag      → [id] (ordered)  │
//! │   tokens          token    → {id}            │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! Re-adding an id unlinks the previous record from every derived structure
//! before linking the new one, all under a single write lock.

mod query;
mod stats;
mod store;
mod tokenizer;

pub use query::WorkOrderFilter;
pub use stats::IndexStatistics;
pub use store::WorkOrderIndex;
pub use tokenizer::tokenize;
