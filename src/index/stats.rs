//! Index statistics snapshot

use crate::models::{WorkOrderPriority, WorkOrderStatus};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Counts derived from the current index state.
///
/// Field names follow the export document's `statistics` object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStatistics {
    /// Number of records in the primary store
    pub total_work_orders: usize,

    /// Records per status; every status is present
    pub status_distribution: BTreeMap<WorkOrderStatus, usize>,

    /// Records per priority; every priority is present
    pub priority_distribution: BTreeMap<WorkOrderPriority, usize>,

    /// Distinct assignee identities
    pub assigned_count: usize,

    /// Distinct tags
    pub tags_count: usize,

    /// Distinct search tokens
    pub search_index_size: usize,
}

impl IndexStatistics {
    pub fn status_count(&self, status: WorkOrderStatus) -> usize {
        self.status_distribution.get(&status).copied().unwrap_or(0)
    }

    pub fn priority_count(&self, priority: WorkOrderPriority) -> usize {
        self.priority_distribution.get(&priority).copied().unwrap_or(0)
    }
}
