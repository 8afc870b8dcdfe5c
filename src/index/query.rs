//! Filter criteria for listing work orders

use crate::models::{WorkOrder, WorkOrderPriority, WorkOrderStatus};
use serde::{Deserialize, Serialize};

/// Listing filter; unset criteria match everything
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkOrderFilter {
    /// Filter by status
    pub status: Option<WorkOrderStatus>,

    /// Filter by priority
    pub priority: Option<WorkOrderPriority>,

    /// Filter by exact assignee
    pub assignee: Option<String>,

    /// Filter by exact tag
    pub tag: Option<String>,

    /// Maximum number of results
    pub limit: Option<usize>,
}

impl WorkOrderFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, status: WorkOrderStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_priority(mut self, priority: WorkOrderPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Some(assignee.into());
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Whether a record satisfies every set criterion (limit aside)
    pub fn matches(&self, work_order: &WorkOrder) -> bool {
        let status_match = self.status.map_or(true, |s| work_order.status == s);
        let priority_match = self.priority.map_or(true, |p| work_order.priority == p);
        let assignee_match = self
            .assignee
            .as_deref()
            .map_or(true, |a| work_order.assigned_to.as_deref().map(str::trim) == Some(a));
        let tag_match = self
            .tag
            .as_deref()
            .map_or(true, |t| work_order.tags.iter().any(|tag| tag == t));

        status_match && priority_match && assignee_match && tag_match
    }
}
