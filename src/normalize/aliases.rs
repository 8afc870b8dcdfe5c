//! Lossy status/priority alias tables

use crate::models::{WorkOrderPriority, WorkOrderStatus};

/// Lowercase, trim and fold `-`/spaces to `_` so `"In Progress"` and
/// `"in-progress"` both read as `in_progress`.
fn canonical(value: &str) -> String {
    value
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == '-' || c.is_whitespace() { '_' } else { c })
        .collect()
}

/// Map a source status string onto a canonical status, if it is known
pub fn status_from_alias(value: &str) -> Option<WorkOrderStatus> {
    let status = match canonical(value).as_str() {
        "queued" | "pending" => WorkOrderStatus::Queued,
        "in_progress" | "active" | "running" => WorkOrderStatus::InProgress,
        "completed" | "done" => WorkOrderStatus::Completed,
        "failed" | "error" => WorkOrderStatus::Failed,
        "cancelled" | "canceled" => WorkOrderStatus::Cancelled,
        "pending_approval" | "awaiting_approval" => WorkOrderStatus::PendingApproval,
        "on_hold" | "paused" => WorkOrderStatus::OnHold,
        _ => return None,
    };
    Some(status)
}

/// Map a source priority string onto a canonical priority, if it is known
pub fn priority_from_alias(value: &str) -> Option<WorkOrderPriority> {
    let priority = match canonical(value).as_str() {
        "low" => WorkOrderPriority::Low,
        "medium" | "normal" => WorkOrderPriority::Medium,
        "high" => WorkOrderPriority::High,
        "urgent" => WorkOrderPriority::Urgent,
        "critical" => WorkOrderPriority::Critical,
        _ => return None,
    };
    Some(priority)
}
