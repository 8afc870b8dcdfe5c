use crate::error::{AppError, Result};
use crate::index::IndexStatistics;
use crate::models::{WorkOrder, WorkOrderPriority, WorkOrderStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

/// Full index export: records, a statistics snapshot and the export time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportDocument {
    pub work_orders: Vec<WorkOrder>,
    pub statistics: IndexStatistics,
    #[serde(with = "crate::models::timestamp")]
    pub exported_at: DateTime<Utc>,
}

/// Outcome of an import
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportReport {
    /// Records added to the index
    pub imported: usize,

    /// Records rejected and left out
    pub skipped: usize,
}

impl ImportReport {
    pub fn total(&self) -> usize {
        self.imported + self.skipped
    }
}

/// The `work_orders` array of an import document
pub(crate) fn work_order_entries(document: &Value) -> Result<&Vec<Value>> {
    document
        .get("work_orders")
        .and_then(Value::as_array)
        .ok_or_else(|| {
            AppError::SerializationFailure(
                "import document has no `work_orders` array".to_string(),
            )
        })
}

/// Decode one canonical record. Enum values are checked first so a bad
/// status or priority surfaces as `InvalidEnumValue`.
pub(crate) fn decode_work_order(entry: &Value) -> Result<WorkOrder> {
    let object = entry.as_object().ok_or_else(|| {
        AppError::SerializationFailure("work order entry is not an object".to_string())
    })?;

    if let Some(raw) = object.get("status").and_then(Value::as_str) {
        if WorkOrderStatus::from_str(raw).is_err() {
            return Err(AppError::InvalidEnumValue {
                field: "status",
                value: raw.to_string(),
            });
        }
    }

    if let Some(raw) = object.get("priority").and_then(Value::as_str) {
        if WorkOrderPriority::from_str(raw).is_err() {
            return Err(AppError::InvalidEnumValue {
                field: "priority",
                value: raw.to_string(),
            });
        }
    }

    WorkOrder::deserialize(entry).map_err(|e| {
        let id = object.get("id").map(Value::to_string).unwrap_or_default();
        AppError::SerializationFailure(format!("work order {}: {}", id, e))
    })
}
