//! Export and import of the full index
//!
//! Exports carry every record, a statistics snapshot and the export time.
//! Imports only need the `work_orders` array; each entry is decoded strictly
//! and bad entries are skipped with a warning.

mod document;

pub use document::{ExportDocument, ImportReport};

use crate::error::Result;
use crate::index::WorkOrderIndex;
use chrono::Utc;
use serde_json::Value;
use std::path::Path;
use tokio::fs;
use tracing::{info, warn};

/// Capture the current index as an export document
pub fn export_document(index: &WorkOrderIndex) -> ExportDocument {
    let (work_orders, statistics) = index.snapshot();
    ExportDocument {
        work_orders,
        statistics,
        exported_at: Utc::now(),
    }
}

pub fn export_json(index: &WorkOrderIndex) -> Result<String> {
    Ok(serde_json::to_string_pretty(&export_document(index))?)
}

/// Add every decodable record in `document` to the index
pub fn import_document(index: &WorkOrderIndex, document: &Value) -> Result<ImportReport> {
    let entries = document::work_order_entries(document)?;
    let mut report = ImportReport::default();

    for (position, entry) in entries.iter().enumerate() {
        match document::decode_work_order(entry) {
            Ok(work_order) => {
                index.add(work_order);
                report.imported += 1;
            }
            Err(e) => {
                warn!(
                    position,
                    error_code = e.error_code(),
                    error = %e,
                    "Skipping work order during import"
                );
                report.skipped += 1;
            }
        }
    }

    Ok(report)
}

pub fn import_json(index: &WorkOrderIndex, json: &str) -> Result<ImportReport> {
    let document: Value = serde_json::from_str(json)?;
    import_document(index, &document)
}

/// Write the export document to `path`, creating parent directories
pub async fn export_to_path(index: &WorkOrderIndex, path: &Path) -> Result<ExportDocument> {
    let document = export_document(index);
    let bytes = serde_json::to_vec_pretty(&document)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }
    fs::write(path, &bytes).await?;

    info!(
        path = %path.display(),
        work_orders = document.work_orders.len(),
        "Exported work orders"
    );
    Ok(document)
}

pub async fn import_from_path(index: &WorkOrderIndex, path: &Path) -> Result<ImportReport> {
    let contents = fs::read_to_string(path).await?;
    let report = import_json(index, &contents)?;

    info!(
        path = %path.display(),
        imported = report.imported,
        skipped = report.skipped,
        "Imported work orders"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{WorkOrder, WorkOrderStatus};
    use serde_json::json;

    #[test]
    fn test_export_shape() {
        let index = WorkOrderIndex::new();
        index.add(WorkOrder::new("wo_1", "Fix login bug").with_tags(["bug"]));

        let value: Value = serde_json::from_str(&export_json(&index).unwrap()).unwrap();

        assert_eq!(value["work_orders"][0]["status"], json!("queued"));
        assert_eq!(value["work_orders"][0]["priority"], json!("medium"));
        assert_eq!(value["statistics"]["total_work_orders"], json!(1));
        assert_eq!(value["statistics"]["status_distribution"]["in_progress"], json!(0));
        assert!(value["exported_at"].as_str().unwrap().ends_with('Z'));
    }

    #[test]
    fn test_import_skips_bad_records() {
        let index = WorkOrderIndex::new();
        let document = json!({
            "work_orders": [
                {"id": "ok", "title": "Fine", "status": "completed", "priority": "low",
                 "created_at": "2024-01-01T00:00:00Z", "updated_at": "2024-01-01T00:00:00Z"},
                {"id": "bad_status", "title": "x", "status": "weird", "priority": "low",
                 "created_at": "2024-01-01T00:00:00Z", "updated_at": "2024-01-01T00:00:00Z"},
                {"id": "bad_time", "title": "x", "status": "queued", "priority": "low",
                 "created_at": "soon", "updated_at": "2024-01-01T00:00:00Z"},
                "not an object"
            ]
        });

        let report = import_document(&index, &document).unwrap();

        assert_eq!(report, ImportReport { imported: 1, skipped: 3 });
        assert_eq!(report.total(), 4);
        assert_eq!(index.by_status(WorkOrderStatus::Completed).len(), 1);
        assert!(!index.contains("bad_status"));
    }

    #[test]
    fn test_import_rejects_malformed_documents() {
        let index = WorkOrderIndex::new();
        assert_eq!(
            import_json(&index, "{not json").unwrap_err().error_code(),
            "SERIALIZATION_FAILURE"
        );
        assert_eq!(
            import_json(&index, r#"{"records": []}"#).unwrap_err().error_code(),
            "SERIALIZATION_FAILURE"
        );
    }

    #[tokio::test]
    async fn test_path_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshots").join("index.json");

        let source = WorkOrderIndex::new();
        source.add(WorkOrder::new("wo_1", "Fix login bug"));
        let exported = export_to_path(&source, &path).await.unwrap();
        assert_eq!(exported.work_orders.len(), 1);

        let target = WorkOrderIndex::new();
        let report = import_from_path(&target, &path).await.unwrap();
        assert_eq!(report.imported, 1);
        assert_eq!(target.statistics(), source.statistics());
    }
}
