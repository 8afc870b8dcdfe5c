use super::IndexingRunStats;
use crate::error::AppError;
use crate::models::{RawRecord, WorkOrder};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Receives progress callbacks from indexing runs.
///
/// Every method has a no-op default so observers only implement what they need.
pub trait IndexingObserver: Send + Sync {
    fn run_started(&self, _run_id: Uuid, _discoverer: &str) {}

    fn record_indexed(&self, _run_id: Uuid, _work_order: &WorkOrder) {}

    fn normalization_failed(&self, _run_id: Uuid, _record: &RawRecord, _error: &AppError) {}

    fn run_completed(&self, _stats: &IndexingRunStats) {}

    fn run_failed(&self, _run_id: Uuid, _error: &AppError) {}
}

/// Default observer, reporting through `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl IndexingObserver for TracingObserver {
    fn run_started(&self, run_id: Uuid, discoverer: &str) {
        info!(run_id = %run_id, discoverer, "Indexing run started");
    }

    fn record_indexed(&self, run_id: Uuid, work_order: &WorkOrder) {
        debug!(
            run_id = %run_id,
            work_order_id = %work_order.id,
            status = %work_order.status,
            "Work order indexed"
        );
    }

    fn normalization_failed(&self, run_id: Uuid, record: &RawRecord, error: &AppError) {
        warn!(
            run_id = %run_id,
            source_ref = %record.source_ref,
            payload = %record.payload_text(),
            error = %error,
            "Failed to normalize work order"
        );
    }

    fn run_completed(&self, stats: &IndexingRunStats) {
        info!(
            run_id = %stats.run_id,
            discovered = stats.discovered_count,
            indexed = stats.indexed_count,
            failed = stats.failed_count,
            total = stats.total_work_orders,
            duration_secs = stats.duration_seconds,
            "Indexing run completed"
        );
    }

    fn run_failed(&self, run_id: Uuid, err: &AppError) {
        error!(
            run_id = %run_id,
            error_code = err.error_code(),
            error = %err,
            "Indexing run failed"
        );
    }
}
