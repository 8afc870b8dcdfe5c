use super::{IndexingObserver, TracingObserver};
use crate::config::Config;
use crate::discovery::{self, Discoverer};
use crate::error::{AppError, Result};
use crate::index::{IndexStatistics, WorkOrderIndex};
use crate::models::{WorkOrderPriority, WorkOrderStatus};
use crate::normalize::RecordNormalizer;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::Instrument;
use uuid::Uuid;

const DEFAULT_DISCOVERY_TIMEOUT: Duration = Duration::from_secs(120);

/// Result of one indexing run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexingRunStats {
    pub run_id: Uuid,

    /// Candidates returned by the discoverer
    pub discovered_count: usize,

    /// Candidates normalized and added
    pub indexed_count: usize,

    /// Candidates rejected by the normalizer
    pub failed_count: usize,

    /// Index size after the run
    pub total_work_orders: usize,

    pub duration_seconds: f64,

    /// Whole-index distributions after the run
    pub status_distribution: BTreeMap<WorkOrderStatus, usize>,
    pub priority_distribution: BTreeMap<WorkOrderPriority, usize>,

    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

/// Index statistics plus the time of the last successful run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceStatistics {
    #[serde(flatten)]
    pub index: IndexStatistics,
    pub last_indexed_at: Option<DateTime<Utc>>,
}

/// Drives discovery, normalization and insertion into a shared index
pub struct IndexingService {
    index: WorkOrderIndex,
    discoverer: Arc<dyn Discoverer>,
    normalizer: RecordNormalizer,
    observer: Arc<dyn IndexingObserver>,
    discovery_timeout: Duration,
    last_indexed_at: RwLock<Option<DateTime<Utc>>>,
}

impl IndexingService {
    pub fn new(index: WorkOrderIndex, discoverer: Arc<dyn Discoverer>) -> Self {
        Self {
            index,
            discoverer,
            normalizer: RecordNormalizer::default(),
            observer: Arc::new(TracingObserver),
            discovery_timeout: DEFAULT_DISCOVERY_TIMEOUT,
            last_indexed_at: RwLock::new(None),
        }
    }

    /// Build a service with the discoverer, source tag and timeout from `config`
    pub fn from_config(config: &Config, index: WorkOrderIndex) -> Result<Self> {
        let discoverer = discovery::from_config(&config.discovery)?;

        Ok(Self::new(index, discoverer)
            .with_normalizer(RecordNormalizer::new(config.index.default_source.clone()))
            .with_discovery_timeout(config.discovery.timeout()))
    }

    pub fn with_normalizer(mut self, normalizer: RecordNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn IndexingObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn with_discovery_timeout(mut self, timeout: Duration) -> Self {
        self.discovery_timeout = timeout;
        self
    }

    pub fn index(&self) -> &WorkOrderIndex {
        &self.index
    }

    pub fn last_indexed_at(&self) -> Option<DateTime<Utc>> {
        *self.last_indexed_at.read()
    }

    /// Run discovery once and index every candidate that normalizes.
    ///
    /// Normalization failures are counted and reported to the observer, never
    /// returned. A discovery error or timeout fails the run and leaves
    /// `last_indexed_at` unchanged.
    pub async fn run(&self) -> Result<IndexingRunStats> {
        let run_id = Uuid::new_v4();
        let span = tracing::info_span!(
            "indexing_run",
            run_id = %run_id,
            discoverer = self.discoverer.name()
        );

        self.run_inner(run_id).instrument(span).await
    }

    async fn run_inner(&self, run_id: Uuid) -> Result<IndexingRunStats> {
        let started = Instant::now();
        let started_at = Utc::now();
        let discoverer_name = self.discoverer.name().to_string();

        self.observer.run_started(run_id, &discoverer_name);

        let discovered = tokio::time::timeout(self.discovery_timeout, self.discoverer.discover())
            .await
            .map_err(|_| {
                AppError::discovery(
                    &discoverer_name,
                    format!("timed out after {}s", self.discovery_timeout.as_secs_f64()),
                )
            })
            .and_then(|result| result);

        let records = match discovered {
            Ok(records) => records,
            Err(e) => {
                self.observer.run_failed(run_id, &e);
                return Err(e);
            }
        };

        let mut indexed_count = 0;
        let mut failed_count = 0;

        for record in &records {
            match self.normalizer.normalize(record) {
                Ok(work_order) => {
                    self.index.add(work_order.clone());
                    self.observer.record_indexed(run_id, &work_order);
                    indexed_count += 1;
                }
                Err(e) => {
                    self.observer.normalization_failed(run_id, record, &e);
                    failed_count += 1;
                }
            }
        }

        let completed_at = Utc::now();
        *self.last_indexed_at.write() = Some(completed_at);

        let statistics = self.index.statistics();
        let stats = IndexingRunStats {
            run_id,
            discovered_count: records.len(),
            indexed_count,
            failed_count,
            total_work_orders: statistics.total_work_orders,
            duration_seconds: started.elapsed().as_secs_f64(),
            status_distribution: statistics.status_distribution,
            priority_distribution: statistics.priority_distribution,
            started_at,
            completed_at,
        };

        self.observer.run_completed(&stats);
        Ok(stats)
    }

    pub fn statistics(&self) -> ServiceStatistics {
        ServiceStatistics {
            index: self.index.statistics(),
            last_indexed_at: self.last_indexed_at(),
        }
    }
}
