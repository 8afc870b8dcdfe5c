use super::{extract_candidates, Discoverer};
use crate::error::Result;
use crate::models::RawRecord;
use async_trait::async_trait;
use serde_json::Value;

/// Discoverer over payloads already held in memory
#[derive(Debug, Clone, Default)]
pub struct StaticDiscoverer {
    records: Vec<RawRecord>,
}

impl StaticDiscoverer {
    pub fn new(records: Vec<RawRecord>) -> Self {
        Self { records }
    }

    /// Extract candidates from a JSON body as if it had been fetched from `source_ref`
    pub fn from_body(body: &Value, source_ref: &str) -> Self {
        Self::new(extract_candidates(body, source_ref))
    }

    pub fn with_record(mut self, payload: Value, source_ref: impl Into<String>) -> Self {
        self.records.push(RawRecord::new(payload, source_ref));
        self
    }
}

#[async_trait]
impl Discoverer for StaticDiscoverer {
    fn name(&self) -> &str {
        "static"
    }

    async fn discover(&self) -> Result<Vec<RawRecord>> {
        Ok(self.records.clone())
    }
}
