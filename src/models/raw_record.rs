use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A candidate work order as produced by a discoverer, before normalization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    /// Loosely-typed payload
    pub payload: Value,

    /// Origin URL or endpoint, kept for provenance
    pub source_ref: String,
}

impl RawRecord {
    pub fn new(payload: Value, source_ref: impl Into<String>) -> Self {
        Self {
            payload,
            source_ref: source_ref.into(),
        }
    }

    /// Compact JSON text of the payload, used when logging rejected records
    pub fn payload_text(&self) -> String {
        self.payload.to_string()
    }
}
