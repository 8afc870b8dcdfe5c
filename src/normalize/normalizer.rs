use super::aliases::{priority_from_alias, status_from_alias};
use super::fields::{self, pick};
use super::timestamps::parse_timestamp;
use crate::error::{AppError, Result};
use crate::models::{
    RawRecord, WorkOrder, WorkOrderPriority, WorkOrderStatus, DEFAULT_SOURCE, DEFAULT_TITLE,
    SOURCE_URL_KEY,
};
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use std::collections::HashSet;
use tracing::debug;

/// Converts loosely-typed discovered payloads into canonical work orders
#[derive(Debug, Clone)]
pub struct RecordNormalizer {
    default_source: String,
}

impl Default for RecordNormalizer {
    fn default() -> Self {
        Self::new(DEFAULT_SOURCE)
    }
}

impl RecordNormalizer {
    pub fn new(default_source: impl Into<String>) -> Self {
        Self {
            default_source: default_source.into(),
        }
    }

    pub fn default_source(&self) -> &str {
        &self.default_source
    }

    pub fn normalize(&self, record: &RawRecord) -> Result<WorkOrder> {
        self.normalize_at(&record.payload, &record.source_ref, Utc::now())
    }

    /// Normalize against a fixed ingestion clock.
    ///
    /// `now` fills `created_at`/`updated_at` when the payload has no
    /// parsable value for them.
    pub fn normalize_at(
        &self,
        payload: &Value,
        source_ref: &str,
        now: DateTime<Utc>,
    ) -> Result<WorkOrder> {
        let object = payload.as_object().ok_or_else(|| {
            AppError::NormalizationFailure(format!(
                "expected a JSON object, got {}",
                fields::kind_of(payload)
            ))
        })?;

        let mut consumed: HashSet<&'static str> = HashSet::new();

        let id = match pick(object, fields::ID_KEYS) {
            Some((key, value)) => {
                consumed.insert(key);
                fields::coerce_text("id", value)?
            }
            None => fields::content_id(payload),
        };

        let title = match pick(object, fields::TITLE_KEYS) {
            Some((key, value)) => {
                consumed.insert(key);
                fields::coerce_text("title", value)?
            }
            None => DEFAULT_TITLE.to_string(),
        };

        let description = match pick(object, fields::DESCRIPTION_KEYS) {
            Some((key, value)) => {
                consumed.insert(key);
                fields::coerce_text("description", value)?
            }
            None => String::new(),
        };

        let status = match pick(object, fields::STATUS_KEYS) {
            Some((key, value)) => {
                consumed.insert(key);
                let raw = fields::require_str("status", value)?;
                status_from_alias(raw).unwrap_or_else(|| {
                    debug!(work_order_id = %id, status = raw, "Unknown status, defaulting to queued");
                    WorkOrderStatus::default()
                })
            }
            None => WorkOrderStatus::default(),
        };

        let priority = match pick(object, fields::PRIORITY_KEYS) {
            Some((key, value)) => {
                consumed.insert(key);
                let raw = fields::require_str("priority", value)?;
                priority_from_alias(raw).unwrap_or_else(|| {
                    debug!(work_order_id = %id, priority = raw, "Unknown priority, defaulting to medium");
                    WorkOrderPriority::default()
                })
            }
            None => WorkOrderPriority::default(),
        };

        let created_at = timestamp_field(object, fields::CREATED_KEYS, &mut consumed, &id);
        let updated_at = timestamp_field(object, fields::UPDATED_KEYS, &mut consumed, &id);
        let due_date = timestamp_field(object, fields::DUE_KEYS, &mut consumed, &id);

        let assigned_to = match pick(object, fields::ASSIGNEE_KEYS) {
            Some((key, value)) => {
                consumed.insert(key);
                Some(fields::coerce_assignee(value)?)
            }
            None => None,
        };

        let tags = match pick(object, fields::TAG_KEYS) {
            Some((key, value)) => {
                consumed.insert(key);
                fields::coerce_tags(value)
            }
            None => Vec::new(),
        };

        let mut metadata: Map<String, Value> = object
            .iter()
            .filter(|(key, _)| !consumed.contains(key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        metadata.insert(SOURCE_URL_KEY.to_string(), Value::String(source_ref.to_string()));

        Ok(WorkOrder {
            id,
            title,
            description,
            status,
            priority,
            created_at: created_at.unwrap_or(now),
            updated_at: updated_at.unwrap_or(now),
            assigned_to,
            due_date,
            tags,
            metadata,
            source: self.default_source.clone(),
        })
    }
}

/// Parse the first candidate timestamp. An unparsable value is not consumed,
/// so the raw text survives in metadata.
fn timestamp_field(
    object: &Map<String, Value>,
    keys: &[&'static str],
    consumed: &mut HashSet<&'static str>,
    id: &str,
) -> Option<DateTime<Utc>> {
    let (key, value) = pick(object, keys)?;
    match parse_timestamp(value) {
        Some(ts) => {
            consumed.insert(key);
            Some(ts)
        }
        None => {
            debug!(work_order_id = %id, field = key, "Unparsable timestamp");
            None
        }
    }
}
