//! Candidate-key extraction and value coercion over raw JSON objects

use crate::error::{AppError, Result};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

pub const ID_KEYS: &[&str] = &["id", "_id", "work_order_id"];
pub const TITLE_KEYS: &[&str] = &["title", "name", "subject"];
pub const DESCRIPTION_KEYS: &[&str] = &["description", "details", "summary"];
pub const STATUS_KEYS: &[&str] = &["status", "state"];
pub const PRIORITY_KEYS: &[&str] = &["priority", "urgency"];
pub const CREATED_KEYS: &[&str] = &["created_at", "created", "timestamp"];
pub const UPDATED_KEYS: &[&str] = &["updated_at", "updated", "modified"];
pub const DUE_KEYS: &[&str] = &["due_date", "deadline", "due"];
pub const ASSIGNEE_KEYS: &[&str] = &["assigned_to", "assignee", "owner"];
pub const TAG_KEYS: &[&str] = &["tags", "labels", "categories"];

/// Length of a content-hash id in hex characters
const CONTENT_ID_LEN: usize = 16;

/// First present, non-null, non-empty value among `keys`, with the key that held it
pub fn pick<'a>(object: &'a Map<String, Value>, keys: &[&'static str]) -> Option<(&'static str, &'a Value)> {
    keys.iter()
        .find_map(|key| object.get(*key).filter(|v| !is_blank(v)).map(|v| (*key, v)))
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

/// Coerce a scalar into text; arrays and objects are rejected.
pub fn coerce_text(field: &str, value: &Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.trim().to_string()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(AppError::NormalizationFailure(format!(
            "field `{}` holds {} instead of text",
            field,
            kind_of(other)
        ))),
    }
}

/// Status and priority must arrive as strings
pub fn require_str<'a>(field: &str, value: &'a Value) -> Result<&'a str> {
    value.as_str().ok_or_else(|| {
        AppError::NormalizationFailure(format!(
            "field `{}` holds {} instead of a string",
            field,
            kind_of(value)
        ))
    })
}

/// Assignee identity: objects yield `name`, then `email`, then their compact JSON.
pub fn coerce_assignee(value: &Value) -> Result<String> {
    match value {
        Value::Object(map) => {
            let named = ["name", "email"]
                .iter()
                .filter_map(|key| map.get(*key))
                .find_map(|v| v.as_str().map(str::trim).filter(|s| !s.is_empty()));

            match named {
                Some(identity) => Ok(identity.to_string()),
                None => Ok(value.to_string()),
            }
        }
        other => coerce_text("assigned_to", other),
    }
}

/// Tags from a comma-separated string or an array; anything else is empty.
///
/// Duplicates are dropped, first occurrence wins.
pub fn coerce_tags(value: &Value) -> Vec<String> {
    let raw: Vec<String> = match value {
        Value::String(s) => s.split(',').map(|t| t.trim().to_string()).collect(),
        Value::Array(items) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.trim().to_string()),
                Value::Number(n) => Some(n.to_string()),
                Value::Bool(b) => Some(b.to_string()),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    };

    let mut tags: Vec<String> = Vec::with_capacity(raw.len());
    for tag in raw {
        if !tag.is_empty() && !tags.contains(&tag) {
            tags.push(tag);
        }
    }
    tags
}

/// Deterministic id for payloads without one: SHA-256 over the key-sorted JSON text
pub fn content_id(payload: &Value) -> String {
    let canonical = canonicalize(payload).to_string();
    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    let digest = format!("{:x}", hasher.finalize());
    digest[..CONTENT_ID_LEN].to_string()
}

/// Rebuild objects with keys inserted in sorted order, at every depth
fn canonicalize(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            let mut sorted = Map::with_capacity(map.len());
            for key in keys {
                sorted.insert(key.clone(), canonicalize(&map[key]));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.iter().map(canonicalize).collect()),
        other => other.clone(),
    }
}

pub fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
