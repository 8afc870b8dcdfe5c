use crate::models::RawRecord;
use serde_json::{Map, Value};

/// Keys whose arrays hold work orders in a discovered body
pub const COLLECTION_KEYS: &[&str] = &[
    "work_orders",
    "workOrders",
    "tasks",
    "jobs",
    "orders",
    "queue",
    "pending",
    "assigned",
    "work_items",
    "items",
    "data",
];

/// Keys that mark an object as a work order in its own right
const RECORD_KEYS: &[&str] = &["id", "_id", "work_order_id", "title", "name", "subject"];

/// How far below the top level collections are searched
const MAX_DEPTH: usize = 1;

/// Pull candidate payloads out of a discovered JSON body.
///
/// A top-level array yields its elements. An object that looks like a work
/// order is a candidate itself, whatever fields it carries. Any other object
/// yields the elements of every collection array it holds. Containers nested
/// one level down (an array element, or an object under a collection key) are
/// opened the same way.
pub fn extract_candidates(body: &Value, source_ref: &str) -> Vec<RawRecord> {
    let mut payloads = Vec::new();
    collect(body, 0, &mut payloads);
    payloads
        .into_iter()
        .map(|payload| RawRecord::new(payload, source_ref))
        .collect()
}

fn collect(value: &Value, depth: usize, out: &mut Vec<Value>) {
    match value {
        Value::Array(items) => {
            for item in items {
                match item {
                    Value::Object(map)
                        if depth < MAX_DEPTH && !looks_like_record(map) && has_collection(map) =>
                    {
                        collect(item, depth + 1, out)
                    }
                    _ => out.push(item.clone()),
                }
            }
        }
        Value::Object(map) if looks_like_record(map) => out.push(value.clone()),
        Value::Object(map) => {
            for key in COLLECTION_KEYS {
                match map.get(*key) {
                    Some(Value::Array(items)) => out.extend(items.iter().cloned()),
                    Some(nested @ Value::Object(_)) if depth < MAX_DEPTH => {
                        collect(nested, depth + 1, out);
                    }
                    _ => {}
                }
            }
        }
        _ => {}
    }
}

fn looks_like_record(map: &Map<String, Value>) -> bool {
    RECORD_KEYS.iter().any(|key| map.contains_key(*key))
}

fn has_collection(map: &Map<String, Value>) -> bool {
    COLLECTION_KEYS
        .iter()
        .any(|key| matches!(map.get(*key), Some(Value::Array(_)) | Some(Value::Object(_))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ids(records: &[RawRecord]) -> Vec<String> {
        records
            .iter()
            .map(|r| r.payload["id"].as_str().unwrap_or_default().to_string())
            .collect()
    }

    #[test]
    fn test_top_level_array() {
        let records = extract_candidates(&json!([{"id": "a"}, {"id": "b"}]), "src");
        assert_eq!(ids(&records), vec!["a", "b"]);
        assert!(records.iter().all(|r| r.source_ref == "src"));
    }

    #[test]
    fn test_collection_keys() {
        let body = json!({
            "tasks": [{"id": "t1"}],
            "workOrders": [{"id": "w1"}, {"id": "w2"}],
            "total": 3
        });
        let records = extract_candidates(&body, "src");
        assert_eq!(ids(&records), vec!["w1", "w2", "t1"]);
    }

    #[test]
    fn test_nested_one_level() {
        let body = json!({"data": {"items": [{"id": "n1"}]}});
        assert_eq!(ids(&extract_candidates(&body, "src")), vec!["n1"]);

        let pages = json!([{"page": 1, "jobs": [{"id": "j1"}]}, {"page": 2, "jobs": [{"id": "j2"}]}]);
        assert_eq!(ids(&extract_candidates(&pages, "src")), vec!["j1", "j2"]);
    }

    #[test]
    fn test_not_deeper_than_one_level() {
        let body = json!({"data": {"data": {"items": [{"id": "deep"}]}}});
        assert!(extract_candidates(&body, "src").is_empty());
    }

    #[test]
    fn test_record_with_items_field_is_not_a_container() {
        let body = json!([{"id": "wo-1", "items": ["bolt", "nut"]}]);
        assert_eq!(ids(&extract_candidates(&body, "src")), vec!["wo-1"]);
    }

    #[test]
    fn test_single_record_with_collection_named_field() {
        let body = json!({"id": "wo-1", "title": "Restock", "items": ["bolt", "nut"]});
        let records = extract_candidates(&body, "src");
        assert_eq!(ids(&records), vec!["wo-1"]);
        assert_eq!(records[0].payload["items"], json!(["bolt", "nut"]));
    }

    #[test]
    fn test_single_object_record() {
        let body = json!({"id": "solo", "title": "One-off"});
        assert_eq!(ids(&extract_candidates(&body, "src")), vec!["solo"]);
    }

    #[test]
    fn test_unrelated_bodies() {
        assert!(extract_candidates(&json!({"status": "ok"}), "src").is_empty());
        assert!(extract_candidates(&json!("hello"), "src").is_empty());
        assert!(extract_candidates(&json!({"tasks": []}), "src").is_empty());
    }
}
