//! Normalizing realistic discovery bodies end to end

use chrono::{TimeZone, Utc};
use serde_json::json;
use work_order_indexer::discovery::extract_candidates;
use work_order_indexer::{
    AppError, RawRecord, RecordNormalizer, WorkOrderPriority, WorkOrderStatus,
};

#[test]
fn test_untitled_task_scenario() {
    let normalizer = RecordNormalizer::default();
    let record = RawRecord::new(
        json!({"name": "Untitled task", "state": "active", "urgency": "urgent"}),
        "https://factory.local/api/v2/tasks",
    );

    let first = normalizer.normalize(&record).unwrap();
    let second = normalizer.normalize(&record).unwrap();

    assert_eq!(first.title, "Untitled task");
    assert_eq!(first.status, WorkOrderStatus::InProgress);
    assert_eq!(first.priority, WorkOrderPriority::Urgent);
    assert!(!first.id.is_empty());
    assert_eq!(first.id, second.id);
}

#[test]
fn test_same_payload_from_different_sources_shares_an_id() {
    let normalizer = RecordNormalizer::default();
    let payload = json!({"subject": "Lubricate press", "priority": "low"});

    let a = normalizer.normalize(&RawRecord::new(payload.clone(), "a")).unwrap();
    let b = normalizer.normalize(&RawRecord::new(payload, "b")).unwrap();

    assert_eq!(a.id, b.id);
    assert_ne!(a.source_url(), b.source_url());
}

#[test]
fn test_mixed_api_body() {
    let body = json!({
        "workOrders": [
            {
                "_id": "665f1c",
                "subject": "Swap hydraulic hose",
                "summary": "Leak at station 4",
                "status": "in-progress",
                "priority": "High",
                "created": 1714550400,
                "updated_at": "2024-05-01 10:30:00",
                "due": "2024-05-03T17:00:00+02:00",
                "assignee": {"email": "tech7@factory.local"},
                "categories": ["hydraulics", "station-4"],
                "cost_center": "CC-19"
            },
            {
                "work_order_id": 88,
                "title": "Audit spares",
                "state": "paused",
                "tags": "inventory,audit"
            },
            ["not", "an", "object"]
        ],
        "count": 3
    });

    let normalizer = RecordNormalizer::new("plant_east");
    let results: Vec<_> = extract_candidates(&body, "https://factory.local/api/work-orders")
        .iter()
        .map(|record| normalizer.normalize(record))
        .collect();

    assert_eq!(results.len(), 3);

    let hose = results[0].as_ref().unwrap();
    assert_eq!(hose.id, "665f1c");
    assert_eq!(hose.title, "Swap hydraulic hose");
    assert_eq!(hose.description, "Leak at station 4");
    assert_eq!(hose.status, WorkOrderStatus::InProgress);
    assert_eq!(hose.priority, WorkOrderPriority::High);
    assert_eq!(hose.created_at, Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap());
    assert_eq!(hose.updated_at, Utc.with_ymd_and_hms(2024, 5, 1, 10, 30, 0).unwrap());
    assert_eq!(hose.due_date, Some(Utc.with_ymd_and_hms(2024, 5, 3, 15, 0, 0).unwrap()));
    assert_eq!(hose.assigned_to.as_deref(), Some("tech7@factory.local"));
    assert_eq!(hose.tags, vec!["hydraulics", "station-4"]);
    assert_eq!(hose.metadata["cost_center"], json!("CC-19"));
    assert_eq!(hose.source, "plant_east");

    let audit = results[1].as_ref().unwrap();
    assert_eq!(audit.id, "88");
    assert_eq!(audit.status, WorkOrderStatus::OnHold);
    assert_eq!(audit.priority, WorkOrderPriority::Medium);
    assert_eq!(audit.tags, vec!["inventory", "audit"]);

    assert!(matches!(results[2], Err(AppError::NormalizationFailure(_))));
}
