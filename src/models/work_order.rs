use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Provenance tag stamped on records that do not name their own source
pub const DEFAULT_SOURCE: &str = "8090_factory";

/// Title used when a discovered record carries none
pub const DEFAULT_TITLE: &str = "Untitled Work Order";

/// Metadata key recording where a record was discovered
pub const SOURCE_URL_KEY: &str = "source_url";

/// Canonical work order record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkOrder {
    /// Stable unique identifier
    pub id: String,

    /// Human-readable title
    pub title: String,

    /// Detailed description
    #[serde(default)]
    pub description: String,

    /// Current status
    pub status: WorkOrderStatus,

    /// Priority level
    pub priority: WorkOrderPriority,

    /// Creation timestamp
    #[serde(with = "crate::models::timestamp")]
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    #[serde(with = "crate::models::timestamp")]
    pub updated_at: DateTime<Utc>,

    /// Assignee identity
    #[serde(default)]
    pub assigned_to: Option<String>,

    /// Due date
    #[serde(default, with = "crate::models::timestamp::option")]
    pub due_date: Option<DateTime<Utc>>,

    /// Tags, in display order
    #[serde(default)]
    pub tags: Vec<String>,

    /// Source-specific fields not mapped to the canonical schema
    #[serde(default)]
    pub metadata: Map<String, Value>,

    /// Provenance tag
    #[serde(default = "default_source")]
    pub source: String,
}

fn default_source() -> String {
    DEFAULT_SOURCE.to_string()
}

impl WorkOrder {
    /// Create a work order with default status, priority and timestamps
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        let now = Utc::now();

        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            status: WorkOrderStatus::default(),
            priority: WorkOrderPriority::default(),
            created_at: now,
            updated_at: now,
            assigned_to: None,
            due_date: None,
            tags: Vec::new(),
            metadata: Map::new(),
            source: default_source(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_status(mut self, status: WorkOrderStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_priority(mut self, priority: WorkOrderPriority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assigned_to = Some(assignee.into());
        self
    }

    pub fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_timestamps(mut self, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self.updated_at = updated_at;
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// Text fed to the inverted token index
    pub fn searchable_text(&self) -> String {
        format!("{} {} {}", self.title, self.description, self.tags.join(" "))
    }

    /// Where this record was discovered, if recorded
    pub fn source_url(&self) -> Option<&str> {
        self.metadata.get(SOURCE_URL_KEY).and_then(Value::as_str)
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    EnumString,
    Display,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum WorkOrderStatus {
    #[default]
    Queued,
    InProgress,
    Completed,
    Failed,
    Cancelled,
    PendingApproval,
    OnHold,
}

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    EnumString,
    Display,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum WorkOrderPriority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
    Critical,
}

impl WorkOrderPriority {
    /// Numeric rank (higher is more pressing)
    pub fn rank(&self) -> u8 {
        match self {
            WorkOrderPriority::Low => 0,
            WorkOrderPriority::Medium => 1,
            WorkOrderPriority::High => 2,
            WorkOrderPriority::Urgent => 3,
            WorkOrderPriority::Critical => 4,
        }
    }
}
