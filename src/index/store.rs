use crate::error::{AppError, Result};
use crate::index::query::WorkOrderFilter;
use crate::index::stats::IndexStatistics;
use crate::index::tokenizer::tokenize;
use crate::models::{WorkOrder, WorkOrderPriority, WorkOrderStatus};
use indexmap::{IndexMap, IndexSet};
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use std::sync::Arc;
use strum::IntoEnumIterator;

/// In-memory work order index.
///
/// Owns the primary store plus the status, priority, assignee and tag
/// indexes and the inverted token index. Handles are cheap to clone and share
/// one state; `add`, `remove` and `clear` take the write lock, every other
/// operation the read lock, so readers never observe a half-applied add.
#[derive(Clone, Default)]
pub struct WorkOrderIndex {
    state: Arc<RwLock<IndexState>>,
}

struct IndexState {
    work_orders: IndexMap<String, WorkOrder>,
    by_status: HashMap<WorkOrderStatus, IndexSet<String>>,
    by_priority: HashMap<WorkOrderPriority, IndexSet<String>>,
    by_assignee: HashMap<String, IndexSet<String>>,
    by_tag: HashMap<String, IndexSet<String>>,
    tokens: HashMap<String, HashSet<String>>,
}

impl Default for IndexState {
    fn default() -> Self {
        Self {
            work_orders: IndexMap::new(),
            by_status: WorkOrderStatus::iter().map(|s| (s, IndexSet::new())).collect(),
            by_priority: WorkOrderPriority::iter()
                .map(|p| (p, IndexSet::new()))
                .collect(),
            by_assignee: HashMap::new(),
            by_tag: HashMap::new(),
            tokens: HashMap::new(),
        }
    }
}

impl IndexState {
    fn link(&mut self, work_order: &WorkOrder) {
        let id = &work_order.id;

        self.by_status
            .entry(work_order.status)
            .or_default()
            .insert(id.clone());
        self.by_priority
            .entry(work_order.priority)
            .or_default()
            .insert(id.clone());

        if let Some(assignee) = indexed_assignee(work_order) {
            self.by_assignee
                .entry(assignee.to_string())
                .or_default()
                .insert(id.clone());
        }

        for tag in indexed_tags(work_order) {
            self.by_tag
                .entry(tag.to_string())
                .or_default()
                .insert(id.clone());
        }

        for token in tokenize(&work_order.searchable_text()) {
            self.tokens.entry(token).or_default().insert(id.clone());
        }
    }

    fn unlink(&mut self, work_order: &WorkOrder) {
        let id = work_order.id.as_str();

        // Enum buckets stay allocated so statistics always list every value
        if let Some(bucket) = self.by_status.get_mut(&work_order.status) {
            bucket.shift_remove(id);
        }
        if let Some(bucket) = self.by_priority.get_mut(&work_order.priority) {
            bucket.shift_remove(id);
        }

        if let Some(assignee) = indexed_assignee(work_order) {
            remove_member(&mut self.by_assignee, assignee, id);
        }

        for tag in indexed_tags(work_order) {
            remove_member(&mut self.by_tag, tag, id);
        }

        for token in tokenize(&work_order.searchable_text()) {
            if let Some(ids) = self.tokens.get_mut(&token) {
                ids.remove(id);
                if ids.is_empty() {
                    self.tokens.remove(&token);
                }
            }
        }
    }

    fn collect<'a>(&self, ids: impl IntoIterator<Item = &'a String>) -> Vec<WorkOrder> {
        ids.into_iter()
            .filter_map(|id| self.work_orders.get(id).cloned())
            .collect()
    }

    fn bucket<K>(&self, index: &HashMap<K, IndexSet<String>>, key: &K) -> Vec<WorkOrder>
    where
        K: Eq + Hash,
    {
        index
            .get(key)
            .map(|ids| self.collect(ids))
            .unwrap_or_default()
    }

    fn statistics(&self) -> IndexStatistics {
        IndexStatistics {
            total_work_orders: self.work_orders.len(),
            status_distribution: WorkOrderStatus::iter()
                .map(|s| (s, self.by_status.get(&s).map_or(0, |ids| ids.len())))
                .collect(),
            priority_distribution: WorkOrderPriority::iter()
                .map(|p| (p, self.by_priority.get(&p).map_or(0, |ids| ids.len())))
                .collect(),
            assigned_count: self.by_assignee.len(),
            tags_count: self.by_tag.len(),
            search_index_size: self.tokens.len(),
        }
    }
}

fn indexed_assignee(work_order: &WorkOrder) -> Option<&str> {
    work_order
        .assigned_to
        .as_deref()
        .map(str::trim)
        .filter(|a| !a.is_empty())
}

fn indexed_tags(work_order: &WorkOrder) -> impl Iterator<Item = &str> {
    work_order
        .tags
        .iter()
        .map(String::as_str)
        .filter(|t| !t.trim().is_empty())
}

fn remove_member(index: &mut HashMap<String, IndexSet<String>>, key: &str, id: &str) {
    if let Some(bucket) = index.get_mut(key) {
        bucket.shift_remove(id);
        if bucket.is_empty() {
            index.remove(key);
        }
    }
}

impl WorkOrderIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a work order, replacing any record with the same id.
    ///
    /// Returns the replaced record, if there was one.
    pub fn add(&self, work_order: WorkOrder) -> Option<WorkOrder> {
        let mut state = self.state.write();

        let previous = state.work_orders.get(&work_order.id).cloned();
        if let Some(ref old) = previous {
            state.unlink(old);
        }

        state.link(&work_order);

        tracing::debug!(
            work_order_id = %work_order.id,
            status = %work_order.status,
            priority = %work_order.priority,
            replaced = previous.is_some(),
            "Work order indexed"
        );

        state
            .work_orders
            .insert(work_order.id.clone(), work_order);

        previous
    }

    /// Remove a single work order and all of its index memberships
    pub fn remove(&self, id: &str) -> Option<WorkOrder> {
        let mut state = self.state.write();

        let removed = state.work_orders.shift_remove(id)?;
        state.unlink(&removed);

        tracing::debug!(work_order_id = %id, "Work order removed from index");
        Some(removed)
    }

    /// Drop every record and index entry
    pub fn clear(&self) {
        let mut state = self.state.write();
        *state = IndexState::default();
        tracing::debug!("Work order index cleared");
    }

    /// Get a work order by id
    pub fn get(&self, id: &str) -> Option<WorkOrder> {
        self.state.read().work_orders.get(id).cloned()
    }

    /// Get a work order by id, mapping absence to `NotFound`
    pub fn require(&self, id: &str) -> Result<WorkOrder> {
        self.get(id)
            .ok_or_else(|| AppError::NotFound(format!("Work order {} not found", id)))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.state.read().work_orders.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.state.read().work_orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every record, in the order it was first indexed
    pub fn all(&self) -> Vec<WorkOrder> {
        self.state.read().work_orders.values().cloned().collect()
    }

    pub fn by_status(&self, status: WorkOrderStatus) -> Vec<WorkOrder> {
        let state = self.state.read();
        state.bucket(&state.by_status, &status)
    }

    pub fn by_priority(&self, priority: WorkOrderPriority) -> Vec<WorkOrder> {
        let state = self.state.read();
        state.bucket(&state.by_priority, &priority)
    }

    pub fn by_assignee(&self, assignee: &str) -> Vec<WorkOrder> {
        let state = self.state.read();
        state.bucket(&state.by_assignee, &assignee.to_string())
    }

    pub fn by_tag(&self, tag: &str) -> Vec<WorkOrder> {
        let state = self.state.read();
        state.bucket(&state.by_tag, &tag.to_string())
    }

    /// Work orders waiting to be picked up
    pub fn queued(&self) -> Vec<WorkOrder> {
        self.by_status(WorkOrderStatus::Queued)
    }

    /// Distinct tags currently indexed, sorted
    pub fn tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = self.state.read().by_tag.keys().cloned().collect();
        tags.sort();
        tags
    }

    /// Full-text search with AND semantics over title, description and tags.
    ///
    /// An empty query, or any query token missing from the index, yields no
    /// results. Callers must treat the result as unordered.
    pub fn search(&self, query: &str) -> Vec<WorkOrder> {
        let tokens = tokenize(query);
        if tokens.is_empty() {
            return Vec::new();
        }

        let state = self.state.read();
        let mut matched: Option<HashSet<&String>> = None;

        for token in &tokens {
            let Some(ids) = state.tokens.get(token) else {
                return Vec::new();
            };

            let narrowed: HashSet<&String> = match matched {
                None => ids.iter().collect(),
                Some(acc) => acc.into_iter().filter(|id| ids.contains(*id)).collect(),
            };

            if narrowed.is_empty() {
                return Vec::new();
            }
            matched = Some(narrowed);
        }

        matched
            .map(|ids| state.collect(ids))
            .unwrap_or_default()
    }

    /// List work orders matching a filter, newest first.
    ///
    /// The first set criterion (status, priority, assignee, tag) selects the
    /// bucket and the remaining ones narrow it.
    pub fn list(&self, filter: &WorkOrderFilter) -> Vec<WorkOrder> {
        let mut work_orders = if let Some(status) = filter.status {
            self.by_status(status)
        } else if let Some(priority) = filter.priority {
            self.by_priority(priority)
        } else if let Some(ref assignee) = filter.assignee {
            self.by_assignee(assignee)
        } else if let Some(ref tag) = filter.tag {
            self.by_tag(tag)
        } else {
            self.all()
        };

        work_orders.retain(|wo| filter.matches(wo));
        work_orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        if let Some(limit) = filter.limit {
            work_orders.truncate(limit);
        }

        work_orders
    }

    /// Counts derived from the current state
    pub fn statistics(&self) -> IndexStatistics {
        self.state.read().statistics()
    }

    /// Every record plus matching statistics, read under one lock
    pub fn snapshot(&self) -> (Vec<WorkOrder>, IndexStatistics) {
        let state = self.state.read();
        (state.work_orders.values().cloned().collect(), state.statistics())
    }
}
