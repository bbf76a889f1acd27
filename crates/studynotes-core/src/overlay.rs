//! Per-user state layered over the catalog: favorites and view history.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::model::Topic;

/// Default number of distinct topics remembered in the view history.
pub const DEFAULT_HISTORY_LIMIT: usize = 10;

/// The set of favorited topic ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Favorites(BTreeSet<u32>);

impl Favorites {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: u32) -> bool {
        self.0.contains(&id)
    }

    /// Flip the favorite flag of `id`. Returns whether it is now a favorite.
    pub fn toggle(&mut self, id: u32) -> bool {
        if self.0.remove(&id) {
            false
        } else {
            self.0.insert(id);
            true
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.iter().copied()
    }

    /// Keep only favorited topics, in the order given.
    pub fn filter<'a, I>(&self, topics: I) -> Vec<&'a Topic>
    where
        I: IntoIterator<Item = &'a Topic>,
    {
        topics.into_iter().filter(|t| self.contains(t.id)).collect()
    }

    /// Drop ids that no longer resolve to a topic.
    pub fn retain_existing(&mut self, catalog: &Catalog) {
        self.0.retain(|&id| catalog.topic(id).is_some());
    }
}

impl FromIterator<u32> for Favorites {
    fn from_iter<T: IntoIterator<Item = u32>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// One entry of the view history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewEntry {
    pub id: u32,
    pub timestamp: DateTime<Utc>,
}

/// Recently viewed topics, most recent first, without duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewHistory {
    entries: Vec<ViewEntry>,
    #[serde(default = "default_limit")]
    limit: usize,
}

fn default_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

impl Default for ViewHistory {
    fn default() -> Self {
        Self::with_limit(DEFAULT_HISTORY_LIMIT)
    }
}

impl ViewHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// A history that keeps at most `limit` entries (at least one).
    pub fn with_limit(limit: usize) -> Self {
        Self {
            entries: Vec::new(),
            limit: limit.max(1),
        }
    }

    /// Rebuild a history from stored entries, applying the limit.
    pub fn from_entries(entries: Vec<ViewEntry>, limit: usize) -> Self {
        let mut history = Self::with_limit(limit);
        // Stored newest first. Replay oldest first so the newest ends up in
        // front; the stable sort keeps stored order for equal timestamps.
        let mut sorted = entries;
        sorted.reverse();
        sorted.sort_by_key(|e| e.timestamp);
        for entry in sorted {
            history.record(entry.id, entry.timestamp);
        }
        history
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Change the limit, dropping the oldest entries if needed.
    pub fn set_limit(&mut self, limit: usize) {
        self.limit = limit.max(1);
        self.entries.truncate(self.limit);
    }

    /// Note that `id` was viewed at `at`.
    pub fn record(&mut self, id: u32, at: DateTime<Utc>) {
        self.entries.retain(|e| e.id != id);
        self.entries.insert(0, ViewEntry { id, timestamp: at });
        self.entries.truncate(self.limit);
    }

    pub fn entries(&self) -> &[ViewEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The topics behind the history, skipping ids that no longer exist.
    pub fn recent_topics<'a>(&self, catalog: &'a Catalog) -> Vec<(&'a Topic, DateTime<Utc>)> {
        self.entries
            .iter()
            .filter_map(|e| catalog.topic(e.id).map(|t| (t, e.timestamp)))
            .collect()
    }

    pub fn retain_existing(&mut self, catalog: &Catalog) {
        self.entries.retain(|e| catalog.topic(e.id).is_some());
    }
}
