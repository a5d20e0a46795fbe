//! Recently used category names, most recent first.

use serde::{Deserialize, Serialize};

/// Maximum number of remembered tags.
pub const MAX_TAGS: usize = 50;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagHistory {
    tags: Vec<String>,
}

impl TagHistory {
    /// History from a stored list, normalized to the same rules `record` keeps.
    pub fn from_vec(tags: Vec<String>) -> Self {
        let mut history = Self::default();
        for tag in tags.iter().rev() {
            history.record(tag);
        }
        history
    }

    /// Move `tag` to the front. Returns whether the history changed.
    pub fn record(&mut self, tag: &str) -> bool {
        let tag = tag.trim();
        if tag.is_empty() || self.tags.first().is_some_and(|t| t == tag) {
            return false;
        }
        self.tags.retain(|t| t != tag);
        self.tags.insert(0, tag.to_string());
        self.tags.truncate(MAX_TAGS);
        true
    }

    pub fn as_slice(&self) -> &[String] {
        &self.tags
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}
