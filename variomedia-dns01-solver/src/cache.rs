//! Record location cache.

use std::collections::HashMap;

use tokio::sync::RwLock;

/// Coordinates of one challenge record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntryKey {
    /// Registrable domain, without trailing dot.
    pub domain: String,
    /// Host label relative to `domain`.
    pub host: String,
    /// Challenge key, distinguishing concurrent validations for the same
    /// name.
    pub challenge_key: String,
}

/// Process-lifetime map from challenge coordinates to the URL the API
/// assigned to the record.
///
/// Deletes address records by URL rather than by name and value, so
/// Present remembers where each record ended up. Best-effort only: the
/// map starts empty after a restart and CleanUp must tolerate a miss.
/// Entries live until explicitly removed; there is no eviction.
///
/// Safe to share across concurrent Present/CleanUp calls.
#[derive(Debug, Default)]
pub struct EntryCache {
    entries: RwLock<HashMap<EntryKey, String>>,
}

impl EntryCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the URL of a freshly presented record, replacing any
    /// earlier URL for the same coordinates.
    pub async fn insert(&self, key: EntryKey, record_url: String) {
        self.entries.write().await.insert(key, record_url);
    }

    /// Looks up the record URL for `key`, if this process presented it.
    pub async fn get(&self, key: &EntryKey) -> Option<String> {
        self.entries.read().await.get(key).cloned()
    }

    /// Drops the entry for `key`, returning the URL it held.
    pub async fn remove(&self, key: &EntryKey) -> Option<String> {
        self.entries.write().await.remove(key)
    }

    #[cfg(test)]
    pub(crate) async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}
