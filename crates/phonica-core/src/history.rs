use std::sync::Arc;

use crate::storage::KeyValueStore;

/// Most-recent-first lookup history, unique under case-insensitive comparison
pub struct HistoryStore {
    entries: Vec<String>,
    store: Arc<dyn KeyValueStore>,
    key: String,
    capacity: usize,
}

impl HistoryStore {
    /// Load the persisted list. Missing or malformed data starts empty.
    pub fn load(store: Arc<dyn KeyValueStore>, key: impl Into<String>, capacity: usize) -> Self {
        let key = key.into();

        let stored = match store.get(&key) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<String>>(&raw) {
                Ok(entries) => entries,
                Err(e) => {
                    tracing::warn!("Discarding malformed history in '{}': {}", key, e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!("Failed to read history '{}': {}", key, e);
                Vec::new()
            }
        };

        let mut history = Self {
            entries: Vec::with_capacity(capacity),
            store,
            key,
            capacity,
        };

        // Older writers may have left duplicates or overflow behind
        for word in stored {
            if history.entries.len() == capacity {
                break;
            }
            if !history.contains(&word) {
                history.entries.push(word);
            }
        }

        tracing::debug!("Loaded {} history entries", history.entries.len());
        history.persist();
        history
    }

    /// Move `word` to the front, dropping any case-insensitive duplicate
    pub fn record(&mut self, word: &str) {
        let lowered = word.to_lowercase();
        self.entries.retain(|e| e.to_lowercase() != lowered);
        self.entries.insert(0, word.to_string());
        self.entries.truncate(self.capacity);
        self.persist();
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn contains(&self, word: &str) -> bool {
        let lowered = word.to_lowercase();
        self.entries.iter().any(|e| e.to_lowercase() == lowered)
    }

    fn persist(&self) {
        let serialized = match serde_json::to_string(&self.entries) {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!("Failed to serialize history: {}", e);
                return;
            }
        };

        if let Err(e) = self.store.set(&self.key, &serialized) {
            tracing::warn!("Failed to persist history '{}': {}", self.key, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use crate::testing::FailingStore;

    const KEY: &str = "pf-history";

    fn stored(store: &MemoryStore) -> Vec<String> {
        serde_json::from_str(&store.get(KEY).unwrap().unwrap()).unwrap()
    }

    #[test]
    fn test_record_moves_word_to_front_once() {
        let store = Arc::new(MemoryStore::new());
        let mut history = HistoryStore::load(store.clone(), KEY, 20);

        history.record("hello");
        history.record("world");
        history.record("HELLO");

        assert_eq!(history.entries(), &["HELLO", "world"]);
        assert_eq!(stored(&store), vec!["HELLO", "world"]);
    }

    #[test]
    fn test_record_same_word_twice() {
        let mut history = HistoryStore::load(Arc::new(MemoryStore::new()), KEY, 20);

        history.record("Colonel");
        history.record("colonel");

        assert_eq!(history.entries(), &["colonel"]);
    }

    #[test]
    fn test_capacity_is_enforced() {
        let mut history = HistoryStore::load(Arc::new(MemoryStore::new()), KEY, 20);

        for i in 0..30 {
            history.record(&format!("word{i}"));
        }

        assert_eq!(history.len(), 20);
        assert_eq!(history.get(0), Some("word29"));
        assert_eq!(history.get(19), Some("word10"));
    }

    #[test]
    fn test_malformed_storage_starts_empty() {
        for raw in ["\"not an array\"", "{", "[1, 2, 3]", "null"] {
            let store = Arc::new(MemoryStore::with_slot(KEY, raw));
            let history = HistoryStore::load(store, KEY, 20);
            assert!(history.is_empty(), "expected empty history for {raw}");
        }
    }

    #[test]
    fn test_load_restores_invariants() {
        let raw = serde_json::to_string(&["a", "B", "b", "c", "A", "d"]).unwrap();
        let store = Arc::new(MemoryStore::with_slot(KEY, &raw));

        let history = HistoryStore::load(store.clone(), KEY, 3);

        assert_eq!(history.entries(), &["a", "B", "c"]);
        assert_eq!(stored(&store), vec!["a", "B", "c"]);
    }

    #[test]
    fn test_storage_failures_are_swallowed() {
        let mut history = HistoryStore::load(Arc::new(FailingStore), KEY, 20);
        assert!(history.is_empty());

        history.record("hello");
        assert_eq!(history.entries(), &["hello"]);
    }
}
