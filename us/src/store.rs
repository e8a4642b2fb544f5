//! Core store implementation

use std::collections::HashMap;
use std::sync::RwLock;

use tracing::debug;

/// Per-user state store keyed by user id
///
/// `get` returns a snapshot of the current value (the default value for an
/// unknown user). `mutate` applies a closure to the stored value in place,
/// creating the default value first for an unknown user.
///
/// Implementations must be safe to share across tasks. No read-after-write
/// ordering is guaranteed across concurrent requests for the same user id,
/// so mutations must be additive.
pub trait UserStore<T>: Send + Sync {
    /// Snapshot the value for a user id
    fn get(&self, user_id: &str) -> T;

    /// Mutate the value for a user id in place
    fn mutate(&self, user_id: &str, apply: &mut dyn FnMut(&mut T));
}

/// In-memory store backed by a `RwLock<HashMap>`
///
/// State lives for the lifetime of the process. A future external-cache
/// backing only has to implement [`UserStore`]; callers never see the map.
pub struct MemoryStore<T> {
    entries: RwLock<HashMap<String, T>>,
}

impl<T> MemoryStore<T> {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Number of distinct user ids with stored state
    pub fn len(&self) -> usize {
        self.entries.read().expect("userstore lock poisoned").len()
    }

    /// Whether the store holds no state
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> UserStore<T> for MemoryStore<T>
where
    T: Clone + Default + Send + Sync,
{
    fn get(&self, user_id: &str) -> T {
        let entries = self.entries.read().expect("userstore lock poisoned");
        entries.get(user_id).cloned().unwrap_or_default()
    }

    fn mutate(&self, user_id: &str, apply: &mut dyn FnMut(&mut T)) {
        debug!(%user_id, "MemoryStore::mutate: called");
        let mut entries = self.entries.write().expect("userstore lock poisoned");
        let value = entries.entry(user_id.to_string()).or_default();
        apply(value);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use super::*;

    #[test]
    fn test_get_unknown_user_returns_default() {
        let store: MemoryStore<Vec<String>> = MemoryStore::new();
        assert!(store.get("nobody").is_empty());
        assert!(store.is_empty());
    }

    #[test]
    fn test_mutate_creates_and_updates() {
        let store: MemoryStore<Vec<String>> = MemoryStore::new();

        store.mutate("u-1", &mut |tags| tags.push("beaches".to_string()));
        store.mutate("u-1", &mut |tags| tags.push("hiking".to_string()));

        assert_eq!(store.get("u-1"), vec!["beaches".to_string(), "hiking".to_string()]);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_mutations_are_isolated_per_user() {
        let store: MemoryStore<Vec<String>> = MemoryStore::new();

        store.mutate("u-1", &mut |tags| tags.push("museums".to_string()));
        store.mutate("u-2", &mut |tags| tags.push("nightlife".to_string()));

        assert_eq!(store.get("u-1"), vec!["museums".to_string()]);
        assert_eq!(store.get("u-2"), vec!["nightlife".to_string()]);
    }

    #[test]
    fn test_concurrent_additive_mutations_all_land() {
        let store: Arc<MemoryStore<Vec<u32>>> = Arc::new(MemoryStore::new());

        let handles: Vec<_> = (0..8u32)
            .map(|n| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    store.mutate("u-1", &mut |values| values.push(n));
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let mut values = store.get("u-1");
        values.sort_unstable();
        assert_eq!(values, (0..8).collect::<Vec<_>>());
    }
}
