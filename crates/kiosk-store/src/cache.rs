//! Shared publication point for committed partition snapshots.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, RwLock};

use crate::error::StoreError;
use crate::store::{Entity, Store};

/// Process-lifetime cache of committed entity collections, one snapshot per
/// entity kind.
///
/// The cache is an explicit value, not a global: construct one, clone the
/// handle wherever stores are opened, and drop it to discard all state.
/// Snapshots are serialized JSON, so readers always observe either the
/// previous snapshot or a fully committed one, never a torn mix.
#[derive(Clone, Default)]
pub struct SharedCache {
    /// Committed snapshot bytes per partition.
    slots: Arc<RwLock<HashMap<&'static str, Vec<u8>>>>,
    /// Cycle guards, handed out lazily per partition.
    guards: Arc<Mutex<HashMap<&'static str, Arc<Mutex<()>>>>>,
}

impl SharedCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run a read-modify-commit cycle against the `T` partition.
    ///
    /// The partition's cycle guard is held for the duration of the closure,
    /// so concurrent cycles on the same partition never interleave. The
    /// closure receives a [`Store`] freshly opened from the committed
    /// snapshot and decides itself whether to commit.
    ///
    /// ```rust,ignore
    /// cache.with_store(|store: &mut Store<Basket>| {
    ///     let mut basket = store.find(id)?.clone();
    ///     basket.add_product(product_id);
    ///     store.update(basket)?;
    ///     store.commit()
    /// })?;
    /// ```
    pub fn with_store<T, R, E, F>(&self, f: F) -> Result<R, E>
    where
        T: Entity,
        E: From<StoreError>,
        F: FnOnce(&mut Store<T>) -> Result<R, E>,
    {
        let guard = self.cycle_guard(T::KIND);
        let _cycle = guard.lock().expect("lock poisoned");
        let mut store = Store::open(self)?;
        f(&mut store)
    }

    /// Number of partitions that have been committed at least once.
    pub fn len(&self) -> usize {
        self.slots.read().expect("lock poisoned").len()
    }

    /// Returns `true` if nothing has been committed yet.
    pub fn is_empty(&self) -> bool {
        self.slots.read().expect("lock poisoned").is_empty()
    }

    /// Committed snapshot bytes for one partition, if any.
    pub(crate) fn load(&self, kind: &'static str) -> Option<Vec<u8>> {
        self.slots.read().expect("lock poisoned").get(kind).cloned()
    }

    /// Atomically replace one partition's committed snapshot.
    pub(crate) fn publish(&self, kind: &'static str, bytes: Vec<u8>) {
        self.slots.write().expect("lock poisoned").insert(kind, bytes);
    }

    fn cycle_guard(&self, kind: &'static str) -> Arc<Mutex<()>> {
        let mut guards = self.guards.lock().expect("lock poisoned");
        guards.entry(kind).or_default().clone()
    }
}

impl fmt::Debug for SharedCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedCache")
            .field("partitions", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use std::thread;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Widget {
        id: String,
        label: String,
    }

    impl Entity for Widget {
        const KIND: &'static str = "Widget";

        fn id(&self) -> &str {
            &self.id
        }
    }

    fn widget(id: &str) -> Widget {
        Widget {
            id: id.to_string(),
            label: format!("widget {id}"),
        }
    }

    #[test]
    fn test_empty_cache() {
        let cache = SharedCache::new();
        assert!(cache.is_empty());
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn test_clone_shares_state() {
        let cache = SharedCache::new();
        let handle = cache.clone();

        let mut store = Store::<Widget>::open(&cache).unwrap();
        store.insert(widget("w1"));
        store.commit().unwrap();

        let store = Store::<Widget>::open(&handle).unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_separate_caches_are_independent() {
        let a = SharedCache::new();
        let b = SharedCache::new();

        let mut store = Store::<Widget>::open(&a).unwrap();
        store.insert(widget("w1"));
        store.commit().unwrap();

        let store = Store::<Widget>::open(&b).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_with_store_commits_when_asked() {
        let cache = SharedCache::new();

        cache
            .with_store(|store: &mut Store<Widget>| {
                store.insert(widget("w1"));
                store.commit()
            })
            .unwrap();

        assert_eq!(cache.len(), 1);
        let store = Store::<Widget>::open(&cache).unwrap();
        assert_eq!(store.find("w1").unwrap().label, "widget w1");
    }

    #[test]
    fn test_concurrent_cycles_all_land() {
        let cache = SharedCache::new();
        let threads: Vec<_> = (0..8)
            .map(|n| {
                let cache = cache.clone();
                thread::spawn(move || {
                    cache.with_store(|store: &mut Store<Widget>| {
                        store.insert(widget(&format!("w{n}")));
                        store.commit()
                    })
                })
            })
            .collect();

        for handle in threads {
            handle.join().unwrap().unwrap();
        }

        let store = Store::<Widget>::open(&cache).unwrap();
        assert_eq!(store.len(), 8);
    }
}
