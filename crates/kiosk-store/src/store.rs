//! Per-type working store over the shared cache.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::cache::SharedCache;
use crate::error::{StoreError, StoreResult};

/// A record that can live in a [`Store`] partition.
///
/// Implementations must keep [`Entity::id`] stable for the lifetime of the
/// record; the store matches, replaces, and deletes by that id.
pub trait Entity: Serialize + DeserializeOwned + Clone {
    /// Partition key. One partition per entity kind.
    const KIND: &'static str;

    /// Stable unique identifier of this record.
    fn id(&self) -> &str;
}

/// A working copy of one entity-kind partition.
///
/// Opening a store deserializes the committed snapshot into a private list;
/// every mutation touches only that list until [`Store::commit`] publishes
/// it back to the cache in one step. There is no rollback: callers are
/// expected to validate before committing.
pub struct Store<T: Entity> {
    cache: SharedCache,
    items: Vec<T>,
}

impl<T: Entity> Store<T> {
    /// Open a store over the committed snapshot of the `T` partition.
    ///
    /// A partition that has never been committed opens empty.
    pub fn open(cache: &SharedCache) -> StoreResult<Self> {
        let items = match cache.load(T::KIND) {
            Some(bytes) => serde_json::from_slice(&bytes)?,
            None => Vec::new(),
        };
        Ok(Self {
            cache: cache.clone(),
            items,
        })
    }

    /// Append a record to the working list.
    pub fn insert(&mut self, item: T) {
        self.items.push(item);
    }

    /// Replace the stored record carrying the same id.
    ///
    /// This is genuine slot replacement: the incoming record's fields
    /// overwrite the stored ones and survive a subsequent [`Store::find`].
    pub fn update(&mut self, item: T) -> StoreResult<()> {
        match self.items.iter().position(|i| i.id() == item.id()) {
            Some(pos) => {
                self.items[pos] = item;
                Ok(())
            }
            None => Err(StoreError::not_found(T::KIND, item.id())),
        }
    }

    /// Find a record by id.
    pub fn find(&self, id: &str) -> StoreResult<&T> {
        self.items
            .iter()
            .find(|i| i.id() == id)
            .ok_or_else(|| StoreError::not_found(T::KIND, id))
    }

    /// Remove a record by id.
    pub fn delete(&mut self, id: &str) -> StoreResult<()> {
        match self.items.iter().position(|i| i.id() == id) {
            Some(pos) => {
                self.items.remove(pos);
                Ok(())
            }
            None => Err(StoreError::not_found(T::KIND, id)),
        }
    }

    /// Read-only view of the working list, in insertion order.
    pub fn collection(&self) -> &[T] {
        &self.items
    }

    /// Publish the working list as the partition's committed snapshot.
    ///
    /// The snapshot replaces the previous one atomically; it becomes
    /// visible to stores opened afterwards and to existing holders that
    /// call [`Store::refresh`].
    pub fn commit(&self) -> StoreResult<()> {
        let bytes = serde_json::to_vec(&self.items)?;
        self.cache.publish(T::KIND, bytes);
        Ok(())
    }

    /// Reload the working list from the committed snapshot, discarding any
    /// uncommitted changes.
    pub fn refresh(&mut self) -> StoreResult<()> {
        self.items = match self.cache.load(T::KIND) {
            Some(bytes) => serde_json::from_slice(&bytes)?,
            None => Vec::new(),
        };
        Ok(())
    }

    /// Number of records in the working list.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the working list is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T: Entity> fmt::Debug for Store<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("kind", &T::KIND)
            .field("items", &self.items.len())
            .finish()
    }
}
