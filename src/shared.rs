//! Thread-safe handle over an [`IntIntMap`].

use parking_lot::RwLock;

use crate::error::Result;
use crate::region::Region;
use crate::IntIntMap;

/// An [`IntIntMap`] behind a reader-writer lock.
///
/// Lookups share the lock; each `put` holds it exclusively for the whole
/// probe-then-write sequence, so concurrent writers through the same handle
/// can neither lose updates nor report a stale previous value.
///
/// The lock lives in process memory. Writers in other processes attached to
/// the same segment are not excluded.
pub struct SharedIntIntMap<R> {
    inner: RwLock<IntIntMap<R>>,
}

impl<R: Region> SharedIntIntMap<R> {
    /// Wrap an attached map.
    pub fn new(map: IntIntMap<R>) -> Self {
        Self {
            inner: RwLock::new(map),
        }
    }

    /// Value stored for `key`, if any.
    pub fn get(&self, key: i64) -> Result<Option<i64>> {
        self.inner.read().get(key)
    }

    /// Whether `key` has been stored.
    pub fn contains_key(&self, key: i64) -> Result<bool> {
        self.inner.read().contains_key(key)
    }

    /// Store `value` under `key`, returning the previous value.
    pub fn put(&self, key: i64, value: i64) -> Result<Option<i64>> {
        self.inner.write().put(key, value)
    }

    /// Number of slots in the table.
    pub fn capacity(&self) -> usize {
        self.inner.read().capacity()
    }

    /// Release the lock and return the map.
    pub fn into_inner(self) -> IntIntMap<R> {
        self.inner.into_inner()
    }
}

impl<R: Region> From<IntIntMap<R>> for SharedIntIntMap<R> {
    fn from(map: IntIntMap<R>) -> Self {
        Self::new(map)
    }
}
