//! # shm-intmap
//!
//! A fixed-capacity `i64 -> i64` hash map whose entire state lives inside one
//! pre-allocated byte region, typically a shared memory segment or a mapped
//! file supplied by another component.
//!
//! The map never allocates and never resizes. The region is cut into
//! fixed-width slots, each holding one tagged record with its key and value in
//! 13-digit base-36 form (see [`codec`]). Keys are placed by open addressing
//! with linear probing that wraps at the end of the table and gives up after a
//! configurable number of slots (see [`Config`]).
//!
//! ## Example
//!
//! ```rust
//! use shm_intmap::{IntIntMap, RECORD_WIDTH};
//!
//! let region = vec![0u8; 64 * RECORD_WIDTH];
//! let mut map = IntIntMap::attach(region).unwrap();
//!
//! assert_eq!(map.put(7, -100).unwrap(), None);
//! assert_eq!(map.put(7, 42).unwrap(), Some(-100));
//! assert_eq!(map.get(7).unwrap(), Some(42));
//! assert_eq!(map.get(8).unwrap(), None);
//! ```
//!
//! ## Concurrency
//!
//! [`IntIntMap`] does no locking: lookups take `&self` and insertions
//! `&mut self`. Use [`SharedIntIntMap`] to share one handle between threads.
//! Handles in different processes mapping the same segment must serialise
//! `put` calls with a lock of their own.

#![deny(unsafe_op_in_unsafe_fn)]
#![warn(missing_docs)]

pub mod codec;
mod config;
mod error;
pub mod index;
pub mod region;
mod shared;

pub use codec::{FIELD_WIDTH, RECORD_WIDTH};
pub use config::{Config, DEFAULT_ATTEMPT_LIMIT};
pub use error::{DecodeError, Error, Result};
pub use region::Region;
pub use shared::SharedIntIntMap;

use tracing::{debug, trace, warn};

// =============================================================================
// Probing
// =============================================================================

/// Where a probe for a key stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Probe {
    /// The key is stored in `slot`.
    Found { slot: usize, value: i64 },
    /// The key is absent and `slot` is the first free slot on its sequence.
    Vacant { slot: usize },
    /// Every allowed slot holds some other key.
    Exhausted,
}

// =============================================================================
// Map
// =============================================================================

/// Fixed-capacity integer map stored in a [`Region`].
///
/// The region is assumed to start zero-filled; a slot whose tag byte is zero
/// is empty. Any number of handles can be attached to the same bytes over
/// time and will see each other's entries, provided they agree on the region
/// size and the [`Config`].
pub struct IntIntMap<R> {
    region: R,
    size: usize,
    slot_count: usize,
    attempt_limit: usize,
}

impl<R: Region> IntIntMap<R> {
    /// Attach to the whole of `region` with the default configuration.
    pub fn attach(region: R) -> Result<Self> {
        let size = region.size();
        Self::with_config(region, size, Config::default())
    }

    /// Attach to the first `size_bytes` of `region` with the default
    /// configuration.
    pub fn new(region: R, size_bytes: usize) -> Result<Self> {
        Self::with_config(region, size_bytes, Config::default())
    }

    /// Attach to the first `size_bytes` of `region`.
    ///
    /// One slot's worth of bytes is held back as headroom, so the region must
    /// be at least two records long.
    pub fn with_config(region: R, size_bytes: usize, config: Config) -> Result<Self> {
        if size_bytes > region.size() {
            return Err(Error::invalid_configuration(format!(
                "size {size_bytes} exceeds region of {} bytes",
                region.size()
            )));
        }
        if config.attempt_limit == 0 {
            return Err(Error::invalid_configuration("attempt limit must be non-zero"));
        }

        let slot_count = (size_bytes / RECORD_WIDTH).saturating_sub(1);
        if slot_count == 0 {
            return Err(Error::invalid_configuration(format!(
                "{size_bytes} bytes cannot hold one {RECORD_WIDTH}-byte record plus headroom"
            )));
        }
        let attempt_limit = config.attempt_limit.min(slot_count);

        debug!(size_bytes, slot_count, attempt_limit, "attached int map");

        Ok(Self {
            region,
            size: size_bytes,
            slot_count,
            attempt_limit,
        })
    }

    /// Value stored for `key`, if any.
    pub fn get(&self, key: i64) -> Result<Option<i64>> {
        match self.probe(key)? {
            Probe::Found { value, .. } => Ok(Some(value)),
            Probe::Vacant { .. } | Probe::Exhausted => Ok(None),
        }
    }

    /// Whether `key` has been stored.
    pub fn contains_key(&self, key: i64) -> Result<bool> {
        Ok(self.get(key)?.is_some())
    }

    /// Store `value` under `key`, returning the previous value.
    ///
    /// The record goes into the slot the probe stopped on: the key's existing
    /// slot, or else the first free slot after its home. When neither exists
    /// within the attempt limit, [`Error::ProbeExhausted`] is returned and the
    /// region is left untouched.
    pub fn put(&mut self, key: i64, value: i64) -> Result<Option<i64>> {
        let (slot, previous) = match self.probe(key)? {
            Probe::Found { slot, value } => (slot, Some(value)),
            Probe::Vacant { slot } => (slot, None),
            Probe::Exhausted => {
                warn!(key, attempts = self.attempt_limit, "probe exhausted on insert");
                return Err(Error::ProbeExhausted {
                    key,
                    attempts: self.attempt_limit,
                });
            }
        };

        self.write_slot(slot, key, value)?;
        trace!(key, slot, replaced = previous.is_some(), "stored record");
        Ok(previous)
    }

    /// Number of slots in the table.
    pub fn capacity(&self) -> usize {
        self.slot_count
    }

    /// Slots visited per probe, after clamping to [`capacity`](Self::capacity).
    pub fn attempt_limit(&self) -> usize {
        self.attempt_limit
    }

    /// Bytes of the region managed by this map.
    pub fn region_size(&self) -> usize {
        self.size
    }

    /// Slot a probe for `key` starts at.
    pub fn home_slot(&self, key: i64) -> usize {
        index::home_slot(key, self.slot_count)
    }

    /// The underlying region.
    pub fn region(&self) -> &R {
        &self.region
    }

    /// Detach and hand the region back.
    pub fn into_inner(self) -> R {
        self.region
    }

    fn probe(&self, key: i64) -> Result<Probe> {
        let mut slot = self.home_slot(key);
        for _ in 0..self.attempt_limit {
            match self.read_slot(slot)? {
                None => return Ok(Probe::Vacant { slot }),
                Some((stored, value)) if stored == key => {
                    return Ok(Probe::Found { slot, value })
                }
                Some(_) => slot = index::next_slot(slot, self.slot_count),
            }
        }
        Ok(Probe::Exhausted)
    }

    fn read_slot(&self, slot: usize) -> Result<Option<(i64, i64)>> {
        debug_assert!(slot < self.slot_count);
        let mut record = [0u8; RECORD_WIDTH];
        self.region.read(slot * RECORD_WIDTH, &mut record)?;
        codec::decode_record(&record).map_err(|source| {
            warn!(slot, %source, "malformed record");
            Error::MalformedRecord { slot, source }
        })
    }

    fn write_slot(&mut self, slot: usize, key: i64, value: i64) -> Result<()> {
        debug_assert!(slot < self.slot_count);
        let record = codec::encode_record(key, value);
        self.region.write(slot * RECORD_WIDTH, &record)
    }
}

impl<R> std::fmt::Debug for IntIntMap<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntIntMap")
            .field("size", &self.size)
            .field("slot_count", &self.slot_count)
            .field("attempt_limit", &self.attempt_limit)
            .finish()
    }
}


#[cfg(test)]
mod proptests;
