//! Error types for the map and its record codec.

/// Reasons a byte span fails to decode as a record or a numeric field.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum DecodeError {
    /// The field is not exactly one field width long.
    #[error("expected {expected} bytes, got {actual}")]
    Length {
        /// Required length.
        expected: usize,
        /// Length that was supplied.
        actual: usize,
    },

    /// A byte outside the lowercase base-36 alphabet.
    #[error("byte {byte:#04x} at position {position} is not a base-36 digit")]
    Digit {
        /// Position of the offending byte within the field.
        position: usize,
        /// The offending byte.
        byte: u8,
    },

    /// The digits describe a number wider than 64 bits.
    #[error("field value does not fit in 64 bits")]
    Overflow,

    /// The occupancy tag is neither the empty nor the occupied marker.
    #[error("unknown occupancy tag {byte:#04x}")]
    Tag {
        /// The tag byte found in the slot.
        byte: u8,
    },
}

/// Errors produced by [`IntIntMap`](crate::IntIntMap) and [`Region`](crate::Region)
/// implementations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The region cannot host a table with the requested parameters.
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration {
        /// Human readable cause.
        reason: String,
    },

    /// A read or write touched bytes outside the region.
    #[error("{len} bytes at offset {offset} fall outside region of {size} bytes")]
    OutOfRange {
        /// Start of the requested span.
        offset: usize,
        /// Length of the requested span.
        len: usize,
        /// Size of the region.
        size: usize,
    },

    /// `put` visited every slot it is allowed to without finding the key or a
    /// free slot. Nothing was written.
    #[error("no free slot for key {key} within {attempts} probes")]
    ProbeExhausted {
        /// Key being inserted.
        key: i64,
        /// Number of slots visited.
        attempts: usize,
    },

    /// A slot holds bytes that are not a valid record.
    #[error("slot {slot} holds a malformed record: {source}")]
    MalformedRecord {
        /// Index of the corrupt slot.
        slot: usize,
        /// What was wrong with it.
        source: DecodeError,
    },
}

/// Result type for map operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn invalid_configuration(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            reason: reason.into(),
        }
    }
}
