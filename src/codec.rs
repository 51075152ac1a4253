//! Fixed-width record encoding.
//!
//! Every number is stored as exactly [`FIELD_WIDTH`] lowercase base-36
//! digits. Base 36 needs 13 symbols to cover all 64-bit patterns where
//! hexadecimal needs 16, so each record is ~20% smaller while offsets stay
//! plain multiplication.
//!
//! Signed values are encoded through their two's-complement bit pattern:
//! `-1` is stored as the digits of `u64::MAX`. Every `i64` round-trips.
//!
//! A slot is laid out as:
//!
//! ```text
//! +-----+---------------+---------------+
//! | tag | key (13 B)    | value (13 B)  |
//! +-----+---------------+---------------+
//! ```
//!
//! The tag is `0x00` for an empty slot, which is what a freshly zeroed
//! segment contains, and [`TAG_OCCUPIED`] once a record has been written.

use crate::error::DecodeError;

/// Base-36 digits needed for any 64-bit value (`36^13 > 2^64`).
pub const FIELD_WIDTH: usize = 13;

/// Bytes in one slot: tag + key field + value field.
pub const RECORD_WIDTH: usize = 1 + 2 * FIELD_WIDTH;

/// Tag of a slot that has never been written.
pub const TAG_EMPTY: u8 = 0x00;

/// Tag of a slot holding a record.
pub const TAG_OCCUPIED: u8 = b'#';

const KEY_START: usize = 1;
const VALUE_START: usize = KEY_START + FIELD_WIDTH;

const RADIX: u64 = 36;
const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Encode a value as [`FIELD_WIDTH`] base-36 digits, left-padded with `'0'`.
pub fn encode(value: i64) -> [u8; FIELD_WIDTH] {
    let mut out = [b'0'; FIELD_WIDTH];
    let mut rest = value as u64;
    let mut i = FIELD_WIDTH;
    while rest != 0 {
        i -= 1;
        out[i] = DIGITS[(rest % RADIX) as usize];
        rest /= RADIX;
    }
    out
}

#[inline]
fn digit_value(byte: u8) -> Option<u64> {
    match byte {
        b'0'..=b'9' => Some((byte - b'0') as u64),
        b'a'..=b'z' => Some((byte - b'a') as u64 + 10),
        _ => None,
    }
}

/// Decode a field produced by [`encode`].
///
/// Only canonical input is accepted: exactly [`FIELD_WIDTH`] bytes of
/// `0-9a-z` whose value fits in 64 bits.
pub fn decode(field: &[u8]) -> Result<i64, DecodeError> {
    if field.len() != FIELD_WIDTH {
        return Err(DecodeError::Length {
            expected: FIELD_WIDTH,
            actual: field.len(),
        });
    }

    let mut value = 0u64;
    for (position, &byte) in field.iter().enumerate() {
        let digit = digit_value(byte).ok_or(DecodeError::Digit { position, byte })?;
        value = value
            .checked_mul(RADIX)
            .and_then(|v| v.checked_add(digit))
            .ok_or(DecodeError::Overflow)?;
    }
    Ok(value as i64)
}

/// Build the bytes of an occupied slot.
pub fn encode_record(key: i64, value: i64) -> [u8; RECORD_WIDTH] {
    let mut out = [0u8; RECORD_WIDTH];
    out[0] = TAG_OCCUPIED;
    out[KEY_START..VALUE_START].copy_from_slice(&encode(key));
    out[VALUE_START..].copy_from_slice(&encode(value));
    out
}

/// Parse the bytes of a slot.
///
/// Returns `None` for an empty slot. The key and value fields of an empty
/// slot are not inspected.
pub fn decode_record(record: &[u8; RECORD_WIDTH]) -> Result<Option<(i64, i64)>, DecodeError> {
    match record[0] {
        TAG_EMPTY => Ok(None),
        TAG_OCCUPIED => {
            let key = decode(&record[KEY_START..VALUE_START])?;
            let value = decode(&record[VALUE_START..])?;
            Ok(Some((key, value)))
        }
        byte => Err(DecodeError::Tag { byte }),
    }
}
