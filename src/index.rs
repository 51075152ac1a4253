//! Key to slot resolution.

/// 64-bit avalanche finaliser (Thomas Wang's `hash64shift`).
///
/// Operates on the key's two's-complement bit pattern with wrapping
/// arithmetic and logical right shifts.
#[inline]
pub fn mix64(key: i64) -> u64 {
    let mut h = key as u64;
    h = (!h).wrapping_add(h << 21);
    h ^= h >> 24;
    h = h.wrapping_add(h << 3).wrapping_add(h << 8);
    h ^= h >> 14;
    h = h.wrapping_add(h << 2).wrapping_add(h << 4);
    h ^= h >> 28;
    h.wrapping_add(h << 31)
}

/// Home slot of `key` in a table of `slot_count` slots.
///
/// Uses a true modulo so any slot count (not just `2^n - 1`) gets a uniform
/// spread. `slot_count` must be non-zero.
#[inline]
pub fn home_slot(key: i64, slot_count: usize) -> usize {
    debug_assert!(slot_count > 0);
    (mix64(key) % slot_count as u64) as usize
}

/// Next slot of a linear probe, wrapping to slot 0 after the last one.
#[inline]
pub fn next_slot(slot: usize, slot_count: usize) -> usize {
    let next = slot + 1;
    if next == slot_count {
        0
    } else {
        next
    }
}
