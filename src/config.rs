/// Default number of slots a probe may visit.
pub const DEFAULT_ATTEMPT_LIMIT: usize = 5;

/// Configuration for an [`IntIntMap`](crate::IntIntMap).
///
/// All handles attached to the same region must agree on the configuration;
/// nothing about it is stored in the region itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Maximum number of slots visited by one lookup or insertion, counting
    /// the home slot. Clamped to the table's slot count, so `usize::MAX`
    /// means "scan the whole table".
    pub attempt_limit: usize,
}

impl Config {
    /// Probe until every slot has been visited once.
    pub fn full_scan() -> Self {
        Self {
            attempt_limit: usize::MAX,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            attempt_limit: DEFAULT_ATTEMPT_LIMIT,
        }
    }
}
