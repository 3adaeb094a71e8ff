//! Rank allocation between two optional bounds.
//!
//! | Bounds | Result |
//! |--------|--------|
//! | lower and upper | midpoint |
//! | upper only | `upper - edge_offset` |
//! | lower only | `lower + edge_offset` |
//! | none | `0`, before identifier 1 |
//!
//! The midpoint is only safe while the gap is wide enough to be split;
//! [`RankAllocator::needs_renormalization`] tells the caller when it is not.

use crate::config::EngineConfig;

/// Chooses new ranks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankAllocator {
    epsilon: f64,
    edge_offset: f64,
}

impl RankAllocator {
    pub fn new(epsilon: f64, edge_offset: f64) -> Self {
        Self {
            epsilon,
            edge_offset,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.epsilon, config.edge_offset)
    }

    /// Rank strictly between the given bounds
    ///
    /// # Example
    ///
    /// ```
    /// use sparse_order::engine::RankAllocator;
    ///
    /// let allocator = RankAllocator::new(1e-12, 0.25);
    /// assert_eq!(allocator.choose_between(Some(29.5), Some(30.0)), 29.75);
    /// assert_eq!(allocator.choose_between(None, Some(1.0)), 0.75);
    /// assert_eq!(allocator.choose_between(None, None), 0.0);
    /// ```
    pub fn choose_between(&self, lower: Option<f64>, upper: Option<f64>) -> f64 {
        match (lower, upper) {
            (Some(lower), Some(upper)) => lower + (upper - lower) / 2.0,
            (None, Some(upper)) => upper - self.edge_offset,
            (Some(lower), None) => lower + self.edge_offset,
            (None, None) => 0.0,
        }
    }

    /// True when the midpoint of `[lower, upper]` would not sit at least
    /// epsilon away from both bounds
    ///
    /// Catches both a collapsed gap and a gap the f64 grid can no longer
    /// split at the bounds' magnitude.
    pub fn needs_renormalization(&self, lower: f64, upper: f64) -> bool {
        let mid = self.choose_between(Some(lower), Some(upper));
        !(mid - lower >= self.epsilon && upper - mid >= self.epsilon)
    }
}

impl Default for RankAllocator {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
