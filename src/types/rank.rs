//! Rank constants and the `(rank, id)` ordering key.
//!
//! ## Overview
//!
//! Every item's position is a double-precision rank. Without an override the
//! rank equals the identifier, so the untouched collection is in identity
//! order. Ranks are compared with `f64::total_cmp`, so the ordering is total
//! even for values the engine never produces (NaN, signed zeros).
//!
//! ## Tie-Break
//!
//! Two items with numerically equal ranks are ordered by identifier, lower
//! first. [`OrderKey`] encodes exactly that.
//!
//! ## Example
//!
//! ```
//! use sparse_order::types::rank::{OrderKey, default_rank};
//!
//! let moved = OrderKey::new(29.9995, 130);
//! let target = OrderKey::new(default_rank(30), 30);
//! assert!(moved < target);
//!
//! // Equal ranks fall back to the identifier
//! assert!(OrderKey::new(3.0, 1) < OrderKey::new(3.0, 3));
//! ```

use std::cmp::Ordering;

use crate::types::ItemId;

/// Size of the identifier space: identifiers are `1..=MAX_ID`
pub const MAX_ID: ItemId = 1_000_000;

/// Minimum numerically meaningful gap between two neighboring ranks
pub const EPSILON: f64 = 1e-12;

/// Offset used when only one bound exists (δ)
///
/// Deliberately far above epsilon so later inserts at the same edge have room.
pub const EDGE_OFFSET: f64 = 1e-4;

/// Offset used to place an item right next to a default-ranked target (δ')
pub const ADJACENT_OFFSET: f64 = 1e-3;

/// Rank of an identifier that has no override
#[inline]
pub fn default_rank(id: ItemId) -> f64 {
    id as f64
}

/// Check whether an identifier lies in `[1, max_id]`
#[inline]
pub fn in_range(id: ItemId, max_id: ItemId) -> bool {
    (1..=max_id).contains(&id)
}

/// Substring match on the decimal form of an identifier
///
/// An empty query matches everything.
pub fn matches_query(id: ItemId, query: &str) -> bool {
    query.is_empty() || id.to_string().contains(query)
}

// ============================================================================
// OrderKey
// ============================================================================

/// Position of an item in the global order: rank first, identifier second.
#[derive(Debug, Clone, Copy)]
pub struct OrderKey {
    /// Resolved rank (override or default)
    pub rank: f64,

    /// Item identifier, the tie-break
    pub id: ItemId,
}

impl OrderKey {
    #[inline]
    pub fn new(rank: f64, id: ItemId) -> Self {
        Self { rank, id }
    }

    /// Key of an item sitting at its default rank
    #[inline]
    pub fn default_for(id: ItemId) -> Self {
        Self::new(default_rank(id), id)
    }

    /// Key that sorts before every item with `rank` (identifiers start at 1)
    #[inline]
    pub fn floor_of(rank: f64) -> Self {
        Self::new(rank, 0)
    }

    /// Key that sorts after every item with `rank`
    #[inline]
    pub fn ceiling_of(rank: f64) -> Self {
        Self::new(rank, ItemId::MAX)
    }

    /// True when the rank differs from the identifier's default rank
    #[inline]
    pub fn is_displaced(&self) -> bool {
        self.rank != default_rank(self.id)
    }
}

impl PartialEq for OrderKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OrderKey {}

impl PartialOrd for OrderKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OrderKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank
            .total_cmp(&other.rank)
            .then_with(|| self.id.cmp(&other.id))
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
