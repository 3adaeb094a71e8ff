//! Rank override storage for one client.
//!
//! ## Architecture
//!
//! The store pairs two structures:
//!
//! - **HashMap**: identifier to override rank, O(1) `get`/`has`
//! - **BTreeSet**: genuine overrides keyed by `(rank, id)`, kept sorted for
//!   neighbor lookup and for the override stream of a page
//!
//! An override whose rank equals its own identifier is recorded in the map
//! but not in the sorted index: it sorts exactly where the default would, so
//! the identity sequence already represents it.
//!
//! ## Example
//!
//! ```
//! use sparse_order::store::RankStore;
//!
//! let mut store = RankStore::new();
//! assert_eq!(store.get(30), 30.0);
//!
//! store.set(130, 29.9995);
//! store.set(30, 30.0);
//!
//! assert_eq!(store.get(130), 29.9995);
//! assert!(store.has(30));
//! assert_eq!(store.len(), 2);
//! assert_eq!(store.genuine_count(), 1);
//! ```

use std::collections::btree_set;
use std::collections::{BTreeSet, HashMap};
use std::ops::Bound;

use crate::types::rank::{default_rank, OrderKey};
use crate::types::ItemId;

/// Sparse map from identifier to explicit rank.
#[derive(Debug, Clone, Default)]
pub struct RankStore {
    /// Every stored override, genuine or not
    overrides: HashMap<ItemId, f64>,

    /// Genuine overrides (rank != id) sorted by `(rank, id)`
    ordered: BTreeSet<OrderKey>,
}

impl RankStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Size
    // ========================================================================

    /// Number of stored overrides, including materialized defaults
    #[inline]
    pub fn len(&self) -> usize {
        self.overrides.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }

    /// Number of overrides that actually move their item
    #[inline]
    pub fn genuine_count(&self) -> usize {
        self.ordered.len()
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// Resolved rank: the override if present, else the identifier itself
    #[inline]
    pub fn get(&self, id: ItemId) -> f64 {
        self.overrides
            .get(&id)
            .copied()
            .unwrap_or_else(|| default_rank(id))
    }

    /// Resolved `(rank, id)` key
    #[inline]
    pub fn key_of(&self, id: ItemId) -> OrderKey {
        OrderKey::new(self.get(id), id)
    }

    /// Check whether an override is stored for `id`
    #[inline]
    pub fn has(&self, id: ItemId) -> bool {
        self.overrides.contains_key(&id)
    }

    /// Check whether `id` sits away from its default rank
    #[inline]
    pub fn is_genuine(&self, id: ItemId) -> bool {
        self.overrides
            .get(&id)
            .map_or(false, |&rank| rank != default_rank(id))
    }

    /// Genuine overrides in ascending `(rank, id)` order
    #[inline]
    pub fn iter_ordered(&self) -> btree_set::Iter<'_, OrderKey> {
        self.ordered.iter()
    }

    /// Genuine overrides before `key`, nearest first
    pub fn genuine_before(&self, key: OrderKey) -> impl Iterator<Item = &OrderKey> + '_ {
        self.ordered.range(..key).rev()
    }

    /// Genuine overrides after `key`, nearest first
    pub fn genuine_after(&self, key: OrderKey) -> impl Iterator<Item = &OrderKey> + '_ {
        self.ordered.range((Bound::Excluded(key), Bound::Unbounded))
    }

    // ========================================================================
    // Writes
    // ========================================================================

    /// Insert or overwrite the override for `id`
    pub fn set(&mut self, id: ItemId, rank: f64) {
        if let Some(previous) = self.overrides.insert(id, rank) {
            self.ordered.remove(&OrderKey::new(previous, id));
        }

        let key = OrderKey::new(rank, id);
        if key.is_displaced() {
            self.ordered.insert(key);
        }
    }

    /// Remove every override
    pub fn clear(&mut self) {
        self.overrides.clear();
        self.ordered.clear();
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_new() {
        let store = RankStore::new();

        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
        assert_eq!(store.genuine_count(), 0);
        assert!(store.iter_ordered().next().is_none());
    }

    #[test]
    fn test_unknown_ids_resolve_to_default() {
        let store = RankStore::new();

        assert_eq!(store.get(1), 1.0);
        assert_eq!(store.get(777_777), 777_777.0);
        assert!(!store.has(1));
        assert!(!store.is_genuine(1));
    }

    #[test]
    fn test_set_genuine_override() {
        let mut store = RankStore::new();
        store.set(130, 29.9995);

        assert_eq!(store.get(130), 29.9995);
        assert!(store.has(130));
        assert!(store.is_genuine(130));
        assert_eq!(store.genuine_count(), 1);
    }

    #[test]
    fn test_materialized_default_is_not_indexed() {
        let mut store = RankStore::new();
        store.set(30, 30.0);

        assert!(store.has(30));
        assert!(!store.is_genuine(30));
        assert_eq!(store.len(), 1);
        assert_eq!(store.genuine_count(), 0);
    }

    #[test]
    fn test_overwrite_reindexes() {
        let mut store = RankStore::new();
        store.set(5, 0.5);
        store.set(5, 12.5);

        let keys: Vec<_> = store.iter_ordered().copied().collect();
        assert_eq!(keys, vec![OrderKey::new(12.5, 5)]);

        // Moving back to its own rank drops it from the index
        store.set(5, 5.0);
        assert_eq!(store.genuine_count(), 0);
        assert_eq!(store.get(5), 5.0);
    }

    #[test]
    fn test_iter_ordered_with_tie_break() {
        let mut store = RankStore::new();
        store.set(9, 3.0);
        store.set(4, 3.0);
        store.set(1, 2.0);

        let ids: Vec<_> = store.iter_ordered().map(|k| k.id).collect();
        assert_eq!(ids, vec![1, 4, 9]);
    }

    #[test]
    fn test_genuine_neighbors() {
        let mut store = RankStore::new();
        store.set(100, 30.0001);
        store.set(101, 30.0002);
        store.set(7, 50.5);

        let target = store.key_of(101);
        let before: Vec<_> = store.genuine_before(target).map(|k| k.id).collect();
        let after: Vec<_> = store.genuine_after(target).map(|k| k.id).collect();

        assert_eq!(before, vec![100]);
        assert_eq!(after, vec![7]);
    }

    #[test]
    fn test_clear() {
        let mut store = RankStore::new();
        store.set(1, 0.5);
        store.set(2, 2.0);

        store.clear();

        assert!(store.is_empty());
        assert_eq!(store.genuine_count(), 0);
        assert_eq!(store.get(1), 1.0);
    }
}
