//! Nearest-neighbor lookup in the global order.
//!
//! ## Two Sources
//!
//! An item's neighbor is either a genuine override (found through the sorted
//! index of the [`RankStore`]) or an untouched identifier sitting at its
//! default rank. The locator asks both and keeps whichever is closer:
//!
//! ```text
//! overrides:   ... 29.9995(#130) ...........  30.0001(#100)
//! defaults:    ... 28   29          30  31 ...
//!                            ^ target
//! ```
//!
//! Walking the identity sequence skips identifiers with a genuine override
//! (they live elsewhere) and the excluded identifier, so the walk is bounded
//! by the number of overrides, never by the size of the identifier space.

use crate::store::RankStore;
use crate::types::rank::{default_rank, OrderKey};
use crate::types::ItemId;

/// An item adjacent to a lookup position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub id: ItemId,
    pub rank: f64,
}

impl Neighbor {
    #[inline]
    pub fn key(&self) -> OrderKey {
        OrderKey::new(self.rank, self.id)
    }

    /// True when the neighbor's rank is an explicit reposition
    #[inline]
    pub fn is_override(&self) -> bool {
        self.rank != default_rank(self.id)
    }
}

impl From<OrderKey> for Neighbor {
    fn from(key: OrderKey) -> Self {
        Self {
            id: key.id,
            rank: key.rank,
        }
    }
}

/// Finds the items immediately before or after a position.
///
/// ## Example
///
/// ```
/// use sparse_order::engine::NeighborLocator;
/// use sparse_order::store::RankStore;
///
/// let mut store = RankStore::new();
/// store.set(130, 29.9995);
///
/// let locator = NeighborLocator::new(&store, 1_000_000);
///
/// // Override #130 is closer to 30 than the default #29
/// let pred = locator.predecessor(30.0, 0).unwrap();
/// assert_eq!(pred.id, 130);
///
/// // Excluding it falls back to the identity sequence
/// let pred = locator.predecessor(30.0, 130).unwrap();
/// assert_eq!((pred.id, pred.rank), (29, 29.0));
///
/// assert!(locator.predecessor(1.0, 0).is_none());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct NeighborLocator<'a> {
    store: &'a RankStore,
    max_id: ItemId,
}

impl<'a> NeighborLocator<'a> {
    pub fn new(store: &'a RankStore, max_id: ItemId) -> Self {
        Self { store, max_id }
    }

    /// Closest item with rank strictly below `target_rank`
    pub fn predecessor(&self, target_rank: f64, exclude: ItemId) -> Option<Neighbor> {
        self.predecessor_of(OrderKey::floor_of(target_rank), exclude)
    }

    /// Closest item with rank strictly above `target_rank`
    pub fn successor(&self, target_rank: f64, exclude: ItemId) -> Option<Neighbor> {
        self.successor_of(OrderKey::ceiling_of(target_rank), exclude)
    }

    /// Closest item ordered before `key`, honoring the identifier tie-break
    pub fn predecessor_of(&self, key: OrderKey, exclude: ItemId) -> Option<Neighbor> {
        let genuine = self
            .store
            .genuine_before(key)
            .find(|k| k.id != exclude)
            .copied();
        let default = self.default_before(key, exclude);

        let closest = match (genuine, default) {
            (Some(g), Some(d)) => Some(g.max(d)),
            (g, d) => g.or(d),
        };
        closest.map(Neighbor::from)
    }

    /// Closest item ordered after `key`, honoring the identifier tie-break
    pub fn successor_of(&self, key: OrderKey, exclude: ItemId) -> Option<Neighbor> {
        let genuine = self
            .store
            .genuine_after(key)
            .find(|k| k.id != exclude)
            .copied();
        let default = self.default_after(key, exclude);

        let closest = match (genuine, default) {
            (Some(g), Some(d)) => Some(g.min(d)),
            (g, d) => g.or(d),
        };
        closest.map(Neighbor::from)
    }

    /// Last item of the whole order
    pub fn last(&self, exclude: ItemId) -> Option<Neighbor> {
        self.predecessor_of(OrderKey::new(f64::INFINITY, ItemId::MAX), exclude)
    }

    // ========================================================================
    // Identity sequence
    // ========================================================================

    fn default_before(&self, key: OrderKey, exclude: ItemId) -> Option<OrderKey> {
        let mut id = self.last_default_id_before(key)?;
        loop {
            if self.sits_at_default(id, exclude) {
                return Some(OrderKey::default_for(id));
            }
            if id == 1 {
                return None;
            }
            id -= 1;
        }
    }

    fn default_after(&self, key: OrderKey, exclude: ItemId) -> Option<OrderKey> {
        let mut id = self.first_default_id_after(key)?;
        loop {
            if self.sits_at_default(id, exclude) {
                return Some(OrderKey::default_for(id));
            }
            if id >= self.max_id {
                return None;
            }
            id += 1;
        }
    }

    #[inline]
    fn sits_at_default(&self, id: ItemId, exclude: ItemId) -> bool {
        id != exclude && !self.store.is_genuine(id)
    }

    /// Greatest identifier whose default key sorts before `key`
    fn last_default_id_before(&self, key: OrderKey) -> Option<ItemId> {
        // Also rejects NaN
        if !(key.rank >= 1.0) {
            return None;
        }
        if key.rank > default_rank(self.max_id) {
            return Some(self.max_id);
        }

        let floor = key.rank.floor();
        let id = floor as ItemId;
        if floor < key.rank || id < key.id {
            Some(id)
        } else if id > 1 {
            Some(id - 1)
        } else {
            None
        }
    }

    /// Smallest identifier whose default key sorts after `key`
    fn first_default_id_after(&self, key: OrderKey) -> Option<ItemId> {
        if !(key.rank <= default_rank(self.max_id)) {
            return None;
        }
        if key.rank < 1.0 {
            return Some(1);
        }

        let ceil = key.rank.ceil();
        let id = ceil as ItemId;
        if ceil > key.rank || id > key.id {
            Some(id)
        } else if id < self.max_id {
            Some(id + 1)
        } else {
            None
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
