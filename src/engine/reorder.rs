//! Pairwise reorder: place one item immediately before or after another.
//!
//! ## Algorithm
//!
//! 1. Resolve the target's rank.
//! 2. Bound the free interval on the requested side of the target. A
//!    genuine override neighbor bounds it at its own rank; a default
//!    neighbor is usually a whole unit away, so the bound is pulled in to
//!    `adjacent_offset` from the target instead.
//! 3. If the interval is wide enough, take its midpoint and materialize the
//!    target's default rank so it stays put.
//! 4. Otherwise renormalize the window `[pred, pair, succ]` between the items
//!    just outside it, widening one neighbor per side until even spacing is
//!    separated or a side becomes unbounded.
//!
//! Every combination of present and missing neighbors is handled; the only
//! rejected inputs are out-of-range identifiers and self-moves, both checked
//! before anything is written.

use std::collections::VecDeque;

use tracing::debug;

use crate::config::EngineConfig;
use crate::engine::{Neighbor, NeighborLocator, RankAllocator, WindowRenormalizer};
use crate::error::OrderError;
use crate::store::RankStore;
use crate::types::rank::{default_rank, in_range};
use crate::types::{ItemId, Position};

/// Result of a committed reorder.
#[derive(Debug, Clone, PartialEq)]
pub struct ReorderOutcome {
    /// Rank now stored for the moved item
    pub rank: f64,

    /// Whether a window had to be re-spaced
    pub renormalized: bool,

    /// Number of items whose rank was written
    pub touched: usize,
}

/// The write path into a [`RankStore`] for single moves.
#[derive(Debug, Clone, Copy)]
pub struct ReorderTransaction {
    max_id: ItemId,
    adjacent_offset: f64,
    allocator: RankAllocator,
    renormalizer: WindowRenormalizer,
}

impl ReorderTransaction {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            max_id: config.max_id,
            adjacent_offset: config.adjacent_offset,
            allocator: RankAllocator::from_config(config),
            renormalizer: WindowRenormalizer::from_config(config),
        }
    }

    /// Reject out-of-range identifiers and self-moves
    pub fn validate(&self, moved: ItemId, target: ItemId) -> Result<(), OrderError> {
        for id in [moved, target] {
            if !in_range(id, self.max_id) {
                return Err(OrderError::OutOfRange {
                    id,
                    max: self.max_id,
                });
            }
        }
        if moved == target {
            return Err(OrderError::SelfMove { id: moved });
        }
        Ok(())
    }

    /// Move `moved` directly before or after `target`
    ///
    /// # Example
    ///
    /// ```
    /// use sparse_order::engine::ReorderTransaction;
    /// use sparse_order::store::RankStore;
    /// use sparse_order::types::Position;
    /// use sparse_order::EngineConfig;
    ///
    /// let tx = ReorderTransaction::new(&EngineConfig::default());
    /// let mut store = RankStore::new();
    ///
    /// let outcome = tx.apply(&mut store, 130, 30, Position::Before).unwrap();
    /// assert!(29.0 < outcome.rank && outcome.rank < 30.0);
    /// assert_eq!(store.get(30), 30.0);
    /// ```
    pub fn apply(
        &self,
        store: &mut RankStore,
        moved: ItemId,
        target: ItemId,
        position: Position,
    ) -> Result<ReorderOutcome, OrderError> {
        self.validate(moved, target)?;

        let target_key = store.key_of(target);
        let (pred, succ) = {
            let locator = NeighborLocator::new(store, self.max_id);
            (
                locator.predecessor_of(target_key, moved),
                locator.successor_of(target_key, moved),
            )
        };

        let (lower, upper) = match position {
            Position::Before => (self.lower_bound(pred, target_key.rank), target_key.rank),
            Position::After => (target_key.rank, self.upper_bound(succ, target_key.rank)),
        };

        if !self.allocator.needs_renormalization(lower, upper) {
            let rank = self.allocator.choose_between(Some(lower), Some(upper));
            store.set(moved, rank);

            let mut touched = 1;
            if !store.has(target) {
                store.set(target, default_rank(target));
                touched += 1;
            }

            return Ok(ReorderOutcome {
                rank,
                renormalized: false,
                touched,
            });
        }

        // The pair in its new relative order, flanked by the target's neighbors
        let pair = match position {
            Position::Before => [moved, target],
            Position::After => [target, moved],
        };
        let plan = self.plan_window(store, moved, pair, (pred, succ));
        self.renormalizer.apply(store, &plan);

        let rank = store.get(moved);
        debug!(
            moved,
            target,
            %position,
            window = plan.len(),
            "Renormalized window"
        );

        Ok(ReorderOutcome {
            rank,
            renormalized: true,
            touched: plan.len(),
        })
    }

    /// Lower end of the free interval before a target
    fn lower_bound(&self, pred: Option<Neighbor>, target_rank: f64) -> f64 {
        let adjacent = target_rank - self.adjacent_offset;
        match pred {
            Some(n) if n.is_override() => n.rank,
            Some(n) => n.rank.max(adjacent),
            None => adjacent,
        }
    }

    /// Upper end of the free interval after a target
    fn upper_bound(&self, succ: Option<Neighbor>, target_rank: f64) -> f64 {
        let adjacent = target_rank + self.adjacent_offset;
        match succ {
            Some(n) if n.is_override() => n.rank,
            Some(n) => n.rank.min(adjacent),
            None => adjacent,
        }
    }

    /// Grow a window around `pair` until its ranks can be evenly separated
    fn plan_window(
        &self,
        store: &RankStore,
        moved: ItemId,
        pair: [ItemId; 2],
        (pred, succ): (Option<Neighbor>, Option<Neighbor>),
    ) -> Vec<(ItemId, f64)> {
        let locator = NeighborLocator::new(store, self.max_id);

        let mut window: VecDeque<ItemId> = pair.into_iter().collect();
        let mut outer_lower = pred;
        let mut outer_upper = succ;

        // Start with the immediate neighbors inside the window
        if let Some(n) = outer_lower {
            window.push_front(n.id);
            outer_lower = locator.predecessor_of(n.key(), moved);
        }
        if let Some(n) = outer_upper {
            window.push_back(n.id);
            outer_upper = locator.successor_of(n.key(), moved);
        }

        loop {
            let ids: Vec<ItemId> = window.iter().copied().collect();
            let lower = outer_lower.map(|n| n.rank);
            let upper = outer_upper.map(|n| n.rank);
            let plan = self.renormalizer.plan(&ids, lower, upper);

            let unbounded = outer_lower.is_none() && outer_upper.is_none();
            if unbounded || self.renormalizer.is_separated(&plan, lower, upper) {
                return plan;
            }

            if let Some(n) = outer_lower {
                window.push_front(n.id);
                outer_lower = locator.predecessor_of(n.key(), moved);
            }
            if let Some(n) = outer_upper {
                window.push_back(n.id);
                outer_upper = locator.successor_of(n.key(), moved);
            }
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
