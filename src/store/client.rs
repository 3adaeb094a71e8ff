//! Per-client ordering state.
//!
//! A `ClientState` is owned by exactly one client session. It holds the rank
//! overrides describing the client's custom order and the set of identifiers
//! the client has selected. Nothing in it is shared with other clients.

use std::collections::HashSet;

use crate::error::OrderError;
use crate::store::RankStore;
use crate::types::{ItemId, StateDigest};

/// Overrides and selections for one client.
#[derive(Debug, Clone, Default)]
pub struct ClientState {
    /// Rank overrides
    ranks: RankStore,

    /// Selected identifiers
    selected: HashSet<ItemId>,
}

impl ClientState {
    /// Create a fresh state: identity order, nothing selected
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn ranks(&self) -> &RankStore {
        &self.ranks
    }

    #[inline]
    pub fn ranks_mut(&mut self) -> &mut RankStore {
        &mut self.ranks
    }

    // ========================================================================
    // Selection
    // ========================================================================

    #[inline]
    pub fn is_selected(&self, id: ItemId) -> bool {
        self.selected.contains(&id)
    }

    #[inline]
    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    /// Mark or unmark every identifier in `ids`
    pub fn set_selected<I>(&mut self, ids: I, selected: bool)
    where
        I: IntoIterator<Item = ItemId>,
    {
        if selected {
            self.selected.extend(ids);
        } else {
            for id in ids {
                self.selected.remove(&id);
            }
        }
    }

    /// Selected identifiers in ascending order
    pub fn selected_sorted(&self) -> Vec<ItemId> {
        let mut ids: Vec<_> = self.selected.iter().copied().collect();
        ids.sort_unstable();
        ids
    }

    // ========================================================================
    // Digest
    // ========================================================================

    /// Deterministic summary of overrides and selections
    pub fn digest(&self) -> Result<StateDigest, OrderError> {
        StateDigest::compute(self.ranks.iter_ordered(), self.selected_sorted())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
