//! The ordering engine facade.
//!
//! ## Operations
//!
//! | Operation | Lock | Effect |
//! |-----------|------|--------|
//! | `list_page` | read | Filtered page of the global order |
//! | `toggle_selection` | write | Mark or unmark a batch of identifiers |
//! | `reorder_insert` | write | Move one item next to another |
//! | `move_to_position` | write | Move one item to an absolute index |
//! | `set_whole_order` | write | Replace all overrides with a listed order |
//! | `reset` | write | Fresh state: identity order, nothing selected |
//!
//! Input checks run before any lock is taken where they need no state, and
//! always before anything is written. A rejected call leaves the client's
//! state untouched.
//!
//! ## Example
//!
//! ```
//! use sparse_order::{OrderingEngine, Position};
//!
//! let engine = OrderingEngine::new();
//! engine.reorder_insert("alice", 2, 1, Position::Before).unwrap();
//!
//! let page = engine.list_page("alice", None, 0, 5).unwrap();
//! let ids: Vec<_> = page.iter().map(|item| item.id).collect();
//! assert_eq!(ids, vec![2, 1, 3, 4, 5]);
//!
//! // Other clients keep the identity order
//! let page = engine.list_page("bob", None, 0, 2).unwrap();
//! assert_eq!(page[0].id, 1);
//! ```

use std::collections::HashSet;

use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::engine::{MergedOrder, NeighborLocator, PagedMergeView, ReorderOutcome, ReorderTransaction};
use crate::error::{ConfigError, OrderError};
use crate::store::SessionRegistry;
use crate::types::rank::in_range;
use crate::types::{ItemId, PageItem, Position, StateDigest};

/// Per-client ordering over a shared session registry.
#[derive(Debug)]
pub struct OrderingEngine {
    config: EngineConfig,
    registry: SessionRegistry,
    reorder: ReorderTransaction,
    view: PagedMergeView,
}

impl OrderingEngine {
    /// Create an engine with the default configuration
    pub fn new() -> Self {
        Self::build(EngineConfig::default())
    }

    /// Create an engine with a validated configuration
    pub fn with_config(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: EngineConfig) -> Self {
        Self {
            reorder: ReorderTransaction::new(&config),
            view: PagedMergeView::new(&config),
            registry: SessionRegistry::new(),
            config,
        }
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[inline]
    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }

    /// Number of clients seen so far
    pub fn client_count(&self) -> usize {
        self.registry.len()
    }

    fn check_id(&self, id: ItemId) -> Result<(), OrderError> {
        if in_range(id, self.config.max_id) {
            Ok(())
        } else {
            Err(OrderError::OutOfRange {
                id,
                max: self.config.max_id,
            })
        }
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// Page of the client's order, filtered by substring
    pub fn list_page(
        &self,
        client_id: &str,
        query: Option<&str>,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<PageItem>, OrderError> {
        let session = self.registry.session(client_id);
        let state = session.read();
        self.view.list_page(&state, query, offset, limit)
    }

    /// Resolved rank of `id` for this client
    pub fn rank_of(&self, client_id: &str, id: ItemId) -> Result<f64, OrderError> {
        self.check_id(id)?;
        Ok(self.registry.session(client_id).read().ranks().get(id))
    }

    pub fn is_selected(&self, client_id: &str, id: ItemId) -> Result<bool, OrderError> {
        self.check_id(id)?;
        Ok(self.registry.session(client_id).read().is_selected(id))
    }

    /// Number of stored overrides, materialized defaults included
    pub fn override_count(&self, client_id: &str) -> usize {
        self.registry.session(client_id).read().ranks().len()
    }

    /// Deterministic digest of the client's overrides and selections
    pub fn state_digest(&self, client_id: &str) -> Result<StateDigest, OrderError> {
        self.registry.session(client_id).read().digest()
    }

    // ========================================================================
    // Writes
    // ========================================================================

    /// Select or deselect a batch of identifiers
    pub fn toggle_selection(
        &self,
        client_id: &str,
        ids: &[ItemId],
        selected: bool,
    ) -> Result<(), OrderError> {
        let max = self.config.max_toggle_batch;
        if ids.len() > max {
            return Err(OrderError::TooManyIds {
                count: ids.len(),
                max,
            });
        }
        for &id in ids {
            self.check_id(id)?;
        }

        let session = self.registry.session(client_id);
        session.write().set_selected(ids.iter().copied(), selected);

        debug!(client_id, count = ids.len(), selected, "Toggled selection");
        Ok(())
    }

    /// Move `moved` immediately before or after `target`
    pub fn reorder_insert(
        &self,
        client_id: &str,
        moved: ItemId,
        target: ItemId,
        position: Position,
    ) -> Result<ReorderOutcome, OrderError> {
        self.reorder.validate(moved, target)?;

        let session = self.registry.session(client_id);
        let mut state = session.write();
        let outcome = self
            .reorder
            .apply(state.ranks_mut(), moved, target, position)?;

        debug!(
            client_id,
            moved,
            target,
            %position,
            rank = outcome.rank,
            renormalized = outcome.renormalized,
            "Reordered item"
        );
        Ok(outcome)
    }

    /// Move `moved` so it becomes the `index`-th item (0-based)
    ///
    /// Indices past the end move the item to the very end. Returns the
    /// item's new rank.
    pub fn move_to_position(
        &self,
        client_id: &str,
        moved: ItemId,
        index: usize,
    ) -> Result<f64, OrderError> {
        self.check_id(moved)?;

        let max_id = self.config.max_id;
        let session = self.registry.session(client_id);
        let mut state = session.write();

        // The item currently at `index` once `moved` is taken out
        let anchor = if (index as u64) < max_id - 1 {
            MergedOrder::new(state.ranks(), max_id)
                .excluding(moved)
                .nth(index)
        } else {
            None
        };

        let (target, position) = match anchor {
            Some(key) => (key.id, Position::Before),
            None => match NeighborLocator::new(state.ranks(), max_id).last(moved) {
                Some(last) => (last.id, Position::After),
                // Single-item space: already in place
                None => return Ok(state.ranks().get(moved)),
            },
        };

        let outcome = self
            .reorder
            .apply(state.ranks_mut(), moved, target, position)?;

        debug!(client_id, moved, index, target, %position, "Moved item to index");
        Ok(outcome.rank)
    }

    /// Replace every override: `ordered[i]` gets rank `i + 1`
    ///
    /// Identifiers not listed keep their default rank and interleave with
    /// the listed ones by `(rank, id)`.
    pub fn set_whole_order(&self, client_id: &str, ordered: &[ItemId]) -> Result<(), OrderError> {
        let mut seen = HashSet::with_capacity(ordered.len());
        for &id in ordered {
            self.check_id(id)?;
            if !seen.insert(id) {
                return Err(OrderError::DuplicateId { id });
            }
        }

        let session = self.registry.session(client_id);
        let mut state = session.write();
        let ranks = state.ranks_mut();
        ranks.clear();
        for (index, &id) in ordered.iter().enumerate() {
            ranks.set(id, (index + 1) as f64);
        }

        info!(client_id, count = ordered.len(), "Replaced whole order");
        Ok(())
    }

    /// Drop all overrides and selections for the client
    pub fn reset(&self, client_id: &str) {
        self.registry.reset(client_id);
        info!(client_id, "Reset client state");
    }
}

impl Default for OrderingEngine {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
