//! Paged, filtered view of the global order.
//!
//! ## Two-Way Merge
//!
//! The global order is never materialized. [`MergedOrder`] merges two
//! streams that are each already sorted by `(rank, id)`:
//!
//! - **Overrides**: genuine overrides, straight from the sorted index
//! - **Defaults**: `1, 2, ..., max_id`, skipping identifiers that sit
//!   elsewhere because of a genuine override
//!
//! At each step the smaller head is emitted. Both streams drop identifiers
//! that fail the substring filter, so a page costs `O(offset + limit)` merge
//! steps plus the identifiers the filter rejects.
//!
//! ## Example
//!
//! ```
//! use sparse_order::engine::MergedOrder;
//! use sparse_order::store::RankStore;
//!
//! let mut store = RankStore::new();
//! store.set(2, 0.5);
//! store.set(1, 1.0);
//!
//! let ids: Vec<_> = MergedOrder::new(&store, 1_000_000)
//!     .take(4)
//!     .map(|key| key.id)
//!     .collect();
//! assert_eq!(ids, vec![2, 1, 3, 4]);
//! ```

use std::collections::btree_set;
use std::iter::Peekable;

use tracing::debug;

use crate::config::EngineConfig;
use crate::error::OrderError;
use crate::store::{ClientState, RankStore};
use crate::types::rank::{matches_query, OrderKey};
use crate::types::{ItemId, PageItem};

/// Lazy iterator over the global order of one client.
#[derive(Debug, Clone)]
pub struct MergedOrder<'a> {
    store: &'a RankStore,

    /// Genuine overrides, ascending
    overrides: Peekable<btree_set::Iter<'a, OrderKey>>,

    /// Next identifier the default stream will consider
    next_default: ItemId,

    max_id: ItemId,

    /// Substring filter; `None` admits everything
    query: Option<&'a str>,

    /// Identifier left out of both streams
    exclude: Option<ItemId>,
}

impl<'a> MergedOrder<'a> {
    pub fn new(store: &'a RankStore, max_id: ItemId) -> Self {
        Self {
            store,
            overrides: store.iter_ordered().peekable(),
            next_default: 1,
            max_id,
            query: None,
            exclude: None,
        }
    }

    /// Keep only identifiers whose decimal form contains `query`
    ///
    /// An empty query is the same as no query.
    pub fn with_query(mut self, query: Option<&'a str>) -> Self {
        self.query = query.filter(|q| !q.is_empty());
        self
    }

    /// Leave `id` out, as if it were not part of the order
    pub fn excluding(mut self, id: ItemId) -> Self {
        self.exclude = Some(id);
        self
    }

    #[inline]
    fn admits(&self, id: ItemId) -> bool {
        self.exclude != Some(id) && self.query.map_or(true, |q| matches_query(id, q))
    }

    fn peek_override(&mut self) -> Option<OrderKey> {
        while let Some(&&key) = self.overrides.peek() {
            if self.admits(key.id) {
                return Some(key);
            }
            self.overrides.next();
        }
        None
    }

    fn peek_default(&mut self) -> Option<OrderKey> {
        while self.next_default <= self.max_id {
            let id = self.next_default;
            if !self.store.is_genuine(id) && self.admits(id) {
                return Some(OrderKey::default_for(id));
            }
            self.next_default += 1;
        }
        None
    }
}

impl Iterator for MergedOrder<'_> {
    type Item = OrderKey;

    fn next(&mut self) -> Option<OrderKey> {
        // Heads never tie: an identifier lives in exactly one stream
        match (self.peek_override(), self.peek_default()) {
            (Some(over), Some(default)) if over < default => {
                self.overrides.next();
                Some(over)
            }
            (_, Some(default)) => {
                self.next_default += 1;
                Some(default)
            }
            (Some(over), None) => {
                self.overrides.next();
                Some(over)
            }
            (None, None) => None,
        }
    }
}

// ============================================================================
// PagedMergeView
// ============================================================================

/// Offset/limit pages over [`MergedOrder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagedMergeView {
    max_id: ItemId,
    max_page_size: usize,
}

impl PagedMergeView {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            max_id: config.max_id,
            max_page_size: config.max_page_size,
        }
    }

    /// Reject limits outside `[1, max_page_size]`
    fn check_limit(&self, limit: usize) -> Result<(), OrderError> {
        if limit == 0 || limit > self.max_page_size {
            return Err(OrderError::InvalidPageSize {
                limit,
                max: self.max_page_size,
            });
        }
        Ok(())
    }

    /// Items `offset..offset + limit` of the filtered order
    ///
    /// # Example
    ///
    /// ```
    /// use sparse_order::engine::PagedMergeView;
    /// use sparse_order::store::ClientState;
    /// use sparse_order::EngineConfig;
    ///
    /// let view = PagedMergeView::new(&EngineConfig::default());
    /// let mut state = ClientState::new();
    /// state.set_selected([2], true);
    ///
    /// let page = view.list_page(&state, None, 1, 2).unwrap();
    /// assert_eq!(page[0].id, 2);
    /// assert_eq!(page[0].label, "Item 2");
    /// assert!(page[0].selected);
    /// assert!(!page[1].selected);
    /// ```
    pub fn list_page(
        &self,
        state: &ClientState,
        query: Option<&str>,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<PageItem>, OrderError> {
        self.check_limit(limit)?;

        let page: Vec<PageItem> = MergedOrder::new(state.ranks(), self.max_id)
            .with_query(query)
            .skip(offset)
            .take(limit)
            .map(|key| PageItem::new(key.id, state.is_selected(key.id)))
            .collect();

        debug!(?query, offset, limit, returned = page.len(), "Listed page");
        Ok(page)
    }
}

impl Default for PagedMergeView {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
