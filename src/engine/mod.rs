//! Ordering engine: neighbor lookup, rank allocation, reorder, paging.
//!
//! ## Design Principles
//!
//! 1. **Sparse**: Only repositioned items are stored; everything else sits
//!    at rank == identifier
//! 2. **Never Materialize**: Neighbors and pages are computed by merging the
//!    sorted overrides with the implicit identity sequence
//! 3. **Local Repair**: A collapsed gap re-spaces a small window, never the
//!    whole order
//! 4. **Reject Early**: Every write validates its input before touching state
//!
//! ## Components
//!
//! - [`NeighborLocator`]: Closest item before or after a position
//! - [`RankAllocator`]: New rank between two optional bounds
//! - [`WindowRenormalizer`]: Even re-spacing of a window
//! - [`ReorderTransaction`]: The single pairwise write path
//! - [`MergedOrder`] / [`PagedMergeView`]: Lazy global order and its pages
//! - [`OrderingEngine`]: Per-client facade over a session registry
//!
//! ## Example
//!
//! ```
//! use sparse_order::engine::OrderingEngine;
//! use sparse_order::types::Position;
//!
//! let engine = OrderingEngine::new();
//! engine.reorder_insert("client", 130, 30, Position::Before).unwrap();
//!
//! let rank = engine.rank_of("client", 130).unwrap();
//! assert!(29.0 < rank && rank < 30.0);
//! ```

pub mod neighbors;
pub mod allocator;
pub mod renormalize;
pub mod reorder;
pub mod page;
pub mod ordering;

pub use neighbors::{Neighbor, NeighborLocator};
pub use allocator::RankAllocator;
pub use renormalize::{RankPlan, WindowRenormalizer};
pub use reorder::{ReorderOutcome, ReorderTransaction};
pub use page::{MergedOrder, PagedMergeView};
pub use ordering::OrderingEngine;
