//! Core data types for the sparse ordering engine
//!
//! ## Types
//!
//! - [`ItemId`]: Identifier in the dense range `[1, max_id]`
//! - [`Position`]: Before or After a target
//! - [`PageItem`]: One listed row `{id, label, selected}`
//! - [`OrderKey`]: `(rank, id)` key defining the global order
//! - [`StateDigest`]: Deterministic SHA-256 summary of a client's state
//!
//! ## Ranks
//!
//! Ranks are `f64`. An identifier without an override has rank equal to
//! itself; see [`rank`] for the constants that govern allocation.

mod item;
mod digest;
pub mod rank;

// Re-export all types at module level
pub use item::{ItemId, PageItem, ParsePositionError, Position};
pub use digest::{RankEntry, StateDigest};
pub use rank::OrderKey;
