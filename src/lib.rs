//! # Sparse Order
//!
//! Per-client custom ordering over a virtual collection of up to one million
//! items, storing state only for the items a client has moved.
//!
//! ## Architecture
//!
//! The engine consists of:
//! - **Types**: Core data structures (ItemId, Position, OrderKey, PageItem)
//! - **Store**: Sparse rank overrides, selections and the session registry
//! - **Engine**: Neighbor lookup, allocation, renormalization and paging
//!
//! ## Design Principles
//!
//! 1. **Determinism**: Identical operation sequences produce identical state
//! 2. **Total Order**: Items are ordered by `(rank, id)`, ties broken by the
//!    lower identifier
//! 3. **Sparse State**: Memory grows with the number of moves, never with
//!    the size of the identifier space
//! 4. **Single Writer**: One exclusive lock per client for every mutation
//!
//! ## Performance Targets
//!
//! - Reorder: O(log n + window) in the number of overrides n
//! - Page: O(offset + limit) merge steps, plus identifiers a filter rejects
//! - Memory: one map entry and one index entry per override

// ============================================================================
// Module declarations
// ============================================================================

/// Core data types: ItemId, Position, OrderKey, PageItem, StateDigest
pub mod types;

/// Client state: rank overrides, selections, session registry
pub mod store;

/// Ordering engine: reorder transaction and paged merge view
pub mod engine;

/// Engine configuration
pub mod config;

/// Error types
pub mod error;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use config::EngineConfig;
pub use engine::{OrderingEngine, ReorderOutcome};
pub use error::{ConfigError, OrderError};
pub use types::{ItemId, PageItem, Position, StateDigest};
