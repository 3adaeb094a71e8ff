//! Error types for the ordering engine
//!
//! Every error is a pure input error surfaced synchronously; nothing here is
//! transient, so callers should not retry. Rejection always happens before
//! any state is touched.

use thiserror::Error;

use crate::types::ItemId;

/// All errors the ordering engine can report
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OrderError {
    /// Identifier outside `[1, max]`
    #[error("Identifier out of range: {id} not in [1, {max}]")]
    OutOfRange { id: ItemId, max: ItemId },

    /// Reorder of an item relative to itself
    #[error("Cannot move item {id} relative to itself")]
    SelfMove { id: ItemId },

    /// Selection batch above the configured maximum
    #[error("Too many identifiers: {count} > {max}")]
    TooManyIds { count: usize, max: usize },

    /// Page limit outside `[1, max]`
    #[error("Invalid page size: {limit} not in [1, {max}]")]
    InvalidPageSize { limit: usize, max: usize },

    /// Whole-order rewrite listing the same identifier twice
    #[error("Duplicate identifier in order: {id}")]
    DuplicateId { id: ItemId },

    /// State digest encoding failed
    #[error("State encoding failed: {0}")]
    Encoding(String),
}

/// Configuration rejected by [`crate::EngineConfig::validate`]
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("max_id must be at least 1")]
    EmptyIdSpace,

    #[error("{name} must be a positive finite number, got {value}")]
    NonPositive { name: &'static str, value: f64 },

    #[error("{name} must be at least 1")]
    ZeroLimit { name: &'static str },
}
