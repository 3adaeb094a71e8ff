//! Client state storage.
//!
//! ## Components
//!
//! - [`RankStore`]: Sparse identifier-to-rank overrides with a sorted index
//! - [`ClientState`]: Overrides plus the selection set of one client
//! - [`SessionRegistry`]: Client identifier to state, created on first touch
//!
//! ## Performance
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | Resolve rank | O(1) |
//! | Set override | O(log n) |
//! | Nearest genuine override | O(log n) |
//! | Session lookup | O(1) |
//!
//! n is the number of overrides, never the size of the identifier space.

pub mod ranks;
pub mod client;
pub mod registry;

pub use ranks::RankStore;
pub use client::ClientState;
pub use registry::{SessionRegistry, SharedState};
