//! Session registry: client identifier to [`ClientState`].
//!
//! ## Memory Model
//!
//! States live in a slab; a HashMap maps the client identifier to the slab
//! key. Sessions are created on first touch and never removed. A reset swaps
//! the state behind the existing slot, so handles already given out observe
//! the fresh state on their next lock.
//!
//! ## Locking
//!
//! - The registry lock is held only to look up or create a slot.
//! - Each state has its own `RwLock`: writers take it exclusively for a whole
//!   operation, readers share it and see a consistent snapshot.
//!
//! ## Example
//!
//! ```
//! use sparse_order::store::SessionRegistry;
//!
//! let registry = SessionRegistry::new();
//! let state = registry.session("client-a");
//! state.write().ranks_mut().set(2, 0.5);
//!
//! assert_eq!(registry.session("client-a").read().ranks().get(2), 0.5);
//! assert_eq!(registry.session("client-b").read().ranks().get(2), 2.0);
//! assert_eq!(registry.len(), 2);
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use slab::Slab;

use crate::store::ClientState;

/// Shared handle to one client's state
pub type SharedState = Arc<RwLock<ClientState>>;

#[derive(Debug, Default)]
struct Sessions {
    /// Session storage, key = slab index
    slots: Slab<SharedState>,

    /// Client identifier to slab key
    index: HashMap<String, usize>,
}

impl Sessions {
    fn lookup(&self, client_id: &str) -> Option<SharedState> {
        let key = *self.index.get(client_id)?;
        self.slots.get(key).cloned()
    }
}

/// Process-wide map of client sessions.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: RwLock<Sessions>,
}

impl SessionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with room for `capacity` sessions
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            sessions: RwLock::new(Sessions {
                slots: Slab::with_capacity(capacity),
                index: HashMap::with_capacity(capacity),
            }),
        }
    }

    /// Number of known clients
    pub fn len(&self) -> usize {
        self.sessions.read().slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.read().slots.is_empty()
    }

    /// Check whether a client has touched the registry
    pub fn contains(&self, client_id: &str) -> bool {
        self.sessions.read().index.contains_key(client_id)
    }

    /// Existing session, without creating one
    pub fn get(&self, client_id: &str) -> Option<SharedState> {
        self.sessions.read().lookup(client_id)
    }

    /// Session for `client_id`, created on first touch
    pub fn session(&self, client_id: &str) -> SharedState {
        if let Some(state) = self.get(client_id) {
            return state;
        }

        let mut sessions = self.sessions.write();

        // Another caller may have created it between the two locks
        if let Some(state) = sessions.lookup(client_id) {
            return state;
        }

        let state: SharedState = Arc::new(RwLock::new(ClientState::new()));
        let key = sessions.slots.insert(Arc::clone(&state));
        sessions.index.insert(client_id.to_string(), key);
        state
    }

    /// Replace the client's state with a fresh one
    pub fn reset(&self, client_id: &str) {
        let state = self.session(client_id);
        *state.write() = ClientState::new();
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
