//! State digest for replay verification.
//!
//! The digest summarizes one client's ordering state. Two engines fed the
//! same operation sequence must produce the same state root; the stress tests
//! rely on this to check determinism.
//!
//! ## State Root
//!
//! SHA-256 over the SSZ encoding of every genuine override in `(rank, id)`
//! order, followed by the selected identifiers in ascending order. Ranks are
//! encoded by their IEEE-754 bit pattern so the root is exact.

use sha2::{Digest, Sha256};
use ssz_rs::prelude::*;

use crate::error::OrderError;
use crate::types::rank::OrderKey;
use crate::types::ItemId;

/// One override as it enters the state root.
#[derive(Debug, Clone, PartialEq, Eq, Default, SimpleSerialize)]
pub struct RankEntry {
    /// Item identifier
    pub id: u64,

    /// `f64::to_bits` of the override rank
    pub rank_bits: u64,
}

impl RankEntry {
    pub fn from_key(key: &OrderKey) -> Self {
        Self {
            id: key.id,
            rank_bits: key.rank.to_bits(),
        }
    }
}

/// Summary of a client's ordering state.
///
/// ## Example
///
/// ```
/// use sparse_order::types::StateDigest;
///
/// let empty = StateDigest::compute(std::iter::empty(), std::iter::empty()).unwrap();
/// assert!(empty.is_empty());
/// assert_eq!(empty.state_root_hex().len(), 64);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, SimpleSerialize)]
pub struct StateDigest {
    /// Number of genuine overrides hashed
    pub override_count: u64,

    /// Number of selected identifiers hashed
    pub selected_count: u64,

    /// SHA-256 state root (32 bytes)
    pub state_root: [u8; 32],
}

impl StateDigest {
    /// Compute a digest from ordered overrides and ascending selections
    ///
    /// Callers pass overrides already sorted by `(rank, id)` and selections
    /// sorted ascending; the root depends on that order.
    pub fn compute<'a, O, S>(overrides: O, selected: S) -> Result<Self, OrderError>
    where
        O: IntoIterator<Item = &'a OrderKey>,
        S: IntoIterator<Item = ItemId>,
    {
        let mut hasher = Sha256::new();
        let mut override_count = 0u64;
        let mut selected_count = 0u64;

        for key in overrides {
            let bytes = ssz_rs::serialize(&RankEntry::from_key(key))
                .map_err(|e| OrderError::Encoding(format!("{:?}", e)))?;
            hasher.update(&bytes);
            override_count += 1;
        }

        // Domain separator between the two sections
        hasher.update(override_count.to_le_bytes());

        for id in selected {
            hasher.update(id.to_le_bytes());
            selected_count += 1;
        }

        let mut state_root = [0u8; 32];
        state_root.copy_from_slice(&hasher.finalize());

        Ok(Self {
            override_count,
            selected_count,
            state_root,
        })
    }

    /// Get the state root as a hex string
    pub fn state_root_hex(&self) -> String {
        hex::encode(self.state_root)
    }

    /// True when neither overrides nor selections were hashed
    pub fn is_empty(&self) -> bool {
        self.override_count == 0 && self.selected_count == 0
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
