//! Item identifiers, reorder positions and page rows.
//!
//! ## Identifier Space
//!
//! Identifiers form the closed, dense range `[1, max_id]`. Every identifier
//! is always present; there is no existence table. An identifier's default
//! rank is the identifier itself.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifier of an item in the virtual collection.
pub type ItemId = u64;

// ============================================================================
// Position enum
// ============================================================================

/// Where a moved item lands relative to its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    /// Moved item sorts immediately before the target
    #[default]
    Before,
    /// Moved item sorts immediately after the target
    After,
}

impl Position {
    pub fn as_str(self) -> &'static str {
        match self {
            Position::Before => "before",
            Position::After => "after",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown position name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown position '{0}', expected 'before' or 'after'")]
pub struct ParsePositionError(pub String);

impl FromStr for Position {
    type Err = ParsePositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "before" => Ok(Position::Before),
            "after" => Ok(Position::After),
            _ => Err(ParsePositionError(s.to_string())),
        }
    }
}

// ============================================================================
// PageItem struct
// ============================================================================

/// One row of a listed page.
///
/// ## Example
///
/// ```
/// use sparse_order::types::PageItem;
///
/// let item = PageItem::new(42, true);
/// assert_eq!(item.label, "Item 42");
/// assert!(item.selected);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageItem {
    /// Item identifier
    pub id: ItemId,

    /// Display label, always `"Item <id>"`
    pub label: String,

    /// Whether the client has this item selected
    pub selected: bool,
}

impl PageItem {
    /// Create a page row for `id`
    pub fn new(id: ItemId, selected: bool) -> Self {
        Self {
            id,
            label: format!("Item {}", id),
            selected,
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
