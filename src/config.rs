//! Configuration for the ordering engine

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::rank::{ADJACENT_OFFSET, EDGE_OFFSET, EPSILON, MAX_ID};
use crate::types::ItemId;

/// Engine configuration
///
/// Missing fields fall back to their defaults when deserialized.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Identifiers are `1..=max_id`
    pub max_id: ItemId,
    /// Minimum separation between neighboring ranks
    pub epsilon: f64,
    /// Offset from a lone bound when allocating at an open end
    pub edge_offset: f64,
    /// Offset from a default-ranked target when placing next to it
    pub adjacent_offset: f64,
    /// Largest page `list_page` will return
    pub max_page_size: usize,
    /// Largest selection batch `toggle_selection` accepts
    pub max_toggle_batch: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_id: MAX_ID,
            epsilon: EPSILON,
            edge_offset: EDGE_OFFSET,
            adjacent_offset: ADJACENT_OFFSET,
            max_page_size: 100,
            max_toggle_batch: 1000,
        }
    }
}

impl EngineConfig {
    /// Default configuration over a smaller identifier space
    pub fn with_max_id(max_id: ItemId) -> Self {
        Self {
            max_id,
            ..Self::default()
        }
    }

    /// Check that every field is usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_id == 0 {
            return Err(ConfigError::EmptyIdSpace);
        }

        for (name, value) in [
            ("epsilon", self.epsilon),
            ("edge_offset", self.edge_offset),
            ("adjacent_offset", self.adjacent_offset),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NonPositive { name, value });
            }
        }

        if self.max_page_size == 0 {
            return Err(ConfigError::ZeroLimit {
                name: "max_page_size",
            });
        }
        if self.max_toggle_batch == 0 {
            return Err(ConfigError::ZeroLimit {
                name: "max_toggle_batch",
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.max_id, 1_000_000);
        assert_eq!(config.epsilon, 1e-12);
        assert_eq!(config.edge_offset, 1e-4);
        assert_eq!(config.adjacent_offset, 1e-3);
        assert_eq!(config.max_page_size, 100);
        assert_eq!(config.max_toggle_batch, 1000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: EngineConfig = serde_json::from_str(r#"{"max_id": 500}"#).unwrap();
        assert_eq!(config.max_id, 500);
        assert_eq!(config.max_page_size, 100);
        assert_eq!(config, EngineConfig::with_max_id(500));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = EngineConfig::with_max_id(0);
        assert_eq!(config.validate(), Err(ConfigError::EmptyIdSpace));

        let config = EngineConfig {
            epsilon: -1.0,
            ..EngineConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive { name: "epsilon", .. })
        ));

        let config = EngineConfig {
            max_toggle_batch: 0,
            ..EngineConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::ZeroLimit {
                name: "max_toggle_batch"
            })
        );
    }
}
