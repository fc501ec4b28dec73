//! Policy configuration, deserialized from TOML.
//!
//! Every field has a default, so an empty document is a valid
//! configuration. Validation happens after parsing; a parsed config is
//! only handed out once it passed.

use serde::Deserialize;

use crate::error::ConfigError;
use crate::placement::{ColDirection, PlacementStrategy, RowDirection};

/// Largest accepted workspace count.
pub const MAX_WORKSPACES: usize = 999;

const DEFAULT_WORKSPACES: usize = 4;

/// Window-management policy settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PolicyConfig {
    /// Number of virtual workspaces, `1..=MAX_WORKSPACES`.
    pub workspaces: usize,
    /// Display names by workspace index. May be shorter or longer than
    /// `workspaces`; empty entries mean "unnamed".
    pub workspace_names: Vec<String>,
    pub window_placement: PlacementStrategy,
    pub row_placement_direction: RowDirection,
    pub col_placement_direction: ColDirection,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        PolicyConfig {
            workspaces: DEFAULT_WORKSPACES,
            workspace_names: Vec::new(),
            window_placement: PlacementStrategy::default(),
            row_placement_direction: RowDirection::default(),
            col_placement_direction: ColDirection::default(),
        }
    }
}

impl PolicyConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: PolicyConfig = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.workspaces == 0 || self.workspaces > MAX_WORKSPACES {
            return Err(ConfigError::WorkspaceCountOutOfRange(self.workspaces));
        }
        Ok(())
    }
}
