//! Error types for the policy engine.
//!
//! Engine operations themselves are total and never fail; errors only
//! arise when loading or parsing configuration.

use thiserror::Error;

/// Errors produced while loading or validating policy configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse policy configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("workspace count {0} is out of range (expected 1..={max})", max = crate::config::MAX_WORKSPACES)]
    WorkspaceCountOutOfRange(usize),

    #[error("unknown window placement strategy '{0}'")]
    UnknownPlacementStrategy(String),

    #[error("unknown row placement direction '{0}'")]
    UnknownRowDirection(String),

    #[error("unknown column placement direction '{0}'")]
    UnknownColDirection(String),
}
