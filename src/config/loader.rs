//! Configuration loading with defaults

use std::path::Path;

use crate::errors::{KoiflowError, Result};
use crate::fs;
use crate::schemas::Config;

/// Load configuration from the data directory, falling back to defaults.
///
/// If config.json exists, missing fields take their defaults. The result is
/// validated; malformed or inconsistent settings are `ConfigError`.
pub fn load_config(root: &Path) -> Result<Config> {
    let config = fs::read_config(root).map_err(|e| match e {
        KoiflowError::InvalidJson(msg) => KoiflowError::ConfigError(msg),
        other => other,
    })?;
    config.validate().map_err(KoiflowError::ConfigError)?;
    tracing::debug!(root = %root.display(), "Loaded config");
    Ok(config)
}
