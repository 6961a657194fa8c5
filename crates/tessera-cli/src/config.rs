//! Configuration file loading.
//!
//! The config file is TOML holding a [`SearchConfig`]. Its location is, in
//! order: the `--config` flag, the `TESSERA_CONFIG` environment variable
//! (both handled by clap), then `<config_dir>/tessera/config.toml`. A missing
//! file means all defaults.

use std::path::{Path, PathBuf};

use tessera_core::{Error, Result};
use tessera_search::SearchConfig;

use crate::cli::SearchArgs;

/// Project directory name under the platform config directory.
pub const PROJECT_NAME: &str = "tessera";

/// `<config_dir>/tessera/config.toml`, if the platform has a config directory.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(PROJECT_NAME).join("config.toml"))
}

/// The explicit path if given, else the default location.
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => default_config_path(),
    }
}

/// Load the configuration, falling back to defaults when no file exists.
pub fn load_config(explicit: Option<&Path>) -> Result<SearchConfig> {
    let Some(path) = resolve_config_path(explicit) else {
        return Ok(SearchConfig::default());
    };
    if !path.exists() {
        tracing::debug!(path = %path.display(), "No config file, using defaults");
        return Ok(SearchConfig::default());
    }

    let content = std::fs::read_to_string(&path).map_err(|e| Error::io_with_path(e, &path))?;
    let config = parse_config(&content)
        .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))?;
    config.validate()?;
    tracing::debug!(path = %path.display(), "Loaded config");
    Ok(config)
}

/// Parse TOML text into a configuration.
pub fn parse_config(content: &str) -> std::result::Result<SearchConfig, toml::de::Error> {
    toml::from_str(content)
}

/// Serialize a configuration as pretty TOML.
pub fn to_toml_string(config: &SearchConfig) -> Result<String> {
    toml::to_string_pretty(config).map_err(|e| Error::config(e.to_string()))
}

/// Apply `tessera search` flags on top of file values.
pub fn apply_overrides(config: &mut SearchConfig, args: &SearchArgs) {
    if let Some(root) = &args.root {
        config.index_root = Some(root.clone());
    }
    if let Some(field) = &args.field {
        config.default_field = Some(field.clone());
    }
    if let Some(limit) = args.limit {
        config.limit = Some(limit);
    }
    if let Some(workers) = args.workers {
        config.workers = workers;
    }
    if let Some(timeout_secs) = args.timeout_secs {
        config.timeout_secs = timeout_secs;
    }
}

/// The index root to search, or a configuration error naming both sources.
pub fn require_index_root(config: &SearchConfig) -> Result<&Path> {
    config.index_root.as_deref().ok_or_else(|| {
        Error::config("No index root: pass --root or set `index_root` in the config file")
    })
}

// ============================================================================
// Tests
// ============================================================================
