//! Handler functions for `tessera config` subcommands.
//!
//! Values are addressed by dotted key over the TOML form of the
//! configuration, so `get` and `set` keep working if the file grows tables.

use std::path::{Path, PathBuf};

use tessera_core::{Error, Result};
use tessera_search::SearchConfig;

use crate::cli::ConfigAction;
use crate::config::{load_config, parse_config, resolve_config_path, to_toml_string, PROJECT_NAME};

// ============================================================================
// Command dispatch
// ============================================================================

/// Handle a config subcommand.
pub fn handle_config_command(config_path: Option<&Path>, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Path => cmd_config_path(config_path),
        ConfigAction::Get { key } => cmd_config_get(config_path, &key),
        ConfigAction::Set { key, value } => cmd_config_set(config_path, &key, &value),
        ConfigAction::Init { file, force } => {
            cmd_config_init(file.as_deref().or(config_path), force).map(|_| ())
        }
    }
}

// ============================================================================
// Command handlers
// ============================================================================

/// Show the resolved config file path.
pub fn cmd_config_path(config_path: Option<&Path>) -> Result<()> {
    let path = resolve_config_path(config_path).ok_or_else(|| {
        Error::config("Could not determine config directory for this platform")
    })?;
    println!("{}", path.display());
    if !path.exists() {
        eprintln!("(file does not exist; run `{PROJECT_NAME} config init` to create it)");
    }
    Ok(())
}

/// Print a configuration value by dotted key.
pub fn cmd_config_get(config_path: Option<&Path>, key: &str) -> Result<()> {
    let config = load_config(config_path)?;
    println!("{}", config_value(&config, key)?);
    Ok(())
}

/// Look up a configuration value by dotted key, formatted for display.
pub fn config_value(config: &SearchConfig, key: &str) -> Result<String> {
    let value = toml::Value::try_from(config).map_err(|e| Error::config(e.to_string()))?;
    get_nested_value(&value, key)
        .map(format_toml_value)
        .ok_or_else(|| Error::config(format!("Key '{key}' not found in configuration")))
}

/// Set a configuration value by dotted key in the config file.
///
/// The value keeps the type of the key's current value when it is a string;
/// otherwise its detected type is tried first and a string second. The
/// edited file must still parse as a valid configuration, or nothing is
/// written.
pub fn cmd_config_set(config_path: Option<&Path>, key: &str, value: &str) -> Result<()> {
    let path = resolve_config_path(config_path)
        .ok_or_else(|| Error::config("Could not determine config directory"))?;

    if !path.exists() {
        return Err(Error::config(format!(
            "Config file does not exist at {}. Run `{PROJECT_NAME} config init` first.",
            path.display()
        )));
    }
    let content = std::fs::read_to_string(&path).map_err(|e| Error::io_with_path(e, &path))?;
    let doc: toml::Value = toml::from_str(&content)
        .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))?;

    let mut first_error = None;
    for candidate in value_candidates(get_nested_value(&doc, key), value) {
        let mut edited = doc.clone();
        set_nested_value(&mut edited, key, candidate)?;
        let toml_str =
            toml::to_string_pretty(&edited).map_err(|e| Error::config(e.to_string()))?;

        let checked = parse_config(&toml_str)
            .map_err(|e| Error::config(format!("Invalid value for '{key}': {e}")))
            .and_then(|config| config.validate());
        match checked {
            Ok(()) => {
                std::fs::write(&path, toml_str).map_err(|e| Error::io_with_path(e, &path))?;
                println!("Set {key} = {value} in {}", path.display());
                return Ok(());
            }
            Err(e) => {
                first_error.get_or_insert(e);
            }
        }
    }

    Err(first_error.unwrap_or_else(|| Error::config(format!("Invalid value for '{key}'"))))
}

/// Create a default configuration file and return its path.
pub fn cmd_config_init(file: Option<&Path>, force: bool) -> Result<PathBuf> {
    let path = resolve_config_path(file)
        .ok_or_else(|| Error::config("Could not determine config directory"))?;

    if path.exists() && !force {
        return Err(Error::config(format!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        )));
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| Error::io_with_path(e, parent))?;
    }

    let toml_str = to_toml_string(&SearchConfig::default())?;
    std::fs::write(&path, &toml_str).map_err(|e| Error::io_with_path(e, &path))?;

    println!("Config file created at {}", path.display());
    Ok(path)
}

// ============================================================================
// TOML dotted-key helpers
// ============================================================================

/// Navigate a dotted key path in a TOML value tree.
pub fn get_nested_value<'a>(value: &'a toml::Value, key: &str) -> Option<&'a toml::Value> {
    key.split('.')
        .try_fold(value, |current, part| current.as_table()?.get(part))
}

/// Set a value at a dotted key path, creating intermediate tables as needed.
pub fn set_nested_value(root: &mut toml::Value, key: &str, value: toml::Value) -> Result<()> {
    let (parents, last) = key.rsplit_once('.').unwrap_or(("", key));
    if last.is_empty() {
        return Err(Error::config("Empty key path"));
    }

    let mut current = root;
    for part in parents.split('.').filter(|p| !p.is_empty()) {
        let table = current
            .as_table_mut()
            .ok_or_else(|| Error::config("Cannot navigate into a non-table value"))?;
        current = table
            .entry(part.to_string())
            .or_insert(toml::Value::Table(toml::map::Map::new()));
    }

    current
        .as_table_mut()
        .ok_or_else(|| Error::config("Cannot set key on a non-table value"))?
        .insert(last.to_string(), value);
    Ok(())
}

/// Parse a string value into a TOML value, auto-detecting the type.
///
/// Priority: bool → integer → float → string.
pub fn parse_value(s: &str) -> toml::Value {
    match s {
        "true" => return toml::Value::Boolean(true),
        "false" => return toml::Value::Boolean(false),
        _ => {}
    }
    if let Ok(i) = s.parse::<i64>() {
        return toml::Value::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return toml::Value::Float(f);
    }
    toml::Value::String(s.to_string())
}

/// TOML values to try for `raw`, in order.
///
/// A key whose current value is a string stays a string; anything else gets
/// the detected type, then the plain string form.
pub fn value_candidates(current: Option<&toml::Value>, raw: &str) -> Vec<toml::Value> {
    let text = toml::Value::String(raw.to_string());
    if matches!(current, Some(toml::Value::String(_))) {
        return vec![text];
    }
    let detected = parse_value(raw);
    if detected == text {
        vec![detected]
    } else {
        vec![detected, text]
    }
}

/// Format a TOML value for display on stdout.
pub fn format_toml_value(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Integer(i) => i.to_string(),
        toml::Value::Float(f) => f.to_string(),
        toml::Value::Boolean(b) => b.to_string(),
        toml::Value::Datetime(dt) => dt.to_string(),
        toml::Value::Array(_) | toml::Value::Table(_) => {
            toml::to_string_pretty(value).unwrap_or_else(|_| format!("{value:?}"))
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
