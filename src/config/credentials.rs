//! INI credentials loading and parsing

use crate::config::{CONFIG_DIR_NAME, DEFAULT_CONFIG_FILE, GridConfig, NIOS_SECTION};
use crate::error::LeaseError;
use crate::system::System;
use anyhow::Result;
use ini::{Ini, ParseOption};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Locate the credentials file
///
/// An explicit path must exist. The default `gm.ini` is looked up in the
/// working directory first, then under the user configuration directory.
pub fn resolve_config_path(system: &dyn System, path: &str) -> Result<PathBuf> {
    let requested = Path::new(path);
    if system.exists(requested) {
        return Ok(requested.to_path_buf());
    }

    if path == DEFAULT_CONFIG_FILE
        && let Some(config_dir) = system.config_dir()
    {
        if let Ok(cwd) = system.current_dir() {
            debug!("{} not found in {}", DEFAULT_CONFIG_FILE, cwd.display());
        }

        let fallback = config_dir.join(CONFIG_DIR_NAME).join(DEFAULT_CONFIG_FILE);
        if system.exists(&fallback) {
            debug!("Using credentials from {}", fallback.display());
            return Ok(fallback);
        }
    }

    Err(LeaseError::configuration(format!(
        "Configuration file not found: {path}\n\
        Create a gm.ini file with a [NIOS] section or specify a different path with --config"
    ))
    .into())
}

/// Load and parse the credentials file
pub fn load_config(system: &dyn System, path: &str) -> Result<GridConfig> {
    let resolved = resolve_config_path(system, path)?;

    let content = system.read_to_string(&resolved).map_err(|e| {
        LeaseError::configuration(format!(
            "Failed to read configuration file {}: {e}",
            resolved.display()
        ))
    })?;

    parse_config(&content, &resolved.display().to_string())
}

/// Parse INI content into a `GridConfig`
///
/// Missing keys are logged and left empty; `validate` decides which of them
/// are fatal.
pub fn parse_config(content: &str, source: &str) -> Result<GridConfig> {
    // Passwords may legitimately contain backslashes and quotes.
    let option = ParseOption {
        enabled_quote: false,
        enabled_escape: false,
        ..ParseOption::default()
    };

    let ini = Ini::load_from_str_opt(content, option).map_err(|e| {
        LeaseError::configuration(format!(
            "Failed to parse INI configuration in file: {source}: {e}"
        ))
    })?;

    // rust-ini reads a line without '=' as a key running on into the next
    // lines, which can swallow the section header that follows it.
    let section = ini.section(Some(NIOS_SECTION)).ok_or_else(|| {
        LeaseError::configuration(format!(
            "No [{NIOS_SECTION}] section in configuration file: {source}\n\
            Check that no line before the [{NIOS_SECTION}] header lacks a '='"
        ))
    })?;

    let lookup = |key: &str| -> String {
        let value = section
            .iter()
            .find(|(name, _)| name.trim().eq_ignore_ascii_case(key))
            .map(|(_, value)| strip_quotes(value));

        if let Some(value) = value {
            if key == "pass" {
                debug!("Key {key} found in {source}");
            } else {
                debug!("Key {key} found in {source}: {value}");
            }
            value
        } else {
            warn!("Key {key} not found in {NIOS_SECTION} section.");
            String::new()
        }
    };

    Ok(GridConfig {
        gm: lookup("gm"),
        api_version: lookup("api_version"),
        valid_cert: lookup("valid_cert"),
        user: lookup("user"),
        password: lookup("pass"),
    })
}

/// Trim whitespace and any surrounding single or double quotes
fn strip_quotes(value: &str) -> String {
    value.trim().trim_matches(['\'', '"']).to_owned()
}
