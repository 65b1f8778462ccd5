//! Project configuration module.
//!
//! Handles loading, validating, and merging `config.toml` files. A project is
//! a directory holding the menu file; an optional `config.toml` next to it
//! overrides the stock defaults.
//!
//! ```text
//! my-site/
//! ├── config.toml     # Project config (overrides stock defaults)
//! └── menu.txt        # Menu outline
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [languages]
//! primary = "es"            # Language of the first menu section
//! # secondary = "ca"        # Language of the second menu section
//!
//! [parse]
//! max_depth = 3             # Nesting levels allowed (0, 1, 2)
//! strict_pairing = false    # Fail when the two sections differ in length
//!
//! [validation]
//! min_pages = 2             # Fewest pages a menu may have
//!
//! [project]
//! # business_name = "Lar Living"
//! # domain = "larliving.com"
//! # email = "info@larliving.com"
//! # phone = "+34 600 000 000"
//!
//! [processing]
//! max_processes = 4         # Max parallel workers for `check` (omit for auto)
//! ```
//!
//! Config files are sparse: override just the values you want. Unknown keys
//! are rejected to catch typos early.

use crate::naming;
use crate::tree::DEFAULT_MAX_DEPTH;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Name of the config file looked up next to the menu file.
pub const CONFIG_FILENAME: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Project configuration loaded from `config.toml`.
///
/// All fields have defaults. User config files need only specify the values
/// they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MenuConfig {
    /// Language codes of the menu sections.
    pub languages: LanguagesConfig,
    /// Parser behavior.
    pub parse: ParseConfig,
    /// Policy checks run by `check`.
    pub validation: ValidationConfig,
    /// Business details used by the generators.
    pub project: ProjectConfig,
    /// Parallel processing settings.
    pub processing: ProcessingConfig,
}

impl MenuConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let primary = self.languages.primary.as_str();
        if !is_language_code(primary) {
            return Err(ConfigError::Validation(format!(
                "languages.primary must be a language code, got {primary:?}"
            )));
        }
        if let Some(secondary) = self.languages.secondary.as_deref() {
            if !is_language_code(secondary) {
                return Err(ConfigError::Validation(format!(
                    "languages.secondary must be a language code, got {secondary:?}"
                )));
            }
            if secondary == primary {
                return Err(ConfigError::Validation(
                    "languages.secondary must differ from languages.primary".into(),
                ));
            }
        }
        if self.parse.max_depth == 0 {
            return Err(ConfigError::Validation(
                "parse.max_depth must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Short ASCII label such as `es`, `ca` or `pt-br`.
fn is_language_code(code: &str) -> bool {
    !code.is_empty()
        && code.len() <= 8
        && code.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

/// Language codes of the two menu sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LanguagesConfig {
    /// Language of the first section.
    pub primary: String,
    /// Language of the second section. Without it, secondary texts are
    /// parsed but left out of the dictionary and URL files.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary: Option<String>,
}

impl Default for LanguagesConfig {
    fn default() -> Self {
        Self {
            primary: naming::DEFAULT_LOCALE.to_string(),
            secondary: None,
        }
    }
}

/// Parser settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParseConfig {
    /// Number of nesting levels allowed. Deeper lines fail the parse.
    pub max_depth: usize,
    /// Turn a length mismatch between the two sections into an error.
    pub strict_pairing: bool,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            strict_pairing: false,
        }
    }
}

/// Policy checks layered on top of parsing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidationConfig {
    /// Fewest pages (at any level) a menu may have.
    pub min_pages: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self { min_pages: 2 }
    }
}

/// Business details. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    /// Commercial name; used in page titles and folder names.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel workers when checking several menus.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_processes
        .map(|n| n.clamp(1, cores))
        .unwrap_or(cores)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged on top of.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(MenuConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the directory has no `config.toml`, `Err` if the file
/// exists but is not valid TOML.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILENAME);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<MenuConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: MenuConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(dir: &Path) -> Result<MenuConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(dir)?;
    resolve_config(base, overlay)
}

/// Load the config that applies to a menu file: the `config.toml` in the
/// menu file's directory, or the stock defaults.
pub fn load_config_for_menu(menu_path: &Path) -> Result<MenuConfig, ConfigError> {
    match menu_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => load_config(dir),
        _ => load_config(Path::new(".")),
    }
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Menuforge Configuration
# =======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Place this file next to the menu file it applies to.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Languages
# ---------------------------------------------------------------------------
[languages]
# Language code of the first menu section. Also selects how "&" is spelled
# in slugs (es: y, ca: i, fr: et, de: und, it/pt: e, otherwise: and).
primary = "es"

# Language code of the second menu section (after the ---------- line).
# Without it, the second section is parsed but its texts are left out of
# the dictionary and URL files.
# secondary = "ca"

# ---------------------------------------------------------------------------
# Parsing
# ---------------------------------------------------------------------------
[parse]
# Number of nesting levels allowed. Lines indented deeper fail the parse.
max_depth = 3

# Pages are paired with their translation by position. With strict pairing,
# sections that list a different number of pages at any level are an error
# instead of a warning.
strict_pairing = false

# ---------------------------------------------------------------------------
# Validation
# ---------------------------------------------------------------------------
[validation]
# Fewest pages (at any level) a menu may have.
min_pages = 2

# ---------------------------------------------------------------------------
# Project
# ---------------------------------------------------------------------------
[project]
# Commercial name, used in page titles ("Page - Business") and folder names.
# business_name = "Lar Living"
# domain = "larliving.com"
# email = "info@larliving.com"
# phone = "+34 600 000 000"

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel workers when checking several menus.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}
