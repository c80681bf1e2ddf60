//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. The file lives at
//! the site root and overrides the stock defaults key by key:
//!
//! ```text
//! site/
//! ├── config.toml              # optional, sparse overrides
//! ├── img/splash.jpg           # default splash
//! └── content/
//!     ├── toc.json
//!     └── projects/01-harbor/
//!         ├── project.json
//!         ├── thumb.jpg
//!         └── img/splash.jpg
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [content]
//! toc = "content/toc.json"        # TOC document, relative to the site root
//! base_path = ""                  # Prefix for every project directory
//! detail_file = "project.json"    # Per-project detail document
//! splash_file = "img/splash.jpg"  # Per-project splash image
//! thumb_file = "thumb.jpg"        # Per-project listing thumbnail
//! default_splash = "./img/splash.jpg"
//!
//! [gallery]
//! page_size = 9
//! excluded_categories = ["in_process", "drawings"]
//!
//! [listing]
//! default_sort = "id"             # id | name | year | area
//! filter_columns = ["program", "location"]
//!
//! [animation]
//! duration_ms = 600
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::list::Column;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Where the documents live and how asset paths are built.
    pub content: ContentConfig,
    /// Gallery paging and category policy.
    pub gallery: GalleryConfig,
    /// Initial listing state.
    pub listing: ListingConfig,
    /// Panel transition timing.
    pub animation: AnimationConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.content.toc.trim().is_empty() {
            return Err(ConfigError::Validation(
                "content.toc must not be empty".into(),
            ));
        }
        if self.gallery.page_size == 0 {
            return Err(ConfigError::Validation(
                "gallery.page_size must be at least 1".into(),
            ));
        }
        if self.animation.duration_ms == 0 {
            return Err(ConfigError::Validation(
                "animation.duration_ms must be positive".into(),
            ));
        }
        if !self.listing.default_sort.is_sortable() {
            return Err(ConfigError::Validation(format!(
                "listing.default_sort: {} is not a sortable column",
                self.listing.default_sort
            )));
        }
        if let Some(col) = self
            .listing
            .filter_columns
            .iter()
            .find(|c| !c.is_filterable())
        {
            return Err(ConfigError::Validation(format!(
                "listing.filter_columns: {col} is not a filterable column"
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContentConfig {
    pub toc: String,
    /// Prepended to every TOC `directory` (e.g. `"../"` when the page is
    /// served from a sub-directory).
    pub base_path: String,
    pub detail_file: String,
    pub splash_file: String,
    pub thumb_file: String,
    /// Splash shown on the home panel pair when nothing is hovered.
    pub default_splash: String,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            toc: "content/toc.json".to_string(),
            base_path: String::new(),
            detail_file: "project.json".to_string(),
            splash_file: "img/splash.jpg".to_string(),
            thumb_file: "thumb.jpg".to_string(),
            default_splash: "./img/splash.jpg".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryConfig {
    /// Images per page in the paged folder grid.
    pub page_size: usize,
    /// Categories never shown in a gallery.
    pub excluded_categories: Vec<String>,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            page_size: 9,
            excluded_categories: vec!["in_process".to_string(), "drawings".to_string()],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ListingConfig {
    pub default_sort: Column,
    pub filter_columns: Vec<Column>,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            default_sort: Column::Id,
            filter_columns: vec![Column::Program, Column::Location],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnimationConfig {
    pub duration_ms: u64,
}

impl AnimationConfig {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self { duration_ms: 600 }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
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

/// Load `config.toml` from the site root as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(root: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = root.join("config.toml");
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
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the site root, over stock defaults.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let overlay = load_raw_config(root)?;
    resolve_config(stock_defaults_value(), overlay)
}

/// Returns a fully-commented stock `config.toml`. Used by `gen-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# Studio Folio Configuration
# ==========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys cause an error.

# ---------------------------------------------------------------------------
# Content documents
# ---------------------------------------------------------------------------
[content]
# Table-of-contents document, relative to the site root.
toc = "content/toc.json"

# Prefix prepended to every project directory listed in the TOC.
# Use "../" when the page is served from a sub-directory.
base_path = ""

# Per-project detail document, relative to the project directory.
detail_file = "project.json"

# Per-project splash image shown next to the table of contents.
splash_file = "img/splash.jpg"

# Per-project thumbnail shown in the listing rows.
thumb_file = "thumb.jpg"

# Splash shown when no project is hovered.
default_splash = "./img/splash.jpg"

# ---------------------------------------------------------------------------
# Gallery
# ---------------------------------------------------------------------------
[gallery]
# Images per page in the folder grid.
page_size = 9

# Categories that never appear in a gallery.
excluded_categories = ["in_process", "drawings"]

# ---------------------------------------------------------------------------
# Listing
# ---------------------------------------------------------------------------
[listing]
# Initial sort column: id, name, year or area.
default_sort = "id"

# Columns offering a filter dropdown: program and/or location.
filter_columns = ["program", "location"]

# ---------------------------------------------------------------------------
# Panel transitions
# ---------------------------------------------------------------------------
[animation]
# Slide duration in milliseconds. Requests made while a slide runs are dropped.
duration_ms = 600
"##
}
