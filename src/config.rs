//! Generator configuration module.
//!
//! Handles loading, validating, and merging `sitemap.toml`. Stock defaults
//! are overridden by the user's file, and command-line flags override both.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! pretty_print = true              # Indented, multi-line XML
//!
//! [collection]
//! max_urls_per_sitemap = 50000     # Chunk size, 1-50000
//! prefix = "sitemap"               # Chunks are named {prefix}-{n}.xml
//! index_filename = "sitemap-index.xml"
//!
//! [processing]
//! max_threads = 4                  # Parallel chunk rendering (omit for auto)
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse. Override just the values you want:
//!
//! ```toml
//! [collection]
//! max_urls_per_sitemap = 10000
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::collection::CollectionOptions;
use crate::generate::GenerateOptions;
use crate::naming::{ChunkNaming, DEFAULT_PREFIX};
use crate::validate::{self, MAX_URLS_PER_SITEMAP};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CONFIG_FILE_NAME: &str = "sitemap.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The file itself is not valid TOML.
    #[error("invalid TOML in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    /// Valid TOML that does not fit the config schema (unknown key, wrong type).
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Generator configuration loaded from `sitemap.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SitemapConfig {
    /// Indent output documents.
    pub pretty_print: bool,
    /// Partitioning settings for `collection`.
    pub collection: CollectionConfig,
    /// Parallel rendering settings.
    pub processing: ProcessingConfig,
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            pretty_print: true,
            collection: CollectionConfig::default(),
            processing: ProcessingConfig::default(),
        }
    }
}

impl SitemapConfig {
    /// Validate config values are within acceptable ranges.
    ///
    /// Range checks reuse the generator's own messages so a bad config file
    /// reads the same as a bad API call.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate::max_urls_per_sitemap(self.collection.max_urls_per_sitemap)
            .map_err(|e| ConfigError::Validation(format!("collection.max_urls_per_sitemap: {e}")))?;
        validate::prefix_length(&self.collection.prefix)
            .map_err(|e| ConfigError::Validation(format!("collection.prefix: {e}")))?;
        if self.collection.prefix.contains('/') {
            return Err(ConfigError::Validation(
                "collection.prefix must not contain '/'".into(),
            ));
        }
        if self.collection.index_filename.is_empty() || self.collection.index_filename.contains('/') {
            return Err(ConfigError::Validation(
                "collection.index_filename must be a plain file name".into(),
            ));
        }
        if self.processing.max_threads == Some(0) {
            return Err(ConfigError::Validation(
                "processing.max_threads must be at least 1".into(),
            ));
        }
        Ok(())
    }

    pub fn generate_options(&self) -> GenerateOptions {
        GenerateOptions {
            pretty_print: self.pretty_print,
        }
    }

    pub fn collection_options(&self) -> CollectionOptions {
        CollectionOptions {
            max_urls_per_sitemap: self.collection.max_urls_per_sitemap,
            naming: ChunkNaming::prefix(self.collection.prefix.clone()),
            pretty_print: self.pretty_print,
            today: None,
        }
    }
}

/// Partitioning settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CollectionConfig {
    /// URLs per chunk document.
    pub max_urls_per_sitemap: usize,
    /// Chunk file prefix: `{prefix}-{n}.xml`.
    pub prefix: String,
    /// File name the sitemap index is written to.
    pub index_filename: String,
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self {
            max_urls_per_sitemap: MAX_URLS_PER_SITEMAP,
            prefix: DEFAULT_PREFIX.to_string(),
            index_filename: "sitemap-index.xml".to_string(),
        }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of threads rendering chunks.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_threads: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.max_threads.map(|n| n.min(cores)).unwrap_or(cores)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged on top of.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SitemapConfig::default()).expect("default config must serialize")
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

/// Load `sitemap.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the directory has no `sitemap.toml`.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path).map_err(|source| ConfigError::Io {
        path: config_path.clone(),
        source,
    })?;
    let value: toml::Value = toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: config_path.clone(),
        source,
    })?;
    tracing::debug!(path = %config_path.display(), "read sitemap config");
    Ok(Some(value))
}

/// Merge an optional overlay onto the base, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SitemapConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SitemapConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `sitemap.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(dir: &Path) -> Result<SitemapConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(dir)?;
    let config = resolve_config(base, overlay)?;
    tracing::debug!(dir = %dir.display(), ?config, "loaded config");
    Ok(config)
}

/// Returns a fully-commented stock `sitemap.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Simple Sitemap Configuration
# ============================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
# Unknown keys will cause an error.

# Indent generated XML with two spaces. Set to false for single-line output.
pretty_print = true

# ---------------------------------------------------------------------------
# Sitemap collections (large URL sets split across several files)
# ---------------------------------------------------------------------------
[collection]
# URLs per sitemap file. The protocol allows at most 50000.
max_urls_per_sitemap = 50000

# Chunk files are named {prefix}-{n}.xml, counting from 0.
prefix = "sitemap"

# File the sitemap index is written to, next to the chunk files.
index_filename = "sitemap-index.xml"

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum threads used to render chunks in parallel.
# Omit to use all CPU cores. Values above the core count are clamped.
# max_threads = 4
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_values() {
        let config = SitemapConfig::default();
        assert!(config.pretty_print);
        assert_eq!(config.collection.max_urls_per_sitemap, 50_000);
        assert_eq!(config.collection.prefix, "sitemap");
        assert_eq!(config.collection.index_filename, "sitemap-index.xml");
        assert_eq!(config.processing.max_threads, None);
    }

    #[test]
    fn parse_partial_config() {
        let toml = r#"
[collection]
max_urls_per_sitemap = 1000
"#;
        let config: SitemapConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.collection.max_urls_per_sitemap, 1000);
        // Defaults preserved
        assert_eq!(config.collection.prefix, "sitemap");
        assert!(config.pretty_print);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let toml = r#"
[collection]
max_url_per_sitemap = 1000
"#;
        assert!(toml::from_str::<SitemapConfig>(toml).is_err());
    }

    #[test]
    fn options_follow_config() {
        let config = SitemapConfig {
            pretty_print: false,
            collection: CollectionConfig {
                max_urls_per_sitemap: 10,
                prefix: "posts".into(),
                ..CollectionConfig::default()
            },
            ..SitemapConfig::default()
        };
        assert_eq!(config.generate_options(), GenerateOptions::compact());
        let options = config.collection_options();
        assert_eq!(options.max_urls_per_sitemap, 10);
        assert!(!options.pretty_print);
        assert_eq!(
            options.naming.location("http://www.example.com", 1),
            "http://www.example.com/posts-1.xml"
        );
        assert!(options.today.is_none());
    }

    // =========================================================================
    // validate tests
    // =========================================================================

    #[test]
    fn validate_rejects_chunk_size_out_of_range() {
        for bad in [0, 50_001] {
            let mut config = SitemapConfig::default();
            config.collection.max_urls_per_sitemap = bad;
            let err = config.validate().unwrap_err();
            assert!(matches!(err, ConfigError::Validation(_)));
            assert!(err.to_string().contains("Max URLs per sitemap must be between 1 and 50,000"));
        }
    }

    #[test]
    fn validate_rejects_long_prefix() {
        let mut config = SitemapConfig::default();
        config.collection.prefix = "a".repeat(2049);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("Prefix must be less than 2048 characters"));
    }

    #[test]
    fn validate_rejects_path_like_names() {
        let mut config = SitemapConfig::default();
        config.collection.prefix = "maps/sitemap".into();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));

        let mut config = SitemapConfig::default();
        config.collection.index_filename = String::new();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validate_rejects_zero_threads() {
        let mut config = SitemapConfig::default();
        config.processing.max_threads = Some(0);
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn effective_threads_clamps_to_cores() {
        let cores = std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1);
        assert_eq!(effective_threads(&ProcessingConfig::default()), cores);
        let capped = ProcessingConfig {
            max_threads: Some(cores + 10),
        };
        assert_eq!(effective_threads(&capped), cores);
        let one = ProcessingConfig {
            max_threads: Some(1),
        };
        assert_eq!(effective_threads(&one), 1);
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config, SitemapConfig::default());
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE_NAME),
            r#"
pretty_print = false

[collection]
prefix = "posts"
"#,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert!(!config.pretty_print);
        assert_eq!(config.collection.prefix, "posts");
        // Unspecified values should be defaults
        assert_eq!(config.collection.max_urls_per_sitemap, 50_000);
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE_NAME), "pretty_print = [[[").unwrap();
        let err = load_config(tmp.path()).unwrap_err();
        assert!(matches!(&err, ConfigError::Parse { path, .. } if path.ends_with(CONFIG_FILE_NAME)));
        assert!(err.to_string().contains(CONFIG_FILE_NAME));
    }

    #[test]
    fn unreadable_config_names_the_file() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join(CONFIG_FILE_NAME)).unwrap();
        let err = load_config(tmp.path()).unwrap_err();
        assert!(matches!(&err, ConfigError::Io { path, .. } if path.ends_with(CONFIG_FILE_NAME)));
        assert!(err.to_string().starts_with("cannot read "));
    }

    #[test]
    fn schema_errors_surface_after_merge() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE_NAME), "pretty_print = \"yes\"\n").unwrap();
        assert!(matches!(load_config(tmp.path()), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn load_config_validates_result() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE_NAME),
            "[collection]\nmax_urls_per_sitemap = 0\n",
        )
        .unwrap();
        assert!(matches!(load_config(tmp.path()), Err(ConfigError::Validation(_))));
    }

    // =========================================================================
    // merge_toml tests
    // =========================================================================

    #[test]
    fn merge_overrides_nested_keys_only() {
        let base = stock_defaults_value();
        let overlay: toml::Value = toml::from_str("[collection]\nprefix = \"news\"\n").unwrap();
        let config = resolve_config(base, Some(overlay)).unwrap();
        assert_eq!(config.collection.prefix, "news");
        assert_eq!(config.collection.index_filename, "sitemap-index.xml");
    }

    #[test]
    fn merge_non_table_overlay_replaces() {
        let base: toml::Value = toml::from_str("a = 1").unwrap();
        let overlay: toml::Value = toml::from_str("a = 2").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged.get("a").and_then(|v| v.as_integer()), Some(2));
    }

    // =========================================================================
    // stock config tests
    // =========================================================================

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let config: SitemapConfig = toml::from_str(stock_config_toml()).unwrap();
        assert_eq!(config, SitemapConfig::default());
    }

    #[test]
    fn stock_config_toml_contains_all_sections() {
        let content = stock_config_toml();
        assert!(content.contains("[collection]"));
        assert!(content.contains("[processing]"));
    }

    #[test]
    fn stock_defaults_value_has_all_sections() {
        let val = stock_defaults_value();
        assert!(val.is_table());
        assert!(val.get("collection").is_some());
        assert!(val.get("processing").is_some());
    }
}
