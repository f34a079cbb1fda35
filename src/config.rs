//! Persisted user defaults.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{DiffOptions, Granularity, OversizePolicy, DEFAULT_MAX_CELLS};
use crate::render::{ColorMode, OutputFormat};

/// Cached config directory path.
static CONFIG_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Get the textdiff config directory (cached).
pub fn config_dir() -> &'static Path {
    CONFIG_DIR.get_or_init(|| {
        directories::ProjectDirs::from("", "", "textdiff")
            .map(|d| d.config_dir().to_path_buf())
            .unwrap_or_else(dirs_fallback)
    })
}

/// Default location of `config.json`.
pub fn default_config_path() -> PathBuf {
    config_dir().join("config.json")
}

/// Errors loading or saving the config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading or writing the file failed.
    #[error("config io error at {path}: {source}")]
    Io {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid config JSON.
    #[error("invalid config at {path}: {source}")]
    Parse {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },
}

/// User defaults. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Token unit.
    pub granularity: Granularity,
    /// Output format.
    pub format: OutputFormat,
    /// Colour mode for ANSI output.
    pub color: ColorMode,
    /// Edit-graph cap.
    pub max_cells: usize,
    /// Fail instead of degrading past the cap.
    pub strict: bool,
}

/// Command-line values that take precedence over the file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    /// Token unit.
    pub granularity: Option<Granularity>,
    /// Output format.
    pub format: Option<OutputFormat>,
    /// Colour mode.
    pub color: Option<ColorMode>,
    /// Edit-graph cap.
    pub max_cells: Option<usize>,
    /// Force strict mode on.
    pub strict: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            granularity: Granularity::Char,
            format: OutputFormat::Ansi,
            color: ColorMode::Auto,
            max_cells: DEFAULT_MAX_CELLS,
            strict: false,
        }
    }
}

impl Config {
    /// Load from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from the default location, falling back to defaults on any error.
    pub fn load_default() -> Self {
        let path = default_config_path();
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("ignoring config: {}", e);
                Self::default()
            }
        }
    }

    /// Save to `path` (atomic write).
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }

        // Atomic write: temp file + rename
        let temp_path = path.with_extension("json.tmp");
        let content = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(&temp_path, content).map_err(io_err)?;
        std::fs::rename(&temp_path, path).map_err(io_err)?;
        Ok(())
    }

    /// Replace fields with any values set in `overrides`.
    pub fn apply(&mut self, overrides: &ConfigOverrides) {
        if let Some(granularity) = overrides.granularity {
            self.granularity = granularity;
        }
        if let Some(format) = overrides.format {
            self.format = format;
        }
        if let Some(color) = overrides.color {
            self.color = color;
        }
        if let Some(max_cells) = overrides.max_cells {
            self.max_cells = max_cells;
        }
        self.strict |= overrides.strict;
    }

    /// Engine options described by this config.
    pub fn diff_options(&self) -> DiffOptions {
        DiffOptions::default()
            .with_granularity(self.granularity)
            .with_max_cells(self.max_cells)
            .with_oversize(if self.strict {
                OversizePolicy::Fail
            } else {
                OversizePolicy::Degrade
            })
    }
}

/// Fallback config directory if `directories` fails.
fn dirs_fallback() -> PathBuf {
    std::env::var("HOME")
        .map(|h| Path::new(&h).join(".config").join("textdiff"))
        .unwrap_or_else(|_| PathBuf::from(".textdiff"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"granularity":"word","strict":true,"unknown":1}"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.granularity, Granularity::Word);
        assert!(config.strict);
        assert_eq!(config.max_cells, DEFAULT_MAX_CELLS);
        assert_eq!(config.diff_options().oversize, OversizePolicy::Fail);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn overrides_replace_only_set_fields() {
        let mut config = Config {
            format: OutputFormat::Json,
            max_cells: 64,
            ..Config::default()
        };
        config.apply(&ConfigOverrides {
            granularity: Some(Granularity::Line),
            max_cells: Some(128),
            ..ConfigOverrides::default()
        });
        assert_eq!(config.granularity, Granularity::Line);
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.max_cells, 128);
        assert!(!config.strict);

        config.apply(&ConfigOverrides {
            strict: true,
            ..ConfigOverrides::default()
        });
        assert!(config.strict);
        config.apply(&ConfigOverrides::default());
        assert!(config.strict);
    }

    #[test]
    fn saved_overrides_become_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let mut config = Config::load_from(&path).unwrap();
        config.apply(&ConfigOverrides {
            granularity: Some(Granularity::Word),
            color: Some(ColorMode::Never),
            strict: true,
            ..ConfigOverrides::default()
        });
        config.save_to(&path).unwrap();

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded, config);
        assert_eq!(reloaded.diff_options().granularity, Granularity::Word);
        assert_eq!(reloaded.diff_options().oversize, OversizePolicy::Fail);
    }

    #[test]
    fn save_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = Config {
            format: OutputFormat::Json,
            max_cells: 1024,
            ..Config::default()
        };
        config.save_to(&path).unwrap();
        assert!(!path.with_extension("json.tmp").exists());
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }
}
