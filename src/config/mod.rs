//! Configuration management for the VST post-process sample
//!
//! This module handles loading, parsing, and saving configuration from:
//! 1. Embedded default_config.toml (compile-time defaults)
//! 2. User config at ~/.config/vst-postprocess/config.toml (or platform-specific location)
//! 3. Project-local config at ./.vst-postprocess/config.toml
//!
//! Later sources override earlier ones key by key; keys no source sets fall
//! back to the built-in defaults.

use crate::app::state::{AppState, General, PostProcess};
use crate::error::{ConfigError, ConfigResult};
use crate::logging::{parse_level, LogFormat, LoggingConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::Level;

/// Default configuration embedded in binary
const DEFAULT_CONFIG: &str = include_str!("../../default_config.toml");

/// Directory name used under the platform config dir and the project dir
const APP_DIR: &str = "vst-postprocess";

const EMBEDDED_ORIGIN: &str = "<embedded default_config.toml>";

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub general: GeneralSettings,
    #[serde(default)]
    pub post_process: PostProcess,
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Startup values for the general section of [`AppState`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralSettings {
    #[serde(default = "default_true")]
    pub vst_enabled: bool,
    #[cfg(not(feature = "headless"))]
    #[serde(default)]
    pub vr_enabled: bool,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            vst_enabled: true,
            #[cfg(not(feature = "headless"))]
            vr_enabled: false,
        }
    }
}

/// Logging settings as written in the config file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default = "default_true")]
    pub timestamps: bool,
    #[serde(default)]
    pub file_line: bool,
    #[serde(default)]
    pub file_output: bool,
    #[serde(default)]
    pub file_path: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            timestamps: true,
            file_line: false,
            file_output: false,
            file_path: None,
        }
    }
}

impl LoggingSettings {
    /// Convert into the runtime logging configuration
    #[must_use]
    pub fn to_logging_config(&self) -> LoggingConfig {
        LoggingConfig {
            level: parse_level(&self.level).unwrap_or(Level::INFO),
            format: LogFormat::parse(&self.format).unwrap_or(LogFormat::Pretty),
            timestamps: self.timestamps,
            file_line: self.file_line,
            file_output: self.file_output,
            file_path: self.file_path.clone(),
        }
    }

    /// Replace the configured level with one given on the command line
    pub fn override_level(&mut self, level: Option<&str>) {
        if let Some(level) = level {
            self.level = level.to_string();
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_true() -> bool {
    true
}

/// Settings produced by layering config files, plus which files took part.
///
/// Loading happens before logging is set up, so the outcome is kept here
/// and reported through [`LayeredSettings::log_layers`] afterwards.
#[derive(Debug)]
pub struct LayeredSettings {
    pub settings: Settings,
    /// Files merged into `settings`, in order
    pub loaded: Vec<PathBuf>,
    /// Files that existed but were left out, with the reason
    pub skipped: Vec<(PathBuf, ConfigError)>,
}

impl LayeredSettings {
    /// Wrap a single explicitly chosen file; any failure is an error
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        Ok(Self {
            settings: Settings::load_from_file(path)?,
            loaded: vec![path.to_path_buf()],
            skipped: Vec::new(),
        })
    }

    /// Emit one event per layer
    pub fn log_layers(&self) {
        for path in &self.loaded {
            tracing::info!(path = %path.display(), "Loaded config");
        }
        for (path, error) in &self.skipped {
            tracing::warn!(path = %path.display(), %error, "Skipping config");
        }
    }
}

// ============================================================================
// Configuration loading
// ============================================================================

impl Settings {
    /// Load configuration with fallback chain:
    /// 1. Embedded default_config.toml
    /// 2. User config ~/.config/vst-postprocess/config.toml
    /// 3. Project-local .vst-postprocess/config.toml
    pub fn load() -> ConfigResult<LayeredSettings> {
        let candidates: Vec<PathBuf> = [Self::user_config_path(), Self::project_config_path()]
            .into_iter()
            .flatten()
            .collect();
        Self::load_layers(&candidates)
    }

    /// Layer the given files over the embedded defaults, key by key.
    ///
    /// Missing files are ignored. A file that cannot be read, is not valid
    /// TOML, or holds a value of the wrong type is left out entirely and
    /// recorded in [`LayeredSettings::skipped`].
    pub fn load_layers(paths: &[PathBuf]) -> ConfigResult<LayeredSettings> {
        let origin = Path::new(EMBEDDED_ORIGIN);
        let mut table = parse_table(DEFAULT_CONFIG, origin)?;
        let mut settings = table_to_settings(&table, origin)?;
        let mut loaded = Vec::new();
        let mut skipped = Vec::new();

        for path in paths {
            if !path.exists() {
                continue;
            }
            let layered = std::fs::read_to_string(path)
                .map_err(|e| ConfigError::Io {
                    path: path.clone(),
                    reason: e.to_string(),
                })
                .and_then(|contents| parse_table(&contents, path))
                .and_then(|layer| {
                    let mut candidate = table.clone();
                    merge_tables(&mut candidate, layer);
                    let parsed = table_to_settings(&candidate, path)?;
                    Ok((candidate, parsed))
                });
            match layered {
                Ok((candidate, parsed)) => {
                    table = candidate;
                    settings = parsed;
                    loaded.push(path.clone());
                }
                Err(e) => skipped.push((path.clone(), e)),
            }
        }

        Ok(LayeredSettings {
            settings,
            loaded,
            skipped,
        })
    }

    /// Parse the embedded defaults
    pub fn embedded() -> ConfigResult<Self> {
        Self::from_toml_str(DEFAULT_CONFIG, Path::new(EMBEDDED_ORIGIN))
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_toml_str(&contents, path)
    }

    fn from_toml_str(contents: &str, origin: &Path) -> ConfigResult<Self> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse {
            path: origin.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Get the user config path (~/.config/vst-postprocess/config.toml)
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|config_dir| config_dir.join(APP_DIR).join("config.toml"))
    }

    /// Get the project-local config path (./.vst-postprocess/config.toml)
    pub fn project_config_path() -> Option<PathBuf> {
        std::env::current_dir()
            .ok()
            .map(|cwd| cwd.join(format!(".{APP_DIR}")).join("config.toml"))
    }

    /// Save configuration to the given path, creating parent directories
    pub fn save_to(&self, path: &Path) -> ConfigResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                reason: e.to_string(),
            })?;
        }

        let toml_string =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?;

        std::fs::write(path, toml_string).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }

    /// Validate and build the initial application state
    pub fn into_app_state(self) -> ConfigResult<AppState> {
        self.post_process.validate()?;

        let general = General {
            vst_enabled: self.general.vst_enabled,
            #[cfg(not(feature = "headless"))]
            vr_enabled: self.general.vr_enabled,
            ..General::default()
        };

        Ok(AppState {
            general,
            post_process: self.post_process,
        })
    }
}

fn table_to_settings(table: &toml::Table, origin: &Path) -> ConfigResult<Settings> {
    toml::Value::Table(table.clone())
        .try_into()
        .map_err(|e: toml::de::Error| ConfigError::Parse {
            path: origin.to_path_buf(),
            reason: e.to_string(),
        })
}

fn parse_table(contents: &str, origin: &Path) -> ConfigResult<toml::Table> {
    contents.parse::<toml::Table>().map_err(|e| ConfigError::Parse {
        path: origin.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Recursively merge `overlay` into `base`; overlay values win.
fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(existing)), toml::Value::Table(incoming)) => {
                merge_tables(existing, incoming);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::embedded().unwrap_or_else(|_| Self {
            general: GeneralSettings::default(),
            post_process: PostProcess::default(),
            logging: LoggingSettings::default(),
        })
    }
}
