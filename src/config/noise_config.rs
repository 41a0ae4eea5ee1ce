//! Noise Checker configuration: site, recording, calibration and storage
//! settings as operator-tunable TOML values
//!
//! Every struct implements `Default` with the built-in values, so a missing
//! file or a partial file behaves exactly like the defaults for the keys it
//! leaves out.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::defaults;
use crate::types::ZoneType;

// ============================================================================
// Config Provenance
// ============================================================================

/// Which dotted key paths were explicitly present in the user's TOML file.
///
/// After deserialization every `#[serde(default)]` field has a value; this
/// keeps the distinction between "set by the user" and "defaulted".
#[derive(Debug, Clone, Default)]
pub struct ConfigProvenance {
    pub explicit_keys: HashSet<String>,
}

impl ConfigProvenance {
    /// e.g. `provenance.is_user_set("site.zone_type")`
    pub fn is_user_set(&self, dotted_key: &str) -> bool {
        self.explicit_keys.contains(dotted_key)
    }
}

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration.
///
/// `NoiseCheckerConfig::load()` searches:
/// 1. `$NOISE_CHECKER_CONFIG`
/// 2. `./noise_checker.toml`
/// 3. Built-in defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NoiseCheckerConfig {
    /// Where measurements are taken
    #[serde(default)]
    pub site: SiteInfo,

    /// Capture behaviour
    #[serde(default)]
    pub recording: RecordingConfig,

    /// Metering-to-dB conversion
    #[serde(default)]
    pub calibration: CalibrationConfig,

    /// Session store location
    #[serde(default)]
    pub storage: StorageConfig,
}

impl NoiseCheckerConfig {
    /// Load using the standard search order. Never fails: a broken file is
    /// logged and skipped.
    pub fn load() -> Self {
        Self::load_with_provenance().0
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let (config, _provenance) = Self::load_from_file_with_provenance(path)?;
        Ok(config)
    }

    /// Load from a specific TOML file path, also returning which keys the
    /// user set explicitly.
    pub fn load_from_file_with_provenance(path: &Path) -> Result<(Self, ConfigProvenance), ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        let (config, provenance) = Self::parse_with_provenance(&contents)
            .map_err(|e| match e {
                ConfigError::Parse(_, err) => ConfigError::Parse(path.to_path_buf(), err),
                other => other,
            })?;
        Ok((config, provenance))
    }

    /// Parse a TOML document: warn on unknown keys, deserialize, validate.
    pub fn parse_with_provenance(contents: &str) -> Result<(Self, ConfigProvenance), ConfigError> {
        for w in super::validation::validate_unknown_keys(contents) {
            warn!("{}", w);
        }

        let provenance = ConfigProvenance {
            explicit_keys: contents
                .parse::<toml::Value>()
                .map(|v| super::validation::walk_toml_keys(&v, "").into_iter().collect())
                .unwrap_or_default(),
        };

        let config: Self = toml::from_str(contents).map_err(|e| ConfigError::Parse(PathBuf::new(), e))?;
        config.validate()?;
        Ok((config, provenance))
    }

    /// Standard search order, returning provenance as well.
    pub fn load_with_provenance() -> (Self, ConfigProvenance) {
        // 1. Env var
        if let Ok(path) = std::env::var(defaults::CONFIG_ENV_VAR) {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file_with_provenance(&p) {
                    Ok((config, provenance)) => {
                        info!(path = %p.display(), site = %config.site.name, "Loaded config from {}", defaults::CONFIG_ENV_VAR);
                        return (config, provenance);
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "Failed to load config from {}, falling back", defaults::CONFIG_ENV_VAR);
                    }
                }
            } else {
                warn!(path = %path, "{} points to a non-existent file, falling back", defaults::CONFIG_ENV_VAR);
            }
        }

        // 2. Working directory
        let local = PathBuf::from(defaults::LOCAL_CONFIG_FILE);
        if local.exists() {
            match Self::load_from_file_with_provenance(&local) {
                Ok((config, provenance)) => {
                    info!(site = %config.site.name, "Loaded config from ./{}", defaults::LOCAL_CONFIG_FILE);
                    return (config, provenance);
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./{}, using defaults", defaults::LOCAL_CONFIG_FILE);
                }
            }
        }

        // 3. Defaults
        info!("No {} found, using built-in defaults", defaults::LOCAL_CONFIG_FILE);
        (Self::default(), ConfigProvenance::default())
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = self.to_toml()?;
        std::fs::write(path, contents).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        info!(path = %path.display(), "Config saved");
        Ok(())
    }

    /// Collect every range problem; suspicious-but-usable values are logged.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (errors, warnings) = super::validation::validate_ranges(self);
        for w in &warnings {
            warn!("{}", w);
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(PathBuf, std::io::Error),
    Parse(PathBuf, toml::de::Error),
    Serialize(toml::ser::Error),
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(path, e) => write!(f, "Config I/O error ({}): {}", path.display(), e),
            ConfigError::Parse(path, e) => write!(f, "Config parse error ({}): {}", path.display(), e),
            ConfigError::Serialize(e) => write!(f, "Config serialization error: {}", e),
            ConfigError::Validation(errors) => {
                writeln!(f, "Config validation failed:")?;
                for e in errors {
                    writeln!(f, "  - {}", e)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Site
// ============================================================================

/// Identification metadata; appears in reports. `zone_type` selects the
/// environmental standard column.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteInfo {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub address: String,

    #[serde(default)]
    pub room_number: String,

    /// "residential" or "commercial"
    #[serde(default)]
    pub zone_type: ZoneType,
}

// ============================================================================
// Recording
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordingConfig {
    /// Start recording automatically when the threshold is crossed
    #[serde(default = "default_true")]
    pub auto_record: bool,

    /// Readings at or above this count as noise events (dB)
    #[serde(default = "default_record_threshold")]
    pub record_threshold_db: f64,

    #[serde(default = "default_true")]
    pub notification_enabled: bool,

    /// Metering poll interval (ms)
    #[serde(default = "default_sample_interval")]
    pub sample_interval_ms: u64,
}

fn default_true() -> bool { true }
fn default_record_threshold() -> f64 { defaults::RECORD_THRESHOLD_DB }
fn default_sample_interval() -> u64 { defaults::SAMPLE_INTERVAL_MS }

impl Default for RecordingConfig {
    fn default() -> Self {
        Self {
            auto_record: true,
            record_threshold_db: default_record_threshold(),
            notification_enabled: true,
            sample_interval_ms: default_sample_interval(),
        }
    }
}

// ============================================================================
// Calibration
// ============================================================================

/// Parameters of the linear metering conversion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalibrationConfig {
    #[serde(default = "default_metering_floor")]
    pub metering_floor_db: f64,

    #[serde(default = "default_metering_scale")]
    pub metering_scale: f64,
}

fn default_metering_floor() -> f64 { defaults::METERING_FLOOR_DB }
fn default_metering_scale() -> f64 { defaults::METERING_SCALE }

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            metering_floor_db: default_metering_floor(),
            metering_scale: default_metering_scale(),
        }
    }
}

// ============================================================================
// Storage
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_store_path")]
    pub path: String,

    /// Sessions shown by "recent" listings
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,
}

fn default_store_path() -> String { defaults::STORE_PATH.to_string() }
fn default_recent_limit() -> usize { defaults::RECENT_LIMIT }

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
            recent_limit: default_recent_limit(),
        }
    }
}
