//! System-wide default constants, grouped by subsystem.

// ============================================================================
// Config loading
// ============================================================================

/// Environment variable naming a config file path.
pub const CONFIG_ENV_VAR: &str = "NOISE_CHECKER_CONFIG";

/// Config file looked up in the working directory when the env var is unset.
pub const LOCAL_CONFIG_FILE: &str = "noise_checker.toml";

// ============================================================================
// Recording
// ============================================================================

/// Level at or above which a reading counts as a noise event (dB).
pub const RECORD_THRESHOLD_DB: f64 = 60.0;

/// Metering poll interval of the capture collaborator (ms).
pub const SAMPLE_INTERVAL_MS: u64 = 100;

// ============================================================================
// Calibration
// ============================================================================

/// Platform metering floor (dBFS). Maps to 0 dB.
pub const METERING_FLOOR_DB: f64 = -160.0;

/// Linear scale applied after the floor offset.
///
/// `0.625 * 160 = 100`, so the full metering range spans 0-100 dB.
pub const METERING_SCALE: f64 = 0.625;

// ============================================================================
// Storage
// ============================================================================

/// Default session store directory.
pub const STORE_PATH: &str = "./data/sessions";

/// Default number of sessions returned by "recent" listings.
pub const RECENT_LIMIT: usize = 20;
