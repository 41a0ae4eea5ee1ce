//! Config validation: unknown-key detection with Levenshtein suggestions
//! and range checks.
//!
//! Two-pass parse: the raw TOML is first walked as a `toml::Value` tree and
//! every dotted key is compared against the known field names, emitting
//! "did you mean?" warnings. Normal serde deserialization follows. Unknown
//! keys only warn; they never break a config.

use std::collections::HashSet;

use super::NoiseCheckerConfig;
use crate::types::band_thresholds::DISPLAY_MAX_DB;

/// A non-fatal config warning (typo, suspicious value).
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref s) = self.suggestion {
            write!(f, " (did you mean '{s}'?)")?;
        }
        Ok(())
    }
}

// ============================================================================
// Known Config Keys
// ============================================================================

/// Every valid dotted key path of `NoiseCheckerConfig`.
///
/// Kept by hand in step with the structs in `noise_config.rs`.
pub fn known_config_keys() -> HashSet<&'static str> {
    let keys: &[&str] = &[
        // [site]
        "site",
        "site.name",
        "site.address",
        "site.room_number",
        "site.zone_type",
        // [recording]
        "recording",
        "recording.auto_record",
        "recording.record_threshold_db",
        "recording.notification_enabled",
        "recording.sample_interval_ms",
        // [calibration]
        "calibration",
        "calibration.metering_floor_db",
        "calibration.metering_scale",
        // [storage]
        "storage",
        "storage.path",
        "storage.recent_limit",
    ];
    keys.iter().copied().collect()
}

// ============================================================================
// TOML Key Walking
// ============================================================================

/// Recursively collect all dotted key paths of a `toml::Value` tree.
///
/// `{ a = { b = 1, c = 2 } }` yields `["a", "a.b", "a.c"]`.
pub fn walk_toml_keys(value: &toml::Value, prefix: &str) -> Vec<String> {
    let mut keys = Vec::new();
    if let Some(table) = value.as_table() {
        for (k, v) in table {
            let path = if prefix.is_empty() {
                k.clone()
            } else {
                format!("{prefix}.{k}")
            };
            keys.push(path.clone());
            if v.is_table() {
                keys.extend(walk_toml_keys(v, &path));
            }
        }
    }
    keys
}

// ============================================================================
// Levenshtein Distance
// ============================================================================

fn levenshtein(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    let b_len = b_chars.len();
    if a.is_empty() {
        return b_len;
    }
    if b_len == 0 {
        return a.chars().count();
    }

    let mut prev: Vec<usize> = (0..=b_len).collect();
    let mut curr = vec![0; b_len + 1];

    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b_chars.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_len]
}

/// Closest known key within edit distance 3. Ties go to the
/// alphabetically first key so suggestions are stable.
pub fn suggest_correction(unknown: &str, known: &HashSet<&str>) -> Option<String> {
    known
        .iter()
        .map(|&k| (levenshtein(unknown, k), k))
        .filter(|(dist, _)| *dist <= 3)
        .min()
        .map(|(_, k)| k.to_string())
}

// ============================================================================
// Unknown Key Validation (entry point)
// ============================================================================

/// Warnings for every unknown key in a raw TOML string. Never fails;
/// syntax errors are reported by serde afterwards.
pub fn validate_unknown_keys(raw_toml: &str) -> Vec<ValidationWarning> {
    let Ok(value) = raw_toml.parse::<toml::Value>() else {
        return Vec::new();
    };

    let known = known_config_keys();
    walk_toml_keys(&value, "")
        .into_iter()
        .filter(|key| !known.contains(key.as_str()))
        .map(|key| ValidationWarning {
            suggestion: suggest_correction(&key, &known),
            message: format!("Unknown config key '{key}'"),
            field: key,
        })
        .collect()
}

// ============================================================================
// Range Validation
// ============================================================================

/// Range checks on a parsed config.
///
/// Returns (errors, warnings): errors are impossible values that must stop
/// the load; warnings are suspicious but usable.
pub fn validate_ranges(config: &NoiseCheckerConfig) -> (Vec<String>, Vec<ValidationWarning>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let threshold = config.recording.record_threshold_db;
    if !threshold.is_finite() || !(0.0..=DISPLAY_MAX_DB).contains(&threshold) {
        errors.push(format!(
            "recording.record_threshold_db = {threshold} is outside the measurable range (0-{DISPLAY_MAX_DB} dB)"
        ));
    } else if threshold < 30.0 {
        warnings.push(ValidationWarning {
            field: "recording.record_threshold_db".to_string(),
            message: format!(
                "recording.record_threshold_db = {threshold:.1} is below typical room ambience; every reading will count as an event"
            ),
            suggestion: None,
        });
    }

    if config.recording.sample_interval_ms == 0 {
        errors.push("recording.sample_interval_ms must be > 0".to_string());
    }

    let cal = &config.calibration;
    if !cal.metering_scale.is_finite() || cal.metering_scale <= 0.0 {
        errors.push(format!(
            "calibration.metering_scale = {} must be a finite value > 0",
            cal.metering_scale
        ));
    }
    if !cal.metering_floor_db.is_finite() {
        errors.push(format!(
            "calibration.metering_floor_db = {} must be finite",
            cal.metering_floor_db
        ));
    } else if cal.metering_floor_db > 0.0 {
        warnings.push(ValidationWarning {
            field: "calibration.metering_floor_db".to_string(),
            message: format!(
                "calibration.metering_floor_db = {:.1} is above 0 dBFS; metering values are normally negative",
                cal.metering_floor_db
            ),
            suggestion: None,
        });
    }

    if config.storage.path.trim().is_empty() {
        errors.push("storage.path must not be empty".to_string());
    }
    if config.storage.recent_limit == 0 {
        errors.push("storage.recent_limit must be > 0".to_string());
    }

    (errors, warnings)
}
