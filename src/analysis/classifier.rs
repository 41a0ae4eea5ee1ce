//! Decibel classifier: one reading to one of four ordered bands

use crate::types::{NoiseLevel, NoiseLevelBand};
use crate::types::band_thresholds::{MODERATE_MIN_DB, NOISY_MIN_DB, SEVERE_MIN_DB};

/// Severity level of a single reading.
///
/// Boundaries belong to the higher band (40.0 is moderate, 80.0 is severe).
/// Input is not validated: negative values are quiet and there is no upper cap.
pub fn classify_level(db: f64) -> NoiseLevel {
    if db < MODERATE_MIN_DB {
        NoiseLevel::Quiet
    } else if db < NOISY_MIN_DB {
        NoiseLevel::Moderate
    } else if db < SEVERE_MIN_DB {
        NoiseLevel::Noisy
    } else {
        NoiseLevel::Severe
    }
}

/// Band reference data for a single reading
pub fn classify(db: f64) -> &'static NoiseLevelBand {
    classify_level(db).band()
}
