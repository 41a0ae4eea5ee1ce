//! Metering-to-decibel conversion.
//!
//! Platform recorders report a metering level (roughly -160 to 0 dBFS), not
//! a calibrated sound pressure level. How that maps to dB SPL depends on the
//! device, so conversion sits behind a trait and the linear rescale below is
//! only a default.

use crate::analysis::round1;
use crate::config::CalibrationConfig;

/// Turns a raw platform metering value into a decibel reading.
pub trait MeteringConverter: Send + Sync {
    fn to_db(&self, metering: f64) -> f64;

    /// Human-readable name for logging
    fn name(&self) -> &str;
}

/// `(metering - floor_db) * scale`, rounded to one decimal.
///
/// With the defaults (-160, 0.625) the metering range -160..0 maps onto
/// 0..100 dB. Uncalibrated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearMeteringConverter {
    pub floor_db: f64,
    pub scale: f64,
}

impl LinearMeteringConverter {
    pub fn new(floor_db: f64, scale: f64) -> Self {
        Self { floor_db, scale }
    }

    pub fn from_config(cfg: &CalibrationConfig) -> Self {
        Self::new(cfg.metering_floor_db, cfg.metering_scale)
    }
}

impl Default for LinearMeteringConverter {
    fn default() -> Self {
        Self::from_config(&CalibrationConfig::default())
    }
}

impl MeteringConverter for LinearMeteringConverter {
    fn to_db(&self, metering: f64) -> f64 {
        round1((metering - self.floor_db) * self.scale)
    }

    fn name(&self) -> &str {
        "linear"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_maps_full_range_to_0_100() {
        let conv = LinearMeteringConverter::default();
        assert_eq!(conv.to_db(-160.0), 0.0);
        assert_eq!(conv.to_db(0.0), 100.0);
        assert_eq!(conv.to_db(-80.0), 50.0);
    }

    #[test]
    fn test_rounds_to_one_decimal() {
        let conv = LinearMeteringConverter::default();
        // (-70.33 + 160) * 0.625 = 56.04375
        assert_eq!(conv.to_db(-70.33), 56.0);
    }

    #[test]
    fn test_custom_calibration() {
        let conv = LinearMeteringConverter::new(-120.0, 1.0);
        assert_eq!(conv.to_db(-60.0), 60.0);
    }
}
