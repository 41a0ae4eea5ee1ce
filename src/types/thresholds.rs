//! Noise thresholds: band boundaries, environmental standard table, and
//! time-of-day boundaries

/// Decibel boundaries between noise level bands.
///
/// Each boundary belongs to the band above it.
pub mod band_thresholds {
    /// Readings below this are quiet (dB)
    pub const MODERATE_MIN_DB: f64 = 40.0;
    /// Readings below this (and at or above `MODERATE_MIN_DB`) are moderate (dB)
    pub const NOISY_MIN_DB: f64 = 60.0;
    /// Readings at or above this are severe (dB)
    pub const SEVERE_MIN_DB: f64 = 80.0;
    /// Upper end of the severe band for display purposes only (dB).
    /// Classification never caps at this value.
    pub const DISPLAY_MAX_DB: f64 = 150.0;
}

/// Legal reference levels by time of day and zone (dB)
pub mod environmental_standards {
    pub const DAY_RESIDENTIAL_DB: u32 = 55;
    pub const DAY_COMMERCIAL_DB: u32 = 60;
    pub const NIGHT_RESIDENTIAL_DB: u32 = 45;
    pub const NIGHT_COMMERCIAL_DB: u32 = 50;

    /// First local hour counted as daytime
    pub const DAY_START_HOUR: u32 = 6;
    /// First local hour counted as night-time
    pub const NIGHT_START_HOUR: u32 = 22;
}

/// A session whose peak reaches this level counts as a noise event in
/// history aggregates (dB).
pub const NOISE_EVENT_MIN_DB: f64 = band_thresholds::NOISY_MIN_DB;
