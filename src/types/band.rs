//! Noise level bands: the four ordered severity ranges and their display data

use serde::{Deserialize, Serialize};

use super::thresholds::band_thresholds::{
    DISPLAY_MAX_DB, MODERATE_MIN_DB, NOISY_MIN_DB, SEVERE_MIN_DB,
};

/// Severity band for a decibel reading
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum NoiseLevel {
    Quiet = 0,
    Moderate = 1,
    Noisy = 2,
    Severe = 3,
}

impl NoiseLevel {
    /// All bands in ascending severity
    pub const ALL: [NoiseLevel; 4] = [
        NoiseLevel::Quiet,
        NoiseLevel::Moderate,
        NoiseLevel::Noisy,
        NoiseLevel::Severe,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            NoiseLevel::Quiet => "quiet",
            NoiseLevel::Moderate => "moderate",
            NoiseLevel::Noisy => "noisy",
            NoiseLevel::Severe => "severe",
        }
    }

    /// Static reference data for this band
    pub fn band(&self) -> &'static NoiseLevelBand {
        &NOISE_LEVEL_BANDS[*self as usize]
    }
}

impl std::fmt::Display for NoiseLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NoiseLevel::Quiet => write!(f, "QUIET"),
            NoiseLevel::Moderate => write!(f, "MODERATE"),
            NoiseLevel::Noisy => write!(f, "NOISY"),
            NoiseLevel::Severe => write!(f, "SEVERE"),
        }
    }
}

/// Display and guidance data attached to a noise level.
///
/// `min_db` is inclusive, `max_db` exclusive. The severe band's `max_db` is a
/// display ceiling only.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoiseLevelBand {
    pub level: NoiseLevel,
    pub label: &'static str,
    pub min_db: f64,
    pub max_db: f64,
    pub color: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
    pub action: &'static str,
}

impl NoiseLevelBand {
    /// Whether `db` falls inside this band's half-open range.
    /// The top band is unbounded above.
    pub fn contains(&self, db: f64) -> bool {
        match self.level {
            NoiseLevel::Quiet => db < self.max_db,
            NoiseLevel::Severe => db >= self.min_db,
            _ => db >= self.min_db && db < self.max_db,
        }
    }
}

/// Band table indexed by `NoiseLevel as usize`
pub static NOISE_LEVEL_BANDS: [NoiseLevelBand; 4] = [
    NoiseLevelBand {
        level: NoiseLevel::Quiet,
        label: "Quiet",
        min_db: 0.0,
        max_db: MODERATE_MIN_DB,
        color: "#4CAF50",
        icon: "🟢",
        description: "No problem",
        action: "No particular action is needed.",
    },
    NoiseLevelBand {
        level: NoiseLevel::Moderate,
        label: "Slightly noisy",
        min_db: MODERATE_MIN_DB,
        max_db: NOISY_MIN_DB,
        color: "#FFC107",
        icon: "🟡",
        description: "Caution level",
        action: "If it bothers you, consider consulting the management company.",
    },
    NoiseLevelBand {
        level: NoiseLevel::Noisy,
        label: "Noisy",
        min_db: NOISY_MIN_DB,
        max_db: SEVERE_MIN_DB,
        color: "#FF9800",
        icon: "🟠",
        description: "Action recommended",
        action: "Contacting the management company is recommended.",
    },
    NoiseLevelBand {
        level: NoiseLevel::Severe,
        label: "Severe noise",
        min_db: SEVERE_MIN_DB,
        max_db: DISPLAY_MAX_DB,
        color: "#F44336",
        icon: "🔴",
        description: "Immediate action required",
        action: "Contact the management company immediately.",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_table_is_indexed_by_level() {
        for level in NoiseLevel::ALL {
            assert_eq!(level.band().level, level);
        }
    }

    #[test]
    fn test_bands_are_contiguous() {
        for pair in NOISE_LEVEL_BANDS.windows(2) {
            assert_eq!(pair[0].max_db, pair[1].min_db);
        }
    }

    #[test]
    fn test_contains_is_half_open() {
        let moderate = NoiseLevel::Moderate.band();
        assert!(moderate.contains(40.0));
        assert!(moderate.contains(59.99));
        assert!(!moderate.contains(60.0));
        assert!(NoiseLevel::Severe.band().contains(500.0));
        assert!(NoiseLevel::Quiet.band().contains(-5.0));
    }

    #[test]
    fn test_levels_order_by_severity() {
        assert!(NoiseLevel::Quiet < NoiseLevel::Moderate);
        assert!(NoiseLevel::Noisy < NoiseLevel::Severe);
        assert_eq!(NoiseLevel::Severe.key(), "severe");
    }
}
