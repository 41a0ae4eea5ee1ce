//! Noise Checker: household noise measurement analysis
//!
//! Turns decibel readings captured on a device into a verdict a tenant can
//! act on: which noise level band the peak falls into, whether it exceeds
//! the environmental standard for the time of day and zone, descriptive
//! statistics, likely sources and a recommended next step.
//!
//! ## Architecture
//!
//! - **Analysis**: pure classification, comparison, statistics, source
//!   estimation and report assembly (`analysis`)
//! - **Capture seam**: metering-to-dB conversion and session recording (`capture`)
//! - **History**: sled-backed session store (`history_storage`)
//! - **Config**: TOML site/recording/calibration/storage settings (`config`)

pub mod analysis;
pub mod capture;
pub mod config;
pub mod error;
pub mod history_storage;
pub mod text_report;
pub mod types;

// Re-export configuration
pub use config::NoiseCheckerConfig;

// Re-export commonly used types
pub use types::{
    ComparisonResult, MeasurementSession, NoiseLevel, NoiseLevelBand, ReportSummary,
    SoundSourceEstimate, StatisticsResult, TimeOfDay, ZoneType,
};

// Re-export the analysis entry points
pub use analysis::{
    classify, compare_with_standard, compare_with_standard_str, compute_statistics,
    estimate_sound_sources, generate_report_summary,
};

pub use capture::{LinearMeteringConverter, MeteringConverter, SessionRecorder};
pub use error::AnalysisError;
pub use history_storage::{SessionStore, StorageError};
