//! Analysis outputs: comparison, statistics, sound-source estimates and the
//! assembled report summary

use chrono::NaiveDateTime;
use serde::Serialize;

use super::session::timestamp_format;
use super::{NoiseLevelBand, TimeOfDay, ZoneType};

/// Result of comparing a reading with the applicable environmental standard
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    /// Applicable reference level (dB)
    pub standard_db: u32,
    /// |db - standard_db|
    pub absolute_difference: f64,
    /// Strictly above the standard; equality is within the standard
    pub is_exceeded: bool,
    pub time_of_day: TimeOfDay,
    pub zone_type: ZoneType,
    pub standard_label: &'static str,
    pub message: String,
}

/// Descriptive statistics over a reading sequence.
///
/// All fields are zero for an empty sequence. `average` and `median` are
/// rounded to one decimal and then clamped into `[min, max]`, so
/// `max >= average >= min` always holds; when rounding would cross an
/// extremum (e.g. `[45.04, 45.04, 45.05]`) the value is the extremum itself
/// and may carry more than one decimal.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsResult {
    pub max: f64,
    pub min: f64,
    /// Arithmetic mean, one decimal, clamped into `[min, max]`
    pub average: f64,
    /// Middle value (odd count) or mean of the two middle values (even count),
    /// one decimal, clamped into `[min, max]`
    pub median: f64,
    pub count: usize,
}

/// Kinds of noise source the heuristic estimator can suggest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SoundSourceKind {
    Footsteps,
    Voice,
    Appliance,
    DoorSlam,
    TvMusic,
}

/// One probable noise source with its fixed rule confidence
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SoundSourceEstimate {
    pub kind: SoundSourceKind,
    #[serde(rename = "type")]
    pub label: &'static str,
    pub icon: &'static str,
    /// 0.0 - 1.0
    pub confidence: f64,
    pub description: &'static str,
}

/// Scalars the summary was computed from
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasurementOverview {
    pub max_db: f64,
    pub min_db: f64,
    pub avg_db: f64,
    #[serde(with = "timestamp_format")]
    pub start_time: NaiveDateTime,
    pub duration_seconds: u64,
    pub zone_type: ZoneType,
    /// Population standard deviation of the readings (0 without readings)
    pub std_dev: f64,
}

/// Read-only report derived from one measurement session
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub measurement: MeasurementOverview,
    pub noise_level: NoiseLevelBand,
    pub comparison: ComparisonResult,
    pub statistics: StatisticsResult,
    pub sound_sources: Vec<SoundSourceEstimate>,
    pub recommendation: String,
}
