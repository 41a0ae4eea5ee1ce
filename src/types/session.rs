//! Measurement session: the unit of analysis handed over by capture

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Timelike};
use serde::{Deserialize, Serialize};

use super::{TimeOfDay, ZoneType};
use crate::analysis::statistics::{extrema, rounded_mean};
use crate::error::AnalysisError;

/// One finished recording.
///
/// `max_db`/`min_db`/`avg_db` may be supplied by the caller (e.g. a stored
/// record that kept only scalars) or left out, in which case they are
/// derived from `readings`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MeasurementSession {
    #[serde(default)]
    pub id: String,
    /// Local wall-clock time at the measurement site
    #[serde(with = "timestamp_format")]
    pub start_time: NaiveDateTime,
    #[serde(default, alias = "duration")]
    pub duration_seconds: u64,
    /// Readings in temporal order (dB)
    #[serde(default, alias = "dbHistory")]
    pub readings: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_db: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_db: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_db: Option<f64>,
    #[serde(default)]
    pub zone_type: ZoneType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recording_path: Option<String>,
}

impl MeasurementSession {
    /// Build a session from a reading sequence, deriving the scalar summaries.
    pub fn from_readings(start_time: NaiveDateTime, duration_seconds: u64, readings: Vec<f64>) -> Self {
        let (max_db, min_db, avg_db) = match extrema(&readings) {
            Some((min, max)) => (Some(max), Some(min), Some(rounded_mean(&readings, min, max))),
            None => (None, None, None),
        };
        Self {
            id: default_session_id(&start_time),
            start_time,
            duration_seconds,
            readings,
            max_db,
            min_db,
            avg_db,
            zone_type: ZoneType::default(),
            address: None,
            room_number: None,
            recording_path: None,
        }
    }

    /// Build a session that carries only scalar summaries, no readings.
    pub fn from_summary(
        start_time: NaiveDateTime,
        duration_seconds: u64,
        max_db: f64,
        min_db: f64,
        avg_db: f64,
    ) -> Self {
        Self {
            id: default_session_id(&start_time),
            start_time,
            duration_seconds,
            readings: Vec::new(),
            max_db: Some(max_db),
            min_db: Some(min_db),
            avg_db: Some(avg_db),
            zone_type: ZoneType::default(),
            address: None,
            room_number: None,
            recording_path: None,
        }
    }

    pub fn with_zone(mut self, zone_type: ZoneType) -> Self {
        self.zone_type = zone_type;
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Peak level: the stored scalar, else the readings maximum, else 0.
    pub fn max_db(&self) -> f64 {
        self.max_db
            .or_else(|| extrema(&self.readings).map(|(_, max)| max))
            .unwrap_or(0.0)
    }

    /// Lowest level: the stored scalar, else the readings minimum, else 0.
    pub fn min_db(&self) -> f64 {
        self.min_db
            .or_else(|| extrema(&self.readings).map(|(min, _)| min))
            .unwrap_or(0.0)
    }

    /// Mean level rounded to one decimal: stored scalar, else derived, else 0.
    pub fn avg_db(&self) -> f64 {
        self.avg_db
            .or_else(|| extrema(&self.readings).map(|(min, max)| rounded_mean(&self.readings, min, max)))
            .unwrap_or(0.0)
    }

    /// Whether the peak lies within `[min_db, max_db]` (both inclusive)
    pub fn peak_within(&self, min_db: f64, max_db: f64) -> bool {
        let peak = self.max_db();
        peak >= min_db && peak <= max_db
    }

    pub fn start_hour(&self) -> u32 {
        self.start_time.hour()
    }

    pub fn time_of_day(&self) -> TimeOfDay {
        TimeOfDay::at(&self.start_time)
    }

    /// Reject readings and scalars that are not finite numbers.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if let Some((index, &value)) = self.readings.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(AnalysisError::NonFiniteReading { index, value });
        }
        for (field, value) in [("maxDb", self.max_db), ("minDb", self.min_db), ("avgDb", self.avg_db)] {
            if let Some(value) = value.filter(|v| !v.is_finite()) {
                return Err(AnalysisError::NonFiniteScalar { field, value });
            }
        }
        Ok(())
    }
}

/// Session id derived from the start time, matching the recording file stem
/// (`noise_YYYYMMDD_HHMMSS`).
pub fn default_session_id(start_time: &NaiveDateTime) -> String {
    start_time.format("noise_%Y%m%d_%H%M%S").to_string()
}

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse a measurement timestamp into local wall-clock time.
///
/// Offset-bearing RFC 3339 input (e.g. the `...Z` strings stored by the
/// mobile app) is converted to the machine's local timezone. Naive input is
/// already local and taken as-is.
pub fn parse_timestamp(input: &str) -> Result<NaiveDateTime, AnalysisError> {
    parse_timestamp_in(input, &Local)
}

/// `parse_timestamp` with an explicit site timezone for offset-bearing input.
pub fn parse_timestamp_in<Tz: TimeZone>(input: &str, site_tz: &Tz) -> Result<NaiveDateTime, AnalysisError> {
    let trimmed = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(site_tz).naive_local());
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .ok_or_else(|| AnalysisError::InvalidTimestamp(input.to_string()))
}

/// Serde adapter for session timestamps.
pub mod timestamp_format {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const OUTPUT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.format(OUTPUT_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_timestamp(&raw).map_err(serde::de::Error::custom)
    }
}
