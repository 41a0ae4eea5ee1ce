//! Environmental standard reference table: time-of-day x zone type

use std::str::FromStr;

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use super::thresholds::environmental_standards::{
    DAY_COMMERCIAL_DB, DAY_RESIDENTIAL_DB, DAY_START_HOUR, NIGHT_COMMERCIAL_DB,
    NIGHT_RESIDENTIAL_DB, NIGHT_START_HOUR,
};
use crate::error::AnalysisError;

/// Day (06:00-21:59) or night (22:00-05:59)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TimeOfDay {
    Day,
    Night,
}

impl TimeOfDay {
    /// Classify a local hour (0-23)
    pub fn from_hour(hour: u32) -> Self {
        if (DAY_START_HOUR..NIGHT_START_HOUR).contains(&hour) {
            TimeOfDay::Day
        } else {
            TimeOfDay::Night
        }
    }

    /// Time of day at a local wall-clock timestamp
    pub fn at(timestamp: &NaiveDateTime) -> Self {
        Self::from_hour(timestamp.hour())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeOfDay::Day => "day",
            TimeOfDay::Night => "night",
        }
    }

    /// Human-readable label of the standard's time window
    pub fn standard_label(&self) -> &'static str {
        match self {
            TimeOfDay::Day => "Daytime (06:00-22:00)",
            TimeOfDay::Night => "Night-time (22:00-06:00)",
        }
    }
}

impl std::fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeOfDay {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(TimeOfDay::Day),
            "night" => Ok(TimeOfDay::Night),
            _ => Err(AnalysisError::InvalidTimeOfDay(s.to_string())),
        }
    }
}

/// Regulatory classification of the measurement location
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum ZoneType {
    #[default]
    Residential,
    Commercial,
}

impl ZoneType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ZoneType::Residential => "residential",
            ZoneType::Commercial => "commercial",
        }
    }
}

impl std::fmt::Display for ZoneType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ZoneType {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "residential" => Ok(ZoneType::Residential),
            "commercial" => Ok(ZoneType::Commercial),
            _ => Err(AnalysisError::InvalidZoneType(s.to_string())),
        }
    }
}

/// Reference level (dB) for a time window and zone
pub fn standard_db(time_of_day: TimeOfDay, zone: ZoneType) -> u32 {
    match (time_of_day, zone) {
        (TimeOfDay::Day, ZoneType::Residential) => DAY_RESIDENTIAL_DB,
        (TimeOfDay::Day, ZoneType::Commercial) => DAY_COMMERCIAL_DB,
        (TimeOfDay::Night, ZoneType::Residential) => NIGHT_RESIDENTIAL_DB,
        (TimeOfDay::Night, ZoneType::Commercial) => NIGHT_COMMERCIAL_DB,
    }
}
