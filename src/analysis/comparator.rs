//! Environmental standard comparator

use chrono::NaiveDateTime;

use crate::error::AnalysisError;
use crate::types::{parse_timestamp, standard_db, ComparisonResult, TimeOfDay, ZoneType};

/// Compare a reading with the standard that applies at `timestamp` in `zone`.
///
/// Exceedance is strict: a reading equal to the standard is within it.
pub fn compare_with_standard(db: f64, timestamp: &NaiveDateTime, zone: ZoneType) -> ComparisonResult {
    compare_in_window(db, TimeOfDay::at(timestamp), zone)
}

/// Comparison for callers holding unparsed input (CLI arguments, request
/// bodies). Fails with an invalid-argument error for an unknown zone type or
/// an uninterpretable timestamp.
pub fn compare_with_standard_str(db: f64, timestamp: &str, zone: &str) -> Result<ComparisonResult, AnalysisError> {
    let zone: ZoneType = zone.parse()?;
    let timestamp = parse_timestamp(timestamp)?;
    Ok(compare_with_standard(db, &timestamp, zone))
}

/// Same comparison when the time window is already known
pub fn compare_in_window(db: f64, time_of_day: TimeOfDay, zone: ZoneType) -> ComparisonResult {
    let standard = standard_db(time_of_day, zone);
    let difference = db - f64::from(standard);
    let is_exceeded = difference > 0.0;
    let absolute_difference = difference.abs();

    let message = if is_exceeded {
        format!("Exceeds the environmental standard by {absolute_difference:.1} dB")
    } else {
        format!("Within the environmental standard ({absolute_difference:.1} dB below)")
    };

    ComparisonResult {
        standard_db: standard,
        absolute_difference,
        is_exceeded,
        time_of_day,
        zone_type: zone,
        standard_label: time_of_day.standard_label(),
        message,
    }
}
