//! Capture seam
//!
//! The analysis core never records audio. This module is the boundary with
//! the audio capture collaborator: it converts platform metering values to
//! decibels and accumulates them into a finished `MeasurementSession`.

mod metering;
mod recorder;

pub use metering::{LinearMeteringConverter, MeteringConverter};
pub use recorder::SessionRecorder;

use chrono::NaiveDateTime;

use crate::types::default_session_id;

/// `noise_YYYYMMDD_HHMMSS.m4a` for a recording started at `start_time`
pub fn recording_file_name(start_time: &NaiveDateTime) -> String {
    format!("{}.m4a", default_session_id(start_time))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::parse_timestamp;

    #[test]
    fn test_recording_file_name_is_zero_padded() {
        let ts = parse_timestamp("2024-02-03T04:05:06").unwrap();
        assert_eq!(recording_file_name(&ts), "noise_20240203_040506.m4a");
    }
}
