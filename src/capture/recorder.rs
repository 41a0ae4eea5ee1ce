//! Session recorder: collects readings while a recording runs and hands the
//! analysis core a finished, immutable `MeasurementSession`.

use chrono::NaiveDateTime;
use tracing::{debug, warn};

use super::{recording_file_name, LinearMeteringConverter, MeteringConverter};
use crate::config::NoiseCheckerConfig;
use crate::types::{MeasurementSession, ZoneType};

pub struct SessionRecorder {
    start_time: NaiveDateTime,
    converter: Box<dyn MeteringConverter>,
    readings: Vec<f64>,
    elapsed_ms: u64,
    record_threshold_db: f64,
    threshold_crossings: usize,
    zone_type: ZoneType,
    address: Option<String>,
    room_number: Option<String>,
}

impl SessionRecorder {
    pub fn new(start_time: NaiveDateTime, converter: Box<dyn MeteringConverter>, record_threshold_db: f64) -> Self {
        Self {
            start_time,
            converter,
            readings: Vec::new(),
            elapsed_ms: 0,
            record_threshold_db,
            threshold_crossings: 0,
            zone_type: ZoneType::default(),
            address: None,
            room_number: None,
        }
    }

    /// Recorder wired from configuration: linear calibration, record
    /// threshold and site metadata.
    pub fn from_config(start_time: NaiveDateTime, cfg: &NoiseCheckerConfig) -> Self {
        let mut recorder = Self::new(
            start_time,
            Box::new(LinearMeteringConverter::from_config(&cfg.calibration)),
            cfg.recording.record_threshold_db,
        );
        recorder.zone_type = cfg.site.zone_type;
        recorder.address = non_empty(&cfg.site.address);
        recorder.room_number = non_empty(&cfg.site.room_number);
        recorder
    }

    /// Record a raw platform metering value at `position_ms` into the
    /// recording. Returns the converted reading.
    pub fn push_metering(&mut self, metering: f64, position_ms: u64) -> Option<f64> {
        let db = self.converter.to_db(metering);
        self.push_db(db, position_ms)
    }

    /// Record a decibel reading. Non-finite values are dropped.
    pub fn push_db(&mut self, db: f64, position_ms: u64) -> Option<f64> {
        if !db.is_finite() {
            warn!(value = db, converter = self.converter.name(), "Dropping non-finite reading");
            return None;
        }
        self.elapsed_ms = self.elapsed_ms.max(position_ms);
        if db >= self.record_threshold_db {
            self.threshold_crossings += 1;
        }
        self.readings.push(db);
        Some(db)
    }

    pub fn current_db(&self) -> Option<f64> {
        self.readings.last().copied()
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// Readings at or above the record threshold so far
    pub fn threshold_crossings(&self) -> usize {
        self.threshold_crossings
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_ms / 1000
    }

    /// Stop recording and produce the session.
    pub fn finish(self) -> MeasurementSession {
        let duration = self.elapsed_seconds();
        debug!(
            readings = self.readings.len(),
            duration_secs = duration,
            crossings = self.threshold_crossings,
            "Recording finished"
        );
        let mut session = MeasurementSession::from_readings(self.start_time, duration, self.readings)
            .with_zone(self.zone_type);
        session.recording_path = Some(recording_file_name(&self.start_time));
        session.address = self.address;
        session.room_number = self.room_number;
        session
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::parse_timestamp;

    fn start() -> NaiveDateTime {
        parse_timestamp("2024-07-04T22:15:30").unwrap()
    }

    #[test]
    fn test_finish_satisfies_session_invariant() {
        let mut rec = SessionRecorder::new(start(), Box::new(LinearMeteringConverter::default()), 60.0);
        rec.push_db(52.0, 100);
        rec.push_db(67.5, 200);
        rec.push_db(48.0, 2_300);
        assert_eq!(rec.threshold_crossings(), 1);
        assert_eq!(rec.current_db(), Some(48.0));

        let session = rec.finish();
        assert_eq!(session.duration_seconds, 2);
        assert_eq!(session.max_db, Some(67.5));
        assert_eq!(session.min_db, Some(48.0));
        assert_eq!(session.avg_db, Some(55.8));
        assert_eq!(session.id, "noise_20240704_221530");
        assert_eq!(session.recording_path.as_deref(), Some("noise_20240704_221530.m4a"));
    }

    #[test]
    fn test_metering_goes_through_converter() {
        let mut rec = SessionRecorder::new(start(), Box::new(LinearMeteringConverter::default()), 60.0);
        assert_eq!(rec.push_metering(-80.0, 100), Some(50.0));
        assert_eq!(rec.len(), 1);
    }

    #[test]
    fn test_non_finite_readings_are_dropped() {
        let mut rec = SessionRecorder::new(start(), Box::new(LinearMeteringConverter::default()), 60.0);
        assert_eq!(rec.push_db(f64::NAN, 100), None);
        assert!(rec.is_empty());
        assert!(rec.finish().validate().is_ok());
    }

    #[test]
    fn test_from_config_carries_site() {
        let mut cfg = NoiseCheckerConfig::default();
        cfg.site.zone_type = ZoneType::Commercial;
        cfg.site.room_number = " 302 ".to_string();
        let session = SessionRecorder::from_config(start(), &cfg).finish();
        assert_eq!(session.zone_type, ZoneType::Commercial);
        assert_eq!(session.room_number.as_deref(), Some("302"));
        assert_eq!(session.address, None);
        assert!(session.readings.is_empty());
    }
}
