//! Aggregates across many stored sessions (history screen and dashboard)

use std::collections::BTreeMap;

use rayon::prelude::*;
use serde::Serialize;

use super::{classify_level, generate_report_summary, round1};
use crate::types::{MeasurementSession, NoiseLevel, ReportSummary, NOISE_EVENT_MIN_DB};

/// Totals across a set of sessions
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryStats {
    pub total: usize,
    /// Mean of per-session average levels, one decimal
    pub average_db: f64,
    /// Highest per-session peak
    pub max_db: f64,
    /// Sessions whose peak reached the noisy band
    pub noise_count: usize,
    /// Most recent session by start time
    pub last_measurement_id: Option<String>,
}

/// Session counts per noise level (by peak)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct LevelDistribution {
    pub quiet: usize,
    pub moderate: usize,
    pub noisy: usize,
    pub severe: usize,
}

impl LevelDistribution {
    pub fn count(&self, level: NoiseLevel) -> usize {
        match level {
            NoiseLevel::Quiet => self.quiet,
            NoiseLevel::Moderate => self.moderate,
            NoiseLevel::Noisy => self.noisy,
            NoiseLevel::Severe => self.severe,
        }
    }
}

/// Sessions started within one local hour
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyBucket {
    pub hour: u32,
    pub count: usize,
    /// Mean of per-session average levels, one decimal
    pub average_db: f64,
}

pub fn summarize_history(sessions: &[MeasurementSession]) -> HistoryStats {
    if sessions.is_empty() {
        return HistoryStats::default();
    }

    let total = sessions.len();
    let avg_sum: f64 = sessions.iter().map(MeasurementSession::avg_db).sum();
    let max_db = sessions
        .iter()
        .map(MeasurementSession::max_db)
        .fold(f64::NEG_INFINITY, f64::max);
    let noise_count = sessions.iter().filter(|s| s.max_db() >= NOISE_EVENT_MIN_DB).count();
    let last_measurement_id = sessions
        .iter()
        .max_by_key(|s| s.start_time)
        .map(|s| s.id.clone());

    HistoryStats {
        total,
        average_db: round1(avg_sum / total as f64),
        max_db,
        noise_count,
        last_measurement_id,
    }
}

pub fn level_distribution(sessions: &[MeasurementSession]) -> LevelDistribution {
    let mut dist = LevelDistribution::default();
    for session in sessions {
        match classify_level(session.max_db()) {
            NoiseLevel::Quiet => dist.quiet += 1,
            NoiseLevel::Moderate => dist.moderate += 1,
            NoiseLevel::Noisy => dist.noisy += 1,
            NoiseLevel::Severe => dist.severe += 1,
        }
    }
    dist
}

/// Per start-hour buckets, ascending by hour; hours without sessions are omitted.
pub fn hourly_distribution(sessions: &[MeasurementSession]) -> Vec<HourlyBucket> {
    let mut buckets: BTreeMap<u32, (usize, f64)> = BTreeMap::new();
    for session in sessions {
        let entry = buckets.entry(session.start_hour()).or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += session.avg_db();
    }
    buckets
        .into_iter()
        .map(|(hour, (count, sum))| HourlyBucket {
            hour,
            count,
            average_db: round1(sum / count as f64),
        })
        .collect()
}

/// Recompute report summaries for many sessions in parallel.
/// Output order matches input order.
pub fn summarize_all(sessions: &[MeasurementSession]) -> Vec<ReportSummary> {
    sessions.par_iter().map(generate_report_summary).collect()
}
