//! Report summary assembly for one measurement session

use super::{classify, compare_with_standard, compute_statistics, estimate_sound_sources, standard_deviation};
use crate::types::{
    ComparisonResult, MeasurementOverview, MeasurementSession, NoiseLevel, NoiseLevelBand, ReportSummary,
};

/// Build the report for `session`.
///
/// The headline verdict is driven by the peak (`max_db`), not the average.
/// Statistics come from the readings alone, so a session carrying only
/// scalars reports zeroed statistics.
pub fn generate_report_summary(session: &MeasurementSession) -> ReportSummary {
    let max_db = session.max_db();
    let noise_level = classify(max_db).clone();
    let comparison = compare_with_standard(max_db, &session.start_time, session.zone_type);
    let statistics = compute_statistics(&session.readings);
    let sound_sources = estimate_sound_sources(max_db, session.time_of_day());
    let recommendation = build_recommendation(&noise_level, &comparison);

    ReportSummary {
        measurement: MeasurementOverview {
            max_db,
            min_db: session.min_db(),
            avg_db: session.avg_db(),
            start_time: session.start_time,
            duration_seconds: session.duration_seconds,
            zone_type: session.zone_type,
            std_dev: standard_deviation(&session.readings),
        },
        noise_level,
        comparison,
        statistics,
        sound_sources,
        recommendation,
    }
}

/// Band action, then the exceedance clause, then the severe clause,
/// separated by blank lines.
pub fn build_recommendation(band: &NoiseLevelBand, comparison: &ComparisonResult) -> String {
    let mut recommendation = band.action.to_string();

    if comparison.is_exceeded {
        recommendation.push_str("\n\n");
        recommendation.push_str(&format!(
            "Exceeds the environmental standard ({}) by {:.1} dB.",
            comparison.standard_label, comparison.absolute_difference
        ));
        recommendation.push('\n');
        recommendation.push_str(
            "Presenting this measurement data to the building manager provides objective evidence.",
        );
    }

    if band.level == NoiseLevel::Severe {
        recommendation.push_str("\n\n");
        recommendation.push_str(
            "⚠️ Severe noise level. Continuous measurement and record keeping is recommended.",
        );
    }

    recommendation
}
