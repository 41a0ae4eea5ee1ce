//! Plain-text measurement report for sharing (mail, chat, print).

use std::fmt;

use chrono::NaiveDateTime;

use crate::types::{MeasurementSession, ReportSummary};

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━";
const NOT_SET: &str = "Not set";

/// Render `summary` (built from `session`) as a shareable text report.
///
/// `generated_at` is printed in the footer; callers pass the current local
/// time.
pub fn render_text_report(
    session: &MeasurementSession,
    summary: &ReportSummary,
    generated_at: &NaiveDateTime,
) -> String {
    TextReport { session, summary, generated_at }.to_string()
}

/// Text report view; `Display` writes the full report.
pub struct TextReport<'a> {
    pub session: &'a MeasurementSession,
    pub summary: &'a ReportSummary,
    pub generated_at: &'a NaiveDateTime,
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = &self.summary.measurement;
        let level = &self.summary.noise_level;
        let stats = &self.summary.statistics;
        let cmp = &self.summary.comparison;

        heading(f, "NOISE MEASUREMENT REPORT")?;
        writeln!(f, "[Measurement]")?;
        writeln!(f, "Date:      {}", format_date_time(&m.start_time))?;
        writeln!(f, "Duration:  {}", format_duration(m.duration_seconds))?;
        writeln!(f, "Address:   {}", self.session.address.as_deref().unwrap_or(NOT_SET))?;
        writeln!(f, "Room:      {}", self.session.room_number.as_deref().unwrap_or(NOT_SET))?;
        writeln!(f, "Zone:      {}", m.zone_type)?;
        writeln!(f)?;

        heading(f, "VERDICT")?;
        writeln!(f, "Noise level: {} {}", level.icon, level.label)?;
        writeln!(f, "Peak:        {:.1} dB", m.max_db)?;
        writeln!(f, "Average:     {:.1} dB", m.avg_db)?;
        writeln!(f)?;
        writeln!(f, "{}", level.description)?;
        writeln!(f)?;

        heading(f, "DETAILS")?;
        writeln!(f, "Max:       {:.1} dB", stats.max)?;
        writeln!(f, "Average:   {:.1} dB", stats.average)?;
        writeln!(f, "Median:    {:.1} dB", stats.median)?;
        writeln!(f, "Min:       {:.1} dB", stats.min)?;
        writeln!(f, "Std dev:   {:.1} dB", m.std_dev)?;
        writeln!(f, "Samples:   {}", stats.count)?;
        writeln!(f)?;

        heading(f, "ENVIRONMENTAL STANDARD")?;
        writeln!(f, "Window:    {}", cmp.standard_label)?;
        writeln!(f, "Standard:  {} dB", cmp.standard_db)?;
        writeln!(f, "Verdict:   {}", if cmp.is_exceeded { "Exceeded" } else { "Within" })?;
        writeln!(f, "Diff:      {:.1} dB", cmp.absolute_difference)?;
        writeln!(f)?;
        writeln!(f, "{}", cmp.message)?;
        writeln!(f)?;

        if !self.summary.sound_sources.is_empty() {
            heading(f, "PROBABLE SOURCES")?;
            for source in &self.summary.sound_sources {
                writeln!(
                    f,
                    "{} {} ({:.0}%): {}",
                    source.icon,
                    source.label,
                    source.confidence * 100.0,
                    source.description
                )?;
            }
            writeln!(f)?;
        }

        heading(f, "RECOMMENDED ACTION")?;
        writeln!(f, "{}", self.summary.recommendation)?;
        writeln!(f)?;

        writeln!(f, "{RULE}")?;
        writeln!(f)?;
        writeln!(f, "Generated: {}", format_date_time(self.generated_at))?;
        writeln!(f)?;
        writeln!(f, "{RULE}")
    }
}

fn heading(f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
    writeln!(f, "{RULE}\n{title}\n{RULE}\n")
}

/// `2024-07-04 22:15`
pub fn format_date_time(ts: &NaiveDateTime) -> String {
    ts.format("%Y-%m-%d %H:%M").to_string()
}

/// `3m 05s`
pub fn format_duration(seconds: u64) -> String {
    format!("{}m {:02}s", seconds / 60, seconds % 60)
}
