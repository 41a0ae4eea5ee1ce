//! Noise Analysis Core
//!
//! Pure, synchronous functions that turn readings and sessions into
//! human-facing verdicts:
//!
//! - `classifier`: reading -> noise level band
//! - `comparator`: reading + timestamp + zone -> environmental standard comparison
//! - `statistics`: readings -> max/min/average/median/count
//! - `sound_source`: peak + time of day -> ranked probable sources
//! - `summary`: session -> report summary with recommendation
//! - `history`: aggregates and batch recomputation over many sessions
//!
//! Nothing here reads a clock, touches I/O, or holds state; the only shared
//! data are the immutable reference tables in `crate::types`.

mod classifier;
mod comparator;
pub mod statistics;
mod sound_source;
mod summary;
pub mod history;

pub use classifier::{classify, classify_level};
pub use comparator::{compare_in_window, compare_with_standard, compare_with_standard_str};
pub use statistics::{compute_statistics, round1, standard_deviation};
pub use sound_source::{estimate_sound_sources, SoundSourceRule, SOUND_SOURCE_RULES};
pub use summary::{build_recommendation, generate_report_summary};
pub use history::{
    hourly_distribution, level_distribution, summarize_all, summarize_history, HistoryStats,
    HourlyBucket, LevelDistribution,
};
