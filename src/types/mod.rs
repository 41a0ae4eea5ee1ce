//! Shared data structures for noise measurement analysis
//!
//! - Reference data: noise level bands, environmental standard table
//! - Input: `MeasurementSession` (one finished recording)
//! - Outputs: `ComparisonResult`, `StatisticsResult`, `SoundSourceEstimate`,
//!   `ReportSummary`

mod band;
mod standard;
mod report;
pub mod session;
pub mod thresholds;

pub use band::*;
pub use standard::*;
pub use report::*;
pub use session::{default_session_id, parse_timestamp, parse_timestamp_in, MeasurementSession};
pub use thresholds::*;
