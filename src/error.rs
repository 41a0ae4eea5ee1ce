//! Error types for the analysis core
//!
//! The core is total over well-typed input, so the only failure it reports is
//! an argument that cannot be interpreted (unknown zone type, unparseable
//! timestamp, non-finite reading or summary value). Empty reading sequences are not errors.

use thiserror::Error;

/// Every variant is an invalid-argument condition. Callers embedding the core
/// in a service translate it into their own client-error response.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("Invalid zone type '{0}': expected 'residential' or 'commercial'")]
    InvalidZoneType(String),

    #[error("Invalid time of day '{0}': expected 'day' or 'night'")]
    InvalidTimeOfDay(String),

    #[error("Invalid timestamp '{0}': expected RFC 3339 or YYYY-MM-DDTHH:MM[:SS]")]
    InvalidTimestamp(String),

    #[error("Invalid reading at index {index}: {value} is not a finite decibel value")]
    NonFiniteReading { index: usize, value: f64 },

    #[error("Invalid {field}: {value} is not a finite decibel value")]
    NonFiniteScalar { field: &'static str, value: f64 },
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
