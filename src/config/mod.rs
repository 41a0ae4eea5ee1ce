//! Noise Checker Configuration Module
//!
//! Site metadata, recording behaviour, metering calibration and store
//! location, loaded from TOML.
//!
//! ## Loading Order
//!
//! 1. `NOISE_CHECKER_CONFIG` environment variable (path to TOML file)
//! 2. `noise_checker.toml` in the current working directory
//! 3. Built-in defaults
//!
//! The analysis functions never read configuration; callers pass what they
//! need (zone type, calibration) explicitly.
//!
//! ```ignore
//! let cfg = NoiseCheckerConfig::load();
//! let recorder = SessionRecorder::from_config(start, &cfg);
//! ```

mod noise_config;
pub mod defaults;
pub mod validation;

pub use noise_config::*;
