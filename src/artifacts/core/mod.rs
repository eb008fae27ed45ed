//! Shared utilities
//!
//! - `telemetry`: tracing subscriber setup

pub mod telemetry;
