//! SoftGUI Core
//!
//! Shared building blocks for the SoftGUI widget runtime: integer geometry,
//! logging bootstrap, profiling hooks and process-level configuration.

pub mod config;
pub mod geometry;
pub mod logging;
pub mod profiling;

pub use config::{BenchmarkMode, Config};
