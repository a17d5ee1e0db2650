use crate::logging;
use crate::profiling::{self, ProfilingBackend};

/// Process-wide configuration for a SoftGUI program.
#[derive(Debug, Clone)]
pub struct Config {
    pub benchmark: BenchmarkMode,
    /// Log filter used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            benchmark: BenchmarkMode::Off,
            log_filter: logging::DEFAULT_FILTER.to_string(),
        }
    }
}

impl Config {
    pub fn with_benchmark(mut self, benchmark: BenchmarkMode) -> Self {
        self.benchmark = benchmark;
        self
    }

    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    /// Installs logging and, depending on [`BenchmarkMode`], profiling.
    ///
    /// Call once at startup, before creating any window.
    pub fn apply(&self) {
        logging::init_with_filter(&self.log_filter);
        match self.benchmark {
            BenchmarkMode::Off => {}
            BenchmarkMode::On => profiling::enable_scopes(),
            BenchmarkMode::WithWebserver => profiling::init_profiling(ProfilingBackend::PuffinHttp),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BenchmarkMode {
    /// Benchmarking is disabled
    Off,
    /// Profiling scopes are recorded but not served
    On,
    /// Benchmarking is enabled, and can be viewed using external tools such as
    /// 'puffin_viewer'
    WithWebserver,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.benchmark, BenchmarkMode::Off);
        assert_eq!(config.log_filter, logging::DEFAULT_FILTER);
    }

    #[test]
    fn test_builder_setters() {
        let config = Config::default()
            .with_benchmark(BenchmarkMode::On)
            .with_log_filter("debug");
        assert_eq!(config.benchmark, BenchmarkMode::On);
        assert_eq!(config.log_filter, "debug");
    }
}
