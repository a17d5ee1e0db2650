//! Profiling utilities based on the `puffin` crate.
//!
//! With the `profiling` feature disabled the scope macros expand to nothing
//! and the init functions are no-ops.

#[cfg(feature = "profiling")]
use std::sync::OnceLock;

#[cfg(feature = "profiling")]
pub use puffin::{profile_function, profile_scope};

#[cfg(not(feature = "profiling"))]
#[macro_export]
macro_rules! profile_function {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "profiling"))]
#[macro_export]
macro_rules! profile_scope {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "profiling"))]
pub use crate::{profile_function, profile_scope};

/// Profiling backend options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfilingBackend {
    /// Send profiling data to puffin_viewer via HTTP.
    PuffinHttp,
}

/// Global profiling server instance.
#[cfg(feature = "profiling")]
static PROFILING_SERVER: OnceLock<puffin_http::Server> = OnceLock::new();

/// Address the puffin server listens on.
pub const PUFFIN_ADDR: &str = "0.0.0.0:8585";

/// Turn on scope recording without serving the data.
pub fn enable_scopes() {
    #[cfg(feature = "profiling")]
    puffin::set_scopes_on(true);
}

/// Initialize profiling with the specified backend.
pub fn init_profiling(backend: ProfilingBackend) {
    match backend {
        ProfilingBackend::PuffinHttp => {
            #[cfg(feature = "profiling")]
            {
                puffin::set_scopes_on(true);

                match puffin_http::Server::new(PUFFIN_ADDR) {
                    Ok(server) => {
                        tracing::info!("Puffin profiler server started on http://{}", PUFFIN_ADDR);
                        let _ = PROFILING_SERVER.set(server);
                    }
                    Err(e) => {
                        tracing::error!("Failed to start puffin server: {}", e);
                    }
                }
            }
            #[cfg(not(feature = "profiling"))]
            tracing::warn!("profiling requested but the `profiling` feature is disabled");
        }
    }
}

/// Mark the start of a new frame for profiling.
///
/// The runtime calls this once per animation tick.
#[inline]
pub fn new_frame() {
    #[cfg(feature = "profiling")]
    puffin::GlobalProfiler::lock().new_frame();
}
