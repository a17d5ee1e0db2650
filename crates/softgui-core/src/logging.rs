use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "info,winit=warn,cosmic_text=warn,softbuffer=warn";

pub fn init() {
    init_with_filter(DEFAULT_FILTER);
}

/// Installs the fmt subscriber, preferring `RUST_LOG` over `fallback`.
pub fn init_with_filter(fallback: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(fallback))
        .init();
}

/// Like [`init`], but returns `false` instead of panicking when a global
/// subscriber is already installed.
pub fn try_init() -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(DEFAULT_FILTER))
        .with_test_writer()
        .try_init()
        .is_ok()
}

fn env_filter(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_init_is_idempotent() {
        try_init();
        assert!(!try_init());
    }
}
