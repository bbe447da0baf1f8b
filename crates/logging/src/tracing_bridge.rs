//! crates/logging/src/tracing_bridge.rs
//! Installs a `tracing-subscriber` pipeline driven by [`VerbosityConfig`].
//!
//! Subsystems emit events through the macros in [`crate::tracing_macros`],
//! each with its own `statewire::*` target. The subscriber turns the
//! configured levels into an [`EnvFilter`]; an explicit `RUST_LOG` takes
//! precedence so ad-hoc debugging does not require new flags.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::util::TryInitError;

use super::config::VerbosityConfig;

/// Builds the filter for `config`, preferring `RUST_LOG` when it is set.
#[must_use]
pub fn build_filter(config: &VerbosityConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.filter_directives()))
}

/// Initialize a stderr fmt subscriber filtered by `config`.
///
/// Returns an error when a global subscriber is already installed, which
/// callers may ignore (tests install one per process at most).
pub fn init_tracing(config: &VerbosityConfig) -> Result<(), TryInitError> {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true);

    tracing_subscriber::registry()
        .with(build_filter(config))
        .with(fmt_layer)
        .try_init()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_initialisation_reports_an_error() {
        let config = VerbosityConfig::from_verbose_level(1);
        let _ = init_tracing(&config);
        assert!(init_tracing(&config).is_err());
    }
}
