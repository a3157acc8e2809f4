//! Diagnostic logging setup.

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for diagnostic output on stderr.
///
/// Safe to call multiple times; only the first call installs a subscriber.
/// `RUST_LOG` wins when set, otherwise `verbose` selects `debug` over `warn`.
pub fn init_tracing(verbose: bool) {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        let default_level = if verbose { "debug" } else { "warn" };
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("cxx_backport={default_level}")));

        // Another subscriber may already be installed (tests, embedding); keep it.
        if tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(verbose)
                    .with_level(true),
            )
            .with(filter)
            .try_init()
            .is_err()
        {
            tracing::trace!("global subscriber already set, keeping it");
        }
    });
}
