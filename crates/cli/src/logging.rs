//! Diagnostic logging for the CLI
//!
//! Log events go to stderr so they never mix with the progress lines on
//! stdout. `RUST_LOG` takes precedence over the `--verbose` default.
//!
//! ```bash
//! # Per-resource conversion details
//! RUST_LOG=tfschema_extractor_generator=debug tfschema-extractor extract ...
//! ```

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global subscriber
///
/// Defaults to `info`, or `debug` when `verbose` is set.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // A subscriber may already be installed (e.g. by a test harness).
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_file(false)
                .with_line_number(false),
        )
        .try_init();
}
