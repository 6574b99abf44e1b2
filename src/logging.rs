//! Diagnostic logging for the `trlint` binary.
//!
//! The library only emits `tracing` events; installing a subscriber is left
//! to the binary so that embedding applications keep control of their output.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Filter used when `RUST_LOG` is not set.
pub fn default_directives(verbose: bool) -> &'static str {
    if verbose { "warn,trlint=debug" } else { "warn" }
}

/// Install the global subscriber, writing to stderr so stdout stays reserved
/// for the report. `RUST_LOG` takes precedence over `verbose`.
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .try_init();
}
