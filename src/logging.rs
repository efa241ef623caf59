//! Tracing setup for binaries and tests.
//!
//! The library only emits events. Whoever runs it decides whether they are
//! printed by calling `init_tracing` once; later calls are ignored.

use std::sync::Once;

use tracing_subscriber::EnvFilter;

static TRACING_INIT: Once = Once::new();

/// Filter directive for a simulator-style verbosity (0 = quiet, 2+ = chatty).
pub fn filter_for_verbosity(verbosity: u8) -> String {
    let level = match verbosity {
        0 => "error",
        1 => "warn",
        2 => "info",
        _ => "debug",
    };
    format!("warn,monster_tower={}", level)
}

/// Installs a compact stderr subscriber. `RUST_LOG` overrides the verbosity.
pub fn init_tracing(verbosity: u8) {
    let directive = filter_for_verbosity(verbosity);
    TRACING_INIT.call_once(move || {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&directive));

        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_ids(false)
            .compact();

        // Another subscriber may already be installed by the host
        let _ = subscriber.try_init();
    });
}
