//! Diagnostic logging setup
//!
//! Logs go to stderr so they never mix with the rendered document. The filter
//! comes from `TFSHOW_LOG` when set, otherwise from the verbosity flag.

use std::sync::Once;
use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive
pub const LOG_ENV: &str = "TFSHOW_LOG";

static INIT_ONCE: Once = Once::new();

/// Install the global subscriber; later calls are no-ops
pub fn init(verbose: bool) {
    INIT_ONCE.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV)
            .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

        // Fails only when another subscriber is already installed
        let _ = tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_env_filter(filter)
            .try_init();
    });
}

fn default_directive(verbose: bool) -> &'static str {
    if verbose { "tfshow=debug" } else { "tfshow=warn" }
}
