//! Diagnostic logging setup

use tracing_subscriber::EnvFilter;

/// Default filter directive for a `-v` count
pub fn default_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Install the global subscriber, writing to stderr.
///
/// `RUST_LOG` takes precedence over `verbose` when set. Calling this twice
/// keeps the first subscriber.
pub fn init(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
