//! Logging init: stderr only, so stdout stays a clean result stream.

use tracing_subscriber::EnvFilter;

/// Initialize structured logging to stderr. Status lines from the tracker
/// land here too, via the tracing-backed sink.
pub fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,rowpost=debug"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}
