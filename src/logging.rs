use tracing_subscriber::EnvFilter;

/// Filter directive for diagnostic output, e.g. `GIT_DVC_BRIDGE_LOG=debug`.
pub const LOG_VAR: &str = "GIT_DVC_BRIDGE_LOG";

/// Diagnostics go to stderr so git's stdout stays machine-readable.
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_VAR).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
