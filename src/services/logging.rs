use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "HEALTH_AI_LOG";

/// Installs the global subscriber. Filter comes from `HEALTH_AI_LOG`,
/// defaulting to `info`. Safe to call more than once.
pub fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
