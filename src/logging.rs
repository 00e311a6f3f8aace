use std::env;
use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt};

/// Install the global tracing subscriber. The level comes from `LOG_LEVEL` (default `info`).
pub fn init_tracing() {
    let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(log_level.parse().unwrap_or(Level::INFO.into())),
        )
        .init();
}
