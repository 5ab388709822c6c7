use std::sync::Once;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

static INIT: Once = Once::new();

/// Installs a stdout `tracing` subscriber filtered by `RUST_LOG`, `info` by
/// default. Only the first call has an effect.
pub fn setup_logger() {
    INIT.call_once(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        let stdout_layer = fmt::Layer::new()
            .with_writer(std::io::stdout)
            .with_ansi(true)
            .with_filter(env_filter);

        if let Err(e) = tracing_subscriber::registry().with(stdout_layer).try_init() {
            eprintln!("Warning: Failed to set up logging: {}", e);
        }
    });
}
