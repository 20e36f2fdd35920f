//! Tracing subscriber setup
//!
//! `RUST_LOG` takes precedence over the configured level. Records emitted
//! through the `log` facade (actix's request logger) are forwarded to the
//! same subscriber.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use tl_shared::config::environment::LogFormat;
use tl_shared::LoggingConfig;

/// Install the global subscriber
///
/// Returns an error if a subscriber is already installed.
pub fn init_tracing(config: &LoggingConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);

    match config.format {
        LogFormat::Compact => registry
            .with(fmt::layer().compact().with_ansi(config.colored))
            .try_init()?,
        LogFormat::Pretty => registry
            .with(fmt::layer().with_ansi(config.colored))
            .try_init()?,
    }

    Ok(())
}
