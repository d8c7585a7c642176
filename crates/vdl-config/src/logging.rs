//! Centralized `tracing` subscriber initialization (§7.1).
//!
//! Precedence for both level and format follows the reference
//! monorepo's `mill-config::logging`: `RUST_LOG` wins over everything
//! for filtering; `LOG_FORMAT` wins over the config file for the
//! writer layer. Always writes to stderr so stdout stays free for a
//! future LSP's JSON-RPC framing.

use crate::{AppConfig, LogFormat};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the global `tracing` subscriber exactly once. Calling
/// this more than once per process is a logic error in the caller,
/// not something this function guards against (matching `tracing`'s
/// own `set_global_default` semantics).
pub fn init(config: &AppConfig) {
    let level: tracing::Level = config.logging.level.parse().unwrap_or(tracing::Level::INFO);
    let env_filter = EnvFilter::from_default_env().add_directive(level.into());

    let format = std::env::var("LOG_FORMAT")
        .ok()
        .and_then(|f| match f.to_lowercase().as_str() {
            "json" => Some(LogFormat::Json),
            "pretty" | "human" => Some(LogFormat::Pretty),
            _ => None,
        })
        .unwrap_or(config.logging.format);

    match format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().pretty().with_writer(std::io::stderr))
                .init();
        }
    }
}
