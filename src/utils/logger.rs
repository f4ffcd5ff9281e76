use tracing_log::LogTracer;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::EnvFilter;

use crate::constants;

/// Log output format types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable text format with timestamp, level, target, and message
    Text,
    /// JSON format with structured fields
    Json,
}

impl LogFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "json" => Some(LogFormat::Json),
            "text" => Some(LogFormat::Text),
            _ => None,
        }
    }

    /// Reads `CADASTRO_LOG_FORMAT`, falling back to [`LogFormat::Text`].
    pub fn from_env_or_default() -> Self {
        std::env::var(constants::ENV_LOG_FORMAT)
            .ok()
            .and_then(|value| Self::parse(&value))
            .unwrap_or(LogFormat::Text)
    }
}

/// Installs the global tracing subscriber and bridges `log` records into it.
///
/// The filter comes from `RUST_LOG` and defaults to `info`. Calling this a
/// second time returns an error; the first subscriber stays in place.
pub fn init_logging(format: LogFormat) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(env_filter);

    match format {
        LogFormat::Text => tracing::subscriber::set_global_default(
            registry.with(fmt::layer().with_target(true)),
        )?,
        LogFormat::Json => tracing::subscriber::set_global_default(
            registry.with(fmt::layer().json()),
        )?,
    }

    LogTracer::init()?;
    Ok(())
}

/// [`init_logging`] with the format taken from the environment.
pub fn init_logging_from_env() -> Result<(), Box<dyn std::error::Error>> {
    init_logging(LogFormat::from_env_or_default())
}
