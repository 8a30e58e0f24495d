//! Logging setup
//!
//! `MINDFUL_LOG_FORMAT=json|pretty` (default pretty), `RUST_LOG` filter
//! (default `mindful=info`), optional daily-rolling JSON file in `MINDFUL_LOG_DIR`.

use crate::telemetry;
use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer, Registry};

const DEFAULT_FILTER: &str = "mindful=info,mindful_core=info,mindful_api_http=info,mindful_infra_sqlite=info,tower_http=info";

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Keeps background writers and exporters alive; flushes on drop
pub struct LoggingGuard {
    _file: Option<WorkerGuard>,
    #[cfg(feature = "telemetry")]
    provider: Option<telemetry::TracerProvider>,
}

#[cfg(feature = "telemetry")]
impl Drop for LoggingGuard {
    fn drop(&mut self) {
        if let Some(provider) = self.provider.take() {
            let _ = provider.shutdown();
        }
    }
}

pub fn init_logging() -> Result<LoggingGuard> {
    let log_format = std::env::var("MINDFUL_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(DEFAULT_FILTER))
        .context("Failed to create env filter")?;

    let mut layers: Vec<BoxedLayer> = Vec::new();

    match log_format.as_str() {
        // Production: JSON structured logging
        "json" => layers.push(fmt::layer().json().boxed()),
        // Development: Pretty formatting with colors
        _ => layers.push(fmt::layer().pretty().boxed()),
    }

    let file_guard = match std::env::var("MINDFUL_LOG_DIR") {
        Ok(dir) => {
            let dir = shellexpand::tilde(&dir).into_owned();
            let appender = tracing_appender::rolling::daily(dir, "mindful.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            layers.push(
                fmt::layer()
                    .json()
                    .with_ansi(false)
                    .with_writer(writer)
                    .boxed(),
            );
            Some(guard)
        }
        Err(_) => None,
    };

    #[cfg(feature = "telemetry")]
    let provider = match telemetry::endpoint() {
        Some(endpoint) => {
            let (layer, provider) = telemetry::layer::<Registry>(&endpoint)?;
            layers.push(layer.boxed());
            Some(provider)
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(layers)
        .with(env_filter)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    telemetry::report_status();

    Ok(LoggingGuard {
        _file: file_guard,
        #[cfg(feature = "telemetry")]
        provider,
    })
}
