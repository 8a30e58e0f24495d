//! Telemetry setup for OpenTelemetry integration
//!
//! Export is enabled by `OTEL_EXPORTER_OTLP_ENDPOINT` and requires the
//! `telemetry` feature.
//!
//! ```text
//! OTEL_EXPORTER_OTLP_ENDPOINT=http://localhost:4317 \
//! OTEL_SERVICE_NAME=mindful-dev \
//!     ./mindful
//! ```

/// Configured OTLP endpoint, if any
pub fn endpoint() -> Option<String> {
    std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
        .ok()
        .filter(|e| !e.trim().is_empty())
}

/// Log whether spans are exported (call once the subscriber is installed)
pub fn report_status() {
    match endpoint() {
        None => {
            tracing::debug!("OpenTelemetry not configured (OTEL_EXPORTER_OTLP_ENDPOINT not set)")
        }
        Some(endpoint) if cfg!(feature = "telemetry") => {
            tracing::info!(endpoint = %endpoint, "OpenTelemetry initialized successfully")
        }
        Some(_) => {
            tracing::warn!("OpenTelemetry endpoint set but feature 'telemetry' not enabled");
            tracing::warn!("Rebuild with: cargo build --features telemetry");
        }
    }
}

#[cfg(feature = "telemetry")]
pub use otel::{layer, TracerProvider};

#[cfg(feature = "telemetry")]
mod otel {
    use anyhow::Result;
    use opentelemetry::trace::TracerProvider as _;
    use opentelemetry::KeyValue;
    use opentelemetry_otlp::WithExportConfig;
    use opentelemetry_sdk::{runtime, Resource};
    use tracing_opentelemetry::OpenTelemetryLayer;
    use tracing_subscriber::registry::LookupSpan;

    pub use opentelemetry_sdk::trace::TracerProvider;

    /// Build the OTLP tracing layer; keep the provider alive until shutdown
    pub fn layer<S>(
        endpoint: &str,
    ) -> Result<(OpenTelemetryLayer<S, opentelemetry_sdk::trace::Tracer>, TracerProvider)>
    where
        S: tracing::Subscriber + for<'span> LookupSpan<'span>,
    {
        let service_name =
            std::env::var("OTEL_SERVICE_NAME").unwrap_or_else(|_| "mindful".to_string());

        let exporter = opentelemetry_otlp::SpanExporter::builder()
            .with_tonic()
            .with_endpoint(endpoint)
            .build()?;

        let provider = TracerProvider::builder()
            .with_batch_exporter(exporter, runtime::Tokio)
            .with_resource(Resource::new(vec![KeyValue::new(
                "service.name",
                service_name.clone(),
            )]))
            .build();

        opentelemetry::global::set_tracer_provider(provider.clone());
        let tracer = provider.tracer(service_name);

        Ok((tracing_opentelemetry::layer().with_tracer(tracer), provider))
    }
}
