//! Telemetry lifecycle.

use opentelemetry::global;
use opentelemetry_sdk::{propagation::TraceContextPropagator, trace::SdkTracerProvider};
use tracing::{error, info};

use crate::config::ServerConfig;

use super::{ObservabilityError, logging, otel, settings};

/// Owns the span exporter, if any, so it can be flushed at shutdown.
#[derive(Debug)]
pub(crate) struct Observability {
    tracer_provider: Option<SdkTracerProvider>,
}

impl Observability {
    /// Install the global subscriber and, when enabled, the OTLP exporter and
    /// W3C trace-context propagator.
    pub(crate) fn init(config: &ServerConfig) -> Result<Self, ObservabilityError> {
        settings::apply_runtime_config(&config.observability);

        let tracer_provider = config
            .observability
            .otel_enabled
            .then(|| otel::build_tracer_provider(&config.observability))
            .transpose()?;

        if tracer_provider.is_some() {
            global::set_text_map_propagator(TraceContextPropagator::new());
        }

        logging::init_subscriber(config, tracer_provider.as_ref())?;

        info!(
            format = ?config.logging.log_format,
            otel_enabled = config.observability.otel_enabled,
            "observability initialised"
        );

        Ok(Self { tracer_provider })
    }

    /// Flush pending spans. A no-op when export is disabled.
    pub(crate) fn shutdown(self) {
        if let Some(provider) = self.tracer_provider
            && let Err(source) = provider.shutdown()
        {
            error!("failed to shutdown tracer provider: {source}");
        }
    }
}
