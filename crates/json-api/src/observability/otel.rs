//! OTLP span export.

use opentelemetry::KeyValue;
use opentelemetry_otlp::{SpanExporter, WithExportConfig as _};
use opentelemetry_sdk::{
    Resource,
    trace::{Sampler, SdkTracerProvider},
};

use crate::config::observability::ObservabilityConfig;

use super::ObservabilityError;

fn resource(config: &ObservabilityConfig) -> Resource {
    Resource::builder_empty()
        .with_service_name(config.otel_service_name.clone())
        .with_attributes([
            KeyValue::new("service.version", config.otel_service_version.clone()),
            KeyValue::new(
                "deployment.environment.name",
                config.otel_environment.clone(),
            ),
        ])
        .build()
}

/// Root spans are sampled at the configured ratio; child spans follow their
/// parent's decision.
fn sampler(config: &ObservabilityConfig) -> Sampler {
    Sampler::ParentBased(Box::new(Sampler::TraceIdRatioBased(
        config.sample_ratio(),
    )))
}

pub(super) fn build_tracer_provider(
    config: &ObservabilityConfig,
) -> Result<SdkTracerProvider, ObservabilityError> {
    let exporter = SpanExporter::builder()
        .with_tonic()
        .with_endpoint(config.otel_endpoint.clone())
        .with_timeout(config.otel_timeout())
        .build()?;

    Ok(SdkTracerProvider::builder()
        .with_sampler(sampler(config))
        .with_resource(resource(config))
        .with_batch_exporter(exporter)
        .build())
}
