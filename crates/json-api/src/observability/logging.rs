//! Subscriber assembly: env filter, fmt layer and optional span export.

use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing_subscriber::{
    EnvFilter, Layer as _, Registry, fmt, layer::SubscriberExt as _,
    util::SubscriberInitExt as _,
};

use crate::config::{ServerConfig, observability::LogFormat};

use super::ObservabilityError;

/// Dependencies that are chatty at `info`.
const QUIETED: [&str; 5] = ["sqlx", "h2", "hyper", "tonic", "opentelemetry"];

fn filter_directives(level: &str) -> String {
    QUIETED
        .iter()
        .fold(level.to_owned(), |directives, target| {
            format!("{directives},{target}=warn")
        })
}

fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(filter_directives(level)).unwrap_or_else(|source| {
        #[expect(
            clippy::print_stderr,
            reason = "the subscriber being built is the one that would log this"
        )]
        {
            eprintln!("ignoring invalid log filter {level:?}: {source}");
        }

        EnvFilter::new(filter_directives("info"))
    })
}

type BoxedLayer = Box<dyn tracing_subscriber::Layer<Registry> + Send + Sync>;

fn fmt_layer(format: LogFormat) -> BoxedLayer {
    match format {
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_target(true)
            .boxed(),
    }
}

pub(super) fn init_subscriber(
    config: &ServerConfig,
    tracer_provider: Option<&SdkTracerProvider>,
) -> Result<(), ObservabilityError> {
    let export = tracer_provider.map(|provider| {
        tracing_opentelemetry::layer()
            .with_tracer(provider.tracer(config.observability.otel_service_name.clone()))
    });

    tracing_subscriber::registry()
        .with(fmt_layer(config.logging.log_format))
        .with(env_filter(&config.logging.log_level))
        .with(export)
        .try_init()?;

    Ok(())
}
