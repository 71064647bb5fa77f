//! Logging and tracing export settings.

use std::time::Duration;

use clap::{Args, ValueEnum};

/// How log lines are rendered on stdout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// One human-readable line per event.
    Compact,

    /// One JSON object per event, including the current span chain.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Level or filter directives, e.g. `debug` or `storefront_json=trace`
    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Tracing export and request diagnostics settings.
#[derive(Debug, Args)]
pub struct ObservabilityConfig {
    /// Export spans over OTLP/gRPC
    #[arg(long, env = "OTEL_ENABLED", default_value_t = false)]
    pub otel_enabled: bool,

    /// Continue traces from an inbound `traceparent` header (export only)
    #[arg(long, env = "OTEL_PARENT_PROPAGATION_ENABLED", default_value_t = false)]
    pub otel_parent_propagation_enabled: bool,

    #[arg(long, env = "OTEL_EXPORTER_OTLP_ENDPOINT", default_value = "http://localhost:4317")]
    pub otel_endpoint: String,

    #[arg(long, env = "OTEL_EXPORTER_OTLP_TIMEOUT_SECONDS", default_value_t = 3)]
    pub otel_timeout_seconds: u64,

    #[arg(long, env = "OTEL_SERVICE_NAME", default_value = "storefront-json")]
    pub otel_service_name: String,

    #[arg(long, env = "OTEL_SERVICE_VERSION", default_value = env!("CARGO_PKG_VERSION"))]
    pub otel_service_version: String,

    #[arg(long, env = "OTEL_DEPLOYMENT_ENVIRONMENT", default_value = "development")]
    pub otel_environment: String,

    /// Fraction of root traces sampled, clamped to [0, 1]
    #[arg(long, env = "OTEL_TRACE_SAMPLE_RATIO", default_value_t = 1.0)]
    pub otel_sample_ratio: f64,

    /// Requests slower than this are logged at warn
    #[arg(long, env = "SLOW_REQUEST_THRESHOLD_MS", default_value_t = 1_000)]
    pub slow_request_threshold_ms: u64,
}

impl ObservabilityConfig {
    #[must_use]
    pub fn otel_timeout(&self) -> Duration {
        Duration::from_secs(self.otel_timeout_seconds)
    }

    #[must_use]
    pub fn sample_ratio(&self) -> f64 {
        self.otel_sample_ratio.clamp(0.0, 1.0)
    }

    /// Inbound trace headers only matter when spans leave the process.
    #[must_use]
    pub fn propagates_parent_context(&self) -> bool {
        self.otel_enabled && self.otel_parent_propagation_enabled
    }
}
