//! Telemetry and observability utilities

#[cfg(feature = "metrics")]
use std::sync::Arc;

#[cfg(feature = "metrics")]
use opentelemetry::{
    metrics::{Counter, Histogram},
    KeyValue,
};

/// Telemetry configuration
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Whether telemetry is enabled
    pub enabled: bool,
    /// Service name for metrics
    pub service_name: String,
    /// Service version for metrics
    pub service_version: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            service_name: "doppler-sdk".to_string(),
            service_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// SDK metrics collector
#[cfg(feature = "metrics")]
#[derive(Clone)]
pub struct Metrics {
    pub(crate) requests_total: Counter<u64>,
    pub(crate) request_duration: Histogram<f64>,
    pub(crate) errors_total: Counter<u64>,
}

#[cfg(feature = "metrics")]
impl Metrics {
    /// Create new metrics instance
    pub fn new(config: &TelemetryConfig) -> Self {
        use opentelemetry::global;

        let meter = global::meter(config.service_name.clone());

        let requests_total = meter
            .u64_counter("doppler_sdk.requests_total")
            .with_description("Total number of requests made")
            .init();

        let request_duration = meter
            .f64_histogram("doppler_sdk.request_duration_seconds")
            .with_description("Request duration in seconds")
            .init();

        let errors_total = meter
            .u64_counter("doppler_sdk.errors_total")
            .with_description("Total number of error responses")
            .init();

        Self {
            requests_total,
            request_duration,
            errors_total,
        }
    }

    /// Record a completed request
    ///
    /// `route` should be a route template so item slugs do not fan out into
    /// one label value per account.
    pub fn record_request(&self, method: &str, route: &str, status: u16, duration_secs: f64) {
        let labels = &[
            KeyValue::new("method", method.to_string()),
            KeyValue::new("path", route.to_string()),
            KeyValue::new("status", status.to_string()),
        ];

        self.requests_total.add(1, labels);
        self.request_duration.record(duration_secs, labels);

        if status >= 400 {
            self.errors_total.add(
                1,
                &[
                    KeyValue::new("type", if status >= 500 { "server" } else { "client" }),
                    KeyValue::new("status", status.to_string()),
                ],
            );
        }
    }
}

#[cfg(feature = "metrics")]
impl std::fmt::Debug for Metrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Metrics").finish_non_exhaustive()
    }
}

#[cfg(feature = "metrics")]
static TELEMETRY: std::sync::OnceLock<Arc<Metrics>> = std::sync::OnceLock::new();

/// Initialize global telemetry
///
/// The first call registers the instruments; later calls share them.
#[cfg(feature = "metrics")]
pub fn init_telemetry(config: TelemetryConfig) -> Arc<Metrics> {
    TELEMETRY
        .get_or_init(|| Arc::new(Metrics::new(&config)))
        .clone()
}
