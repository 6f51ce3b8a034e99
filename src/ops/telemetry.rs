// * Telemetry - Structured Logging and Prometheus Metrics
// * Logging goes through tracing; metrics live in the default prometheus registry
// * and are rendered on demand in the text exposition format.

use lazy_static::lazy_static;
use prometheus::{
    register_counter, register_counter_vec, register_gauge, register_histogram_vec, Counter,
    CounterVec, Encoder, Gauge, HistogramVec, TextEncoder,
};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// * Used when RUST_LOG is unset
const DEFAULT_LOG_FILTER: &str = "linkwise=info";

lazy_static! {
    // * Pages run through the full pipeline
    pub static ref PAGES_ANALYZED_TOTAL: Counter = register_counter!(
        "linkwise_pages_analyzed_total",
        "Total number of pages analyzed"
    ).unwrap();

    // * Wall time of full analysis runs
    pub static ref ANALYSIS_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "linkwise_analysis_duration_seconds",
        "Analysis run duration in seconds by outcome",
        &["outcome"],
        vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]
    ).unwrap();

    // * Suggestions emitted, by opportunity kind
    pub static ref SUGGESTIONS_GENERATED_TOTAL: CounterVec = register_counter_vec!(
        "linkwise_suggestions_generated_total",
        "Total link suggestions generated by kind",
        &["kind"]
    ).unwrap();

    // * Orphans in the latest analysis
    pub static ref ORPHANED_PAGES: Gauge = register_gauge!(
        "linkwise_orphaned_pages",
        "Orphaned pages in the latest analysis"
    ).unwrap();

    // * Clusters in the latest analysis
    pub static ref TOPIC_CLUSTERS: Gauge = register_gauge!(
        "linkwise_topic_clusters",
        "Topic clusters in the latest analysis"
    ).unwrap();
}

/// Initializes the tracing subscriber with JSON formatting
///
/// # Example
/// ```ignore
/// use linkwise::ops::telemetry;
///
/// telemetry::init_tracing();
/// tracing::info!(url = "https://example.com", "Analyzing page");
/// ```
pub fn init_tracing() {
    init_tracing_with_level(DEFAULT_LOG_FILTER);
}

/// Initializes JSON tracing with a custom filter, unless RUST_LOG overrides it
pub fn init_tracing_with_level(level: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().json())
        .init();
}

/// Initializes tracing with pretty formatting (for development)
pub fn init_tracing_pretty() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().pretty())
        .init();
}

/// Returns the current metrics as a string
pub fn get_metrics_string() -> String {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!(error = %e, "Failed to encode metrics");
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}

/// Records pages that completed annotation
pub fn record_pages_analyzed(count: usize) {
    PAGES_ANALYZED_TOTAL.inc_by(count as f64);
}

/// Records an analysis run's duration; `outcome` is "completed" or "cancelled"
pub fn record_analysis_duration(seconds: f64, outcome: &str) {
    ANALYSIS_DURATION_SECONDS
        .with_label_values(&[outcome])
        .observe(seconds);
}

/// Records suggestions of one kind
pub fn record_suggestions(kind: &str, count: usize) {
    SUGGESTIONS_GENERATED_TOTAL
        .with_label_values(&[kind])
        .inc_by(count as f64);
}

pub fn set_orphaned_pages(count: usize) {
    ORPHANED_PAGES.set(count as f64);
}

pub fn set_topic_clusters(count: usize) {
    TOPIC_CLUSTERS.set(count as f64);
}
