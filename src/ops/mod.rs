// * Operations
// * Goal: Observability for analysis runs (structured logging and metrics)

pub mod telemetry;

// * Re-exports for convenient access
pub use telemetry::{
    get_metrics_string, init_tracing, init_tracing_pretty, init_tracing_with_level,
    record_analysis_duration, record_pages_analyzed, record_suggestions, set_orphaned_pages,
    set_topic_clusters,
};
