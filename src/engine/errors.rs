use thiserror::Error;

// * Errors raised while building an analysis.
// * Queries never fail: unknown URLs and empty snapshots produce empty results.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("Analysis cancelled during {0}")]
    Cancelled(&'static str),
}
