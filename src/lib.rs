// * Linkwise: internal-linking analysis engine
// * Snapshot in (pages + links), recommendations out. The pipeline runs
// * ingest -> refinery -> engine -> suggestions; ops carries logging and metrics.

pub mod config;
pub mod engine;
pub mod ingest;
pub mod ops;
pub mod refinery;
pub mod report;
pub mod suggestions;

pub use config::{AnalysisSettings, CrawlSettings, Settings, SettingsError};
pub use engine::{Analysis, AnalysisError, AnalysisSlot, CancelFlag};
pub use ingest::{CrawlSnapshot, IngestError, Link, Page};
pub use report::AnalysisReport;
pub use suggestions::SuggestionEngine;
