// * Ingestion: the input contract between the crawler and the engine
// * Loads crawl snapshots, validates page identity and applies crawl limits.

pub mod errors;
pub mod schema;

// * Re-exports for convenient access
pub use errors::IngestError;
pub use schema::{CrawlSnapshot, Link, Page};
