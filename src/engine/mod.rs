// * The Engine (Similarity, Link Graph, Orphans, Clusters)
// * Goal: Turn one crawl snapshot into queryable similarity and link structure.
// * Every artifact is rebuilt from the full snapshot; there is no incremental update.

pub mod analysis;
pub mod cancel;
pub mod clusters;
pub mod errors;
pub mod fingerprint;
pub mod link_graph;
pub mod orphans;
pub mod similarity;
pub mod slot;

// * Re-exports for convenient access
pub use analysis::Analysis;
pub use cancel::CancelFlag;
pub use clusters::{identify_topic_clusters, ClusterPage, PillarPage, TopicCluster};
pub use errors::AnalysisError;
pub use fingerprint::{has_content_changed, snapshot_fingerprint};
pub use link_graph::LinkGraph;
pub use orphans::{find_orphans, OrphanedPage};
pub use similarity::{sparse_dot, SimilarPage, SimilarityMatrix, SparseVector, TfIdfModel, TfIdfVectorizer};
pub use slot::AnalysisSlot;
