// * Analysis Report
// * The structured interchange handed to presentation layers: annotated pages,
// * orphans, clusters, opportunity lists and summary counts of one analysis.

use crate::engine::{Analysis, OrphanedPage, TopicCluster};
use crate::refinery::AnnotatedPage;
use crate::suggestions::{ClusterOpportunity, OrphanOpportunity, SiteStats, SuggestionEngine};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub stats: SiteStats,
    pub pages: Vec<AnnotatedPage>,
    pub orphaned_pages: Vec<OrphanedPage>,
    pub topic_clusters: Vec<TopicCluster>,
    pub orphan_opportunities: Vec<OrphanOpportunity>,
    pub cluster_opportunities: Vec<ClusterOpportunity>,
    /// Dense page-by-page similarity, rows in page order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similarity_matrix: Option<Vec<Vec<f64>>>,
}

impl AnalysisReport {
    /// Collects every output at the analysis' configured thresholds
    pub fn from_analysis(analysis: &Analysis, include_matrix: bool) -> Self {
        let engine = SuggestionEngine::new(analysis);
        let min_incoming_links = analysis.settings().min_incoming_links;

        Self {
            stats: engine.site_stats(),
            pages: analysis.pages().to_vec(),
            orphaned_pages: analysis.orphans(),
            topic_clusters: analysis.clusters().to_vec(),
            orphan_opportunities: engine.find_link_opportunities(min_incoming_links),
            cluster_opportunities: engine.find_topic_cluster_opportunities(),
            similarity_matrix: include_matrix.then(|| analysis.similarity_matrix().to_rows()),
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
