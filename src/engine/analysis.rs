// * Analysis Run
// * One immutable snapshot in, one fully built set of derived artifacts out:
// * annotated pages, TF-IDF vectors, the similarity matrix and the link index.
// * Nothing here is mutated after `build` returns, except the lazily computed
// * default cluster list.

use super::cancel::CancelFlag;
use super::clusters::{identify_topic_clusters, TopicCluster};
use super::errors::AnalysisError;
use super::fingerprint::snapshot_fingerprint;
use super::link_graph::LinkGraph;
use super::orphans::{find_orphans, OrphanedPage};
use super::similarity::{SimilarPage, SimilarityMatrix, TfIdfVectorizer};
use crate::config::AnalysisSettings;
use crate::ingest::CrawlSnapshot;
use crate::ops::telemetry;
use crate::refinery::{AnnotatedPage, Refinery, RefineryConfig};
use std::collections::HashMap;
use std::sync::OnceLock;
use std::time::Instant;

/// The published result of analyzing one crawl snapshot
#[derive(Debug)]
pub struct Analysis {
    pages: Vec<AnnotatedPage>,
    positions: HashMap<String, usize>,
    matrix: SimilarityMatrix,
    graph: LinkGraph,
    settings: AnalysisSettings,
    fingerprint: u64,
    vocabulary_size: usize,
    default_clusters: OnceLock<Vec<TopicCluster>>,
}

impl Analysis {
    /// Runs the full pipeline to completion
    pub fn build(
        snapshot: &CrawlSnapshot,
        settings: &AnalysisSettings,
    ) -> Result<Self, AnalysisError> {
        Self::build_with_cancel(snapshot, settings, &CancelFlag::new())
    }

    /// Runs the full pipeline, aborting between pages or matrix rows once `cancel` is raised
    pub fn build_with_cancel(
        snapshot: &CrawlSnapshot,
        settings: &AnalysisSettings,
        cancel: &CancelFlag,
    ) -> Result<Self, AnalysisError> {
        let started = Instant::now();
        tracing::info!(
            pages = snapshot.pages.len(),
            links = snapshot.links.len(),
            "Starting analysis"
        );

        let refinery = Refinery::with_config(RefineryConfig::from(settings));
        let Some(pages) = refinery.annotate_all_cancellable(&snapshot.pages, cancel) else {
            return Err(cancelled("normalization", started));
        };

        let documents: Vec<&str> = pages.iter().map(|p| p.processed_content.as_str()).collect();
        let model = TfIdfVectorizer::new(settings.max_features).fit_transform(&documents);

        let Some(matrix) = SimilarityMatrix::build(model.vectors(), cancel) else {
            return Err(cancelled("similarity matrix", started));
        };

        let graph = LinkGraph::build(&snapshot.links);

        // * First occurrence wins if the loader let a duplicate URL through
        let mut positions = HashMap::with_capacity(pages.len());
        for (index, page) in pages.iter().enumerate() {
            positions.entry(page.url().to_string()).or_insert(index);
        }

        let elapsed = started.elapsed();
        telemetry::record_pages_analyzed(pages.len());
        telemetry::record_analysis_duration(elapsed.as_secs_f64(), "completed");
        tracing::info!(
            pages = pages.len(),
            vocabulary = model.vocabulary_size(),
            links = graph.total_links(),
            elapsed_ms = elapsed.as_millis() as u64,
            "Analysis built"
        );

        Ok(Self {
            pages,
            positions,
            matrix,
            graph,
            settings: settings.clone(),
            fingerprint: snapshot_fingerprint(snapshot),
            vocabulary_size: model.vocabulary_size(),
            default_clusters: OnceLock::new(),
        })
    }

    pub fn pages(&self) -> &[AnnotatedPage] {
        &self.pages
    }

    pub fn page(&self, url: &str) -> Option<&AnnotatedPage> {
        self.page_index(url).map(|index| &self.pages[index])
    }

    /// Position of `url` in the page set
    pub fn page_index(&self, url: &str) -> Option<usize> {
        self.positions.get(url).copied()
    }

    pub fn similarity_matrix(&self) -> &SimilarityMatrix {
        &self.matrix
    }

    pub fn link_graph(&self) -> &LinkGraph {
        &self.graph
    }

    pub fn settings(&self) -> &AnalysisSettings {
        &self.settings
    }

    /// Fingerprint of the snapshot this analysis was built from
    pub fn fingerprint(&self) -> u64 {
        self.fingerprint
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary_size
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// The `top_n` pages most similar to `url`, most similar first; empty for unknown URLs
    pub fn get_similar_pages(&self, url: &str, top_n: usize) -> Vec<SimilarPage> {
        let Some(index) = self.page_index(url) else {
            tracing::warn!(url = %url, "Page not found");
            return Vec::new();
        };
        self.similar_to_index(index, top_n)
    }

    pub(crate) fn similar_to_index(&self, index: usize, top_n: usize) -> Vec<SimilarPage> {
        self.matrix
            .nearest(index, top_n)
            .into_iter()
            .map(|(j, score)| {
                let page = &self.pages[j];
                SimilarPage {
                    url: page.url().to_string(),
                    title: page.title().to_string(),
                    similarity_score: score,
                    keywords: page.keywords.clone(),
                }
            })
            .collect()
    }

    /// Pages with fewer than `min_incoming_links` incoming links, in page-set order
    pub fn get_orphaned_pages(&self, min_incoming_links: usize) -> Vec<OrphanedPage> {
        find_orphans(&self.pages, &self.graph, min_incoming_links)
    }

    /// A fresh greedy clustering at `min_similarity`
    pub fn identify_topic_clusters(&self, min_similarity: f64) -> Vec<TopicCluster> {
        identify_topic_clusters(&self.pages, &self.matrix, min_similarity)
    }

    /// Clusters at the configured similarity threshold, computed once
    pub fn clusters(&self) -> &[TopicCluster] {
        self.default_clusters.get_or_init(|| {
            let clusters = self.identify_topic_clusters(self.settings.similarity_threshold);
            telemetry::set_topic_clusters(clusters.len());
            clusters
        })
    }

    /// Orphans at the configured incoming-link threshold
    pub fn orphans(&self) -> Vec<OrphanedPage> {
        let orphans = self.get_orphaned_pages(self.settings.min_incoming_links);
        telemetry::set_orphaned_pages(orphans.len());
        orphans
    }
}

fn cancelled(stage: &'static str, started: Instant) -> AnalysisError {
    telemetry::record_analysis_duration(started.elapsed().as_secs_f64(), "cancelled");
    tracing::warn!(stage, "Analysis cancelled");
    AnalysisError::Cancelled(stage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::{Link, Page};

    fn snapshot() -> CrawlSnapshot {
        CrawlSnapshot::new(
            vec![
                Page::new("a", "A", "seo internal linking strategy"),
                Page::new("b", "B", "internal linking best practices"),
                Page::new("c", "C", "unrelated recipe for soup"),
            ],
            vec![Link::new("c", "a", "A")],
        )
    }

    #[test]
    fn test_build_and_lookup() {
        let analysis = Analysis::build(&snapshot(), &AnalysisSettings::default()).unwrap();

        assert_eq!(analysis.pages().len(), 3);
        assert_eq!(analysis.page_index("b"), Some(1));
        assert_eq!(analysis.page("c").map(|p| p.title()), Some("C"));
        assert!(analysis.page("missing").is_none());
        assert_eq!(analysis.similarity_matrix().len(), 3);
        assert_eq!(analysis.link_graph().incoming_count("a"), 1);
        assert!(analysis.vocabulary_size() > 0);
    }

    #[test]
    fn test_similar_pages() {
        let analysis = Analysis::build(&snapshot(), &AnalysisSettings::default()).unwrap();
        let similar = analysis.get_similar_pages("a", 5);

        assert_eq!(similar.len(), 2);
        assert_eq!(similar[0].url, "b");
        assert!(similar[0].similarity_score > 0.3);
        assert_eq!(similar[1].similarity_score, 0.0);
        assert!(analysis.get_similar_pages("missing", 5).is_empty());
    }

    #[test]
    fn test_default_clusters_are_cached() {
        let analysis = Analysis::build(&snapshot(), &AnalysisSettings::default()).unwrap();

        let first = analysis.clusters().as_ptr();
        let second = analysis.clusters().as_ptr();
        assert_eq!(first, second);
        assert_eq!(analysis.clusters().len(), 1);
        assert_eq!(analysis.clusters()[0].pillar_page.url, "a");
    }

    #[test]
    fn test_cancelled_build() {
        let cancel = CancelFlag::new();
        cancel.cancel();

        let result = Analysis::build_with_cancel(&snapshot(), &AnalysisSettings::default(), &cancel);
        assert_eq!(result.unwrap_err(), AnalysisError::Cancelled("normalization"));
    }

    #[test]
    fn test_empty_snapshot() {
        let analysis =
            Analysis::build(&CrawlSnapshot::default(), &AnalysisSettings::default()).unwrap();

        assert!(analysis.is_empty());
        assert!(analysis.clusters().is_empty());
        assert!(analysis.orphans().is_empty());
        assert!(analysis.get_similar_pages("a", 3).is_empty());
    }
}
