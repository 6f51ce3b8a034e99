// * Orphan Detector
// * Flags pages whose incoming link count is strictly below a threshold.

use super::link_graph::LinkGraph;
use crate::refinery::AnnotatedPage;
use serde::{Deserialize, Serialize};

/// An under-linked page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrphanedPage {
    pub url: String,
    pub title: String,
    pub incoming_links: usize,
    pub keywords: Vec<String>,
    /// Position of the page in the analyzed page set
    #[serde(skip)]
    pub index: usize,
}

/// Every page with fewer than `min_incoming_links` incoming links, in page-set order
pub fn find_orphans(
    pages: &[AnnotatedPage],
    graph: &LinkGraph,
    min_incoming_links: usize,
) -> Vec<OrphanedPage> {
    pages
        .iter()
        .enumerate()
        .filter_map(|(index, page)| {
            let incoming_links = graph.incoming_count(page.url());
            (incoming_links < min_incoming_links).then(|| OrphanedPage {
                url: page.url().to_string(),
                title: page.title().to_string(),
                incoming_links,
                keywords: page.keywords.clone(),
                index,
            })
        })
        .collect()
}
