// * Site-level summary counts at the configured thresholds

use super::SuggestionEngine;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteStats {
    pub pages_indexed: usize,
    pub orphaned_pages: usize,
    pub internal_links: usize,
    pub topic_clusters: usize,
}

impl SuggestionEngine<'_> {
    pub fn site_stats(&self) -> SiteStats {
        let analysis = self.analysis;
        if analysis.is_empty() {
            return SiteStats::default();
        }

        SiteStats {
            pages_indexed: analysis.pages().len(),
            orphaned_pages: analysis.orphans().len(),
            internal_links: analysis.link_graph().total_links(),
            topic_clusters: analysis.clusters().len(),
        }
    }
}
