// * Link Opportunities
// * Per-page suggestions, orphan rescue and topic-cluster completion.
// *
// * Anchors come from the keywords two pages share, in the order of the first
// * page's list. When nothing is shared, a single fallback keyword is used; a pair
// * with no keyword at all produces no opportunity.

use super::SuggestionEngine;
use crate::engine::SimilarPage;
use crate::ops::telemetry;
use serde::{Deserialize, Serialize};

/// A new outgoing link proposed for one page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkSuggestion {
    pub source_url: String,
    pub source_title: String,
    pub target_url: String,
    pub target_title: String,
    pub similarity_score: f64,
    pub suggested_anchor: String,
    pub matching_keywords: Vec<String>,
}

/// A page that should link to an orphan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrphanOpportunity {
    pub orphaned_url: String,
    pub orphaned_title: String,
    pub source_url: String,
    pub source_title: String,
    pub similarity_score: f64,
    pub suggested_anchor: String,
    pub matching_keywords: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClusterLinkDirection {
    /// Member links up to its pillar
    ToPillar,
    /// Pillar links down to a member
    FromPillar,
}

/// A missing link inside a topic cluster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterOpportunity {
    pub cluster_type: ClusterLinkDirection,
    pub source_url: String,
    pub source_title: String,
    pub target_url: String,
    pub target_title: String,
    pub similarity_score: f64,
    pub suggested_anchor: String,
    pub matching_keywords: Vec<String>,
}

/// Keywords of `first` that also appear in `second`, in `first`'s order
pub fn matching_keywords(first: &[String], second: &[String]) -> Vec<String> {
    let mut shared: Vec<String> = Vec::new();
    for keyword in first {
        if second.contains(keyword) && !shared.contains(keyword) {
            shared.push(keyword.clone());
        }
    }
    shared
}

/// Capitalizes the first letter of every alphabetic run and lowercases the rest
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

// * Shared keywords, else the fallback keyword, else nothing
fn anchor_keywords(first: &[String], second: &[String], fallback: Option<&str>) -> Option<Vec<String>> {
    let shared = matching_keywords(first, second);
    if !shared.is_empty() {
        return Some(shared);
    }
    fallback.map(|keyword| vec![keyword.to_string()])
}

impl SuggestionEngine<'_> {
    /// Up to `top_n` pages `url` should link to but does not yet
    ///
    /// Looks at the `top_n * 2` nearest pages, drops those already linked from `url`
    /// and keeps the first `top_n`; candidates without any keyword are then skipped.
    pub fn get_link_suggestions(&self, url: &str, top_n: usize) -> Vec<LinkSuggestion> {
        let suggestions = self.link_suggestions(url, top_n);
        telemetry::record_suggestions("page", suggestions.len());
        suggestions
    }

    // * Unmetered; callers record under their own kind
    pub(super) fn link_suggestions(&self, url: &str, top_n: usize) -> Vec<LinkSuggestion> {
        let analysis = self.analysis;
        let Some(index) = analysis.page_index(url) else {
            tracing::warn!(url = %url, "Page not found");
            return Vec::new();
        };
        let source = &analysis.pages()[index];
        let graph = analysis.link_graph();

        analysis
            .similar_to_index(index, top_n.saturating_mul(2))
            .into_iter()
            .filter(|candidate| !graph.has_link(url, &candidate.url))
            .take(top_n)
            .filter_map(|candidate| {
                let keywords = anchor_keywords(
                    &source.keywords,
                    &candidate.keywords,
                    candidate.keywords.first().map(String::as_str),
                )?;
                Some(LinkSuggestion {
                    source_url: url.to_string(),
                    source_title: source.title().to_string(),
                    target_url: candidate.url,
                    target_title: candidate.title,
                    similarity_score: candidate.similarity_score,
                    suggested_anchor: title_case(&keywords[0]),
                    matching_keywords: keywords,
                })
            })
            .collect()
    }

    /// Pages that could rescue each orphan (below `min_incoming_links`) with a new link
    pub fn find_link_opportunities(&self, min_incoming_links: usize) -> Vec<OrphanOpportunity> {
        let analysis = self.analysis;
        let graph = analysis.link_graph();
        let neighbors = analysis.settings().max_suggestions;
        let mut opportunities = Vec::new();

        for orphan in analysis.get_orphaned_pages(min_incoming_links) {
            let candidates: Vec<SimilarPage> = analysis
                .similar_to_index(orphan.index, neighbors)
                .into_iter()
                .filter(|source| !graph.has_link(&source.url, &orphan.url))
                .collect();

            for source in candidates {
                let Some(keywords) = anchor_keywords(
                    &orphan.keywords,
                    &source.keywords,
                    orphan.keywords.first().map(String::as_str),
                ) else {
                    continue;
                };
                opportunities.push(OrphanOpportunity {
                    orphaned_url: orphan.url.clone(),
                    orphaned_title: orphan.title.clone(),
                    source_url: source.url,
                    source_title: source.title,
                    similarity_score: source.similarity_score,
                    suggested_anchor: title_case(&keywords[0]),
                    matching_keywords: keywords,
                });
            }
        }

        tracing::debug!(count = opportunities.len(), "Orphan rescue opportunities found");
        telemetry::record_suggestions("orphan_rescue", opportunities.len());
        opportunities
    }

    /// Missing member-to-pillar and pillar-to-member links in the default clusters
    ///
    /// Per cluster, every `to_pillar` opportunity precedes every `from_pillar` one.
    pub fn find_topic_cluster_opportunities(&self) -> Vec<ClusterOpportunity> {
        let analysis = self.analysis;
        let graph = analysis.link_graph();
        let mut opportunities = Vec::new();

        for cluster in analysis.clusters() {
            let pillar = &cluster.pillar_page;

            for member in &cluster.cluster_pages {
                if graph.has_link(&member.url, &pillar.url) {
                    continue;
                }
                let Some(keywords) = anchor_keywords(
                    &pillar.keywords,
                    &member.keywords,
                    pillar.keywords.first().map(String::as_str),
                ) else {
                    continue;
                };
                opportunities.push(ClusterOpportunity {
                    cluster_type: ClusterLinkDirection::ToPillar,
                    source_url: member.url.clone(),
                    source_title: member.title.clone(),
                    target_url: pillar.url.clone(),
                    target_title: pillar.title.clone(),
                    similarity_score: member.similarity_score,
                    suggested_anchor: title_case(&keywords[0]),
                    matching_keywords: keywords,
                });
            }

            for member in &cluster.cluster_pages {
                if graph.has_link(&pillar.url, &member.url) {
                    continue;
                }
                let Some(keywords) = anchor_keywords(
                    &pillar.keywords,
                    &member.keywords,
                    member.keywords.first().map(String::as_str),
                ) else {
                    continue;
                };
                opportunities.push(ClusterOpportunity {
                    cluster_type: ClusterLinkDirection::FromPillar,
                    source_url: pillar.url.clone(),
                    source_title: pillar.title.clone(),
                    target_url: member.url.clone(),
                    target_title: member.title.clone(),
                    similarity_score: member.similarity_score,
                    suggested_anchor: title_case(&keywords[0]),
                    matching_keywords: keywords,
                });
            }
        }

        telemetry::record_suggestions("cluster", opportunities.len());
        opportunities
    }
}
