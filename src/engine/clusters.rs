// * Topic Cluster Builder
// * Greedy single-pass partition into pillar pages and their members.
// *
// * Pages are visited in page-set order. An unclaimed page with at least one
// * unclaimed neighbor at or above the threshold becomes a pillar; those neighbors
// * become its members and everything involved is claimed. Candidates are drawn
// * from unclaimed pages only, so no page belongs to two clusters.

use super::similarity::SimilarityMatrix;
use crate::refinery::AnnotatedPage;
use serde::{Deserialize, Serialize};

/// The central page of a cluster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PillarPage {
    pub url: String,
    pub title: String,
    pub keywords: Vec<String>,
    #[serde(skip)]
    pub index: usize,
}

/// A cluster member and its similarity to the pillar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterPage {
    pub url: String,
    pub title: String,
    pub similarity_score: f64,
    pub keywords: Vec<String>,
    #[serde(skip)]
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicCluster {
    pub pillar_page: PillarPage,
    pub cluster_pages: Vec<ClusterPage>,
}

impl TopicCluster {
    /// Pillar plus members
    pub fn size(&self) -> usize {
        self.cluster_pages.len() + 1
    }
}

/// Partitions qualifying pages into clusters, in pillar-discovery order
pub fn identify_topic_clusters(
    pages: &[AnnotatedPage],
    matrix: &SimilarityMatrix,
    min_similarity: f64,
) -> Vec<TopicCluster> {
    if pages.len() != matrix.len() {
        return Vec::new();
    }

    let mut claimed = vec![false; pages.len()];
    let mut clusters = Vec::new();

    for (i, pillar) in pages.iter().enumerate() {
        if claimed[i] {
            continue;
        }

        let members: Vec<ClusterPage> = pages
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != i && !claimed[*j])
            .filter_map(|(j, page)| {
                let score = matrix.get(i, j)?;
                (score >= min_similarity).then(|| ClusterPage {
                    url: page.url().to_string(),
                    title: page.title().to_string(),
                    similarity_score: score,
                    keywords: page.keywords.clone(),
                    index: j,
                })
            })
            .collect();

        if members.is_empty() {
            continue;
        }

        claimed[i] = true;
        for member in &members {
            claimed[member.index] = true;
        }

        tracing::debug!(pillar = %pillar.url(), members = members.len(), "Topic cluster formed");

        clusters.push(TopicCluster {
            pillar_page: PillarPage {
                url: pillar.url().to_string(),
                title: pillar.title().to_string(),
                keywords: pillar.keywords.clone(),
                index: i,
            },
            cluster_pages: members,
        });
    }

    clusters
}
