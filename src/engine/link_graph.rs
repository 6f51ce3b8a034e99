// * Link Graph Index
// * One-time grouping of the crawled link set by source and by target.
// * Incoming counts include duplicate edges; direct-edge checks are set lookups.

use crate::ingest::Link;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Default)]
pub struct LinkGraph {
    incoming: HashMap<String, usize>,
    outgoing: HashMap<String, HashSet<String>>,
    total_links: usize,
}

impl LinkGraph {
    /// Indexes every link; O(links)
    pub fn build(links: &[Link]) -> Self {
        let mut incoming: HashMap<String, usize> = HashMap::new();
        let mut outgoing: HashMap<String, HashSet<String>> = HashMap::new();

        for link in links {
            *incoming.entry(link.target_url.clone()).or_insert(0) += 1;
            outgoing
                .entry(link.source_url.clone())
                .or_default()
                .insert(link.target_url.clone());
        }

        Self {
            incoming,
            outgoing,
            total_links: links.len(),
        }
    }

    /// Number of links pointing at `url`, duplicates included
    pub fn incoming_count(&self, url: &str) -> usize {
        self.incoming.get(url).copied().unwrap_or(0)
    }

    /// Distinct targets linked from `url`
    pub fn outgoing(&self, url: &str) -> Option<&HashSet<String>> {
        self.outgoing.get(url)
    }

    /// Whether any link `source -> target` exists
    pub fn has_link(&self, source: &str, target: &str) -> bool {
        self.outgoing
            .get(source)
            .is_some_and(|targets| targets.contains(target))
    }

    pub fn total_links(&self) -> usize {
        self.total_links
    }

    pub fn is_empty(&self) -> bool {
        self.total_links == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph() -> LinkGraph {
        LinkGraph::build(&[
            Link::new("a", "b", "B"),
            Link::new("a", "b", "Bee"),
            Link::new("c", "b", "B"),
            Link::new("b", "a", "A"),
        ])
    }

    #[test]
    fn test_incoming_counts_duplicates() {
        let graph = graph();
        assert_eq!(graph.incoming_count("b"), 3);
        assert_eq!(graph.incoming_count("a"), 1);
        assert_eq!(graph.incoming_count("c"), 0);
        assert_eq!(graph.incoming_count("missing"), 0);
    }

    #[test]
    fn test_outgoing_is_distinct() {
        let graph = graph();
        assert_eq!(graph.outgoing("a").map(HashSet::len), Some(1));
        assert!(graph.outgoing("missing").is_none());
    }

    #[test]
    fn test_has_link_is_directed() {
        let graph = graph();
        assert!(graph.has_link("a", "b"));
        assert!(graph.has_link("b", "a"));
        assert!(!graph.has_link("b", "c"));
        assert!(!graph.has_link("c", "a"));
    }

    #[test]
    fn test_totals() {
        assert_eq!(graph().total_links(), 4);
        assert!(LinkGraph::build(&[]).is_empty());
    }
}
