use linkwise::engine::{Analysis, ClusterPage};
use linkwise::{AnalysisSettings, CrawlSnapshot, Link, Page, SuggestionEngine};
use std::collections::HashSet;

// * End-to-end scenarios over small hand-built sites

fn related_pages() -> Vec<Page> {
    vec![
        Page::new("https://site.test/a", "A", "seo internal linking strategy"),
        Page::new("https://site.test/b", "B", "internal linking best practices"),
        Page::new("https://site.test/c", "C", "unrelated recipe for soup"),
    ]
}

fn build(pages: Vec<Page>, links: Vec<Link>) -> Analysis {
    Analysis::build(&CrawlSnapshot::new(pages, links), &AnalysisSettings::default()).unwrap()
}

#[test]
fn test_related_pages_are_suggested() {
    let analysis = build(related_pages(), vec![]);
    let matrix = analysis.similarity_matrix();

    let ab = matrix.get(0, 1).unwrap();
    assert!(ab > 0.3, "A/B similarity too low: {ab}");
    assert!(matrix.get(0, 2).unwrap() < 0.1);
    assert!(matrix.get(1, 2).unwrap() < 0.1);

    let suggestions =
        SuggestionEngine::new(&analysis).get_link_suggestions("https://site.test/a", 5);
    let to_b = suggestions
        .iter()
        .find(|s| s.target_url == "https://site.test/b")
        .expect("B should be suggested from A");

    assert!(!to_b.matching_keywords.is_empty());
    assert!(to_b
        .matching_keywords
        .iter()
        .any(|k| k == "linking" || k == "internal"));
}

#[test]
fn test_orphan_thresholds() {
    let mut pages = vec![
        Page::new("https://site.test/d", "D", "lonely page"),
        Page::new("https://site.test/e", "E", "popular page"),
    ];
    let mut links = Vec::new();
    for i in 0..5 {
        let source = format!("https://site.test/s{i}");
        pages.push(Page::new(source.clone(), format!("S{i}"), "source page"));
        links.push(Link::new(source, "https://site.test/e", "Popular"));
    }
    let analysis = build(pages, links);

    let orphans: Vec<String> = analysis
        .get_orphaned_pages(3)
        .into_iter()
        .map(|o| o.url)
        .collect();
    assert!(orphans.contains(&"https://site.test/d".to_string()));
    assert!(!orphans.contains(&"https://site.test/e".to_string()));

    // * Exactly the pages strictly below the threshold
    for threshold in 0..8 {
        for orphan in analysis.get_orphaned_pages(threshold) {
            assert!(orphan.incoming_links < threshold);
        }
        let expected = analysis
            .pages()
            .iter()
            .filter(|p| analysis.link_graph().incoming_count(p.url()) < threshold)
            .count();
        assert_eq!(analysis.get_orphaned_pages(threshold).len(), expected);
    }
}

#[test]
fn test_similar_pages_contract() {
    let analysis = build(related_pages(), vec![]);

    for page in analysis.pages() {
        for n in 0..4 {
            let similar = analysis.get_similar_pages(page.url(), n);
            assert!(similar.len() <= n);
            assert!(similar.iter().all(|s| s.url != page.url()));
            assert!(similar
                .windows(2)
                .all(|w| w[0].similarity_score >= w[1].similarity_score));
        }
    }
    assert!(analysis.get_similar_pages("https://site.test/missing", 3).is_empty());
}

#[test]
fn test_orphan_rescue_never_duplicates_links() {
    let links = vec![
        Link::new("https://site.test/b", "https://site.test/a", "SEO"),
        Link::new("https://site.test/c", "https://site.test/b", "Linking"),
    ];
    let analysis = build(related_pages(), links);
    let opportunities = SuggestionEngine::new(&analysis).find_link_opportunities(3);

    assert!(!opportunities.is_empty());
    for opportunity in &opportunities {
        assert!(!analysis
            .link_graph()
            .has_link(&opportunity.source_url, &opportunity.orphaned_url));
        assert_ne!(opportunity.source_url, opportunity.orphaned_url);
        assert!(!opportunity.suggested_anchor.is_empty());
    }
}

#[test]
fn test_clusters_are_a_partition() {
    let pages = vec![
        Page::new("https://site.test/1", "1", "internal linking guide for seo"),
        Page::new("https://site.test/2", "2", "internal linking checklist for seo"),
        Page::new("https://site.test/3", "3", "seo audit checklist"),
        Page::new("https://site.test/4", "4", "soup recipe with carrots"),
        Page::new("https://site.test/5", "5", "winter soup recipe"),
        Page::new("https://site.test/6", "6", "telescope buying advice"),
    ];
    let analysis = build(pages, vec![]);

    for threshold in [0.1, 0.2, 0.3, 0.5] {
        let clusters = analysis.identify_topic_clusters(threshold);
        let mut claimed = HashSet::new();

        for cluster in &clusters {
            assert!(!cluster.cluster_pages.is_empty());
            assert!(claimed.insert(cluster.pillar_page.url.clone()));
            for ClusterPage { url, similarity_score, .. } in &cluster.cluster_pages {
                assert!(*similarity_score >= threshold);
                assert!(claimed.insert(url.clone()), "{url} claimed twice");
            }
        }
    }

    let clusters = analysis.identify_topic_clusters(0.3);
    assert!(clusters
        .iter()
        .all(|c| c.pillar_page.url != "https://site.test/6"
            && c.cluster_pages.iter().all(|m| m.url != "https://site.test/6")));
}

#[test]
fn test_repeated_runs_are_identical() {
    let links = vec![Link::new("https://site.test/a", "https://site.test/c", "Soup")];
    let first = build(related_pages(), links.clone());
    let second = build(related_pages(), links);

    assert_eq!(first.similarity_matrix(), second.similarity_matrix());
    assert_eq!(first.pages(), second.pages());
    assert_eq!(first.fingerprint(), second.fingerprint());

    let (a, b) = (SuggestionEngine::new(&first), SuggestionEngine::new(&second));
    assert_eq!(a.find_link_opportunities(3), b.find_link_opportunities(3));
    assert_eq!(a.find_topic_cluster_opportunities(), b.find_topic_cluster_opportunities());
    assert_eq!(
        a.get_contextual_link_suggestions("https://site.test/a"),
        b.get_contextual_link_suggestions("https://site.test/a")
    );
}

#[test]
fn test_empty_site() {
    let analysis = build(vec![], vec![]);
    let engine = SuggestionEngine::new(&analysis);

    assert!(analysis.similarity_matrix().is_empty());
    assert!(analysis.get_orphaned_pages(3).is_empty());
    assert!(analysis.identify_topic_clusters(0.3).is_empty());
    assert!(engine.find_link_opportunities(3).is_empty());
    assert!(engine.find_topic_cluster_opportunities().is_empty());
    assert!(engine.get_link_suggestions("https://site.test/a", 5).is_empty());
}
