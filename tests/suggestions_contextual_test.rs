use linkwise::suggestions::{find_anchor_context, ClusterLinkDirection};
use linkwise::{Analysis, AnalysisSettings, CrawlSnapshot, Link, Page, SuggestionEngine};
use regex::RegexBuilder;

// * Test Suite for anchor placement and cluster completion

fn site() -> CrawlSnapshot {
    CrawlSnapshot::new(
        vec![
            Page::new(
                "https://site.test/guide",
                "Guide",
                "Our SEO strategy starts with content. Internal Linking ties the site together, \
                 and every internal page should be reachable.",
            ),
            Page::new(
                "https://site.test/linking",
                "Internal Linking",
                "Internal linking best practices for every page on the site.",
            ),
            Page::new(
                "https://site.test/soup",
                "Soup",
                "A warming recipe for winter soup.",
            ),
        ],
        vec![Link::new("https://site.test/soup", "https://site.test/guide", "Guide")],
    )
}

#[test]
fn test_marked_span_keeps_page_casing() {
    let content = "Our SEO strategy... Internal Linking ... ";
    let found = find_anchor_context(content, "internal linking").unwrap();

    assert!(found.context.contains("**Internal Linking**"));
    assert_eq!(found.occurrences, 1);
    assert_eq!(found.context_position, 20);
}

#[test]
fn test_contextual_anchors_occur_in_content() {
    let analysis = Analysis::build(&site(), &AnalysisSettings::default()).unwrap();
    let engine = SuggestionEngine::new(&analysis);
    let content = analysis.page("https://site.test/guide").unwrap().content();

    let placed = engine.get_contextual_link_suggestions("https://site.test/guide");
    assert!(!placed.is_empty());

    for suggestion in &placed {
        let pattern = format!(r"\b{}\b", regex::escape(&suggestion.suggestion.suggested_anchor));
        let regex = RegexBuilder::new(&pattern).case_insensitive(true).build().unwrap();
        assert!(regex.is_match(content));
        assert!(suggestion.occurrences >= 1);
        assert!(suggestion.context.contains("**"));
    }
    assert!(placed
        .windows(2)
        .all(|w| w[0].context_position <= w[1].context_position));
}

#[test]
fn test_serialized_contextual_fields() {
    let analysis = Analysis::build(&site(), &AnalysisSettings::default()).unwrap();
    let placed = SuggestionEngine::new(&analysis)
        .get_contextual_link_suggestions("https://site.test/guide");
    let json = serde_json::to_value(&placed[0]).unwrap();

    for field in [
        "source_url",
        "source_title",
        "target_url",
        "target_title",
        "similarity_score",
        "suggested_anchor",
        "matching_keywords",
        "context",
        "context_position",
        "occurrences",
    ] {
        assert!(json.get(field).is_some(), "missing {field}");
    }
}

#[test]
fn test_cluster_completion_skips_existing_edges() {
    let mut snapshot = site();
    snapshot.links.push(Link::new(
        "https://site.test/linking",
        "https://site.test/guide",
        "Guide",
    ));
    let analysis = Analysis::build(&snapshot, &AnalysisSettings::default()).unwrap();
    let opportunities = SuggestionEngine::new(&analysis).find_topic_cluster_opportunities();

    for opportunity in &opportunities {
        assert!(!analysis
            .link_graph()
            .has_link(&opportunity.source_url, &opportunity.target_url));
    }
    assert!(opportunities.iter().all(|o| {
        !(o.cluster_type == ClusterLinkDirection::ToPillar
            && o.source_url == "https://site.test/linking")
    }));
}

#[test]
fn test_unknown_page_yields_nothing() {
    let analysis = Analysis::build(&site(), &AnalysisSettings::default()).unwrap();
    let engine = SuggestionEngine::new(&analysis);

    assert!(engine.get_contextual_link_suggestions("https://site.test/nope").is_empty());
    assert!(engine.get_link_suggestions("https://site.test/nope", 5).is_empty());
}
