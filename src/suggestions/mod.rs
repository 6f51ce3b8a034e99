// * Link Opportunity Generator
// * Goal: Turn a built analysis into actionable internal-link recommendations.
// * Every query borrows a published Analysis; unknown URLs yield empty results.

pub mod contextual;
pub mod opportunities;
pub mod stats;

// * Re-exports for convenient access
pub use contextual::{find_anchor_context, AnchorContext, ContextualSuggestion};
pub use opportunities::{
    matching_keywords, title_case, ClusterLinkDirection, ClusterOpportunity, LinkSuggestion,
    OrphanOpportunity,
};
pub use stats::SiteStats;

use crate::engine::Analysis;

/// Suggestion queries over one analysis
///
/// # Example
/// ```ignore
/// use linkwise::config::AnalysisSettings;
/// use linkwise::engine::Analysis;
/// use linkwise::suggestions::SuggestionEngine;
///
/// let analysis = Analysis::build(&snapshot, &AnalysisSettings::default())?;
/// let engine = SuggestionEngine::new(&analysis);
/// for suggestion in engine.get_contextual_link_suggestions("https://example.com/guide") {
///     println!("{} -> {}", suggestion.suggestion.suggested_anchor, suggestion.context);
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SuggestionEngine<'a> {
    analysis: &'a Analysis,
}

impl<'a> SuggestionEngine<'a> {
    pub fn new(analysis: &'a Analysis) -> Self {
        Self { analysis }
    }

    pub fn analysis(&self) -> &'a Analysis {
        self.analysis
    }
}
