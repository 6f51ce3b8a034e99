// * Contextual Anchor Placement
// * Finds where a suggested anchor already appears in a page's raw content
// * (case-insensitive, whole word) and cuts a marked context window around it.
// * Window sizes and positions are counted in characters, not bytes.

use super::opportunities::{title_case, LinkSuggestion};
use super::SuggestionEngine;
use crate::config::constants::{ANCHOR_MARKER, CONTEXT_WINDOW_CHARS};
use crate::ops::telemetry;
use regex::RegexBuilder;
use serde::{Deserialize, Serialize};

/// Where an anchor sits in a page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchorContext {
    /// Surrounding text with the first match wrapped in `**`
    pub context: String,
    /// Character offset of the first match in the content
    pub context_position: usize,
    /// Non-overlapping whole-word matches in the content
    pub occurrences: usize,
}

/// A link suggestion placed at its first mention in the source page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextualSuggestion {
    #[serde(flatten)]
    pub suggestion: LinkSuggestion,
    pub context: String,
    pub context_position: usize,
    pub occurrences: usize,
}

/// Locates `anchor` in `content`; None when it does not occur as a whole word
pub fn find_anchor_context(content: &str, anchor: &str) -> Option<AnchorContext> {
    if anchor.trim().is_empty() {
        return None;
    }

    let pattern = format!(r"\b{}\b", regex::escape(anchor));
    let regex = match RegexBuilder::new(&pattern).case_insensitive(true).build() {
        Ok(regex) => regex,
        Err(e) => {
            tracing::debug!(anchor = %anchor, error = %e, "Anchor pattern rejected");
            return None;
        }
    };

    let mut matches = regex.find_iter(content);
    let first = matches.next()?;
    let occurrences = 1 + matches.count();

    let before = &content[..first.start()];
    let after = &content[first.end()..];

    // * Byte offsets of the window edges, CONTEXT_WINDOW_CHARS characters out
    let window_start = before
        .char_indices()
        .rev()
        .nth(CONTEXT_WINDOW_CHARS - 1)
        .map_or(0, |(i, _)| i);
    let window_end = after
        .char_indices()
        .nth(CONTEXT_WINDOW_CHARS)
        .map_or(content.len(), |(i, _)| first.end() + i);

    let context = format!(
        "{}{ANCHOR_MARKER}{}{ANCHOR_MARKER}{}",
        &content[window_start..first.start()],
        first.as_str(),
        &content[first.end()..window_end],
    );

    Some(AnchorContext {
        context,
        context_position: before.chars().count(),
        occurrences,
    })
}

impl SuggestionEngine<'_> {
    /// Link suggestions for `url` placed in the page's own content
    pub fn get_contextual_link_suggestions(&self, url: &str) -> Vec<ContextualSuggestion> {
        let Some(page) = self.analysis.page(url) else {
            tracing::warn!(url = %url, "Page not found");
            return Vec::new();
        };
        self.get_contextual_link_suggestions_in(url, page.content())
    }

    /// Link suggestions for `url` placed in caller-supplied `content`, such as a draft
    ///
    /// The suggested anchor is tried first, then each matching keyword in turn; a
    /// keyword hit replaces the anchor. Suggestions with no hit are dropped and the
    /// rest are ordered by first mention.
    pub fn get_contextual_link_suggestions_in(
        &self,
        url: &str,
        content: &str,
    ) -> Vec<ContextualSuggestion> {
        let max_suggestions = self.analysis.settings().max_suggestions;
        let mut placed: Vec<ContextualSuggestion> = self
            .link_suggestions(url, max_suggestions)
            .into_iter()
            .filter_map(|mut suggestion| {
                let found = match find_anchor_context(content, &suggestion.suggested_anchor) {
                    Some(found) => found,
                    None => {
                        let (keyword, found) = suggestion.matching_keywords.iter().find_map(|k| {
                            find_anchor_context(content, k).map(|found| (k, found))
                        })?;
                        suggestion.suggested_anchor = title_case(keyword);
                        found
                    }
                };
                Some(ContextualSuggestion {
                    suggestion,
                    context: found.context,
                    context_position: found.context_position,
                    occurrences: found.occurrences,
                })
            })
            .collect();

        placed.sort_by_key(|s| s.context_position);
        telemetry::record_suggestions("contextual", placed.len());
        placed
    }
}
