// * Keyword / Phrase Extractor
// * Frequency-ranked single-word keywords and contiguous n-grams over normalized tokens.
// * Ties keep first-occurrence order: counting preserves insertion order and the
// * frequency sort is stable.

use super::normalizer::TextNormalizer;
use std::collections::HashMap;

/// Extracts keywords and n-grams from raw text
#[derive(Debug, Clone, Default)]
pub struct KeywordExtractor {
    normalizer: TextNormalizer,
}

impl KeywordExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_normalizer(normalizer: TextNormalizer) -> Self {
        Self { normalizer }
    }

    pub fn normalizer(&self) -> &TextNormalizer {
        &self.normalizer
    }

    /// Returns the `n` most frequent normalized tokens of `text`
    pub fn extract_keywords(&self, text: &str, n: usize) -> Vec<String> {
        top_keywords(&self.normalizer.tokens(text), n)
    }

    /// Returns the `top_n` most frequent contiguous `n`-token phrases of `text`
    pub fn extract_ngrams(&self, text: &str, n: usize, top_n: usize) -> Vec<String> {
        top_ngrams(&self.normalizer.tokens(text), n, top_n)
    }
}

/// Ranks already-normalized tokens by frequency
pub fn top_keywords(tokens: &[String], n: usize) -> Vec<String> {
    most_common(tokens.iter().cloned(), n)
}

/// Ranks contiguous `n`-token windows of already-normalized tokens by frequency
pub fn top_ngrams(tokens: &[String], n: usize, top_n: usize) -> Vec<String> {
    if n == 0 || tokens.len() < n {
        return Vec::new();
    }
    most_common(tokens.windows(n).map(|window| window.join(" ")), top_n)
}

// * Frequency count in first-occurrence order, then a stable descending sort
fn most_common(items: impl Iterator<Item = String>, limit: usize) -> Vec<String> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();

    for item in items {
        match positions.get(&item) {
            Some(&position) => counts[position].1 += 1,
            None => {
                positions.insert(item.clone(), counts.len());
                counts.push((item, 1));
            }
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.into_iter().take(limit).map(|(item, _)| item).collect()
}
