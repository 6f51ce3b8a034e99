// * Text Normalizer
// * Turns raw page text into the normalized token stream used for keywords and TF-IDF.
// *
// * Steps, in order:
// * 1. Lowercase.
// * 2. Strip URLs (http(s)://... and www....).
// * 3. Strip HTML-tag-like substrings.
// * 4. Strip ASCII punctuation.
// * 5. Tokenize on Unicode word boundaries.
// * 6. Drop stop words and tokens of MIN_TOKEN_CHARS characters or fewer.
// * 7. Lemmatize.

use super::lemmatizer::Lemmatizer;
use super::stopwords::english_stop_words;
use crate::config::constants::MIN_TOKEN_CHARS;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;
use unicode_segmentation::UnicodeSegmentation;

static URL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://\S+|www\.\S+").expect("Invalid URL regex"));

static TAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<.*?>").expect("Invalid tag regex"));

/// Pure, deterministic text normalizer
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    stop_words: HashSet<&'static str>,
    lemmatizer: Lemmatizer,
}

impl TextNormalizer {
    pub fn new() -> Self {
        Self {
            stop_words: english_stop_words(),
            lemmatizer: Lemmatizer::new(),
        }
    }

    /// Returns the normalized tokens of `text`; empty input yields no tokens
    pub fn tokens(&self, text: &str) -> Vec<String> {
        if text.is_empty() {
            return Vec::new();
        }

        let lowered = text.to_lowercase();
        let without_urls = URL_PATTERN.replace_all(&lowered, "");
        let without_tags = TAG_PATTERN.replace_all(&without_urls, "");
        let without_punctuation: String = without_tags
            .chars()
            .filter(|c| !c.is_ascii_punctuation())
            .collect();

        without_punctuation
            .unicode_words()
            .filter(|token| token.chars().count() > MIN_TOKEN_CHARS)
            .filter(|token| !self.stop_words.contains(token))
            .map(|token| self.lemmatizer.lemmatize(token))
            .collect()
    }

    /// Returns the normalized tokens joined by single spaces
    pub fn normalize(&self, text: &str) -> String {
        self.tokens(text).join(" ")
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}
