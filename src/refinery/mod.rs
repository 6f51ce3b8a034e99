// * The Refinery (Text Pipeline)
// * Goal: Normalize page text and derive per-page keywords and bigrams.
// * Annotation is a pure Page -> AnnotatedPage mapping, computed independently per page.

pub mod keywords;
pub mod lemmatizer;
pub mod normalizer;
pub mod stopwords;

// * Re-exports for convenient access
pub use keywords::{top_keywords, top_ngrams, KeywordExtractor};
pub use lemmatizer::Lemmatizer;
pub use normalizer::TextNormalizer;
pub use stopwords::{english_stop_words, ENGLISH_STOP_WORDS};

use crate::config::constants::{DEFAULT_MAX_BIGRAMS, DEFAULT_MAX_KEYWORDS};
use crate::config::AnalysisSettings;
use crate::engine::cancel::CancelFlag;
use crate::ingest::Page;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

// * Phrases are word pairs
const BIGRAM_SIZE: usize = 2;

/// A crawled page with its derived text fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedPage {
    #[serde(flatten)]
    pub page: Page,
    /// Normalized tokens joined by spaces
    pub processed_content: String,
    /// Most frequent normalized tokens, most frequent first
    pub keywords: Vec<String>,
    /// Most frequent bigrams, most frequent first
    pub bigrams: Vec<String>,
}

impl AnnotatedPage {
    pub fn url(&self) -> &str {
        &self.page.url
    }

    pub fn title(&self) -> &str {
        &self.page.title
    }

    pub fn content(&self) -> &str {
        &self.page.content
    }

    pub fn top_keyword(&self) -> Option<&str> {
        self.keywords.first().map(String::as_str)
    }
}

/// Configuration for the refinery pipeline
#[derive(Debug, Clone)]
pub struct RefineryConfig {
    pub max_keywords: usize,
    pub max_bigrams: usize,
}

impl Default for RefineryConfig {
    fn default() -> Self {
        Self {
            max_keywords: DEFAULT_MAX_KEYWORDS,
            max_bigrams: DEFAULT_MAX_BIGRAMS,
        }
    }
}

impl From<&AnalysisSettings> for RefineryConfig {
    fn from(settings: &AnalysisSettings) -> Self {
        Self {
            max_keywords: settings.max_keywords,
            max_bigrams: settings.max_bigrams,
        }
    }
}

/// The per-page text pipeline
///
/// # Example
/// ```ignore
/// use linkwise::refinery::Refinery;
/// use linkwise::ingest::Page;
///
/// let refinery = Refinery::new();
/// let annotated = refinery.annotate(&Page::new("https://example.com/", "Home", "Internal linking guide"));
/// assert_eq!(annotated.keywords, vec!["internal", "linking", "guide"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Refinery {
    config: RefineryConfig,
    normalizer: TextNormalizer,
}

impl Refinery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: RefineryConfig) -> Self {
        Self {
            config,
            normalizer: TextNormalizer::new(),
        }
    }

    /// Derives normalized content, keywords and bigrams for one page
    pub fn annotate(&self, page: &Page) -> AnnotatedPage {
        // * Normalize once; keywords and bigrams share the token stream
        let tokens = self.normalizer.tokens(&page.content);

        AnnotatedPage {
            page: page.clone(),
            processed_content: tokens.join(" "),
            keywords: top_keywords(&tokens, self.config.max_keywords),
            bigrams: top_ngrams(&tokens, BIGRAM_SIZE, self.config.max_bigrams),
        }
    }

    /// Annotates every page in parallel, preserving page order
    pub fn annotate_all(&self, pages: &[Page]) -> Vec<AnnotatedPage> {
        pages.par_iter().map(|page| self.annotate(page)).collect()
    }

    /// Annotates every page unless `cancel` is raised first; None when cancelled
    pub fn annotate_all_cancellable(
        &self,
        pages: &[Page],
        cancel: &CancelFlag,
    ) -> Option<Vec<AnnotatedPage>> {
        pages
            .par_iter()
            .map(|page| {
                if cancel.is_cancelled() {
                    None
                } else {
                    Some(self.annotate(page))
                }
            })
            .collect()
    }

    pub fn config(&self) -> &RefineryConfig {
        &self.config
    }
}
