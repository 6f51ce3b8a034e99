// * Configuration Constants
// * Central location for every default threshold and cap used by the engine

// * Crawl limits applied at ingestion
pub const DEFAULT_MAX_PAGES: usize = 50;
pub const DEFAULT_MAX_DEPTH: u32 = 3;

// * Pages with fewer incoming links than this are orphaned
pub const DEFAULT_MIN_INCOMING_LINKS: usize = 3;

// * Minimum cosine similarity for topic cluster membership
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.3;

// * Per-page keyword and bigram caps
pub const DEFAULT_MAX_KEYWORDS: usize = 10;
pub const DEFAULT_MAX_BIGRAMS: usize = 5;

// * Suggestions returned per page
pub const DEFAULT_MAX_SUGGESTIONS: usize = 5;

// * TF-IDF vocabulary cap
pub const DEFAULT_MAX_FEATURES: usize = 1000;

// * Tokens with this many characters or fewer are dropped
pub const MIN_TOKEN_CHARS: usize = 2;

// * Characters of context kept on each side of a matched anchor
pub const CONTEXT_WINDOW_CHARS: usize = 50;

// * Delimiter wrapped around the matched anchor inside a context string
pub const ANCHOR_MARKER: &str = "**";
