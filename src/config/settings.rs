// * Process-wide Settings
// * Read by the engine at invocation time, never mutated by it.

use super::constants::{
    DEFAULT_MAX_BIGRAMS, DEFAULT_MAX_DEPTH, DEFAULT_MAX_FEATURES, DEFAULT_MAX_KEYWORDS,
    DEFAULT_MAX_PAGES, DEFAULT_MAX_SUGGESTIONS, DEFAULT_MIN_INCOMING_LINKS,
    DEFAULT_SIMILARITY_THRESHOLD,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed settings JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid setting {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Limits applied to a crawl snapshot before analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrawlSettings {
    /// Maximum number of pages kept from a crawl
    #[serde(default = "default_max_pages")]
    pub max_pages: usize,
    /// Pages deeper than this are dropped
    #[serde(default = "default_max_depth")]
    pub max_depth: u32,
}

impl Default for CrawlSettings {
    fn default() -> Self {
        Self {
            max_pages: DEFAULT_MAX_PAGES,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Thresholds and caps used by the analysis engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSettings {
    /// Pages with fewer incoming links are orphaned
    #[serde(default = "default_min_incoming_links")]
    pub min_incoming_links: usize,
    /// Minimum similarity for topic cluster membership
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f64,
    /// Keywords extracted per page
    #[serde(default = "default_max_keywords")]
    pub max_keywords: usize,
    /// Bigrams extracted per page
    #[serde(default = "default_max_bigrams")]
    pub max_bigrams: usize,
    /// Suggestions produced per page
    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: usize,
    /// TF-IDF vocabulary cap
    #[serde(default = "default_max_features")]
    pub max_features: usize,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            min_incoming_links: DEFAULT_MIN_INCOMING_LINKS,
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            max_keywords: DEFAULT_MAX_KEYWORDS,
            max_bigrams: DEFAULT_MAX_BIGRAMS,
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
            max_features: DEFAULT_MAX_FEATURES,
        }
    }
}

/// Complete settings document
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub crawl: CrawlSettings,
    #[serde(default)]
    pub analysis: AnalysisSettings,
}

impl Settings {
    /// Parses settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Loads settings from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Writes settings as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        std::fs::write(path, self.to_json_pretty()?)?;
        Ok(())
    }

    pub fn to_json_pretty(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Rejects values the engine cannot work with
    pub fn validate(&self) -> Result<(), SettingsError> {
        let analysis = &self.analysis;

        if !(0.0..=1.0).contains(&analysis.similarity_threshold) {
            return Err(SettingsError::Invalid {
                field: "similarity_threshold",
                reason: format!("{} is outside [0, 1]", analysis.similarity_threshold),
            });
        }

        let caps = [
            ("max_keywords", analysis.max_keywords),
            ("max_bigrams", analysis.max_bigrams),
            ("max_suggestions", analysis.max_suggestions),
            ("max_features", analysis.max_features),
            ("max_pages", self.crawl.max_pages),
        ];
        for (field, value) in caps {
            if value == 0 {
                return Err(SettingsError::Invalid {
                    field,
                    reason: "must be greater than zero".to_string(),
                });
            }
        }

        Ok(())
    }
}

fn default_max_pages() -> usize {
    DEFAULT_MAX_PAGES
}

fn default_max_depth() -> u32 {
    DEFAULT_MAX_DEPTH
}

fn default_min_incoming_links() -> usize {
    DEFAULT_MIN_INCOMING_LINKS
}

fn default_similarity_threshold() -> f64 {
    DEFAULT_SIMILARITY_THRESHOLD
}

fn default_max_keywords() -> usize {
    DEFAULT_MAX_KEYWORDS
}

fn default_max_bigrams() -> usize {
    DEFAULT_MAX_BIGRAMS
}

fn default_max_suggestions() -> usize {
    DEFAULT_MAX_SUGGESTIONS
}

fn default_max_features() -> usize {
    DEFAULT_MAX_FEATURES
}
