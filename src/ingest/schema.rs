// * Input contract produced by the crawler and consumed by the engine
// * Pages are keyed by URL; links are directed edges and may repeat.

use super::errors::IngestError;
use crate::config::CrawlSettings;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// A crawled page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub url: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub content: String,
    #[serde(default)]
    pub depth: u32,
}

impl Page {
    pub fn new(url: impl Into<String>, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            content: content.into(),
            depth: 0,
        }
    }

    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }
}

/// A directed hyperlink between two pages
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Link {
    pub source_url: String,
    pub target_url: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub anchor_text: String,
}

impl Link {
    pub fn new(
        source_url: impl Into<String>,
        target_url: impl Into<String>,
        anchor_text: impl Into<String>,
    ) -> Self {
        Self {
            source_url: source_url.into(),
            target_url: target_url.into(),
            anchor_text: anchor_text.into(),
        }
    }
}

/// One full crawl: the immutable unit of work handed to the engine
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CrawlSnapshot {
    #[serde(default)]
    pub pages: Vec<Page>,
    #[serde(default)]
    pub links: Vec<Link>,
}

impl CrawlSnapshot {
    pub fn new(pages: Vec<Page>, links: Vec<Link>) -> Self {
        Self { pages, links }
    }

    /// Parses and validates a snapshot from JSON
    pub fn from_json(json: &str) -> Result<Self, IngestError> {
        let snapshot: Self = serde_json::from_str(json)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Loads and validates a snapshot from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, IngestError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn to_json(&self) -> Result<String, IngestError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Rejects snapshots whose page identities are inconsistent
    pub fn validate(&self) -> Result<(), IngestError> {
        let mut seen: HashSet<&str> = HashSet::with_capacity(self.pages.len());

        for (position, page) in self.pages.iter().enumerate() {
            if page.url.trim().is_empty() {
                return Err(IngestError::EmptyUrl(position));
            }
            if !seen.insert(page.url.as_str()) {
                return Err(IngestError::DuplicatePage(page.url.clone()));
            }
        }

        Ok(())
    }

    /// Applies crawl limits: drops pages deeper than `max_depth`, keeps the first
    /// `max_pages`, and drops links whose source page was dropped
    ///
    /// Links from sources that were never in the page set are kept.
    pub fn apply_limits(mut self, limits: &CrawlSettings) -> Self {
        let (mut kept, mut dropped): (Vec<Page>, Vec<Page>) = std::mem::take(&mut self.pages)
            .into_iter()
            .partition(|page| page.depth <= limits.max_depth);
        if kept.len() > limits.max_pages {
            dropped.extend(kept.drain(limits.max_pages..));
        }
        self.pages = kept;

        let dropped_urls: HashSet<&str> = dropped.iter().map(|p| p.url.as_str()).collect();
        self.links
            .retain(|link| !dropped_urls.contains(link.source_url.as_str()));

        if !dropped.is_empty() {
            tracing::info!(
                dropped = dropped.len(),
                kept = self.pages.len(),
                "Crawl limits applied"
            );
        }

        self
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

// * Missing, null or non-string text fields become empty strings instead of failing the load
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(text) => text,
        _ => String::new(),
    })
}
