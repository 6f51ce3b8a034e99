// * Published Analysis Slot
// * Readers clone the current Arc and query it without holding the lock.
// * A new analysis is built entirely off-lock and swapped in whole, so no reader
// * ever sees a half-built matrix.

use super::analysis::Analysis;
use super::cancel::CancelFlag;
use super::errors::AnalysisError;
use super::fingerprint::{has_content_changed, snapshot_fingerprint};
use crate::config::AnalysisSettings;
use crate::ingest::CrawlSnapshot;
use std::sync::{Arc, RwLock};

#[derive(Debug, Default)]
pub struct AnalysisSlot {
    current: RwLock<Option<Arc<Analysis>>>,
}

impl AnalysisSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the published analysis
    pub fn publish(&self, analysis: Analysis) -> Arc<Analysis> {
        let analysis = Arc::new(analysis);
        let mut current = self.current.write().unwrap_or_else(|e| e.into_inner());
        *current = Some(Arc::clone(&analysis));
        tracing::debug!(fingerprint = analysis.fingerprint(), "Analysis published");
        analysis
    }

    /// The published analysis, if any
    pub fn current(&self) -> Option<Arc<Analysis>> {
        self.current
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn clear(&self) {
        *self.current.write().unwrap_or_else(|e| e.into_inner()) = None;
    }

    /// Rebuilds and publishes only when the snapshot or settings differ from the
    /// published analysis; a cancelled rebuild leaves the old one in place
    pub fn refresh(
        &self,
        snapshot: &CrawlSnapshot,
        settings: &AnalysisSettings,
        cancel: &CancelFlag,
    ) -> Result<Arc<Analysis>, AnalysisError> {
        let fingerprint = snapshot_fingerprint(snapshot);

        if let Some(current) = self.current() {
            if !has_content_changed(fingerprint, current.fingerprint())
                && current.settings() == settings
            {
                tracing::debug!(fingerprint, "Snapshot unchanged, reusing analysis");
                return Ok(current);
            }
        }

        let analysis = Analysis::build_with_cancel(snapshot, settings, cancel)?;
        Ok(self.publish(analysis))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::Page;

    fn snapshot(content: &str) -> CrawlSnapshot {
        CrawlSnapshot::new(
            vec![
                Page::new("a", "A", content),
                Page::new("b", "B", "internal linking guide"),
            ],
            vec![],
        )
    }

    #[test]
    fn test_refresh_reuses_unchanged_snapshot() {
        let slot = AnalysisSlot::new();
        let settings = AnalysisSettings::default();
        let cancel = CancelFlag::new();

        let first = slot.refresh(&snapshot("seo linking"), &settings, &cancel).unwrap();
        let second = slot.refresh(&snapshot("seo linking"), &settings, &cancel).unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        let third = slot.refresh(&snapshot("soup recipe"), &settings, &cancel).unwrap();
        assert!(!Arc::ptr_eq(&first, &third));
        assert!(Arc::ptr_eq(&third, &slot.current().unwrap()));
    }

    #[test]
    fn test_settings_change_triggers_rebuild() {
        let slot = AnalysisSlot::new();
        let cancel = CancelFlag::new();
        let first = slot
            .refresh(&snapshot("seo"), &AnalysisSettings::default(), &cancel)
            .unwrap();

        let tighter = AnalysisSettings {
            max_keywords: 2,
            ..AnalysisSettings::default()
        };
        let second = slot.refresh(&snapshot("seo"), &tighter, &cancel).unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_cancelled_refresh_keeps_previous() {
        let slot = AnalysisSlot::new();
        let settings = AnalysisSettings::default();
        let published = slot
            .refresh(&snapshot("seo linking"), &settings, &CancelFlag::new())
            .unwrap();

        let cancel = CancelFlag::new();
        cancel.cancel();
        assert!(slot.refresh(&snapshot("changed"), &settings, &cancel).is_err());
        assert!(Arc::ptr_eq(&published, &slot.current().unwrap()));
    }

    #[test]
    fn test_clear() {
        let slot = AnalysisSlot::new();
        assert!(slot.current().is_none());
        slot.publish(Analysis::build(&snapshot("x"), &AnalysisSettings::default()).unwrap());
        assert!(slot.current().is_some());
        slot.clear();
        assert!(slot.current().is_none());
    }
}
