// * Configuration: defaults and the Settings document

pub mod constants;
pub mod settings;

pub use settings::{AnalysisSettings, CrawlSettings, Settings, SettingsError};
