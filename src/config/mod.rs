//! Configuration resolution for property ordering
//!
//! Resolves the sorting options for a document from two layers:
//! 1. Project config discovered on disk (highest priority)
//! 2. Editor settings, falling back to built-in defaults

pub mod defaults;
pub mod detector;
pub mod discovery;
pub mod extractor;
pub mod format;
mod loader;
pub mod probe;
pub mod settings;
mod user_config;

pub use detector::PluginDetector;
pub use discovery::ConfigDiscovery;
pub use extractor::OptionExtractor;
pub use loader::ConfigLoader;
pub use probe::{FileProbe, FsProbe, MemoryProbe};
pub use settings::{MapSettings, SettingsResolver, SettingsStore};
pub use user_config::{UserSettings, SETTINGS_ENV};
