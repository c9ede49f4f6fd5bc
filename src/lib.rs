//! Propsort - configuration resolution for CSS property ordering
//!
//! This crate decides which property-ordering options apply to a
//! stylesheet: the closest project stylelint configuration that enables the
//! ordering plugin, or otherwise the editor-level settings. Resolution never
//! fails; every problem degrades to the editor settings.

pub mod config;
pub mod diagnostics;
pub mod document;
pub mod types;

pub use config::ConfigLoader;
pub use document::Document;
pub use types::{ConfigError, ConfigSource, ResolvedConfig, SortingOptions, Strategy};
