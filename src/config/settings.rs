//! Editor-level settings
//!
//! Settings are a flat key/value store addressed by dotted keys such as
//! `sorting.strategy`. [`SettingsResolver`] turns them into
//! [`SortingOptions`] with the same validation rules applied to project
//! configuration.

use crate::config::defaults::{
    default_options, DEFAULT_EMPTY_LINES, DEFAULT_SORT_WITHIN_GROUPS, DEFAULT_STRATEGY,
    SETTING_EMPTY_LINES, SETTING_SORT_WITHIN_GROUPS, SETTING_STRATEGY,
};
use crate::diagnostics::{DiagnosticSink, Reporter};
use crate::types::{SortingOptions, Strategy};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

pub trait SettingsStore: Send + Sync {
    fn get(&self, key: &str) -> Option<Value>;
}

/// In-memory settings
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapSettings {
    values: BTreeMap<String, Value>,
}

impl MapSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }
}

impl SettingsStore for MapSettings {
    fn get(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }
}

pub struct SettingsResolver {
    store: Option<Arc<dyn SettingsStore>>,
    reporter: Reporter,
}

impl SettingsResolver {
    pub fn new(store: Option<Arc<dyn SettingsStore>>, sink: Arc<dyn DiagnosticSink>) -> Self {
        Self {
            store,
            reporter: Reporter::new("settings", sink),
        }
    }

    /// Options from editor settings, each field defaulted independently
    pub fn resolve(&self) -> SortingOptions {
        let Some(store) = self.store.as_deref() else {
            self.reporter.debug("No settings store; using defaults");
            return default_options();
        };

        let strategy = match store.get(SETTING_STRATEGY) {
            Some(value) => Strategy::from_value(&value).unwrap_or_else(|| {
                self.reporter.warn(format!(
                    "Invalid {} setting {}; using '{}'",
                    SETTING_STRATEGY, value, DEFAULT_STRATEGY
                ));
                DEFAULT_STRATEGY
            }),
            None => DEFAULT_STRATEGY,
        };

        SortingOptions {
            strategy,
            empty_lines_between_groups: self.flag(
                store,
                SETTING_EMPTY_LINES,
                DEFAULT_EMPTY_LINES,
            ),
            sort_properties_within_groups: self.flag(
                store,
                SETTING_SORT_WITHIN_GROUPS,
                DEFAULT_SORT_WITHIN_GROUPS,
            ),
        }
    }

    fn flag(&self, store: &dyn SettingsStore, key: &str, default: bool) -> bool {
        match store.get(key) {
            Some(Value::Bool(b)) => b,
            Some(other) => {
                self.reporter
                    .warn(format!("Invalid {} setting {}; using {}", key, other, default));
                default
            }
            None => default,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::MemorySink;
    use serde_json::json;

    fn resolve(store: Option<MapSettings>) -> (SortingOptions, Arc<MemorySink>) {
        let sink = Arc::new(MemorySink::new());
        let store = store.map(|s| Arc::new(s) as Arc<dyn SettingsStore>);
        (SettingsResolver::new(store, sink.clone()).resolve(), sink)
    }

    #[test]
    fn test_no_store_yields_defaults() {
        let (options, _) = resolve(None);
        assert_eq!(options, SortingOptions::default());
    }

    #[test]
    fn test_empty_store_yields_defaults() {
        let (options, sink) = resolve(Some(MapSettings::new()));
        assert_eq!(options, SortingOptions::default());
        assert!(sink.entries().is_empty());
    }

    #[test]
    fn test_reads_all_keys() {
        let store = MapSettings::new()
            .with("sorting.strategy", "concentric")
            .with("sorting.emptyLinesBetweenGroups", false)
            .with("sorting.sortPropertiesWithinGroups", false);

        let (options, _) = resolve(Some(store));
        assert_eq!(options.strategy, Strategy::Concentric);
        assert!(!options.empty_lines_between_groups);
        assert!(!options.sort_properties_within_groups);
    }

    #[test]
    fn test_invalid_values_fall_back_per_field() {
        let store = MapSettings::new()
            .with("sorting.strategy", "random")
            .with("sorting.emptyLinesBetweenGroups", json!("false"))
            .with("sorting.sortPropertiesWithinGroups", false);

        let (options, sink) = resolve(Some(store));
        assert_eq!(options.strategy, Strategy::Grouped);
        assert!(options.empty_lines_between_groups);
        assert!(!options.sort_properties_within_groups);
        assert_eq!(sink.entries().len(), 2);
    }
}
