//! User settings file parsing
//!
//! Settings live in a TOML file. Nested tables are flattened into dotted
//! keys, so `[sorting] strategy = "idiomatic"` is read as `sorting.strategy`.

use crate::config::probe::FileProbe;
use crate::config::settings::SettingsStore;
use crate::diagnostics::{DiagnosticSink, Reporter};
use crate::types::ConfigError;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Environment variable naming an explicit settings file
pub const SETTINGS_ENV: &str = "PROPSORT_SETTINGS";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserSettings {
    values: BTreeMap<String, Value>,
}

impl UserSettings {
    pub fn from_toml_str(path: &Path, content: &str) -> Result<Self, ConfigError> {
        let invalid = |message: String| ConfigError::InvalidSettings {
            path: path.to_path_buf(),
            message,
        };
        let table: toml::Table = toml::from_str(content).map_err(|e| invalid(e.to_string()))?;
        let json = serde_json::to_value(table).map_err(|e| invalid(e.to_string()))?;

        let mut values = BTreeMap::new();
        if let Value::Object(map) = json {
            flatten("", map, &mut values);
        }
        Ok(Self { values })
    }

    pub fn load(probe: &dyn FileProbe, path: &Path) -> Result<Self, ConfigError> {
        let content = probe.read_text(path)?;
        Self::from_toml_str(path, &content)
    }

    /// Settings file locations in priority order:
    /// 1. `$PROPSORT_SETTINGS`
    /// 2. `<config dir>/propsort/settings.toml`
    pub fn candidates() -> Vec<PathBuf> {
        let mut candidates = Vec::new();

        if let Ok(path) = std::env::var(SETTINGS_ENV) {
            if !path.is_empty() {
                candidates.push(PathBuf::from(path));
            }
        }

        if let Some(config_dir) = dirs::config_dir() {
            candidates.push(config_dir.join("propsort").join("settings.toml"));
        }

        candidates
    }

    /// Load the first existing settings file; `Ok(None)` when there is none
    pub fn discover(
        probe: &dyn FileProbe,
        sink: Arc<dyn DiagnosticSink>,
    ) -> Result<Option<(PathBuf, Self)>, ConfigError> {
        Self::discover_in(Self::candidates(), probe, sink)
    }

    /// [`UserSettings::discover`] over an explicit candidate list
    pub fn discover_in(
        candidates: impl IntoIterator<Item = PathBuf>,
        probe: &dyn FileProbe,
        sink: Arc<dyn DiagnosticSink>,
    ) -> Result<Option<(PathBuf, Self)>, ConfigError> {
        let reporter = Reporter::new("settings", sink);

        for path in candidates {
            if probe.exists(&path) {
                reporter.debug(format!("Loading settings from: {}", path.display()));
                let settings = Self::load(probe, &path)?;
                return Ok(Some((path, settings)));
            }
        }

        reporter.debug("No settings file found");
        Ok(None)
    }

    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.values.insert(key.into(), value);
    }

    /// Apply a `key=value` override; the value is parsed as JSON when it
    /// can be, otherwise stored as a plain string.
    pub fn apply_override(&mut self, assignment: &str) -> Result<(), ConfigError> {
        let (key, raw) = assignment.split_once('=').ok_or_else(|| {
            ConfigError::InvalidInput(format!("expected key=value, got '{}'", assignment))
        })?;
        let key = key.trim();
        if key.is_empty() {
            return Err(ConfigError::InvalidInput(format!(
                "empty key in '{}'",
                assignment
            )));
        }
        let value = serde_json::from_str(raw.trim())
            .unwrap_or_else(|_| Value::String(raw.trim().to_string()));
        self.set(key, value);
        Ok(())
    }
}

impl SettingsStore for UserSettings {
    fn get(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }
}

fn flatten(prefix: &str, map: Map<String, Value>, out: &mut BTreeMap<String, Value>) {
    for (key, value) in map {
        let full_key = if prefix.is_empty() {
            key
        } else {
            format!("{}.{}", prefix, key)
        };
        match value {
            Value::Object(nested) => flatten(&full_key, nested, out),
            other => {
                out.insert(full_key, other);
            }
        }
    }
}
