//! Ordering plugin detection
//!
//! Decides whether a configuration file references the ordering plugin.
//! JSON-based files are inspected; JavaScript and YAML files cannot be
//! inspected and are assumed to reference it, so callers must tolerate
//! false positives for those formats.

use crate::config::defaults::PLUGIN_ALIASES;
use crate::config::format::{load_config_value, ConfigFormat};
use crate::config::probe::FileProbe;
use crate::diagnostics::{DiagnosticSink, Reporter, Severity};
use crate::types::ConfigError;
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;

pub struct PluginDetector {
    probe: Arc<dyn FileProbe>,
    reporter: Reporter,
}

impl PluginDetector {
    pub fn new(probe: Arc<dyn FileProbe>, sink: Arc<dyn DiagnosticSink>) -> Self {
        Self {
            probe,
            reporter: Reporter::new("detector", sink),
        }
    }

    /// Whether the configuration at `config_path` enables the ordering plugin
    pub fn detect(&self, config_path: &Path) -> bool {
        if config_path.as_os_str().is_empty() {
            self.reporter.error(
                Severity::Warn,
                &ConfigError::InvalidInput("empty config path".to_string()),
            );
            return false;
        }

        if !self.probe.exists(config_path) {
            self.reporter.error(
                Severity::Warn,
                &ConfigError::FileNotFound(config_path.to_path_buf()),
            );
            return false;
        }

        let format = ConfigFormat::of(config_path);
        if !format.is_parseable() {
            self.reporter.error(
                Severity::Debug,
                &ConfigError::UnsupportedFormat(config_path.to_path_buf()),
            );
            self.reporter.info(format!(
                "Assuming {} may enable the ordering plugin",
                config_path.display()
            ));
            return true;
        }

        match load_config_value(self.probe.as_ref(), config_path) {
            Ok(Some(config)) => {
                let found = references_plugin(&config);
                self.reporter.debug(format!(
                    "Ordering plugin {} in {}",
                    if found { "found" } else { "not found" },
                    config_path.display()
                ));
                found
            }
            Ok(None) => {
                self.reporter.debug(format!(
                    "No lint configuration section in {}",
                    config_path.display()
                ));
                false
            }
            Err(e) => {
                self.reporter.error(Severity::Warn, &e);
                false
            }
        }
    }
}

/// True when `plugins` is an array with a string naming the ordering plugin
pub fn references_plugin(config: &Value) -> bool {
    config
        .get("plugins")
        .and_then(Value::as_array)
        .map(|plugins| {
            plugins
                .iter()
                .filter_map(Value::as_str)
                .any(|name| PLUGIN_ALIASES.iter().any(|alias| name.contains(alias)))
        })
        .unwrap_or(false)
}
