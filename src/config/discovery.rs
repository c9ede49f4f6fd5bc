//! Configuration file discovery
//!
//! Walks from a start directory towards the filesystem root, probing
//! [`CONFIG_CANDIDATES`] in priority order in each directory. The first
//! match wins. A `package.json` only counts when it embeds a lint
//! configuration section; otherwise it is skipped as if absent.

use crate::config::defaults::{CONFIG_CANDIDATES, MANIFEST_FILE};
use crate::config::format::{manifest_section, parse_json};
use crate::config::probe::FileProbe;
use crate::diagnostics::{DiagnosticSink, Reporter, Severity};
use crate::types::{ConfigError, ConfigFileDescriptor};
use path_clean::PathClean;
use std::path::Path;
use std::sync::Arc;

pub struct ConfigDiscovery {
    probe: Arc<dyn FileProbe>,
    reporter: Reporter,
}

impl ConfigDiscovery {
    pub fn new(probe: Arc<dyn FileProbe>, sink: Arc<dyn DiagnosticSink>) -> Self {
        Self {
            probe,
            reporter: Reporter::new("discovery", sink),
        }
    }

    /// Find the closest configuration file at or above `start_dir`
    pub fn find(&self, start_dir: &Path) -> Option<ConfigFileDescriptor> {
        if start_dir.as_os_str().is_empty() {
            self.reporter.error(
                Severity::Warn,
                &ConfigError::InvalidInput("empty start directory".to_string()),
            );
            return None;
        }

        let start = start_dir.to_path_buf().clean();
        let mut dir = start.as_path();

        loop {
            for candidate in CONFIG_CANDIDATES {
                let path = dir.join(candidate);
                if !self.probe.exists(&path) {
                    continue;
                }

                if candidate == MANIFEST_FILE && !self.manifest_has_section(&path) {
                    self.reporter.debug(format!(
                        "Skipping {}: no embedded lint configuration",
                        path.display()
                    ));
                    continue;
                }

                self.reporter
                    .debug(format!("Found config: {}", path.display()));
                return Some(ConfigFileDescriptor { path, exists: true });
            }

            // Stop at the root, or at the top of a relative start path
            match dir.parent() {
                Some(parent) if parent != dir && !parent.as_os_str().is_empty() => dir = parent,
                _ => break,
            }
        }

        self.reporter.debug(format!(
            "No config file found from {}",
            start.display()
        ));
        None
    }

    fn manifest_has_section(&self, path: &Path) -> bool {
        let parsed = self
            .probe
            .read_text(path)
            .and_then(|content| parse_json(path, &content));

        match parsed {
            Ok(manifest) => manifest_section(&manifest).is_some(),
            Err(e) => {
                self.reporter.error(Severity::Debug, &e);
                false
            }
        }
    }
}
