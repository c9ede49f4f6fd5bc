//! Configuration resolution with 2-tier precedence
//!
//! Priority order (highest to lowest):
//! 1. Project config (closest stylelint config enabling the ordering plugin)
//! 2. Editor settings (which themselves fall back to built-in defaults)
//!
//! Project config is a sparse override: fields it does not set keep the
//! editor setting. Nothing is cached, every call reads the files again.

use crate::config::defaults::RULE_KEY;
use crate::config::detector::PluginDetector;
use crate::config::discovery::ConfigDiscovery;
use crate::config::extractor::OptionExtractor;
use crate::config::format::{load_config_value, ConfigFormat};
use crate::config::probe::{FileProbe, FsProbe};
use crate::config::settings::{SettingsResolver, SettingsStore};
use crate::diagnostics::{DiagnosticSink, Reporter, Severity, TracingSink};
use crate::document::Document;
use crate::types::{ConfigError, ResolvedConfig};
use std::sync::Arc;

pub struct ConfigLoader {
    probe: Arc<dyn FileProbe>,
    discovery: ConfigDiscovery,
    detector: PluginDetector,
    extractor: OptionExtractor,
    settings: SettingsResolver,
    reporter: Reporter,
}

impl ConfigLoader {
    pub fn new(
        probe: Arc<dyn FileProbe>,
        settings: Option<Arc<dyn SettingsStore>>,
        sink: Arc<dyn DiagnosticSink>,
    ) -> Self {
        Self {
            discovery: ConfigDiscovery::new(Arc::clone(&probe), Arc::clone(&sink)),
            detector: PluginDetector::new(Arc::clone(&probe), Arc::clone(&sink)),
            extractor: OptionExtractor::new(Arc::clone(&sink)),
            settings: SettingsResolver::new(settings, Arc::clone(&sink)),
            reporter: Reporter::new("loader", sink),
            probe,
        }
    }

    /// Loader over the local filesystem reporting through `tracing`
    pub fn with_settings(settings: Option<Arc<dyn SettingsStore>>) -> Self {
        Self::new(Arc::new(FsProbe), settings, Arc::new(TracingSink))
    }

    pub fn discovery(&self) -> &ConfigDiscovery {
        &self.discovery
    }

    pub fn detector(&self) -> &PluginDetector {
        &self.detector
    }

    /// Resolve the effective sorting options for `document`
    pub fn resolve(&self, document: Option<&Document>) -> ResolvedConfig {
        let editor_options = self.settings.resolve();
        let editor = ResolvedConfig::editor(editor_options);

        let Some(document) = document else {
            self.reporter.debug("No document; using editor settings");
            return editor;
        };

        let Some(file_path) = document.file_path() else {
            self.reporter.debug(format!(
                "{} is not file-backed; using editor settings",
                document.uri()
            ));
            return editor;
        };

        let Some(start_dir) = file_path.parent() else {
            self.reporter.error(
                Severity::Warn,
                &ConfigError::InvalidInput(format!(
                    "document path has no parent: {}",
                    file_path.display()
                )),
            );
            return editor;
        };

        let Some(descriptor) = self.discovery.find(start_dir) else {
            return editor;
        };

        if !self.detector.detect(&descriptor.path) {
            self.reporter.info(format!(
                "{} does not enable the ordering plugin; using editor settings",
                descriptor.path.display()
            ));
            return editor;
        }

        if !ConfigFormat::of(&descriptor.path).is_parseable() {
            self.reporter.info(format!(
                "Using {} without reading its options",
                descriptor.path.display()
            ));
            return ResolvedConfig::project(editor_options, descriptor.path);
        }

        match load_config_value(self.probe.as_ref(), &descriptor.path) {
            Ok(Some(config)) => {
                let options = self.extractor.extract(&config, RULE_KEY, &editor_options);
                self.reporter.info(format!(
                    "Using project config {} (strategy: {})",
                    descriptor.path.display(),
                    options.strategy
                ));
                ResolvedConfig::project(options, descriptor.path)
            }
            Ok(None) => {
                self.reporter.warn(format!(
                    "{} lost its lint configuration; using editor settings",
                    descriptor.path.display()
                ));
                editor
            }
            Err(e) => {
                self.reporter.error(Severity::Warn, &e);
                editor
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::probe::MemoryProbe;
    use crate::config::settings::MapSettings;
    use crate::diagnostics::MemorySink;
    use crate::types::{ConfigSource, SortingOptions, Strategy};
    use std::path::{Path, PathBuf};

    const RC: &str = r#"{
        "plugins": ["stylelint-oldfashioned-order"],
        "rules": { "oldfashioned/order": [true, { "strategy": "alphabetical" }] }
    }"#;

    fn editor_settings() -> Arc<dyn SettingsStore> {
        Arc::new(
            MapSettings::new()
                .with("sorting.strategy", "concentric")
                .with("sorting.emptyLinesBetweenGroups", false),
        )
    }

    fn loader(probe: Arc<MemoryProbe>) -> (ConfigLoader, Arc<MemorySink>) {
        let sink = Arc::new(MemorySink::new());
        (
            ConfigLoader::new(probe, Some(editor_settings()), sink.clone()),
            sink,
        )
    }

    fn doc(path: &str) -> Document {
        Document::from_path(Path::new(path)).unwrap()
    }

    #[cfg(unix)]
    #[test]
    fn test_project_overrides_editor() {
        let probe = Arc::new(MemoryProbe::new().with_file("/site/.stylelintrc", RC));
        let (loader, _) = loader(probe);

        let resolved = loader.resolve(Some(&doc("/site/css/main.css")));
        assert_eq!(resolved.source, ConfigSource::Project);
        assert_eq!(resolved.config_path, Some(PathBuf::from("/site/.stylelintrc")));
        assert_eq!(resolved.options.strategy, Strategy::Alphabetical);
        // Not set in the project file: inherited from editor settings
        assert!(!resolved.options.empty_lines_between_groups);
        assert!(resolved.options.sort_properties_within_groups);
    }

    #[cfg(unix)]
    #[test]
    fn test_no_project_config_uses_editor() {
        let probe = Arc::new(MemoryProbe::new());
        let (loader, _) = loader(probe);

        let resolved = loader.resolve(Some(&doc("/site/css/main.css")));
        assert_eq!(resolved, ResolvedConfig::editor(loader.settings.resolve()));
    }

    #[test]
    fn test_virtual_document_skips_filesystem() {
        let probe = Arc::new(MemoryProbe::new());
        let (loader, _) = loader(Arc::clone(&probe));

        let untitled = Document::untitled("Untitled-1").unwrap();
        let resolved = loader.resolve(Some(&untitled));
        assert_eq!(resolved.source, ConfigSource::Editor);
        assert_eq!(resolved.options.strategy, Strategy::Concentric);

        let resolved = loader.resolve(None);
        assert_eq!(resolved.source, ConfigSource::Editor);
        assert_eq!(probe.accesses(), 0);
    }

    #[cfg(unix)]
    #[test]
    fn test_plugin_not_enabled_uses_editor() {
        let probe = Arc::new(MemoryProbe::new().with_file(
            "/site/.stylelintrc.json",
            r#"{"plugins": ["stylelint-order"], "rules": {"oldfashioned/order": [true, {"strategy": "custom"}]}}"#,
        ));
        let (loader, _) = loader(probe);

        let resolved = loader.resolve(Some(&doc("/site/main.css")));
        assert_eq!(resolved.source, ConfigSource::Editor);
        assert_eq!(resolved.options.strategy, Strategy::Concentric);
        assert_eq!(resolved.config_path, None);
    }

    #[cfg(unix)]
    #[test]
    fn test_unparseable_project_config_falls_back() {
        let probe = Arc::new(
            MemoryProbe::new().with_file("/site/.stylelintrc", "{ \"plugins\": [\"oldfashioned\""),
        );
        let (loader, sink) = loader(probe);

        let resolved = loader.resolve(Some(&doc("/site/main.css")));
        assert_eq!(resolved.source, ConfigSource::Editor);
        assert!(sink.contains_kind(crate::types::ErrorKind::InvalidJson));
    }

    #[cfg(unix)]
    #[test]
    fn test_script_config_keeps_editor_options() {
        let probe = Arc::new(
            MemoryProbe::new().with_file("/site/stylelint.config.js", "module.exports = {};"),
        );
        let (loader, _) = loader(probe);

        let resolved = loader.resolve(Some(&doc("/site/a/b.scss")));
        assert_eq!(resolved.source, ConfigSource::Project);
        assert_eq!(
            resolved.config_path,
            Some(PathBuf::from("/site/stylelint.config.js"))
        );
        assert_eq!(resolved.options, loader.settings.resolve());
    }

    #[cfg(unix)]
    #[test]
    fn test_manifest_config() {
        let probe = Arc::new(MemoryProbe::new().with_file(
            "/site/package.json",
            r#"{
                "name": "site",
                "stylelint": {
                    "plugins": ["@scope/stylelint-oldfashioned-order"],
                    "rules": {"oldfashioned/order": [true, {"sortPropertiesWithinGroups": false}]}
                }
            }"#,
        ));
        let (loader, _) = loader(probe);

        let resolved = loader.resolve(Some(&doc("/site/src/app.sass")));
        assert_eq!(resolved.source, ConfigSource::Project);
        assert_eq!(
            resolved.options,
            SortingOptions {
                strategy: Strategy::Concentric,
                empty_lines_between_groups: false,
                sort_properties_within_groups: false,
            }
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_resolve_is_idempotent() {
        let probe = Arc::new(MemoryProbe::new().with_file("/site/.stylelintrc", RC));
        let (loader, _) = loader(probe);
        let document = doc("/site/main.css");

        assert_eq!(
            loader.resolve(Some(&document)),
            loader.resolve(Some(&document))
        );
    }
}
