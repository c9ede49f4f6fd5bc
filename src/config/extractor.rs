//! Ordering rule option extraction
//!
//! Reads `rules["<namespace>/order"]` from a parsed lint configuration. The
//! rule setting is `[enabled, { strategy?, emptyLinesBetweenGroups?,
//! sortPropertiesWithinGroups? }]`; every field missing or invalid there is
//! taken from the caller's baseline.

use crate::diagnostics::{DiagnosticSink, Reporter};
use crate::types::{RawPluginRuleConfig, SortingOptions, Strategy};
use serde_json::Value;
use std::sync::Arc;

pub struct OptionExtractor {
    reporter: Reporter,
}

impl OptionExtractor {
    pub fn new(sink: Arc<dyn DiagnosticSink>) -> Self {
        Self {
            reporter: Reporter::new("extractor", sink),
        }
    }

    /// Build options from `config`, falling back to `baseline` per field
    pub fn extract(
        &self,
        config: &Value,
        rule_key: &str,
        baseline: &SortingOptions,
    ) -> SortingOptions {
        let Some(raw) = self.rule_options(config, rule_key) else {
            self.reporter
                .debug(format!("No options for rule '{}'; using baseline", rule_key));
            return *baseline;
        };

        if let Some(strategy) = raw.strategy.as_deref() {
            if strategy.parse::<Strategy>().is_err() {
                self.reporter.warn(format!(
                    "Ignoring unknown strategy '{}' for rule '{}'",
                    strategy, rule_key
                ));
            }
        }
        if !raw.extra.is_empty() {
            let keys: Vec<&str> = raw.extra.keys().map(String::as_str).collect();
            self.reporter
                .debug(format!("Ignoring unrecognized options: {}", keys.join(", ")));
        }

        raw.apply_to(baseline)
    }

    fn rule_options(&self, config: &Value, rule_key: &str) -> Option<RawPluginRuleConfig> {
        let setting = config.get("rules")?.get(rule_key)?.as_array()?;
        if setting.len() < 2 {
            return None;
        }
        RawPluginRuleConfig::from_value(&setting[1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::defaults::RULE_KEY;
    use crate::diagnostics::MemorySink;
    use serde_json::json;

    fn extractor() -> (OptionExtractor, Arc<MemorySink>) {
        let sink = Arc::new(MemorySink::new());
        (OptionExtractor::new(sink.clone()), sink)
    }

    fn baseline() -> SortingOptions {
        SortingOptions {
            strategy: Strategy::Concentric,
            empty_lines_between_groups: false,
            sort_properties_within_groups: false,
        }
    }

    #[test]
    fn test_extract_all_fields() {
        let (extractor, _) = extractor();
        let config = json!({
            "plugins": ["stylelint-oldfashioned-order"],
            "rules": {
                "oldfashioned/order": [true, {
                    "strategy": "alphabetical",
                    "emptyLinesBetweenGroups": true,
                    "sortPropertiesWithinGroups": true
                }]
            }
        });

        let options = extractor.extract(&config, RULE_KEY, &baseline());
        assert_eq!(options.strategy, Strategy::Alphabetical);
        assert!(options.empty_lines_between_groups);
        assert!(options.sort_properties_within_groups);
    }

    #[test]
    fn test_invalid_strategy_uses_baseline() {
        let (extractor, sink) = extractor();
        let config = json!({
            "rules": { "oldfashioned/order": [true, { "strategy": "not-a-real-strategy" }] }
        });

        let options = extractor.extract(&config, RULE_KEY, &SortingOptions::default());
        assert_eq!(options.strategy, Strategy::Grouped);

        let options = extractor.extract(&config, RULE_KEY, &baseline());
        assert_eq!(options.strategy, Strategy::Concentric);

        assert!(sink
            .entries()
            .iter()
            .any(|d| d.message.contains("not-a-real-strategy")));
    }

    #[test]
    fn test_omitted_fields_inherit_baseline() {
        let (extractor, _) = extractor();
        let config = json!({
            "rules": { "oldfashioned/order": [true, { "emptyLinesBetweenGroups": true }] }
        });

        let options = extractor.extract(&config, RULE_KEY, &baseline());
        assert_eq!(options.strategy, Strategy::Concentric);
        assert!(options.empty_lines_between_groups);
        assert!(!options.sort_properties_within_groups);
    }

    #[test]
    fn test_non_boolean_flags_ignored() {
        let (extractor, _) = extractor();
        let config = json!({
            "rules": { "oldfashioned/order": [true, {
                "emptyLinesBetweenGroups": "true",
                "sortPropertiesWithinGroups": 1
            }] }
        });

        assert_eq!(extractor.extract(&config, RULE_KEY, &baseline()), baseline());
    }

    #[test]
    fn test_rule_shapes_without_options() {
        let (extractor, _) = extractor();
        for config in [
            json!({}),
            json!({ "rules": {} }),
            json!({ "rules": { "oldfashioned/order": true } }),
            json!({ "rules": { "oldfashioned/order": [true] } }),
            json!({ "rules": { "oldfashioned/order": [true, "alphabetical"] } }),
            json!({ "rules": { "other/order": [true, { "strategy": "alphabetical" }] } }),
        ] {
            assert_eq!(
                extractor.extract(&config, RULE_KEY, &baseline()),
                baseline(),
                "{}",
                config
            );
        }
    }
}
