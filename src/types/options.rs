//! Sorting option value types and resolution results

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Property ordering strategy understood by the ordering plugin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Alphabetical,
    #[default]
    Grouped,
    Concentric,
    Idiomatic,
    Custom,
}

impl Strategy {
    pub const ALL: [Strategy; 5] = [
        Strategy::Alphabetical,
        Strategy::Grouped,
        Strategy::Concentric,
        Strategy::Idiomatic,
        Strategy::Custom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Alphabetical => "alphabetical",
            Strategy::Grouped => "grouped",
            Strategy::Concentric => "concentric",
            Strategy::Idiomatic => "idiomatic",
            Strategy::Custom => "custom",
        }
    }

    /// Accept a JSON value only if it is one of the known strategy names
    pub fn from_value(value: &Value) -> Option<Self> {
        value.as_str().and_then(|s| s.parse().ok())
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Strategy::ALL
            .into_iter()
            .find(|strategy| strategy.as_str() == s)
            .ok_or_else(|| format!("unknown strategy '{}'", s))
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fully populated sorting options handed to the ordering rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortingOptions {
    pub strategy: Strategy,
    pub empty_lines_between_groups: bool,
    pub sort_properties_within_groups: bool,
}

impl Default for SortingOptions {
    fn default() -> Self {
        Self {
            strategy: Strategy::Grouped,
            empty_lines_between_groups: true,
            sort_properties_within_groups: true,
        }
    }
}

impl SortingOptions {
    /// Rule setting as embedded in a lint configuration: `[true, { ... }]`
    pub fn rule_argument(&self) -> Value {
        let options = *self;
        serde_json::json!([true, options])
    }
}

/// Which layer supplied the effective options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigSource {
    #[default]
    Default,
    /// Editor-level settings
    Editor,
    /// Discovered project configuration file
    Project,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConfigSource::Default => "default",
            ConfigSource::Editor => "editor",
            ConfigSource::Project => "project",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedConfig {
    pub options: SortingOptions,
    pub source: ConfigSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_path: Option<PathBuf>,
}

impl ResolvedConfig {
    pub fn editor(options: SortingOptions) -> Self {
        Self {
            options,
            source: ConfigSource::Editor,
            config_path: None,
        }
    }

    pub fn project(options: SortingOptions, config_path: PathBuf) -> Self {
        Self {
            options,
            source: ConfigSource::Project,
            config_path: Some(config_path),
        }
    }
}

/// A configuration file located during discovery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigFileDescriptor {
    pub path: PathBuf,
    pub exists: bool,
}

/// The option object of the ordering rule, as written by the user.
///
/// Fields holding a value of the wrong JSON type read as `None`, the same
/// as if they were missing. Unknown keys are kept in `extra` and ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPluginRuleConfig {
    #[serde(default, deserialize_with = "lenient")]
    pub strategy: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub empty_lines_between_groups: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub sort_properties_within_groups: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RawPluginRuleConfig {
    /// Parse from a JSON value; `None` unless the value is an object
    pub fn from_value(value: &Value) -> Option<Self> {
        if !value.is_object() {
            return None;
        }
        serde_json::from_value(value.clone()).ok()
    }

    /// Overlay the fields set here on top of `baseline`
    pub fn apply_to(&self, baseline: &SortingOptions) -> SortingOptions {
        SortingOptions {
            strategy: self
                .strategy
                .as_deref()
                .and_then(|s| s.parse().ok())
                .unwrap_or(baseline.strategy),
            empty_lines_between_groups: self
                .empty_lines_between_groups
                .unwrap_or(baseline.empty_lines_between_groups),
            sort_properties_within_groups: self
                .sort_properties_within_groups
                .unwrap_or(baseline.sort_properties_within_groups),
        }
    }
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}
