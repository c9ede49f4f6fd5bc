//! Configuration file formats and JSON loading

use crate::config::defaults::{MANIFEST_FILE, MANIFEST_KEY, RC_FILE};
use crate::config::probe::FileProbe;
use crate::types::ConfigError;
use serde_json::Value;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// JavaScript module; never evaluated
    Script,
    /// `package.json` with configuration under the manifest key
    Manifest,
    /// Plain JSON, including the extensionless dotfile
    Json,
    /// Anything else (YAML included); not inspected
    Opaque,
}

impl ConfigFormat {
    /// Classify a configuration path by its file name
    pub fn of(path: &Path) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        if name.ends_with(".js") {
            ConfigFormat::Script
        } else if name == MANIFEST_FILE {
            ConfigFormat::Manifest
        } else if name.ends_with(".json") || name == RC_FILE {
            ConfigFormat::Json
        } else {
            ConfigFormat::Opaque
        }
    }

    pub fn is_parseable(&self) -> bool {
        matches!(self, ConfigFormat::Manifest | ConfigFormat::Json)
    }
}

pub fn parse_json(path: &Path, content: &str) -> Result<Value, ConfigError> {
    serde_json::from_str(content).map_err(|source| ConfigError::InvalidJson {
        path: path.to_path_buf(),
        source,
    })
}

/// Extract the embedded configuration from a parsed manifest, if present
pub fn manifest_section(manifest: &Value) -> Option<&Value> {
    manifest.get(MANIFEST_KEY)
}

/// Read a configuration file and return its lint configuration object.
///
/// For a manifest this is the embedded section; `Ok(None)` when the
/// manifest carries none. Script and opaque formats are
/// [`ConfigError::UnsupportedFormat`].
pub fn load_config_value(
    probe: &dyn FileProbe,
    path: &Path,
) -> Result<Option<Value>, ConfigError> {
    let format = ConfigFormat::of(path);
    if !format.is_parseable() {
        return Err(ConfigError::UnsupportedFormat(path.to_path_buf()));
    }

    let content = probe.read_text(path)?;
    let value = parse_json(path, &content)?;

    match format {
        ConfigFormat::Manifest => Ok(manifest_section(&value).cloned()),
        _ => Ok(Some(value)),
    }
}
