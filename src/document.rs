//! Document handles
//!
//! A document is identified by a URI. Only `file:` URIs are backed by the
//! filesystem; anything else (`untitled:`, in-memory schemes) is virtual.

use crate::types::ConfigError;
use std::path::{Path, PathBuf};
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    uri: Url,
}

impl Document {
    /// Create a document for an absolute filesystem path
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let uri = Url::from_file_path(path).map_err(|_| {
            ConfigError::InvalidInput(format!("not an absolute path: {}", path.display()))
        })?;
        Ok(Self { uri })
    }

    /// Parse a document URI such as `file:///a/b.css` or `untitled:Untitled-1`
    pub fn parse(uri: &str) -> Result<Self, ConfigError> {
        let uri = Url::parse(uri)
            .map_err(|e| ConfigError::InvalidInput(format!("invalid URI '{}': {}", uri, e)))?;
        Ok(Self { uri })
    }

    /// An unsaved buffer with no location on disk
    pub fn untitled(name: &str) -> Result<Self, ConfigError> {
        Self::parse(&format!("untitled:{}", name))
    }

    pub fn uri(&self) -> &Url {
        &self.uri
    }

    pub fn is_file_backed(&self) -> bool {
        self.uri.scheme() == "file"
    }

    /// Local path of a file-backed document
    pub fn file_path(&self) -> Option<PathBuf> {
        if !self.is_file_backed() {
            return None;
        }
        self.uri.to_file_path().ok()
    }
}
