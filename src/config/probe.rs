//! Filesystem access used by the resolution components

use crate::types::ConfigError;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Existence and read access to configuration files.
///
/// Callers treat any error as "file effectively absent".
pub trait FileProbe: Send + Sync {
    fn exists(&self, path: &Path) -> bool;

    fn read_text(&self, path: &Path) -> Result<String, ConfigError>;
}

/// [`FileProbe`] over the local filesystem
#[derive(Debug, Default, Clone, Copy)]
pub struct FsProbe;

impl FileProbe for FsProbe {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read_text(&self, path: &Path) -> Result<String, ConfigError> {
        fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::FileNotFound(path.to_path_buf()),
            _ => ConfigError::Io(e),
        })
    }
}

/// In-memory [`FileProbe`] for hosts that keep files outside the local disk.
///
/// Counts every access so callers can check whether the filesystem was touched.
#[derive(Debug, Default)]
pub struct MemoryProbe {
    files: HashMap<PathBuf, String>,
    accesses: AtomicUsize,
}

impl MemoryProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.files.insert(path.into(), content.into());
        self
    }

    pub fn accesses(&self) -> usize {
        self.accesses.load(Ordering::SeqCst)
    }
}

impl FileProbe for MemoryProbe {
    fn exists(&self, path: &Path) -> bool {
        self.accesses.fetch_add(1, Ordering::SeqCst);
        self.files.contains_key(path)
    }

    fn read_text(&self, path: &Path) -> Result<String, ConfigError> {
        self.accesses.fetch_add(1, Ordering::SeqCst);
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| ConfigError::FileNotFound(path.to_path_buf()))
    }
}
