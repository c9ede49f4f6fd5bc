use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Invalid JSON in {path}: {source}")]
    InvalidJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(PathBuf),

    #[error("Invalid settings file {path}: {message}")]
    InvalidSettings { path: PathBuf, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Stable classification of [`ConfigError`], used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidInput,
    FileNotFound,
    InvalidJson,
    UnsupportedFormat,
    InvalidSettings,
    Io,
}

impl ConfigError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConfigError::InvalidInput(_) => ErrorKind::InvalidInput,
            ConfigError::FileNotFound(_) => ErrorKind::FileNotFound,
            ConfigError::InvalidJson { .. } => ErrorKind::InvalidJson,
            ConfigError::UnsupportedFormat(_) => ErrorKind::UnsupportedFormat,
            ConfigError::InvalidSettings { .. } => ErrorKind::InvalidSettings,
            ConfigError::Io(_) => ErrorKind::Io,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::InvalidInput => "INVALID_INPUT",
            ErrorKind::FileNotFound => "FILE_NOT_FOUND",
            ErrorKind::InvalidJson => "INVALID_JSON",
            ErrorKind::UnsupportedFormat => "UNSUPPORTED_FORMAT",
            ErrorKind::InvalidSettings => "INVALID_SETTINGS",
            ErrorKind::Io => "IO",
        };
        f.write_str(name)
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_matches_variant() {
        let err = ConfigError::FileNotFound(PathBuf::from("/nope/.stylelintrc"));
        assert_eq!(err.kind(), ErrorKind::FileNotFound);

        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = ConfigError::InvalidJson {
            path: PathBuf::from("package.json"),
            source: json_err,
        };
        assert_eq!(err.kind(), ErrorKind::InvalidJson);
        assert!(err.to_string().starts_with("Invalid JSON in package.json"));
    }

    #[test]
    fn test_kind_display_uses_taxonomy_names() {
        assert_eq!(ErrorKind::InvalidInput.to_string(), "INVALID_INPUT");
        assert_eq!(ErrorKind::UnsupportedFormat.to_string(), "UNSUPPORTED_FORMAT");
    }
}
