//! Shared types: errors, options, and resolution results

pub mod errors;
pub mod options;

pub use errors::{ConfigError, ErrorKind, Result};
pub use options::{
    ConfigFileDescriptor, ConfigSource, RawPluginRuleConfig, ResolvedConfig, SortingOptions,
    Strategy,
};
