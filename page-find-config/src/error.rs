//! Typed error variants for the page-find-config crate.
//!
//! Callers can match on specific failure modes when loading or saving
//! configuration instead of relying on opaque strings.

use thiserror::Error;

/// Errors that can occur when loading, saving, or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An I/O error occurred reading or writing the config file.
    #[error("I/O error reading config: {0}")]
    Io(#[from] std::io::Error),

    /// The config file contained invalid YAML that could not be parsed.
    #[error("YAML parse error in config: {0}")]
    Parse(#[source] serde_yaml_ng::Error),

    /// The config could not be serialized back to YAML.
    #[error("YAML serialize error in config: {0}")]
    Serialize(#[source] serde_yaml_ng::Error),

    /// A field value failed semantic validation.
    ///
    /// The inner string describes which field is invalid and why.
    #[error("Config validation error: {0}")]
    Validation(String),
}
