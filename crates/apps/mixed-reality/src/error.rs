//! Error types for the mixed reality app

use std::path::PathBuf;

/// Errors raised while loading configuration or scene fixtures
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A file could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid TOML for [`crate::AppConfig`]
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Scene fixture is not valid JSON
    #[error("Scene parse error: {0}")]
    SceneParse(#[from] serde_json::Error),

    /// A configuration value is out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for app operations
pub type Result<T> = std::result::Result<T, Error>;

pub(crate) fn read_file(path: &std::path::Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}
