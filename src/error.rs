//! Error types for walletmeta

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetadataError {
    /// The selected network id matches no public or private descriptor.
    #[error("Unknown network selected: {0}")]
    UnknownNetwork(String),
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("Block height sync failed: {0}")]
    HeightSync(String),
    #[error("Settings error: {0}")]
    SettingsError(String),
    #[error("Config error: {0}")]
    ConfigError(String),
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<std::io::Error> for MetadataError {
    fn from(err: std::io::Error) -> Self {
        MetadataError::IoError(err.to_string())
    }
}

impl From<serde_json::Error> for MetadataError {
    fn from(err: serde_json::Error) -> Self {
        MetadataError::SerializationError(err.to_string())
    }
}

impl From<toml::de::Error> for MetadataError {
    fn from(err: toml::de::Error) -> Self {
        MetadataError::ConfigError(err.to_string())
    }
}

impl From<reqwest::Error> for MetadataError {
    fn from(err: reqwest::Error) -> Self {
        MetadataError::NetworkError(err.to_string())
    }
}

/// Convenience alias used across the crate
pub type Result<T> = std::result::Result<T, MetadataError>;
