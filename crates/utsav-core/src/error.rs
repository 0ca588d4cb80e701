//! Error types for Utsav

use crate::id::EntityId;
use thiserror::Error;

/// The main error type for Utsav operations
#[derive(Debug, Error)]
pub enum UtsavError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Projectile {0} has already exploded")]
    AlreadyExploded(EntityId),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("TOML serialization error: {0}")]
    TomlSerError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias for Utsav operations
pub type Result<T> = std::result::Result<T, UtsavError>;

impl UtsavError {
    /// Shorthand for an `InvalidArgument` with a formatted message
    pub fn invalid(msg: impl Into<String>) -> Self {
        UtsavError::InvalidArgument(msg.into())
    }
}

impl From<toml::de::Error> for UtsavError {
    fn from(err: toml::de::Error) -> Self {
        UtsavError::TomlParseError(err.to_string())
    }
}

impl From<toml::ser::Error> for UtsavError {
    fn from(err: toml::ser::Error) -> Self {
        UtsavError::TomlSerError(err.to_string())
    }
}
