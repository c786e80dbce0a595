//! Error types for Looping

use thiserror::Error;

/// The main error type for loop operations
#[derive(Debug, Error)]
pub enum LoopError {
    #[error("Invalid fps: {0} (must be positive and finite)")]
    InvalidFps(f64),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Listener error: {0}")]
    Listener(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(String),

    #[error("TOML serialization error: {0}")]
    TomlSer(String),
}

impl LoopError {
    /// Shorthand for a listener failure with a message
    pub fn listener(msg: impl Into<String>) -> Self {
        LoopError::Listener(msg.into())
    }
}

/// Result type alias for loop operations
pub type Result<T> = std::result::Result<T, LoopError>;

impl From<toml::de::Error> for LoopError {
    fn from(err: toml::de::Error) -> Self {
        LoopError::TomlParse(err.to_string())
    }
}

impl From<toml::ser::Error> for LoopError {
    fn from(err: toml::ser::Error) -> Self {
        LoopError::TomlSer(err.to_string())
    }
}
