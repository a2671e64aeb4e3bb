use thiserror::Error;

/// Unified error type for autover operations
#[derive(Error, Debug)]
pub enum AutoverError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Manifest error: {0}")]
    Manifest(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in autover
pub type Result<T> = std::result::Result<T, AutoverError>;

impl AutoverError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        AutoverError::Config(msg.into())
    }

    /// Create a manifest error with context
    pub fn manifest(msg: impl Into<String>) -> Self {
        AutoverError::Manifest(msg.into())
    }

    /// Create a render error with context
    pub fn render(msg: impl Into<String>) -> Self {
        AutoverError::Render(msg.into())
    }
}
