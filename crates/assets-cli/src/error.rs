//! Error types for assets-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from assets-core
    #[error(transparent)]
    Core(#[from] assets_core::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The blocking directory walk panicked or was cancelled
    #[error("directory walk did not complete: {0}")]
    Walk(#[from] tokio::task::JoinError),

    /// JSON output error
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }

    /// Per-item detail worth printing below the headline message.
    pub fn details(&self) -> Vec<String> {
        match self {
            CliError::Core(assets_core::Error::UploadFailed { failures, .. }) => {
                failures.iter().map(ToString::to_string).collect()
            }
            _ => Vec::new(),
        }
    }
}
