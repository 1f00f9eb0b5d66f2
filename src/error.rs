//! Error types for the shell

use app_ui::NavigationError;
use storage::PersistenceError;
use thiserror::Error;

/// Shell-level errors
#[derive(Debug, Error)]
pub enum ShellError {
    /// Invalid navigation configuration or snapshot
    #[error("Navigation error: {0}")]
    Navigation(#[from] NavigationError),

    /// Saving or loading state failed
    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    /// Configuration could not be parsed
    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type for shell operations
pub type Result<T> = std::result::Result<T, ShellError>;
