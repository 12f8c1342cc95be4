use std::path::{Path, PathBuf};

use thiserror::Error;

/// Failure taxonomy for every command. Each variant maps to one phase of a
/// command so the caller can report the specific cause.
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("API call error: {0}")]
    Transport(String),

    #[error("Invalid json format from API response: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("Unable to decode API response: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("File path error for {path:?}: {reason}")]
    FileSystem { path: PathBuf, reason: String },

    #[error("Could not connect to the ftp server '{server}': {reason}")]
    Connection { server: String, reason: String },

    #[error("Could not login to the ftp server '{server}': {reason}")]
    Auth { server: String, reason: String },

    #[error("Could not transfer file to the ftp server '{server}': {reason}")]
    Transfer { server: String, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ChartError {
    pub fn file_system(path: &Path, reason: impl ToString) -> Self {
        Self::FileSystem {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }

    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Transport(_)
            | Self::Parse(_)
            | Self::Decode(_)
            | Self::FileSystem { .. }
            | Self::Connection { .. }
            | Self::Auth { .. }
            | Self::Transfer { .. }
            | Self::Config(_) => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, ChartError>;
