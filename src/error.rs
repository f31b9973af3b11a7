use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while fetching the catalog from a record source
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Database connection not available")]
    Unavailable,

    #[error("Local catalog not found: {}", .0.display())]
    CatalogMissing(PathBuf),

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Catalog service returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Local catalog error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl FetchError {
    pub fn kind(&self) -> FailureKind {
        match self {
            FetchError::Unavailable | FetchError::CatalogMissing(_) => FailureKind::Unavailable,
            _ => FailureKind::Failed,
        }
    }
}

/// Errors raised while loading the configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// No record source is configured
    Unavailable,
    /// The source was reached but the fetch did not succeed
    Failed,
}

/// Cloneable summary of a `FetchError`, carried in UI messages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl From<FetchError> for LoadFailure {
    fn from(error: FetchError) -> Self {
        Self {
            kind: error.kind(),
            message: error.to_string(),
        }
    }
}

impl fmt::Display for LoadFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
