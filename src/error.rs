// src/error.rs
use thiserror::Error;

/// Failures talking to the repository-hosting API.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("rate limited by {url} after {attempts} attempt(s)")]
    RateLimited { url: String, attempts: u32 },

    #[error("could not decode response from {url}: {reason}")]
    Decode { url: String, reason: String },

    #[error("request budget of {limit} exhausted")]
    BudgetExhausted { limit: u32 },

    /// Used by non-HTTP implementations of the hosting API.
    #[error("{0}")]
    Other(String),
}

/// Failures loading a snapshot into the viewer.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to load data: HTTP {status} {reason}")]
    Status { status: u16, reason: String },

    #[error("Failed to load data: {0}")]
    Transport(String),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Snapshot is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Failures that abort a whole collection run.
#[derive(Debug, Error)]
pub enum CollectError {
    #[error("repository search failed on page {page}: {source}")]
    Search { page: u32, source: ApiError },

    #[error("I/O error: {source} (path: {path})")]
    Io {
        source: std::io::Error,
        path: String,
    },

    #[error("could not serialize snapshot: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CollectError>;
