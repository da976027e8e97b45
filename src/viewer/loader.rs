// src/viewer/loader.rs
//! Dataset Loader: the viewer's single point of I/O.

use crate::error::LoadError;
use crate::types::{ProjectRecord, Snapshot};
use chrono::{DateTime, Utc};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Somewhere a snapshot document can be fetched from.
pub trait SnapshotSource {
    /// Returns the raw snapshot body.
    ///
    /// # Errors
    /// Returns error on a non-success response or an unreadable resource.
    fn fetch(&self) -> Result<String, LoadError>;

    fn describe(&self) -> String;
}

#[derive(Debug, Clone)]
pub struct FileSource {
    pub path: PathBuf,
}

impl SnapshotSource for FileSource {
    fn fetch(&self) -> Result<String, LoadError> {
        fs::read_to_string(&self.path).map_err(|source| LoadError::Io {
            path: self.path.display().to_string(),
            source,
        })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[derive(Debug, Clone)]
pub struct HttpSource {
    pub url: String,
}

impl SnapshotSource for HttpSource {
    fn fetch(&self) -> Result<String, LoadError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| LoadError::Transport(e.to_string()))?;
        let response = client
            .get(&self.url)
            .send()
            .map_err(|e| LoadError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("").to_string(),
            });
        }
        response
            .text()
            .map_err(|e| LoadError::Transport(e.to_string()))
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Picks an HTTP source for `http(s)://` locations, a file source otherwise.
#[must_use]
pub fn source_for(location: &str) -> Box<dyn SnapshotSource> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Box::new(HttpSource {
            url: location.to_string(),
        })
    } else {
        Box::new(FileSource {
            path: PathBuf::from(location),
        })
    }
}

/// The loaded collection. Only [`Dataset::load`] mutates it.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    snapshot: Option<Snapshot>,
}

impl Dataset {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        Self {
            snapshot: Some(snapshot),
        }
    }

    /// Fetches and parses a snapshot, replacing the current one on success.
    ///
    /// # Errors
    /// Returns error if the fetch fails or the body is malformed; the
    /// previously loaded collection is kept as it was.
    pub fn load(&mut self, source: &dyn SnapshotSource) -> Result<(), LoadError> {
        let body = source.fetch()?;
        let snapshot = Snapshot::from_json(&body)?;
        log::debug!(
            "loaded {} projects from {}",
            snapshot.projects.len(),
            source.describe()
        );
        self.snapshot = Some(snapshot);
        Ok(())
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.snapshot.is_some()
    }

    #[must_use]
    pub fn projects(&self) -> &[ProjectRecord] {
        self.snapshot.as_ref().map_or(&[], |s| s.projects.as_slice())
    }

    #[must_use]
    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.snapshot.as_ref().map(|s| s.last_updated)
    }
}
