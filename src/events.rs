// src/events.rs
//! Machine-readable journal of collector runs.
//!
//! Events are appended to `.demandboard/events.jsonl`.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    CollectStarted {
        query: String,
    },
    SearchFailed {
        page: u32,
        error: String,
    },
    RepositorySkipped {
        name: String,
        reason: String,
    },
    SnapshotPublished {
        path: String,
        projects: usize,
        skipped: usize,
    },
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BoardEvent {
    pub timestamp: DateTime<Utc>,
    pub kind: EventKind,
}

/// Where journal events go. `Disabled` drops them.
#[derive(Debug, Clone)]
pub enum EventLogger {
    File { log_path: PathBuf },
    Disabled,
}

impl EventLogger {
    #[must_use]
    pub fn new(root: &Path) -> Self {
        Self::File {
            log_path: root.join(".demandboard").join("events.jsonl"),
        }
    }

    #[must_use]
    pub fn disabled() -> Self {
        Self::Disabled
    }

    pub fn log(&self, kind: EventKind) {
        let Self::File { log_path } = self else {
            return;
        };
        // Best-effort: a journal failure never affects the run.
        if let Err(e) = Self::serialize_event(kind).and_then(|json| append_line(log_path, &json))
        {
            log::warn!("could not journal event to {}: {e}", log_path.display());
        }
    }

    fn serialize_event(kind: EventKind) -> Result<String> {
        let event = BoardEvent {
            timestamp: Utc::now(),
            kind,
        };
        Ok(serde_json::to_string(&event)?)
    }
}

fn append_line(path: &Path, line: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{line}")?;
    Ok(())
}
