// src/types.rs
//! The snapshot document shared by the collector and the viewer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One tracked repository. Identity is the `url`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub name: String,
    pub url: String,
    pub stars: u64,
    pub new_stars_30d: u64,
    pub new_open_issues: u64,
    pub contributors: u64,
    pub demand_index: f64,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    pub date_fetched: DateTime<Utc>,
}

impl ProjectRecord {
    /// Language label, or `""` when the source reported none.
    #[must_use]
    pub fn language_label(&self) -> &str {
        self.language.as_deref().unwrap_or("")
    }

    #[must_use]
    pub fn keywords_label(&self) -> String {
        self.keywords.join(", ")
    }
}

/// A complete, immutable collection run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub last_updated: DateTime<Utc>,
    pub projects: Vec<ProjectRecord>,
}

impl Snapshot {
    #[must_use]
    pub fn new(last_updated: DateTime<Utc>, projects: Vec<ProjectRecord>) -> Self {
        Self {
            last_updated,
            projects,
        }
    }

    /// Parses a snapshot document.
    ///
    /// # Errors
    /// Returns error if the body is not a snapshot-shaped JSON document.
    pub fn from_json(body: &str) -> serde_json::Result<Self> {
        serde_json::from_str(body)
    }

    /// Serializes the snapshot as indented JSON.
    ///
    /// # Errors
    /// Returns error if serialization fails.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
