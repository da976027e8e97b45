// src/collector/api.rs
//! The narrow view of the hosting API the collector depends on.

use crate::error::ApiError;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

/// The search endpoint serves at most this many results for one query and
/// rejects pages beyond them.
pub const SEARCH_RESULT_LIMIT: u64 = 1000;

/// What to search for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCriteria {
    pub created_after: NaiveDate,
    pub min_stars: u64,
    pub per_page: u32,
}

impl SearchCriteria {
    /// Search-syntax query string, e.g. `created:>2024-05-01 stars:>=100`.
    #[must_use]
    pub fn query(&self) -> String {
        format!(
            "created:>{} stars:>={}",
            self.created_after.format("%Y-%m-%d"),
            self.min_stars
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RepoSummary {
    pub full_name: String,
    pub html_url: String,
    #[serde(default)]
    pub stargazers_count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SearchPage {
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub items: Vec<RepoSummary>,
}

/// Everything the collector needs to know about one repository.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepoDetail {
    pub full_name: String,
    pub html_url: String,
    pub stars: u64,
    pub language: Option<String>,
    pub topics: Vec<String>,
    pub description: Option<String>,
    pub new_stars: u64,
    pub new_open_issues: u64,
    pub contributors: u64,
    pub readme: String,
}

pub trait HostingApi {
    /// Fetches one page (1-based) of repositories matching `criteria`.
    ///
    /// # Errors
    /// Returns error if the search endpoint cannot be reached or answers badly.
    fn search_repositories(
        &mut self,
        criteria: &SearchCriteria,
        page: u32,
    ) -> Result<SearchPage, ApiError>;

    /// Fetches detail and trailing-window activity since `window_start`.
    ///
    /// # Errors
    /// Returns error if any of the required detail lookups fails.
    fn repository_detail(
        &mut self,
        full_name: &str,
        window_start: DateTime<Utc>,
    ) -> Result<RepoDetail, ApiError>;
}
