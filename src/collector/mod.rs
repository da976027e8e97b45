// src/collector/mod.rs
//! Dataset Builder: search, enrich, score, publish.
//!
//! A search failure aborts the run before anything is written. A failed
//! enrichment only drops that repository.

pub mod api;
pub mod github;
pub mod snapshot;

use crate::config::CollectorConfig;
use crate::error::{ApiError, CollectError, Result};
use crate::events::{EventKind, EventLogger};
use crate::keywords::derive_keywords;
use crate::metrics::DemandInputs;
use crate::types::{ProjectRecord, Snapshot};
use api::{HostingApi, RepoDetail, RepoSummary, SearchCriteria, SEARCH_RESULT_LIMIT};
use chrono::{DateTime, Duration, Utc};
use std::collections::HashSet;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectOptions {
    pub created_within_days: u32,
    pub min_stars: u64,
    pub window_days: u32,
    pub per_page: u32,
    pub max_pages: u32,
}

impl From<&CollectorConfig> for CollectOptions {
    fn from(c: &CollectorConfig) -> Self {
        Self {
            created_within_days: c.created_within_days,
            min_stars: c.min_stars,
            window_days: c.window_days,
            per_page: c.per_page,
            max_pages: c.max_pages,
        }
    }
}

impl CollectOptions {
    #[must_use]
    pub fn criteria(&self, now: DateTime<Utc>) -> SearchCriteria {
        SearchCriteria {
            created_after: (now - Duration::days(i64::from(self.created_within_days)))
                .date_naive(),
            min_stars: self.min_stars,
            per_page: self.per_page,
        }
    }

    #[must_use]
    pub fn window_start(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - Duration::days(i64::from(self.window_days))
    }
}

/// A repository left out of the snapshot, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skipped {
    pub name: String,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct CollectReport {
    pub snapshot: Snapshot,
    pub searched: usize,
    pub skipped: Vec<Skipped>,
}

/// Builds a snapshot in memory. Nothing is written.
///
/// # Errors
/// Returns [`CollectError::Search`] if any search page fails.
pub fn collect<A: HostingApi>(
    api: &mut A,
    options: &CollectOptions,
    now: DateTime<Utc>,
    journal: &EventLogger,
) -> Result<CollectReport> {
    let criteria = options.criteria(now);
    journal.log(EventKind::CollectStarted {
        query: criteria.query(),
    });
    log::info!("searching repositories: {}", criteria.query());

    let candidates = search_all(api, &criteria, options.max_pages, journal)?;
    let searched = candidates.len();
    log::info!("{searched} candidate repositories found");

    let window_start = options.window_start(now);
    let mut projects = Vec::with_capacity(searched);
    let mut skipped = Vec::new();
    let mut remaining = candidates.into_iter();

    while let Some(repo) = remaining.next() {
        match api.repository_detail(&repo.full_name, window_start) {
            Ok(detail) => projects.push(build_record(detail, now)),
            Err(e @ ApiError::BudgetExhausted { .. }) => {
                let reason = e.to_string();
                log::warn!("{reason}; skipping the remaining repositories");
                for repo in std::iter::once(repo).chain(remaining.by_ref()) {
                    skip(&mut skipped, journal, repo.full_name, reason.clone());
                }
            }
            Err(e) => {
                log::warn!("skipping {}: {e}", repo.full_name);
                skip(&mut skipped, journal, repo.full_name, e.to_string());
            }
        }
    }

    sort_by_demand(&mut projects);

    Ok(CollectReport {
        snapshot: Snapshot::new(now, projects),
        searched,
        skipped,
    })
}

/// Collects and then publishes atomically to `output`.
///
/// # Errors
/// Returns error if the search fails or the snapshot cannot be written; the
/// previous snapshot at `output` is left as it was.
pub fn run<A: HostingApi>(
    api: &mut A,
    options: &CollectOptions,
    output: &Path,
    now: DateTime<Utc>,
    journal: &EventLogger,
) -> Result<CollectReport> {
    let report = collect(api, options, now, journal)?;
    snapshot::publish(output, &report.snapshot)?;

    journal.log(EventKind::SnapshotPublished {
        path: output.display().to_string(),
        projects: report.snapshot.projects.len(),
        skipped: report.skipped.len(),
    });
    log::info!(
        "published {} projects to {}",
        report.snapshot.projects.len(),
        output.display()
    );
    Ok(report)
}

fn search_all<A: HostingApi>(
    api: &mut A,
    criteria: &SearchCriteria,
    max_pages: u32,
    journal: &EventLogger,
) -> Result<Vec<RepoSummary>> {
    let mut seen = HashSet::new();
    let mut found = Vec::new();
    let mut received: u64 = 0;
    let per_page = u64::from(criteria.per_page);

    for page in 1..=max_pages {
        if u64::from(page - 1) * per_page >= SEARCH_RESULT_LIMIT {
            log::info!("search results end at {SEARCH_RESULT_LIMIT}; not requesting page {page}");
            break;
        }
        let result = api.search_repositories(criteria, page).map_err(|source| {
            journal.log(EventKind::SearchFailed {
                page,
                error: source.to_string(),
            });
            CollectError::Search { page, source }
        })?;

        let count = result.items.len();
        received += count as u64;
        log::debug!("search page {page}: {count} items");

        for item in result.items {
            if seen.insert(item.html_url.clone()) {
                found.push(item);
            }
        }

        let reachable = result.total_count.min(SEARCH_RESULT_LIMIT);
        if (count as u64) < per_page || received >= reachable {
            break;
        }
    }

    Ok(found)
}

fn skip(skipped: &mut Vec<Skipped>, journal: &EventLogger, name: String, reason: String) {
    journal.log(EventKind::RepositorySkipped {
        name: name.clone(),
        reason: reason.clone(),
    });
    skipped.push(Skipped { name, reason });
}

/// Turns enrichment output into a scored record.
#[must_use]
pub fn build_record(detail: RepoDetail, fetched_at: DateTime<Utc>) -> ProjectRecord {
    let inputs = DemandInputs {
        stars: detail.stars,
        new_stars_30d: detail.new_stars.min(detail.stars),
        new_open_issues: detail.new_open_issues,
        contributors: detail.contributors,
    };
    let keywords = derive_keywords(
        &detail.topics,
        detail.description.as_deref(),
        &detail.readme,
        detail.language.as_deref(),
    );

    ProjectRecord {
        name: detail.full_name,
        url: detail.html_url,
        stars: inputs.stars,
        new_stars_30d: inputs.new_stars_30d,
        new_open_issues: inputs.new_open_issues,
        contributors: inputs.contributors,
        demand_index: inputs.demand_index(),
        language: detail.language.filter(|l| !l.is_empty()),
        keywords,
        date_fetched: fetched_at,
    }
}

fn sort_by_demand(projects: &mut [ProjectRecord]) {
    projects.sort_by(|a, b| b.demand_index.total_cmp(&a.demand_index));
}
