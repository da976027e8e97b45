// tests/integration_collect.rs
mod common;

use chrono::{DateTime, Utc};
use common::fetched_at;
use demandboard_core::collector::api::{
    HostingApi, RepoDetail, RepoSummary, SearchCriteria, SearchPage,
};
use demandboard_core::collector::{self, snapshot, CollectOptions};
use demandboard_core::error::{ApiError, CollectError};
use demandboard_core::events::EventLogger;
use demandboard_core::types::Snapshot;
use std::collections::{HashMap, HashSet};
use std::fs;

#[derive(Default)]
struct FakeApi {
    pages: Vec<SearchPage>,
    fail_search_on: Option<u32>,
    details: HashMap<String, RepoDetail>,
    failing: HashSet<String>,
    rate_limited: HashSet<String>,
    result_window: Option<u64>,
    detail_budget: Option<usize>,
    search_calls: u32,
    detail_calls: usize,
}

impl HostingApi for FakeApi {
    fn search_repositories(
        &mut self,
        criteria: &SearchCriteria,
        page: u32,
    ) -> Result<SearchPage, ApiError> {
        self.search_calls += 1;
        let offset = u64::from(page - 1) * u64::from(criteria.per_page);
        if self.result_window.is_some_and(|window| offset >= window) {
            return Err(ApiError::Status {
                url: "/search/repositories".to_string(),
                status: 422,
            });
        }
        if self.fail_search_on == Some(page) {
            return Err(ApiError::Status {
                url: "/search/repositories".to_string(),
                status: 503,
            });
        }
        Ok(self
            .pages
            .get(page as usize - 1)
            .cloned()
            .unwrap_or_default())
    }

    fn repository_detail(
        &mut self,
        full_name: &str,
        _window_start: DateTime<Utc>,
    ) -> Result<RepoDetail, ApiError> {
        if self.detail_budget == Some(self.detail_calls) {
            return Err(ApiError::BudgetExhausted { limit: 7 });
        }
        self.detail_calls += 1;
        if self.rate_limited.contains(full_name) {
            return Err(ApiError::RateLimited {
                url: format!("/repos/{full_name}"),
                attempts: 4,
            });
        }
        if self.failing.contains(full_name) {
            return Err(ApiError::Status {
                url: format!("/repos/{full_name}"),
                status: 404,
            });
        }
        self.details
            .get(full_name)
            .cloned()
            .ok_or_else(|| ApiError::Other(format!("no fixture for {full_name}")))
    }
}

fn summary(name: &str) -> RepoSummary {
    RepoSummary {
        full_name: name.to_string(),
        html_url: format!("https://github.com/{name}"),
        stargazers_count: 500,
    }
}

fn detail(name: &str, stars: u64, new_stars: u64, issues: u64) -> RepoDetail {
    RepoDetail {
        full_name: name.to_string(),
        html_url: format!("https://github.com/{name}"),
        stars,
        language: Some("Rust".to_string()),
        topics: vec!["cli".to_string()],
        description: None,
        new_stars,
        new_open_issues: issues,
        contributors: 4,
        readme: String::new(),
    }
}

fn page(names: &[&str], total: u64) -> SearchPage {
    SearchPage {
        total_count: total,
        items: names.iter().map(|n| summary(n)).collect(),
    }
}

/// `pages` full pages of `per_page` uniquely named repositories.
fn numbered_pages(pages: u32, per_page: u32, total: u64) -> Vec<SearchPage> {
    (0..pages)
        .map(|p| {
            let names: Vec<String> = (0..per_page).map(|i| format!("bulk/r{p}-{i}")).collect();
            let refs: Vec<&str> = names.iter().map(String::as_str).collect();
            page(&refs, total)
        })
        .collect()
}

fn options(per_page: u32) -> CollectOptions {
    CollectOptions {
        created_within_days: 30,
        min_stars: 100,
        window_days: 30,
        per_page,
        max_pages: 5,
    }
}

fn api_with(names: &[&str]) -> FakeApi {
    let mut api = FakeApi {
        pages: vec![page(names, names.len() as u64)],
        ..FakeApi::default()
    };
    for (i, name) in names.iter().enumerate() {
        let i = i as u64;
        api.details
            .insert((*name).to_string(), detail(name, 1_000 + i, 10 * (i + 1), i));
    }
    api
}

#[test]
fn test_collect_scores_and_orders() {
    let mut api = api_with(&["a/one", "b/two", "c/three"]);
    let report = collector::collect(&mut api, &options(100), fetched_at(), &EventLogger::disabled())
        .unwrap();

    assert_eq!(report.searched, 3);
    assert!(report.skipped.is_empty());
    let projects = &report.snapshot.projects;
    assert_eq!(projects.len(), 3);
    assert!(projects
        .windows(2)
        .all(|w| w[0].demand_index >= w[1].demand_index));
    assert_eq!(projects[0].name, "c/three");
    assert!(projects.iter().all(|p| p.date_fetched == fetched_at()));
    assert_eq!(projects[0].keywords, vec!["CLI"]);
    assert_eq!(report.snapshot.last_updated, fetched_at());
}

#[test]
fn test_record_demand_matches_formula() {
    let mut api = api_with(&["solo/repo"]);
    let report =
        collector::collect(&mut api, &options(100), fetched_at(), &EventLogger::disabled()).unwrap();
    let p = &report.snapshot.projects[0];
    let expected = demandboard_core::metrics::DemandInputs {
        stars: p.stars,
        new_stars_30d: p.new_stars_30d,
        new_open_issues: p.new_open_issues,
        contributors: p.contributors,
    }
    .demand_index();
    assert_eq!(p.demand_index.to_bits(), expected.to_bits());
}

#[test]
fn test_failed_repository_is_skipped() {
    let mut api = api_with(&["ok/first", "bad/second", "ok/third"]);
    api.failing.insert("bad/second".to_string());

    let report =
        collector::collect(&mut api, &options(100), fetched_at(), &EventLogger::disabled()).unwrap();

    assert_eq!(report.snapshot.projects.len(), 2);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].name, "bad/second");
    assert!(report.skipped[0].reason.contains("404"));
}

#[test]
fn test_budget_exhaustion_skips_the_rest() {
    let mut api = api_with(&["r/1", "r/2", "r/3", "r/4"]);
    api.detail_budget = Some(2);

    let report =
        collector::collect(&mut api, &options(100), fetched_at(), &EventLogger::disabled()).unwrap();

    assert_eq!(report.snapshot.projects.len(), 2);
    let skipped: Vec<_> = report.skipped.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(skipped, vec!["r/3", "r/4"]);
    assert_eq!(api.detail_calls, 2);
}

#[test]
fn test_search_failure_aborts_and_keeps_snapshot() {
    let d = tempfile::tempdir().unwrap();
    let output = d.path().join("projects.json");
    fs::write(&output, "previous snapshot").unwrap();

    let mut api = api_with(&["a/b"]);
    api.fail_search_on = Some(1);

    let err = collector::run(
        &mut api,
        &options(100),
        &output,
        fetched_at(),
        &EventLogger::disabled(),
    )
    .unwrap_err();

    assert!(matches!(err, CollectError::Search { page: 1, .. }));
    assert_eq!(fs::read_to_string(&output).unwrap(), "previous snapshot");
    assert_eq!(api.detail_calls, 0);
}

#[test]
fn test_later_search_failure_also_aborts() {
    let mut api = FakeApi {
        pages: vec![page(&["x/1", "x/2"], 10)],
        fail_search_on: Some(2),
        ..FakeApi::default()
    };
    let err = collector::collect(&mut api, &options(2), fetched_at(), &EventLogger::disabled())
        .unwrap_err();
    assert!(matches!(err, CollectError::Search { page: 2, .. }));
}

#[test]
fn test_pagination_stops_on_short_page() {
    let mut api = api_with(&[]);
    api.pages = vec![page(&["p/1", "p/2"], 50), page(&["p/3"], 50)];
    for n in ["p/1", "p/2", "p/3"] {
        api.details.insert(n.to_string(), detail(n, 200, 5, 1));
    }

    let report =
        collector::collect(&mut api, &options(2), fetched_at(), &EventLogger::disabled()).unwrap();

    assert_eq!(api.search_calls, 2);
    assert_eq!(report.searched, 3);
}

#[test]
fn test_pagination_stops_at_total_count() {
    let mut api = api_with(&[]);
    api.pages = vec![page(&["p/1", "p/2"], 2), page(&["never/seen"], 2)];
    for n in ["p/1", "p/2"] {
        api.details.insert(n.to_string(), detail(n, 200, 5, 1));
    }

    let report =
        collector::collect(&mut api, &options(2), fetched_at(), &EventLogger::disabled()).unwrap();

    assert_eq!(api.search_calls, 1);
    assert_eq!(report.searched, 2);
}

#[test]
fn test_duplicate_urls_collected_once() {
    let mut api = api_with(&[]);
    api.pages = vec![page(&["dup/repo", "other/repo"], 4), page(&["dup/repo"], 4)];
    for n in ["dup/repo", "other/repo"] {
        api.details.insert(n.to_string(), detail(n, 300, 5, 1));
    }

    let report =
        collector::collect(&mut api, &options(2), fetched_at(), &EventLogger::disabled()).unwrap();

    assert_eq!(report.searched, 2);
    assert_eq!(api.detail_calls, 2);
}

#[test]
fn test_new_stars_never_exceed_stars() {
    let mut api = api_with(&["tiny/repo"]);
    api.details
        .insert("tiny/repo".to_string(), detail("tiny/repo", 120, 400, 3));

    let report =
        collector::collect(&mut api, &options(100), fetched_at(), &EventLogger::disabled()).unwrap();

    let p = &report.snapshot.projects[0];
    assert_eq!(p.new_stars_30d, 120);
    assert!(p.stars >= p.new_stars_30d);
}

#[test]
fn test_run_publishes_readable_snapshot() {
    let d = tempfile::tempdir().unwrap();
    let output = d.path().join("out").join("projects.json");
    let mut api = api_with(&["a/one", "b/two"]);

    let report = collector::run(
        &mut api,
        &options(100),
        &output,
        fetched_at(),
        &EventLogger::new(d.path()),
    )
    .unwrap();

    let written = Snapshot::from_json(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(written.last_updated, report.snapshot.last_updated);
    assert_eq!(written.projects.len(), report.snapshot.projects.len());
    for (w, r) in written.projects.iter().zip(&report.snapshot.projects) {
        assert_eq!(w.url, r.url);
        assert!((w.demand_index - r.demand_index).abs() < 1e-12);
    }
    assert!(!snapshot::temp_path_for(&output).exists());

    let journal = fs::read_to_string(d.path().join(".demandboard/events.jsonl")).unwrap();
    assert!(journal.contains("collect_started"));
    assert!(journal.contains("snapshot_published"));
}

#[test]
fn test_search_failure_is_journaled() {
    let d = tempfile::tempdir().unwrap();
    let mut api = api_with(&["a/b"]);
    api.fail_search_on = Some(1);

    let _ = collector::collect(&mut api, &options(100), fetched_at(), &EventLogger::new(d.path()));

    let journal = fs::read_to_string(d.path().join(".demandboard/events.jsonl")).unwrap();
    assert!(journal.contains("search_failed"));
}

#[test]
fn test_search_query_text() {
    let criteria = options(100).criteria(fetched_at());
    assert_eq!(criteria.query(), "created:>2024-05-16 stars:>=100");
}

#[test]
fn test_rate_limited_repository_is_skipped_and_run_continues() {
    let mut api = api_with(&["ok/first", "busy/second", "ok/third"]);
    api.rate_limited.insert("busy/second".to_string());

    let report =
        collector::collect(&mut api, &options(100), fetched_at(), &EventLogger::disabled()).unwrap();

    assert_eq!(api.detail_calls, 3);
    let names: Vec<_> = report.snapshot.projects.iter().map(|p| p.name.as_str()).collect();
    assert!(names.contains(&"ok/first"));
    assert!(names.contains(&"ok/third"));
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].name, "busy/second");
}

#[test]
fn test_paging_stops_at_search_result_limit() {
    let mut api = FakeApi {
        pages: numbered_pages(20, 100, 5_000),
        result_window: Some(1_000),
        ..FakeApi::default()
    };
    let mut opts = options(100);
    opts.max_pages = 20;

    let report = collector::collect(&mut api, &opts, fetched_at(), &EventLogger::disabled()).unwrap();

    assert_eq!(api.search_calls, 10);
    assert_eq!(report.searched, 1_000);
}

#[test]
fn test_paging_limit_with_uneven_page_size() {
    let mut api = FakeApi {
        pages: numbered_pages(40, 30, 5_000),
        result_window: Some(1_000),
        ..FakeApi::default()
    };
    let mut opts = options(30);
    opts.max_pages = 40;

    let report = collector::collect(&mut api, &opts, fetched_at(), &EventLogger::disabled()).unwrap();

    // Page 34 starts at offset 990 and is still served.
    assert_eq!(api.search_calls, 34);
    assert_eq!(report.searched, 34 * 30);
}
