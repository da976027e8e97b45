// tests/common/mod.rs
#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use demandboard_core::types::{ProjectRecord, Snapshot};

pub fn fetched_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
}

pub fn record(name: &str, stars: u64) -> ProjectRecord {
    ProjectRecord {
        name: name.to_string(),
        url: format!("https://github.com/{name}"),
        stars,
        new_stars_30d: 0,
        new_open_issues: 0,
        contributors: 1,
        demand_index: 0.0,
        language: None,
        keywords: Vec::new(),
        date_fetched: fetched_at(),
    }
}

pub fn with_language(mut r: ProjectRecord, language: &str) -> ProjectRecord {
    r.language = Some(language.to_string());
    r
}

pub fn with_keywords(mut r: ProjectRecord, keywords: &[&str]) -> ProjectRecord {
    r.keywords = keywords.iter().map(|k| (*k).to_string()).collect();
    r
}

pub fn with_demand(mut r: ProjectRecord, demand_index: f64) -> ProjectRecord {
    r.demand_index = demand_index;
    r
}

pub fn snapshot(projects: Vec<ProjectRecord>) -> Snapshot {
    Snapshot::new(fetched_at(), projects)
}

pub fn names(records: &[&ProjectRecord]) -> Vec<String> {
    records.iter().map(|r| r.name.clone()).collect()
}
