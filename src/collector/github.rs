// src/collector/github.rs
//! Blocking GitHub REST client implementing [`HostingApi`].

use super::api::{HostingApi, RepoDetail, SearchCriteria, SearchPage};
use crate::config::CollectorConfig;
use crate::error::ApiError;
use base64::Engine;
use chrono::{DateTime, Utc};
use regex::Regex;
use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, ACCEPT, AUTHORIZATION, LINK, RETRY_AFTER, USER_AGENT};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::LazyLock;
use std::thread;
use std::time::Duration;

/// The events feed only serves the most recent 300 events.
const MAX_EVENT_PAGES: u32 = 3;
const EVENTS_PER_PAGE: u32 = 100;

static LAST_PAGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"[?&]page=(\d+)[^>]*>;\s*rel="last""#).unwrap_or_else(|_| panic!("Invalid Regex"))
});

/// Request pacing and retry limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestPolicy {
    pub max_requests: u32,
    pub request_delay: Duration,
    pub max_retries: u32,
    pub retry_base_delay: Duration,
}

impl From<&CollectorConfig> for RequestPolicy {
    fn from(c: &CollectorConfig) -> Self {
        Self {
            max_requests: c.max_requests,
            request_delay: Duration::from_millis(c.request_delay_ms),
            max_retries: c.max_retries,
            retry_base_delay: Duration::from_millis(c.retry_base_delay_ms),
        }
    }
}

pub struct GitHubClient {
    http: Client,
    base_url: String,
    token: Option<String>,
    policy: RequestPolicy,
    request_count: u32,
}

#[derive(Debug, Deserialize)]
struct RepoJson {
    full_name: String,
    html_url: String,
    #[serde(default)]
    stargazers_count: u64,
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    topics: Vec<String>,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct IssueSearchJson {
    #[serde(default)]
    total_count: u64,
}

#[derive(Debug, Deserialize)]
struct EventJson {
    #[serde(rename = "type")]
    kind: String,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct ReadmeJson {
    #[serde(default)]
    content: String,
}

impl GitHubClient {
    /// # Errors
    /// Returns error if the HTTP client cannot be constructed.
    pub fn new(
        base_url: &str,
        token: Option<String>,
        policy: RequestPolicy,
    ) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|source| ApiError::Transport {
                url: base_url.to_string(),
                source,
            })?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            policy,
            request_count: 0,
        })
    }

    #[must_use]
    pub fn request_count(&self) -> u32 {
        self.request_count
    }

    fn get(&mut self, path: &str, query: &[(&str, String)]) -> Result<Response, ApiError> {
        let url = format!("{}{path}", self.base_url);
        let mut attempt = 0;

        loop {
            let response = self.send_once(&url, query)?;
            let status = response.status();

            if is_rate_limited(status, response.headers()) {
                if attempt >= self.policy.max_retries {
                    return Err(ApiError::RateLimited {
                        url,
                        attempts: attempt + 1,
                    });
                }
                let wait = retry_delay(
                    attempt,
                    retry_after_secs(response.headers()),
                    self.policy.retry_base_delay,
                );
                log::warn!("rate limited by {url}, retrying in {}s", wait.as_secs());
                thread::sleep(wait);
                attempt += 1;
                continue;
            }

            if !status.is_success() {
                return Err(ApiError::Status {
                    url,
                    status: status.as_u16(),
                });
            }
            return Ok(response);
        }
    }

    fn send_once(&mut self, url: &str, query: &[(&str, String)]) -> Result<Response, ApiError> {
        if self.request_count >= self.policy.max_requests {
            return Err(ApiError::BudgetExhausted {
                limit: self.policy.max_requests,
            });
        }
        self.request_count += 1;
        thread::sleep(self.policy.request_delay);

        let mut request = self
            .http
            .get(url)
            .query(query)
            .header(USER_AGENT, concat!("demandboard/", env!("CARGO_PKG_VERSION")))
            .header(ACCEPT, "application/vnd.github+json");
        if let Some(token) = &self.token {
            request = request.header(AUTHORIZATION, format!("Bearer {token}"));
        }

        let response = request.send().map_err(|source| ApiError::Transport {
            url: url.to_string(),
            source,
        })?;
        log::debug!("GET {url} -> {}", response.status());
        Ok(response)
    }

    fn get_json<T: DeserializeOwned>(
        &mut self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let response = self.get(path, query)?;
        decode(response)
    }

    fn repo(&mut self, full_name: &str) -> Result<RepoJson, ApiError> {
        self.get_json(&format!("/repos/{full_name}"), &[])
    }

    fn contributors_count(&mut self, full_name: &str) -> Result<u64, ApiError> {
        let response = self.get(
            &format!("/repos/{full_name}/contributors"),
            &[("per_page", "1".to_string()), ("anon", "true".to_string())],
        )?;
        if response.status() == StatusCode::NO_CONTENT {
            return Ok(0);
        }
        let last = response
            .headers()
            .get(LINK)
            .and_then(|v| v.to_str().ok())
            .and_then(last_page);
        if let Some(count) = last {
            return Ok(count);
        }
        let body: Vec<serde_json::Value> = decode(response)?;
        Ok(body.len() as u64)
    }

    fn recent_open_issues(
        &mut self,
        full_name: &str,
        window_start: DateTime<Utc>,
    ) -> Result<u64, ApiError> {
        let query = format!(
            "repo:{full_name} is:issue is:open created:>{}",
            window_start.format("%Y-%m-%d")
        );
        let result: IssueSearchJson = self.get_json(
            "/search/issues",
            &[("q", query), ("per_page", "1".to_string())],
        )?;
        Ok(result.total_count)
    }

    fn new_stars(&mut self, full_name: &str, window_start: DateTime<Utc>) -> Result<u64, ApiError> {
        let path = format!("/repos/{full_name}/events");
        let mut count = 0;

        for page in 1..=MAX_EVENT_PAGES {
            let response = self.get(
                &path,
                &[
                    ("per_page", EVENTS_PER_PAGE.to_string()),
                    ("page", page.to_string()),
                ],
            )?;
            let has_next = response
                .headers()
                .get(LINK)
                .and_then(|v| v.to_str().ok())
                .is_some_and(|link| link.contains("rel=\"next\""));
            let events: Vec<EventJson> = decode(response)?;
            if events.is_empty() {
                break;
            }
            for event in &events {
                if event.created_at < window_start {
                    return Ok(count);
                }
                if event.kind == "WatchEvent" {
                    count += 1;
                }
            }
            if !has_next {
                break;
            }
        }
        Ok(count)
    }

    fn readme(&mut self, full_name: &str) -> Result<String, ApiError> {
        match self.get_json::<ReadmeJson>(&format!("/repos/{full_name}/readme"), &[]) {
            Ok(readme) => Ok(decode_readme(&readme.content).unwrap_or_default()),
            Err(e @ ApiError::BudgetExhausted { .. }) => Err(e),
            Err(e) => {
                log::debug!("no readme for {full_name}: {e}");
                Ok(String::new())
            }
        }
    }
}

impl HostingApi for GitHubClient {
    fn search_repositories(
        &mut self,
        criteria: &SearchCriteria,
        page: u32,
    ) -> Result<SearchPage, ApiError> {
        self.get_json(
            "/search/repositories",
            &[
                ("q", criteria.query()),
                ("sort", "stars".to_string()),
                ("order", "desc".to_string()),
                ("per_page", criteria.per_page.to_string()),
                ("page", page.to_string()),
            ],
        )
    }

    fn repository_detail(
        &mut self,
        full_name: &str,
        window_start: DateTime<Utc>,
    ) -> Result<RepoDetail, ApiError> {
        log::info!("processing {full_name}");
        let repo = self.repo(full_name)?;
        let contributors = self.contributors_count(full_name)?;
        let new_open_issues = self.recent_open_issues(full_name, window_start)?;
        let new_stars = self.new_stars(full_name, window_start)?;
        let readme = self.readme(full_name)?;

        Ok(RepoDetail {
            full_name: repo.full_name,
            html_url: repo.html_url,
            stars: repo.stargazers_count,
            language: repo.language,
            topics: repo.topics,
            description: repo.description,
            new_stars,
            new_open_issues,
            contributors,
            readme,
        })
    }
}

fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let url = response.url().to_string();
    response.json().map_err(|e| ApiError::Decode {
        url,
        reason: e.to_string(),
    })
}

fn is_rate_limited(status: StatusCode, headers: &HeaderMap) -> bool {
    if status == StatusCode::TOO_MANY_REQUESTS {
        return true;
    }
    status == StatusCode::FORBIDDEN
        && (headers.contains_key(RETRY_AFTER)
            || headers
                .get("x-ratelimit-remaining")
                .and_then(|v| v.to_str().ok())
                .is_some_and(|v| v.trim() == "0"))
}

fn retry_after_secs(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
}

/// Wait before retry number `attempt` (0-based).
fn retry_delay(attempt: u32, retry_after: Option<u64>, base: Duration) -> Duration {
    match retry_after {
        Some(secs) => Duration::from_secs(secs),
        None => base.saturating_mul(2u32.saturating_pow(attempt)),
    }
}

/// Page number of the `rel="last"` link, which with `per_page=1` is the item count.
fn last_page(link: &str) -> Option<u64> {
    LAST_PAGE_RE.captures(link)?.get(1)?.as_str().parse().ok()
}

fn decode_readme(content: &str) -> Option<String> {
    let compact: String = content.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(compact)
        .ok()?;
    String::from_utf8(bytes).ok()
}
