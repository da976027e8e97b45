// src/config/types.rs
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CollectorConfig {
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Only repositories created within this many days are searched.
    #[serde(default = "default_created_within_days")]
    pub created_within_days: u32,
    #[serde(default = "default_min_stars")]
    pub min_stars: u64,
    /// Trailing window for new stars and new issues.
    #[serde(default = "default_window_days")]
    pub window_days: u32,
    #[serde(default = "default_per_page")]
    pub per_page: u32,
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,
    #[serde(default = "default_max_requests")]
    pub max_requests: u32,
    #[serde(default = "default_request_delay_ms")]
    pub request_delay_ms: u64,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_retry_base_delay_ms")]
    pub retry_base_delay_ms: u64,
    #[serde(default = "default_output")]
    pub output: String,
    #[serde(default = "default_true")]
    pub journal: bool,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            created_within_days: default_created_within_days(),
            min_stars: default_min_stars(),
            window_days: default_window_days(),
            per_page: default_per_page(),
            max_pages: default_max_pages(),
            max_requests: default_max_requests(),
            request_delay_ms: default_request_delay_ms(),
            max_retries: default_max_retries(),
            retry_base_delay_ms: default_retry_base_delay_ms(),
            output: default_output(),
            journal: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ViewerConfig {
    /// Filesystem path or http(s) URL of the snapshot.
    #[serde(default = "default_output")]
    pub source: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            source: default_output(),
        }
    }
}

fn default_api_base() -> String { "https://api.github.com".to_string() }
fn default_output() -> String { "projects.json".to_string() }

const fn default_true() -> bool { true }
const fn default_created_within_days() -> u32 { 30 }
const fn default_min_stars() -> u64 { 100 }
const fn default_window_days() -> u32 { 30 }
const fn default_per_page() -> u32 { 100 }
const fn default_max_pages() -> u32 { 5 }
const fn default_max_requests() -> u32 { 1000 }
const fn default_request_delay_ms() -> u64 { 1000 }
const fn default_max_retries() -> u32 { 3 }
const fn default_retry_base_delay_ms() -> u64 { 2000 }

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DemandBoardToml {
    #[serde(default)]
    pub collector: CollectorConfig,
    #[serde(default)]
    pub viewer: ViewerConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub collector: CollectorConfig,
    pub viewer: ViewerConfig,
    /// Hosting-API token; never written back to disk.
    pub token: Option<String>,
}
