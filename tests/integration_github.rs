// tests/integration_github.rs
//! Drives `GitHubClient` against a local socket serving canned responses.

use chrono::{NaiveDate, TimeZone, Utc};
use demandboard_core::collector::api::{HostingApi, SearchCriteria};
use demandboard_core::collector::github::{GitHubClient, RequestPolicy};
use demandboard_core::error::ApiError;
use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::thread::{self, JoinHandle};
use std::time::Duration;

const SEARCH_BODY: &str = r#"{"total_count":1,"items":[{"full_name":"a/b","html_url":"https://github.com/a/b","stargazers_count":150}]}"#;
const REPO_BODY: &str = r#"{"full_name":"a/b","html_url":"https://github.com/a/b","stargazers_count":150,"language":"Rust","topics":["cli"],"description":"A command line tool"}"#;

fn reply(status: &str, headers: &[(&str, &str)], body: &str) -> String {
    let mut out = format!("HTTP/1.1 {status}\r\nConnection: close\r\n");
    if !status.starts_with("204") {
        out.push_str(&format!("Content-Length: {}\r\n", body.len()));
        out.push_str("Content-Type: application/json\r\n");
    }
    for (name, value) in headers {
        out.push_str(&format!("{name}: {value}\r\n"));
    }
    out.push_str("\r\n");
    out.push_str(body);
    out
}

/// Answers one connection per canned reply, in order, and hands back the
/// request lines it saw.
fn serve(replies: Vec<String>) -> (String, JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    let handle = thread::spawn(move || {
        let mut seen = Vec::new();
        for reply in replies {
            let (mut stream, _) = listener.accept().unwrap();
            seen.push(read_request(&mut stream));
            stream.write_all(reply.as_bytes()).unwrap();
        }
        seen
    });
    (base, handle)
}

fn read_request(stream: &mut TcpStream) -> String {
    let mut reader = BufReader::new(stream);
    let mut request_line = String::new();
    reader.read_line(&mut request_line).unwrap();
    let mut line = String::new();
    loop {
        line.clear();
        if reader.read_line(&mut line).unwrap() == 0 || line == "\r\n" {
            break;
        }
    }
    request_line.trim_end().to_string()
}

fn policy(max_requests: u32, max_retries: u32) -> RequestPolicy {
    RequestPolicy {
        max_requests,
        request_delay: Duration::ZERO,
        max_retries,
        retry_base_delay: Duration::ZERO,
    }
}

fn criteria() -> SearchCriteria {
    SearchCriteria {
        created_after: NaiveDate::from_ymd_opt(2024, 5, 16).unwrap(),
        min_stars: 100,
        per_page: 100,
    }
}

fn window_start() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 16, 0, 0, 0).unwrap()
}

fn too_many_requests() -> String {
    reply("429 Too Many Requests", &[("Retry-After", "0")], "{}")
}

#[test]
fn test_rate_limit_is_retried_until_success() {
    let (base, server) = serve(vec![too_many_requests(), reply("200 OK", &[], SEARCH_BODY)]);
    let mut client = GitHubClient::new(&base, None, policy(10, 3)).unwrap();

    let page = client.search_repositories(&criteria(), 1).unwrap();

    assert_eq!(page.total_count, 1);
    assert_eq!(page.items[0].full_name, "a/b");
    assert_eq!(client.request_count(), 2);
    assert_eq!(server.join().unwrap().len(), 2);
}

#[test]
fn test_rate_limit_gives_up_after_max_retries() {
    let (base, server) = serve(vec![too_many_requests(), too_many_requests(), too_many_requests()]);
    let mut client = GitHubClient::new(&base, None, policy(10, 2)).unwrap();

    let err = client.search_repositories(&criteria(), 1).unwrap_err();

    assert!(matches!(err, ApiError::RateLimited { attempts: 3, .. }));
    assert_eq!(client.request_count(), 3);
    assert_eq!(server.join().unwrap().len(), 3);
}

#[test]
fn test_forbidden_with_exhausted_quota_is_retried() {
    let (base, server) = serve(vec![
        reply("403 Forbidden", &[("x-ratelimit-remaining", "0")], "{}"),
        reply("200 OK", &[], SEARCH_BODY),
    ]);
    let mut client = GitHubClient::new(&base, None, policy(10, 3)).unwrap();

    assert!(client.search_repositories(&criteria(), 1).is_ok());
    assert_eq!(client.request_count(), 2);
    server.join().unwrap();
}

#[test]
fn test_plain_forbidden_is_not_retried() {
    let (base, server) = serve(vec![reply("403 Forbidden", &[], "{}")]);
    let mut client = GitHubClient::new(&base, None, policy(10, 3)).unwrap();

    let err = client.search_repositories(&criteria(), 1).unwrap_err();

    assert!(matches!(err, ApiError::Status { status: 403, .. }));
    assert_eq!(client.request_count(), 1);
    server.join().unwrap();
}

#[test]
fn test_request_budget_is_enforced() {
    let (base, server) = serve(vec![reply("200 OK", &[], SEARCH_BODY)]);
    let mut client = GitHubClient::new(&base, None, policy(1, 3)).unwrap();

    assert!(client.search_repositories(&criteria(), 1).is_ok());
    let err = client.search_repositories(&criteria(), 2).unwrap_err();

    assert!(matches!(err, ApiError::BudgetExhausted { limit: 1 }));
    assert_eq!(client.request_count(), 1);
    assert_eq!(server.join().unwrap().len(), 1);
}

#[test]
fn test_search_sends_query_and_page() {
    let (base, server) = serve(vec![reply("200 OK", &[], SEARCH_BODY)]);
    let mut client = GitHubClient::new(&base, None, policy(10, 0)).unwrap();

    client.search_repositories(&criteria(), 3).unwrap();

    let seen = server.join().unwrap();
    assert!(seen[0].starts_with("GET /search/repositories?"));
    assert!(seen[0].contains("page=3"));
    assert!(seen[0].contains("per_page=100"));
}

#[test]
fn test_detail_with_empty_contributors_and_missing_readme() {
    let (base, server) = serve(vec![
        reply("200 OK", &[], REPO_BODY),
        reply("204 No Content", &[], ""),
        reply("200 OK", &[], r#"{"total_count":4}"#),
        reply("200 OK", &[], "[]"),
        reply("404 Not Found", &[], r#"{"message":"Not Found"}"#),
    ]);
    let mut client = GitHubClient::new(&base, None, policy(10, 0)).unwrap();

    let detail = client.repository_detail("a/b", window_start()).unwrap();

    assert_eq!(detail.contributors, 0);
    assert_eq!(detail.new_open_issues, 4);
    assert_eq!(detail.new_stars, 0);
    assert_eq!(detail.readme, "");
    assert_eq!(detail.language.as_deref(), Some("Rust"));

    let seen = server.join().unwrap();
    assert!(seen[1].starts_with("GET /repos/a/b/contributors"));
    assert!(seen[4].starts_with("GET /repos/a/b/readme"));
}

#[test]
fn test_detail_counts_from_link_header_and_events() {
    let link = r#"<http://localhost/repos/a/b/contributors?per_page=1&anon=true&page=2>; rel="next", <http://localhost/repos/a/b/contributors?per_page=1&anon=true&page=12>; rel="last""#;
    let events = r#"[
        {"type":"WatchEvent","created_at":"2024-06-10T00:00:00Z"},
        {"type":"PushEvent","created_at":"2024-06-09T00:00:00Z"},
        {"type":"WatchEvent","created_at":"2024-06-01T00:00:00Z"},
        {"type":"WatchEvent","created_at":"2024-04-01T00:00:00Z"}
    ]"#;
    let (base, server) = serve(vec![
        reply("200 OK", &[], REPO_BODY),
        reply("200 OK", &[("Link", link)], "[{}]"),
        reply("200 OK", &[], r#"{"total_count":0}"#),
        reply("200 OK", &[], events),
        reply("200 OK", &[], r#"{"content":"IyBI\naQ==\n"}"#),
    ]);
    let mut client = GitHubClient::new(&base, None, policy(10, 0)).unwrap();

    let detail = client.repository_detail("a/b", window_start()).unwrap();

    assert_eq!(detail.contributors, 12);
    assert_eq!(detail.new_stars, 2);
    assert_eq!(detail.readme, "# Hi");
    server.join().unwrap();
}

#[test]
fn test_readme_does_not_swallow_budget_exhaustion() {
    let (base, server) = serve(vec![
        reply("200 OK", &[], REPO_BODY),
        reply("204 No Content", &[], ""),
        reply("200 OK", &[], r#"{"total_count":1}"#),
        reply("200 OK", &[], "[]"),
    ]);
    let mut client = GitHubClient::new(&base, None, policy(4, 0)).unwrap();

    let err = client.repository_detail("a/b", window_start()).unwrap_err();

    assert!(matches!(err, ApiError::BudgetExhausted { limit: 4 }));
    assert_eq!(server.join().unwrap().len(), 4);
}
