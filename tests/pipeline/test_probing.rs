// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Path probing and page extraction through the pipeline

use super::mocks::{build_pipeline, PageServer, ScriptedSearch};
use career_finder::FinderConfig;
use std::sync::Arc;
use std::time::Duration;

const CAREERS_HTML: &str = r#"<html>
<head><title>Example Inc</title></head>
<body>
  <h1>Careers at Example</h1>
  <p>Apply to our open roles. Questions? talent [at] example [dot] com</p>
  <a href="mailto:Jobs@Example.com?subject=Application">Email us</a>
</body>
</html>"#;

#[tokio::test]
async fn test_only_successful_page_is_extracted() {
    let search = Arc::new(ScriptedSearch::returning(&["https://example.com/some/listing"]));
    let server = Arc::new(PageServer::new().page("https://example.com/careers", 200, CAREERS_HTML));
    let pipeline = build_pipeline(search, server, FinderConfig::default());

    let results = pipeline.run("rust", 60).await;

    assert_eq!(results.len(), 1);
    let page = &results.pages[0];
    assert_eq!(page.domain, "example.com");
    assert_eq!(page.url, "https://example.com/careers");
    assert_eq!(page.status, 200);
    assert_eq!(page.title, "Careers at Example");
    assert!(page.is_job_like);
    assert_eq!(page.emails, vec!["jobs@example.com", "talent@example.com"]);
}

#[tokio::test]
async fn test_root_url_probed_first_with_user_agent() {
    let search = Arc::new(ScriptedSearch::returning(&["https://example.com/"]));
    let server = Arc::new(PageServer::new());
    let config = FinderConfig {
        user_agent: "CareerFinderTest/0.1".to_string(),
        request_timeout_secs: 7,
        ..Default::default()
    };
    let pipeline = build_pipeline(search, server.clone(), config);

    pipeline.run("rust", 60).await;

    let requests = server.requests.lock().unwrap();
    assert!(requests.iter().any(|r| r.url == "https://example.com"));
    assert!(requests.iter().all(|r| r.user_agent == "CareerFinderTest/0.1"));
    assert!(requests.iter().all(|r| r.timeout == Duration::from_secs(7)));
}

#[tokio::test]
async fn test_empty_body_and_non_200_are_dropped() {
    let search = Arc::new(ScriptedSearch::returning(&["https://example.com"]));
    let server = Arc::new(
        PageServer::new()
            .page("https://example.com/jobs", 200, "")
            .page("https://example.com/careers", 500, CAREERS_HTML)
            .page("https://example.com/contact", 301, "<p>moved</p>"),
    );
    let pipeline = build_pipeline(search, server, FinderConfig::default());

    assert!(pipeline.run("rust", 60).await.is_empty());
}

#[tokio::test]
async fn test_slow_pages_time_out() {
    let search = Arc::new(ScriptedSearch::returning(&["https://example.com"]));
    let server = Arc::new(
        PageServer::new()
            .with_delay(Duration::from_millis(1500))
            .page("https://example.com/careers", 200, CAREERS_HTML),
    );
    let config = FinderConfig {
        request_timeout_secs: 1,
        ..Default::default()
    };
    let pipeline = build_pipeline(search, server, config);

    let results = pipeline.run("rust", 60).await;
    assert!(results.is_empty());
    assert_eq!(results.domains_discovered, 1);
}

#[tokio::test]
async fn test_malformed_page_degrades() {
    let search = Arc::new(ScriptedSearch::returning(&["https://example.com"]));
    let server = Arc::new(PageServer::new().page(
        "https://example.com/about",
        200,
        "<div><<p>unterminated <a href='mailto:'>x",
    ));
    let pipeline = build_pipeline(search, server, FinderConfig::default());

    let results = pipeline.run("rust", 60).await;

    assert_eq!(results.len(), 1);
    assert_eq!(results.pages[0].title, "N/A");
    assert!(results.pages[0].emails.is_empty());
    assert!(!results.pages[0].is_job_like);
}
