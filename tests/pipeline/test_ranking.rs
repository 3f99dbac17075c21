// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Ranking of extracted pages

use super::mocks::{build_pipeline, PageServer, ScriptedSearch};
use career_finder::FinderConfig;
use std::sync::Arc;

const JOB_PAGE: &str = "<h1>Join us</h1><p>We are hiring!</p>";
const PLAIN_PAGE: &str = "<h1>Our story</h1><p>Founded in 1999.</p>";

#[tokio::test]
async fn test_job_like_first_then_domain() {
    let search = Arc::new(ScriptedSearch::returning(&[
        "https://b.com",
        "https://a.com",
        "https://c.com",
    ]));
    let server = Arc::new(
        PageServer::new()
            .page("https://b.com", 200, PLAIN_PAGE)
            .page("https://a.com", 200, JOB_PAGE)
            .page("https://c.com", 200, JOB_PAGE),
    );
    let pipeline = build_pipeline(search, server, FinderConfig::default());

    let results = pipeline.run("rust", 60).await;

    let order: Vec<_> = results.iter().map(|p| p.domain.as_str()).collect();
    assert_eq!(order, vec!["a.com", "c.com", "b.com"]);
    assert_eq!(results.job_like_count(), 2);
}

#[tokio::test]
async fn test_pages_within_domain_keep_path_order() {
    let search = Arc::new(ScriptedSearch::returning(&["https://a.com"]));
    let server = Arc::new(
        PageServer::new()
            .page("https://a.com/contact", 200, JOB_PAGE)
            .page("https://a.com/careers", 200, JOB_PAGE)
            .page("https://a.com/jobs", 200, JOB_PAGE)
            .page("https://a.com/about", 200, PLAIN_PAGE),
    );
    let pipeline = build_pipeline(search, server, FinderConfig::default());

    let results = pipeline.run("rust", 60).await;

    let urls: Vec<_> = results.iter().map(|p| p.url.as_str()).collect();
    assert_eq!(
        urls,
        vec![
            "https://a.com/careers",
            "https://a.com/jobs",
            "https://a.com/contact",
            "https://a.com/about",
        ]
    );
}

#[tokio::test]
async fn test_export_rows_follow_rank() {
    let search = Arc::new(ScriptedSearch::returning(&["https://b.com", "https://a.com"]));
    let server = Arc::new(
        PageServer::new()
            .page("https://b.com", 200, "<p>Mail hr@b.com or jobs@b.com, we are hiring</p>")
            .page("https://a.com", 200, PLAIN_PAGE),
    );
    let pipeline = build_pipeline(search, server, FinderConfig::default());

    let rows = pipeline.run("rust", 60).await.rows();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].domain, "b.com");
    assert_eq!(rows[0].emails, "hr@b.com;jobs@b.com");
    assert_eq!(rows[1].domain, "a.com");
    assert_eq!(rows[1].emails, "");
}
