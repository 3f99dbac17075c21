// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Discovery stage as seen through the pipeline

use super::mocks::{build_pipeline, urls_per_domain, PageServer, ScriptedSearch};
use career_finder::discovery::QUERY_TEMPLATES;
use career_finder::FinderConfig;
use std::sync::atomic::Ordering;
use std::sync::Arc;

#[tokio::test]
async fn test_zero_domains_means_no_fetches() {
    let search = Arc::new(ScriptedSearch::failing());
    let server = Arc::new(PageServer::new());
    let pipeline = build_pipeline(search.clone(), server.clone(), FinderConfig::default());

    let results = pipeline.run("MERN stack", 60).await;

    assert!(results.is_empty());
    assert_eq!(results.domains_discovered, 0);
    assert_eq!(search.calls.load(Ordering::SeqCst), QUERY_TEMPLATES.len());
    assert_eq!(server.request_count(), 0);
}

#[tokio::test]
async fn test_search_without_links_means_no_fetches() {
    let search = Arc::new(ScriptedSearch::returning(&[]));
    let server = Arc::new(PageServer::new());
    let pipeline = build_pipeline(search, server.clone(), FinderConfig::default());

    assert!(pipeline.run("rust", 60).await.is_empty());
    assert_eq!(server.request_count(), 0);
}

#[tokio::test]
async fn test_budget_below_template_count_requests_zero_results() {
    let search = Arc::new(ScriptedSearch::returning(&["https://acme.com"]));
    let server = Arc::new(PageServer::new());
    let pipeline = build_pipeline(search.clone(), server.clone(), FinderConfig::default());

    let results = pipeline.run("rust", QUERY_TEMPLATES.len() - 1).await;

    assert!(results.is_empty());
    assert_eq!(search.calls.load(Ordering::SeqCst), QUERY_TEMPLATES.len());
    assert_eq!(server.request_count(), 0);
}

#[tokio::test]
async fn test_https_default_port_on_http_link_is_same_domain() {
    let search = Arc::new(ScriptedSearch::returning(&[
        "https://acme.com/a",
        "http://acme.com:443/b",
    ]));
    let server = Arc::new(PageServer::new());
    let pipeline = build_pipeline(search, server.clone(), FinderConfig::default());

    let results = pipeline.run("rust", 80).await;

    assert_eq!(results.domains_discovered, 1);
    assert_eq!(server.request_count(), urls_per_domain());

    let mut urls = server.requested_urls();
    urls.sort();
    urls.dedup();
    assert_eq!(urls.len(), urls_per_domain());
}

#[tokio::test]
async fn test_domains_probed_once_each() {
    let search = Arc::new(ScriptedSearch::returning(&[
        "https://acme.com/jobs/1",
        "https://ACME.com/jobs/2",
        "https://globex.com/",
    ]));
    let server = Arc::new(PageServer::new());
    let pipeline = build_pipeline(search, server.clone(), FinderConfig::default());

    let results = pipeline.run("rust", 80).await;

    assert_eq!(results.domains_discovered, 2);
    assert_eq!(results.urls_attempted, 2 * urls_per_domain());
    assert_eq!(server.request_count(), 2 * urls_per_domain());

    let mut urls = server.requested_urls();
    let total = urls.len();
    urls.sort();
    urls.dedup();
    assert_eq!(urls.len(), total);
}
