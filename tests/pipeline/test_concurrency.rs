// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Shared fetch limiter and domain cap

use super::mocks::{build_pipeline, urls_per_domain, PageServer, ScriptedSearch};
use career_finder::FinderConfig;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

fn domains(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("https://site{}.com", i)).collect()
}

#[tokio::test]
async fn test_fetch_concurrency_never_exceeds_pool() {
    let links = domains(5);
    let links: Vec<&str> = links.iter().map(String::as_str).collect();
    let search = Arc::new(ScriptedSearch::returning(&links));
    let server = Arc::new(PageServer::new().with_delay(Duration::from_millis(10)));
    let config = FinderConfig {
        max_concurrent_fetches: 3,
        ..Default::default()
    };
    let pipeline = build_pipeline(search, server.clone(), config);

    let results = pipeline.run("rust", 80).await;

    assert_eq!(results.domains_discovered, 5);
    assert_eq!(server.request_count(), 5 * urls_per_domain());
    let peak = server.max_in_flight.load(Ordering::SeqCst);
    assert!(peak <= 3, "peak in-flight {} exceeded pool of 3", peak);
    assert!(peak >= 2, "fetches never overlapped");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_pool_shared_across_domains_on_multi_thread_runtime() {
    let links = domains(8);
    let links: Vec<&str> = links.iter().map(String::as_str).collect();
    let search = Arc::new(ScriptedSearch::returning(&links));
    let server = Arc::new(PageServer::new().with_delay(Duration::from_millis(5)));
    let config = FinderConfig {
        max_concurrent_fetches: 4,
        ..Default::default()
    };
    let pipeline = build_pipeline(search, server.clone(), config);

    pipeline.run("rust", 80).await;

    assert_eq!(server.request_count(), 8 * urls_per_domain());
    assert!(server.max_in_flight.load(Ordering::SeqCst) <= 4);
}

#[tokio::test]
async fn test_domain_cap_limits_parallel_domains() {
    let links = domains(3);
    let links: Vec<&str> = links.iter().map(String::as_str).collect();
    let search = Arc::new(ScriptedSearch::returning(&links));
    let server = Arc::new(PageServer::new().with_delay(Duration::from_millis(10)));
    let config = FinderConfig {
        max_concurrent_fetches: 100,
        max_concurrent_domains: 1,
        ..Default::default()
    };
    let pipeline = build_pipeline(search, server.clone(), config);

    pipeline.run("rust", 80).await;

    assert_eq!(server.request_count(), 3 * urls_per_domain());
    assert!(server.max_in_flight.load(Ordering::SeqCst) <= urls_per_domain());
}

#[tokio::test]
async fn test_runs_do_not_share_state() {
    let search = Arc::new(ScriptedSearch::returning(&["https://a.com"]));
    let server = Arc::new(PageServer::new().page("https://a.com/jobs", 200, "<h1>Jobs</h1>"));
    let pipeline = build_pipeline(search, server.clone(), FinderConfig::default());

    let first = pipeline.run("rust", 60).await;
    let second = pipeline.run("rust", 60).await;

    assert_eq!(first.len(), 1);
    assert_eq!(second.len(), 1);
    assert_eq!(second.domains_discovered, 1);
    assert_eq!(server.request_count(), 2 * urls_per_domain());
}
