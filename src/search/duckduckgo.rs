// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! DuckDuckGo search provider
//!
//! Implements web search using DuckDuckGo's HTML interface.
//! No API key required.

use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};
use std::time::Duration;
use url::Url;

use super::provider::SearchProvider;
use super::types::{SearchError, SearchItem};

const DDG_HTML_URL: &str = "https://html.duckduckgo.com/html/";

// The HTML endpoint serves an empty page to unknown agents.
const DDG_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// DuckDuckGo search provider (no API key required)
pub struct DuckDuckGoProvider {
    client: Client,
    timeout: Duration,
}

impl DuckDuckGoProvider {
    /// Create a new DuckDuckGo provider
    pub fn new(timeout: Duration) -> Result<Self, SearchError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(DDG_USER_AGENT)
            .build()
            .map_err(|e| SearchError::Client(e.to_string()))?;

        Ok(Self { client, timeout })
    }
}

#[async_trait]
impl SearchProvider for DuckDuckGoProvider {
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<SearchItem>, SearchError> {
        if max_results == 0 {
            return Ok(Vec::new());
        }

        let response = self
            .client
            .post(DDG_HTML_URL)
            .form(&[("q", query)])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SearchError::Timeout {
                        timeout_ms: u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX),
                    }
                } else {
                    SearchError::ApiError {
                        status: 0,
                        message: e.to_string(),
                    }
                }
            })?;

        if !response.status().is_success() {
            return Err(SearchError::ApiError {
                status: response.status().as_u16(),
                message: "DuckDuckGo request failed".to_string(),
            });
        }

        let html = response.text().await.map_err(|e| SearchError::ApiError {
            status: 0,
            message: e.to_string(),
        })?;

        Ok(parse_ddg_html(&html, max_results))
    }

    fn name(&self) -> &'static str {
        "duckduckgo"
    }
}

/// Parse DuckDuckGo HTML response into search items
///
/// Each `div.result` block carries an `a.result__a` title link and an
/// optional `.result__snippet`. Blocks without a resolvable link are skipped.
fn parse_ddg_html(html: &str, max_results: usize) -> Vec<SearchItem> {
    let document = Html::parse_document(html);
    let (Ok(result_sel), Ok(link_sel), Ok(snippet_sel)) = (
        Selector::parse("div.result"),
        Selector::parse("a.result__a"),
        Selector::parse(".result__snippet"),
    ) else {
        return Vec::new();
    };

    let mut results = Vec::new();
    for block in document.select(&result_sel) {
        if results.len() >= max_results {
            break;
        }

        let Some(anchor) = block.select(&link_sel).next() else {
            continue;
        };
        let Some(url) = anchor.value().attr("href").and_then(extract_ddg_url) else {
            continue;
        };

        let title = collapse_whitespace(&anchor.text().collect::<String>());
        let snippet = block
            .select(&snippet_sel)
            .next()
            .map(|s| collapse_whitespace(&s.text().collect::<String>()))
            .unwrap_or_default();

        results.push(SearchItem {
            title,
            href: Some(url),
            link: None,
            snippet,
        });
    }

    results
}

/// Extract actual URL from DuckDuckGo's redirect URL
///
/// Redirects look like `//duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.com&rut=...`.
fn extract_ddg_url(raw: &str) -> Option<String> {
    let absolute = if raw.starts_with("//") {
        format!("https:{}", raw)
    } else {
        raw.to_string()
    };

    let parsed = Url::parse(&absolute).ok()?;
    if let Some((_, target)) = parsed.query_pairs().find(|(key, _)| key == "uddg") {
        let target = target.into_owned();
        return (!target.is_empty()).then_some(target);
    }

    if parsed.host_str().is_some_and(|h| h.ends_with("duckduckgo.com")) {
        return None;
    }
    matches!(parsed.scheme(), "http" | "https").then_some(absolute)
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
