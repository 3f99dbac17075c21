// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Domain discovery
//!
//! Expands a free-text query into several search templates, runs them one
//! after another against a search provider and reduces the result links to
//! a set of unique lowercase hosts.

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::{debug, info, warn};
use url::Url;

use crate::search::{SearchProvider, SearchRateLimiter};

/// Query templates; `{q}` is replaced by the user's query
pub const QUERY_TEMPLATES: &[&str] = &[
    "{q} jobs",
    "{q} careers",
    "{q} \"career\"",
    "{q} \"apply\"",
    "{q} \"hiring\"",
    "{q} site:linkedin.com {q}",
    "{q} site:indeed.com {q}",
    "{q} site:glassdoor.com {q}",
];

/// Discovers candidate employer domains for a query
pub struct DomainDiscoverer {
    provider: Arc<dyn SearchProvider>,
    rate_limiter: Option<SearchRateLimiter>,
}

impl DomainDiscoverer {
    /// Create a discoverer over the given search provider
    pub fn new(provider: Arc<dyn SearchProvider>) -> Self {
        Self {
            provider,
            rate_limiter: None,
        }
    }

    /// Throttle template searches through a rate limiter
    pub fn with_rate_limiter(mut self, rate_limiter: SearchRateLimiter) -> Self {
        self.rate_limiter = Some(rate_limiter);
        self
    }

    /// Discover unique domains for `query` within a total result budget
    ///
    /// The budget is split evenly across templates, rounding down, and every
    /// template is searched even when its share is zero. A failing template
    /// is logged and skipped; if every template fails the set is empty.
    pub async fn discover(&self, query: &str, result_budget: usize) -> BTreeSet<String> {
        let mut domains = BTreeSet::new();

        let query = query.trim();
        if query.is_empty() {
            warn!("Empty discovery query, nothing to search");
            return domains;
        }

        let queries = expand_queries(query);
        let per_template = per_template_budget(result_budget, queries.len());
        if per_template == 0 {
            warn!(
                "Result budget {} too small for {} templates, searches request 0 results",
                result_budget,
                queries.len()
            );
        }

        let mut failed = 0usize;
        for q in &queries {
            if let Some(limiter) = &self.rate_limiter {
                limiter.wait().await;
            }

            debug!("Searching {} for: {}", self.provider.name(), q);
            match self.provider.search(q, per_template).await {
                Ok(items) => {
                    let before = domains.len();
                    domains.extend(
                        items
                            .iter()
                            .filter_map(|item| item.link())
                            .filter_map(domain_from_link),
                    );
                    debug!(
                        "Template '{}' returned {} items, {} new domains",
                        q,
                        items.len(),
                        domains.len() - before
                    );
                }
                Err(e) => {
                    failed += 1;
                    warn!("Search for '{}' failed: {}, skipping template", q, e);
                }
            }
        }

        info!(
            "Discovered {} unique domains for '{}' ({} of {} templates failed)",
            domains.len(),
            query,
            failed,
            queries.len()
        );
        domains
    }
}

/// Expand a query into one search string per template
pub fn expand_queries(query: &str) -> Vec<String> {
    QUERY_TEMPLATES
        .iter()
        .map(|t| t.replace("{q}", query))
        .collect()
}

/// Results requested from each template (integer division, may be zero)
pub fn per_template_budget(result_budget: usize, templates: usize) -> usize {
    if templates == 0 {
        0
    } else {
        result_budget / templates
    }
}

/// Derive the lowercase network location from a result link
///
/// The result is canonical for `https`, the scheme probing uses: an
/// explicit port is kept unless it is 443, so `http://acme.com:443/` and
/// `https://acme.com/` yield the same domain.
pub fn domain_from_link(link: &str) -> Option<String> {
    let parsed = Url::parse(link.trim()).ok()?;
    let host = parsed.host_str()?.to_lowercase();
    if host.is_empty() {
        return None;
    }
    let authority = match parsed.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host,
    };

    let probed = Url::parse(&format!("https://{}", authority)).ok()?;
    let host = probed.host_str()?;
    Some(match probed.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    })
}
