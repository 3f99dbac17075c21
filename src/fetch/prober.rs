// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Career/contact path probing for a single domain

use futures::future::join_all;
use std::collections::HashSet;
use tracing::{debug, warn};
use url::Url;

use super::fetcher::{FetchResult, PageFetcher};

/// Well-known career and contact paths, probed after the domain root
pub const COMMON_PATHS: &[&str] = &[
    "/careers",
    "/careers/",
    "/jobs",
    "/jobs/",
    "/about/careers",
    "/company/careers",
    "/careers.html",
    "/careers.php",
    "/join-us",
    "/join-us/",
    "/vacancies",
    "/open-positions",
    "/work-with-us",
    "/about-us/careers",
    "/team",
    "/about",
    "/contact",
    "/contact-us",
];

/// Pages kept from probing one domain
#[derive(Debug, Clone)]
pub struct DomainProbe {
    pub domain: String,
    /// Successful pages, in candidate order
    pub pages: Vec<FetchResult>,
    /// Number of candidate URLs attempted
    pub attempted: usize,
}

/// Probes a fixed list of paths on a domain
pub struct PathProber {
    fetcher: PageFetcher,
    paths: Vec<String>,
}

impl PathProber {
    /// Create a prober; `paths` are joined onto `https://<domain>`
    pub fn new(fetcher: PageFetcher, paths: Vec<String>) -> Self {
        Self { fetcher, paths }
    }

    /// Root URL followed by one URL per path, without duplicates
    pub fn candidate_urls(&self, domain: &str) -> Vec<String> {
        let root = format!("https://{}", domain);
        let base = match Url::parse(&root) {
            Ok(base) => base,
            Err(e) => {
                warn!("Cannot build URLs for domain '{}': {}", domain, e);
                return Vec::new();
            }
        };

        let mut seen = HashSet::new();
        let mut urls = Vec::with_capacity(self.paths.len() + 1);
        // The root is kept as written; the parsed form only serves as join base.
        seen.insert(base.to_string());
        urls.push(root);

        for path in &self.paths {
            match base.join(path) {
                Ok(url) => {
                    let url = url.to_string();
                    if seen.insert(url.clone()) {
                        urls.push(url);
                    }
                }
                Err(e) => debug!("Skipping path '{}' on {}: {}", path, domain, e),
            }
        }
        urls
    }

    /// Fetch every candidate URL concurrently and keep 200 responses with a body
    ///
    /// Failed fetches arrive as `(url, 0, "")` sentinels and are dropped with
    /// the non-200 responses.
    pub async fn probe(&self, domain: String) -> DomainProbe {
        let urls = self.candidate_urls(&domain);
        let attempted = urls.len();

        let results = join_all(urls.iter().map(|url| self.fetcher.fetch(url))).await;
        let failures = results.iter().filter(|r| r.status == 0).count();
        let pages: Vec<FetchResult> = results
            .into_iter()
            .filter(FetchResult::is_success)
            .collect();

        debug!(
            "Probed {}: {} of {} URLs usable, {} failed",
            domain,
            pages.len(),
            attempted,
            failures
        );

        DomainProbe {
            domain,
            pages,
            attempted,
        }
    }
}
