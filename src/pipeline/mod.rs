// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! End-to-end career page discovery
//!
//! ## Flow
//!
//! ```text
//! query → DomainDiscoverer ─(all domains)→ PathProber per domain ─┐
//!                                                                 │ shared Semaphore
//!            ResultSet ← rank ← extract (title, snippet, emails) ←┘
//! ```
//!
//! Discovery completes before any probing starts. All state of a run
//! (domains, the admission pool, extracted pages) is created inside `run`
//! and dropped when it returns.

pub mod types;

use std::sync::Arc;

use chrono::Utc;
use futures::stream::{self, StreamExt};
use scraper::Html;
use thiserror::Error;
use tokio::sync::Semaphore;
use tracing::info;

use crate::config::FinderConfig;
use crate::discovery::DomainDiscoverer;
use crate::extract::{is_job_like, EmailExtractor, ExtractError, PageSignals};
use crate::fetch::{
    DomainProbe, FetchError, FetchResult, HttpTransport, PageFetcher, PathProber, ReqwestTransport,
};
use crate::search::{DuckDuckGoProvider, SearchError, SearchProvider, SearchRateLimiter};

pub use types::{rank_pages, ExtractedPage, ResultRow, ResultSet};

/// Errors raised while assembling a pipeline
///
/// A run itself never fails; these only come from construction.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Search provider error: {0}")]
    Search(#[from] SearchError),

    #[error("HTTP transport error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Extractor error: {0}")]
    Extract(#[from] ExtractError),
}

/// Orchestrates discovery, probing, extraction and ranking
pub struct ExtractionPipeline {
    config: FinderConfig,
    discoverer: DomainDiscoverer,
    transport: Arc<dyn HttpTransport>,
    emails: EmailExtractor,
}

impl ExtractionPipeline {
    /// Create a pipeline backed by DuckDuckGo and `reqwest`
    pub fn new(config: FinderConfig) -> Result<Self, PipelineError> {
        config.validate().map_err(PipelineError::InvalidConfig)?;

        let provider = Arc::new(DuckDuckGoProvider::new(config.search_timeout())?);
        let transport = Arc::new(ReqwestTransport::new(config.follow_redirects)?);
        let limiter = SearchRateLimiter::new(config.search_rate_limit_per_minute);

        let mut pipeline = Self::with_components(provider, transport, config)?;
        pipeline.discoverer = pipeline.discoverer.with_rate_limiter(limiter);
        Ok(pipeline)
    }

    /// Create a pipeline over caller-supplied search and HTTP collaborators
    ///
    /// Searches are not throttled.
    pub fn with_components(
        provider: Arc<dyn SearchProvider>,
        transport: Arc<dyn HttpTransport>,
        config: FinderConfig,
    ) -> Result<Self, PipelineError> {
        config.validate().map_err(PipelineError::InvalidConfig)?;

        Ok(Self {
            discoverer: DomainDiscoverer::new(provider),
            transport,
            emails: EmailExtractor::new()?,
            config,
        })
    }

    /// Run the configured result budget for `query`
    pub async fn run_default(&self, query: &str) -> ResultSet {
        self.run(query, self.config.result_budget).await
    }

    /// Discover, probe, extract and rank pages for `query`
    ///
    /// Returns an empty set, without fetching anything, when discovery finds
    /// no domains.
    pub async fn run(&self, query: &str, result_budget: usize) -> ResultSet {
        let domains = self.discoverer.discover(query, result_budget).await;
        if domains.is_empty() {
            info!("No domains discovered for '{}', nothing to probe", query.trim());
            return ResultSet::empty(query.trim());
        }
        let domains_discovered = domains.len();

        // Fresh pool per run, shared by every fetch of every domain.
        let limiter = Arc::new(Semaphore::new(self.config.max_concurrent_fetches));
        let fetcher = PageFetcher::new(
            self.transport.clone(),
            limiter,
            self.config.user_agent.clone(),
            self.config.request_timeout(),
        );
        let prober = PathProber::new(fetcher, self.config.candidate_paths.clone());

        info!(
            "Probing {} domains ({} fetch slots, {} domains at a time)",
            domains_discovered, self.config.max_concurrent_fetches, self.config.max_concurrent_domains
        );

        let probes: Vec<DomainProbe> = stream::iter(domains)
            .map(|domain| prober.probe(domain))
            .buffer_unordered(self.config.max_concurrent_domains)
            .collect()
            .await;

        let urls_attempted = probes.iter().map(|p| p.attempted).sum();
        let pages: Vec<ExtractedPage> = probes
            .iter()
            .flat_map(|probe| {
                probe
                    .pages
                    .iter()
                    .map(move |page| self.extract_page(&probe.domain, page))
            })
            .collect();

        let results = ResultSet::ranked(query.trim(), domains_discovered, urls_attempted, pages);
        info!(
            "Extracted {} pages ({} job-like) from {} domains, {} URLs attempted",
            results.len(),
            results.job_like_count(),
            domains_discovered,
            urls_attempted
        );
        results
    }

    /// Build an `ExtractedPage` from one successful fetch
    pub fn extract_page(&self, domain: &str, page: &FetchResult) -> ExtractedPage {
        let document = Html::parse_document(&page.body);
        let signals = PageSignals::from_document(&document, self.config.snippet_chars);
        let emails = self.emails.extract_from_document(&document, &page.body);
        let job_like = is_job_like(&[signals.snippet.as_str(), signals.title.as_str()]);

        ExtractedPage {
            domain: domain.to_string(),
            url: page.url.clone(),
            status: page.status,
            title: signals.title,
            snippet: signals.snippet,
            is_job_like: job_like,
            emails,
            scraped_at: Utc::now(),
        }
    }
}
