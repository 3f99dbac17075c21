// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Configuration for a career discovery run
//!
//! All values are plain constants held by the caller. Nothing in here is
//! mutated by a run, so one config can drive any number of runs.

use std::env;
use std::time::Duration;

use crate::fetch::prober::COMMON_PATHS;

/// Identification header sent with every page fetch
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (compatible; CareerFinder/1.0; +https://example.com/bot)";

/// Configuration for discovery, probing and extraction
#[derive(Debug, Clone)]
pub struct FinderConfig {
    /// Total number of search results to consider across all templates
    pub result_budget: usize,
    /// Size of the shared admission slot pool for page fetches
    pub max_concurrent_fetches: usize,
    /// Maximum number of domains being probed at once
    pub max_concurrent_domains: usize,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
    /// Search provider request timeout in seconds
    pub search_timeout_secs: u64,
    /// Search calls allowed per minute
    pub search_rate_limit_per_minute: u32,
    /// Maximum characters kept from a page's visible text
    pub snippet_chars: usize,
    /// User-Agent header for page fetches
    pub user_agent: String,
    /// Whether page fetches follow redirects
    pub follow_redirects: bool,
    /// Path suffixes probed on every domain, in order
    pub candidate_paths: Vec<String>,
}

impl FinderConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            result_budget: parse_env("CAREER_RESULT_BUDGET").unwrap_or(defaults.result_budget),
            max_concurrent_fetches: parse_env("CAREER_MAX_CONCURRENT_FETCHES")
                .unwrap_or(defaults.max_concurrent_fetches),
            max_concurrent_domains: parse_env("CAREER_MAX_CONCURRENT_DOMAINS")
                .unwrap_or(defaults.max_concurrent_domains),
            request_timeout_secs: parse_env("CAREER_REQUEST_TIMEOUT_SECS")
                .unwrap_or(defaults.request_timeout_secs),
            search_timeout_secs: parse_env("CAREER_SEARCH_TIMEOUT_SECS")
                .unwrap_or(defaults.search_timeout_secs),
            search_rate_limit_per_minute: parse_env("CAREER_SEARCH_RATE_LIMIT_PER_MINUTE")
                .unwrap_or(defaults.search_rate_limit_per_minute),
            snippet_chars: parse_env("CAREER_SNIPPET_CHARS").unwrap_or(defaults.snippet_chars),
            user_agent: env::var("CAREER_USER_AGENT")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.user_agent),
            follow_redirects: defaults.follow_redirects,
            candidate_paths: defaults.candidate_paths,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_concurrent_fetches == 0 {
            return Err("max_concurrent_fetches must be at least 1".to_string());
        }
        if self.max_concurrent_domains == 0 {
            return Err("max_concurrent_domains must be at least 1".to_string());
        }
        if self.request_timeout_secs == 0 {
            return Err("request_timeout_secs must be at least 1".to_string());
        }
        if self.search_timeout_secs == 0 {
            return Err("search_timeout_secs must be at least 1".to_string());
        }
        if self.search_rate_limit_per_minute == 0 {
            return Err("Search rate limit must be greater than 0".to_string());
        }
        if self.user_agent.trim().is_empty() {
            return Err("user_agent must not be empty".to_string());
        }
        Ok(())
    }

    /// Per-request timeout as a Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Search timeout as a Duration
    pub fn search_timeout(&self) -> Duration {
        Duration::from_secs(self.search_timeout_secs)
    }
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            result_budget: 60,
            max_concurrent_fetches: 20,
            max_concurrent_domains: 50,
            request_timeout_secs: 12,
            search_timeout_secs: 10,
            search_rate_limit_per_minute: 60,
            snippet_chars: 800,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            follow_redirects: true,
            candidate_paths: COMMON_PATHS.iter().map(|p| (*p).to_string()).collect(),
        }
    }
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}
