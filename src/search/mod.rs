// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Web search collaborator
//!
//! Discovery only needs result links from a search engine. This module
//! defines the provider seam, the item shape it returns, and the default
//! DuckDuckGo HTML provider.
//!
//! Key features:
//! - Pluggable providers behind `SearchProvider`
//! - Explicit primary/fallback link lookup on result items
//! - Rate limiting of search calls

pub mod duckduckgo;
pub mod provider;
pub mod rate_limiter;
pub mod types;

// Re-export commonly used types
pub use duckduckgo::DuckDuckGoProvider;
pub use provider::SearchProvider;
pub use rate_limiter::SearchRateLimiter;
pub use types::{SearchError, SearchItem};
