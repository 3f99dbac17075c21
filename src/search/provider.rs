// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Search provider trait definition

use async_trait::async_trait;

use super::types::{SearchError, SearchItem};

/// Trait for implementing search providers
///
/// Discovery issues one call per query template and reads only the link
/// fields of the returned items.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Perform a web search
    ///
    /// # Arguments
    /// * `query` - The search query string
    /// * `max_results` - Maximum number of results to return
    ///
    /// # Returns
    /// A vector of search items or an error
    async fn search(&self, query: &str, max_results: usize)
        -> Result<Vec<SearchItem>, SearchError>;

    /// Get the provider name for logging
    fn name(&self) -> &'static str;
}
