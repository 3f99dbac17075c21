// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Core types for the search collaborator

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single item returned by a search provider
///
/// Providers disagree on what they call the result URL. `href` is the
/// primary field and `link` the fallback; see [`SearchItem::link`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchItem {
    /// Title of the result
    #[serde(default)]
    pub title: String,
    /// Primary link field
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    /// Fallback link field
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Snippet/description of the result
    #[serde(default)]
    pub snippet: String,
}

impl SearchItem {
    /// Create an item with only the primary link field set
    pub fn with_href(href: impl Into<String>) -> Self {
        Self {
            href: Some(href.into()),
            ..Default::default()
        }
    }

    /// Create an item with only the fallback link field set
    pub fn with_link(link: impl Into<String>) -> Self {
        Self {
            link: Some(link.into()),
            ..Default::default()
        }
    }

    /// The result URL: `href` when non-empty, otherwise `link` when non-empty
    pub fn link(&self) -> Option<&str> {
        self.href
            .as_deref()
            .filter(|h| !h.trim().is_empty())
            .or_else(|| self.link.as_deref().filter(|l| !l.trim().is_empty()))
    }
}

/// Errors that can occur during search operations
#[derive(Debug, Error)]
pub enum SearchError {
    /// API error from the search provider
    #[error("Search API error: {status} - {message}")]
    ApiError {
        /// HTTP status code (0 when no response was received)
        status: u16,
        /// Error message
        message: String,
    },

    /// Search request timed out
    #[error("Search timeout after {timeout_ms}ms")]
    Timeout {
        /// Timeout duration in milliseconds
        timeout_ms: u64,
    },

    /// The provider could not be constructed
    #[error("Search client error: {0}")]
    Client(String),
}
