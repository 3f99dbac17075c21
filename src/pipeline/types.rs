// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Result types produced by a pipeline run

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Signals extracted from one successfully fetched page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedPage {
    /// Domain the page was probed under
    pub domain: String,
    /// URL that was requested
    pub url: String,
    /// HTTP status (always 200 for extracted pages)
    pub status: u16,
    /// First heading, page title or "N/A"
    pub title: String,
    /// Leading visible text, bounded in length
    pub snippet: String,
    /// Whether the page reads like a job/career page
    pub is_job_like: bool,
    /// Lowercase addresses, sorted and deduplicated
    pub emails: Vec<String>,
    /// When the page was processed
    pub scraped_at: DateTime<Utc>,
}

/// Flat export row with emails joined into one column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRow {
    pub domain: String,
    pub url: String,
    pub status: u16,
    pub title: String,
    pub snippet: String,
    pub is_job_like: bool,
    pub emails: String,
    pub scraped_at: String,
}

impl ExtractedPage {
    /// Emails joined by `;`, empty when none were found
    pub fn emails_joined(&self) -> String {
        self.emails.join(";")
    }

    /// Convert to the flat export row
    pub fn to_row(&self) -> ResultRow {
        ResultRow {
            domain: self.domain.clone(),
            url: self.url.clone(),
            status: self.status,
            title: self.title.clone(),
            snippet: self.snippet.clone(),
            is_job_like: self.is_job_like,
            emails: self.emails_joined(),
            scraped_at: self.scraped_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}

/// Ranked pages of one run
///
/// Pages are ordered job-like first, then by domain ascending. Pages that
/// tie keep the order they were produced in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultSet {
    /// Query the run was started with
    pub query: String,
    /// Number of unique domains discovery returned
    pub domains_discovered: usize,
    /// Number of candidate URLs fetched across all domains
    pub urls_attempted: usize,
    /// Ranked pages
    pub pages: Vec<ExtractedPage>,
}

impl ResultSet {
    /// A run that found nothing
    pub fn empty(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    /// Build a result set, ranking `pages`
    pub fn ranked(
        query: impl Into<String>,
        domains_discovered: usize,
        urls_attempted: usize,
        mut pages: Vec<ExtractedPage>,
    ) -> Self {
        rank_pages(&mut pages);
        Self {
            query: query.into(),
            domains_discovered,
            urls_attempted,
            pages,
        }
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ExtractedPage> {
        self.pages.iter()
    }

    /// Export rows in rank order
    pub fn rows(&self) -> Vec<ResultRow> {
        self.pages.iter().map(ExtractedPage::to_row).collect()
    }

    /// Number of job-like pages
    pub fn job_like_count(&self) -> usize {
        self.pages.iter().filter(|p| p.is_job_like).count()
    }
}

/// Stable sort by (job-likelihood descending, domain ascending)
pub fn rank_pages(pages: &mut [ExtractedPage]) {
    pages.sort_by(|a, b| {
        b.is_job_like
            .cmp(&a.is_job_like)
            .then_with(|| a.domain.cmp(&b.domain))
    });
}
