// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! HTTP page fetching under a shared concurrency limit
//!
//! `PageFetcher` performs one bounded, timed-out GET per call. The actual
//! network I/O sits behind `HttpTransport` so probing can run against a
//! scripted transport in tests.

use async_trait::async_trait;
use reqwest::header::USER_AGENT;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Semaphore;
use tracing::debug;

/// A single GET request as seen by the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub url: String,
    pub user_agent: String,
    pub timeout: Duration,
}

/// Status and body of a completed HTTP exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// Outcome of fetching one URL
///
/// A failed fetch is represented by `status == 0` and an empty body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResult {
    pub url: String,
    pub status: u16,
    pub body: String,
}

impl FetchResult {
    /// The failure sentinel for `url`
    pub fn failed(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            status: 0,
            body: String::new(),
        }
    }

    /// Whether the page is usable for extraction (HTTP 200, non-empty body)
    pub fn is_success(&self) -> bool {
        self.status == 200 && !self.body.is_empty()
    }
}

/// Page fetch error types
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// Request timed out
    #[error("Timeout fetching: {url}")]
    Timeout { url: String },

    /// Connection, TLS, redirect or body read failure
    #[error("HTTP error for {url}: {message}")]
    Http { url: String, message: String },

    /// The admission pool was closed before a slot was granted
    #[error("Fetch limiter closed")]
    LimiterClosed,

    /// The HTTP client could not be built
    #[error("HTTP client error: {0}")]
    Client(String),
}

/// Transport seam for outbound GET requests
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Issue a GET and return the status and body text
    async fn get(&self, request: &FetchRequest) -> Result<RawResponse, FetchError>;
}

/// `reqwest`-backed transport
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a transport; redirects are followed (up to 10 hops) when enabled
    pub fn new(follow_redirects: bool) -> Result<Self, FetchError> {
        let policy = if follow_redirects {
            reqwest::redirect::Policy::limited(10)
        } else {
            reqwest::redirect::Policy::none()
        };

        let client = Client::builder()
            .redirect(policy)
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, request: &FetchRequest) -> Result<RawResponse, FetchError> {
        let map_err = |e: reqwest::Error| {
            if e.is_timeout() {
                FetchError::Timeout {
                    url: request.url.clone(),
                }
            } else {
                FetchError::Http {
                    url: request.url.clone(),
                    message: e.to_string(),
                }
            }
        };

        let response = self
            .client
            .get(&request.url)
            .header(USER_AGENT, &request.user_agent)
            .timeout(request.timeout)
            .send()
            .await
            .map_err(map_err)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(map_err)?;

        Ok(RawResponse { status, body })
    }
}

/// Fetches single pages, each holding a slot of the shared limiter
#[derive(Clone)]
pub struct PageFetcher {
    transport: Arc<dyn HttpTransport>,
    limiter: Arc<Semaphore>,
    user_agent: String,
    timeout: Duration,
}

impl PageFetcher {
    /// Create a fetcher bound to an admission pool
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        limiter: Arc<Semaphore>,
        user_agent: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            transport,
            limiter,
            user_agent: user_agent.into(),
            timeout,
        }
    }

    /// Fetch `url`, reporting failures as typed errors
    ///
    /// Any HTTP status is a successful fetch here; callers decide which
    /// statuses they keep. The slot is released when this returns, on every
    /// path, because the permit is dropped with the stack frame.
    pub async fn try_fetch(&self, url: &str) -> Result<FetchResult, FetchError> {
        let _permit = self
            .limiter
            .acquire()
            .await
            .map_err(|_| FetchError::LimiterClosed)?;

        let request = FetchRequest {
            url: url.to_string(),
            user_agent: self.user_agent.clone(),
            timeout: self.timeout,
        };

        match tokio::time::timeout(self.timeout, self.transport.get(&request)).await {
            Ok(Ok(response)) => Ok(FetchResult {
                url: request.url,
                status: response.status,
                body: response.body,
            }),
            Ok(Err(e)) => Err(e),
            Err(_) => Err(FetchError::Timeout { url: request.url }),
        }
    }

    /// Fetch `url`, collapsing any failure to the `(url, 0, "")` sentinel
    ///
    /// This is the form probing uses; the reason for a failure is only logged.
    pub async fn fetch(&self, url: &str) -> FetchResult {
        match self.try_fetch(url).await {
            Ok(result) => result,
            Err(e) => {
                debug!("{}", e);
                FetchResult::failed(url)
            }
        }
    }

    /// Slots currently free in the admission pool
    pub fn available_slots(&self) -> usize {
        self.limiter.available_permits()
    }
}
