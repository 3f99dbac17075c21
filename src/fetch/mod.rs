// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Page fetching and path probing
//!
//! ## Architecture
//!
//! ```text
//! Domain → PathProber → candidate URLs → PageFetcher → HttpTransport
//!                                             ↓
//!                                  shared admission Semaphore
//! ```
//!
//! Every fetch of a probing run, whatever domain it belongs to, holds one
//! permit of the same semaphore for the duration of its request.

pub mod fetcher;
pub mod prober;

pub use fetcher::{
    FetchError, FetchRequest, FetchResult, HttpTransport, PageFetcher, RawResponse,
    ReqwestTransport,
};
pub use prober::{DomainProbe, PathProber, COMMON_PATHS};
