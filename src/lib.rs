// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod cli;
pub mod config;
pub mod discovery;
pub mod extract;
pub mod fetch;
pub mod pipeline;
pub mod search;

pub use config::FinderConfig;
pub use discovery::DomainDiscoverer;
pub use extract::{is_job_like, EmailExtractor, PageSignals};
pub use fetch::{FetchResult, HttpTransport, PageFetcher, PathProber};
pub use pipeline::{ExtractedPage, ExtractionPipeline, PipelineError, ResultRow, ResultSet};
pub use search::{DuckDuckGoProvider, SearchItem, SearchProvider};
