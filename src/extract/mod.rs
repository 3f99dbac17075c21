//! Signal extraction from fetched pages
//!
//! ```text
//! HTML → page::PageSignals (title, snippet)
//!      → email::EmailExtractor (mailto + de-obfuscated text)
//!      → classifier::is_job_like (title, snippet)
//! ```

pub mod classifier;
pub mod email;
pub mod page;

use thiserror::Error;

pub use classifier::{is_job_like, JOB_KEYWORDS};
pub use email::EmailExtractor;
pub use page::PageSignals;

/// Errors raised while building extractors
#[derive(Debug, Error)]
pub enum ExtractError {
    /// A built-in pattern failed to compile
    #[error("Invalid extraction pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}
