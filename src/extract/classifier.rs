// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Job-likelihood classification by keyword containment

/// Terms whose presence marks a page as job related
pub const JOB_KEYWORDS: &[&str] = &[
    "job",
    "jobs",
    "career",
    "careers",
    "apply",
    "hiring",
    "vacancy",
    "vacancies",
    "open position",
    "openings",
    "join our team",
];

/// Returns true if any fragment contains any job keyword, ignoring case
///
/// Matching is plain substring containment: "hiringmanager" matches
/// "hiring" even though it is not a separate word.
pub fn is_job_like<S: AsRef<str>>(fragments: &[S]) -> bool {
    fragments.iter().any(|fragment| {
        let lower = fragment.as_ref().to_lowercase();
        JOB_KEYWORDS.iter().any(|keyword| lower.contains(keyword))
    })
}
