// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Email address extraction with obfuscation handling
//!
//! Two sources feed the result: `mailto:` anchors in the parsed document,
//! and an email-shaped pattern run over the raw HTML after common
//! human-readable disguises (`name [at] example [dot] com`) are reversed.

use regex::{Regex, RegexBuilder};
use scraper::{Html, Selector};
use std::borrow::Cow;
use std::collections::BTreeSet;

use super::ExtractError;

/// Permissive email shape, matched case-insensitively
pub const EMAIL_PATTERN: &str = r"[a-zA-Z0-9._%+\-]+@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,}";

/// Obfuscation substitutions, applied in order and case-insensitively
///
/// Bracketed forms swallow the whitespace around them; the bare-word forms
/// need whitespace on both sides.
pub const OBFUSCATION_RULES: &[(&str, &str)] = &[
    (r"\s*\[at\]\s*|\s*\(at\)\s*|\s+at\s+", "@"),
    (r"\s*\[dot\]\s*|\s*\(dot\)\s*|\s+dot\s+", "."),
    (r"\s*\[underscore\]\s*", "_"),
];

/// Extracts normalized, deduplicated email addresses from HTML
#[derive(Debug, Clone)]
pub struct EmailExtractor {
    email: Regex,
    rules: Vec<(Regex, &'static str)>,
}

impl EmailExtractor {
    /// Compile the built-in patterns
    pub fn new() -> Result<Self, ExtractError> {
        let email = RegexBuilder::new(EMAIL_PATTERN)
            .case_insensitive(true)
            .build()?;
        let rules = OBFUSCATION_RULES
            .iter()
            .map(|(pattern, replacement)| {
                RegexBuilder::new(pattern)
                    .case_insensitive(true)
                    .build()
                    .map(|re| (re, *replacement))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { email, rules })
    }

    /// Extract addresses from raw HTML
    ///
    /// Output is lowercase, sorted and free of duplicates.
    pub fn extract(&self, html: &str) -> Vec<String> {
        let document = Html::parse_document(html);
        self.extract_from_document(&document, html)
    }

    /// Extract addresses using an already parsed document for `mailto:` links
    pub fn extract_from_document(&self, document: &Html, raw: &str) -> Vec<String> {
        let mut emails: BTreeSet<String> = mailto_addresses(document)
            .into_iter()
            .map(|addr| addr.to_lowercase())
            .collect();

        let cleaned = self.normalize_obfuscation(raw);
        emails.extend(
            self.email
                .find_iter(&cleaned)
                .map(|m| m.as_str().trim().to_lowercase()),
        );

        emails.into_iter().collect()
    }

    /// Reverse `[at]`, `(dot)`, ` at `, `[underscore]` style disguises
    pub fn normalize_obfuscation<'a>(&self, text: &'a str) -> Cow<'a, str> {
        let mut current = Cow::Borrowed(text);
        for (pattern, replacement) in &self.rules {
            if pattern.is_match(&current) {
                current = Cow::Owned(pattern.replace_all(&current, *replacement).into_owned());
            }
        }
        current
    }
}

/// Address part of every `mailto:` anchor, without query strings
///
/// An unusable selector contributes no addresses rather than failing.
fn mailto_addresses(document: &Html) -> Vec<String> {
    let Ok(selector) = Selector::parse(r#"a[href^="mailto:"]"#) else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|a| a.value().attr("href"))
        .filter_map(|href| href.strip_prefix("mailto:"))
        .filter_map(|rest| rest.split('?').next())
        .flat_map(|addrs| addrs.split(','))
        .map(str::trim)
        .filter(|addr| !addr.is_empty())
        .map(String::from)
        .collect()
}
