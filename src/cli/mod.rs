// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Command-line front end: run the pipeline, print a summary, export rows

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Local};
use clap::Parser;
use tracing::info;

use crate::config::FinderConfig;
use crate::pipeline::{ExtractionPipeline, ResultSet};

/// Career and contact page finder
#[derive(Parser, Debug)]
#[command(name = "career-finder")]
#[command(version)]
#[command(about = "Find career and contact pages for companies matching a query", long_about = None)]
pub struct Cli {
    /// Free-text query, e.g. "MERN stack"
    pub query: String,

    /// Total search results to consider across all templates
    #[arg(long = "max", env = "CAREER_RESULT_BUDGET")]
    pub max_results: Option<usize>,

    /// Output file (defaults to careers_<query>_<timestamp>.csv)
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Write pretty JSON instead of CSV
    #[arg(long)]
    pub json: bool,

    /// Maximum concurrent page fetches
    #[arg(long, env = "CAREER_MAX_CONCURRENT_FETCHES")]
    pub concurrency: Option<usize>,

    /// Per-request timeout in seconds
    #[arg(long, env = "CAREER_REQUEST_TIMEOUT_SECS")]
    pub timeout: Option<u64>,

    /// Only log warnings and errors, and skip the summary table
    #[arg(long, short)]
    pub quiet: bool,
}

impl Cli {
    /// Environment configuration with command-line overrides applied
    pub fn config(&self) -> FinderConfig {
        let mut config = FinderConfig::from_env();
        if let Some(max) = self.max_results {
            config.result_budget = max;
        }
        if let Some(concurrency) = self.concurrency {
            config.max_concurrent_fetches = concurrency;
        }
        if let Some(timeout) = self.timeout {
            config.request_timeout_secs = timeout;
        }
        config
    }

    pub fn format(&self) -> ExportFormat {
        if self.json {
            ExportFormat::Json
        } else {
            ExportFormat::Csv
        }
    }

    /// Path the rows are written to
    pub fn output_path(&self, now: DateTime<Local>) -> PathBuf {
        self.out
            .clone()
            .unwrap_or_else(|| default_output_path(&self.query, now, self.format()))
    }
}

/// File format of the exported rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

/// Execute a run end to end
pub async fn execute(cli: Cli) -> Result<()> {
    let config = cli.config();
    let pipeline = ExtractionPipeline::new(config).context("Failed to set up pipeline")?;

    info!("Searching for career pages: {}", cli.query);
    let results = pipeline.run_default(&cli.query).await;

    if !cli.quiet {
        print_summary(&results);
    }

    let path = cli.output_path(Local::now());
    write_results(&results, &path, cli.format()).await?;
    println!("Saved {} rows to {}", results.len(), path.display());

    Ok(())
}

/// `careers_<query>_<YYYYmmdd_HHMMSS>.<ext>`, with the query made filename-safe
pub fn default_output_path(query: &str, now: DateTime<Local>, format: ExportFormat) -> PathBuf {
    let slug: String = query
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect();
    let slug = if slug.is_empty() { "query".to_string() } else { slug };

    PathBuf::from(format!(
        "careers_{}_{}.{}",
        slug,
        now.format("%Y%m%d_%H%M%S"),
        format.extension()
    ))
}

/// Write the export rows in rank order
pub async fn write_results(
    results: &ResultSet,
    path: &Path,
    format: ExportFormat,
) -> Result<()> {
    let bytes = match format {
        ExportFormat::Csv => rows_to_csv(results)?,
        ExportFormat::Json => serde_json::to_vec_pretty(&results.rows())?,
    };
    tokio::fs::write(path, bytes)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// CSV with a header row; emails stay `;`-joined in one column
fn rows_to_csv(results: &ResultSet) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in results.rows() {
        writer.serialize(row)?;
    }
    writer
        .into_inner()
        .map_err(|e| anyhow!("Failed to finish CSV output: {}", e.error()))
}

/// Render the summary table shown after a run
pub fn format_summary(results: &ResultSet) -> String {
    let mut out = format!(
        "\nQuery: {} | domains: {} | URLs tried: {} | pages: {} ({} job-like)\n",
        results.query,
        results.domains_discovered,
        results.urls_attempted,
        results.len(),
        results.job_like_count()
    );

    if results.is_empty() {
        out.push_str("No career or contact pages found.\n");
        return out;
    }

    out.push_str(&format!(
        "{:<4} {:<30} {:<45} {:<40} {}\n",
        "JOB", "DOMAIN", "URL", "TITLE", "EMAILS"
    ));
    for page in results.iter() {
        out.push_str(&format!(
            "{:<4} {:<30} {:<45} {:<40} {}\n",
            if page.is_job_like { "yes" } else { "-" },
            clip(&page.domain, 30),
            clip(&page.url, 45),
            clip(&page.title, 40),
            page.emails_joined()
        ));
    }
    out
}

fn print_summary(results: &ResultSet) {
    print!("{}", format_summary(results));
}

fn clip(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let mut clipped: String = text.chars().take(width.saturating_sub(1)).collect();
        clipped.push('…');
        clipped
    }
}
