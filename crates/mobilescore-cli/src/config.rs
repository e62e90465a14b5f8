use anyhow::{Context, Result, bail};
use mobilescore_client::{DEFAULT_ENDPOINT, RetryPolicy, Strategy};
use mobilescore_core::chart::DEFAULT_TITLE;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

pub const DEFAULT_REPORT_PATH: &str = "website_performance_metrics.csv";
pub const DEFAULT_CHART_PATH: &str = "radar_plot.html";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Sites audited when no URLs are given on the command line
pub const DEFAULT_URLS: [&str; 6] = [
    "https://hydroinc.com/centaur-iiot/",
    "https://kcftech.com/",
    "https://petasense.com",
    "https://www.nikola.tech/",
    "https://sensors.waites.net/condition-monitoring/",
    "https://www.i-alert.com/",
];

/// Everything one run needs, passed explicitly to the orchestrator.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub urls: Vec<String>,
    pub api_key: String,
    pub strategy: Strategy,
    pub retry: RetryPolicy,
    pub timeout: Duration,
    pub endpoint: Url,
    pub report_path: PathBuf,
    pub chart_path: PathBuf,
    pub chart_title: String,
}

impl RunConfig {
    /// Config with default strategy, retry policy and output paths.
    pub fn new(urls: Vec<String>, api_key: impl Into<String>) -> Result<Self> {
        Ok(Self {
            urls,
            api_key: api_key.into(),
            strategy: Strategy::default(),
            retry: RetryPolicy::default(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            endpoint: Url::parse(DEFAULT_ENDPOINT)?,
            report_path: PathBuf::from(DEFAULT_REPORT_PATH),
            chart_path: PathBuf::from(DEFAULT_CHART_PATH),
            chart_title: DEFAULT_TITLE.to_string(),
        })
    }
}

/// Build the URL list: `--url` values first, then the URL file, duplicates dropped.
///
/// Falls back to [`DEFAULT_URLS`] when neither source is given. Every entry
/// must be an absolute http(s) URL.
pub fn resolve_urls(urls: &[String], urls_file: Option<&Path>) -> Result<Vec<String>> {
    let mut candidates: Vec<String> = urls.iter().map(|u| u.trim().to_string()).collect();

    if let Some(path) = urls_file {
        candidates.extend(read_urls_file(path)?);
    }

    if urls.is_empty() && urls_file.is_none() {
        tracing::debug!("No URLs given, using the built-in list");
        candidates = DEFAULT_URLS.iter().map(|u| u.to_string()).collect();
    }

    let mut seen = HashSet::new();
    let mut resolved = Vec::new();
    for candidate in candidates {
        validate_url(&candidate)?;
        if seen.insert(candidate.clone()) {
            resolved.push(candidate);
        } else {
            tracing::debug!("Skipping duplicate URL: {}", candidate);
        }
    }

    if resolved.is_empty() {
        bail!("No URLs to audit");
    }

    Ok(resolved)
}

/// One URL per line; blank lines and `#` comments are ignored.
fn read_urls_file(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read URL list: {}", path.display()))?;

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}

fn validate_url(candidate: &str) -> Result<()> {
    let parsed =
        Url::parse(candidate).with_context(|| format!("Invalid URL: {}", candidate))?;

    match parsed.scheme() {
        "http" | "https" => Ok(()),
        scheme => bail!("Unsupported URL scheme '{}' in {}", scheme, candidate),
    }
}
