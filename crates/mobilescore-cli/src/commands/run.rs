use crate::config::{
    DEFAULT_CHART_PATH, DEFAULT_REPORT_PATH, DEFAULT_TIMEOUT_SECS, RunConfig, resolve_urls,
};
use crate::orchestrator::{Orchestrator, OutputStatus, RunSummary};
use crate::{OutputFormat, StrategyArg};
use anyhow::Result;
use clap::Args;
use mobilescore_client::{DEFAULT_ENDPOINT, RetryPolicy};
use mobilescore_core::chart::DEFAULT_TITLE;
use mobilescore_core::record::ScoreCategory;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// PageSpeed Insights API key
    #[arg(long, env = "PAGESPEED_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// URL to audit (repeatable). Defaults to the built-in site list
    #[arg(short, long = "url", value_name = "URL")]
    pub urls: Vec<String>,

    /// File with one URL per line ('#' starts a comment)
    #[arg(long, value_name = "FILE")]
    pub urls_file: Option<PathBuf>,

    /// Device strategy to emulate
    #[arg(long, value_enum, default_value = "mobile")]
    pub strategy: StrategyArg,

    /// Attempts per URL before giving up
    #[arg(long, default_value_t = RetryPolicy::DEFAULT_MAX_ATTEMPTS, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_attempts: u32,

    /// Seconds to wait between attempts
    #[arg(long, value_name = "SECS", default_value_t = RetryPolicy::DEFAULT_DELAY.as_secs())]
    pub retry_delay: u64,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// CSV report output path
    #[arg(long, value_name = "FILE", default_value = DEFAULT_REPORT_PATH)]
    pub csv: PathBuf,

    /// Radar chart HTML output path
    #[arg(long, value_name = "FILE", default_value = DEFAULT_CHART_PATH)]
    pub chart: PathBuf,

    /// Chart title
    #[arg(long, default_value = DEFAULT_TITLE)]
    pub title: String,

    /// PageSpeed Insights endpoint
    #[arg(long, env = "PAGESPEED_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: Url,
}

impl RunArgs {
    pub fn into_config(self) -> Result<RunConfig> {
        let urls = resolve_urls(&self.urls, self.urls_file.as_deref())?;

        let mut config = RunConfig::new(urls, self.api_key)?;
        config.strategy = self.strategy.into();
        config.retry = RetryPolicy::new(self.max_attempts, Duration::from_secs(self.retry_delay));
        config.timeout = Duration::from_secs(self.timeout);
        config.endpoint = self.endpoint;
        config.report_path = self.csv;
        config.chart_path = self.chart;
        config.chart_title = self.title;

        Ok(config)
    }
}

pub fn execute(args: RunArgs, format: OutputFormat) -> Result<()> {
    let config = args.into_config()?;

    tracing::info!(
        "Auditing {} URLs with the {} strategy",
        config.urls.len(),
        config.strategy.as_str()
    );

    // One URL at a time, so a single-threaded runtime is enough
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let orchestrator = Orchestrator::new(config)?;
    let summary = runtime.block_on(orchestrator.run());

    match format {
        OutputFormat::Json => output_json(&summary)?,
        OutputFormat::Table => output_table(&summary),
        OutputFormat::Pretty => output_pretty(&summary),
    }

    Ok(())
}

fn output_pretty(summary: &RunSummary) {
    use console::style;

    println!("\n{}", style("PageSpeed Report").bold().cyan());
    println!("{}", style("================").cyan());

    if !summary.records.is_empty() {
        println!("\n{}", style("Scores:").bold());
        for record in &summary.records {
            let score = format!("{:>5.1}", record.performance_score);
            let score = match record.category() {
                ScoreCategory::Good => style(score).green(),
                ScoreCategory::NeedsImprovement => style(score).yellow(),
                ScoreCategory::Poor => style(score).red(),
            };
            println!(
                "  {}  {}  {}",
                score,
                record.url,
                style(record.category().as_str()).dim()
            );
        }
    }

    if !summary.failures.is_empty() {
        println!("\n{}", style("Failed:").bold());
        for failure in &summary.failures {
            println!("  {}  {}", style(&failure.url).red(), style(&failure.error).dim());
        }
    }

    println!("\n{}", style("Outputs:").bold());
    print_output_status("Report", &summary.report);
    print_output_status("Chart", &summary.chart);

    println!(); // trailing newline
}

fn print_output_status(label: &str, status: &OutputStatus) {
    use console::style;

    match status {
        OutputStatus::Written { path } => {
            println!("  {:<7} {}", label, style(path.display()).green())
        }
        OutputStatus::Skipped { path, reason } => println!(
            "  {:<7} {} ({})",
            label,
            style(path.display()).yellow(),
            reason
        ),
        OutputStatus::Failed { path, error } => println!(
            "  {:<7} {} ({})",
            label,
            style(path.display()).red(),
            error
        ),
    }
}

fn output_json(summary: &RunSummary) -> Result<()> {
    let json = serde_json::to_string_pretty(summary)?;
    println!("{}", json);
    Ok(())
}

fn output_table(summary: &RunSummary) {
    println!("URL,Status,Performance Score,Category");
    for record in &summary.records {
        println!(
            "{},ok,{},{}",
            record.url,
            record.performance_score,
            record.category().as_str()
        );
    }
    for failure in &summary.failures {
        println!("{},failed,,", failure.url);
    }
}
