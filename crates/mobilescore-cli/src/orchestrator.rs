use crate::config::RunConfig;
use anyhow::Result;
use mobilescore_client::{HttpTransport, PageSpeedClient, Transport};
use mobilescore_core::Error as CoreError;
use mobilescore_core::chart::{ChartRenderer, RadarChart};
use mobilescore_core::record::{MetricRecord, ResultSet};
use mobilescore_core::report::ReportWriter;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// A URL that produced no record, with the reason.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailedUrl {
    pub url: String,
    pub error: String,
}

/// What happened to one output file
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OutputStatus {
    Written { path: PathBuf },
    Skipped { path: PathBuf, reason: String },
    Failed { path: PathBuf, error: String },
}

impl OutputStatus {
    pub fn path(&self) -> &Path {
        match self {
            OutputStatus::Written { path }
            | OutputStatus::Skipped { path, .. }
            | OutputStatus::Failed { path, .. } => path,
        }
    }

    pub fn is_written(&self) -> bool {
        matches!(self, OutputStatus::Written { .. })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub started_at: String,
    pub finished_at: String,
    pub records: ResultSet,
    pub failures: Vec<FailedUrl>,
    pub report: OutputStatus,
    pub chart: OutputStatus,
}

/// Runs the fetch -> report -> chart pipeline over the configured URLs.
pub struct Orchestrator<T = HttpTransport> {
    config: RunConfig,
    client: PageSpeedClient<T>,
    chart: RadarChart,
}

impl Orchestrator<HttpTransport> {
    pub fn new(config: RunConfig) -> Result<Self> {
        let transport = HttpTransport::new(config.timeout)?;
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: Transport> Orchestrator<T> {
    pub fn with_transport(config: RunConfig, transport: T) -> Self {
        let client = PageSpeedClient::with_transport(transport, config.api_key.clone())
            .endpoint(config.endpoint.clone())
            .strategy(config.strategy)
            .retry_policy(config.retry);
        let chart = RadarChart::new(config.chart_title.clone());

        Self {
            config,
            client,
            chart,
        }
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Audit every URL in order, then write the report and the chart.
    ///
    /// Per-URL failures and output failures are logged and recorded in the
    /// summary; none of them stops the run.
    pub async fn run(&self) -> RunSummary {
        let started_at = chrono::Utc::now().to_rfc3339();
        let total = self.config.urls.len();
        let mut records = ResultSet::new();
        let mut failures = Vec::new();

        for (index, url) in self.config.urls.iter().enumerate() {
            tracing::info!("[{}/{}] Auditing {}", index + 1, total, url);

            match self.client.fetch(url).await {
                Ok(record) => records.push(record),
                Err(err) => {
                    tracing::warn!("Skipping {}: {}", url, err);
                    failures.push(FailedUrl {
                        url: url.clone(),
                        error: err.to_string(),
                    });
                }
            }
        }

        tracing::info!(
            "Collected metrics for {} of {} URLs",
            records.len(),
            total
        );

        let report = self.write_report(&records);
        let chart = self.render_chart(&records);

        RunSummary {
            started_at,
            finished_at: chrono::Utc::now().to_rfc3339(),
            records,
            failures,
            report,
            chart,
        }
    }

    fn write_report(&self, records: &[MetricRecord]) -> OutputStatus {
        let path = self.config.report_path.clone();

        match ReportWriter::to_file(records, &path) {
            Ok(()) => {
                tracing::info!("Metrics saved to {}", path.display());
                OutputStatus::Written { path }
            }
            Err(err) => {
                tracing::error!("Could not write report {}: {}", path.display(), err);
                OutputStatus::Failed {
                    path,
                    error: err.to_string(),
                }
            }
        }
    }

    fn render_chart(&self, records: &[MetricRecord]) -> OutputStatus {
        let path = self.config.chart_path.clone();

        match self.chart.render(records, &path) {
            Ok(()) => {
                tracing::info!("Plot saved to {}", path.display());
                OutputStatus::Written { path }
            }
            Err(CoreError::NoData) => {
                tracing::warn!("No metrics collected; skipping radar chart");
                OutputStatus::Skipped {
                    path,
                    reason: CoreError::NoData.to_string(),
                }
            }
            Err(err) => {
                tracing::error!("Could not render chart {}: {}", path.display(), err);
                OutputStatus::Failed {
                    path,
                    error: err.to_string(),
                }
            }
        }
    }
}
