use super::extract::extract_number;
use super::score::ScoreCategory;
use serde::{Deserialize, Serialize};

/// Ordered list of successfully audited URLs, in input order.
pub type ResultSet = Vec<MetricRecord>;

/// A chartable dimension of a [`MetricRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    PerformanceScore,
    FirstContentfulPaint,
    SpeedIndex,
    TimeToInteractive,
    TotalBlockingTime,
    LargestContentfulPaint,
    CumulativeLayoutShift,
    ServerResponseTime,
}

impl Metric {
    /// All dimensions in radar-axis order.
    pub const ALL: [Metric; 8] = [
        Metric::PerformanceScore,
        Metric::FirstContentfulPaint,
        Metric::SpeedIndex,
        Metric::TimeToInteractive,
        Metric::TotalBlockingTime,
        Metric::LargestContentfulPaint,
        Metric::CumulativeLayoutShift,
        Metric::ServerResponseTime,
    ];

    /// The dimensions read from Lighthouse audit display values.
    pub const AUDITS: [Metric; 7] = [
        Metric::FirstContentfulPaint,
        Metric::SpeedIndex,
        Metric::TimeToInteractive,
        Metric::TotalBlockingTime,
        Metric::LargestContentfulPaint,
        Metric::CumulativeLayoutShift,
        Metric::ServerResponseTime,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Metric::PerformanceScore => "Performance Score",
            Metric::FirstContentfulPaint => "First Contentful Paint",
            Metric::SpeedIndex => "Speed Index",
            Metric::TimeToInteractive => "Time to Interactive",
            Metric::TotalBlockingTime => "Total Blocking Time",
            Metric::LargestContentfulPaint => "Largest Contentful Paint",
            Metric::CumulativeLayoutShift => "Cumulative Layout Shift",
            Metric::ServerResponseTime => "Server Response Time",
        }
    }

    /// Key of the matching entry under `lighthouseResult.audits`
    pub fn audit_id(&self) -> Option<&'static str> {
        match self {
            Metric::PerformanceScore => None,
            Metric::FirstContentfulPaint => Some("first-contentful-paint"),
            Metric::SpeedIndex => Some("speed-index"),
            Metric::TimeToInteractive => Some("interactive"),
            Metric::TotalBlockingTime => Some("total-blocking-time"),
            Metric::LargestContentfulPaint => Some("largest-contentful-paint"),
            Metric::CumulativeLayoutShift => Some("cumulative-layout-shift"),
            Metric::ServerResponseTime => Some("server-response-time"),
        }
    }
}

/// Metrics for one audited URL. Field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricRecord {
    #[serde(rename = "URL")]
    pub url: String,

    #[serde(rename = "Performance Score")]
    pub performance_score: f64,

    #[serde(rename = "Score Explanation")]
    pub score_explanation: String,

    #[serde(rename = "First Contentful Paint")]
    pub first_contentful_paint: String,

    #[serde(rename = "Speed Index")]
    pub speed_index: String,

    #[serde(rename = "Time to Interactive")]
    pub time_to_interactive: String,

    #[serde(rename = "Total Blocking Time")]
    pub total_blocking_time: String,

    #[serde(rename = "Largest Contentful Paint")]
    pub largest_contentful_paint: String,

    #[serde(rename = "Cumulative Layout Shift")]
    pub cumulative_layout_shift: String,

    #[serde(rename = "Server Response Time")]
    pub server_response_time: String,
}

impl MetricRecord {
    /// Build a fully populated record.
    ///
    /// `display_value` is asked for each of [`Metric::AUDITS`]; the first
    /// metric it has no value for is returned as the error, so a record is
    /// never created half-filled.
    pub fn from_audits<F>(
        url: impl Into<String>,
        performance_score: f64,
        mut display_value: F,
    ) -> std::result::Result<Self, Metric>
    where
        F: FnMut(Metric) -> Option<String>,
    {
        let mut take = |metric: Metric| display_value(metric).ok_or(metric);

        Ok(Self {
            url: url.into(),
            performance_score,
            score_explanation: ScoreCategory::classify(performance_score)
                .explanation()
                .to_string(),
            first_contentful_paint: take(Metric::FirstContentfulPaint)?,
            speed_index: take(Metric::SpeedIndex)?,
            time_to_interactive: take(Metric::TimeToInteractive)?,
            total_blocking_time: take(Metric::TotalBlockingTime)?,
            largest_contentful_paint: take(Metric::LargestContentfulPaint)?,
            cumulative_layout_shift: take(Metric::CumulativeLayoutShift)?,
            server_response_time: take(Metric::ServerResponseTime)?,
        })
    }

    pub fn category(&self) -> ScoreCategory {
        ScoreCategory::classify(self.performance_score)
    }

    /// The API's human-readable string; `None` for the performance score.
    pub fn display_value(&self, metric: Metric) -> Option<&str> {
        let value = match metric {
            Metric::PerformanceScore => return None,
            Metric::FirstContentfulPaint => &self.first_contentful_paint,
            Metric::SpeedIndex => &self.speed_index,
            Metric::TimeToInteractive => &self.time_to_interactive,
            Metric::TotalBlockingTime => &self.total_blocking_time,
            Metric::LargestContentfulPaint => &self.largest_contentful_paint,
            Metric::CumulativeLayoutShift => &self.cumulative_layout_shift,
            Metric::ServerResponseTime => &self.server_response_time,
        };
        Some(value.as_str())
    }

    /// Numeric value used for charting, or `None` when the display string has no number.
    pub fn numeric_value(&self, metric: Metric) -> Option<f64> {
        match self.display_value(metric) {
            Some(display) => extract_number(display),
            None => Some(self.performance_score),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_value(metric: Metric) -> Option<String> {
        let value = match metric {
            Metric::PerformanceScore => return None,
            Metric::FirstContentfulPaint => "1.2 s",
            Metric::SpeedIndex => "3.4 s",
            Metric::TimeToInteractive => "5.0 s",
            Metric::TotalBlockingTime => "250 ms",
            Metric::LargestContentfulPaint => "2.8 s",
            Metric::CumulativeLayoutShift => "0.05",
            Metric::ServerResponseTime => "Root document took 120 ms",
        };
        Some(value.to_string())
    }

    #[test]
    fn test_from_audits_populates_every_field() {
        let record = MetricRecord::from_audits("https://example.com/", 72.0, sample_value).unwrap();

        assert_eq!(record.url, "https://example.com/");
        assert_eq!(record.category(), ScoreCategory::NeedsImprovement);
        assert!(record.score_explanation.starts_with("Needs Improvement"));
        assert_eq!(record.speed_index, "3.4 s");
        assert_eq!(record.server_response_time, "Root document took 120 ms");
    }

    #[test]
    fn test_from_audits_reports_missing_metric() {
        let result = MetricRecord::from_audits("https://example.com/", 95.0, |metric| {
            if metric == Metric::SpeedIndex {
                None
            } else {
                sample_value(metric)
            }
        });

        assert_eq!(result.unwrap_err(), Metric::SpeedIndex);
    }

    #[test]
    fn test_numeric_values_in_axis_order() {
        let record = MetricRecord::from_audits("https://example.com/", 72.0, sample_value).unwrap();

        let values: Vec<Option<f64>> = Metric::ALL
            .iter()
            .map(|m| record.numeric_value(*m))
            .collect();

        assert_eq!(
            values,
            vec![
                Some(72.0),
                Some(1.2),
                Some(3.4),
                Some(5.0),
                Some(250.0),
                Some(2.8),
                Some(0.05),
                Some(120.0)
            ]
        );
    }

    #[test]
    fn test_audit_ids_cover_audit_metrics() {
        assert!(Metric::PerformanceScore.audit_id().is_none());
        for metric in Metric::AUDITS {
            assert!(metric.audit_id().is_some(), "{:?} has no audit id", metric);
        }
    }
}
