use crate::{Error, Result};
use mobilescore_core::record::{Metric, MetricRecord};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The subset of a PageSpeed Insights `runPagespeed` response that we read.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSpeedResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub lighthouse_result: Option<LighthouseResult>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LighthouseResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Categories>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub audits: Option<HashMap<String, Audit>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Categories {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub performance: Option<Category>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Category {
    /// 0.0-1.0; null when Lighthouse could not score the page
    pub score: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Audit {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_value: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub numeric_value: Option<f64>,
}

impl PageSpeedResponse {
    /// Parse a response body. A body that is not JSON is malformed, not transient.
    pub fn parse(url: &str, body: &str) -> Result<Self> {
        serde_json::from_str(body).map_err(|e| Error::MalformedResponse {
            url: url.to_string(),
            reason: format!("invalid JSON body: {}", e),
        })
    }

    /// Map the response to a fully populated record for `url`.
    pub fn into_record(self, url: &str) -> Result<MetricRecord> {
        let malformed = |reason: String| Error::MalformedResponse {
            url: url.to_string(),
            reason,
        };

        let lighthouse = self
            .lighthouse_result
            .ok_or_else(|| malformed("missing lighthouseResult".to_string()))?;

        let score = lighthouse
            .categories
            .and_then(|c| c.performance)
            .and_then(|p| p.score)
            .ok_or_else(|| {
                malformed("missing lighthouseResult.categories.performance.score".to_string())
            })?;

        if !(0.0..=1.0).contains(&score) {
            return Err(malformed(format!(
                "performance score {} outside 0.0-1.0",
                score
            )));
        }

        let audits = lighthouse.audits.unwrap_or_default();

        MetricRecord::from_audits(url, to_percent(score), |metric| {
            metric
                .audit_id()
                .and_then(|id| audits.get(id))
                .and_then(|audit| audit.display_value.clone())
        })
        .map_err(|metric: Metric| {
            malformed(format!(
                "missing lighthouseResult.audits.{}.displayValue",
                metric.audit_id().unwrap_or("?")
            ))
        })
    }
}

/// Scale a 0-1 score to 0-100, dropping float noise past two decimals.
fn to_percent(score: f64) -> f64 {
    (score * 10_000.0).round() / 100.0
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use serde_json::{Value, json};

    /// A trimmed-down but structurally faithful `runPagespeed` body.
    pub(crate) fn sample_body(score: f64) -> Value {
        json!({
            "id": "https://example.com/",
            "lighthouseResult": {
                "categories": { "performance": { "id": "performance", "score": score } },
                "audits": {
                    "first-contentful-paint": { "displayValue": "1.8 s", "numericValue": 1812.5 },
                    "speed-index": { "displayValue": "3.4 s", "numericValue": 3390.1 },
                    "interactive": { "displayValue": "6.2 s", "numericValue": 6203.0 },
                    "total-blocking-time": { "displayValue": "1,230 ms", "numericValue": 1230.0 },
                    "largest-contentful-paint": { "displayValue": "4.1 s", "numericValue": 4100.2 },
                    "cumulative-layout-shift": { "displayValue": "0.052", "numericValue": 0.052 },
                    "server-response-time": { "displayValue": "Root document took 120 ms", "numericValue": 120.0 }
                }
            }
        })
    }

    #[test]
    fn test_into_record_maps_every_field() {
        let body = sample_body(0.87).to_string();

        let record = PageSpeedResponse::parse("https://example.com/", &body)
            .unwrap()
            .into_record("https://example.com/")
            .unwrap();

        assert_eq!(record.url, "https://example.com/");
        assert_eq!(record.performance_score, 87.0);
        assert!(record.score_explanation.starts_with("Needs Improvement"));
        assert_eq!(record.first_contentful_paint, "1.8 s");
        assert_eq!(record.speed_index, "3.4 s");
        assert_eq!(record.time_to_interactive, "6.2 s");
        assert_eq!(record.total_blocking_time, "1,230 ms");
        assert_eq!(record.largest_contentful_paint, "4.1 s");
        assert_eq!(record.cumulative_layout_shift, "0.052");
        assert_eq!(record.server_response_time, "Root document took 120 ms");
    }

    #[test]
    fn test_score_scaling_drops_float_noise() {
        assert_eq!(to_percent(0.29), 29.0);
        assert_eq!(to_percent(0.9), 90.0);
        assert_eq!(to_percent(1.0), 100.0);
    }

    #[test]
    fn test_missing_audit_is_malformed() {
        let mut body = sample_body(0.95);
        body["lighthouseResult"]["audits"]
            .as_object_mut()
            .unwrap()
            .remove("speed-index");

        let result = PageSpeedResponse::parse("https://example.com/", &body.to_string())
            .unwrap()
            .into_record("https://example.com/");

        match result {
            Err(Error::MalformedResponse { reason, .. }) => assert!(reason.contains("speed-index")),
            other => panic!("Expected MalformedResponse, got {:?}", other),
        }
    }

    #[test]
    fn test_null_score_is_malformed() {
        let mut body = sample_body(0.5);
        body["lighthouseResult"]["categories"]["performance"]["score"] = Value::Null;

        let result = PageSpeedResponse::parse("u", &body.to_string())
            .unwrap()
            .into_record("u");

        assert!(matches!(result, Err(Error::MalformedResponse { .. })));
    }

    #[test]
    fn test_out_of_range_score_is_malformed() {
        let result = PageSpeedResponse::parse("u", &sample_body(1.5).to_string())
            .unwrap()
            .into_record("u");

        assert!(matches!(result, Err(Error::MalformedResponse { .. })));
    }

    #[test]
    fn test_missing_lighthouse_result_is_malformed() {
        let result = PageSpeedResponse::parse("u", r#"{"id":"u"}"#)
            .unwrap()
            .into_record("u");

        match result {
            Err(Error::MalformedResponse { reason, .. }) => {
                assert_eq!(reason, "missing lighthouseResult")
            }
            other => panic!("Expected MalformedResponse, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_json_is_malformed() {
        let result = PageSpeedResponse::parse("u", "<html>not json</html>");

        assert!(matches!(result, Err(Error::MalformedResponse { .. })));
    }
}
