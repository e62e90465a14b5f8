mod html;
mod radar;

pub use radar::{DEFAULT_TITLE, RadarChart};

use crate::Result;
use crate::record::{Metric, MetricRecord};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Plotly's default qualitative palette. Series colours cycle through it.
pub const PALETTE: [&str; 10] = [
    "#636EFA", "#EF553B", "#00CC96", "#AB63FA", "#FFA15A", "#19D3F3", "#FF6692", "#B6E880",
    "#FF97FF", "#FECB52",
];

/// Radial axis range used for display. Values outside are clamped.
pub const RADIAL_RANGE: (f64, f64) = (0.0, 100.0);

/// One closed trace on the radar chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarSeries {
    pub name: String,
    pub color: String,
    /// One value per [`Metric::ALL`] entry; `None` where no number could be extracted.
    pub values: Vec<Option<f64>>,
}

impl RadarSeries {
    /// Value plotted for an axis: unmatched values plot as 0, then clamped to the radial range.
    pub fn plotted(&self, axis: usize) -> f64 {
        self.values
            .get(axis)
            .copied()
            .flatten()
            .unwrap_or(0.0)
            .clamp(RADIAL_RANGE.0, RADIAL_RANGE.1)
    }
}

pub fn color_for(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

/// Turn records into chart series, keeping record order.
pub fn build_series(records: &[MetricRecord]) -> Vec<RadarSeries> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| RadarSeries {
            name: record.url.clone(),
            color: color_for(index).to_string(),
            values: Metric::ALL
                .iter()
                .map(|metric| record.numeric_value(*metric))
                .collect(),
        })
        .collect()
}

pub trait ChartRenderer {
    /// Write a chart document for `records` to `path`.
    ///
    /// Returns [`crate::Error::NoData`] without touching `path` when there
    /// is nothing to plot.
    fn render(&self, records: &[MetricRecord], path: &Path) -> Result<()>;
}
