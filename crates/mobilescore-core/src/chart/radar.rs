use super::html::{Document, escape};
use super::{ChartRenderer, RADIAL_RANGE, RadarSeries, build_series};
use crate::record::{Metric, MetricRecord};
use crate::{Error, Result};
use serde::Serialize;
use std::f64::consts::PI;
use std::fs;
use std::path::Path;

pub const DEFAULT_TITLE: &str = "Website Performance Metrics";

const WIDTH: f64 = 760.0;
const HEIGHT: f64 = 620.0;
const RADIUS: f64 = 220.0;
const RING_STEPS: usize = 5;

#[derive(Serialize)]
struct ChartData<'a> {
    title: &'a str,
    axes: Vec<&'static str>,
    radial_range: [f64; 2],
    series: &'a [RadarSeries],
}

/// Polar comparison chart: one closed trace per record over the eight metric axes.
pub struct RadarChart {
    title: String,
}

impl RadarChart {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Build the full HTML document for the given series.
    pub fn to_html(&self, series: &[RadarSeries]) -> Result<String> {
        let data = ChartData {
            title: &self.title,
            axes: Metric::ALL.iter().map(|m| m.label()).collect(),
            radial_range: [RADIAL_RANGE.0, RADIAL_RANGE.1],
            series,
        };
        let data_json = serde_json::to_string(&data)?;
        let svg = self.svg(series);
        let legend = legend(series);
        let generated_at = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string();

        Ok(Document {
            title: &self.title,
            svg: &svg,
            legend: &legend,
            data_json: &data_json,
            generated_at: &generated_at,
        }
        .render())
    }

    fn svg(&self, series: &[RadarSeries]) -> String {
        let mut svg = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 {} {}\" role=\"img\" aria-label=\"{}\">\n",
            WIDTH,
            HEIGHT,
            escape(&self.title)
        );

        // Concentric rings with tick labels along the first axis
        for step in 1..=RING_STEPS {
            let fraction = step as f64 / RING_STEPS as f64;
            svg.push_str(&format!(
                "<circle class=\"grid\" cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\"/>\n",
                center().0,
                center().1,
                RADIUS * fraction
            ));
            let tick = RADIAL_RANGE.0 + (RADIAL_RANGE.1 - RADIAL_RANGE.0) * fraction;
            let (x, y) = point(0, RADIUS * fraction);
            svg.push_str(&format!(
                "<text class=\"tick-label\" x=\"{:.2}\" y=\"{:.2}\" dx=\"4\">{}</text>\n",
                x, y, tick
            ));
        }

        for (axis, metric) in Metric::ALL.iter().enumerate() {
            let (x, y) = point(axis, RADIUS);
            svg.push_str(&format!(
                "<line class=\"spoke\" x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\"/>\n",
                center().0,
                center().1,
                x,
                y
            ));

            let (lx, ly) = point(axis, RADIUS + 20.0);
            let anchor = match lx - center().0 {
                dx if dx > 1.0 => "start",
                dx if dx < -1.0 => "end",
                _ => "middle",
            };
            svg.push_str(&format!(
                "<text class=\"axis-label\" x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"{}\" dominant-baseline=\"middle\">{}</text>\n",
                lx,
                ly,
                anchor,
                escape(metric.label())
            ));
        }

        for (index, trace) in series.iter().enumerate() {
            svg.push_str(&trace_group(index, trace));
        }

        svg.push_str("</svg>\n");
        svg
    }
}

impl Default for RadarChart {
    fn default() -> Self {
        Self::new(DEFAULT_TITLE)
    }
}

impl ChartRenderer for RadarChart {
    fn render(&self, records: &[MetricRecord], path: &Path) -> Result<()> {
        if records.is_empty() {
            return Err(Error::NoData);
        }

        tracing::debug!(
            "Rendering radar chart with {} traces to {}",
            records.len(),
            path.display()
        );

        let series = build_series(records);
        let html = self.to_html(&series)?;
        fs::write(path, html)?;

        tracing::info!("Radar chart saved to {}", path.display());
        Ok(())
    }
}

fn center() -> (f64, f64) {
    (WIDTH / 2.0, HEIGHT / 2.0)
}

/// Angle for an axis: first axis points up, then clockwise.
fn angle(axis: usize) -> f64 {
    -PI / 2.0 + axis as f64 * 2.0 * PI / Metric::ALL.len() as f64
}

fn point(axis: usize, distance: f64) -> (f64, f64) {
    let (cx, cy) = center();
    let theta = angle(axis);
    (cx + distance * theta.cos(), cy + distance * theta.sin())
}

fn radius_for(value: f64) -> f64 {
    (value - RADIAL_RANGE.0) / (RADIAL_RANGE.1 - RADIAL_RANGE.0) * RADIUS
}

fn trace_group(index: usize, trace: &RadarSeries) -> String {
    let vertices: Vec<(f64, f64)> = (0..Metric::ALL.len())
        .map(|axis| point(axis, radius_for(trace.plotted(axis))))
        .collect();

    let points = vertices
        .iter()
        .map(|(x, y)| format!("{:.2},{:.2}", x, y))
        .collect::<Vec<_>>()
        .join(" ");

    let color = escape(&trace.color);
    let mut group = format!(
        "<g class=\"trace\" id=\"trace-{}\">\n<polygon points=\"{}\" fill=\"{}\" stroke=\"{}\"><title>{}</title></polygon>\n",
        index,
        points,
        color,
        color,
        escape(&trace.name)
    );

    for (axis, (x, y)) in vertices.iter().enumerate() {
        let value = match trace.values.get(axis).copied().flatten() {
            Some(v) => format!("{}", v),
            None => "n/a".to_string(),
        };
        group.push_str(&format!(
            "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"4\" fill=\"{}\"><title>{}\n{}: {}</title></circle>\n",
            x,
            y,
            color,
            escape(&trace.name),
            Metric::ALL[axis].label(),
            value
        ));
    }

    group.push_str("</g>\n");
    group
}

fn legend(series: &[RadarSeries]) -> String {
    let mut legend = String::from("<ul class=\"legend\">\n");
    for (index, trace) in series.iter().enumerate() {
        legend.push_str(&format!(
            "<li class=\"legend-item\" data-trace=\"{}\"><span class=\"swatch\" style=\"background:{}\"></span>{}</li>\n",
            index,
            escape(&trace.color),
            escape(&trace.name)
        ));
    }
    legend.push_str("</ul>\n");
    legend
}
