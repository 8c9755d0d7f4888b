//! Renderer-neutral heatmap description.
//!
//! Turns an [`Aggregation`] into plot-space geometry: one rectangle per
//! grid cell with its fill color and tooltip, band-centered axis ticks and
//! the color legend. Coordinates are relative to the inner plot area
//! (margins already removed); y grows downward.

use crate::config::{FillStatistic, HeatmapLayout, Margins};
use crate::models::{GridKey, ScaleDomain};
use crate::processors::{Aggregation, Sparkline, SparklinePaths};
use crate::scales::{BandScale, LinearScale, Rgb, SequentialColorScale};
use crate::utils::constants::{LEGEND_TICKS, LEGEND_WIDTH};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapCell {
    pub year: i32,
    pub month: u32,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Value of the configured fill statistic
    pub value: f64,
    pub fill: Rgb,
    pub tooltip: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sparkline: Option<SparklinePaths>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisTick {
    pub label: String,
    pub position: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendSwatch {
    pub x: f64,
    pub width: f64,
    pub value: f64,
    pub fill: Rgb,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapModel {
    pub width: f64,
    pub height: f64,
    pub margins: Margins,
    pub plot_width: f64,
    pub plot_height: f64,
    pub fill: FillStatistic,
    pub color_domain: (f64, f64),
    pub cells: Vec<HeatmapCell>,
    pub year_ticks: Vec<AxisTick>,
    pub month_ticks: Vec<AxisTick>,
    pub legend: Vec<LegendSwatch>,
    /// Whole-degree labels along the legend bar
    pub legend_ticks: Vec<AxisTick>,
}

impl HeatmapModel {
    /// `None` when the aggregation has no domain (nothing to draw).
    pub fn build(
        aggregation: &Aggregation,
        sparklines: Option<&BTreeMap<GridKey, Sparkline>>,
        layout: &HeatmapLayout,
    ) -> Option<Self> {
        let domain = aggregation.domain.as_ref()?;
        let plot_width = layout.inner_width();
        let plot_height = layout.inner_height();

        let x_scale = BandScale::new(domain.years.clone(), (0.0, plot_width), layout.padding);
        let y_scale = BandScale::new(domain.months.clone(), (0.0, plot_height), layout.padding);
        let color = SequentialColorScale::new(domain.temperature_range);

        let cells: Vec<HeatmapCell> = aggregation
            .cells()
            .filter_map(|summary| {
                let x = x_scale.position(&summary.year)?;
                let y = y_scale.position(&summary.month)?;
                let value = layout.fill.value_of(summary);
                let sparkline = sparklines
                    .and_then(|lines| lines.get(&summary.key()))
                    .map(|line| line.project(x_scale.bandwidth(), y_scale.bandwidth()));

                Some(HeatmapCell {
                    year: summary.year,
                    month: summary.month,
                    x,
                    y,
                    width: x_scale.bandwidth(),
                    height: y_scale.bandwidth(),
                    value,
                    fill: color.color(value),
                    tooltip: summary.tooltip(),
                    sparkline,
                })
            })
            .collect();

        debug!(cells = cells.len(), plot_width, plot_height, "Built heatmap cells");

        Some(Self {
            width: layout.width,
            height: layout.height,
            margins: layout.margins.clone(),
            plot_width,
            plot_height,
            fill: layout.fill,
            color_domain: domain.temperature_range,
            cells,
            year_ticks: year_ticks(domain, &x_scale),
            month_ticks: month_ticks(domain, &y_scale),
            legend: legend(&color, layout.legend_swatches),
            legend_ticks: legend_ticks(&color),
        })
    }

    pub fn cell(&self, year: i32, month: u32) -> Option<&HeatmapCell> {
        self.cells.iter().find(|c| c.year == year && c.month == month)
    }
}

fn year_ticks(domain: &ScaleDomain, scale: &BandScale<i32>) -> Vec<AxisTick> {
    domain
        .years
        .iter()
        .filter_map(|year| {
            scale.center(year).map(|position| AxisTick {
                label: year.to_string(),
                position,
            })
        })
        .collect()
}

fn month_ticks(domain: &ScaleDomain, scale: &BandScale<u32>) -> Vec<AxisTick> {
    domain
        .months
        .iter()
        .filter_map(|month| {
            let label = NaiveDate::from_ymd_opt(2000, month + 1, 1)?.format("%B").to_string();
            scale.center(month).map(|position| AxisTick { label, position })
        })
        .collect()
}

/// Evenly spaced swatches across the legend bar, each colored at the
/// temperature its left edge stands for.
fn legend(color: &SequentialColorScale, swatches: usize) -> Vec<LegendSwatch> {
    let axis = LinearScale::new(color.domain(), (0.0, LEGEND_WIDTH));
    let width = LEGEND_WIDTH / swatches.max(1) as f64;

    (0..swatches)
        .map(|i| {
            let x = i as f64 * width;
            let value = axis.invert(x);
            LegendSwatch {
                x,
                width,
                value,
                fill: color.color(value),
            }
        })
        .collect()
}

fn legend_ticks(color: &SequentialColorScale) -> Vec<AxisTick> {
    let axis = LinearScale::new(color.domain(), (0.0, LEGEND_WIDTH));
    axis.ticks(LEGEND_TICKS)
        .into_iter()
        .map(|value| AxisTick {
            label: format!("{value:.0}"),
            position: axis.scale(value),
        })
        .collect()
}
