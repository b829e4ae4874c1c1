//! Renderer-agnostic chart geometry.
//!
//! Coordinates are in canvas units with the origin at the top-left corner,
//! y growing downwards (SVG convention). Angles are degrees measured
//! clockwise from the top of the circle.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Insets {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Insets {
    pub fn uniform(v: f64) -> Self {
        Self {
            top: v,
            right: v,
            bottom: v,
            left: v,
        }
    }
}

/// Canvas size and the padding reserved for axes and labels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
    pub padding: Insets,
}

impl Dimensions {
    pub fn new(width: f64, height: f64, padding: f64) -> Self {
        Self {
            width,
            height,
            padding: Insets::uniform(padding),
        }
    }

    /// Drawable area inside the padding. Never negative.
    pub fn plot_area(&self) -> Rect {
        Rect {
            x: self.padding.left,
            y: self.padding.top,
            width: (self.width - self.padding.left - self.padding.right).max(0.0),
            height: (self.height - self.padding.top - self.padding.bottom).max(0.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }
}

/// Value-axis tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisTick {
    pub value: f64,
    /// Canvas coordinate along the value axis
    pub position: f64,
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Vertical,
    Horizontal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BarRect {
    pub series_index: usize,
    pub category_index: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BarChartSpec {
    pub orientation: Orientation,
    pub categories: Vec<String>,
    pub series_names: Vec<String>,
    pub bars: Vec<BarRect>,
    pub ticks: Vec<AxisTick>,
    /// Top of the value axis after the degenerate-domain floor
    pub scale_max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineChartSpec {
    pub points: Vec<Point>,
    /// Closed polygon under the line, when requested
    pub area: Option<Vec<Point>>,
    /// `points` formatted for an SVG `polyline`
    pub polyline: String,
    pub ticks: Vec<AxisTick>,
    pub scale_max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonutSlice {
    pub label: String,
    pub percent: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub inner_radius: f64,
    pub outer_radius: f64,
    /// SVG path command for the slice
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonutChartSpec {
    pub center: Point,
    pub slices: Vec<DonutSlice>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapCell {
    pub row: usize,
    pub column: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// 0..=1 colour intensity, `None` for cells without an observation
    pub intensity: Option<f64>,
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapSpec {
    pub row_labels: Vec<String>,
    pub column_labels: Vec<String>,
    pub cells: Vec<HeatmapCell>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WaterfallKey {
    GrossRevenue,
    TotalDiscount,
    NetRevenue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaterfallCategory {
    Total,
    Decrease,
}

/// One step of the revenue waterfall; `value` is always a magnitude
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaterfallStep {
    pub key: WaterfallKey,
    pub label: String,
    pub value: f64,
    pub category: WaterfallCategory,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaterfallBar {
    pub step: WaterfallStep,
    pub rect: Rect,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaterfallChartSpec {
    pub bars: Vec<WaterfallBar>,
    pub ticks: Vec<AxisTick>,
    pub scale_max: f64,
}

/// All charts of one report; a chart is absent when its records are empty
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartBundle {
    pub revenue_trend: Option<LineChartSpec>,
    pub sales_high_low: Option<BarChartSpec>,
    pub top_products: Option<BarChartSpec>,
    pub customer_segments: Option<DonutChartSpec>,
    pub order_value_histogram: Option<BarChartSpec>,
    pub purchase_frequency: Option<BarChartSpec>,
    pub cohort_retention: Option<HeatmapSpec>,
    pub rfm_segments: Option<DonutChartSpec>,
    pub inventory_levels: Option<BarChartSpec>,
    pub campaign_performance: Option<BarChartSpec>,
    pub voucher_usage: Option<BarChartSpec>,
    pub revenue_waterfall: Option<WaterfallChartSpec>,
}
