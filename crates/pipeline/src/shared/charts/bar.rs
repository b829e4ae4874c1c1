use contracts::dashboards::d410_report_pipeline::HistogramBucket;
use contracts::shared::charts::{BarChartSpec, BarRect, Dimensions, Orientation};

use super::scale::{bar_length, scale_max, ticks, ScaleConfig};
use crate::shared::aggregation::safe_max;

/// One named series; `values[i]` belongs to category `i`, missing values are 0
#[derive(Debug, Clone, PartialEq)]
pub struct BarSeries {
    pub name: String,
    pub values: Vec<f64>,
}

impl BarSeries {
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    fn value_at(&self, index: usize) -> f64 {
        self.values
            .get(index)
            .copied()
            .filter(|v| v.is_finite())
            .unwrap_or(0.0)
    }
}

fn series_max(series: &[BarSeries]) -> f64 {
    series
        .iter()
        .map(|s| safe_max(&s.values, |v| *v))
        .fold(0.0, f64::max)
}

/// Width of one bar and the offset of the first bar inside its band
fn band_layout(band: f64, series_count: usize, gap_ratio: f64) -> (f64, f64) {
    let gap = band * gap_ratio.clamp(0.0, 0.9);
    let bar = (band - gap) / series_count.max(1) as f64;
    (bar, gap / 2.0)
}

/// Vertical bars, grouped side by side when there are several series
pub fn layout_bars(
    categories: &[String],
    series: &[BarSeries],
    dims: &Dimensions,
    config: &ScaleConfig,
) -> BarChartSpec {
    let plot = dims.plot_area();
    let max = scale_max(series_max(series));
    let mut bars = Vec::with_capacity(categories.len() * series.len());

    if !categories.is_empty() {
        let band = plot.width / categories.len() as f64;
        let (bar_width, offset) = band_layout(band, series.len(), config.band_gap_ratio);

        for category_index in 0..categories.len() {
            for (series_index, s) in series.iter().enumerate() {
                let value = s.value_at(category_index);
                let height = bar_length(value, max, plot.height, config.min_bar_height);
                bars.push(BarRect {
                    series_index,
                    category_index,
                    x: plot.x + category_index as f64 * band + offset + series_index as f64 * bar_width,
                    y: plot.bottom() - height,
                    width: bar_width,
                    height,
                    value,
                });
            }
        }
    }

    BarChartSpec {
        orientation: Orientation::Vertical,
        categories: categories.to_vec(),
        series_names: series.iter().map(|s| s.name.clone()).collect(),
        bars,
        ticks: ticks(max, config.tick_count, plot.bottom(), plot.y),
        scale_max: max,
    }
}

/// Horizontal bars (ranked lists such as top products). Categories run top
/// to bottom; bars grow rightwards from the left edge of the plot.
pub fn layout_horizontal_bars(
    categories: &[String],
    series: &BarSeries,
    dims: &Dimensions,
    config: &ScaleConfig,
) -> BarChartSpec {
    let plot = dims.plot_area();
    let max = scale_max(safe_max(&series.values, |v| *v));
    let mut bars = Vec::with_capacity(categories.len());

    if !categories.is_empty() {
        let band = plot.height / categories.len() as f64;
        let (thickness, offset) = band_layout(band, 1, config.band_gap_ratio);

        for category_index in 0..categories.len() {
            let value = series.value_at(category_index);
            let width = bar_length(value, max, plot.width, config.min_bar_height);
            bars.push(BarRect {
                series_index: 0,
                category_index,
                x: plot.x,
                y: plot.y + category_index as f64 * band + offset,
                width,
                height: thickness,
                value,
            });
        }
    }

    BarChartSpec {
        orientation: Orientation::Horizontal,
        categories: categories.to_vec(),
        series_names: vec![series.name.clone()],
        bars,
        ticks: ticks(max, config.tick_count, plot.x, plot.right()),
        scale_max: max,
    }
}

/// Histogram buckets as a single vertical series
pub fn layout_histogram(
    series_name: &str,
    buckets: &[HistogramBucket],
    dims: &Dimensions,
    config: &ScaleConfig,
) -> BarChartSpec {
    let categories: Vec<String> = buckets.iter().map(|b| b.range_label.clone()).collect();
    let counts = buckets.iter().map(|b| b.count as f64).collect();
    layout_bars(
        &categories,
        &[BarSeries::new(series_name, counts)],
        dims,
        config,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims() -> Dimensions {
        // plot area: x 10..110, y 10..210
        Dimensions::new(120.0, 220.0, 10.0)
    }

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_single_series_heights_proportional() {
        let spec = layout_bars(
            &labels(&["a", "b"]),
            &[BarSeries::new("revenue", vec![100.0, 50.0])],
            &dims(),
            &ScaleConfig::default(),
        );
        assert_eq!(spec.scale_max, 100.0);
        assert_eq!(spec.bars.len(), 2);
        assert_eq!(spec.bars[0].height, 200.0);
        assert_eq!(spec.bars[0].y, 10.0);
        assert_eq!(spec.bars[1].height, 100.0);
        assert_eq!(spec.bars[1].y, 110.0);
        // band 50, gap 10 → bars start 5 into their band
        assert_eq!(spec.bars[0].x, 15.0);
        assert_eq!(spec.bars[1].x, 65.0);
        assert_eq!(spec.bars[0].width, 40.0);
    }

    #[test]
    fn test_tiny_nonzero_value_stays_visible() {
        let spec = layout_bars(
            &labels(&["a", "b", "c"]),
            &[BarSeries::new("s", vec![1_000_000.0, 1.0, 0.0])],
            &dims(),
            &ScaleConfig::default(),
        );
        assert_eq!(spec.bars[1].height, 2.0);
        assert_eq!(spec.bars[2].height, 0.0);
    }

    #[test]
    fn test_all_zero_uses_scale_floor() {
        let spec = layout_bars(
            &labels(&["a"]),
            &[BarSeries::new("s", vec![0.0])],
            &dims(),
            &ScaleConfig::default(),
        );
        assert_eq!(spec.scale_max, 1.0);
        assert!(spec.bars.iter().all(|b| b.height == 0.0 && b.y.is_finite()));
    }

    #[test]
    fn test_grouped_series_side_by_side() {
        let spec = layout_bars(
            &labels(&["Cao", "Thap"]),
            &[
                BarSeries::new("revenue", vec![10.0, 4.0]),
                BarSeries::new("orders", vec![2.0]),
            ],
            &dims(),
            &ScaleConfig::default(),
        );
        assert_eq!(spec.bars.len(), 4);
        assert_eq!(spec.series_names, vec!["revenue", "orders"]);
        let first = &spec.bars[0];
        let second = &spec.bars[1];
        assert_eq!(second.x - first.x, first.width);
        // missing value in the shorter series
        assert_eq!(spec.bars[3].value, 0.0);
    }

    #[test]
    fn test_horizontal_bars() {
        let spec = layout_horizontal_bars(
            &labels(&["x", "y"]),
            &BarSeries::new("units", vec![20.0, 5.0]),
            &dims(),
            &ScaleConfig::default(),
        );
        assert_eq!(spec.orientation, Orientation::Horizontal);
        assert_eq!(spec.bars[0].x, 10.0);
        assert_eq!(spec.bars[0].width, 100.0);
        assert_eq!(spec.bars[1].width, 25.0);
        assert!(spec.bars[1].y > spec.bars[0].y);
    }

    #[test]
    fn test_empty_categories() {
        let spec = layout_bars(&[], &[], &dims(), &ScaleConfig::default());
        assert!(spec.bars.is_empty());
        assert_eq!(spec.scale_max, 1.0);
    }
}
