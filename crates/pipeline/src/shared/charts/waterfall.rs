use contracts::shared::charts::{
    Dimensions, Rect, WaterfallBar, WaterfallCategory, WaterfallChartSpec, WaterfallStep,
};

use super::scale::{bar_length, scale_max, scaled_length, ticks, ScaleConfig};

/// Totals stand on the baseline; a decrease hangs down from the running
/// total by its own value. Every bar is sized by its step's value.
///
/// A decrease with no total before it, or one larger than the running total,
/// is anchored on the baseline instead, so its bar still shows its full value.
pub fn layout_waterfall(
    steps: &[WaterfallStep],
    dims: &Dimensions,
    config: &ScaleConfig,
) -> WaterfallChartSpec {
    let plot = dims.plot_area();

    // (bottom, top) of each bar in value space
    let mut running: Option<f64> = None;
    let spans: Vec<(f64, f64)> = steps
        .iter()
        .map(|step| match step.category {
            WaterfallCategory::Total => {
                running = Some(step.value);
                (0.0, step.value)
            }
            WaterfallCategory::Decrease => {
                let top = match running {
                    Some(total) if total >= step.value => total,
                    _ => step.value,
                };
                let bottom = top - step.value;
                running = Some(bottom);
                (bottom, top)
            }
        })
        .collect();
    let max = scale_max(spans.iter().map(|(_, top)| *top).fold(0.0, f64::max));

    let mut bars = Vec::with_capacity(steps.len());
    if !steps.is_empty() {
        let band = plot.width / steps.len() as f64;
        let gap = band * config.band_gap_ratio.clamp(0.0, 0.9);

        for (i, (step, (_, high))) in steps.iter().zip(&spans).enumerate() {
            let top_y = plot.bottom() - scaled_length(*high, max, plot.height);
            let height = bar_length(step.value, max, plot.height, config.min_bar_height);
            bars.push(WaterfallBar {
                step: step.clone(),
                rect: Rect {
                    x: plot.x + i as f64 * band + gap / 2.0,
                    y: top_y,
                    width: band - gap,
                    height,
                },
            });
        }
    }

    WaterfallChartSpec {
        bars,
        ticks: ticks(max, config.tick_count, plot.bottom(), plot.y),
        scale_max: max,
    }
}
