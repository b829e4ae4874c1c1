use contracts::shared::charts::AxisTick;

use crate::shared::format::format_compact;

/// Smallest value-axis top. Keeps an all-zero domain from dividing by zero.
pub const MIN_SCALE_MAX: f64 = 1.0;

/// Layout knobs shared by the chart builders
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleConfig {
    /// Nonzero values never render shorter than this
    pub min_bar_height: f64,
    pub tick_count: usize,
    /// Fraction of each category band left empty between groups
    pub band_gap_ratio: f64,
    /// Emit the closed area polygon under line charts
    pub fill_area: bool,
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self {
            min_bar_height: 2.0,
            tick_count: 5,
            band_gap_ratio: 0.2,
            fill_area: true,
        }
    }
}

/// Value-axis top for a data maximum
pub fn scale_max(max: f64) -> f64 {
    if max.is_finite() {
        max.max(MIN_SCALE_MAX)
    } else {
        MIN_SCALE_MAX
    }
}

/// Proportional length of `value` on an axis of `length`, clamped to the axis
pub fn scaled_length(value: f64, scale_max: f64, length: f64) -> f64 {
    if !value.is_finite() || value <= 0.0 || scale_max <= 0.0 {
        return 0.0;
    }
    (value / scale_max).min(1.0) * length
}

/// Bar length with the minimum visible height applied to nonzero values
pub fn bar_length(value: f64, scale_max: f64, length: f64, min_visible: f64) -> f64 {
    let scaled = scaled_length(value, scale_max, length);
    if scaled > 0.0 {
        scaled.max(min_visible).min(length)
    } else {
        0.0
    }
}

/// Map `value` from `[d0, d1]` onto `[r0, r1]`. A degenerate domain maps to
/// the middle of the range.
pub fn linear(value: f64, (d0, d1): (f64, f64), (r0, r1): (f64, f64)) -> f64 {
    let span = d1 - d0;
    if span.abs() < f64::EPSILON || !span.is_finite() {
        return r0 + (r1 - r0) / 2.0;
    }
    r0 + (value - d0) / span * (r1 - r0)
}

/// Evenly spaced ticks from 0 to `scale_max`. `start` is the canvas
/// coordinate of 0, `end` the coordinate of `scale_max`.
pub fn ticks(scale_max: f64, count: usize, start: f64, end: f64) -> Vec<AxisTick> {
    let count = count.max(1);
    (0..=count)
        .map(|i| {
            let t = i as f64 / count as f64;
            let value = scale_max * t;
            AxisTick {
                value,
                position: start + (end - start) * t,
                label: format_compact(value),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degenerate_max_uses_floor() {
        assert_eq!(scale_max(0.0), 1.0);
        assert_eq!(scale_max(-5.0), 1.0);
        assert_eq!(scale_max(f64::NAN), 1.0);
        assert_eq!(scale_max(250.0), 250.0);
    }

    #[test]
    fn test_bar_length_min_visible() {
        assert_eq!(bar_length(0.0, 100.0, 200.0, 2.0), 0.0);
        assert_eq!(bar_length(0.1, 100.0, 200.0, 2.0), 2.0);
        assert_eq!(bar_length(50.0, 100.0, 200.0, 2.0), 100.0);
        assert_eq!(bar_length(500.0, 100.0, 200.0, 2.0), 200.0);
        assert_eq!(bar_length(-3.0, 100.0, 200.0, 2.0), 0.0);
    }

    #[test]
    fn test_linear_degenerate_domain_centers() {
        assert_eq!(linear(5.0, (5.0, 5.0), (0.0, 100.0)), 50.0);
        assert_eq!(linear(7.5, (5.0, 10.0), (0.0, 100.0)), 50.0);
    }

    #[test]
    fn test_ticks() {
        let t = ticks(2_000_000.0, 4, 300.0, 100.0);
        assert_eq!(t.len(), 5);
        assert_eq!(t[0].position, 300.0);
        assert_eq!(t[4].position, 100.0);
        assert_eq!(t[2].label, "1tr");
        assert_eq!(t[1].label, "500k");
    }
}
