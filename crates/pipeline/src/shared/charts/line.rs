use chrono::NaiveDate;
use contracts::shared::charts::{Dimensions, LineChartSpec, Point};

use super::format_points;
use super::scale::{linear, scale_max, scaled_length, ticks, ScaleConfig};
use crate::shared::aggregation::{safe_max, safe_min};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimePoint {
    /// Seconds since the epoch
    pub timestamp: f64,
    pub value: f64,
}

/// Epoch seconds of a `YYYY-MM-DD` (optionally followed by a time part) date
pub fn timestamp_of(date: &str) -> Option<f64> {
    let day = date.trim().get(..10)?;
    let parsed = NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()?;
    Some(parsed.and_hms_opt(0, 0, 0)?.and_utc().timestamp() as f64)
}

fn build(xs: Vec<f64>, values: &[f64], dims: &Dimensions, config: &ScaleConfig) -> LineChartSpec {
    let plot = dims.plot_area();
    let max = scale_max(safe_max(values, |v| *v));

    let points: Vec<Point> = xs
        .into_iter()
        .zip(values)
        .map(|(x, v)| Point {
            x,
            y: plot.bottom() - scaled_length(*v, max, plot.height),
        })
        .collect();

    let area = match (config.fill_area, points.first(), points.last()) {
        (true, Some(first), Some(last)) => {
            let mut polygon = Vec::with_capacity(points.len() + 2);
            polygon.push(Point {
                x: first.x,
                y: plot.bottom(),
            });
            polygon.extend(points.iter().copied());
            polygon.push(Point {
                x: last.x,
                y: plot.bottom(),
            });
            Some(polygon)
        }
        _ => None,
    };

    LineChartSpec {
        polyline: format_points(&points),
        points,
        area,
        ticks: ticks(max, config.tick_count, plot.bottom(), plot.y),
        scale_max: max,
    }
}

/// Line over a time axis. Points are sorted by time; x is linear in the
/// timestamp, and a single point (or a single distinct instant) is centred.
pub fn layout_time_series(
    points: &[TimePoint],
    dims: &Dimensions,
    config: &ScaleConfig,
) -> LineChartSpec {
    let plot = dims.plot_area();
    let mut sorted: Vec<TimePoint> = points
        .iter()
        .copied()
        .filter(|p| p.timestamp.is_finite())
        .collect();
    sorted.sort_by(|a, b| a.timestamp.total_cmp(&b.timestamp));

    let domain = (
        safe_min(&sorted, |p| p.timestamp),
        safe_max(&sorted, |p| p.timestamp),
    );
    let xs = sorted
        .iter()
        .map(|p| linear(p.timestamp, domain, (plot.x, plot.right())))
        .collect();
    let values: Vec<f64> = sorted.iter().map(|p| p.value).collect();
    build(xs, &values, dims, config)
}

/// Line over evenly spaced categories, in input order. One category is centred.
pub fn layout_category_line(
    values: &[f64],
    dims: &Dimensions,
    config: &ScaleConfig,
) -> LineChartSpec {
    let plot = dims.plot_area();
    let last = values.len().saturating_sub(1) as f64;
    let xs = (0..values.len())
        .map(|i| linear(i as f64, (0.0, last), (plot.x, plot.right())))
        .collect();
    build(xs, values, dims, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims() -> Dimensions {
        // plot area: x 0..100, y 0..50
        Dimensions::new(100.0, 50.0, 0.0)
    }

    #[test]
    fn test_timestamp_of() {
        assert_eq!(timestamp_of("1970-01-02"), Some(86_400.0));
        assert_eq!(timestamp_of("1970-01-02T10:00:00"), Some(86_400.0));
        assert_eq!(timestamp_of("Cao"), None);
        assert_eq!(timestamp_of("2024-13-01"), None);
    }

    #[test]
    fn test_single_point_is_centred() {
        let spec = layout_time_series(
            &[TimePoint {
                timestamp: 1_700_000_000.0,
                value: 10.0,
            }],
            &dims(),
            &ScaleConfig::default(),
        );
        assert_eq!(spec.points.len(), 1);
        assert_eq!(spec.points[0].x, 50.0);
        assert_eq!(spec.points[0].y, 0.0);
        assert!(spec.points[0].y.is_finite());
    }

    #[test]
    fn test_time_axis_is_linear_and_sorted() {
        let day = 86_400.0;
        let spec = layout_time_series(
            &[
                TimePoint { timestamp: 4.0 * day, value: 20.0 },
                TimePoint { timestamp: 0.0, value: 10.0 },
                TimePoint { timestamp: day, value: 0.0 },
            ],
            &dims(),
            &ScaleConfig::default(),
        );
        let xs: Vec<f64> = spec.points.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![0.0, 25.0, 100.0]);
        assert_eq!(spec.points[0].y, 25.0);
        assert_eq!(spec.points[1].y, 50.0);
        assert_eq!(spec.polyline, "0.00,25.00 25.00,50.00 100.00,0.00");
    }

    #[test]
    fn test_area_polygon_closes_on_baseline() {
        let spec = layout_category_line(&[1.0, 2.0], &dims(), &ScaleConfig::default());
        let area = spec.area.expect("area requested by default");
        assert_eq!(area.len(), 4);
        assert_eq!(area[0], Point { x: 0.0, y: 50.0 });
        assert_eq!(area[3], Point { x: 100.0, y: 50.0 });

        let no_area = layout_category_line(
            &[1.0],
            &dims(),
            &ScaleConfig {
                fill_area: false,
                ..ScaleConfig::default()
            },
        );
        assert!(no_area.area.is_none());
        assert_eq!(no_area.points[0].x, 50.0);
    }

    #[test]
    fn test_empty_series() {
        let spec = layout_time_series(&[], &dims(), &ScaleConfig::default());
        assert!(spec.points.is_empty());
        assert!(spec.area.is_none());
        assert_eq!(spec.polyline, "");
        assert_eq!(spec.scale_max, 1.0);
    }
}
