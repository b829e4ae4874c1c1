use contracts::shared::charts::{DonutChartSpec, DonutSlice, Point};

use super::coord;
use crate::shared::aggregation::percentage_shares;

const FULL_TURN: f64 = 360.0;

/// Canvas point at `angle` degrees clockwise from the top of the circle
pub fn polar(center: Point, radius: f64, angle: f64) -> Point {
    let radians = (angle - 90.0).to_radians();
    Point {
        x: center.x + radius * radians.cos(),
        y: center.y + radius * radians.sin(),
    }
}

fn pt(p: Point) -> String {
    format!("{},{}", coord(p.x), coord(p.y))
}

/// Path for a slice spanning the whole circle: two half arcs, since a single
/// arc with equal endpoints draws nothing.
fn full_ring_path(center: Point, outer: f64, inner: f64) -> String {
    let ring = |r: f64, sweep: u8| {
        let top = polar(center, r, 0.0);
        let bottom = polar(center, r, 180.0);
        format!(
            "M{} A{r},{r} 0 1 {sweep} {} A{r},{r} 0 1 {sweep} {} Z",
            pt(top),
            pt(bottom),
            pt(top),
            r = coord(r),
            sweep = sweep,
        )
    };
    if inner > 0.0 {
        format!("{} {}", ring(outer, 1), ring(inner, 0))
    } else {
        ring(outer, 1)
    }
}

/// SVG path for one slice. `inner == 0` draws a pie wedge.
pub fn slice_path(center: Point, outer: f64, inner: f64, start: f64, end: f64) -> String {
    let sweep = end - start;
    if sweep >= FULL_TURN {
        return full_ring_path(center, outer, inner);
    }
    let large_arc = u8::from(sweep > 180.0);
    let outer_start = polar(center, outer, start);
    let outer_end = polar(center, outer, end);

    if inner > 0.0 {
        let inner_start = polar(center, inner, start);
        let inner_end = polar(center, inner, end);
        format!(
            "M{} A{o},{o} 0 {large} 1 {} L{} A{i},{i} 0 {large} 0 {} Z",
            pt(outer_start),
            pt(outer_end),
            pt(inner_end),
            pt(inner_start),
            o = coord(outer),
            i = coord(inner),
            large = large_arc,
        )
    } else {
        format!(
            "M{} L{} A{o},{o} 0 {large} 1 {} Z",
            pt(center),
            pt(outer_start),
            pt(outer_end),
            o = coord(outer),
            large = large_arc,
        )
    }
}

/// Lay out slices clockwise from the top. Non-positive and non-finite
/// shares are skipped; the remaining shares are normalised to 100 percent
/// and the last slice ends exactly at 360 degrees.
pub fn layout_donut(
    shares: &[(String, f64)],
    center: Point,
    outer_radius: f64,
    inner_radius: f64,
) -> DonutChartSpec {
    let visible: Vec<(&String, f64)> = shares
        .iter()
        .filter(|(_, v)| v.is_finite() && *v > 0.0)
        .map(|(label, v)| (label, *v))
        .collect();
    let values: Vec<f64> = visible.iter().map(|(_, v)| *v).collect();
    let percents = percentage_shares(&values);
    let inner_radius = inner_radius.clamp(0.0, outer_radius.max(0.0));

    let mut slices = Vec::with_capacity(visible.len());
    let mut cumulative = 0.0;
    let mut start = 0.0;
    for (i, ((label, _), percent)) in visible.iter().zip(percents).enumerate() {
        cumulative += percent;
        // Angles come from the running sum, so rounding never accumulates
        let end = if i + 1 == visible.len() {
            FULL_TURN
        } else {
            cumulative * FULL_TURN / 100.0
        };
        slices.push(DonutSlice {
            label: label.to_string(),
            percent,
            start_angle: start,
            end_angle: end,
            inner_radius,
            outer_radius,
            path: slice_path(center, outer_radius, inner_radius, start, end),
        });
        start = end;
    }

    DonutChartSpec { center, slices }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shares(values: &[f64]) -> Vec<(String, f64)> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| (format!("s{i}"), *v))
            .collect()
    }

    const CENTER: Point = Point { x: 100.0, y: 100.0 };

    #[test]
    fn test_angles_close_exactly() {
        let spec = layout_donut(&shares(&[50.0, 30.0, 20.0]), CENTER, 80.0, 48.0);
        let angles: Vec<(f64, f64)> = spec
            .slices
            .iter()
            .map(|s| (s.start_angle, s.end_angle))
            .collect();
        assert_eq!(angles, vec![(0.0, 180.0), (180.0, 288.0), (288.0, 360.0)]);
        assert_eq!(spec.slices[1].percent, 30.0);
    }

    #[test]
    fn test_awkward_shares_still_close() {
        let spec = layout_donut(&shares(&[1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0]), CENTER, 80.0, 0.0);
        assert_eq!(spec.slices.last().map(|s| s.end_angle), Some(360.0));
        for pair in spec.slices.windows(2) {
            assert_eq!(pair[0].end_angle, pair[1].start_angle);
        }
    }

    #[test]
    fn test_starts_at_top() {
        let top = polar(CENTER, 10.0, 0.0);
        assert!((top.x - 100.0).abs() < 1e-9);
        assert!((top.y - 90.0).abs() < 1e-9);
        let right = polar(CENTER, 10.0, 90.0);
        assert!((right.x - 110.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_full_slice_has_drawable_path() {
        let spec = layout_donut(&shares(&[0.0, 42.0]), CENTER, 80.0, 40.0);
        assert_eq!(spec.slices.len(), 1);
        assert_eq!(spec.slices[0].end_angle, 360.0);
        assert_eq!(spec.slices[0].percent, 100.0);
        // two arcs per ring
        assert_eq!(spec.slices[0].path.matches('A').count(), 4);
    }

    #[test]
    fn test_pie_and_donut_paths() {
        let pie = slice_path(CENTER, 50.0, 0.0, 0.0, 90.0);
        assert_eq!(pie, "M100.00,100.00 L100.00,50.00 A50.00,50.00 0 0 1 150.00,100.00 Z");
        let ring = slice_path(CENTER, 50.0, 25.0, 0.0, 270.0);
        assert!(ring.contains(" 0 1 1 "));
        assert!(ring.contains(" L"));
    }

    #[test]
    fn test_nothing_to_draw() {
        assert!(layout_donut(&shares(&[0.0, -1.0, f64::NAN]), CENTER, 80.0, 40.0)
            .slices
            .is_empty());
    }
}
