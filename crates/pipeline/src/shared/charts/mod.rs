//! Pure chart geometry.
//!
//! Every builder maps normalized records plus canvas dimensions to the
//! renderer-agnostic specs in `contracts::shared::charts`. No builder reads
//! global state or emits non-finite coordinates.

pub mod bar;
pub mod bundle;
pub mod donut;
pub mod heatmap;
pub mod line;
pub mod scale;
pub mod waterfall;

use contracts::shared::charts::Point;

pub use bundle::build_bundle;
pub use scale::ScaleConfig;

/// Canvas coordinate as text, two decimals, no negative zero
pub fn coord(v: f64) -> String {
    let rounded = (v * 100.0).round() / 100.0;
    let rounded = if rounded == 0.0 || !rounded.is_finite() {
        0.0
    } else {
        rounded
    };
    format!("{:.2}", rounded)
}

/// Points in SVG `polyline` form: `x1,y1 x2,y2 ...`
pub fn format_points(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| format!("{},{}", coord(p.x), coord(p.y)))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coord_has_no_negative_zero() {
        assert_eq!(coord(-0.0001), "0.00");
        assert_eq!(coord(12.345678), "12.35");
        assert_eq!(coord(f64::NAN), "0.00");
    }

    #[test]
    fn test_format_points() {
        let points = [Point { x: 0.0, y: 1.5 }, Point { x: 10.0, y: 0.25 }];
        assert_eq!(format_points(&points), "0.00,1.50 10.00,0.25");
        assert_eq!(format_points(&[]), "");
    }
}
