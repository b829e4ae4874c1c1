use contracts::shared::charts::{Dimensions, HeatmapCell, HeatmapSpec};

use crate::shared::aggregation::cohort_matrix::{CohortCellState, CohortMatrix};
use crate::shared::format::format_percent;

/// Column header for a month offset
pub fn month_offset_label(months_since: u32) -> String {
    format!("T{}", months_since)
}

/// Retention heatmap: one row per cohort, one column per month offset.
/// Cells without an observation keep `intensity: None` so they can be drawn
/// differently from an observed 0 %.
pub fn layout_cohort_heatmap(matrix: &CohortMatrix, dims: &Dimensions) -> HeatmapSpec {
    let plot = dims.plot_area();
    if matrix.is_empty() {
        return HeatmapSpec {
            row_labels: Vec::new(),
            column_labels: Vec::new(),
            cells: Vec::new(),
        };
    }

    let columns = matrix.max_months_since as usize + 1;
    let rows = matrix.cohort_keys.len();
    let cell_width = plot.width / columns as f64;
    let cell_height = plot.height / rows as f64;

    let cells = matrix
        .grid()
        .into_iter()
        .enumerate()
        .flat_map(|(row, states)| {
            states.into_iter().enumerate().map(move |(column, state)| {
                let (intensity, label) = match state {
                    CohortCellState::NoData => (None, None),
                    CohortCellState::Observed(cell) => {
                        let rate = cell.retention_rate_percent;
                        (
                            Some((rate / 100.0).clamp(0.0, 1.0)),
                            Some(format_percent(rate, 1)),
                        )
                    }
                };
                HeatmapCell {
                    row,
                    column,
                    x: plot.x + column as f64 * cell_width,
                    y: plot.y + row as f64 * cell_height,
                    width: cell_width,
                    height: cell_height,
                    intensity,
                    label,
                }
            })
        })
        .collect();

    HeatmapSpec {
        row_labels: matrix.cohort_keys.clone(),
        column_labels: (0..=matrix.max_months_since).map(month_offset_label).collect(),
        cells,
    }
}
