use contracts::dashboards::d410_report_pipeline::CohortObservation;
use serde::Serialize;
use std::collections::BTreeMap;

/// Widest month offset a matrix holds (20 years). Dense views allocate one
/// column per offset, so anything past this is rejected.
pub const MAX_MONTHS_SINCE: u32 = 240;

/// An observed retention cell
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CohortCell {
    pub cohort_key: String,
    pub months_since: u32,
    pub cohort_size: u64,
    pub retained_count: u64,
    pub retention_rate_percent: f64,
}

/// A matrix position. `NoData` means the cohort has no observation at that
/// offset (e.g. it has not reached that month yet); it is not a zero rate.
#[derive(Debug, Clone, PartialEq)]
pub enum CohortCellState<'a> {
    NoData,
    Observed(&'a CohortCell),
}

impl CohortCellState<'_> {
    pub fn is_no_data(&self) -> bool {
        matches!(self, CohortCellState::NoData)
    }

    pub fn rate(&self) -> Option<f64> {
        match self {
            CohortCellState::NoData => None,
            CohortCellState::Observed(cell) => Some(cell.retention_rate_percent),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CohortMatrix {
    /// Sorted lexicographically (period labels such as `YYYY-MM`)
    pub cohort_keys: Vec<String>,
    pub max_months_since: u32,
    /// Sparse cells: cohort → month offset → cell
    pub cells: BTreeMap<String, BTreeMap<u32, CohortCell>>,
}

impl CohortMatrix {
    pub fn is_empty(&self) -> bool {
        self.cohort_keys.is_empty()
    }

    pub fn cell(&self, cohort_key: &str, months_since: u32) -> CohortCellState<'_> {
        self.cells
            .get(cohort_key)
            .and_then(|row| row.get(&months_since))
            .map_or(CohortCellState::NoData, CohortCellState::Observed)
    }

    /// Dense view: one row per cohort, columns `0..=max_months_since`
    pub fn grid(&self) -> Vec<Vec<CohortCellState<'_>>> {
        self.cohort_keys
            .iter()
            .map(|key| {
                (0..=self.max_months_since)
                    .map(|m| self.cell(key, m))
                    .collect()
            })
            .collect()
    }

    /// Size of a cohort, taken from its earliest observation
    pub fn cohort_size(&self, cohort_key: &str) -> u64 {
        self.cells
            .get(cohort_key)
            .and_then(|row| row.values().next())
            .map_or(0, |cell| cell.cohort_size)
    }
}

/// Build the matrix. A duplicated (cohort, offset) pair keeps the last row;
/// offsets past `MAX_MONTHS_SINCE` are skipped.
pub fn build_matrix(rows: &[CohortObservation]) -> CohortMatrix {
    let mut cells: BTreeMap<String, BTreeMap<u32, CohortCell>> = BTreeMap::new();
    let mut max_months_since = 0;

    for row in rows {
        if row.months_since > MAX_MONTHS_SINCE {
            tracing::warn!(
                "cohort {}: month offset {} out of range, skipped",
                row.cohort_key,
                row.months_since
            );
            continue;
        }
        let rate = if row.rate.is_finite() { row.rate } else { 0.0 };
        max_months_since = max_months_since.max(row.months_since);
        cells.entry(row.cohort_key.clone()).or_default().insert(
            row.months_since,
            CohortCell {
                cohort_key: row.cohort_key.clone(),
                months_since: row.months_since,
                cohort_size: row.cohort_size,
                retained_count: row.retained,
                retention_rate_percent: rate,
            },
        );
    }

    CohortMatrix {
        // BTreeMap keys are already in lexicographic order
        cohort_keys: cells.keys().cloned().collect(),
        max_months_since,
        cells,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(key: &str, months: u32, retained: u64, rate: f64) -> CohortObservation {
        CohortObservation {
            cohort_key: key.to_string(),
            months_since: months,
            cohort_size: 100,
            retained,
            rate,
        }
    }

    #[test]
    fn test_missing_month_is_no_data_not_zero() {
        let matrix = build_matrix(&[
            obs("2024-01", 0, 100, 100.0),
            obs("2024-01", 1, 40, 40.0),
            obs("2023-12", 0, 100, 100.0),
            obs("2023-12", 1, 30, 30.0),
            obs("2023-12", 2, 0, 0.0),
        ]);

        assert_eq!(matrix.cohort_keys, vec!["2023-12", "2024-01"]);
        assert_eq!(matrix.max_months_since, 2);

        let unobserved = matrix.cell("2024-01", 2);
        assert!(unobserved.is_no_data());
        assert_eq!(unobserved.rate(), None);

        let observed_zero = matrix.cell("2023-12", 2);
        assert!(!observed_zero.is_no_data());
        assert_eq!(observed_zero.rate(), Some(0.0));
        assert_ne!(unobserved, observed_zero);
    }

    #[test]
    fn test_dense_grid_shape() {
        let matrix = build_matrix(&[obs("2024-02", 0, 10, 100.0), obs("2024-01", 3, 1, 10.0)]);
        let grid = matrix.grid();
        assert_eq!(grid.len(), 2);
        assert!(grid.iter().all(|row| row.len() == 4));
        assert!(grid[0][0].is_no_data());
        assert_eq!(grid[0][3].rate(), Some(10.0));
        assert_eq!(grid[1][0].rate(), Some(100.0));
        assert_eq!(matrix.cohort_size("2024-02"), 100);
        assert_eq!(matrix.cohort_size("missing"), 0);
    }

    #[test]
    fn test_far_offsets_keep_grid_bounded() {
        let matrix = build_matrix(&[
            obs("2024-01", 0, 100, 100.0),
            obs("2024-01", 2_000_000, 1, 1.0),
            obs("2024-02", u32::MAX, 1, 1.0),
        ]);
        assert_eq!(matrix.cohort_keys, vec!["2024-01"]);
        assert_eq!(matrix.max_months_since, 0);
        assert_eq!(matrix.grid(), vec![vec![matrix.cell("2024-01", 0)]]);

        let edge = build_matrix(&[obs("2024-01", MAX_MONTHS_SINCE, 1, 1.0)]);
        assert_eq!(edge.grid()[0].len(), MAX_MONTHS_SINCE as usize + 1);
    }

    #[test]
    fn test_empty_input() {
        let matrix = build_matrix(&[]);
        assert!(matrix.is_empty());
        assert!(matrix.grid().is_empty());
    }
}
