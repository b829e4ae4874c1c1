pub mod cohort_matrix;
pub mod histogram;
pub mod kpi;
pub mod numeric;
pub mod waterfall;

pub use kpi::aggregate;
pub use numeric::{percentage_shares, safe_average, safe_max, safe_min, safe_sum};
