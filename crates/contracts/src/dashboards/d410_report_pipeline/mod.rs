pub mod filter;
pub mod kpi;
pub mod records;
pub mod state;

pub use filter::FilterState;
pub use kpi::{KpiSet, ProcedureTotals};
pub use records::*;
pub use state::{DashboardState, ReportSnapshot};
