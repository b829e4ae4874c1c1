pub mod charts;
pub mod indicators;
