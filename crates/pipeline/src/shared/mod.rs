pub mod aggregation;
pub mod charts;
pub mod config;
pub mod data_source;
pub mod field_resolver;
pub mod format;
pub mod indicators;
pub mod logger;
pub mod normalizers;
