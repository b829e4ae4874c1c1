pub mod endpoints;
pub mod fetch;
pub mod orchestrator;
pub mod service;

pub use orchestrator::{CycleOutcome, PipelineError, ReportPipeline};
