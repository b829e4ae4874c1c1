pub mod compute;
pub mod metadata;
pub mod registry;

pub use compute::IndicatorContext;
pub use metadata::{build_catalog, indicator_set};
pub use registry::IndicatorRegistry;
