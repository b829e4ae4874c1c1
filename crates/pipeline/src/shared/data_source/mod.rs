pub mod http;
pub mod payload;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

pub use http::HttpDataSource;
pub use payload::RawPayload;

/// Failures of a single data source call
#[derive(Debug, Error)]
pub enum DataSourceError {
    #[error("network error: {0}")]
    Network(String),

    #[error("HTTP {status} from {path}")]
    Status { status: u16, path: String },

    #[error("invalid response body from {path}: {reason}")]
    InvalidBody { path: String, reason: String },
}

/// Backend query API. Both methods may fail with an I/O error; the shape of
/// a successful response is not guaranteed (see [`RawPayload`]).
#[async_trait]
pub trait DataSource: Send + Sync {
    async fn get(&self, path: &str, query: &[(String, String)]) -> Result<Value, DataSourceError>;

    async fn post(&self, path: &str, body: &Value) -> Result<Value, DataSourceError>;
}
