use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

use super::{DataSource, DataSourceError};
use crate::shared::config::DataSourceConfig;

/// HTTP client for the reporting backend
pub struct HttpDataSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpDataSource {
    pub fn new(config: &DataSourceConfig) -> Result<Self, DataSourceError> {
        let mut builder = reqwest::Client::builder();
        // The pipeline itself imposes no deadline; a transport timeout is opt-in
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| DataSourceError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn read_json(
        &self,
        path: &str,
        response: reqwest::Response,
    ) -> Result<Value, DataSourceError> {
        let status = response.status();
        if !status.is_success() {
            return Err(DataSourceError::Status {
                status: status.as_u16(),
                path: path.to_string(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| DataSourceError::Network(e.to_string()))?;

        // Some legacy procedures answer 200 with an empty body when nothing matched
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&body).map_err(|e| DataSourceError::InvalidBody {
            path: path.to_string(),
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl DataSource for HttpDataSource {
    async fn get(&self, path: &str, query: &[(String, String)]) -> Result<Value, DataSourceError> {
        tracing::debug!("GET {}", path);
        let response = self
            .client
            .get(self.url(path))
            .query(query)
            .send()
            .await
            .map_err(|e| DataSourceError::Network(e.to_string()))?;
        self.read_json(path, response).await
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value, DataSourceError> {
        tracing::debug!("POST {}", path);
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| DataSourceError::Network(e.to_string()))?;
        self.read_json(path, response).await
    }
}
