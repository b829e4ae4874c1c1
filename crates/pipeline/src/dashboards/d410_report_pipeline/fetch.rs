use contracts::dashboards::d410_report_pipeline::FilterState;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::task::JoinSet;

use super::endpoints::{EndpointKey, EndpointSpec};
use crate::shared::data_source::{DataSource, DataSourceError, RawPayload};

/// Which route (if any) answered for an endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchRoute {
    Primary,
    Legacy,
    Unavailable,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EndpointResult {
    pub key: EndpointKey,
    pub route: FetchRoute,
    pub payload: RawPayload,
}

/// Results of one fan-out
#[derive(Debug, Clone, Default)]
pub struct FetchBatch {
    pub payloads: HashMap<EndpointKey, RawPayload>,
    pub routes: HashMap<EndpointKey, FetchRoute>,
    pub requested: usize,
}

impl FetchBatch {
    pub fn payload(&self, key: EndpointKey) -> &RawPayload {
        static EMPTY: RawPayload = RawPayload::Empty;
        self.payloads.get(&key).unwrap_or(&EMPTY)
    }

    pub fn unavailable(&self) -> usize {
        self.requested
            - self
                .routes
                .values()
                .filter(|r| **r != FetchRoute::Unavailable)
                .count()
    }

    /// Every requested endpoint exhausted both routes
    pub fn all_failed(&self) -> bool {
        self.requested > 0 && self.unavailable() == self.requested
    }
}

/// `{success: false, ...}` is an application-level failure even with HTTP 200
fn check_envelope(value: Value) -> Result<Value, String> {
    match value.get("success").and_then(Value::as_bool) {
        Some(false) => {
            let message = value
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("success: false")
                .to_string();
            Err(message)
        }
        _ => Ok(value),
    }
}

async fn call(
    source: &dyn DataSource,
    route: FetchRoute,
    spec: &EndpointSpec,
    filter: &FilterState,
) -> Result<Value, String> {
    let result: Result<Value, DataSourceError> = match route {
        FetchRoute::Primary => source.get(spec.primary, &filter.query_params()).await,
        _ => source.post(spec.legacy, &filter.legacy_body()).await,
    };
    result.map_err(|e| e.to_string()).and_then(check_envelope)
}

/// Primary route, then exactly one legacy attempt, then empty. Never fails.
pub async fn fetch_endpoint(
    source: &dyn DataSource,
    spec: EndpointSpec,
    filter: &FilterState,
) -> EndpointResult {
    let primary_error = match call(source, FetchRoute::Primary, &spec, filter).await {
        Ok(value) => {
            return EndpointResult {
                key: spec.key,
                route: FetchRoute::Primary,
                payload: RawPayload::from_response(value),
            }
        }
        Err(e) => e,
    };
    tracing::warn!(
        "{:?}: {} failed ({}), falling back to {}",
        spec.key,
        spec.primary,
        primary_error,
        spec.legacy
    );

    match call(source, FetchRoute::Legacy, &spec, filter).await {
        Ok(value) => EndpointResult {
            key: spec.key,
            route: FetchRoute::Legacy,
            payload: RawPayload::from_response(value),
        },
        Err(e) => {
            tracing::warn!("{:?}: legacy {} failed ({}), using empty data", spec.key, spec.legacy, e);
            EndpointResult {
                key: spec.key,
                route: FetchRoute::Unavailable,
                payload: RawPayload::Empty,
            }
        }
    }
}

/// Fetch every endpoint concurrently and wait for all of them
pub async fn fetch_all(
    source: Arc<dyn DataSource>,
    specs: &[EndpointSpec],
    filter: &FilterState,
) -> FetchBatch {
    let mut set = JoinSet::new();
    for spec in specs.iter().copied() {
        let source = Arc::clone(&source);
        let filter = filter.clone();
        set.spawn(async move { fetch_endpoint(source.as_ref(), spec, &filter).await });
    }

    let mut batch = FetchBatch {
        requested: specs.len(),
        ..FetchBatch::default()
    };
    while let Some(joined) = set.join_next().await {
        match joined {
            Ok(result) => {
                batch.routes.insert(result.key, result.route);
                batch.payloads.insert(result.key, result.payload);
            }
            // A panicked task leaves its endpoint unaccounted for, i.e. unavailable
            Err(e) => tracing::error!("endpoint task failed: {}", e),
        }
    }
    batch
}
