use contracts::dashboards::d410_report_pipeline::{DashboardState, FilterState};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;

use super::endpoints::catalog;
use super::fetch::fetch_all;
use super::service::assemble;
use crate::shared::config::ChartConfig;
use crate::shared::data_source::DataSource;
use crate::shared::indicators::IndicatorRegistry;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Không thể tải dữ liệu báo cáo: cả {attempted} nguồn dữ liệu đều không phản hồi")]
    AllSourcesUnavailable { attempted: usize },
}

/// How a fetch cycle ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// New report published
    Settled,
    /// A newer filter arrived first; nothing was published
    Cancelled,
    /// Every endpoint failed; the error was published, the previous report kept
    Failed,
}

/// Fetches, normalizes and publishes reports for one dashboard view.
///
/// Every filter change starts a new cycle with a higher generation. A cycle
/// only writes its result if its generation is still the latest one, and
/// the check happens under the same lock as the write, so observers never
/// see a mix of two cycles.
pub struct ReportPipeline {
    source: Arc<dyn DataSource>,
    state: watch::Sender<DashboardState>,
    registry: IndicatorRegistry,
    charts: ChartConfig,
}

impl ReportPipeline {
    pub fn new(source: Arc<dyn DataSource>, charts: ChartConfig) -> Self {
        let (state, _) = watch::channel(DashboardState::default());
        Self {
            source,
            state,
            registry: IndicatorRegistry::new(),
            charts,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<DashboardState> {
        self.state.subscribe()
    }

    pub fn current(&self) -> DashboardState {
        self.state.borrow().clone()
    }

    fn is_current(&self, generation: u64) -> bool {
        self.state.borrow().generation == generation
    }

    /// Run one cycle for `filter`. Returns once the cycle is settled,
    /// superseded or failed.
    pub async fn on_filter_change(&self, filter: FilterState) -> CycleOutcome {
        let mut generation = 0;
        self.state.send_modify(|state| {
            state.generation += 1;
            generation = state.generation;
            state.filter = Some(filter.clone());
            state.loading = true;
            state.error = None;
        });

        let report_type = filter.report_type;
        let specs = catalog(report_type);
        tracing::info!(
            "report cycle {} started: {} {}..{}",
            generation,
            report_type,
            filter.start_date,
            filter.end_date
        );

        let batch = fetch_all(Arc::clone(&self.source), &specs, &filter).await;

        if !self.is_current(generation) {
            tracing::debug!("report cycle {} superseded, discarding results", generation);
            return CycleOutcome::Cancelled;
        }

        if batch.all_failed() {
            let error = PipelineError::AllSourcesUnavailable {
                attempted: batch.requested,
            };
            let committed = self.state.send_if_modified(|state| {
                if state.generation != generation {
                    return false;
                }
                state.loading = false;
                state.error = Some(error.to_string());
                true
            });
            return if committed {
                tracing::error!("report cycle {} failed: {}", generation, error);
                CycleOutcome::Failed
            } else {
                tracing::debug!("report cycle {} superseded, discarding error", generation);
                CycleOutcome::Cancelled
            };
        }

        let snapshot = assemble(report_type, &batch, &self.registry, &self.charts);

        let committed = self.state.send_if_modified(|state| {
            if state.generation != generation {
                return false;
            }
            state.report = Some(snapshot);
            state.report_filter = Some(filter);
            state.loading = false;
            state.error = None;
            true
        });

        if committed {
            tracing::info!(
                "report cycle {} settled ({} of {} endpoints unavailable)",
                generation,
                batch.unavailable(),
                batch.requested
            );
            CycleOutcome::Settled
        } else {
            tracing::debug!("report cycle {} superseded, discarding results", generation);
            CycleOutcome::Cancelled
        }
    }

    /// Re-run the latest filter, if any
    pub async fn refresh(&self) -> Option<CycleOutcome> {
        let filter = self.state.borrow().filter.clone()?;
        Some(self.on_filter_change(filter).await)
    }
}
