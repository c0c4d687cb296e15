//! Lifecycle of the single live comparison request.
//!
//! `ComparisonEngine` owns the request state machine: it validates, issues
//! the fetch, enforces the deadline, and guarantees that a superseded
//! in-flight request can never overwrite a newer one.

use crate::client::PricingClient;
use crate::config::Config;
use crate::derive::{self, ChartPoint, ShareSlice};
use crate::error::EngineError;
use crate::models::{ComparisonRequest, ComparisonResult, InstanceCatalog};
use crate::provider::Provider;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// The visible request lifecycle. Exactly one variant is live at a time;
/// loading and error are never tracked as separate flags.
#[derive(Debug, Clone, Default)]
pub enum RequestState {
    #[default]
    Idle,
    Pending,
    Success(ComparisonResult),
    Failed(String),
}

impl RequestState {
    pub fn is_pending(&self) -> bool {
        matches!(self, RequestState::Pending)
    }

    pub fn result(&self) -> Option<&ComparisonResult> {
        match self {
            RequestState::Success(result) => Some(result),
            _ => None,
        }
    }

    pub fn failure_reason(&self) -> Option<&str> {
        match self {
            RequestState::Failed(reason) => Some(reason),
            _ => None,
        }
    }
}

/// Everything the engine exposes to a presentation layer: the current state
/// plus the derived series, recomputed from the stored payload.
#[derive(Debug, Clone)]
pub struct ComparisonView {
    pub state: RequestState,
    pub chart: Vec<ChartPoint>,
    pub shares: Vec<ShareSlice>,
    pub winner: Option<Provider>,
}

pub struct ComparisonEngine {
    client: PricingClient,
    deadline: Duration,
    state: RwLock<RequestState>,
    // Monotonic per-submit sequence; completions tagged with a stale
    // sequence are discarded.
    seq: AtomicU64,
}

impl ComparisonEngine {
    pub fn new(client: PricingClient, deadline: Duration) -> Self {
        Self {
            client,
            deadline,
            state: RwLock::new(RequestState::Idle),
            seq: AtomicU64::new(0),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, EngineError> {
        let client = PricingClient::new(&config.service)?;
        Ok(Self::new(
            client,
            Duration::from_secs(config.service.timeout_seconds),
        ))
    }

    pub async fn state(&self) -> RequestState {
        self.state.read().await.clone()
    }

    /// Submit a comparison request and drive it to a terminal state.
    ///
    /// A request failing local validation transitions straight to `Failed`
    /// without issuing a fetch. Otherwise the engine enters `Pending`,
    /// discarding any prior terminal value, and settles to `Success` or
    /// `Failed` when the fetch resolves or the deadline expires. A newer
    /// submit supersedes an in-flight one; the older completion is dropped.
    pub async fn submit(
        &self,
        request: &ComparisonRequest,
        catalog: Option<&InstanceCatalog>,
    ) -> RequestState {
        if let Err(e) = request.validate(catalog) {
            warn!(error = %e, "Rejected comparison request");
            let mut state = self.state.write().await;
            *state = RequestState::Failed(e.user_message());
            return state.clone();
        }

        let seq = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut state = self.state.write().await;
            *state = RequestState::Pending;
        }

        let outcome = tokio::time::timeout(self.deadline, self.client.compare(request)).await;

        let mut state = self.state.write().await;
        if self.seq.load(Ordering::SeqCst) != seq {
            debug!(seq, "Discarding superseded comparison response");
            return state.clone();
        }

        *state = match outcome {
            Ok(Ok(result)) => RequestState::Success(result),
            Ok(Err(e)) => {
                warn!(error = %e, "Comparison request failed");
                RequestState::Failed(e.user_message())
            }
            Err(_) => {
                warn!(
                    deadline_secs = self.deadline.as_secs(),
                    "Comparison request exceeded deadline"
                );
                RequestState::Failed(EngineError::Timeout.user_message())
            }
        };
        state.clone()
    }

    /// Snapshot the state together with the chart series, share series and
    /// winner derived from it. Non-success states carry empty series.
    pub async fn view(&self) -> ComparisonView {
        let state = self.state.read().await.clone();

        let (chart, shares, winner) = match &state {
            RequestState::Success(result) => (
                derive::chart_series(&result.results),
                derive::share_series(&result.results),
                derive::cheapest_provider(&result.results),
            ),
            _ => (Vec::new(), Vec::new(), None),
        };

        ComparisonView {
            state,
            chart,
            shares,
            winner,
        }
    }
}
