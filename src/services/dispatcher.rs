//! Dispatch sink - forwards fired decisions to the action executor
//!
//! The sink maps each decision's action key back to its catalog action and
//! hands it to the executor. Executor failures are logged and counted; one
//! category's failure never blocks dispatch for the other categories in
//! the same batch.

use crate::domain::catalog::{action_for_key, ActionSpec};
use crate::domain::types::DispatchDecision;
use crate::infra::metrics::Metrics;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{error, info};

/// Performs the actual side effect for a fired category
///
/// Implementations resolve the launch package and fall back to the URL if
/// it is unresolvable. The call is fire-and-forget from the engine's
/// perspective: it reports whether the dispatch was accepted, not whether
/// the launched application did anything useful.
#[async_trait]
pub trait ActionExecutor: Send + Sync {
    async fn execute(&self, action: &ActionSpec) -> anyhow::Result<()>;
}

/// Maps decisions to actions and invokes the executor
pub struct DispatchSink {
    executor: Arc<dyn ActionExecutor>,
    metrics: Arc<Metrics>,
}

impl DispatchSink {
    pub fn new(executor: Arc<dyn ActionExecutor>, metrics: Arc<Metrics>) -> Self {
        Self { executor, metrics }
    }

    /// Dispatch one decision, swallowing executor errors
    pub async fn dispatch(&self, decision: &DispatchDecision) {
        let Some(action) = action_for_key(decision.action_key) else {
            // Unreachable for decisions produced by the engine; guards
            // against a catalog/decision mismatch.
            error!(action_key = decision.action_key, "action_key_unknown");
            return;
        };

        match self.executor.execute(action).await {
            Ok(()) => {
                info!(
                    category = %decision.category,
                    action_key = decision.action_key,
                    "action_dispatched"
                );
            }
            Err(e) => {
                self.metrics.record_dispatch_failure();
                error!(
                    category = %decision.category,
                    action_key = decision.action_key,
                    error = %e,
                    "action_dispatch_failed"
                );
            }
        }
    }

    /// Dispatch a batch in the order produced by the engine
    pub async fn dispatch_all(&self, decisions: &[DispatchDecision]) {
        for decision in decisions {
            self.dispatch(decision).await;
        }
    }
}
