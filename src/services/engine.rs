//! Correlation engine - matches transitions against activity and emits decisions
//!
//! The engine is the central decision point: it consumes one transition
//! delivery at a time, reads the preference and snapshot stores through
//! injected interfaces, and returns the dispatch decisions for that event.
//! It holds no state across calls and its contract never fails outright;
//! errors only ever shrink the decision list.

use crate::domain::types::{
    provider_error_string, ActivitySnapshot, DispatchDecision, TransitionDelivery, TransitionEvent,
    TransitionType,
};
use crate::infra::metrics::Metrics;
use crate::services::matcher;
use crate::services::snapshot::decode_snapshot;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Read-only access to per-category enable flags
pub trait PreferenceReader: Send + Sync {
    fn get_bool(&self, key: &str, default: bool) -> bool;
}

/// Read-only access to the persisted activity-history blob
pub trait SnapshotReader: Send + Sync {
    fn get_string(&self, key: &str, default: &str) -> String;
}

/// Correlates geofence transitions with cached activity recognition
pub struct CorrelationEngine {
    prefs: Arc<dyn PreferenceReader>,
    snapshots: Arc<dyn SnapshotReader>,
    /// Settings key holding the serialized activity history
    snapshot_key: String,
    metrics: Arc<Metrics>,
}

impl CorrelationEngine {
    pub fn new(
        prefs: Arc<dyn PreferenceReader>,
        snapshots: Arc<dyn SnapshotReader>,
        snapshot_key: impl Into<String>,
        metrics: Arc<Metrics>,
    ) -> Self {
        Self { prefs, snapshots, snapshot_key: snapshot_key.into(), metrics }
    }

    /// Evaluate one delivery and return the decisions to dispatch, in
    /// catalog declaration order
    pub fn on_transition(&self, delivery: &TransitionDelivery) -> Vec<DispatchDecision> {
        match delivery {
            TransitionDelivery::Error(code) => {
                self.metrics.record_provider_error();
                error!(code = %code, message = provider_error_string(*code), "provider_error");
                Vec::new()
            }
            TransitionDelivery::Event(event) => self.evaluate_event(event),
        }
    }

    fn evaluate_event(&self, event: &TransitionEvent) -> Vec<DispatchDecision> {
        // Only entry transitions are actionable
        if event.transition != TransitionType::Enter {
            debug!(transition = event.transition.as_str(), "transition_ignored");
            return Vec::new();
        }

        let matched = matcher::matched_categories(&event.triggered_ids);
        if matched.is_empty() {
            debug!(triggered_ids = ?event.triggered_ids, "no_category_matched");
            return Vec::new();
        }

        // One fresh fetch per event, shared across the matched categories,
        // so all decisions reflect a single snapshot version.
        let snapshot = self.fetch_snapshot();

        let mut decisions = Vec::new();
        for spec in matched {
            if !self.prefs.get_bool(spec.pref_key, false) {
                debug!(category = %spec.category, "category_disabled");
                continue;
            }
            if spec.predicate.evaluate(&snapshot) {
                info!(
                    category = %spec.category,
                    action_key = spec.action.key,
                    triggered_ids = ?event.triggered_ids,
                    "trigger_fired"
                );
                self.metrics.record_decision();
                decisions.push(DispatchDecision {
                    category: spec.category,
                    action_key: spec.action.key,
                });
            } else {
                debug!(category = %spec.category, "predicate_not_satisfied");
            }
        }
        decisions
    }

    /// Fetch and decode the current snapshot, failing open to empty
    fn fetch_snapshot(&self) -> ActivitySnapshot {
        let blob = self.snapshots.get_string(&self.snapshot_key, "");
        match decode_snapshot(&blob) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                self.metrics.record_malformed_snapshot();
                warn!(error = %e, "snapshot_malformed");
                ActivitySnapshot::default()
            }
        }
    }
}
