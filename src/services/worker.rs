//! Trigger worker - single-lane queue consumer
//!
//! The platform may deliver new transitions before the previous event's
//! side effects complete, so deliveries are funneled through a bounded
//! mpsc channel consumed by one worker task. Each evaluation runs to
//! completion, including all dispatches, before the next delivery starts;
//! no two evaluations interleave their store reads.

use crate::domain::types::TransitionDelivery;
use crate::infra::metrics::Metrics;
use crate::services::dispatcher::DispatchSink;
use crate::services::engine::CorrelationEngine;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{mpsc, watch};
use tracing::{info, warn};

/// Worker that serializes transition processing
pub struct TriggerWorker {
    engine: CorrelationEngine,
    sink: DispatchSink,
    delivery_rx: mpsc::Receiver<TransitionDelivery>,
    metrics: Arc<Metrics>,
}

impl TriggerWorker {
    pub fn new(
        engine: CorrelationEngine,
        sink: DispatchSink,
        delivery_rx: mpsc::Receiver<TransitionDelivery>,
        metrics: Arc<Metrics>,
    ) -> Self {
        Self { engine, sink, delivery_rx, metrics }
    }

    /// Run the worker until shutdown is signalled or the channel closes
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) {
        info!("trigger_worker_started");

        loop {
            tokio::select! {
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        break;
                    }
                }
                delivery = self.delivery_rx.recv() => {
                    match delivery {
                        Some(d) => self.process(d).await,
                        None => break, // Channel closed
                    }
                }
            }
        }

        info!("trigger_worker_stopped");
    }

    /// Evaluate one delivery and dispatch its decisions before returning
    async fn process(&self, delivery: TransitionDelivery) {
        let process_start = Instant::now();

        let decisions = self.engine.on_transition(&delivery);
        self.sink.dispatch_all(&decisions).await;

        let latency_us = process_start.elapsed().as_micros() as u64;
        self.metrics.record_event_processed(latency_us);

        if latency_us > 100_000 {
            warn!(latency_us = %latency_us, "event_processing_slow");
        }
    }
}

/// Create a delivery channel and worker
///
/// Returns the sender (for the event source) and the worker (to be run).
pub fn create_trigger_worker(
    engine: CorrelationEngine,
    sink: DispatchSink,
    metrics: Arc<Metrics>,
    buffer_size: usize,
) -> (mpsc::Sender<TransitionDelivery>, TriggerWorker) {
    let (delivery_tx, delivery_rx) = mpsc::channel(buffer_size);
    let worker = TriggerWorker::new(engine, sink, delivery_rx, metrics);
    (delivery_tx, worker)
}
