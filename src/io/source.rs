//! Transition delivery ingestion
//!
//! The platform geofencing callback is replaced by an abstract delivery
//! stream: JSON lines on stdin, one delivery per line. Two wire shapes are
//! accepted:
//!
//!   {"transition":"enter","triggered_ids":["MENSA_Stadtmitte"]}
//!   {"error_code":1000}
//!
//! A line that parses as neither is forwarded as an errored delivery with
//! the local malformed-delivery code, so the engine logs it and the
//! pipeline keeps running. Deliveries are sent via try_send to avoid
//! blocking the reader - drops are counted in metrics.

use crate::domain::types::{TransitionDelivery, TransitionEvent, ERROR_MALFORMED_DELIVERY};
use crate::infra::metrics::Metrics;
use serde::Deserialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, watch};
use tracing::{info, warn};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireDelivery {
    Error { error_code: i32 },
    Event(TransitionEvent),
}

/// Parse one wire line into a delivery
///
/// Never fails: unparseable input becomes an errored delivery.
pub fn parse_delivery(line: &str) -> TransitionDelivery {
    match serde_json::from_str::<WireDelivery>(line) {
        Ok(WireDelivery::Event(event)) => TransitionDelivery::Event(event),
        Ok(WireDelivery::Error { error_code }) => TransitionDelivery::Error(error_code),
        Err(e) => {
            warn!(error = %e, line = %line, "delivery_parse_failed");
            TransitionDelivery::Error(ERROR_MALFORMED_DELIVERY)
        }
    }
}

/// Read deliveries from stdin and forward them to the worker queue
pub async fn start_stdin_source(
    delivery_tx: mpsc::Sender<TransitionDelivery>,
    metrics: Arc<Metrics>,
    mut shutdown: watch::Receiver<bool>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    info!("stdin_source_started");

    // Rate-limit drop warnings to 1 per second
    let mut last_drop_warn = Instant::now() - Duration::from_secs(2);

    loop {
        tokio::select! {
            _ = shutdown.changed() => {
                if *shutdown.borrow() {
                    info!("stdin_source_shutdown");
                    return Ok(());
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    info!("stdin_source_eof");
                    return Ok(());
                };
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                let delivery = parse_delivery(line);
                match delivery_tx.try_send(delivery) {
                    Ok(()) => {}
                    Err(TrySendError::Full(_)) => {
                        metrics.record_delivery_dropped();
                        if last_drop_warn.elapsed() >= Duration::from_secs(1) {
                            warn!("delivery_queue_full");
                            last_drop_warn = Instant::now();
                        }
                    }
                    Err(TrySendError::Closed(_)) => {
                        info!("delivery_channel_closed");
                        return Ok(());
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::TransitionType;

    #[test]
    fn test_parse_event_line() {
        let delivery =
            parse_delivery(r#"{"transition":"enter","triggered_ids":["MENSA_Stadtmitte"]}"#);
        match delivery {
            TransitionDelivery::Event(event) => {
                assert_eq!(event.transition, TransitionType::Enter);
                assert_eq!(event.triggered_ids, vec!["MENSA_Stadtmitte".to_string()]);
            }
            other => panic!("expected event, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_error_line() {
        assert_eq!(parse_delivery(r#"{"error_code":1001}"#), TransitionDelivery::Error(1001));
    }

    #[test]
    fn test_malformed_line_becomes_errored_delivery() {
        assert_eq!(
            parse_delivery("definitely not json"),
            TransitionDelivery::Error(ERROR_MALFORMED_DELIVERY)
        );
        assert_eq!(
            parse_delivery(r#"{"transition":"teleport"}"#),
            TransitionDelivery::Error(ERROR_MALFORMED_DELIVERY)
        );
    }
}
