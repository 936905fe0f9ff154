//! Services - business logic and state management
//!
//! This module contains the core business logic services:
//! - `snapshot` - decodes the persisted activity-history blob
//! - `matcher` - maps triggered geofence identifiers to landmark categories
//! - `engine` - correlates transitions with activity and emits decisions
//! - `dispatcher` - forwards decisions to the action executor
//! - `worker` - single-lane queue consumer serializing evaluations

pub mod dispatcher;
pub mod engine;
pub mod matcher;
pub mod snapshot;
pub mod worker;

// Re-export commonly used types
pub use dispatcher::{ActionExecutor, DispatchSink};
pub use engine::{CorrelationEngine, PreferenceReader, SnapshotReader};
pub use worker::{create_trigger_worker, TriggerWorker};
