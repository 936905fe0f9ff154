//! Domain models - core types for transitions, activity, and triggers
//!
//! This module contains the canonical data types used throughout the system:
//! - `TransitionEvent` / `TransitionDelivery` - geofence crossings from the provider
//! - `ActivityClassification` / `ActivitySnapshot` - cached activity recognition
//! - `TriggerPredicate` - per-category fire/no-fire rules
//! - `CategorySpec` / `CATEGORIES` - the declarative landmark catalog
//! - `DispatchDecision` - the engine's output

pub mod catalog;
pub mod predicate;
pub mod types;

// Re-export commonly used types at module level
pub use catalog::{ActionSpec, CategorySpec, LandmarkCategory, CATEGORIES};
pub use predicate::{Clause, TriggerPredicate};
pub use types::{
    ActivityClassification, ActivitySnapshot, ActivityType, DispatchDecision, TransitionDelivery,
    TransitionEvent, TransitionType,
};
