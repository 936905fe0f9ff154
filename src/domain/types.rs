//! Shared types for the landmark trigger core

use serde::{Deserialize, Serialize};

use crate::domain::catalog::LandmarkCategory;

/// Direction of a geofence boundary crossing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionType {
    Enter,
    Exit,
    Dwell,
}

impl TransitionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionType::Enter => "enter",
            TransitionType::Exit => "exit",
            TransitionType::Dwell => "dwell",
        }
    }
}

/// A geofence transition as delivered by the provider
///
/// One event can carry multiple triggered identifiers when several
/// geofences are crossed simultaneously.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionEvent {
    pub transition: TransitionType,
    #[serde(default)]
    pub triggered_ids: Vec<String>,
}

/// One delivery from the geofence provider
///
/// The platform signals malformed or failed deliveries as an error code
/// rather than a crash; the engine logs the code and produces no decisions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionDelivery {
    Event(TransitionEvent),
    Error(i32),
}

/// Provider error code for a delivery the source could not parse
pub const ERROR_MALFORMED_DELIVERY: i32 = -1;

/// Human-readable message for a provider error code
///
/// Codes 1000-1002 follow the platform geofencing service convention.
pub fn provider_error_string(code: i32) -> &'static str {
    match code {
        ERROR_MALFORMED_DELIVERY => "malformed transition delivery",
        1000 => "geofence service is not available now",
        1001 => "your app has registered too many geofences",
        1002 => "you have provided too many pending intents to addGeofences()",
        _ => "unknown geofence error",
    }
}

/// Physical-activity classes reported by activity recognition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    OnFoot,
    Running,
    Still,
    InVehicle,
    OnBicycle,
    Tilting,
    Unknown,
}

impl ActivityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityType::OnFoot => "on_foot",
            ActivityType::Running => "running",
            ActivityType::Still => "still",
            ActivityType::InVehicle => "in_vehicle",
            ActivityType::OnBicycle => "on_bicycle",
            ActivityType::Tilting => "tilting",
            ActivityType::Unknown => "unknown",
        }
    }
}

/// One activity-recognition result with its confidence (0-100)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityClassification {
    pub activity: ActivityType,
    pub confidence: u8,
}

/// Decoded activity history, most-recent-first
///
/// Owned by the external snapshot store; the engine holds a decoded copy
/// only for the duration of one evaluation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivitySnapshot(pub Vec<ActivityClassification>);

impl ActivitySnapshot {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Most recent classification (index 0), if any
    pub fn current(&self) -> Option<&ActivityClassification> {
        self.0.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ActivityClassification> {
        self.0.iter()
    }
}

/// The engine's output: fire this category's action
///
/// Ephemeral - produced and consumed within one evaluation cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchDecision {
    pub category: LandmarkCategory,
    pub action_key: &'static str,
}
