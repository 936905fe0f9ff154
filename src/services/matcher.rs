//! Category matching for triggered geofence identifiers
//!
//! Membership is tag-substring containment against the catalog (an
//! identifier containing "MENSA" belongs to the Mensa category). Results
//! follow catalog declaration order, never discovery order, so dispatch
//! order is reproducible for multi-category events. Identifiers that match
//! no category are silently ignored - new geofences may legitimately not
//! map to any actionable category yet.

use crate::domain::catalog::{CategorySpec, CATEGORIES};

/// Does any triggered identifier belong to this category?
pub fn category_triggered(spec: &CategorySpec, triggered_ids: &[String]) -> bool {
    triggered_ids.iter().any(|id| id.contains(spec.tag))
}

/// Categories matched by a set of triggered identifiers, in declaration order
pub fn matched_categories(triggered_ids: &[String]) -> Vec<&'static CategorySpec> {
    CATEGORIES.iter().filter(|spec| category_triggered(spec, triggered_ids)).collect()
}
