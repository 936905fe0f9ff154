//! Declarative landmark catalog
//!
//! Each landmark category is one `{tag, preference key, predicate, action}`
//! tuple. The matcher and predicate evaluator are generic over this table;
//! adding a category means adding an entry here, not new code paths.
//!
//! `CATEGORIES` order is the declaration order and fixes the dispatch order
//! for events that match more than one category.

use crate::domain::predicate::{Clause, TriggerPredicate};
use crate::domain::types::ActivityType;

/// Named partition of geofence identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LandmarkCategory {
    Mensa,
    TransitDeparture,
}

impl LandmarkCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            LandmarkCategory::Mensa => "mensa",
            LandmarkCategory::TransitDeparture => "transit_departure",
        }
    }
}

impl std::fmt::Display for LandmarkCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Side effect associated with a category: launch an app, fall back to a URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionSpec {
    pub key: &'static str,
    pub launch_package: &'static str,
    pub fallback_url: &'static str,
}

/// One row of the landmark catalog
#[derive(Debug, Clone, Copy)]
pub struct CategorySpec {
    pub category: LandmarkCategory,
    /// Substring tag identifying this category's geofence identifiers
    pub tag: &'static str,
    /// Preference store key for the per-category enable flag
    pub pref_key: &'static str,
    pub predicate: TriggerPredicate,
    pub action: ActionSpec,
}

/// The static catalog, in declaration (and therefore dispatch) order
pub const CATEGORIES: &[CategorySpec] = &[
    CategorySpec {
        category: LandmarkCategory::Mensa,
        tag: "MENSA",
        pref_key: ".MensaEnabled",
        // Fire when the user arrives on foot and has not been standing still
        predicate: TriggerPredicate {
            clauses: &[
                Clause::Current { activity: ActivityType::OnFoot, min_confidence: 50 },
                Clause::Without { activity: ActivityType::Still, max_confidence: 20 },
            ],
        },
        action: ActionSpec {
            key: "open_mensa_app",
            launch_package: "de.incloud.mensaapp",
            fallback_url: "https://play.google.com/store/apps/details?id=de.incloud.mensaapp",
        },
    },
    CategorySpec {
        category: LandmarkCategory::TransitDeparture,
        tag: "RMV",
        pref_key: ".TransitEnabled",
        // Fire when the user arrives on foot after hurrying (recent running)
        predicate: TriggerPredicate {
            clauses: &[
                Clause::Current { activity: ActivityType::OnFoot, min_confidence: 50 },
                Clause::Recent { activity: ActivityType::Running, min_confidence: 30 },
            ],
        },
        action: ActionSpec {
            key: "open_transit_departures",
            launch_package: "de.hafas.android.rmv",
            fallback_url:
                "https://www.rmv.de/auskunft/bin/jp/stboard.exe/dn?L=vs_anzeigetafel&start=1",
        },
    },
];

/// Look up the action for a decision's action key
pub fn action_for_key(key: &str) -> Option<&'static ActionSpec> {
    CATEGORIES.iter().find(|spec| spec.action.key == key).map(|spec| &spec.action)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_are_unambiguous() {
        // Every identifier belongs to at most one category: no tag may be
        // a substring of another category's tag.
        for (i, a) in CATEGORIES.iter().enumerate() {
            for (j, b) in CATEGORIES.iter().enumerate() {
                if i != j {
                    assert!(!a.tag.contains(b.tag), "{} overlaps {}", a.tag, b.tag);
                }
            }
        }
    }

    #[test]
    fn test_action_keys_unique() {
        for (i, a) in CATEGORIES.iter().enumerate() {
            for b in &CATEGORIES[i + 1..] {
                assert_ne!(a.action.key, b.action.key);
                assert_ne!(a.pref_key, b.pref_key);
            }
        }
    }

    #[test]
    fn test_action_for_key() {
        let action = action_for_key("open_mensa_app").unwrap();
        assert_eq!(action.launch_package, "de.incloud.mensaapp");
        assert!(action_for_key("no_such_action").is_none());
    }

    #[test]
    fn test_declaration_order_mensa_before_transit() {
        assert_eq!(CATEGORIES[0].category, LandmarkCategory::Mensa);
        assert_eq!(CATEGORIES[1].category, LandmarkCategory::TransitDeparture);
    }
}
