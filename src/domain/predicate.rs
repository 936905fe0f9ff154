//! Trigger predicates - per-category fire/no-fire rules
//!
//! A predicate is a conjunction of clauses over the decoded activity
//! snapshot. Clauses are independent: they may constrain the most recent
//! classification, require a supporting classification anywhere in the
//! history, or forbid a disqualifying one. An empty snapshot evaluates
//! every predicate to false (fail-closed, no action fires).

use crate::domain::types::{ActivitySnapshot, ActivityType};

/// One boolean condition over an activity snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clause {
    /// Most recent classification is this activity at or above the confidence
    Current { activity: ActivityType, min_confidence: u8 },
    /// Some classification in the snapshot is this activity at or above the confidence
    Recent { activity: ActivityType, min_confidence: u8 },
    /// No classification of this activity exceeds the confidence
    Without { activity: ActivityType, max_confidence: u8 },
}

impl Clause {
    fn holds(&self, snapshot: &ActivitySnapshot) -> bool {
        match *self {
            Clause::Current { activity, min_confidence } => snapshot
                .current()
                .is_some_and(|c| c.activity == activity && c.confidence >= min_confidence),
            Clause::Recent { activity, min_confidence } => snapshot
                .iter()
                .any(|c| c.activity == activity && c.confidence >= min_confidence),
            Clause::Without { activity, max_confidence } => !snapshot
                .iter()
                .any(|c| c.activity == activity && c.confidence > max_confidence),
        }
    }
}

/// Conjunction of clauses, fixed at build time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerPredicate {
    pub clauses: &'static [Clause],
}

impl TriggerPredicate {
    /// Evaluate against one snapshot
    ///
    /// The empty snapshot is always false, even for an empty conjunction.
    pub fn evaluate(&self, snapshot: &ActivitySnapshot) -> bool {
        if snapshot.is_empty() {
            return false;
        }
        self.clauses.iter().all(|clause| clause.holds(snapshot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::ActivityClassification;

    fn snapshot(entries: &[(ActivityType, u8)]) -> ActivitySnapshot {
        ActivitySnapshot(
            entries
                .iter()
                .map(|&(activity, confidence)| ActivityClassification { activity, confidence })
                .collect(),
        )
    }

    const WALKING: TriggerPredicate = TriggerPredicate {
        clauses: &[
            Clause::Current { activity: ActivityType::OnFoot, min_confidence: 50 },
            Clause::Without { activity: ActivityType::Still, max_confidence: 20 },
        ],
    };

    #[test]
    fn test_empty_snapshot_fails_closed() {
        assert!(!WALKING.evaluate(&ActivitySnapshot::default()));
        // Even a vacuous conjunction stays closed on an empty snapshot
        let vacuous = TriggerPredicate { clauses: &[] };
        assert!(!vacuous.evaluate(&ActivitySnapshot::default()));
    }

    #[test]
    fn test_current_clause_checks_head_only() {
        assert!(WALKING.evaluate(&snapshot(&[(ActivityType::OnFoot, 60)])));
        // OnFoot buried behind a Still head does not count
        assert!(!WALKING
            .evaluate(&snapshot(&[(ActivityType::Still, 15), (ActivityType::OnFoot, 90)])));
    }

    #[test]
    fn test_current_clause_confidence_boundary() {
        assert!(WALKING.evaluate(&snapshot(&[(ActivityType::OnFoot, 50)])));
        assert!(!WALKING.evaluate(&snapshot(&[(ActivityType::OnFoot, 49)])));
    }

    #[test]
    fn test_without_clause_scans_whole_snapshot() {
        // A low-confidence Still reading does not disqualify
        assert!(WALKING
            .evaluate(&snapshot(&[(ActivityType::OnFoot, 60), (ActivityType::Still, 10)])));
        // A confident Still reading anywhere does
        assert!(!WALKING
            .evaluate(&snapshot(&[(ActivityType::OnFoot, 60), (ActivityType::Still, 80)])));
        // Boundary: exactly max_confidence is still allowed
        assert!(WALKING
            .evaluate(&snapshot(&[(ActivityType::OnFoot, 60), (ActivityType::Still, 20)])));
    }

    #[test]
    fn test_recent_clause_matches_any_slot() {
        let hurrying = TriggerPredicate {
            clauses: &[
                Clause::Current { activity: ActivityType::OnFoot, min_confidence: 50 },
                Clause::Recent { activity: ActivityType::Running, min_confidence: 30 },
            ],
        };
        assert!(hurrying
            .evaluate(&snapshot(&[(ActivityType::OnFoot, 70), (ActivityType::Running, 40)])));
        assert!(!hurrying.evaluate(&snapshot(&[(ActivityType::OnFoot, 70)])));
    }
}
