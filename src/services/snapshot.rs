//! Activity snapshot decoding
//!
//! The snapshot store persists the most recent activity-recognition batch
//! as one JSON string under a fixed settings key, written by a separate
//! background poller. The documented default for the key is the empty
//! string, so an empty or whitespace-only blob decodes to an empty
//! snapshot rather than an error.

use crate::domain::types::ActivitySnapshot;

/// Blob is present but not parseable as an activity history
#[derive(Debug)]
pub struct MalformedSnapshot(serde_json::Error);

impl std::fmt::Display for MalformedSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "malformed activity snapshot: {}", self.0)
    }
}

impl std::error::Error for MalformedSnapshot {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

/// Decode the persisted activity-history blob
///
/// No side effects; callers decide how to treat a malformed blob (the
/// engine logs it and continues with an empty snapshot).
pub fn decode_snapshot(blob: &str) -> Result<ActivitySnapshot, MalformedSnapshot> {
    if blob.trim().is_empty() {
        return Ok(ActivitySnapshot::default());
    }
    serde_json::from_str(blob).map_err(MalformedSnapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::ActivityType;

    #[test]
    fn test_empty_blob_is_empty_snapshot() {
        assert!(decode_snapshot("").unwrap().is_empty());
        assert!(decode_snapshot("   \n").unwrap().is_empty());
    }

    #[test]
    fn test_decode_history() {
        let snapshot = decode_snapshot(
            r#"[{"activity":"on_foot","confidence":60},{"activity":"still","confidence":10}]"#,
        )
        .unwrap();
        assert_eq!(snapshot.0.len(), 2);
        assert_eq!(snapshot.current().unwrap().activity, ActivityType::OnFoot);
        assert_eq!(snapshot.0[1].confidence, 10);
    }

    #[test]
    fn test_malformed_blob_is_error() {
        assert!(decode_snapshot("not json").is_err());
        assert!(decode_snapshot(r#"{"activity":"still"}"#).is_err()); // object, not array
    }

    #[test]
    fn test_decode_is_idempotent() {
        let blob = r#"[{"activity":"running","confidence":45}]"#;
        assert_eq!(decode_snapshot(blob).unwrap(), decode_snapshot(blob).unwrap());
    }
}
