//! File-backed settings store
//!
//! A flat JSON object on disk holds the per-category enable flags (written
//! by the preferences UI) and the serialized activity history (written by
//! the background activity poller). This process only reads it. The file
//! is re-read when its modification time changes, so per-event reads see
//! the freshest persisted values without re-parsing on every access.

use crate::services::engine::{PreferenceReader, SnapshotReader};
use anyhow::Context;
use parking_lot::{Mutex, RwLock};
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{debug, info, warn};

pub struct FileSettings {
    path: PathBuf,
    values: RwLock<HashMap<String, Value>>,
    last_modified: Mutex<Option<SystemTime>>,
}

impl FileSettings {
    /// Open the settings file; a missing file is an empty store
    pub fn open<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let settings = Self {
            path: path.clone(),
            values: RwLock::new(HashMap::new()),
            last_modified: Mutex::new(None),
        };
        settings.reload()?;
        info!(path = %path.display(), "settings_opened");
        Ok(settings)
    }

    /// Re-read the file unconditionally
    pub fn reload(&self) -> anyhow::Result<()> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "settings_file_missing");
            self.values.write().clear();
            return Ok(());
        }

        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read settings file {}", self.path.display()))?;
        let values: HashMap<String, Value> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse settings file {}", self.path.display()))?;

        *self.values.write() = values;
        *self.last_modified.lock() = fs::metadata(&self.path).and_then(|m| m.modified()).ok();
        Ok(())
    }

    /// Reload if the file changed since the last read
    fn refresh_if_stale(&self) {
        let modified = fs::metadata(&self.path).and_then(|m| m.modified()).ok();
        let stale = modified != *self.last_modified.lock();
        if stale {
            if let Err(e) = self.reload() {
                // Keep serving the last good values
                warn!(error = %e, "settings_reload_failed");
            }
        }
    }

    fn get(&self, key: &str) -> Option<Value> {
        self.refresh_if_stale();
        self.values.read().get(key).cloned()
    }
}

impl PreferenceReader for FileSettings {
    fn get_bool(&self, key: &str, default: bool) -> bool {
        self.get(key).and_then(|v| v.as_bool()).unwrap_or(default)
    }
}

impl SnapshotReader for FileSettings {
    fn get_string(&self, key: &str, default: &str) -> String {
        match self.get(key) {
            Some(Value::String(s)) => s,
            // The snapshot blob may be stored as a nested JSON array
            // rather than a pre-serialized string; both shapes decode.
            Some(v @ Value::Array(_)) => v.to_string(),
            _ => default.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn settings_with(content: &str) -> (NamedTempFile, FileSettings) {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        let settings = FileSettings::open(file.path()).unwrap();
        (file, settings)
    }

    #[test]
    fn test_missing_file_is_empty_store() {
        let settings = FileSettings::open("/no/such/settings.json").unwrap();
        assert!(!settings.get_bool(".MensaEnabled", false));
        assert_eq!(settings.get_string("detected_activities", ""), "");
    }

    #[test]
    fn test_get_bool_and_default() {
        let (_file, settings) =
            settings_with(r#"{".MensaEnabled": true, ".TransitEnabled": false}"#);
        assert!(settings.get_bool(".MensaEnabled", false));
        assert!(!settings.get_bool(".TransitEnabled", true));
        assert!(settings.get_bool(".OtherEnabled", true));
    }

    #[test]
    fn test_get_string_from_string_value() {
        let (_file, settings) = settings_with(
            r#"{"detected_activities": "[{\"activity\":\"on_foot\",\"confidence\":60}]"}"#,
        );
        let blob = settings.get_string("detected_activities", "");
        assert!(blob.contains("on_foot"));
    }

    #[test]
    fn test_get_string_from_nested_array() {
        let (_file, settings) =
            settings_with(r#"{"detected_activities": [{"activity":"still","confidence":90}]}"#);
        let blob = settings.get_string("detected_activities", "");
        assert!(blob.starts_with('['));
        assert!(blob.contains("still"));
    }

    #[test]
    fn test_reload_picks_up_changes() {
        use std::io::Seek;

        let (mut file, settings) = settings_with(r#"{".MensaEnabled": false}"#);
        assert!(!settings.get_bool(".MensaEnabled", false));

        file.as_file_mut().set_len(0).unwrap();
        file.as_file_mut().rewind().unwrap();
        file.write_all(br#"{".MensaEnabled": true}"#).unwrap();
        file.flush().unwrap();

        settings.reload().unwrap();
        assert!(settings.get_bool(".MensaEnabled", false));
    }
}
