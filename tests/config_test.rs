//! Integration tests for configuration loading

use landmark_trigger::infra::Config;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_load_config_from_file() {
    let mut temp_file = NamedTempFile::new().unwrap();

    let config_content = r#"
[site]
id = "test-site"

[settings]
file = "/var/lib/landmark/settings.json"
snapshot_key = "activity_history"

[engine]
queue_capacity = 128

[launcher]
app_command = "test-launch {package}"
url_command = "test-open {url}"

[metrics]
interval_secs = 15
"#;

    temp_file.write_all(config_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = Config::from_file(temp_file.path()).unwrap();

    assert_eq!(config.site_id(), "test-site");
    assert_eq!(config.settings_file(), "/var/lib/landmark/settings.json");
    assert_eq!(config.snapshot_key(), "activity_history");
    assert_eq!(config.queue_capacity(), 128);
    assert_eq!(config.launcher_app_command(), "test-launch {package}");
    assert_eq!(config.metrics_interval_secs(), 15);
}

#[test]
fn test_partial_config_uses_section_defaults() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"[site]\nid = \"partial\"\n").unwrap();
    temp_file.flush().unwrap();

    let config = Config::from_file(temp_file.path()).unwrap();

    assert_eq!(config.site_id(), "partial");
    assert_eq!(config.settings_file(), "settings.json");
    assert_eq!(config.snapshot_key(), "detected_activities");
    assert_eq!(config.queue_capacity(), 64);
}

#[test]
fn test_load_from_path_fallback() {
    let config = Config::load_from_path("/definitely/missing.toml");
    assert_eq!(config.config_file(), "default");
    assert_eq!(config.settings_file(), "settings.json");
}
