use std::fs;
use std::time::Duration;

use hostmon::core::config::{ensure_settings_file, KeyBinding, Settings};
use tempfile::TempDir;

#[test]
fn test_missing_file_is_created_with_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("settings").join("settings.json");

    assert!(!ensure_settings_file(&path).unwrap());
    assert!(path.is_file());
    assert_eq!(Settings::try_load_from(&path).unwrap(), Settings::default());

    // Second check sees the defaults it just wrote
    assert!(ensure_settings_file(&path).unwrap());
}

#[test]
fn test_invalid_json_is_repaired() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("settings.json");
    fs::write(&path, "{ not json").unwrap();

    assert!(!ensure_settings_file(&path).unwrap());
    assert_eq!(Settings::try_load_from(&path).unwrap(), Settings::default());
}

#[test]
fn test_custom_values_are_kept() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("settings.json");
    fs::write(&path, r#"{"cpu_percent_interval": 0.5, "fps": 60}"#).unwrap();

    assert!(!ensure_settings_file(&path).unwrap());
    let settings = Settings::load_from(&path);
    assert_eq!(settings.fps, 60);
    assert_eq!(settings.video_format, "mp4");
    assert_eq!(
        settings.poll_config().unwrap().cpu_interval(),
        Duration::from_millis(500)
    );
}

#[test]
fn test_missing_file_loads_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let settings = Settings::load_from(&temp_dir.path().join("absent.json"));
    assert_eq!(settings, Settings::default());
}

#[test]
fn test_invalid_interval_falls_back() {
    let settings = Settings {
        cpu_percent_interval: 0.0,
        ..Default::default()
    };
    assert!(settings.poll_config().is_err());
    assert_eq!(
        settings.poll_config_or_default().cpu_interval(),
        Duration::from_millis(100)
    );
}

#[test]
fn test_save_and_reload() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("settings.json");
    let settings = Settings {
        minimalize: "<Control-k>".to_string(),
        refresh_interval_ms: 250,
        ..Default::default()
    };

    settings.save_to(&path).unwrap();
    let loaded = Settings::try_load_from(&path).unwrap();

    assert_eq!(loaded, settings);
    assert_eq!(loaded.refresh_interval(), Duration::from_millis(250));
    assert_eq!(
        loaded.key_bindings().minimalize,
        Some(KeyBinding {
            ctrl: true,
            key: 'k'
        })
    );
}

#[test]
fn test_default_file_matches_documented_keys() {
    let json = serde_json::to_value(Settings::default()).unwrap();
    assert_eq!(json["cpu_percent_interval"], 0.1);
    assert_eq!(json["video_format"], "mp4");
    assert_eq!(json["fps"], 30);
    assert_eq!(json["monitor_resolution"], "1920x1080");
    assert_eq!(json["minimalize"], "<Control-m>");
    assert_eq!(json["topmost"], "<Control-t>");
}
