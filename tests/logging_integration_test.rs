//! Integration tests for logging functionality

use granite_regulate::config::LoggingConfig;
use granite_regulate::logging::init_logging;
use tempfile::TempDir;

#[test]
fn test_logging_config_default() {
    let config = LoggingConfig::default();
    assert!(!config.local_enabled);
    assert_eq!(config.local_rotation, "daily");
    assert!(!config.json_console);
}

#[test]
fn test_console_only_keeps_other_defaults() {
    let config = LoggingConfig::console_only();
    assert!(!config.local_enabled);
    assert_eq!(config.local_path, LoggingConfig::default().local_path);
}

#[test]
fn test_invalid_level_rejected_before_install() {
    assert!(init_logging("loud", &LoggingConfig::console_only()).is_err());
}

// The global subscriber can be installed once per process, so file logging
// and the reinstall failure are checked in a single test.
#[test]
fn test_file_logging_creates_log_file() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("logs");

    let config = LoggingConfig {
        local_enabled: true,
        local_path: log_path.to_string_lossy().to_string(),
        local_rotation: "never".to_string(),
        json_console: false,
    };
    assert!(!log_path.exists());

    let guard = init_logging("debug", &config).unwrap();
    tracing::info!("integration test event");
    drop(guard);

    assert!(log_path.join("granite-regulate.log").exists());
    assert!(init_logging("info", &LoggingConfig::console_only()).is_err());
}
