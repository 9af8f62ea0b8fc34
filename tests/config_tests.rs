//! Integration tests for configuration loading and validation.
//!
//! Verifies TOML stub parsing (including humantime durations and per-label
//! weight overrides), defaulting behavior for omitted tables, and the range
//! checks that reject bad snapshots at load/replace time.

use sentinel::config::{self, ConfigError, EngineConfig};
use std::io::Write;
use std::time::Duration;

const FULL: &str = r#"
[logging]
enable = true
file = "sentinel.log"
level = "DEBUG"

[engine]
sensitivity = 0.6
alert_sound = false
log_events = true
cooldown = "5s"
decay_interval = "3s"
decay_amount = 2

[policy]
suspicious_labels = ["book", "cell phone", "Focus Lost"]
pose_weight = 20
object_weight = 12

[policy.increment_by_label]
"Focus Lost" = 5
"#;

fn load_str(text: &str) -> Result<config::Config, ConfigError> {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(text.as_bytes()).unwrap();
    config::load(file.path())
}

#[test]
fn full_config_parses_into_runtime_snapshot() {
    let cfg = load_str(FULL).unwrap();

    assert!(cfg.logging.enable);
    assert_eq!(cfg.logging.level, "DEBUG");

    let eng = cfg.engine;
    assert_eq!(eng.sensitivity, 0.6);
    assert!(!eng.alert_sound_enabled);
    assert!(eng.log_events_enabled);
    assert_eq!(eng.cooldown, Duration::from_secs(5));
    assert_eq!(eng.decay_interval, Duration::from_secs(3));
    assert_eq!(eng.decay_amount, 2);
    assert_eq!(eng.pose_weight, 20);
    assert_eq!(eng.object_weight, 12);
    assert!(eng.suspicious_labels.contains("cell phone"));
    assert_eq!(eng.increment_by_label.get("Focus Lost"), Some(&5));
}

#[test]
fn omitted_tables_fall_back_to_defaults() {
    let cfg = load_str("[engine]\n").unwrap();

    assert!(!cfg.logging.enable);
    assert_eq!(cfg.logging.level, "INFO");

    let eng = cfg.engine;
    assert_eq!(eng.sensitivity, 0.5);
    assert!(eng.alert_sound_enabled);
    assert_eq!(eng.cooldown, Duration::from_secs(5));
    assert_eq!(eng.decay_interval, Duration::from_secs(3));
    assert_eq!(eng.decay_amount, 1);
    assert_eq!(eng.pose_weight, 15);
    assert_eq!(eng.object_weight, 10);
}

#[test]
fn sensitivity_outside_unit_range_is_rejected() {
    let err = load_str("[engine]\nsensitivity = 1.5\n").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidSensitivity(_)));
}

#[test]
fn zero_cooldown_is_rejected_at_load_time() {
    let err = load_str("[engine]\ncooldown = \"0s\"\n").unwrap_err();
    assert!(matches!(err, ConfigError::ZeroDuration("cooldown")));

    let err = load_str("[engine]\ndecay_interval = \"0s\"\n").unwrap_err();
    assert!(matches!(err, ConfigError::ZeroDuration("decay_interval")));
}

#[test]
fn unparseable_duration_is_rejected() {
    let err = load_str("[engine]\ncooldown = \"soon\"\n").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidDuration(_, _)));
}

#[test]
fn malformed_toml_is_rejected() {
    let err = load_str("[engine\n").unwrap_err();
    assert!(matches!(err, ConfigError::Toml(_)));
}

#[test]
fn missing_file_is_an_io_error() {
    let err = config::load(std::path::Path::new("/nonexistent/default.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn built_in_defaults_validate() {
    assert!(EngineConfig::default().validate().is_ok());
}

#[test]
fn validate_catches_hand_built_bad_snapshots() {
    let mut cfg = EngineConfig::default();
    cfg.sensitivity = -0.1;
    assert!(cfg.validate().is_err());

    let mut cfg = EngineConfig::default();
    cfg.cooldown = Duration::ZERO;
    assert!(cfg.validate().is_err());
}
