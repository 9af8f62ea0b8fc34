// src/config/model.rs

use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::time::Duration;
use thiserror::Error;

/// Top-level runtime config
#[derive(Debug)]
pub struct Config {
    pub logging: LoggingConfig,
    pub engine:  EngineConfig,
}

/// Mirror of the `[logging]` table
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]            pub enable: bool,
    #[serde(default)]            pub file:   Option<String>,
    #[serde(default = "default_level")] pub level: String,
}
fn default_level() -> String { "INFO".into() }

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { enable: false, file: None, level: default_level() }
    }
}

/// Raw `[engine]` table as it appears in TOML. Durations are humantime
/// strings ("5s", "3s") so operators never count milliseconds.
#[derive(Debug, Deserialize)]
pub struct EngineStub {
    #[serde(default = "default_sensitivity")] pub sensitivity: f32,
    #[serde(default = "default_true")]        pub alert_sound: bool,
    #[serde(default = "default_true")]        pub log_events:  bool,
    #[serde(default)]                         pub cooldown:       Option<String>,
    #[serde(default)]                         pub decay_interval: Option<String>,
    #[serde(default = "default_decay_amount")] pub decay_amount: u32,
}
fn default_sensitivity() -> f32 { 0.5 }
fn default_true() -> bool { true }
fn default_decay_amount() -> u32 { 1 }

/// Raw `[policy]` table.
#[derive(Debug, Default, Deserialize)]
pub struct PolicyStub {
    #[serde(default)]                        pub suspicious_labels: Vec<String>,
    #[serde(default = "default_pose_weight")]   pub pose_weight:   u32,
    #[serde(default = "default_object_weight")] pub object_weight: u32,
    #[serde(default)]                        pub increment_by_label: HashMap<String, u32>,
}
fn default_pose_weight() -> u32 { 15 }
fn default_object_weight() -> u32 { 10 }

/// Top-level config as deserialized from TOML.
#[derive(Debug, Deserialize)]
pub struct MasterConfig {
    #[serde(default)] pub logging: LoggingConfig,
    pub engine: EngineStub,
    #[serde(default)] pub policy: PolicyStub,
}

/// Fully-typed engine policy snapshot. Immutable once handed to the engine;
/// replacing the whole snapshot is the only way to change policy.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub sensitivity:        f32,
    pub alert_sound_enabled: bool,
    pub log_events_enabled:  bool,
    pub suspicious_labels:  HashSet<String>,
    pub cooldown:           Duration,
    pub decay_interval:     Duration,
    pub decay_amount:       u32,
    pub pose_weight:        u32,
    pub object_weight:      u32,
    pub increment_by_label: HashMap<String, u32>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sensitivity: default_sensitivity(),
            alert_sound_enabled: true,
            log_events_enabled: true,
            suspicious_labels: [
                "book",
                "cell phone",
                "remote",
                "scissors",
                "Focus Lost",
                "Window Resized",
                "Multiple People",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            cooldown: Duration::from_secs(5),
            decay_interval: Duration::from_secs(3),
            decay_amount: default_decay_amount(),
            pose_weight: default_pose_weight(),
            object_weight: default_object_weight(),
            increment_by_label: [("Focus Lost", 5), ("Window Resized", 5), ("Multiple People", 10)]
                .into_iter()
                .map(|(label, weight)| (label.to_owned(), weight))
                .collect(),
        }
    }
}

impl EngineConfig {
    /// Range checks applied at load/replace time, never at use time.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.sensitivity) || self.sensitivity.is_nan() {
            return Err(ConfigError::InvalidSensitivity(self.sensitivity));
        }
        if self.cooldown.is_zero() {
            return Err(ConfigError::ZeroDuration("cooldown"));
        }
        if self.decay_interval.is_zero() {
            return Err(ConfigError::ZeroDuration("decay_interval"));
        }
        Ok(())
    }
}

/// All the ways config loading can go wrong
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("sensitivity {0} outside [0, 1]")]
    InvalidSensitivity(f32),

    #[error("{0} must be greater than zero")]
    ZeroDuration(&'static str),

    #[error("invalid duration '{0}': {1}")]
    InvalidDuration(String, #[source] humantime::DurationError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}
