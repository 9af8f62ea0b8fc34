// src/config/loader.rs

//! # Configuration Loader
//!
//! Reads `default.toml`, deserializes into `MasterConfig`, and converts the
//! raw engine/policy stubs into a validated runtime [`EngineConfig`].

use crate::sentinel_log;
use crate::config::model::{
    Config, ConfigError, EngineConfig, EngineStub, MasterConfig, PolicyStub,
};
use log::Level;
use std::{fs, path::Path, time::Duration};

/// Load and parse the full configuration from `path`.
/// Logs at DEBUG before reading and INFO on success.
pub fn load(path: &Path) -> Result<Config, ConfigError> {
    sentinel_log!(Level::Debug, "config", "Reading config from {:?}", path);
    let txt = fs::read_to_string(path)?;
    let master: MasterConfig = toml::from_str(&txt)?;
    let engine = convert_stubs(master.engine, master.policy)?;
    sentinel_log!(Level::Info, "config", "Loaded config from {:?}", path);
    Ok(Config { logging: master.logging, engine })
}

/// Convert the raw TOML stubs into a runtime `EngineConfig`, validating as we
/// go. Rejection happens here, never once the snapshot is in use.
pub fn convert_stubs(engine: EngineStub, policy: PolicyStub) -> Result<EngineConfig, ConfigError> {
    let defaults = EngineConfig::default();
    let cfg = EngineConfig {
        sensitivity: engine.sensitivity,
        alert_sound_enabled: engine.alert_sound,
        log_events_enabled: engine.log_events,
        suspicious_labels: policy.suspicious_labels.into_iter().collect(),
        cooldown: parse_duration(engine.cooldown, defaults.cooldown)?,
        decay_interval: parse_duration(engine.decay_interval, defaults.decay_interval)?,
        decay_amount: engine.decay_amount,
        pose_weight: policy.pose_weight,
        object_weight: policy.object_weight,
        increment_by_label: policy.increment_by_label,
    };
    cfg.validate()?;
    sentinel_log!(
        Level::Debug,
        "config",
        "Converted engine config: {} suspicious label(s), cooldown={:?}, decay={:?}/{}",
        cfg.suspicious_labels.len(),
        cfg.cooldown,
        cfg.decay_interval,
        cfg.decay_amount
    );
    Ok(cfg)
}

fn parse_duration(raw: Option<String>, fallback: Duration) -> Result<Duration, ConfigError> {
    match raw {
        Some(s) => humantime::parse_duration(&s)
            .map_err(|e| ConfigError::InvalidDuration(s, e)),
        None => Ok(fallback),
    }
}
