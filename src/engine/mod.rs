//! Fusion engine facade.
//!
//! Composes the signal adapter, classification policy, risk aggregator,
//! alert debouncer, and audit log behind one owned state object. Every
//! mutation goes through `submit`, `tick`, or `replace_config`; consumers
//! get copies and a broadcast stream of notices, never a writable reference.
//!
//! Key responsibilities:
//! - Run the fixed submit pipeline: normalize, classify, score, debounce, log.
//! - Drop malformed producer values before they can touch any state.
//! - Fan out score changes and alert activations to subscribers.

pub mod debounce;
pub mod risk;
pub mod runtime;

pub use debounce::{AlertCategory, AlertDebouncer, AlertStatus, DebounceOutcome};
pub use risk::{RiskLevel, RiskScore, MAX_SCORE};
pub use runtime::{EngineCommand, EngineHandle, EngineRuntime};

use crate::config::{ConfigError, EngineConfig};
use crate::logstore::{EventLogStore, ExportDocument, LogEntry, LogFilter, LogSort, LogStats};
use crate::signal::{classify, DetectionEvent, RawSignal, SignalAdapter, Verdict};
use crate::sentinel_log;

use chrono::Local;
use log::Level;
use metrics::{counter, gauge};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::broadcast;

/// Buffered notices per subscriber before a slow one starts lagging.
const NOTICE_CAPACITY: usize = 64;

/// What subscribers hear about. Side effects (sound, banner) are the
/// subscriber's responsibility; the engine only signals.
#[derive(Debug, Clone)]
pub enum EngineNotice {
    ScoreChanged {
        score: u32,
        level: RiskLevel,
    },
    /// An alert category transitioned idle -> active.
    AlertFired {
        category: AlertCategory,
        label: String,
        score: u32,
        level: RiskLevel,
    },
}

/// The fusion engine. Exclusively owns the risk score, all alert category
/// states, and the log buffer.
pub struct Engine {
    config: Arc<EngineConfig>,
    adapter: SignalAdapter,
    score: RiskScore,
    debouncer: AlertDebouncer,
    log: EventLogStore,
    notices: broadcast::Sender<EngineNotice>,
}

impl Engine {
    /// Build an engine around a validated config snapshot.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let (notices, _) = broadcast::channel(NOTICE_CAPACITY);
        Ok(Self {
            config: Arc::new(config),
            adapter: SignalAdapter::new(),
            score: RiskScore::new(),
            debouncer: AlertDebouncer::new(),
            log: EventLogStore::new(),
            notices,
        })
    }

    /// Feed one raw producer value through the pipeline. Malformed values
    /// are dropped whole before any effect; producers are inherently noisy,
    /// so a drop is not an error.
    pub fn submit(&mut self, raw: RawSignal) {
        counter!("signals_submitted_total").increment(1);
        let events = match self.adapter.normalize(raw) {
            Ok(events) => events,
            Err(e) => {
                counter!("signals_dropped_total").increment(1);
                sentinel_log!(Level::Debug, "engine", "Dropped malformed signal: {}", e);
                return;
            }
        };
        for event in events {
            self.apply(event);
        }
    }

    /// One elapsed decay period. Touches only the score.
    pub fn tick(&mut self) {
        if self.score.decay(self.config.decay_amount) {
            self.publish_score();
        }
    }

    /// Swap the active policy snapshot for all subsequent submits. Existing
    /// log entries are never reclassified.
    pub fn replace_config(&mut self, config: EngineConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.config = Arc::new(config);
        sentinel_log!(
            Level::Info,
            "engine",
            "Config replaced: {} suspicious label(s), cooldown={:?}",
            self.config.suspicious_labels.len(),
            self.config.cooldown
        );
        Ok(())
    }

    /// Receive score changes and alert activations.
    pub fn subscribe(&self) -> broadcast::Receiver<EngineNotice> {
        self.notices.subscribe()
    }

    /// Sender half for handles living outside the actor task.
    pub(crate) fn notice_sender(&self) -> broadcast::Sender<EngineNotice> {
        self.notices.clone()
    }

    pub fn config(&self) -> Arc<EngineConfig> {
        Arc::clone(&self.config)
    }

    pub fn score(&self) -> u32 {
        self.score.get()
    }

    pub fn risk_level(&self) -> RiskLevel {
        self.score.level()
    }

    pub fn alert_statuses(&self) -> Vec<AlertStatus> {
        self.debouncer.statuses(Instant::now(), self.config.cooldown)
    }

    pub fn is_alert_active(&self, category: AlertCategory) -> bool {
        self.debouncer
            .is_active(category, Instant::now(), self.config.cooldown)
    }

    pub fn log_view(&self, filter: LogFilter, sort: LogSort) -> Vec<LogEntry> {
        self.log.view(filter, sort)
    }

    pub fn log_stats(&self) -> LogStats {
        self.log.stats()
    }

    pub fn clear_log(&mut self) {
        self.log.clear();
    }

    pub fn export_log(&self) -> ExportDocument {
        self.log.export()
    }

    /// The fixed per-event pipeline: classify, then score, debounce, log,
    /// in that order, always.
    fn apply(&mut self, event: DetectionEvent) {
        let verdict = classify(&event.label, event.confidence, &self.config);
        let category = AlertCategory::from(event.source);

        match verdict {
            Verdict::Clear => {
                // Pure de-escalation: no score change, no log entry.
                self.debouncer.on_clear(category);
                sentinel_log!(Level::Debug, "engine", "{:?} category cleared", category);
            }
            Verdict::Benign => {
                self.log_event(&event, false);
            }
            Verdict::Suspicious { weight } => {
                if self.score.increment(weight) {
                    self.publish_score();
                }
                let outcome = self.debouncer.on_suspicious(
                    category,
                    &event.label,
                    event.occurred_at,
                    self.config.cooldown,
                );
                if outcome == DebounceOutcome::Activated {
                    counter!("alerts_fired_total").increment(1);
                    sentinel_log!(
                        Level::Info,
                        "engine",
                        "Alert fired: {:?} '{}' (score={})",
                        category,
                        event.label,
                        self.score.get()
                    );
                    let _ = self.notices.send(EngineNotice::AlertFired {
                        category,
                        label: event.label.clone(),
                        score: self.score.get(),
                        level: self.score.level(),
                    });
                }
                self.log_event(&event, true);
            }
        }
    }

    fn log_event(&mut self, event: &DetectionEvent, suspicious: bool) {
        if !self.config.log_events_enabled {
            return;
        }
        // Confidence-free signals (posture, environment) log as certain.
        self.log.append(
            Local::now().to_rfc3339(),
            event.label.clone(),
            event.confidence.unwrap_or(1.0),
            suspicious,
        );
    }

    fn publish_score(&self) {
        gauge!("risk_score").set(self.score.get() as f64);
        let _ = self.notices.send(EngineNotice::ScoreChanged {
            score: self.score.get(),
            level: self.score.level(),
        });
    }
}
