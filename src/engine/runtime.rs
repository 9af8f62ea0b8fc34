// src/engine/runtime.rs

//! Single-consumer actor loop around the engine.
//!
//! All mutation funnels through one task: producers enqueue commands over a
//! bounded mpsc channel and never block, while the same `select!` loop owns
//! the decay interval, so submit and tick interleave only at operation
//! boundaries. Missed decay ticks fire late rather than coalescing; each
//! elapsed period decays exactly once.

use crate::config::EngineConfig;
use crate::engine::{Engine, EngineNotice};
use crate::signal::RawSignal;
use crate::sentinel_log;

use log::Level;
use metrics::counter;
use std::path::PathBuf;
use tokio::sync::{broadcast, mpsc};
use tokio::time::{self, Duration, Instant, MissedTickBehavior};

/// Default submit-queue depth before the newest signals get dropped.
pub const DEFAULT_QUEUE_CAPACITY: usize = 1_024;

/// Everything the actor task can be asked to do.
#[derive(Debug)]
pub enum EngineCommand {
    Signal(RawSignal),
    ReplaceConfig(EngineConfig),
    /// Write the signed export document to `path`. Failures are logged and
    /// swallowed; they never corrupt or block engine state.
    Export(PathBuf),
}

/// Cheap, cloneable front door for producers and the UI layer.
#[derive(Debug, Clone)]
pub struct EngineHandle {
    tx: mpsc::Sender<EngineCommand>,
    notices: broadcast::Sender<EngineNotice>,
}

impl EngineHandle {
    /// Enqueue a raw signal without blocking. A full queue drops the signal;
    /// producers are noisy and must never wait on the engine.
    pub fn submit(&self, raw: RawSignal) {
        if self.tx.try_send(EngineCommand::Signal(raw)).is_err() {
            counter!("signals_dropped_total").increment(1);
        }
    }

    /// Enqueue a full config replacement for subsequent submits.
    pub fn replace_config(&self, config: EngineConfig) {
        let _ = self.tx.try_send(EngineCommand::ReplaceConfig(config));
    }

    /// Ask the actor to write the export document to `path`.
    pub fn export_to(&self, path: PathBuf) {
        let _ = self.tx.try_send(EngineCommand::Export(path));
    }

    /// Subscribe to score changes and alert activations.
    pub fn subscribe(&self) -> broadcast::Receiver<EngineNotice> {
        self.notices.subscribe()
    }
}

/// Owns the engine and its command queue; run inside `tokio::spawn`.
pub struct EngineRuntime {
    engine: Engine,
    rx: mpsc::Receiver<EngineCommand>,
}

impl EngineRuntime {
    pub fn new(engine: Engine) -> (Self, EngineHandle) {
        Self::with_queue_capacity(engine, DEFAULT_QUEUE_CAPACITY)
    }

    pub fn with_queue_capacity(engine: Engine, capacity: usize) -> (Self, EngineHandle) {
        let (tx, rx) = mpsc::channel(capacity);
        let handle = EngineHandle { tx, notices: engine.notice_sender() };
        (Self { engine, rx }, handle)
    }

    /// Drain commands and decay on the configured period until every handle
    /// is gone.
    pub async fn run(mut self) {
        let mut ticker = decay_ticker(self.engine.config().decay_interval);
        sentinel_log!(Level::Info, "runtime", "Engine loop started");

        loop {
            tokio::select! {
                maybe = self.rx.recv() => match maybe {
                    Some(EngineCommand::Signal(raw)) => self.engine.submit(raw),
                    Some(EngineCommand::ReplaceConfig(config)) => {
                        match self.engine.replace_config(config) {
                            // The decay period may have changed with it.
                            Ok(()) => ticker = decay_ticker(self.engine.config().decay_interval),
                            Err(e) => sentinel_log!(
                                Level::Warn,
                                "runtime",
                                "Rejected config replacement: {}",
                                e
                            ),
                        }
                    }
                    Some(EngineCommand::Export(path)) => {
                        if let Err(e) = write_export(&self.engine, &path) {
                            sentinel_log!(Level::Warn, "runtime", "Export to {:?} failed: {}", path, e);
                        }
                    }
                    None => break,
                },
                _ = ticker.tick() => self.engine.tick(),
            }
        }

        sentinel_log!(Level::Info, "runtime", "Engine loop stopped");
    }
}

/// First tick one full period out; late ticks fire individually (Burst)
/// instead of coalescing.
fn decay_ticker(period: Duration) -> time::Interval {
    let mut ticker = time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Burst);
    ticker
}

fn write_export(engine: &Engine, path: &std::path::Path) -> anyhow::Result<()> {
    let doc = engine.export_log();
    std::fs::write(path, doc.render()?)?;
    sentinel_log!(
        Level::Info,
        "runtime",
        "Exported {} log entries to {:?}",
        doc.entries.len(),
        path
    );
    Ok(())
}
