// src/main.rs

//! Sentinel entry-point: console monitor around the fusion engine.
//!
//! 1. Parse configuration & set up structured logging
//! 2. Build the engine and spawn its single-consumer actor loop
//! 3. Spawn the demo perception producers and a notice subscriber
//! 4. Wait for ctrl-c, export the audit log, then exit cleanly

// ───── std / 3rd-party imports ──────────────────────────────────────────────
use chrono::Local;
use fern::Dispatch;
use log::LevelFilter;
use std::{
    path::{Path, PathBuf},
    process, thread,
    time::Duration,
};
use tokio::sync::broadcast::error::RecvError;

// ───── local imports ────────────────────────────────────────────────────────
use sentinel::config::{self, Config, EngineConfig, LoggingConfig};
use sentinel::engine::{Engine, EngineNotice, EngineRuntime};
use sentinel::sim::spawn_demo_producers;

// ───── helpers ──────────────────────────────────────────────────────────────

/// Print an error with context and terminate the process.
macro_rules! fatal {
    ($ctx:expr, $($arg:tt)+) => {{
        eprintln!(
            "[{}][ERROR][{}] {}",
            chrono::Local::now().to_rfc3339(),
            $ctx,
            format!($($arg)+)
        );
        std::process::exit(1);
    }};
}

/// Directory that contains the running executable.
fn exe_dir() -> PathBuf {
    std::env::current_exe()
        .expect("Cannot determine exe path")
        .parent()
        .expect("Executable must live in some directory")
        .to_path_buf()
}

/// Load `default.toml` next to the executable, falling back to built-in
/// defaults when no file is present.
fn load_config(exe_dir: &Path) -> Config {
    let path = exe_dir.join("default.toml");
    if path.exists() {
        config::load(&path).unwrap_or_else(|e| fatal!("config", "{}", e))
    } else {
        Config { logging: LoggingConfig::default(), engine: EngineConfig::default() }
    }
}

/// Configure global logging as requested in the `[logging]` table.
fn setup_logging(exe_dir: &Path, logging: &LoggingConfig) -> Result<(), fern::InitError> {
    let level = match logging.level.to_uppercase().as_str() {
        "ERROR" => LevelFilter::Error,
        "WARN" => LevelFilter::Warn,
        "DEBUG" => LevelFilter::Debug,
        "TRACE" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    };

    let log_path = logging
        .enable
        .then(|| exe_dir.join(logging.file.as_deref().unwrap_or("sentinel.log")));

    let mut dispatch = Dispatch::new()
        .format(|out, msg, record| {
            out.finish(format_args!(
                "[{}][{:5}][{}][pid={}][tid={:?}] {}",
                Local::now().to_rfc3339(),
                record.level(),
                record.target(), // Only print the target (module path)
                process::id(),
                thread::current().id(),
                msg
            ))
        })
        .level(level)
        .chain(std::io::stdout());

    if let Some(path) = log_path {
        dispatch = dispatch.chain(fern::log_file(path)?);
    }

    dispatch.apply()?;
    Ok(())
}

/// Render engine notices on the console. This is the subscriber side of the
/// boundary: the engine signals, the subscriber decides how loud to be.
async fn run_subscriber(mut rx: tokio::sync::broadcast::Receiver<EngineNotice>, sound: bool) {
    loop {
        match rx.recv().await {
            Ok(EngineNotice::AlertFired { category, label, score, level }) => {
                log::warn!(
                    "Suspicious behavior detected: {:?} '{}' (score={}, {:?})",
                    category,
                    label,
                    score,
                    level
                );
                if sound {
                    // Stand-in for audible playback; a failure here would be
                    // this task's problem alone.
                    log::warn!("** audible alert **");
                }
            }
            Ok(EngineNotice::ScoreChanged { score, level }) => {
                log::info!("Risk score {} ({:?})", score, level);
            }
            Err(RecvError::Lagged(skipped)) => {
                log::warn!("Subscriber lagged, skipped {} notice(s)", skipped);
            }
            Err(RecvError::Closed) => break,
        }
    }
}

// ───── entry point ──────────────────────────────────────────────────────────

#[tokio::main]
async fn main() {
    // 1 ─ Context
    let exe_dir = exe_dir();
    let cfg = load_config(&exe_dir);

    // 2 ─ Logging
    setup_logging(&exe_dir, &cfg.logging).expect("Logging setup failed");
    log::info!("Sentinel bootstrap initiated");

    // 3 ─ Engine actor
    let sound = cfg.engine.alert_sound_enabled;
    let engine = Engine::new(cfg.engine).unwrap_or_else(|e| fatal!("engine", "{}", e));
    let (runtime, handle) = EngineRuntime::new(engine);

    tokio::spawn(run_subscriber(handle.subscribe(), sound));
    tokio::spawn(runtime.run());

    // 4 ─ Demo perception producers
    let producers = spawn_demo_producers(&handle);
    log::info!("Monitoring with {} producer(s)", producers.len());

    // 5 ─ Wait for shutdown
    tokio::signal::ctrl_c()
        .await
        .unwrap_or_else(|e| fatal!("signal", "{}", e));
    log::warn!("Shutdown initiated");

    // 6 ─ Export the audit log next to the exe, then let the actor drain
    let export_name = format!("detection-logs-{}.json", Local::now().format("%Y-%m-%d"));
    handle.export_to(exe_dir.join(export_name));
    tokio::time::sleep(Duration::from_millis(200)).await;

    for p in producers {
        p.abort();
    }
    log::info!("Stopped cleanly");
}
