//! Simulated perception producers.
//!
//! Drives the engine end-to-end without cameras or models: a periodic
//! object-detector frame, a posture sampler, and occasional environment
//! observations, all on independent cadences. Each producer enqueues and
//! never waits on the engine; tearing one down needs no engine notice.

use crate::engine::EngineHandle;
use crate::signal::{Prediction, RawSignal, NORMAL_SENTINEL};

use tokio::task::JoinHandle;
use tokio::time::{interval, Duration};

/// Spawn every demo producer against `handle`.
pub fn spawn_demo_producers(handle: &EngineHandle) -> Vec<JoinHandle<()>> {
    vec![
        spawn_object_feed(handle.clone()),
        spawn_posture_feed(handle.clone()),
        spawn_environment_feed(handle.clone()),
    ]
}

/// One detector frame per second: a benign desk scene, with contraband
/// classes and a second person mixed in on fixed cadences.
fn spawn_object_feed(handle: EngineHandle) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(Duration::from_secs(1));
        let mut frame: u64 = 0;
        loop {
            ticker.tick().await;
            frame += 1;

            let mut predictions = vec![
                Prediction { class: "person".into(), score: 0.95 },
                Prediction { class: "laptop".into(), score: 0.88 },
                Prediction { class: "keyboard".into(), score: 0.76 },
            ];
            if frame % 4 == 0 {
                predictions.push(Prediction { class: "cell phone".into(), score: 0.87 });
            }
            if frame % 9 == 0 {
                predictions.push(Prediction { class: "book".into(), score: 0.92 });
            }
            if frame % 17 == 0 {
                // Second person in frame; the adapter turns this into a
                // "Multiple People" environment signal.
                predictions.push(Prediction { class: "person".into(), score: 0.81 });
            }

            handle.submit(RawSignal::ObjectFrame { predictions });
        }
    })
}

/// One posture sample per second, mostly normal, with the occasional tilt or
/// glance away followed by the normal sentinel on the next sample.
fn spawn_posture_feed(handle: EngineHandle) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(Duration::from_secs(1));
        let mut sample: u64 = 0;
        loop {
            ticker.tick().await;
            sample += 1;

            let label = match sample % 12 {
                5 => "Looking Away",
                9 => "Head Tilt Detected",
                _ => NORMAL_SENTINEL,
            };
            handle.submit(RawSignal::Posture { label: label.into() });
        }
    })
}

/// Sparse environment observations: focus loss and window resizes.
fn spawn_environment_feed(handle: EngineHandle) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(Duration::from_secs(5));
        let mut beat: u64 = 0;
        loop {
            ticker.tick().await;
            beat += 1;

            if beat % 3 == 0 {
                handle.submit(RawSignal::Environment { label: "Focus Lost".into() });
            }
            if beat % 8 == 0 {
                handle.submit(RawSignal::Environment { label: "Window Resized".into() });
            }
        }
    })
}
