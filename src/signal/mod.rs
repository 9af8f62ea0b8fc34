//! Unified signal model used across the engine.
//!
//! This module defines the raw producer payloads and the canonical
//! `DetectionEvent` every producer is normalized into: object-class
//! detections from the vision model, posture/gaze samples from the pose
//! estimator, and environment observations (focus loss, window resize).
//!
//! ## Purpose
//! These types are used to:
//! - Normalize incoming data into a central pipeline
//! - Drive classification and risk aggregation
//! - Feed the audit log and alert state machines
//!
//! ## Extension
//! To add a new signal source:
//! 1. Add a `SourceKind` variant
//! 2. Add a `RawSignal` variant with the producer's natural payload
//! 3. Teach the adapter how to normalize it

pub mod adapter;
pub mod policy;

pub use adapter::{SignalAdapter, SignalError};
pub use policy::{classify, Verdict, NORMAL_SENTINEL};

use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Which producer a signal came from. Carried on every canonical event so
/// downstream dispatch never falls back to string matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceKind {
    Object,
    Posture,
    Environment,
}

/// One prediction out of an object-detector frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    pub class: String,
    pub score: f32,
}

/// Raw value handed over by a producer, in the producer's own shape.
/// Producers are noisy and uncontrolled; everything here is validated by the
/// adapter before it can touch engine state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum RawSignal {
    /// One whole detector frame: every prediction the model emitted for a tick.
    ObjectFrame { predictions: Vec<Prediction> },
    /// A single posture/gaze sample. An empty label is the producer's way of
    /// saying "back to normal".
    Posture { label: String },
    /// Environment observation (focus loss, window resize, ...).
    Environment { label: String },
}

/// Canonical normalized signal consumed by the engine, regardless of
/// originating producer. Immutable once created.
#[derive(Debug, Clone)]
pub struct DetectionEvent {
    /// Opaque, monotonically increasing per adapter.
    pub id: u64,
    pub source: SourceKind,
    pub label: String,
    /// Present for object detections, absent for posture/environment signals.
    pub confidence: Option<f32>,
    /// Monotonic timestamp the debouncer compares against.
    pub occurred_at: Instant,
}
