// src/signal/adapter.rs

//! Signal normalization.
//!
//! Turns heterogeneous producer payloads into canonical [`DetectionEvent`]s.
//! Normalization is fallible: a malformed raw value is rejected as a whole,
//! before any part of it can reach classification or mutate engine state.
//!
//! Key responsibilities:
//! - Validate labels and confidence ranges per source kind.
//! - Flatten object frames into one event per prediction.
//! - Synthesize the "Multiple People" environment signal when a frame
//!   contains more than one person.

use super::{DetectionEvent, Prediction, RawSignal, SourceKind};
use std::time::Instant;
use thiserror::Error;

/// Label synthesized when an object frame shows more than one person.
pub const MULTIPLE_PEOPLE: &str = "Multiple People";

const PERSON_CLASS: &str = "person";

/// All the ways a raw producer value can be malformed.
#[derive(Debug, Error)]
pub enum SignalError {
    #[error("{0:?} signal is missing a label")]
    MissingLabel(SourceKind),

    #[error("confidence {0} outside [0, 1]")]
    InvalidConfidence(f32),
}

/// Normalizes raw producer values and hands out event ids.
#[derive(Debug, Default)]
pub struct SignalAdapter {
    next_id: u64,
}

impl SignalAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize one raw value into canonical events, all stamped with the
    /// same monotonic timestamp. Returns every event or none: a frame with a
    /// single malformed prediction is dropped whole.
    pub fn normalize(&mut self, raw: RawSignal) -> Result<Vec<DetectionEvent>, SignalError> {
        let now = Instant::now();
        match raw {
            RawSignal::ObjectFrame { predictions } => self.normalize_frame(predictions, now),
            RawSignal::Posture { label } => {
                // An empty posture label is the de-escalation sentinel, not a defect.
                Ok(vec![self.event(SourceKind::Posture, label, None, now)])
            }
            RawSignal::Environment { label } => {
                if label.is_empty() {
                    return Err(SignalError::MissingLabel(SourceKind::Environment));
                }
                Ok(vec![self.event(SourceKind::Environment, label, None, now)])
            }
        }
    }

    fn normalize_frame(
        &mut self,
        predictions: Vec<Prediction>,
        now: Instant,
    ) -> Result<Vec<DetectionEvent>, SignalError> {
        for p in &predictions {
            if p.class.is_empty() {
                return Err(SignalError::MissingLabel(SourceKind::Object));
            }
            if !(0.0..=1.0).contains(&p.score) || p.score.is_nan() {
                return Err(SignalError::InvalidConfidence(p.score));
            }
        }

        let persons = predictions.iter().filter(|p| p.class == PERSON_CLASS).count();

        let mut events: Vec<DetectionEvent> = predictions
            .into_iter()
            .map(|p| self.event(SourceKind::Object, p.class, Some(p.score), now))
            .collect();

        if persons >= 2 {
            events.push(self.event(
                SourceKind::Environment,
                MULTIPLE_PEOPLE.to_owned(),
                None,
                now,
            ));
        }

        Ok(events)
    }

    fn event(
        &mut self,
        source: SourceKind,
        label: String,
        confidence: Option<f32>,
        occurred_at: Instant,
    ) -> DetectionEvent {
        self.next_id += 1;
        DetectionEvent { id: self.next_id, source, label, confidence, occurred_at }
    }
}
