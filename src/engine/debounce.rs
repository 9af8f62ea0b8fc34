// src/engine/debounce.rs

//! Per-category alert debouncing.
//!
//! One small state machine per alert category (posture, object, environment)
//! keeps bursty producers from turning into alert storms. A suspicious
//! classification fires at most once per cooldown window; repeats inside the
//! window are suppressed without touching score or log behavior, which the
//! facade handles separately. The de-escalation sentinel snaps a category
//! back to idle regardless of the timer.

use crate::signal::SourceKind;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Grouping of alert sources, each with independent debounce state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum AlertCategory {
    Posture,
    Object,
    Environment,
}

impl From<SourceKind> for AlertCategory {
    fn from(kind: SourceKind) -> Self {
        match kind {
            SourceKind::Object => AlertCategory::Object,
            SourceKind::Posture => AlertCategory::Posture,
            SourceKind::Environment => AlertCategory::Environment,
        }
    }
}

/// What the debouncer decided for one suspicious classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebounceOutcome {
    /// Idle -> Active: the alert fires (sound/banner are the subscriber's job).
    Activated,
    /// Inside the cooldown window: no new side-effecting alert.
    Suppressed,
}

/// Read-only snapshot of one category for consumers.
#[derive(Debug, Clone, serde::Serialize)]
pub struct AlertStatus {
    pub category: AlertCategory,
    pub active: bool,
    /// Label of the alert that last fired, if any.
    pub label: Option<String>,
}

#[derive(Debug, Default)]
struct CategoryState {
    last_fired: Option<Instant>,
    active: bool,
    last_label: Option<String>,
}

/// All category state machines. Created lazily on first event of a category,
/// kept for the process lifetime.
#[derive(Debug, Default)]
pub struct AlertDebouncer {
    states: HashMap<AlertCategory, CategoryState>,
}

impl AlertDebouncer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A suspicious classification arrived for `category` at `now`.
    pub fn on_suspicious(
        &mut self,
        category: AlertCategory,
        label: &str,
        now: Instant,
        cooldown: Duration,
    ) -> DebounceOutcome {
        let state = self.states.entry(category).or_default();
        let in_window = state
            .last_fired
            .is_some_and(|fired| now.duration_since(fired) < cooldown);
        if in_window {
            return DebounceOutcome::Suppressed;
        }
        state.last_fired = Some(now);
        state.active = true;
        state.last_label = Some(label.to_owned());
        DebounceOutcome::Activated
    }

    /// De-escalation sentinel: force the category to idle immediately,
    /// clearing the visible flag and the cooldown timer.
    pub fn on_clear(&mut self, category: AlertCategory) {
        let state = self.states.entry(category).or_default();
        state.last_fired = None;
        state.active = false;
    }

    /// Whether `category` is currently showing an alert: fired, not cleared,
    /// and still inside its visibility window.
    pub fn is_active(&self, category: AlertCategory, now: Instant, cooldown: Duration) -> bool {
        self.states.get(&category).is_some_and(|s| {
            s.active
                && s.last_fired
                    .is_some_and(|fired| now.duration_since(fired) < cooldown)
        })
    }

    /// Snapshot of every category that has seen at least one event.
    pub fn statuses(&self, now: Instant, cooldown: Duration) -> Vec<AlertStatus> {
        self.states
            .iter()
            .map(|(category, s)| AlertStatus {
                category: *category,
                active: s.active
                    && s.last_fired
                        .is_some_and(|fired| now.duration_since(fired) < cooldown),
                label: s.last_label.clone(),
            })
            .collect()
    }
}
