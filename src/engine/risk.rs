// src/engine/risk.rs

//! Bounded risk score.
//!
//! The single process-wide risk indicator. Mutable only through
//! `increment` and `decay`; no setter exists, so no consumer can forge risk
//! state. The value stays inside [0, 100] at all observable times.

pub const MAX_SCORE: u32 = 100;

/// Coarse banding consumers render from; thresholds live here so every
/// subscriber agrees on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum RiskLevel {
    Nominal,
    Elevated,
    Critical,
}

impl RiskLevel {
    pub fn from_score(score: u32) -> Self {
        match score {
            0..=39 => RiskLevel::Nominal,
            40..=69 => RiskLevel::Elevated,
            _ => RiskLevel::Critical,
        }
    }
}

#[derive(Debug, Default)]
pub struct RiskScore {
    value: u32,
}

impl RiskScore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> u32 {
        self.value
    }

    pub fn level(&self) -> RiskLevel {
        RiskLevel::from_score(self.value)
    }

    /// Additive weight on a suspicious classification, capped at 100.
    /// Returns true if the value changed.
    pub fn increment(&mut self, weight: u32) -> bool {
        let next = (self.value + weight).min(MAX_SCORE);
        let changed = next != self.value;
        self.value = next;
        changed
    }

    /// One decay period's reduction, floored at 0. Returns true if the value
    /// changed.
    pub fn decay(&mut self, amount: u32) -> bool {
        let next = self.value.saturating_sub(amount);
        let changed = next != self.value;
        self.value = next;
        changed
    }
}
