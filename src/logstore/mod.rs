//! In-memory audit log of classified detections.
//!
//! Stores log entries capped at a fixed maximum (100) with FIFO eviction by
//! insertion order, which keeps the bound meaningful even when producer
//! clocks skew. Views are pure projections; only `append` and `clear`
//! mutate the store.

pub mod export;

pub use export::{export_document, verify_document, ExportDocument};

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Newest entries retained before the oldest are evicted.
pub const LOG_CAPACITY: usize = 100;

/// A single audit entry for one classified event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    /// Unique, increasing across the store's lifetime (survives `clear`).
    pub id: u64,
    /// Wall-clock display string; ordering never relies on it.
    pub timestamp: String,
    pub subject: String,
    pub confidence: f32,
    pub suspicious: bool,
}

/// Which entries a view includes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFilter {
    All,
    SuspiciousOnly,
    NormalOnly,
}

/// How a view is ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSort {
    NewestFirst,
    OldestFirst,
    /// Stable: equal confidences keep insertion order.
    ByConfidenceDesc,
}

/// Aggregate counts over the retained set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogStats {
    pub total: usize,
    pub suspicious: usize,
    pub normal: usize,
    /// Fraction of retained entries that are suspicious, 0.0 when empty.
    pub alert_rate: f32,
}

/// Bounded, ordered ring buffer of audit entries.
#[derive(Debug, Default)]
pub struct EventLogStore {
    entries: VecDeque<LogEntry>,
    next_id: u64,
}

impl EventLogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one entry, evicting the oldest past the cap. O(1) amortized.
    /// Returns the assigned id.
    pub fn append(&mut self, timestamp: String, subject: String, confidence: f32, suspicious: bool) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.entries.push_back(LogEntry { id, timestamp, subject, confidence, suspicious });
        while self.entries.len() > LOG_CAPACITY {
            self.entries.pop_front();
        }
        id
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Empties the store. Idempotent; ids keep increasing afterwards.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Pure projection over the retained entries.
    pub fn view(&self, filter: LogFilter, sort: LogSort) -> Vec<LogEntry> {
        let mut out: Vec<LogEntry> = self
            .entries
            .iter()
            .filter(|e| match filter {
                LogFilter::All => true,
                LogFilter::SuspiciousOnly => e.suspicious,
                LogFilter::NormalOnly => !e.suspicious,
            })
            .cloned()
            .collect();

        match sort {
            // Entries iterate oldest-first already.
            LogSort::OldestFirst => {}
            LogSort::NewestFirst => out.reverse(),
            // sort_by is stable, so ties keep insertion order.
            LogSort::ByConfidenceDesc => {
                out.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
            }
        }
        out
    }

    /// Counts over the full retained set.
    pub fn stats(&self) -> LogStats {
        let total = self.entries.len();
        let suspicious = self.entries.iter().filter(|e| e.suspicious).count();
        LogStats {
            total,
            suspicious,
            normal: total - suspicious,
            alert_rate: if total == 0 { 0.0 } else { suspicious as f32 / total as f32 },
        }
    }

    /// Serialize the full retained set (not a filtered view) into a signed,
    /// deterministic export document.
    pub fn export(&self) -> ExportDocument {
        let entries: Vec<LogEntry> = self.entries.iter().cloned().collect();
        export_document(entries)
    }
}
