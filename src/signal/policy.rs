// src/signal/policy.rs

//! Classification policy.
//!
//! Pure, deterministic mapping from a label (object class, posture label, or
//! environment flag) to a verdict under the active configuration. No side
//! effects, no I/O; recomputed per event and never persisted.

use crate::config::EngineConfig;

/// Canonical "back to normal" posture label. Together with the empty label it
/// forms the de-escalation sentinel.
pub const NORMAL_SENTINEL: &str = "Pose Normal";

/// Posture labels that alert regardless of confidence.
pub const POSE_ALERT_LABELS: [&str; 2] = ["Looking Away", "Head Tilt Detected"];

/// Outcome of classifying one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Contributes `weight` to the risk score and may fire an alert.
    Suspicious { weight: u32 },
    /// Recognized but harmless; logged, nothing else.
    Benign,
    /// De-escalation sentinel: forces the event's category back to idle.
    Clear,
}

/// Classify a label under `cfg`.
///
/// Posture-alert labels are trusted unconditionally (the pose estimator has
/// already smoothed its keypoints); confidence-bearing labels are gated on
/// the configured sensitivity before they count as suspicious.
pub fn classify(label: &str, confidence: Option<f32>, cfg: &EngineConfig) -> Verdict {
    if label.is_empty() || label == NORMAL_SENTINEL {
        return Verdict::Clear;
    }

    if POSE_ALERT_LABELS.contains(&label) {
        let weight = cfg
            .increment_by_label
            .get(label)
            .copied()
            .unwrap_or(cfg.pose_weight);
        return Verdict::Suspicious { weight };
    }

    if cfg.suspicious_labels.contains(label) {
        if let Some(c) = confidence {
            if c < cfg.sensitivity {
                return Verdict::Benign;
            }
        }
        let weight = cfg
            .increment_by_label
            .get(label)
            .copied()
            .unwrap_or(cfg.object_weight);
        return Verdict::Suspicious { weight };
    }

    Verdict::Benign
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> EngineConfig {
        EngineConfig::default()
    }

    #[test]
    fn empty_and_normal_labels_clear() {
        assert_eq!(classify("", None, &cfg()), Verdict::Clear);
        assert_eq!(classify(NORMAL_SENTINEL, None, &cfg()), Verdict::Clear);
    }

    #[test]
    fn pose_labels_alert_regardless_of_confidence() {
        assert_eq!(
            classify("Head Tilt Detected", Some(0.01), &cfg()),
            Verdict::Suspicious { weight: 15 }
        );
        assert_eq!(
            classify("Looking Away", None, &cfg()),
            Verdict::Suspicious { weight: 15 }
        );
    }

    #[test]
    fn configured_object_classes_are_suspicious() {
        assert_eq!(
            classify("cell phone", Some(0.87), &cfg()),
            Verdict::Suspicious { weight: 10 }
        );
        assert_eq!(classify("laptop", Some(0.99), &cfg()), Verdict::Benign);
    }

    #[test]
    fn low_confidence_detections_stay_benign() {
        assert_eq!(classify("book", Some(0.2), &cfg()), Verdict::Benign);
        assert_eq!(
            classify("book", Some(0.5), &cfg()),
            Verdict::Suspicious { weight: 10 }
        );
    }

    #[test]
    fn per_label_override_beats_kind_weight() {
        let mut cfg = cfg();
        cfg.suspicious_labels.insert("Focus Lost".into());
        cfg.increment_by_label.insert("Focus Lost".into(), 5);
        assert_eq!(
            classify("Focus Lost", None, &cfg),
            Verdict::Suspicious { weight: 5 }
        );
    }

    #[test]
    fn deterministic_for_same_inputs() {
        let cfg = cfg();
        let a = classify("remote", Some(0.6), &cfg);
        let b = classify("remote", Some(0.6), &cfg);
        assert_eq!(a, b);
    }
}
