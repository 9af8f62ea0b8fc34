//! Integration tests for the bounded audit log store.
//!
//! Covers the retention bound and FIFO eviction, filter/sort projections
//! (including stable tie-breaking), clear idempotence, stats, and the signed
//! deterministic export document.

use sentinel::logstore::{
    export_document, verify_document, EventLogStore, LogFilter, LogSort, LOG_CAPACITY,
};

/// Append `n` entries with synthetic subjects; odd ids are suspicious.
fn filled(n: usize) -> EventLogStore {
    let mut store = EventLogStore::new();
    for i in 0..n {
        store.append(
            format!("2026-08-06T10:00:{:02}+00:00", i % 60),
            format!("subject-{}", i),
            (i % 10) as f32 / 10.0,
            i % 2 == 1,
        );
    }
    store
}

#[test]
fn retains_newest_hundred_fifo() {
    let store = filled(150);
    assert_eq!(store.len(), LOG_CAPACITY);

    let newest = store.view(LogFilter::All, LogSort::NewestFirst);
    assert_eq!(newest.first().unwrap().id, 150);
    assert_eq!(newest.last().unwrap().id, 51);

    let oldest = store.view(LogFilter::All, LogSort::OldestFirst);
    assert_eq!(oldest.first().unwrap().id, 51);
}

#[test]
fn filters_partition_the_retained_set() {
    let store = filled(10);
    let suspicious = store.view(LogFilter::SuspiciousOnly, LogSort::OldestFirst);
    let normal = store.view(LogFilter::NormalOnly, LogSort::OldestFirst);

    assert_eq!(suspicious.len() + normal.len(), store.len());
    assert!(suspicious.iter().all(|e| e.suspicious));
    assert!(normal.iter().all(|e| !e.suspicious));
}

#[test]
fn views_do_not_mutate_the_store() {
    let store = filled(10);
    let _ = store.view(LogFilter::SuspiciousOnly, LogSort::ByConfidenceDesc);
    let _ = store.view(LogFilter::All, LogSort::NewestFirst);
    assert_eq!(store.len(), 10);
    assert_eq!(
        store.view(LogFilter::All, LogSort::OldestFirst).first().unwrap().id,
        1
    );
}

#[test]
fn confidence_sort_is_stable_on_ties() {
    let mut store = EventLogStore::new();
    store.append("t0".into(), "first".into(), 0.8, false);
    store.append("t1".into(), "second".into(), 0.8, false);
    store.append("t2".into(), "highest".into(), 0.9, false);

    let view = store.view(LogFilter::All, LogSort::ByConfidenceDesc);
    assert_eq!(view[0].subject, "highest");
    // Equal confidences keep insertion order.
    assert_eq!(view[1].subject, "first");
    assert_eq!(view[2].subject, "second");
}

#[test]
fn clear_is_idempotent_and_ids_keep_increasing() {
    let mut store = filled(5);
    store.clear();
    assert!(store.is_empty());
    store.clear();
    assert!(store.is_empty());

    let id = store.append("t".into(), "after-clear".into(), 0.5, false);
    assert_eq!(id, 6, "ids stay unique across clears");
}

#[test]
fn stats_cover_the_retained_set() {
    let store = filled(10);
    let stats = store.stats();
    assert_eq!(stats.total, 10);
    assert_eq!(stats.suspicious, 5);
    assert_eq!(stats.normal, 5);
    assert!((stats.alert_rate - 0.5).abs() < f32::EPSILON);

    assert_eq!(EventLogStore::new().stats().alert_rate, 0.0);
}

#[test]
fn export_is_deterministic_and_verifiable() {
    let store = filled(25);
    let a = store.export();
    let b = store.export();

    assert_eq!(a.render().unwrap(), b.render().unwrap());
    assert!(verify_document(&a));

    // Entries appear in retained (insertion) order, not view order.
    let ids: Vec<u64> = a.entries.iter().map(|e| e.id).collect();
    let mut sorted = ids.clone();
    sorted.sort_unstable();
    assert_eq!(ids, sorted);
}

#[test]
fn export_covers_full_set_not_a_view() {
    let store = filled(10);
    let doc = store.export();
    assert_eq!(doc.entries.len(), 10);
    assert!(doc.entries.iter().any(|e| e.suspicious));
    assert!(doc.entries.iter().any(|e| !e.suspicious));
}

#[test]
fn tampered_documents_fail_verification() {
    let store = filled(5);
    let mut doc = store.export();
    doc.entries[0].subject = "doctored".into();
    assert!(!verify_document(&doc));

    let empty = export_document(Vec::new());
    assert!(verify_document(&empty));
}

#[test]
fn export_round_trips_through_disk() {
    let store = filled(12);
    let doc = store.export();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("detection-logs.json");
    std::fs::write(&path, doc.render().unwrap()).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let back: sentinel::logstore::ExportDocument = serde_json::from_str(&text).unwrap();
    assert!(verify_document(&back));
    assert_eq!(back.entries.len(), 12);
}
