// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::issue::Issue;
use crate::resource::ResourceStatus;
use crate::store::MemoryStore;

fn storage() -> Storage {
    Storage::new(Arc::new(MemoryStore::new()))
}

fn id(s: &str) -> ResourceId {
    s.parse().unwrap()
}

fn record(n: u64) -> NotificationRecord {
    let issue = Issue::new(n, format!("Issue {n}"), format!("https://x/{n}"), vec![]);
    NotificationRecord::new("octo/demo", &issue, Utc::now())
}

#[test]
fn empty_store_has_defaults() {
    let s = storage();
    assert!(s.repositories().unwrap().is_empty());
    assert_eq!(s.settings().unwrap(), Settings::default());
    assert!(!s.has_settings().unwrap());
    assert!(s.history(None).unwrap().is_empty());
    assert_eq!(s.stats().unwrap(), RunStats::default());
}

#[test]
fn add_repository_persists_fresh_entry() {
    let s = storage();
    let added = s.add_repository(&id("octo/demo")).unwrap();
    assert_eq!(added.full_name, "octo/demo");
    assert!(added.last_watermark.is_none());

    let all = s.repositories().unwrap();
    assert_eq!(all, vec![added]);
}

#[test]
fn add_repository_rejects_duplicate() {
    let s = storage();
    s.add_repository(&id("octo/demo")).unwrap();
    let err = s.add_repository(&id("octo/demo")).unwrap_err();
    assert!(matches!(err, Error::DuplicateResource(name) if name == "octo/demo"));
    assert_eq!(s.repositories().unwrap().len(), 1);
}

#[test]
fn remove_repository_deletes_entry() {
    let s = storage();
    s.add_repository(&id("octo/demo")).unwrap();
    s.add_repository(&id("octo/other")).unwrap();

    assert!(s.remove_repository("octo/demo").unwrap());
    assert!(!s.remove_repository("octo/demo").unwrap());

    let names: Vec<_> = s
        .repositories()
        .unwrap()
        .into_iter()
        .map(|r| r.full_name)
        .collect();
    assert_eq!(names, vec!["octo/other"]);
}

#[test]
fn update_repository_applies_change() {
    let s = storage();
    s.add_repository(&id("octo/demo")).unwrap();
    let updated = s
        .update_repository("octo/demo", |r| {
            r.status = ResourceStatus::Checking;
            r.last_watermark = Some(5);
        })
        .unwrap()
        .unwrap();
    assert_eq!(updated.status, ResourceStatus::Checking);
    assert_eq!(
        s.repository("octo/demo").unwrap().unwrap().last_watermark,
        Some(5)
    );
}

#[test]
fn update_missing_repository_is_noop() {
    let s = storage();
    let result = s
        .update_repository("octo/gone", |r| r.last_watermark = Some(1))
        .unwrap();
    assert!(result.is_none());
    assert!(s.repositories().unwrap().is_empty());
}

#[test]
fn update_settings_persists() {
    let s = storage();
    s.update_settings(|st| st.check_interval_minutes = 30)
        .unwrap();
    assert!(s.has_settings().unwrap());
    assert_eq!(s.settings().unwrap().check_interval_minutes, 30);
}

#[test]
fn history_keeps_hundred_newest_after_150_insertions() {
    let s = storage();
    for n in 1..=150 {
        s.add_notification(record(n)).unwrap();
    }
    let history = s.history(None).unwrap();
    assert_eq!(history.len(), 100);
    let numbers: Vec<u64> = history.iter().map(|r| r.issue_number).collect();
    let expected: Vec<u64> = (51..=150).rev().collect();
    assert_eq!(numbers, expected);
}

#[test]
fn history_limit_truncates() {
    let s = storage();
    for n in 1..=5 {
        s.add_notification(record(n)).unwrap();
    }
    let recent = s.history(Some(2)).unwrap();
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].issue_number, 5);
}

#[test]
fn clear_history_empties_log() {
    let s = storage();
    s.add_notification(record(1)).unwrap();
    s.clear_history().unwrap();
    assert!(s.history(None).unwrap().is_empty());
}

#[test]
fn update_stats_accumulates() {
    let s = storage();
    let now = Utc::now();
    s.update_stats(|st| st.record_pass(3, now)).unwrap();
    let stats = s.update_stats(|st| st.record_pass(1, now)).unwrap();
    assert_eq!(stats.total_issues_found, 4);
    assert_eq!(stats.total_checks, 2);
}

#[test]
fn clear_all_keeps_settings() {
    let s = storage();
    s.add_repository(&id("octo/demo")).unwrap();
    s.add_notification(record(1)).unwrap();
    s.update_stats(|st| st.record_pass(1, Utc::now())).unwrap();
    s.update_settings(|st| st.theme = "light".into()).unwrap();

    s.clear_all().unwrap();

    assert!(s.repositories().unwrap().is_empty());
    assert!(s.history(None).unwrap().is_empty());
    assert_eq!(s.stats().unwrap(), RunStats::default());
    assert_eq!(s.settings().unwrap().theme, "light");
}

#[test]
fn wrong_shape_is_corrupted_data() {
    let store = Arc::new(MemoryStore::new());
    store
        .set(
            Partition::Synced,
            REPOSITORIES_KEY,
            serde_json::json!({"not": "a list"}),
        )
        .unwrap();
    let s = Storage::new(store);
    assert!(matches!(
        s.repositories().unwrap_err(),
        Error::CorruptedData(_)
    ));
}
