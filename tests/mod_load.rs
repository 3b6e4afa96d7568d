mod common;

use common::{CountingStorage, sqlite_with_table};
use staffdb::errors::LoadError;
use staffdb::generate::{GenerationPlan, generate};
use staffdb::loader::{BatchFailurePolicy, LoadOptions, load};
use staffdb::storage::{Dialect, SqlValue, Storage, schema};
use staffdb::view;
use tempfile::tempdir;

#[test]
fn quarter_million_in_three_chunks() {
    let storage = CountingStorage::default();
    let records: Vec<_> = generate(GenerationPlan::new(250_000, 0).unwrap()).collect();
    let firsts = [0, 100_000, 200_000].map(|i| records[i].full_name().to_string());
    let opts = LoadOptions { progress_every: None, ..LoadOptions::default() };
    let report = load(&storage, records, &opts, |_| {}).unwrap();
    assert_eq!(*storage.batch_sizes.borrow(), vec![100_000, 100_000, 50_000]);
    assert_eq!(*storage.first_names.borrow(), firsts.to_vec());
    assert_eq!(report.loaded, 250_000);
    assert!(report.is_complete());
}

#[test]
fn failed_chunk_is_skipped_by_default() {
    let storage = CountingStorage::failing([0]);
    let opts = LoadOptions { batch_size: 4, ..LoadOptions::default() };
    let report = load(&storage, generate(GenerationPlan::new(10, 0).unwrap()), &opts, |_| {}).unwrap();
    assert_eq!(*storage.batch_sizes.borrow(), vec![4, 4, 2]);
    assert_eq!(report.loaded, 6);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].offset, 0);
}

#[test]
fn failed_chunk_rolls_back_as_a_whole() {
    let dir = tempdir().unwrap();
    let storage = sqlite_with_table(dir.path());
    let opts = LoadOptions { batch_size: 3, progress_every: None, ..LoadOptions::default() };
    load(&storage, generate(GenerationPlan::new(3, 0).unwrap()), &opts, |_| {}).unwrap();

    // second tuple violates NOT NULL; the first must not survive either
    let rows = vec![
        vec![SqlValue::from("Ivanov Ivan Ivanovich"), SqlValue::from("2000-01-01"), SqlValue::from("Male")],
        vec![SqlValue::Null, SqlValue::from("2000-01-01"), SqlValue::from("Male")],
    ];
    let insert = schema::insert_sql(Dialect::Sqlite);
    assert!(storage.execute_many(&insert, &rows).is_err());
    assert_eq!(view::count_employees(&storage).unwrap(), 3);
}

#[test]
fn abort_stops_after_first_failed_chunk() {
    let storage = CountingStorage::failing([1]);
    let opts = LoadOptions { batch_size: 3, failure_policy: BatchFailurePolicy::Abort, progress_every: None };
    let err = load(&storage, generate(GenerationPlan::new(9, 0).unwrap()), &opts, |_| {}).unwrap_err();
    assert!(matches!(err, LoadError::Aborted { batch_index: 1, .. }));
    assert_eq!(*storage.batch_sizes.borrow(), vec![3, 3]);
}

#[test]
fn sqlite_round_trip_keeps_fields() {
    let dir = tempdir().unwrap();
    let storage = sqlite_with_table(dir.path());
    let records: Vec<_> = generate(GenerationPlan::new(50, 5).unwrap()).collect();
    let opts = LoadOptions { batch_size: 16, ..LoadOptions::default() };
    let mut progress = Vec::new();
    let report = load(&storage, records.clone(), &opts, |p| progress.push(p.loaded)).unwrap();
    assert_eq!(report.loaded, 50);
    assert_eq!(progress, vec![16, 32, 48, 50]);

    let mut stored: Vec<_> = view::list_all(&storage).unwrap().into_iter().map(|e| e.record).collect();
    let mut expected = records;
    stored.sort_by(|a, b| (a.full_name(), a.birth_date()).cmp(&(b.full_name(), b.birth_date())));
    expected.sort_by(|a, b| (a.full_name(), a.birth_date()).cmp(&(b.full_name(), b.birth_date())));
    assert_eq!(stored, expected);
}
