mod common;

use common::sqlite_with_table;
use staffdb::errors::StorageError;
use staffdb::storage::{Backend, ConnectionConfig, GENDER_FULLNAME_INDEX, SqliteStorage, Storage, schema};
use staffdb::{add_employee, api, validate, view};
use tempfile::tempdir;

#[test]
fn add_list_clear() {
    let dir = tempdir().unwrap();
    let storage = sqlite_with_table(dir.path());
    for (name, date, gender) in [
        ("petrova anna ivanovna", "1990-12-01", "female"),
        ("Ivanov Petr Sergeevich", "2009-07-12", "Male"),
    ] {
        add_employee(&storage, &validate(Some(name), Some(date), Some(gender)).unwrap()).unwrap();
    }
    let all = view::list_all(&storage).unwrap();
    let names: Vec<_> = all.iter().map(|e| e.record.full_name().to_string()).collect();
    assert_eq!(names, ["Ivanov Petr Sergeevich", "Petrova Anna Ivanovna"]);
    assert!(all[0].id != all[1].id);
    assert_eq!(view::count_employees(&storage).unwrap(), 2);

    assert_eq!(schema::clear_table(&storage).unwrap(), 2);
    assert!(view::list_all(&storage).unwrap().is_empty());
}

#[test]
fn create_table_is_idempotent() {
    let dir = tempdir().unwrap();
    let storage = sqlite_with_table(dir.path());
    schema::create_table(&storage).unwrap();
    assert_eq!(view::count_employees(&storage).unwrap(), 0);
}

#[test]
fn open_by_config() {
    let dir = tempdir().unwrap();
    let cfg = ConnectionConfig::sqlite(dir.path().join("via_config.sqlite3"));
    assert_eq!(cfg.backend, Backend::Sqlite);
    let store = staffdb::init(&cfg).unwrap();
    assert_eq!(store.dialect().name(), "sqlite");
    assert_eq!(view::count_employees(&store).unwrap(), 0);
}

#[test]
fn unreachable_sqlite_path() {
    let dir = tempdir().unwrap();
    let err = SqliteStorage::open(dir.path().join("no/such/dir/db.sqlite3")).unwrap_err();
    assert!(matches!(err, StorageError::ConnectionFailed(_)));
}

#[cfg(not(feature = "postgres"))]
#[test]
fn postgres_needs_the_feature() {
    let cfg = ConnectionConfig { backend: Backend::Postgres, ..ConnectionConfig::default() };
    assert!(matches!(staffdb::storage::open(&cfg), Err(StorageError::BackendUnavailable(_))));
}

#[test]
fn info_report() {
    let dir = tempdir().unwrap();
    let storage = sqlite_with_table(dir.path());
    let r = validate(Some("Fedorov Ivan Petrovich"), Some("1970-01-01"), Some("Male")).unwrap();
    add_employee(&storage, &r).unwrap();
    let report = api::info(&storage).unwrap();
    assert_eq!(report.backend, "sqlite");
    assert_eq!(report.employees, 1);
    assert!(!report.indexes[0].present);
    assert_eq!(report.package_name, "staffdb");
    storage.execute(&GENDER_FULLNAME_INDEX.create_sql(), None).unwrap();
    assert!(api::info(&storage).unwrap().indexes[0].present);
}
