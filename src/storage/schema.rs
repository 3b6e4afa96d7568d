//! DDL and fixed statements for the `employees` table.

use serde::Serialize;

use super::{Dialect, SqlValue, Storage};
use crate::errors::StorageError;
use crate::types::EmployeeRecord;

pub const TABLE: &str = "employees";
pub const COLUMNS: &str = "id, full_name, birth_date, gender";

/// A named composite index on the employees table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IndexDescriptor {
    pub name: &'static str,
    pub table: &'static str,
    pub columns: &'static [&'static str],
}

impl IndexDescriptor {
    pub fn create_sql(&self) -> String {
        format!("CREATE INDEX {} ON {} ({})", self.name, self.table, self.columns.join(", "))
    }

    pub fn drop_sql(&self) -> String {
        format!("DROP INDEX IF EXISTS {}", self.name)
    }
}

pub const GENDER_FULLNAME_INDEX: IndexDescriptor = IndexDescriptor {
    name: "idx_gender_fullname",
    table: TABLE,
    columns: &["gender", "full_name"],
};

pub fn create_table_sql(dialect: Dialect) -> String {
    format!(
        "CREATE TABLE IF NOT EXISTS {TABLE} (
            {},
            full_name VARCHAR(100) NOT NULL,
            birth_date DATE NOT NULL,
            gender VARCHAR(10) NOT NULL
        )",
        dialect.id_column()
    )
}

pub fn insert_sql(dialect: Dialect) -> String {
    format!("INSERT INTO {TABLE} (full_name, birth_date, gender) VALUES ({})", dialect.placeholders(3))
}

pub fn select_all_sql() -> String {
    format!("SELECT {COLUMNS} FROM {TABLE} ORDER BY full_name")
}

pub fn count_sql() -> String {
    format!("SELECT COUNT(*) FROM {TABLE}")
}

/// The benchmark probe: male employees whose full name matches a LIKE pattern.
pub fn probe_sql(dialect: Dialect) -> String {
    format!(
        "SELECT {COLUMNS} FROM {TABLE} WHERE gender = {} AND full_name LIKE {} ORDER BY full_name",
        dialect.placeholder(1),
        dialect.placeholder(2)
    )
}

pub fn index_exists_sql(dialect: Dialect) -> String {
    match dialect {
        Dialect::Postgres => "SELECT COUNT(*) FROM pg_indexes WHERE indexname = $1".to_string(),
        Dialect::Sqlite => {
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'index' AND name = ?1".to_string()
        }
    }
}

/// Parameter tuple in `insert_sql` column order.
pub fn insert_params(record: &EmployeeRecord) -> Vec<SqlValue> {
    vec![
        SqlValue::from(record.full_name().as_str()),
        SqlValue::Date(record.birth_date()),
        SqlValue::from(record.gender().as_str()),
    ]
}

pub fn create_table<S: Storage + ?Sized>(storage: &S) -> Result<(), StorageError> {
    storage.execute(&create_table_sql(storage.dialect()), None)?;
    log::info!("table {TABLE} ready");
    Ok(())
}

/// Deletes every row; returns how many were removed.
pub fn clear_table<S: Storage + ?Sized>(storage: &S) -> Result<u64, StorageError> {
    let n = storage.execute(&format!("DELETE FROM {TABLE}"), None)?;
    log::info!("table {TABLE} cleared ({n} rows)");
    Ok(n)
}

pub fn index_exists<S: Storage + ?Sized>(
    storage: &S,
    index: &IndexDescriptor,
) -> Result<bool, StorageError> {
    let rows = storage.execute_fetch(&index_exists_sql(storage.dialect()), &[SqlValue::from(index.name)])?;
    Ok(rows.first().and_then(|r| r.first()).and_then(SqlValue::as_i64).unwrap_or(0) > 0)
}
