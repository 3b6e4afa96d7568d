#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::path::Path;

use staffdb::errors::StorageError;
use staffdb::storage::{Dialect, Row, SqlValue, SqliteStorage, Storage, schema};

/// Counts batches without keeping the rows; fails the listed batch numbers.
#[derive(Default)]
pub struct CountingStorage {
    pub batch_sizes: RefCell<Vec<usize>>,
    pub fail_batches: HashSet<usize>,
    pub first_names: RefCell<Vec<String>>,
    calls: Cell<usize>,
}

impl CountingStorage {
    pub fn failing(batches: impl IntoIterator<Item = usize>) -> Self {
        Self { fail_batches: batches.into_iter().collect(), ..Self::default() }
    }
}

impl Storage for CountingStorage {
    fn dialect(&self) -> Dialect {
        Dialect::Postgres
    }

    fn execute(&self, _statement: &str, _params: Option<&[SqlValue]>) -> Result<u64, StorageError> {
        Ok(0)
    }

    fn execute_many(&self, _statement: &str, rows: &[Vec<SqlValue>]) -> Result<u64, StorageError> {
        let n = self.calls.get();
        self.calls.set(n + 1);
        self.batch_sizes.borrow_mut().push(rows.len());
        if let Some(name) = rows.first().and_then(|r| r.first()).and_then(SqlValue::as_str) {
            self.first_names.borrow_mut().push(name.to_string());
        }
        if self.fail_batches.contains(&n) {
            return Err(StorageError::StatementFailed(format!("batch {n} rejected")));
        }
        Ok(rows.len() as u64)
    }

    fn execute_fetch(&self, _statement: &str, _params: &[SqlValue]) -> Result<Vec<Row>, StorageError> {
        Ok(Vec::new())
    }
}

/// Wraps a real backend and fails every `execute` whose text contains `needle`.
pub struct FailingDdl<S> {
    pub inner: S,
    pub needle: &'static str,
}

impl<S: Storage> Storage for FailingDdl<S> {
    fn dialect(&self) -> Dialect {
        self.inner.dialect()
    }

    fn execute(&self, statement: &str, params: Option<&[SqlValue]>) -> Result<u64, StorageError> {
        if statement.contains(self.needle) {
            return Err(StorageError::StatementFailed(format!("refused: {}", self.needle)));
        }
        self.inner.execute(statement, params)
    }

    fn execute_many(&self, statement: &str, rows: &[Vec<SqlValue>]) -> Result<u64, StorageError> {
        self.inner.execute_many(statement, rows)
    }

    fn execute_fetch(&self, statement: &str, params: &[SqlValue]) -> Result<Vec<Row>, StorageError> {
        self.inner.execute_fetch(statement, params)
    }
}

/// Fresh SQLite database with the employees table.
pub fn sqlite_with_table(dir: &Path) -> SqliteStorage {
    let storage = SqliteStorage::open(dir.join("staff.sqlite3")).unwrap();
    schema::create_table(&storage).unwrap();
    storage
}
