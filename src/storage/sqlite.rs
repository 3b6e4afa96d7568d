use rusqlite::{Connection, Transaction, params_from_iter};
use std::path::{Path, PathBuf};

use super::{Dialect, Row, SqlValue, Storage};
use crate::errors::StorageError;

/// Embedded backend. Opens the database file on every call, like the client/server
/// backend opens a session, so timings include connection setup on both.
#[derive(Debug, Clone)]
pub struct SqliteStorage {
    path: PathBuf,
}

impl SqliteStorage {
    /// Open (creating if needed) the database file and check it is usable.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let storage = Self { path: path.as_ref().to_path_buf() };
        storage.connect()?;
        Ok(storage)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn connect(&self) -> Result<Connection, StorageError> {
        Connection::open(&self.path).map_err(|e| StorageError::ConnectionFailed(e.to_string()))
    }
}

fn failed(e: rusqlite::Error) -> StorageError {
    StorageError::StatementFailed(e.to_string())
}

fn finish<T>(tx: Transaction<'_>, statement: &str, result: rusqlite::Result<T>) -> Result<T, StorageError> {
    match result {
        Ok(v) => {
            tx.commit().map_err(failed)?;
            Ok(v)
        }
        Err(e) => {
            log::error!("sqlite: rolling back after failed statement: {e}; sql={}", statement.trim());
            let _ = tx.rollback();
            Err(failed(e))
        }
    }
}

fn insert_all(tx: &Transaction<'_>, statement: &str, rows: &[Vec<SqlValue>]) -> rusqlite::Result<usize> {
    let mut stmt = tx.prepare(statement)?;
    let mut affected = 0;
    for row in rows {
        affected += stmt.execute(params_from_iter(row.iter()))?;
    }
    Ok(affected)
}

impl Storage for SqliteStorage {
    fn dialect(&self) -> Dialect {
        Dialect::Sqlite
    }

    fn execute(&self, statement: &str, params: Option<&[SqlValue]>) -> Result<u64, StorageError> {
        let mut conn = self.connect()?;
        let tx = conn.transaction().map_err(failed)?;
        let result = tx.execute(statement, params_from_iter(params.unwrap_or_default().iter()));
        let n = finish(tx, statement, result)?;
        log::debug!("sqlite: executed {}", statement.trim());
        Ok(n as u64)
    }

    fn execute_many(&self, statement: &str, rows: &[Vec<SqlValue>]) -> Result<u64, StorageError> {
        let mut conn = self.connect()?;
        let tx = conn.transaction().map_err(failed)?;
        let result = insert_all(&tx, statement, rows);
        let n = finish(tx, statement, result)?;
        log::debug!("sqlite: executed {} x{}", statement.trim(), rows.len());
        Ok(n as u64)
    }

    fn execute_fetch(&self, statement: &str, params: &[SqlValue]) -> Result<Vec<Row>, StorageError> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(statement).map_err(failed)?;
        let width = stmt.column_count();
        let mapped = stmt
            .query_map(params_from_iter(params.iter()), |row| {
                (0..width).map(|i| row.get_ref(i).map(SqlValue::from)).collect::<rusqlite::Result<Row>>()
            })
            .map_err(failed)?;
        let rows = mapped.collect::<rusqlite::Result<Vec<Row>>>().map_err(failed)?;
        Ok(rows)
    }
}
