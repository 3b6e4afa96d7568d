//! The storage collaborator: executes statements against the `employees` table.
//!
//! Every call acquires a connection, runs inside one transaction, commits on success
//! or rolls back on any error, and releases the connection before returning. Callers
//! never hold a connection across calls.

mod config;
mod dialect;
#[cfg(feature = "postgres")]
mod pgsql;
pub mod schema;
mod sqlite;
mod value;

pub use config::{Backend, ConnectionConfig};
pub use dialect::Dialect;
#[cfg(feature = "postgres")]
pub use pgsql::PostgresStorage;
pub use schema::{GENDER_FULLNAME_INDEX, IndexDescriptor};
pub use sqlite::SqliteStorage;
pub use value::{Row, SqlValue};

use crate::errors::StorageError;

pub trait Storage {
    fn dialect(&self) -> Dialect;

    /// Run one statement, optionally with a single parameter tuple. Returns rows affected.
    fn execute(&self, statement: &str, params: Option<&[SqlValue]>) -> Result<u64, StorageError>;

    /// Run one statement once per parameter tuple, all inside a single transaction.
    fn execute_many(&self, statement: &str, rows: &[Vec<SqlValue>]) -> Result<u64, StorageError>;

    fn execute_fetch(&self, statement: &str, params: &[SqlValue]) -> Result<Vec<Row>, StorageError>;
}

impl<S: Storage + ?Sized> Storage for Box<S> {
    fn dialect(&self) -> Dialect {
        (**self).dialect()
    }

    fn execute(&self, statement: &str, params: Option<&[SqlValue]>) -> Result<u64, StorageError> {
        (**self).execute(statement, params)
    }

    fn execute_many(&self, statement: &str, rows: &[Vec<SqlValue>]) -> Result<u64, StorageError> {
        (**self).execute_many(statement, rows)
    }

    fn execute_fetch(&self, statement: &str, params: &[SqlValue]) -> Result<Vec<Row>, StorageError> {
        (**self).execute_fetch(statement, params)
    }
}

/// Build the backend selected by `cfg`.
pub fn open(cfg: &ConnectionConfig) -> Result<Box<dyn Storage>, StorageError> {
    log::info!("storage: {}", cfg.target());
    match cfg.backend {
        Backend::Sqlite => Ok(Box::new(SqliteStorage::open(&cfg.sqlite_path)?)),
        #[cfg(feature = "postgres")]
        Backend::Postgres => Ok(Box::new(PostgresStorage::new(cfg))),
        #[cfg(not(feature = "postgres"))]
        Backend::Postgres => Err(StorageError::BackendUnavailable("postgres".to_string())),
    }
}
