use postgres::{Client, Config, NoTls};

use super::value::pg;
use super::{ConnectionConfig, Dialect, Row, SqlValue, Storage};
use crate::errors::StorageError;

/// PostgreSQL backend. Every call opens its own session and closes it when the
/// call returns.
pub struct PostgresStorage {
    config: Config,
    target: String,
}

impl PostgresStorage {
    pub fn new(cfg: &ConnectionConfig) -> Self {
        let mut config = Config::new();
        config.host(&cfg.host).port(cfg.port).user(&cfg.user).dbname(&cfg.dbname);
        if !cfg.password.is_empty() {
            config.password(cfg.password.as_bytes());
        }
        Self { config, target: cfg.target() }
    }

    fn connect(&self) -> Result<Client, StorageError> {
        let client = self
            .config
            .connect(NoTls)
            .map_err(|e| StorageError::ConnectionFailed(format!("{}: {e}", self.target)))?;
        log::debug!("postgres: connected to {}", self.target);
        Ok(client)
    }
}

fn failed(e: postgres::Error) -> StorageError {
    StorageError::StatementFailed(e.to_string())
}

impl Storage for PostgresStorage {
    fn dialect(&self) -> Dialect {
        Dialect::Postgres
    }

    fn execute(&self, statement: &str, params: Option<&[SqlValue]>) -> Result<u64, StorageError> {
        let mut client = self.connect()?;
        let mut tx = client.transaction().map_err(failed)?;
        let result = match params {
            Some(values) => {
                let boxed = pg::to_params(values);
                tx.execute(statement, &pg::as_refs(&boxed))
            }
            None => tx.batch_execute(statement).map(|()| 0),
        };
        match result {
            Ok(n) => {
                tx.commit().map_err(failed)?;
                Ok(n)
            }
            Err(e) => {
                log::error!("postgres: rolling back after failed statement: {e}; sql={}", statement.trim());
                let _ = tx.rollback();
                Err(failed(e))
            }
        }
    }

    fn execute_many(&self, statement: &str, rows: &[Vec<SqlValue>]) -> Result<u64, StorageError> {
        let mut client = self.connect()?;
        let mut tx = client.transaction().map_err(failed)?;
        let result = (|| {
            let prepared = tx.prepare(statement)?;
            let mut affected = 0;
            for row in rows {
                let boxed = pg::to_params(row);
                affected += tx.execute(&prepared, &pg::as_refs(&boxed))?;
            }
            Ok::<u64, postgres::Error>(affected)
        })();
        match result {
            Ok(n) => {
                tx.commit().map_err(failed)?;
                Ok(n)
            }
            Err(e) => {
                log::error!("postgres: rolling back batch of {}: {e}", rows.len());
                let _ = tx.rollback();
                Err(failed(e))
            }
        }
    }

    fn execute_fetch(&self, statement: &str, params: &[SqlValue]) -> Result<Vec<Row>, StorageError> {
        let mut client = self.connect()?;
        let boxed = pg::to_params(params);
        let rows = client.query(statement, &pg::as_refs(&boxed)).map_err(failed)?;
        rows.iter().map(pg::from_row).collect::<Result<Vec<Row>, _>>().map_err(failed)
    }
}
