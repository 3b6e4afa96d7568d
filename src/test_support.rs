#![cfg(test)]

// Test double for the storage trait: records every call, fails on demand.
use std::cell::RefCell;
use std::collections::{HashSet, VecDeque};

use crate::errors::StorageError;
use crate::storage::{Dialect, Row, SqlValue, Storage};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Execute(String),
    Many { statement: String, rows: Vec<Vec<SqlValue>> },
    Fetch { statement: String, params: Vec<SqlValue> },
}

#[derive(Default)]
pub struct RecordingStorage {
    pub calls: RefCell<Vec<Call>>,
    /// 0-based `execute_many` call numbers that fail.
    pub fail_batches: HashSet<usize>,
    /// `execute` fails when the statement contains this text.
    pub fail_execute_containing: Option<&'static str>,
    pub fail_fetch: bool,
    pub fetch_results: RefCell<VecDeque<Vec<Row>>>,
    pub many_calls: RefCell<usize>,
}

impl RecordingStorage {
    pub fn failing_batches(batches: impl IntoIterator<Item = usize>) -> Self {
        Self { fail_batches: batches.into_iter().collect(), ..Self::default() }
    }

    pub fn with_fetch_results(results: impl IntoIterator<Item = Vec<Row>>) -> Self {
        Self { fetch_results: RefCell::new(results.into_iter().collect()), ..Self::default() }
    }

    pub fn batch_sizes(&self) -> Vec<usize> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                Call::Many { rows, .. } => Some(rows.len()),
                _ => None,
            })
            .collect()
    }

    pub fn executed(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                Call::Execute(s) => Some(s.clone()),
                _ => None,
            })
            .collect()
    }
}

impl Storage for RecordingStorage {
    fn dialect(&self) -> Dialect {
        Dialect::Sqlite
    }

    fn execute(&self, statement: &str, _params: Option<&[SqlValue]>) -> Result<u64, StorageError> {
        self.calls.borrow_mut().push(Call::Execute(statement.to_string()));
        match self.fail_execute_containing {
            Some(s) if statement.contains(s) => Err(StorageError::StatementFailed(format!("injected: {s}"))),
            _ => Ok(0),
        }
    }

    fn execute_many(&self, statement: &str, rows: &[Vec<SqlValue>]) -> Result<u64, StorageError> {
        let n = {
            let mut c = self.many_calls.borrow_mut();
            *c += 1;
            *c - 1
        };
        self.calls.borrow_mut().push(Call::Many { statement: statement.to_string(), rows: rows.to_vec() });
        if self.fail_batches.contains(&n) {
            return Err(StorageError::StatementFailed(format!("injected failure in batch {n}")));
        }
        Ok(rows.len() as u64)
    }

    fn execute_fetch(&self, statement: &str, params: &[SqlValue]) -> Result<Vec<Row>, StorageError> {
        self.calls
            .borrow_mut()
            .push(Call::Fetch { statement: statement.to_string(), params: params.to_vec() });
        if self.fail_fetch {
            return Err(StorageError::ConnectionFailed("injected".into()));
        }
        Ok(self.fetch_results.borrow_mut().pop_front().unwrap_or_default())
    }
}
