use serde::{Serialize, Serializer};
use std::time::Duration;

use super::timing::{millis, timed};
use crate::errors::{BenchmarkError, StorageError};
use crate::generate::names::MINORITY_LETTER;
use crate::storage::{GENDER_FULLNAME_INDEX, IndexDescriptor, SqlValue, Storage, schema};
use crate::types::{EmployeeRecord, Gender};

/// Steps of one comparison, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BenchPhase {
    DropIndex,
    QueryWithoutIndex,
    CreateIndex,
    QueryWithIndex,
    /// Only when `keep_index` is off.
    CleanupIndex,
    Report,
}

/// Male employees whose surname starts with one ASCII letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetPredicate {
    letter: char,
}

impl TargetPredicate {
    pub fn new(letter: char) -> Result<Self, BenchmarkError> {
        if !letter.is_ascii_alphabetic() {
            return Err(BenchmarkError::InvalidTarget(letter));
        }
        Ok(Self { letter: letter.to_ascii_uppercase() })
    }

    pub fn letter(&self) -> char {
        self.letter
    }

    pub fn gender(&self) -> Gender {
        Gender::Male
    }

    pub fn like_pattern(&self) -> String {
        format!("{}%", self.letter)
    }

    /// Probe parameters in placeholder order.
    pub fn params(&self) -> Vec<SqlValue> {
        vec![SqlValue::from(self.gender().as_str()), SqlValue::from(self.like_pattern())]
    }

    pub fn matches(&self, record: &EmployeeRecord) -> bool {
        record.is_minority(self.letter)
    }
}

impl Default for TargetPredicate {
    fn default() -> Self {
        Self { letter: MINORITY_LETTER }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct BenchmarkOptions {
    pub index: IndexDescriptor,
    /// Leave the index in place after the second run.
    pub keep_index: bool,
}

impl Default for BenchmarkOptions {
    fn default() -> Self {
        Self { index: GENDER_FULLNAME_INDEX, keep_index: true }
    }
}

fn as_millis<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64(millis(*d))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkResult {
    pub query_signature: String,
    pub row_count: usize,
    #[serde(rename = "elapsed_without_index_ms", serialize_with = "as_millis")]
    pub elapsed_without_index: Duration,
    #[serde(rename = "elapsed_with_index_ms", serialize_with = "as_millis")]
    pub elapsed_with_index: Duration,
}

impl BenchmarkResult {
    /// How many times faster the indexed run was; `None` if it measured zero.
    pub fn speedup(&self) -> Option<f64> {
        let with = self.elapsed_with_index.as_secs_f64();
        (with > 0.0).then(|| self.elapsed_without_index.as_secs_f64() / with)
    }
}

/// Times the probe query without and then with the composite index.
///
/// Nothing else may write to the table during a run; concurrent writers make the two
/// timings incomparable.
pub struct IndexBenchmark<'a, S: Storage + ?Sized> {
    storage: &'a S,
    options: BenchmarkOptions,
}

impl<'a, S: Storage + ?Sized> IndexBenchmark<'a, S> {
    pub fn new(storage: &'a S) -> Self {
        Self::with_options(storage, BenchmarkOptions::default())
    }

    pub fn with_options(storage: &'a S, options: BenchmarkOptions) -> Self {
        Self { storage, options }
    }

    pub fn options(&self) -> &BenchmarkOptions {
        &self.options
    }

    /// Drop the index, run the probe, create the index, run the identical probe again.
    ///
    /// # Errors
    /// `IndexDropFailed`/`IndexCreateFailed` for DDL failures, `Query` when a probe fails,
    /// `ResultMismatch` when the two runs return different row counts. No timings are
    /// returned on any error.
    pub fn compare(&self, target: &TargetPredicate) -> Result<BenchmarkResult, BenchmarkError> {
        let index = self.options.index;
        let sql = schema::probe_sql(self.storage.dialect());
        let params = target.params();
        let query_signature = format!("{sql} [{}, {}]", target.gender(), target.like_pattern());
        log::info!("benchmark: index {} for target '{}'", index.name, target.letter());

        self.ddl(BenchPhase::DropIndex, &index.drop_sql())
            .map_err(BenchmarkError::IndexDropFailed)?;
        let (without_rows, without) = self.probe(BenchPhase::QueryWithoutIndex, &sql, &params)?;
        self.ddl(BenchPhase::CreateIndex, &index.create_sql())
            .map_err(BenchmarkError::IndexCreateFailed)?;
        let (with_rows, with) = self.probe(BenchPhase::QueryWithIndex, &sql, &params)?;
        if !self.options.keep_index {
            self.ddl(BenchPhase::CleanupIndex, &index.drop_sql())
                .map_err(BenchmarkError::IndexDropFailed)?;
        }

        if without_rows != with_rows {
            crate::bench_event!({
                "phase": BenchPhase::Report,
                "status": "mismatch",
                "rows_without_index": without_rows,
                "rows_with_index": with_rows,
            });
            return Err(BenchmarkError::ResultMismatch { without: without_rows, with: with_rows });
        }

        let result = BenchmarkResult {
            query_signature,
            row_count: with_rows,
            elapsed_without_index: without,
            elapsed_with_index: with,
        };
        crate::bench_event!({
            "phase": BenchPhase::Report,
            "status": "ok",
            "result": &result,
            "speedup": result.speedup(),
        });
        log::info!(
            "benchmark: {} rows, {:.3} ms without index, {:.3} ms with index",
            result.row_count,
            millis(without),
            millis(with)
        );
        Ok(result)
    }

    fn ddl(&self, phase: BenchPhase, statement: &str) -> Result<(), StorageError> {
        let (out, elapsed) = timed(|| self.storage.execute(statement, None));
        match &out {
            Ok(_) => crate::bench_event!({"phase": phase, "status": "ok", "elapsed_ms": millis(elapsed)}),
            Err(e) => crate::bench_event!({"phase": phase, "status": "error", "error": e.to_string()}),
        }
        out.map(|_| ())
    }

    fn probe(
        &self,
        phase: BenchPhase,
        sql: &str,
        params: &[SqlValue],
    ) -> Result<(usize, Duration), BenchmarkError> {
        let (rows, elapsed) = timed(|| self.storage.execute_fetch(sql, params));
        match rows {
            Ok(rows) => {
                crate::bench_event!({
                    "phase": phase,
                    "status": "ok",
                    "rows": rows.len(),
                    "elapsed_ms": millis(elapsed),
                });
                Ok((rows.len(), elapsed))
            }
            Err(e) => {
                crate::bench_event!({"phase": phase, "status": "error", "error": e.to_string()});
                Err(BenchmarkError::Query(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::benchlog;
    use crate::test_support::{Call, RecordingStorage};

    fn rows(n: usize) -> Vec<crate::storage::Row> {
        (0..n).map(|i| vec![SqlValue::Int(i as i64)]).collect()
    }

    #[test]
    fn runs_phases_in_order() {
        let _sink = benchlog::enable_thread_sink();
        let storage = RecordingStorage::with_fetch_results([rows(2), rows(2)]);
        let result = IndexBenchmark::new(&storage).compare(&TargetPredicate::default()).unwrap();
        assert_eq!(result.row_count, 2);
        assert!(result.query_signature.contains("LIKE ?2"));
        assert!(result.query_signature.ends_with("[Male, F%]"));

        let calls = storage.calls.borrow();
        assert_eq!(calls.len(), 4);
        assert_eq!(calls[0], Call::Execute(GENDER_FULLNAME_INDEX.drop_sql()));
        assert_eq!(calls[2], Call::Execute(GENDER_FULLNAME_INDEX.create_sql()));
        assert_eq!(calls[1], calls[3]);
        assert!(matches!(&calls[1], Call::Fetch { params, .. } if params == &TargetPredicate::default().params()));

        let phases: Vec<String> = benchlog::drain_events()
            .iter()
            .map(|e| e["phase"].as_str().unwrap_or_default().to_string())
            .collect();
        assert_eq!(
            phases,
            ["drop_index", "query_without_index", "create_index", "query_with_index", "report"]
        );
    }

    #[test]
    fn differing_counts_are_a_mismatch() {
        let storage = RecordingStorage::with_fetch_results([rows(2), rows(3)]);
        let err = IndexBenchmark::new(&storage).compare(&TargetPredicate::default()).unwrap_err();
        assert!(matches!(err, BenchmarkError::ResultMismatch { without: 2, with: 3 }));
    }

    #[test]
    fn drop_failure_stops_before_any_query() {
        let storage = RecordingStorage { fail_execute_containing: Some("DROP INDEX"), ..Default::default() };
        let err = IndexBenchmark::new(&storage).compare(&TargetPredicate::default()).unwrap_err();
        assert!(matches!(err, BenchmarkError::IndexDropFailed(_)));
        assert_eq!(storage.calls.borrow().len(), 1);
    }

    #[test]
    fn create_failure_skips_second_run() {
        let storage = RecordingStorage { fail_execute_containing: Some("CREATE INDEX"), ..Default::default() };
        let err = IndexBenchmark::new(&storage).compare(&TargetPredicate::default()).unwrap_err();
        assert!(matches!(err, BenchmarkError::IndexCreateFailed(_)));
        let fetches = storage.calls.borrow().iter().filter(|c| matches!(c, Call::Fetch { .. })).count();
        assert_eq!(fetches, 1);
    }

    #[test]
    fn query_failure_is_reported() {
        let storage = RecordingStorage { fail_fetch: true, ..Default::default() };
        let err = IndexBenchmark::new(&storage).compare(&TargetPredicate::default()).unwrap_err();
        assert!(matches!(err, BenchmarkError::Query(_)));
    }

    #[test]
    fn drop_after_when_not_keeping_index() {
        let storage = RecordingStorage::with_fetch_results([rows(1), rows(1)]);
        let options = BenchmarkOptions { keep_index: false, ..Default::default() };
        IndexBenchmark::with_options(&storage, options).compare(&TargetPredicate::default()).unwrap();
        let executed = storage.executed();
        assert_eq!(executed.len(), 3);
        assert_eq!(executed[2], GENDER_FULLNAME_INDEX.drop_sql());
    }

    #[test]
    fn target_validation() {
        assert_eq!(TargetPredicate::new('f').unwrap().letter(), 'F');
        assert!(matches!(TargetPredicate::new('7'), Err(BenchmarkError::InvalidTarget('7'))));
        assert!(matches!(TargetPredicate::new('Ж'), Err(BenchmarkError::InvalidTarget(_))));
        let t = TargetPredicate::default();
        assert_eq!(t.like_pattern(), "F%");
        assert_eq!(t.params(), vec![SqlValue::from("Male"), SqlValue::from("F%")]);
    }

    #[test]
    fn result_serializes_millis() {
        let r = BenchmarkResult {
            query_signature: "q".into(),
            row_count: 100,
            elapsed_without_index: Duration::from_millis(40),
            elapsed_with_index: Duration::from_millis(10),
        };
        let v = serde_json::to_value(&r).unwrap();
        assert_eq!(v["row_count"], 100);
        assert!((v["elapsed_with_index_ms"].as_f64().unwrap() - 10.0).abs() < 1e-9);
        assert!((r.speedup().unwrap() - 4.0).abs() < 1e-9);
    }
}
