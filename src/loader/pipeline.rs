use std::time::Instant;

use super::options::{BatchFailure, BatchFailurePolicy, LoadOptions, LoadProgress, LoadReport};
use crate::errors::LoadError;
use crate::storage::{SqlValue, Storage, schema};
use crate::types::EmployeeRecord;

/// Number of chunks `load` will submit for `records` inputs.
pub fn batch_count(records: usize, batch_size: usize) -> usize {
    if batch_size == 0 { 0 } else { records.div_ceil(batch_size) }
}

/// Insert `records` in order, one `execute_many` per chunk of at most
/// `opts.batch_size` records.
///
/// `progress` is called after every chunk, failed or not. With
/// [`BatchFailurePolicy::Continue`] a failed chunk is listed in the report and the
/// run carries on; with [`BatchFailurePolicy::Abort`] the run stops with
/// [`LoadError::Aborted`].
///
/// # Errors
/// `InvalidBatchSize` for a zero batch size, `Aborted` under the abort policy.
pub fn load<S, I, F>(
    storage: &S,
    records: I,
    opts: &LoadOptions,
    mut progress: F,
) -> Result<LoadReport, LoadError>
where
    S: Storage + ?Sized,
    I: IntoIterator<Item = EmployeeRecord>,
    I::IntoIter: ExactSizeIterator,
    F: FnMut(LoadProgress),
{
    if opts.batch_size == 0 {
        return Err(LoadError::InvalidBatchSize);
    }
    let mut records = records.into_iter();
    let planned = records.len();
    let total_batches = batch_count(planned, opts.batch_size);
    let statement = schema::insert_sql(storage.dialect());
    log::info!(
        "load: {planned} records in {total_batches} batches of <= {} (on failure: {:?})",
        opts.batch_size,
        opts.failure_policy
    );

    let start = Instant::now();
    let mut report = LoadReport { planned, ..LoadReport::default() };
    let mut offset = 0usize;
    let mut batch_index = 0usize;
    loop {
        let chunk: Vec<Vec<SqlValue>> =
            records.by_ref().take(opts.batch_size).map(|r| schema::insert_params(&r)).collect();
        if chunk.is_empty() {
            break;
        }
        let size = chunk.len();
        match storage.execute_many(&statement, &chunk) {
            Ok(_) => report.loaded += size,
            Err(e) => {
                log::error!(
                    "load: batch {}/{total_batches} (records {offset}..{}) failed: {e}",
                    batch_index + 1,
                    offset + size
                );
                if opts.failure_policy == BatchFailurePolicy::Abort {
                    return Err(LoadError::Aborted { batch_index, source: e });
                }
                report.failed.push(BatchFailure { batch_index, offset, size, cause: e.to_string() });
            }
        }
        report.batches += 1;
        offset += size;
        progress(LoadProgress { batch_index, loaded: report.loaded, planned });
        if let Some(every) = opts.progress_every
            && every > 0
            && (batch_index + 1) % every == 0
        {
            log::info!("load: {}/{planned} records loaded", report.loaded);
        }
        batch_index += 1;
    }
    report.elapsed = start.elapsed();
    log::info!(
        "load: done, {}/{} records in {} batches ({} failed) in {:.3}s",
        report.loaded,
        planned,
        report.batches,
        report.failed.len(),
        report.elapsed.as_secs_f64()
    );
    Ok(report)
}
