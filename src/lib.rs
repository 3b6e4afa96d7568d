//! Employee directory over PostgreSQL or SQLite: validated records, synthetic bulk
//! loads in batches, and a benchmark of a composite `(gender, full_name)` index.

pub mod api;
pub mod bench;
pub mod benchlog;
pub mod cli;
pub mod config;
pub mod employee;
pub mod errors;
pub mod generate;
pub mod loader;
pub mod logger;
pub mod storage;
pub mod types;
pub mod view;

#[cfg(test)]
mod test_support;

pub use bench::{BenchmarkResult, IndexBenchmark, TargetPredicate};
pub use employee::{add_employee, calculate_age, validate};
pub use generate::{GenerationPlan, generate};
pub use loader::{LoadOptions, LoadReport, load};
pub use storage::{ConnectionConfig, Storage};
pub use types::{EmployeeRecord, FullName, Gender, StoredEmployee};

/// Open storage from `cfg` and make sure the employees table exists.
pub fn init(cfg: &ConnectionConfig) -> Result<Box<dyn Storage>, errors::StorageError> {
    let storage = storage::open(cfg)?;
    storage::schema::create_table(&storage)?;
    Ok(storage)
}
