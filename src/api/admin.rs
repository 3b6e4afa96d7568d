//! Administrative surface: what is in the table, which indexes exist, how this
//! binary was built.

use serde::Serialize;

use crate::errors::StorageError;
use crate::storage::{GENDER_FULLNAME_INDEX, Storage, schema};

// Build-time generated list of compiled features
#[allow(dead_code)]
mod built {
    include!(concat!(env!("OUT_DIR"), "/compiled_features.rs"));
}

pub fn compiled_features() -> Vec<String> {
    built::COMPILED_FEATURES.iter().map(|s| s.to_string()).collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct IndexInfo {
    pub name: String,
    pub columns: Vec<String>,
    pub present: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct InfoReport {
    pub backend: String,
    pub table: String,
    pub employees: u64,
    pub indexes: Vec<IndexInfo>,
    pub compiled_features: Vec<String>,
    pub package_name: String,
    pub package_version: String,
}

/// Gather the report. The table must exist.
pub fn info<S: Storage + ?Sized>(storage: &S) -> Result<InfoReport, StorageError> {
    let employees = crate::view::count_employees(storage)?;
    let index = GENDER_FULLNAME_INDEX;
    let present = schema::index_exists(storage, &index)?;
    Ok(InfoReport {
        backend: storage.dialect().name().to_string(),
        table: schema::TABLE.to_string(),
        employees,
        indexes: vec![IndexInfo {
            name: index.name.to_string(),
            columns: index.columns.iter().map(|c| c.to_string()).collect(),
            present,
        }],
        compiled_features: compiled_features(),
        package_name: env!("CARGO_PKG_NAME").to_string(),
        package_version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// --- Logging configuration API ---

/// Configure logging (application and benchmark files) for the process.
/// - dir: base directory for logs; if None, current directory
/// - level: error|warn|info|debug|trace (case-insensitive)
/// - retention: number of rolled files to keep (default 7)
pub fn log_configure(dir: Option<&std::path::Path>, level: Option<&str>, retention: Option<usize>) {
    crate::logger::configure_logging(dir, level, retention);
}

/// Variables: STAFFDB_LOG_DIR, STAFFDB_LOG_LEVEL, STAFFDB_LOG_RETENTION
pub fn log_configure_from_env() {
    crate::logger::configure_from_env();
}
