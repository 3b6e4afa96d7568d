mod age;
mod validate;

pub use age::calculate_age;
pub use validate::{DATE_FORMAT, parse_birth_date, parse_full_name, parse_gender, title_case, validate};

use crate::errors::StorageError;
use crate::storage::{Storage, schema};
use crate::types::EmployeeRecord;

/// Insert a single validated record.
pub fn add_employee<S: Storage + ?Sized>(storage: &S, record: &EmployeeRecord) -> Result<(), StorageError> {
    storage.execute(&schema::insert_sql(storage.dialect()), Some(&schema::insert_params(record)))?;
    log::info!("added employee {}", record.full_name());
    Ok(())
}
