//! Reading the table back: full listing with computed ages, and row counts.

use chrono::NaiveDate;
use std::fmt::Write as _;

use crate::employee::{DATE_FORMAT, calculate_age};
use crate::errors::StorageError;
use crate::storage::{Row, SqlValue, Storage, schema};
use crate::types::{EmployeeRecord, FullName, Gender, StoredEmployee};

fn decode(row: &Row) -> Result<StoredEmployee, StorageError> {
    let [id, name, birth, gender] = row.as_slice() else {
        return Err(StorageError::Decode(format!("expected 4 columns, got {}", row.len())));
    };
    let id = id.as_i64().ok_or_else(|| StorageError::Decode(format!("id: {id:?}")))?;
    let name = name.as_str().ok_or_else(|| StorageError::Decode(format!("full_name: {name:?}")))?;
    let birth = birth.as_date().ok_or_else(|| StorageError::Decode(format!("birth_date: {birth:?}")))?;
    let gender = gender
        .as_str()
        .and_then(Gender::from_stored)
        .ok_or_else(|| StorageError::Decode(format!("gender: {gender:?}")))?;
    let record = EmployeeRecord::from_parts(FullName::new_unchecked(name.to_string()), birth, gender);
    Ok(StoredEmployee { id, record })
}

/// Every employee, ordered by full name.
pub fn list_all<S: Storage + ?Sized>(storage: &S) -> Result<Vec<StoredEmployee>, StorageError> {
    let rows = storage.execute_fetch(&schema::select_all_sql(), &[])?;
    rows.iter().map(decode).collect()
}

pub fn count_employees<S: Storage + ?Sized>(storage: &S) -> Result<u64, StorageError> {
    let rows = storage.execute_fetch(&schema::count_sql(), &[])?;
    let n = rows.first().and_then(|r| r.first()).and_then(SqlValue::as_i64).unwrap_or(0);
    Ok(u64::try_from(n).unwrap_or(0))
}

/// Fixed-width table with columns ID, Full name, Birth date, Age, Gender.
pub fn render_table(employees: &[StoredEmployee], today: NaiveDate) -> String {
    let name_w = employees
        .iter()
        .map(|e| e.record.full_name().as_str().len())
        .max()
        .unwrap_or(0)
        .max("Full name".len());
    let mut out = String::new();
    let _ = writeln!(out, "{:>8}  {:<name_w$}  {:<10}  {:>3}  {}", "ID", "Full name", "Birth date", "Age", "Gender");
    let _ = writeln!(out, "{}", "-".repeat(8 + 2 + name_w + 2 + 10 + 2 + 3 + 2 + 6));
    for e in employees {
        let r = &e.record;
        let _ = writeln!(
            out,
            "{:>8}  {:<name_w$}  {:<10}  {:>3}  {}",
            e.id,
            r.full_name().as_str(),
            r.birth_date().format(DATE_FORMAT).to_string(),
            calculate_age(r.birth_date(), today),
            r.gender()
        );
    }
    out
}
