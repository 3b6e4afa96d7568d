use chrono::NaiveDate;

use crate::errors::ValidationError;
use crate::types::{EmployeeRecord, FullName, Gender};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Validate raw input and build a record, or explain why it was rejected.
///
/// Fields are checked in order (full name, birth date, gender); the first failing
/// field determines the error. Nothing is constructed on failure.
pub fn validate(
    full_name: Option<&str>,
    birth_date: Option<&str>,
    gender: Option<&str>,
) -> Result<EmployeeRecord, ValidationError> {
    let result = build(full_name, birth_date, gender);
    if let Err(e) = &result {
        log::warn!("rejected employee record: {e}");
    }
    result
}

fn build(
    full_name: Option<&str>,
    birth_date: Option<&str>,
    gender: Option<&str>,
) -> Result<EmployeeRecord, ValidationError> {
    let full_name = parse_full_name(required("full_name", full_name)?)?;
    let birth_date = parse_birth_date(required("birth_date", birth_date)?)?;
    let gender = parse_gender(required("gender", gender)?)?;
    Ok(EmployeeRecord::from_parts(full_name, birth_date, gender))
}

fn required<'a>(field: &'static str, value: Option<&'a str>) -> Result<&'a str, ValidationError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ValidationError::MissingField { field }),
    }
}

pub fn parse_full_name(input: &str) -> Result<FullName, ValidationError> {
    let words: Vec<&str> = input.split_whitespace().collect();
    if words.len() != 3 {
        return Err(ValidationError::BadNameFormat { tokens: words.len() });
    }
    if let Some(bad) = words.iter().find(|w| !w.chars().all(|c| c.is_ascii_alphabetic())) {
        return Err(ValidationError::BadNameCharset { token: (*bad).to_string() });
    }
    let cased: Vec<String> = words.iter().map(|w| title_case(w)).collect();
    Ok(FullName::new_unchecked(cased.join(" ")))
}

pub fn parse_birth_date(input: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT)
        .map_err(|_| ValidationError::BadDateFormat { input: input.to_string() })
}

pub fn parse_gender(input: &str) -> Result<Gender, ValidationError> {
    Gender::from_stored(&title_case(input.trim()))
        .ok_or_else(|| ValidationError::BadGender { input: input.to_string() })
}

/// First char upper, rest lower. ASCII only; callers have already checked the charset
/// where it matters.
pub fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            let mut out = String::with_capacity(word.len());
            out.push(first.to_ascii_uppercase());
            out.extend(chars.map(|c| c.to_ascii_lowercase()));
            out
        }
        None => String::new(),
    }
}
