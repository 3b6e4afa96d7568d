use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

pub type EmployeeId = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
        }
    }

    /// Exact match against the stored spelling; callers normalise case first.
    pub fn from_stored(s: &str) -> Option<Self> {
        match s {
            "Male" => Some(Self::Male),
            "Female" => Some(Self::Female),
            _ => None,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Three title-cased ASCII words: surname, given name, patronymic.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct FullName(String);

impl FullName {
    pub(crate) fn new_unchecked(s: String) -> Self {
        Self(s)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn surname(&self) -> &str {
        self.0.split(' ').next().unwrap_or_default()
    }

    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.0.split(' ')
    }
}

impl fmt::Display for FullName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A fully validated employee. Only `employee::validate` and the synthetic
/// generator can build one, so every instance satisfies the name/date/gender rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmployeeRecord {
    full_name: FullName,
    birth_date: NaiveDate,
    gender: Gender,
}

impl EmployeeRecord {
    pub(crate) fn from_parts(full_name: FullName, birth_date: NaiveDate, gender: Gender) -> Self {
        Self { full_name, birth_date, gender }
    }

    pub fn full_name(&self) -> &FullName {
        &self.full_name
    }

    pub fn birth_date(&self) -> NaiveDate {
        self.birth_date
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    /// Male with a surname starting with `letter`: the benchmark's target subset.
    pub fn is_minority(&self, letter: char) -> bool {
        self.gender == Gender::Male && self.full_name.surname().starts_with(letter)
    }
}

/// A row read back from the `employees` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredEmployee {
    pub id: EmployeeId,
    pub record: EmployeeRecord,
}
