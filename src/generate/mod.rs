//! Synthetic employee generation for bulk loads and the index benchmark.
//!
//! Output is not reproducible: [`generate`] draws from the thread RNG, so two calls
//! produce different data. Use [`generate_with_rng`] with a seeded RNG when a fixed
//! sequence is needed.

pub mod names;

use chrono::{Datelike, NaiveDate};
use fake::Fake;
use rand::Rng;
use rand::rngs::ThreadRng;

use crate::errors::GenerationError;
use crate::types::{EmployeeRecord, FullName, Gender};
use names::*;

pub const MIN_BIRTH_YEAR: i32 = 1900;
pub const MAX_BIRTH_YEAR: i32 = 2025;

/// How the day of month is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DaySampling {
    /// Day in 1..=28 for every month. Always valid, slightly under-represents
    /// the 29th-31st.
    #[default]
    Capped28,
    /// Day in 1..=days_in_month.
    CalendarExact,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationPlan {
    total: usize,
    minority: usize,
    day_sampling: DaySampling,
}

impl GenerationPlan {
    pub const DEFAULT_TOTAL: usize = 1_000_000;
    pub const DEFAULT_MINORITY: usize = 100;

    pub fn new(total: usize, minority: usize) -> Result<Self, GenerationError> {
        if minority > total {
            return Err(GenerationError::MinorityExceedsTotal { total, minority });
        }
        Ok(Self { total, minority, day_sampling: DaySampling::default() })
    }

    pub fn with_day_sampling(mut self, day_sampling: DaySampling) -> Self {
        self.day_sampling = day_sampling;
        self
    }

    pub fn total_count(&self) -> usize {
        self.total
    }

    pub fn minority_count(&self) -> usize {
        self.minority
    }

    pub fn majority_count(&self) -> usize {
        self.total - self.minority
    }

    pub fn target_letter(&self) -> char {
        MINORITY_LETTER
    }

    pub fn day_sampling(&self) -> DaySampling {
        self.day_sampling
    }
}

impl Default for GenerationPlan {
    fn default() -> Self {
        Self {
            total: Self::DEFAULT_TOTAL,
            minority: Self::DEFAULT_MINORITY,
            day_sampling: DaySampling::default(),
        }
    }
}

/// Lazy record stream: the majority in Male/Female pairs, then the minority.
pub struct Generated<R> {
    plan: GenerationPlan,
    rng: R,
    emitted: usize,
}

impl<R> Generated<R> {
    pub fn plan(&self) -> &GenerationPlan {
        &self.plan
    }
}

pub fn generate(plan: GenerationPlan) -> Generated<ThreadRng> {
    generate_with_rng(plan, rand::rng())
}

pub fn generate_with_rng<R: Rng>(plan: GenerationPlan, rng: R) -> Generated<R> {
    log::info!(
        "generating {} records ({} majority, {} minority '{}')",
        plan.total_count(),
        plan.majority_count(),
        plan.minority_count(),
        plan.target_letter()
    );
    Generated { plan, rng, emitted: 0 }
}

impl<R: Rng> Iterator for Generated<R> {
    type Item = EmployeeRecord;

    fn next(&mut self) -> Option<EmployeeRecord> {
        if self.emitted >= self.plan.total {
            return None;
        }
        let i = self.emitted;
        self.emitted += 1;
        let record = if i < self.plan.majority_count() {
            let gender = if i % 2 == 0 { Gender::Male } else { Gender::Female };
            majority_record(&mut self.rng, gender, self.plan.day_sampling)
        } else {
            minority_record(&mut self.rng, self.plan.day_sampling)
        };
        Some(record)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.plan.total - self.emitted;
        (left, Some(left))
    }
}

impl<R: Rng> ExactSizeIterator for Generated<R> {}

fn pick<'a, R: Rng + ?Sized>(rng: &mut R, pool: &[&'a str]) -> &'a str {
    pool[rng.random_range(0..pool.len())]
}

fn build<R: Rng + ?Sized>(
    rng: &mut R,
    surname: &str,
    given: &str,
    patronymic: &str,
    gender: Gender,
    days: DaySampling,
) -> EmployeeRecord {
    let name = FullName::new_unchecked(format!("{surname} {given} {patronymic}"));
    EmployeeRecord::from_parts(name, random_birth_date(rng, days), gender)
}

fn majority_record<R: Rng + ?Sized>(rng: &mut R, gender: Gender, days: DaySampling) -> EmployeeRecord {
    let (surnames, given, patronymics) = match gender {
        Gender::Male => (MALE_SURNAMES, MALE_GIVEN_NAMES, MALE_PATRONYMICS),
        Gender::Female => (FEMALE_SURNAMES, FEMALE_GIVEN_NAMES, FEMALE_PATRONYMICS),
    };
    let surname = pick(rng, surnames);
    let given = pick(rng, given);
    let patronymic = pick(rng, patronymics);
    build(rng, surname, given, patronymic, gender, days)
}

fn minority_record<R: Rng + ?Sized>(rng: &mut R, days: DaySampling) -> EmployeeRecord {
    let surname = pick(rng, MINORITY_SURNAMES);
    let given = pick(rng, MALE_GIVEN_NAMES);
    let patronymic = pick(rng, MALE_PATRONYMICS);
    build(rng, surname, given, patronymic, Gender::Male, days)
}

pub fn random_birth_date<R: Rng + ?Sized>(rng: &mut R, days: DaySampling) -> NaiveDate {
    let year: i32 = (MIN_BIRTH_YEAR..=MAX_BIRTH_YEAR).fake_with_rng(rng);
    let month: u32 = (1..=12u32).fake_with_rng(rng);
    let max_day = match days {
        DaySampling::Capped28 => 28,
        DaySampling::CalendarExact => days_in_month(year, month),
    };
    let day: u32 = (1..=max_day).fake_with_rng(rng);
    // day never exceeds the month length, so this is always Some
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (y, m) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    NaiveDate::from_ymd_opt(y, m, 1).and_then(|d| d.pred_opt()).map_or(28, |d| d.day())
}
