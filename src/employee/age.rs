use chrono::{Datelike, NaiveDate};

/// Whole years between `birth_date` and `today`.
pub fn calculate_age(birth_date: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth_date.year();
    if (today.month(), today.day()) < (birth_date.month(), birth_date.day()) {
        age -= 1;
    }
    age
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn birthday_not_yet_reached() {
        assert_eq!(calculate_age(d(2001, 6, 20), d(2026, 6, 19)), 24);
        assert_eq!(calculate_age(d(2001, 6, 20), d(2026, 6, 20)), 25);
        assert_eq!(calculate_age(d(2001, 6, 20), d(2026, 12, 1)), 25);
    }

    #[test]
    fn leap_day_birthday() {
        assert_eq!(calculate_age(d(2000, 2, 29), d(2025, 2, 28)), 24);
        assert_eq!(calculate_age(d(2000, 2, 29), d(2025, 3, 1)), 25);
    }
}
