//! Four-week task rotation.
//!
//! Templates are keyed by (week 1..=4, French day name). The week of a date is the
//! number of whole weeks since the reference date, modulo 4. Dates before the
//! reference date wrap around, so every date maps to a slot.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// French day names, Sunday first
pub const DAY_NAMES: [&str; 7] = [
    "dimanche", "lundi", "mardi", "mercredi", "jeudi", "vendredi", "samedi",
];

pub const ROTATION_WEEKS: i64 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RotationSlot {
    /// 1..=4
    pub week_number: i16,
    pub day_name: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct RotationCalculator {
    reference_date: NaiveDate,
}

impl RotationCalculator {
    pub fn new(reference_date: NaiveDate) -> Self {
        Self { reference_date }
    }

    pub fn reference_date(&self) -> NaiveDate {
        self.reference_date
    }

    pub fn week_number(&self, date: NaiveDate) -> i16 {
        let diff_days = (date - self.reference_date).num_days();
        let weeks = diff_days.div_euclid(7);
        (weeks.rem_euclid(ROTATION_WEEKS) + 1) as i16
    }

    pub fn slot_for(&self, date: NaiveDate) -> RotationSlot {
        RotationSlot {
            week_number: self.week_number(date),
            day_name: day_name(date),
        }
    }
}

pub fn day_name(date: NaiveDate) -> &'static str {
    DAY_NAMES[date.weekday().num_days_from_sunday() as usize]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn calculator() -> RotationCalculator {
        RotationCalculator::new(d("2025-12-01"))
    }

    #[test]
    fn test_reference_examples() {
        let calc = calculator();
        assert_eq!(calc.week_number(d("2025-12-01")), 1);
        assert_eq!(calc.week_number(d("2025-12-08")), 2);
        assert_eq!(calc.week_number(d("2025-12-29")), 1);
        assert_eq!(calc.week_number(d("2025-11-30")), 4);
    }

    #[test]
    fn test_week_holds_for_seven_days() {
        let calc = calculator();
        for offset in 0..7 {
            assert_eq!(calc.week_number(d("2025-12-08") + Duration::days(offset)), 2);
        }
        assert_eq!(calc.week_number(d("2025-12-15")), 3);
        assert_eq!(calc.week_number(d("2025-12-22")), 4);
    }

    #[test]
    fn test_week_always_in_range() {
        let calc = calculator();
        let mut date = d("2023-01-01");
        while date < d("2028-01-01") {
            let week = calc.week_number(date);
            assert!((1..=4).contains(&week), "{} -> {}", date, week);
            assert_eq!(week, calc.week_number(date));
            date += Duration::days(1);
        }
    }

    #[test]
    fn test_day_names_sunday_first() {
        assert_eq!(day_name(d("2025-12-01")), "lundi");
        assert_eq!(day_name(d("2025-12-06")), "samedi");
        assert_eq!(day_name(d("2025-12-07")), "dimanche");
        assert_eq!(
            calculator().slot_for(d("2025-12-10")),
            RotationSlot {
                week_number: 2,
                day_name: "mercredi"
            }
        );
    }
}
