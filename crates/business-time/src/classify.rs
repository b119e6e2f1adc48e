//! Day classification: holidays and business days.

use chrono::{Datelike, NaiveDate};

use crate::config::{CalendarConfig, HolidaySet};

/// True iff `date` is listed in `holidays`.
pub fn is_holiday(date: NaiveDate, holidays: &HolidaySet) -> bool {
    holidays.contains(date)
}

/// True iff the weekday of `date` has business hours and `date` is not a holiday.
///
/// A holiday always wins over a normally-working weekday.
pub fn is_business_day(date: NaiveDate, config: &CalendarConfig) -> bool {
    config.schedule().has_business_hours(date.weekday()) && !is_holiday(date, config.holidays())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WeeklySchedule;
    use chrono::Weekday;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn config() -> CalendarConfig {
        let holidays = HolidaySet::parse(["2021-01-01", "2021-01-25", "2021-06-03"]).unwrap();
        CalendarConfig::default().with_holidays(holidays)
    }

    #[test]
    fn test_is_holiday() {
        let config = config();
        assert!(is_holiday(date(2021, 1, 25), config.holidays()));
        assert!(!is_holiday(date(2021, 1, 26), config.holidays()));
    }

    #[test]
    fn test_business_day_on_weekday() {
        // Thursday
        assert!(is_business_day(date(2021, 2, 4), &config()));
    }

    #[test]
    fn test_weekend_is_not_business_day() {
        // Sunday
        assert!(!is_business_day(date(2021, 2, 7), &config()));
        assert!(!is_business_day(date(2021, 2, 6), &config()));
    }

    #[test]
    fn test_holiday_overrides_working_weekday() {
        // Monday 2021-01-25 is a working weekday but listed as holiday
        assert_eq!(date(2021, 1, 25).weekday(), Weekday::Mon);
        assert!(!is_business_day(date(2021, 1, 25), &config()));
    }

    #[test]
    fn test_custom_weekend_day() {
        let config = CalendarConfig::default()
            .with_schedule(WeeklySchedule::default().without_day(Weekday::Fri));
        assert!(!is_business_day(date(2021, 2, 5), &config));
        assert!(is_business_day(date(2021, 2, 4), &config));
    }
}
