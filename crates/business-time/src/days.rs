//! Business-day stepping.
//!
//! Walks the calendar one day at a time, counting only business days. The
//! time-of-day of the input is preserved, so the result is a business *day*
//! but not necessarily a business *instant*.

use chrono::{Days, NaiveDateTime};
use tracing::warn;

use crate::classify::is_business_day;
use crate::config::CalendarConfig;
use crate::error::{BusinessTimeError, Result};

/// Direction of travel along the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    pub(crate) fn step_days(self, instant: NaiveDateTime, days: u64) -> Result<NaiveDateTime> {
        let stepped = match self {
            Direction::Forward => instant.checked_add_days(Days::new(days)),
            Direction::Backward => instant.checked_sub_days(Days::new(days)),
        };
        stepped.ok_or_else(|| {
            BusinessTimeError::DatetimeOutOfRange(format!("{instant} {self:?} by {days} day(s)"))
        })
    }

    pub(crate) fn step_minutes(self, instant: NaiveDateTime, minutes: i64) -> Result<NaiveDateTime> {
        let delta = match self {
            Direction::Forward => chrono::Duration::try_minutes(minutes),
            Direction::Backward => minutes.checked_neg().and_then(chrono::Duration::try_minutes),
        };
        delta
            .and_then(|d| instant.checked_add_signed(d))
            .ok_or_else(|| {
                BusinessTimeError::DatetimeOutOfRange(format!(
                    "{instant} {self:?} by {minutes} minute(s)"
                ))
            })
    }
}

/// Step `days` business days from `instant` in `direction`.
///
/// `days == 0` returns `instant` unchanged, even when it is not a business day.
///
/// # Errors
///
/// Returns [`BusinessTimeError::NoBusinessTimeFound`] if more than
/// `config.max_lookahead_days()` consecutive calendar days pass without a
/// business day.
pub fn add_or_subtract_business_days(
    instant: NaiveDateTime,
    days: u32,
    direction: Direction,
    config: &CalendarConfig,
) -> Result<NaiveDateTime> {
    if days > 0 && config.schedule().is_closed() {
        return Err(BusinessTimeError::NoBusinessTimeFound(format!(
            "no weekday has business hours ({direction:?} of {instant})"
        )));
    }

    let mut remaining = days;
    let mut cursor = instant;
    let mut skipped: u32 = 0;

    while remaining > 0 {
        cursor = direction.step_days(cursor, 1)?;
        if is_business_day(cursor.date(), config) {
            remaining -= 1;
            skipped = 0;
            continue;
        }

        skipped += 1;
        if skipped > config.max_lookahead_days() {
            warn!(
                start = %instant,
                ?direction,
                lookahead = config.max_lookahead_days(),
                "business day search exhausted"
            );
            return Err(BusinessTimeError::NoBusinessTimeFound(format!(
                "no business day within {} days {:?} of {}",
                config.max_lookahead_days(),
                direction,
                instant
            )));
        }
    }

    Ok(cursor)
}

pub fn next_business_day(instant: NaiveDateTime, config: &CalendarConfig) -> Result<NaiveDateTime> {
    add_or_subtract_business_days(instant, 1, Direction::Forward, config)
}

pub fn last_business_day(instant: NaiveDateTime, config: &CalendarConfig) -> Result<NaiveDateTime> {
    add_or_subtract_business_days(instant, 1, Direction::Backward, config)
}

pub fn add_business_days(
    instant: NaiveDateTime,
    days: u32,
    config: &CalendarConfig,
) -> Result<NaiveDateTime> {
    add_or_subtract_business_days(instant, days, Direction::Forward, config)
}

pub fn subtract_business_days(
    instant: NaiveDateTime,
    days: u32,
    config: &CalendarConfig,
) -> Result<NaiveDateTime> {
    add_or_subtract_business_days(instant, days, Direction::Backward, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{HolidaySet, WeeklySchedule};
    use chrono::{NaiveDate, NaiveTime};

    fn dt(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_time(NaiveTime::from_hms_opt(h, min, 0).unwrap())
    }

    fn config() -> CalendarConfig {
        let holidays = HolidaySet::parse(["2021-01-01", "2021-01-25", "2021-06-03"]).unwrap();
        CalendarConfig::default().with_holidays(holidays)
    }

    #[test]
    fn test_add_business_days() {
        let result = add_business_days(dt(2021, 2, 8, 0, 0), 3, &config()).unwrap();
        assert_eq!(result, dt(2021, 2, 11, 0, 0));
    }

    #[test]
    fn test_add_business_days_across_weekend() {
        let result = add_business_days(dt(2021, 2, 19, 0, 0), 4, &config()).unwrap();
        assert_eq!(result, dt(2021, 2, 25, 0, 0));
    }

    #[test]
    fn test_add_business_days_across_holiday() {
        let result = add_business_days(dt(2021, 6, 2, 0, 0), 2, &config()).unwrap();
        assert_eq!(result, dt(2021, 6, 7, 0, 0));
    }

    #[test]
    fn test_add_business_days_across_long_weekend() {
        let result = add_business_days(dt(2021, 1, 22, 0, 0), 3, &config()).unwrap();
        assert_eq!(result, dt(2021, 1, 28, 0, 0));
    }

    #[test]
    fn test_subtract_business_days() {
        let config = config();
        assert_eq!(
            subtract_business_days(dt(2021, 2, 11, 0, 0), 3, &config).unwrap(),
            dt(2021, 2, 8, 0, 0)
        );
        assert_eq!(
            subtract_business_days(dt(2021, 2, 25, 0, 0), 4, &config).unwrap(),
            dt(2021, 2, 19, 0, 0)
        );
        assert_eq!(
            subtract_business_days(dt(2021, 6, 7, 0, 0), 2, &config).unwrap(),
            dt(2021, 6, 2, 0, 0)
        );
        assert_eq!(
            subtract_business_days(dt(2021, 1, 28, 0, 0), 3, &config).unwrap(),
            dt(2021, 1, 22, 0, 0)
        );
    }

    #[test]
    fn test_preserves_time_of_day() {
        // Friday 20:30 -> Monday 20:30, outside business hours but on a business day
        let result = next_business_day(dt(2021, 2, 19, 20, 30), &config()).unwrap();
        assert_eq!(result, dt(2021, 2, 22, 20, 30));
    }

    #[test]
    fn test_last_business_day_skips_holiday() {
        let result = last_business_day(dt(2021, 1, 26, 10, 0), &config()).unwrap();
        assert_eq!(result, dt(2021, 1, 22, 10, 0));
    }

    #[test]
    fn test_zero_days_is_identity() {
        let saturday = dt(2021, 2, 6, 10, 0);
        assert_eq!(add_business_days(saturday, 0, &config()).unwrap(), saturday);
    }

    #[test]
    fn test_closed_schedule_fails_instead_of_hanging() {
        let config = CalendarConfig::new(WeeklySchedule::empty(), HolidaySet::new())
            .with_max_lookahead_days(30);
        let err = next_business_day(dt(2021, 2, 8, 9, 0), &config).unwrap_err();
        assert!(matches!(err, BusinessTimeError::NoBusinessTimeFound(_)));
    }

    #[test]
    fn test_closed_schedule_fails_without_walking_lookahead() {
        let config = CalendarConfig::new(WeeklySchedule::empty(), HolidaySet::new())
            .with_max_lookahead_days(u32::MAX);
        let err = last_business_day(dt(2021, 2, 8, 9, 0), &config).unwrap_err();
        assert!(matches!(err, BusinessTimeError::NoBusinessTimeFound(_)));
        assert!(err.to_string().contains("no weekday has business hours"));

        let instant = dt(2021, 2, 8, 9, 0);
        assert_eq!(add_business_days(instant, 0, &config).unwrap(), instant);
    }

    #[test]
    fn test_lookahead_counts_consecutive_gap_only() {
        // 5 weekdays of holidays + weekends: the longest gap is 9 days
        let holidays: HolidaySet = (8..=12)
            .map(|d| NaiveDate::from_ymd_opt(2021, 2, d).unwrap())
            .collect();
        let config = CalendarConfig::default()
            .with_holidays(holidays)
            .with_max_lookahead_days(9);
        let result = next_business_day(dt(2021, 2, 5, 9, 0), &config).unwrap();
        assert_eq!(result, dt(2021, 2, 15, 9, 0));

        let tight = config.with_max_lookahead_days(8);
        assert!(next_business_day(dt(2021, 2, 5, 9, 0), &tight).is_err());
    }
}
