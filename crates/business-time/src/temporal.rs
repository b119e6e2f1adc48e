//! String-level business time computation for bindings and the CLI.
//!
//! Each function takes datetime strings plus a [`CalendarConfig`] and returns a
//! serializable result struct, so hosts that only speak JSON (the `bizcal`
//! CLI, scripting bindings) can call the engine without touching chrono types.
//!
//! # Functions
//!
//! - [`check_business_time`] — Classify an instant and find the surrounding business time
//! - [`shift_business_time`] — Add (positive) or subtract (negative) business time
//! - [`business_time_between`] — Elapsed business time between two instants
//!
//! # Datetime Format
//!
//! Business hours are wall-clock hours, so datetimes carry no timezone:
//! `"2021-02-08T09:00:00"`, `"2021-02-08 09:00:00"`, `"2021-02-08T09:00"`, or a
//! bare date `"2021-02-08"` (midnight). An RFC 3339 string with an offset is
//! accepted and its local wall-clock part is used as-is.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::classify::{is_business_day, is_holiday};
use crate::config::CalendarConfig;
use crate::days::{last_business_day, next_business_day};
use crate::diff::{business_days_diff, business_minutes_diff};
use crate::error::{BusinessTimeError, Result};
use crate::locate::{is_business_time, last_business_time, next_business_time};
use crate::unit::{add_business_time, subtract_business_time, BusinessUnit};

const OUTPUT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

// ── check_business_time ─────────────────────────────────────────────────────

/// Classification of an instant against the calendar.
#[derive(Debug, Clone, Serialize)]
pub struct BusinessTimeStatus {
    /// The instant checked, normalized to `YYYY-MM-DDTHH:MM:SS`.
    pub datetime: String,
    pub is_holiday: bool,
    pub is_business_day: bool,
    pub is_business_time: bool,
    /// Earliest business instant at or after `datetime`.
    pub next_business_time: String,
    /// Latest business instant at or before `datetime`.
    pub last_business_time: String,
    /// Next business day, same time-of-day.
    pub next_business_day: String,
    /// Previous business day, same time-of-day.
    pub last_business_day: String,
}

/// Classify `datetime` and locate the business time around it.
///
/// # Errors
///
/// Returns [`BusinessTimeError::InvalidDatetime`] if `datetime` cannot be parsed,
/// or [`BusinessTimeError::NoBusinessTimeFound`] if the calendar has no business
/// time within its lookahead.
pub fn check_business_time(datetime: &str, config: &CalendarConfig) -> Result<BusinessTimeStatus> {
    let instant = parse_datetime(datetime)?;
    let date = instant.date();

    Ok(BusinessTimeStatus {
        datetime: format_datetime(instant),
        is_holiday: is_holiday(date, config.holidays()),
        is_business_day: is_business_day(date, config),
        is_business_time: is_business_time(instant, config),
        next_business_time: format_datetime(next_business_time(instant, config)?),
        last_business_time: format_datetime(last_business_time(instant, config)?),
        next_business_day: format_datetime(next_business_day(instant, config)?),
        last_business_day: format_datetime(last_business_day(instant, config)?),
    })
}

// ── shift_business_time ─────────────────────────────────────────────────────

/// The result of shifting a timestamp by business time.
#[derive(Debug, Clone, Serialize)]
pub struct ShiftedTimestamp {
    /// The original datetime (echoed back).
    pub original: String,
    /// The shifted datetime, `YYYY-MM-DDTHH:MM:SS`.
    pub shifted: String,
    /// The normalized shift applied (e.g., "+3 hours", "-1 day").
    pub shift_applied: String,
    /// Whether the shifted instant is inside business hours. Day shifts keep the
    /// time-of-day, so this can be `false` for them.
    pub is_business_time: bool,
}

/// Shift `datetime` by `amount` business `unit`s.
///
/// A positive `amount` adds, a negative one subtracts.
///
/// # Errors
///
/// Returns [`BusinessTimeError::InvalidDatetime`] for an unparseable datetime,
/// [`BusinessTimeError::InvalidBusinessTimeUnit`] for a unit other than
/// minute(s)/hour(s)/day(s), [`BusinessTimeError::DatetimeOutOfRange`] if
/// `|amount|` does not fit in a `u32`, or
/// [`BusinessTimeError::NoBusinessTimeFound`] if the lookahead is exhausted.
pub fn shift_business_time(
    datetime: &str,
    amount: i64,
    unit: &str,
    config: &CalendarConfig,
) -> Result<ShiftedTimestamp> {
    let instant = parse_datetime(datetime)?;
    let unit: BusinessUnit = unit.parse()?;
    let magnitude = u32::try_from(amount.unsigned_abs()).map_err(|_| {
        BusinessTimeError::DatetimeOutOfRange(format!("shift of {amount} {unit} is too large"))
    })?;

    let shifted = if amount >= 0 {
        add_business_time(instant, magnitude, unit, config)?
    } else {
        subtract_business_time(instant, magnitude, unit, config)?
    };

    Ok(ShiftedTimestamp {
        original: datetime.to_string(),
        shifted: format_datetime(shifted),
        shift_applied: format_shift(amount, unit),
        is_business_time: is_business_time(shifted, config),
    })
}

// ── business_time_between ───────────────────────────────────────────────────

/// Elapsed business time between two timestamps.
#[derive(Debug, Clone, Serialize)]
pub struct BusinessDuration {
    pub start: String,
    pub end: String,
    pub unit: BusinessUnit,
    /// Elapsed business time in `unit` (negative if `end` is before `start`).
    pub value: f64,
    /// Elapsed business minutes, regardless of `unit`.
    pub total_minutes: i64,
    /// Human-readable business duration (e.g., "1 hour, 30 minutes").
    pub human_readable: String,
}

/// Compute the business time elapsed from `start` to `end`, in `unit`.
///
/// `"days"` counts business-day steps between the two dates rather than
/// dividing minutes by a working-day length. `total_minutes` is always
/// reported, so a `"days"` request walks the window twice.
///
/// # Errors
///
/// Returns [`BusinessTimeError::InvalidDatetime`] if either datetime cannot be
/// parsed, or [`BusinessTimeError::InvalidBusinessTimeUnit`] for an unknown unit.
pub fn business_time_between(
    start: &str,
    end: &str,
    unit: &str,
    config: &CalendarConfig,
) -> Result<BusinessDuration> {
    let start_dt = parse_datetime(start)?;
    let end_dt = parse_datetime(end)?;
    let unit: BusinessUnit = unit.parse()?;

    let total_minutes = business_minutes_diff(start_dt, end_dt, config)?;
    let value = match unit {
        BusinessUnit::Minutes => total_minutes as f64,
        BusinessUnit::Hours => total_minutes as f64 / 60.0,
        BusinessUnit::Days => business_days_diff(start_dt, end_dt, config)? as f64,
    };

    Ok(BusinessDuration {
        start: format_datetime(start_dt),
        end: format_datetime(end_dt),
        unit,
        value,
        total_minutes,
        human_readable: format_human_duration(total_minutes),
    })
}

// ── Internal helpers ────────────────────────────────────────────────────────

/// Parse a wall-clock datetime string into `NaiveDateTime`.
pub fn parse_datetime(s: &str) -> Result<NaiveDateTime> {
    let trimmed = s.trim();

    for format in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(dt);
        }
    }

    if let Some(dt) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
    {
        return Ok(dt);
    }

    DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.naive_local())
        .map_err(|e| BusinessTimeError::InvalidDatetime(format!("'{}': {}", s, e)))
}

fn format_datetime(dt: NaiveDateTime) -> String {
    dt.format(OUTPUT_FORMAT).to_string()
}

/// Format a shift like "+3 hours" or "-1 day".
fn format_shift(amount: i64, unit: BusinessUnit) -> String {
    let sign = if amount >= 0 { "+" } else { "-" };
    let magnitude = amount.unsigned_abs();
    let name = unit.as_str();
    if magnitude == 1 {
        format!("{sign}{magnitude} {}", name.trim_end_matches('s'))
    } else {
        format!("{sign}{magnitude} {name}")
    }
}

/// Format business minutes as "N hours, M minutes" (absolute value).
fn format_human_duration(total_minutes: i64) -> String {
    let abs_minutes = total_minutes.unsigned_abs();
    let hours = abs_minutes / 60;
    let minutes = abs_minutes % 60;

    let mut parts = Vec::new();
    if hours > 0 {
        parts.push(format!(
            "{} hour{}",
            hours,
            if hours == 1 { "" } else { "s" }
        ));
    }
    if minutes > 0 || parts.is_empty() {
        parts.push(format!(
            "{} minute{}",
            minutes,
            if minutes == 1 { "" } else { "s" }
        ));
    }
    parts.join(", ")
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HolidaySet;

    fn config() -> CalendarConfig {
        let holidays = HolidaySet::parse(["2021-01-01", "2021-01-25", "2021-06-03"]).unwrap();
        CalendarConfig::default().with_holidays(holidays)
    }

    // ── parse_datetime tests ────────────────────────────────────────────

    #[test]
    fn test_parse_datetime_formats() {
        let expected = NaiveDate::from_ymd_opt(2021, 2, 8)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        for input in [
            "2021-02-08T09:30:00",
            "2021-02-08 09:30:00",
            "2021-02-08T09:30",
            "2021-02-08 09:30",
            "2021-02-08T09:30:00-05:00",
            "  2021-02-08T09:30:00  ",
        ] {
            assert_eq!(parse_datetime(input).unwrap(), expected, "input: {input}");
        }
    }

    #[test]
    fn test_parse_bare_date_is_midnight() {
        let dt = parse_datetime("2021-02-08").unwrap();
        assert_eq!(format_datetime(dt), "2021-02-08T00:00:00");
    }

    #[test]
    fn test_parse_invalid_datetime() {
        let err = parse_datetime("not-a-datetime").unwrap_err().to_string();
        assert!(err.contains("Invalid datetime"), "got: {err}");
    }

    // ── check_business_time tests ───────────────────────────────────────

    #[test]
    fn test_check_business_time_inside_hours() {
        let status = check_business_time("2021-02-11T10:00:00", &config()).unwrap();
        assert!(status.is_business_day);
        assert!(status.is_business_time);
        assert!(!status.is_holiday);
        assert_eq!(status.next_business_time, "2021-02-11T10:00:00");
        assert_eq!(status.next_business_day, "2021-02-12T10:00:00");
    }

    #[test]
    fn test_check_business_time_on_holiday() {
        let status = check_business_time("2021-01-25 10:00", &config()).unwrap();
        assert!(status.is_holiday);
        assert!(!status.is_business_day);
        assert!(!status.is_business_time);
        assert_eq!(status.next_business_time, "2021-01-26T09:00:00");
        assert_eq!(status.last_business_time, "2021-01-22T17:00:00");
        assert_eq!(status.last_business_day, "2021-01-22T10:00:00");
    }

    // ── shift_business_time tests ───────────────────────────────────────

    #[test]
    fn test_shift_add_hours() {
        let result = shift_business_time("2021-02-08T09:00:00", 3, "hours", &config()).unwrap();
        assert_eq!(result.shifted, "2021-02-08T12:00:00");
        assert_eq!(result.shift_applied, "+3 hours");
        assert!(result.is_business_time);
    }

    #[test]
    fn test_shift_negative_subtracts() {
        let result = shift_business_time("2021-02-22T09:30:00", -33, "minute", &config()).unwrap();
        assert_eq!(result.shifted, "2021-02-19T16:57:00");
        assert_eq!(result.shift_applied, "-33 minutes");
    }

    #[test]
    fn test_shift_days_keeps_time_of_day() {
        let result = shift_business_time("2021-02-19T20:00:00", 1, "day", &config()).unwrap();
        assert_eq!(result.shifted, "2021-02-22T20:00:00");
        assert_eq!(result.shift_applied, "+1 day");
        assert!(!result.is_business_time);
    }

    #[test]
    fn test_shift_invalid_unit() {
        let err = shift_business_time("2021-02-08T09:00:00", 1, "weeks", &config())
            .unwrap_err()
            .to_string();
        assert!(err.contains("Invalid business time unit"), "got: {err}");
    }

    #[test]
    fn test_shift_too_large() {
        let result = shift_business_time("2021-02-08T09:00:00", i64::MAX, "minutes", &config());
        assert!(matches!(
            result,
            Err(BusinessTimeError::DatetimeOutOfRange(_))
        ));
    }

    // ── business_time_between tests ─────────────────────────────────────

    #[test]
    fn test_between_minutes() {
        let result = business_time_between(
            "2021-02-08T16:45:00",
            "2021-02-09T10:15:00",
            "minutes",
            &config(),
        )
        .unwrap();
        assert_eq!(result.value, 90.0);
        assert_eq!(result.total_minutes, 90);
        assert_eq!(result.human_readable, "1 hour, 30 minutes");
    }

    #[test]
    fn test_between_days_reversed() {
        let result = business_time_between(
            "2021-02-10T11:00:00",
            "2021-02-08T09:00:00",
            "days",
            &config(),
        )
        .unwrap();
        assert_eq!(result.value, -2.0);
        // Mon 09:00-17:00 + Tue 09:00-17:00 + Wed 09:00-11:00
        assert_eq!(result.total_minutes, -1080);
    }

    #[test]
    fn test_between_zero() {
        let result = business_time_between(
            "2021-02-06T10:00:00",
            "2021-02-07T10:00:00",
            "hours",
            &config(),
        )
        .unwrap();
        assert_eq!(result.value, 0.0);
        assert_eq!(result.human_readable, "0 minutes");
    }

    #[test]
    fn test_result_serializes_unit_lowercase() {
        let result = business_time_between(
            "2021-02-08T09:00:00",
            "2021-02-08T10:00:00",
            "hour",
            &config(),
        )
        .unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["unit"], "hours");
        assert_eq!(json["value"], 1.0);
    }

    // ── formatting helpers ──────────────────────────────────────────────

    #[test]
    fn test_format_human_duration() {
        assert_eq!(format_human_duration(0), "0 minutes");
        assert_eq!(format_human_duration(1), "1 minute");
        assert_eq!(format_human_duration(60), "1 hour");
        assert_eq!(format_human_duration(-125), "2 hours, 5 minutes");
    }
}
