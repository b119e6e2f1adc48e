//! Elapsed business time between two instants.
//!
//! Both endpoints are first snapped onto business time *outward*: the earlier
//! one back to the last business instant, the later one forward to the next.
//! An off-hours window therefore grows to the surrounding business time
//! rather than shrinking. [`business_days_diff`] is the visible consequence:
//! Monday 08:00 to Monday 10:00 counts one business day, because the start
//! snaps back to the previous closing.

use chrono::NaiveDateTime;

use crate::config::CalendarConfig;
use crate::days::add_business_days;
use crate::error::Result;
use crate::locate::{is_business_time, last_business_time, next_business_time};
use crate::segments::{resolve_segments, ResolvedSegment};
use crate::unit::BusinessUnit;

/// Ordered, snapped endpoints of a diff and the sign to apply to the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoints {
    pub from: NaiveDateTime,
    pub to: NaiveDateTime,
    /// `-1` when the first argument is after the second, otherwise `1`.
    pub multiplier: i64,
}

/// Order `a`/`b` and snap them outward onto business time.
pub fn fix_endpoints(
    a: NaiveDateTime,
    b: NaiveDateTime,
    config: &CalendarConfig,
) -> Result<Endpoints> {
    let (mut from, mut to, multiplier) = if a > b { (b, a, -1) } else { (a, b, 1) };

    if !is_business_time(from, config) {
        from = last_business_time(from, config)?;
    }
    if !is_business_time(to, config) {
        to = next_business_time(to, config)?;
    }

    Ok(Endpoints {
        from,
        to,
        multiplier,
    })
}

fn minutes_between(earlier: NaiveDateTime, later: NaiveDateTime) -> i64 {
    (later - earlier).num_minutes()
}

fn signed(total: i64, multiplier: i64) -> i64 {
    if total == 0 {
        0
    } else {
        total * multiplier
    }
}

/// Business minutes from `a` to `b`; negative when `b` is before `a`.
pub fn business_minutes_diff(
    a: NaiveDateTime,
    b: NaiveDateTime,
    config: &CalendarConfig,
) -> Result<i64> {
    let Endpoints {
        from,
        to,
        multiplier,
    } = fix_endpoints(a, b, config)?;

    if from.date() == to.date() {
        let segments = resolve_segments(from.date(), config).unwrap_or_default();
        return Ok(signed(same_day_minutes(from, to, &segments), multiplier));
    }

    let mut total = 0;

    for segment in resolve_segments(from.date(), config).unwrap_or_default() {
        if segment.contains(from) {
            total += minutes_between(from, segment.end);
        } else if segment.start >= from {
            total += segment.duration_minutes();
        }
    }

    let mut cursor = add_business_days(from, 1, config)?;
    while cursor.date() < to.date() {
        total += resolve_segments(cursor.date(), config)
            .unwrap_or_default()
            .iter()
            .map(ResolvedSegment::duration_minutes)
            .sum::<i64>();
        cursor = add_business_days(cursor, 1, config)?;
    }

    for segment in resolve_segments(to.date(), config).unwrap_or_default() {
        if segment.contains(to) {
            total += minutes_between(segment.start, to);
        } else if segment.end <= to {
            total += segment.duration_minutes();
        }
    }

    Ok(signed(total, multiplier))
}

/// Minutes of `[from, to]` inside the segment holding `from` and the one
/// holding `to`. Segments lying wholly between the two are not counted.
fn same_day_minutes(from: NaiveDateTime, to: NaiveDateTime, segments: &[ResolvedSegment]) -> i64 {
    let mut total = 0;

    for segment in segments {
        let has_from = segment.contains(from);
        let has_to = segment.contains(to);

        if has_from && has_to {
            total += minutes_between(from, to);
            break;
        } else if has_to {
            total += minutes_between(segment.start, to);
            break;
        } else if has_from {
            total += minutes_between(from, segment.end);
        }
    }

    total
}

/// Business hours from `a` to `b` (fractional, minute precision).
pub fn business_hours_diff(
    a: NaiveDateTime,
    b: NaiveDateTime,
    config: &CalendarConfig,
) -> Result<f64> {
    Ok(business_minutes_diff(a, b, config)? as f64 / 60.0)
}

/// Number of business-day steps from `a`'s day to `b`'s day.
///
/// This is a day count, not a duration: partial-day overlap is ignored.
pub fn business_days_diff(
    a: NaiveDateTime,
    b: NaiveDateTime,
    config: &CalendarConfig,
) -> Result<i64> {
    let Endpoints {
        mut from,
        to,
        multiplier,
    } = fix_endpoints(a, b, config)?;

    let mut days = 0;
    while from.date() != to.date() {
        days += 1;
        from = add_business_days(from, 1, config)?;
    }

    Ok(signed(days, multiplier))
}

/// Elapsed business time from `a` to `b` in `unit`.
pub fn business_time_diff(
    a: NaiveDateTime,
    b: NaiveDateTime,
    unit: BusinessUnit,
    config: &CalendarConfig,
) -> Result<f64> {
    match unit {
        BusinessUnit::Minutes => Ok(business_minutes_diff(a, b, config)? as f64),
        BusinessUnit::Hours => business_hours_diff(a, b, config),
        BusinessUnit::Days => Ok(business_days_diff(a, b, config)? as f64),
    }
}
