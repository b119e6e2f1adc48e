//! Locating business time: the segment containing an instant, or the nearest
//! business instant before/after it.

use chrono::NaiveDateTime;
use tracing::trace;

use crate::config::CalendarConfig;
use crate::days::{last_business_day, next_business_day};
use crate::error::{BusinessTimeError, Result};
use crate::segments::{resolve_segments, ResolvedSegment};

/// The first segment of `instant`'s day that contains it (boundaries inclusive).
pub fn current_segment(instant: NaiveDateTime, config: &CalendarConfig) -> Option<ResolvedSegment> {
    resolve_segments(instant.date(), config)?
        .into_iter()
        .find(|segment| segment.contains(instant))
}

pub fn is_business_time(instant: NaiveDateTime, config: &CalendarConfig) -> bool {
    current_segment(instant, config).is_some()
}

/// The earliest business instant at or after `instant`.
///
/// Returns `instant` itself when it is already inside a segment.
pub fn next_business_time(instant: NaiveDateTime, config: &CalendarConfig) -> Result<NaiveDateTime> {
    let Some(segments) = resolve_segments(instant.date(), config) else {
        return opening_of_next_business_day(instant, config);
    };

    for segment in &segments {
        if instant < segment.start {
            return Ok(segment.start);
        }
        if instant <= segment.end {
            return Ok(instant);
        }
    }

    opening_of_next_business_day(instant, config)
}

/// The latest business instant at or before `instant`.
///
/// Returns `instant` itself when it is already inside a segment.
pub fn last_business_time(instant: NaiveDateTime, config: &CalendarConfig) -> Result<NaiveDateTime> {
    let Some(segments) = resolve_segments(instant.date(), config) else {
        return closing_of_last_business_day(instant, config);
    };

    for segment in segments.iter().rev() {
        if instant > segment.end {
            return Ok(segment.end);
        }
        if instant >= segment.start {
            return Ok(instant);
        }
    }

    closing_of_last_business_day(instant, config)
}

fn opening_of_next_business_day(
    instant: NaiveDateTime,
    config: &CalendarConfig,
) -> Result<NaiveDateTime> {
    let day = next_business_day(instant, config)?;
    let opening = resolve_segments(day.date(), config)
        .and_then(|segments| segments.first().map(|s| s.start))
        .ok_or_else(|| no_segments(day))?;
    trace!(from = %instant, to = %opening, "snapped forward to next business day");
    Ok(opening)
}

fn closing_of_last_business_day(
    instant: NaiveDateTime,
    config: &CalendarConfig,
) -> Result<NaiveDateTime> {
    let day = last_business_day(instant, config)?;
    let closing = resolve_segments(day.date(), config)
        .and_then(|segments| segments.last().map(|s| s.end))
        .ok_or_else(|| no_segments(day))?;
    trace!(from = %instant, to = %closing, "snapped back to last business day");
    Ok(closing)
}

fn no_segments(day: NaiveDateTime) -> BusinessTimeError {
    BusinessTimeError::NoBusinessTimeFound(format!("business day {} has no segments", day.date()))
}
