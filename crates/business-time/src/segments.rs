//! Segment resolution: a business day's working windows as concrete instants.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::classify::is_business_day;
use crate::config::CalendarConfig;

/// A configured [`Segment`](crate::config::Segment) anchored to one calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResolvedSegment {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl ResolvedSegment {
    /// Inclusive on both ends: the opening and closing instants are business time.
    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        self.start <= instant && instant <= self.end
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

/// Materialize the working windows of `date`, in configured order.
///
/// Returns `None` if `date` is not a business day.
pub fn resolve_segments(date: NaiveDate, config: &CalendarConfig) -> Option<Vec<ResolvedSegment>> {
    if !is_business_day(date, config) {
        return None;
    }

    let segments = config.schedule().segments(date.weekday())?;
    Some(
        segments
            .iter()
            .map(|segment| ResolvedSegment {
                start: date.and_time(segment.start),
                end: date.and_time(segment.end),
            })
            .collect(),
    )
}
