//! Business minute/hour stepping across segment and day boundaries.
//!
//! The walk snaps onto business time, then repeatedly jumps to the boundary
//! of the current segment in the direction of travel (or by the remaining
//! amount, whichever is shorter). Only minutes spent inside a segment are
//! consumed; gaps between segments and days are crossed by re-snapping.
//!
//! When the cursor sits exactly on a boundary the jump would be zero, so the
//! cursor is pushed one minute past it without consuming anything. The next
//! iteration then finds no segment and re-snaps. This means adding to a
//! closing instant lands on the next opening, never on the closing itself.

use chrono::NaiveDateTime;
use tracing::{debug, trace};

use crate::config::CalendarConfig;
use crate::days::Direction;
use crate::error::Result;
use crate::locate::{current_segment, last_business_time, next_business_time};

fn snap(instant: NaiveDateTime, direction: Direction, config: &CalendarConfig) -> Result<NaiveDateTime> {
    match direction {
        Direction::Forward => next_business_time(instant, config),
        Direction::Backward => last_business_time(instant, config),
    }
}

/// Move `minutes` business minutes from `instant` in `direction`.
///
/// # Errors
///
/// Returns [`BusinessTimeError::NoBusinessTimeFound`](crate::BusinessTimeError::NoBusinessTimeFound)
/// if a snap exhausts the configured lookahead.
pub fn add_or_subtract_business_minutes(
    instant: NaiveDateTime,
    minutes: i64,
    direction: Direction,
    config: &CalendarConfig,
) -> Result<NaiveDateTime> {
    let mut cursor = snap(instant, direction, config)?;
    let mut remaining = minutes;

    while remaining > 0 {
        let Some(segment) = current_segment(cursor, config) else {
            cursor = snap(cursor, direction, config)?;
            trace!(%cursor, remaining, "re-snapped onto business time");
            continue;
        };

        let distance = match direction {
            Direction::Forward => (segment.end - cursor).num_minutes(),
            Direction::Backward => (cursor - segment.start).num_minutes(),
        };

        let mut jump = distance.min(remaining);
        remaining -= jump;

        if jump == 0 && remaining > 0 {
            jump = 1;
        }

        cursor = direction.step_minutes(cursor, jump)?;
    }

    debug!(start = %instant, end = %cursor, minutes, ?direction, "business minute walk");
    Ok(cursor)
}

pub fn add_business_minutes(
    instant: NaiveDateTime,
    minutes: u32,
    config: &CalendarConfig,
) -> Result<NaiveDateTime> {
    add_or_subtract_business_minutes(instant, i64::from(minutes), Direction::Forward, config)
}

pub fn subtract_business_minutes(
    instant: NaiveDateTime,
    minutes: u32,
    config: &CalendarConfig,
) -> Result<NaiveDateTime> {
    add_or_subtract_business_minutes(instant, i64::from(minutes), Direction::Backward, config)
}

pub fn add_business_hours(
    instant: NaiveDateTime,
    hours: u32,
    config: &CalendarConfig,
) -> Result<NaiveDateTime> {
    add_or_subtract_business_minutes(instant, i64::from(hours) * 60, Direction::Forward, config)
}

pub fn subtract_business_hours(
    instant: NaiveDateTime,
    hours: u32,
    config: &CalendarConfig,
) -> Result<NaiveDateTime> {
    add_or_subtract_business_minutes(instant, i64::from(hours) * 60, Direction::Backward, config)
}
