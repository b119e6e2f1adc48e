//! # business-time
//!
//! Business calendar arithmetic.
//!
//! Given a weekly working-hours schedule and a list of holiday dates, this crate
//! answers whether an instant is business time, moves instants forward or
//! backward by business days, hours, or minutes while skipping nights, weekends
//! and holidays, and measures the business time elapsed between two instants.
//! Every function is pure and takes the [`CalendarConfig`] explicitly; there is
//! no process-wide calendar state.
//!
//! ## Modules
//!
//! - [`config`] — Weekly schedule, holidays, lookahead bound, JSON wire shape
//! - [`classify`] — Holiday / business-day classification
//! - [`segments`] — A business day's working windows as concrete instants
//! - [`locate`] — Containing segment, next/last business instant
//! - [`days`] — Business-day stepping
//! - [`minutes`] — Business minute/hour stepping across segment and day gaps
//! - [`unit`] — Minutes/hours/days unit and unit-dispatched shifting
//! - [`diff`] — Elapsed business minutes, hours, and days
//! - [`temporal`] — String-in, serializable-struct-out facade for bindings and the CLI
//! - [`error`] — Error types
//!
//! ## Example
//!
//! ```
//! use business_time::{add_business_hours, CalendarConfig};
//! use chrono::NaiveDate;
//!
//! let config = CalendarConfig::default(); // Mon-Fri 09:00-17:00
//! let friday = NaiveDate::from_ymd_opt(2021, 2, 19)
//!     .unwrap()
//!     .and_hms_opt(15, 0, 0)
//!     .unwrap();
//! let due = add_business_hours(friday, 4, &config).unwrap();
//! assert_eq!(due.to_string(), "2021-02-22 11:00:00");
//! ```

pub mod classify;
pub mod config;
pub mod days;
pub mod diff;
pub mod error;
pub mod locate;
pub mod minutes;
pub mod segments;
pub mod temporal;
pub mod unit;

pub use classify::{is_business_day, is_holiday};
pub use config::{CalendarConfig, HolidaySet, Segment, WeeklySchedule, DEFAULT_MAX_LOOKAHEAD_DAYS};
pub use days::{
    add_business_days, add_or_subtract_business_days, last_business_day, next_business_day,
    subtract_business_days, Direction,
};
pub use diff::{
    business_days_diff, business_hours_diff, business_minutes_diff, business_time_diff,
    fix_endpoints, Endpoints,
};
pub use error::{BusinessTimeError, Result};
pub use locate::{current_segment, is_business_time, last_business_time, next_business_time};
pub use minutes::{
    add_business_hours, add_business_minutes, add_or_subtract_business_minutes,
    subtract_business_hours, subtract_business_minutes,
};
pub use segments::{resolve_segments, ResolvedSegment};
pub use temporal::{
    business_time_between, check_business_time, parse_datetime, shift_business_time,
    BusinessDuration, BusinessTimeStatus, ShiftedTimestamp,
};
pub use unit::{add_business_time, subtract_business_time, BusinessUnit};
