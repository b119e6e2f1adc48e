//! Calendar configuration: weekly working-hours schedule plus holiday exceptions.
//!
//! A [`CalendarConfig`] is an immutable snapshot. Every operation in this crate
//! takes it by reference, so concurrent callers never share mutable calendar
//! state. Build one from code with the builder methods, or load the JSON wire
//! shape with [`CalendarConfig::from_json_str`] / [`CalendarConfig::from_path`].
//!
//! # Wire shape
//!
//! ```json
//! {
//!   "schedule": {
//!     "sunday": null,
//!     "monday": [{ "start": "09:00:00", "end": "17:00:00" }],
//!     "wednesday": [
//!       { "start": "09:00:00", "end": "12:00:00" },
//!       { "start": "13:00:00", "end": "18:00:00" }
//!     ]
//!   },
//!   "holidays": ["2021-01-01", "2021-01-25"],
//!   "max_lookahead_days": 3650
//! }
//! ```
//!
//! A missing weekday key means "no business hours". A missing `schedule`
//! means the default Mon-Fri 09:00-17:00 schedule.

use std::collections::BTreeSet;
use std::path::Path;

use chrono::{NaiveDate, NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{BusinessTimeError, Result};

/// How many consecutive non-business calendar days a search may cross before
/// giving up with [`BusinessTimeError::NoBusinessTimeFound`].
pub const DEFAULT_MAX_LOOKAHEAD_DAYS: u32 = 3650;

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

// ── Segment ─────────────────────────────────────────────────────────────────

/// A time-of-day working window, e.g. 09:00:00-17:00:00.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Segment {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl Segment {
    /// Create a segment, truncating both ends to whole seconds.
    ///
    /// # Errors
    ///
    /// Returns [`BusinessTimeError::InvalidScheduleConfig`] unless `start < end`.
    pub fn new(start: NaiveTime, end: NaiveTime) -> Result<Self> {
        let start = truncate_to_seconds(start);
        let end = truncate_to_seconds(end);
        if start >= end {
            return Err(BusinessTimeError::InvalidScheduleConfig(format!(
                "segment start {start} must be before end {end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// Parse a segment from `"HH:MM:SS"` (or `"HH:MM"`) strings.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Self::new(parse_time_of_day(start)?, parse_time_of_day(end)?)
    }

    /// Length of the window in whole minutes.
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

fn truncate_to_seconds(time: NaiveTime) -> NaiveTime {
    time.with_nanosecond(0).unwrap_or(time)
}

fn parse_time_of_day(s: &str) -> Result<NaiveTime> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .map_err(|e| BusinessTimeError::InvalidScheduleConfig(format!("'{s}': {e}")))
}

fn hms(hour: u32, minute: u32, second: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, second).unwrap_or_default()
}

// ── WeeklySchedule ──────────────────────────────────────────────────────────

/// Working hours for each of the seven weekdays.
///
/// Each weekday is either closed (`None`) or a non-empty list of segments,
/// ordered ascending and mutually non-overlapping. Touching segments
/// (`a.end == b.start`) are allowed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ScheduleMap", into = "ScheduleMap")]
pub struct WeeklySchedule {
    /// Indexed by `Weekday::num_days_from_sunday`.
    days: [Option<Vec<Segment>>; 7],
}

impl WeeklySchedule {
    /// A schedule with no business hours on any weekday.
    pub fn empty() -> Self {
        Self {
            days: Default::default(),
        }
    }

    /// Monday to Friday, 09:00:00-17:00:00. Saturday and Sunday closed.
    pub fn default_working_hours() -> Self {
        let office = vec![Segment {
            start: hms(9, 0, 0),
            end: hms(17, 0, 0),
        }];
        let mut schedule = Self::empty();
        for weekday in [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
        ] {
            schedule.days[day_index(weekday)] = Some(office.clone());
        }
        schedule
    }

    /// Replace the working hours of `weekday`.
    ///
    /// # Errors
    ///
    /// Returns [`BusinessTimeError::InvalidScheduleConfig`] if `segments` is empty,
    /// contains a segment with `start >= end`, or is unordered/overlapping.
    pub fn with_day(mut self, weekday: Weekday, segments: Vec<Segment>) -> Result<Self> {
        self.days[day_index(weekday)] = Some(validate_day(weekday, segments)?);
        Ok(self)
    }

    /// Mark `weekday` as having no business hours.
    pub fn without_day(mut self, weekday: Weekday) -> Self {
        self.days[day_index(weekday)] = None;
        self
    }

    /// The configured segments of `weekday`, or `None` if it has no business hours.
    pub fn segments(&self, weekday: Weekday) -> Option<&[Segment]> {
        self.days[day_index(weekday)].as_deref()
    }

    /// Whether `weekday` has any business hours.
    pub fn has_business_hours(&self, weekday: Weekday) -> bool {
        self.segments(weekday).is_some_and(|s| !s.is_empty())
    }

    /// True when no weekday has business hours.
    pub fn is_closed(&self) -> bool {
        WEEKDAYS.iter().all(|&d| !self.has_business_hours(d))
    }
}

impl Default for WeeklySchedule {
    fn default() -> Self {
        Self::default_working_hours()
    }
}

fn day_index(weekday: Weekday) -> usize {
    weekday.num_days_from_sunday() as usize
}

fn validate_day(weekday: Weekday, segments: Vec<Segment>) -> Result<Vec<Segment>> {
    if segments.is_empty() {
        return Err(BusinessTimeError::InvalidScheduleConfig(format!(
            "{weekday}: segment list is empty (use null for a day off)"
        )));
    }

    let segments = segments
        .into_iter()
        .map(|s| match Segment::new(s.start, s.end) {
            Err(BusinessTimeError::InvalidScheduleConfig(msg)) => Err(
                BusinessTimeError::InvalidScheduleConfig(format!("{weekday}: {msg}")),
            ),
            other => other,
        })
        .collect::<Result<Vec<_>>>()?;

    for pair in segments.windows(2) {
        if pair[1].start < pair[0].end {
            return Err(BusinessTimeError::InvalidScheduleConfig(format!(
                "{weekday}: segment {}-{} overlaps or precedes {}-{}",
                pair[1].start, pair[1].end, pair[0].start, pair[0].end
            )));
        }
    }

    Ok(segments)
}

/// JSON shape of [`WeeklySchedule`]: one key per weekday name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct ScheduleMap {
    #[serde(default)]
    sunday: Option<Vec<Segment>>,
    #[serde(default)]
    monday: Option<Vec<Segment>>,
    #[serde(default)]
    tuesday: Option<Vec<Segment>>,
    #[serde(default)]
    wednesday: Option<Vec<Segment>>,
    #[serde(default)]
    thursday: Option<Vec<Segment>>,
    #[serde(default)]
    friday: Option<Vec<Segment>>,
    #[serde(default)]
    saturday: Option<Vec<Segment>>,
}

impl TryFrom<ScheduleMap> for WeeklySchedule {
    type Error = BusinessTimeError;

    fn try_from(map: ScheduleMap) -> Result<Self> {
        let entries = [
            (Weekday::Sun, map.sunday),
            (Weekday::Mon, map.monday),
            (Weekday::Tue, map.tuesday),
            (Weekday::Wed, map.wednesday),
            (Weekday::Thu, map.thursday),
            (Weekday::Fri, map.friday),
            (Weekday::Sat, map.saturday),
        ];

        let mut schedule = Self::empty();
        for (weekday, segments) in entries {
            if let Some(segments) = segments {
                schedule = schedule.with_day(weekday, segments)?;
            }
        }
        Ok(schedule)
    }
}

impl From<WeeklySchedule> for ScheduleMap {
    fn from(schedule: WeeklySchedule) -> Self {
        let [sunday, monday, tuesday, wednesday, thursday, friday, saturday] = schedule.days;
        Self {
            sunday,
            monday,
            tuesday,
            wednesday,
            thursday,
            friday,
            saturday,
        }
    }
}

// ── HolidaySet ──────────────────────────────────────────────────────────────

/// Explicit calendar dates that are never business days.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HolidaySet(BTreeSet<NaiveDate>);

impl HolidaySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `"YYYY-MM-DD"` strings into a holiday set.
    ///
    /// # Errors
    ///
    /// Returns [`BusinessTimeError::InvalidConfig`] on the first malformed date.
    pub fn parse<'a, I>(dates: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        dates
            .into_iter()
            .map(|s| {
                NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
                    .map_err(|e| BusinessTimeError::InvalidConfig(format!("holiday '{s}': {e}")))
            })
            .collect()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.0.contains(&date)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<NaiveDate> for HolidaySet {
    fn from_iter<T: IntoIterator<Item = NaiveDate>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

// ── CalendarConfig ──────────────────────────────────────────────────────────

fn default_max_lookahead_days() -> u32 {
    DEFAULT_MAX_LOOKAHEAD_DAYS
}

/// Weekly schedule + holidays + search bound, passed into every operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarConfig {
    #[serde(default)]
    schedule: WeeklySchedule,
    #[serde(default)]
    holidays: HolidaySet,
    #[serde(default = "default_max_lookahead_days")]
    max_lookahead_days: u32,
}

impl CalendarConfig {
    pub fn new(schedule: WeeklySchedule, holidays: HolidaySet) -> Self {
        Self {
            schedule,
            holidays,
            max_lookahead_days: DEFAULT_MAX_LOOKAHEAD_DAYS,
        }
    }

    /// Parse the JSON wire shape.
    ///
    /// # Errors
    ///
    /// Returns [`BusinessTimeError::InvalidConfig`] if the JSON is malformed or
    /// any weekday fails schedule validation.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| BusinessTimeError::InvalidConfig(e.to_string()))
    }

    /// Read and parse a JSON configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| BusinessTimeError::InvalidConfig(format!("'{}': {}", path.display(), e)))?;
        Self::from_json_str(&json)
    }

    pub fn with_schedule(mut self, schedule: WeeklySchedule) -> Self {
        self.schedule = schedule;
        self
    }

    pub fn with_holidays(mut self, holidays: HolidaySet) -> Self {
        self.holidays = holidays;
        self
    }

    pub fn with_max_lookahead_days(mut self, days: u32) -> Self {
        self.max_lookahead_days = days;
        self
    }

    pub fn schedule(&self) -> &WeeklySchedule {
        &self.schedule
    }

    pub fn holidays(&self) -> &HolidaySet {
        &self.holidays
    }

    pub fn max_lookahead_days(&self) -> u32 {
        self.max_lookahead_days
    }
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self::new(WeeklySchedule::default(), HolidaySet::default())
    }
}
