//! Business time units and unit-dispatched shifting.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::config::CalendarConfig;
use crate::days::{add_business_days, subtract_business_days};
use crate::error::{BusinessTimeError, Result};
use crate::minutes::{
    add_business_hours, add_business_minutes, subtract_business_hours, subtract_business_minutes,
};

/// The units business time can be measured or shifted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BusinessUnit {
    #[serde(alias = "minute")]
    Minutes,
    #[serde(alias = "hour")]
    Hours,
    #[serde(alias = "day")]
    Days,
}

impl BusinessUnit {
    pub fn as_str(self) -> &'static str {
        match self {
            BusinessUnit::Minutes => "minutes",
            BusinessUnit::Hours => "hours",
            BusinessUnit::Days => "days",
        }
    }
}

impl fmt::Display for BusinessUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BusinessUnit {
    type Err = BusinessTimeError;

    /// Accepts the singular or plural lowercase name; anything else is rejected.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "minute" | "minutes" => Ok(BusinessUnit::Minutes),
            "hour" | "hours" => Ok(BusinessUnit::Hours),
            "day" | "days" => Ok(BusinessUnit::Days),
            _ => Err(BusinessTimeError::InvalidBusinessTimeUnit(format!(
                "'{s}' (expected minute(s), hour(s) or day(s))"
            ))),
        }
    }
}

/// Add `amount` business `unit`s to `instant`.
pub fn add_business_time(
    instant: NaiveDateTime,
    amount: u32,
    unit: BusinessUnit,
    config: &CalendarConfig,
) -> Result<NaiveDateTime> {
    match unit {
        BusinessUnit::Minutes => add_business_minutes(instant, amount, config),
        BusinessUnit::Hours => add_business_hours(instant, amount, config),
        BusinessUnit::Days => add_business_days(instant, amount, config),
    }
}

/// Subtract `amount` business `unit`s from `instant`.
pub fn subtract_business_time(
    instant: NaiveDateTime,
    amount: u32,
    unit: BusinessUnit,
    config: &CalendarConfig,
) -> Result<NaiveDateTime> {
    match unit {
        BusinessUnit::Minutes => subtract_business_minutes(instant, amount, config),
        BusinessUnit::Hours => subtract_business_hours(instant, amount, config),
        BusinessUnit::Days => subtract_business_days(instant, amount, config),
    }
}
