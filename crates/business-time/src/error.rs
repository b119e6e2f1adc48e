//! Error types for business-time operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BusinessTimeError {
    #[error("Invalid business time unit: {0}")]
    InvalidBusinessTimeUnit(String),

    #[error("No business time found: {0}")]
    NoBusinessTimeFound(String),

    #[error("Invalid schedule config: {0}")]
    InvalidScheduleConfig(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Invalid datetime: {0}")]
    InvalidDatetime(String),

    #[error("Datetime out of range: {0}")]
    DatetimeOutOfRange(String),
}

pub type Result<T> = std::result::Result<T, BusinessTimeError>;
