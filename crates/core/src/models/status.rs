//! Booking status of a field schedule.
//!
//! Status is stored as a numeric code and shown to callers as its display
//! string. Which transitions are allowed is decided by the schedule
//! lifecycle service, not here.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::BookingError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScheduleStatus {
    /// The slot can still be booked
    Available,
    /// The slot is taken
    Booked,
}

impl ScheduleStatus {
    pub const AVAILABLE_CODE: i32 = 100;
    pub const BOOKED_CODE: i32 = 200;

    /// Numeric code used for persistence.
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::Available => Self::AVAILABLE_CODE,
            Self::Booked => Self::BOOKED_CODE,
        }
    }

    /// Decodes a persisted status code. Unknown codes yield `None`.
    #[must_use]
    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            Self::AVAILABLE_CODE => Some(Self::Available),
            Self::BOOKED_CODE => Some(Self::Booked),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Booked => "Booked",
        }
    }
}

impl fmt::Display for ScheduleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScheduleStatus {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Available" => Ok(Self::Available),
            "Booked" => Ok(Self::Booked),
            other => Err(BookingError::Validation(format!(
                "Unknown schedule status: {other}"
            ))),
        }
    }
}
