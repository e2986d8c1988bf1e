//! Remaining-time formatting

use std::{fmt, str::FromStr, time::Duration};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

const MILLIS_PER_SECOND: u128 = 1_000;
const MILLIS_PER_MINUTE: u128 = 60 * MILLIS_PER_SECOND;
const MILLIS_PER_HOUR: u128 = 60 * MILLIS_PER_MINUTE;
const MILLIS_PER_DAY: u128 = 24 * MILLIS_PER_HOUR;

/// Which fields of a remaining duration are displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum TimeFormatMode {
    /// DD:HH:MM:SS
    #[value(name = "d-h-m-s")]
    #[serde(rename = "d-h-m-s")]
    DaysHoursMinSec,
    /// HH:MM:SS
    #[default]
    #[value(name = "h-m-s")]
    #[serde(rename = "h-m-s")]
    HoursMinSec,
    /// MM:SS
    #[value(name = "m-s")]
    #[serde(rename = "m-s")]
    MinSec,
    /// SS
    #[value(name = "s")]
    #[serde(rename = "s")]
    Sec,
}

impl TimeFormatMode {
    pub fn as_str(self) -> &'static str {
        match self {
            TimeFormatMode::DaysHoursMinSec => "d-h-m-s",
            TimeFormatMode::HoursMinSec => "h-m-s",
            TimeFormatMode::MinSec => "m-s",
            TimeFormatMode::Sec => "s",
        }
    }
}

impl fmt::Display for TimeFormatMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeFormatMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "d-h-m-s" => Ok(TimeFormatMode::DaysHoursMinSec),
            "h-m-s" => Ok(TimeFormatMode::HoursMinSec),
            "m-s" => Ok(TimeFormatMode::MinSec),
            "s" => Ok(TimeFormatMode::Sec),
            other => Err(format!("Unknown time format: {}", other)),
        }
    }
}

/// Whole days, hours, minutes and seconds of a duration (truncated)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeComponents {
    pub days: u128,
    pub hours: u128,
    pub minutes: u128,
    pub seconds: u128,
}

impl TimeComponents {
    /// Split a duration into fields for the given mode.
    ///
    /// The leading field of the mode carries everything above it, so an
    /// `h-m-s` display of 26 hours reads `26:00:00`.
    pub fn split(remaining: Duration, mode: TimeFormatMode) -> Self {
        let total = remaining.as_millis();
        match mode {
            TimeFormatMode::DaysHoursMinSec => Self {
                days: total / MILLIS_PER_DAY,
                hours: total % MILLIS_PER_DAY / MILLIS_PER_HOUR,
                minutes: total % MILLIS_PER_HOUR / MILLIS_PER_MINUTE,
                seconds: total % MILLIS_PER_MINUTE / MILLIS_PER_SECOND,
            },
            TimeFormatMode::HoursMinSec => Self {
                days: 0,
                hours: total / MILLIS_PER_HOUR,
                minutes: total % MILLIS_PER_HOUR / MILLIS_PER_MINUTE,
                seconds: total % MILLIS_PER_MINUTE / MILLIS_PER_SECOND,
            },
            TimeFormatMode::MinSec => Self {
                days: 0,
                hours: 0,
                minutes: total / MILLIS_PER_MINUTE,
                seconds: total % MILLIS_PER_MINUTE / MILLIS_PER_SECOND,
            },
            TimeFormatMode::Sec => Self {
                days: 0,
                hours: 0,
                minutes: 0,
                seconds: total / MILLIS_PER_SECOND,
            },
        }
    }

    /// Render the mode's fields, two digits minimum, joined with `:`
    pub fn render(&self, mode: TimeFormatMode) -> String {
        match mode {
            TimeFormatMode::DaysHoursMinSec => format!(
                "{:02}:{:02}:{:02}:{:02}",
                self.days, self.hours, self.minutes, self.seconds
            ),
            TimeFormatMode::HoursMinSec => {
                format!("{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
            }
            TimeFormatMode::MinSec => format!("{:02}:{:02}", self.minutes, self.seconds),
            TimeFormatMode::Sec => format!("{:02}", self.seconds),
        }
    }
}

/// Format a remaining duration in the given mode
pub fn format_remaining(remaining: Duration, mode: TimeFormatMode) -> String {
    TimeComponents::split(remaining, mode).render(mode)
}
