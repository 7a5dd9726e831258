//! Puzzle days, parts and the event calendar

use crate::error::HarnessError;
use chrono::{DateTime, Datelike, TimeDelta, TimeZone, Utc};
use std::fmt;
use std::str::FromStr;

/// One numbered daily puzzle, always within `1..=25`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Unit(u8);

impl Unit {
    /// First puzzle day
    pub const FIRST: u8 = 1;
    /// Last puzzle day
    pub const LAST: u8 = 25;

    pub fn new(day: u8) -> Result<Self, HarnessError> {
        if (Self::FIRST..=Self::LAST).contains(&day) {
            Ok(Self(day))
        } else {
            Err(HarnessError::InvalidUnit(day.to_string()))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Days `1..=max`, with `max` clamped to the last puzzle day
    pub fn up_to(max: u8) -> impl Iterator<Item = Unit> {
        (Self::FIRST..=max.min(Self::LAST)).map(Unit)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u8> for Unit {
    type Error = HarnessError;

    fn try_from(day: u8) -> Result<Self, Self::Error> {
        Self::new(day)
    }
}

impl FromStr for Unit {
    type Err = HarnessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u8>()
            .map_err(|_| HarnessError::InvalidUnit(s.to_string()))
            .and_then(Self::new)
    }
}

/// One of the two scored parts of a puzzle
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    One,
    Two,
}

impl Stage {
    pub fn number(self) -> u8 {
        match self {
            Stage::One => 1,
            Stage::Two => 2,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

impl TryFrom<u8> for Stage {
    type Error = HarnessError;

    fn try_from(part: u8) -> Result<Self, Self::Error> {
        match part {
            1 => Ok(Stage::One),
            2 => Ok(Stage::Two),
            other => Err(HarnessError::InvalidStage(other.to_string())),
        }
    }
}

impl FromStr for Stage {
    type Err = HarnessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u8>()
            .map_err(|_| HarnessError::InvalidStage(s.to_string()))
            .and_then(Self::try_from)
    }
}

/// Release schedule of one event year
///
/// Day `n` unlocks on December `n` at 05:00 UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventCalendar {
    year: u16,
    first_unlock: DateTime<Utc>,
}

impl EventCalendar {
    pub fn new(year: u16) -> Result<Self, HarnessError> {
        let first_unlock = Utc
            .with_ymd_and_hms(i32::from(year), 12, 1, 5, 0, 0)
            .single()
            .ok_or_else(|| HarnessError::Config(format!("Invalid event year {}", year)))?;
        Ok(Self { year, first_unlock })
    }

    pub fn year(&self) -> u16 {
        self.year
    }

    /// Instant at which the input of `unit` becomes available
    pub fn unlock_instant(&self, unit: Unit) -> DateTime<Utc> {
        self.first_unlock + TimeDelta::days(i64::from(unit.get() - Unit::FIRST))
    }

    pub fn is_unlocked(&self, unit: Unit, now: DateTime<Utc>) -> bool {
        now >= self.unlock_instant(unit)
    }

    fn in_event_month(&self, now: DateTime<Utc>) -> bool {
        now.year() == i32::from(self.year) && now.month() == 12
    }

    /// Highest day whose input may be fetched at `now`
    ///
    /// 0 before the event month, the day of month during it, 25 afterwards.
    pub fn released_max(&self, now: DateTime<Utc>) -> u8 {
        if self.in_event_month(now) {
            Self::day_of_month(now)
        } else if now < self.first_unlock {
            0
        } else {
            Unit::LAST
        }
    }

    /// Highest day the batch runner attempts at `now`
    pub fn runnable_max(&self, now: DateTime<Utc>) -> u8 {
        if self.in_event_month(now) {
            Self::day_of_month(now)
        } else {
            Unit::LAST
        }
    }

    fn day_of_month(now: DateTime<Utc>) -> u8 {
        // day() is at most 31
        (now.day() as u8).min(Unit::LAST)
    }
}
