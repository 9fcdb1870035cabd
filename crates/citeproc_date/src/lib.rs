//! citeproc_date - partial ISO 8601 dates as stored in repository metadata
//!
//! Repository date fields hold a bare year, a year and month, a full calendar
//! date, or occasionally a full timestamp (`2002-05-17T09:30:00Z`). This crate
//! parses those forms and exposes the components a CSL `date-parts` array
//! needs. No calendar validation is done beyond range checks on month and day.

use std::fmt;
use std::str::FromStr;

use winnow::combinator::{not, opt, preceded, terminated};
use winnow::error::{ContextError, ErrMode};
use winnow::prelude::*;
use winnow::stream::AsChar;
use winnow::token::{one_of, take_while};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A date known to year, month or day precision.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PartialDate {
    pub year: i32,
    /// 1-12 when present.
    pub month: Option<u32>,
    /// 1-31 when present; never set without a month.
    pub day: Option<u32>,
    pub time: Option<Time>,
}

/// Time of day attached to a full date.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Time {
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

/// How much of a [`PartialDate`] is known.
#[derive(Debug, PartialEq, Eq, Clone, Copy, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Precision {
    Year,
    Month,
    Day,
}

/// Errors raised when a date string cannot be read.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateError {
    #[error("no four-digit year at the start of {0:?}")]
    MissingYear(String),
    #[error("unexpected {rest:?} after the date in {input:?}")]
    TrailingInput { input: String, rest: String },
}

impl PartialDate {
    pub fn year(year: i32) -> Self {
        Self {
            year,
            month: None,
            day: None,
            time: None,
        }
    }

    pub fn year_month(year: i32, month: u32) -> Self {
        Self {
            month: Some(month),
            ..Self::year(year)
        }
    }

    pub fn ymd(year: i32, month: u32, day: u32) -> Self {
        Self {
            month: Some(month),
            day: Some(day),
            ..Self::year(year)
        }
    }

    pub fn precision(&self) -> Precision {
        match (self.month, self.day) {
            (Some(_), Some(_)) => Precision::Day,
            (Some(_), None) => Precision::Month,
            _ => Precision::Year,
        }
    }

    /// Components in `date-parts` order.
    ///
    /// The year is always present. The month follows only when it is
    /// greater than zero, and the day only when the month was emitted.
    pub fn parts(&self) -> Vec<i32> {
        let mut parts = vec![self.year];
        if let Some(month) = self.month.filter(|m| *m > 0) {
            parts.push(month as i32);
            if let Some(day) = self.day.filter(|d| *d > 0) {
                parts.push(day as i32);
            }
        }
        parts
    }

    /// Parses the leading date of `input` and ignores anything after it.
    ///
    /// `"2002-13"` reads as the year 2002, since `13` is not a month.
    pub fn parse_prefix(input: &str) -> Result<Self, DateError> {
        let mut rest = input.trim();
        parse_date(&mut rest).map_err(|_| DateError::MissingYear(input.to_string()))
    }
}

impl FromStr for PartialDate {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut input = s.trim();
        let date = parse_date(&mut input).map_err(|_| DateError::MissingYear(s.to_string()))?;
        if date.time.is_some() {
            if let Some(rest) = input.strip_prefix('Z') {
                input = rest;
            }
        }
        if !input.is_empty() {
            return Err(DateError::TrailingInput {
                input: s.to_string(),
                rest: input.to_string(),
            });
        }
        Ok(date)
    }
}

impl fmt::Display for PartialDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.year)?;
        if let Some(m) = self.month {
            write!(f, "-{:02}", m)?;
            if let Some(d) = self.day {
                write!(f, "-{:02}", d)?;
            }
        }
        if let Some(t) = self.time {
            write!(f, "T{}Z", t)?;
        }
        Ok(())
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}

fn two_digits(input: &mut &str) -> Result<u32, ErrMode<ContextError>> {
    take_while(2_usize, AsChar::is_dec_digit)
        .try_map(|s: &str| s.parse::<u32>())
        .parse_next(input)
}

/// Exactly four digits; a fifth digit means this is not a year.
fn parse_year(input: &mut &str) -> Result<i32, ErrMode<ContextError>> {
    terminated(
        take_while(4_usize, AsChar::is_dec_digit),
        not(one_of(|c: char| c.is_ascii_digit())),
    )
    .try_map(|s: &str| s.parse::<i32>())
    .parse_next(input)
}

fn parse_month(input: &mut &str) -> Result<u32, ErrMode<ContextError>> {
    let val = two_digits(input)?;
    match val {
        1..=12 => Ok(val),
        _ => Err(ErrMode::Backtrack(ContextError::default())),
    }
}

fn parse_day(input: &mut &str) -> Result<u32, ErrMode<ContextError>> {
    let val = two_digits(input)?;
    match val {
        1..=31 => Ok(val),
        _ => Err(ErrMode::Backtrack(ContextError::default())),
    }
}

fn parse_time(input: &mut &str) -> Result<Time, ErrMode<ContextError>> {
    let hour = two_digits(input)?;
    let _ = ':'.parse_next(input)?;
    let minute = two_digits(input)?;
    let _ = ':'.parse_next(input)?;
    let second = two_digits(input)?;

    Ok(Time {
        hour,
        minute,
        second,
    })
}

/// Parses `YYYY[-MM[-DD[THH:MM:SS]]]` from the front of `input`.
///
/// Optional components that fail to parse are left in the input rather than
/// failing the whole date.
pub fn parse_date(input: &mut &str) -> Result<PartialDate, ErrMode<ContextError>> {
    let year = parse_year.parse_next(input)?;
    let month = opt(preceded('-', parse_month)).parse_next(input)?;
    let day = if month.is_some() {
        opt(preceded('-', parse_day)).parse_next(input)?
    } else {
        None
    };
    let time = if day.is_some() {
        opt(preceded('T', parse_time)).parse_next(input)?
    } else {
        None
    };

    Ok(PartialDate {
        year,
        month,
        day,
        time,
    })
}
