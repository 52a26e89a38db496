//! Ordinal calendar.
//!
//! Converts calendar fields to frequency-relative ordinals and back. Ordinals count whole
//! periods since the period containing 1970-01-01, using the proleptic Gregorian calendar.
//!
//! Day-based frequencies go through the unix day number (days since 1970-01-01):
//!
//! - weeks: `floor((day + 3 - adj) / 7) + 1`, where `adj` is 0 for weeks ending Sunday
//!   and 6 for weeks ending Saturday;
//! - business days: Monday to Friday get consecutive ordinals, Saturday and Sunday share
//!   the ordinal of the following Monday;
//! - intraday: `day * units_per_day + units elapsed since midnight`.
//!
//! Annual and quarterly ordinals are named by fiscal year: with an anchor month other than
//! December, the months after the anchor belong to the next year's period.

use serde::{Deserialize, Serialize};
use time::{Date, Month};

use crate::frequency::{conversion_factor, FreqGroup};
use crate::{Frequency, PeriodError};

pub const MIN_YEAR: i32 = 1;
pub const MAX_YEAR: i32 = 9999;

pub(crate) const NANOS_PER_SECOND: i64 = 1_000_000_000;
pub(crate) const NANOS_PER_DAY: i64 = 86_400 * NANOS_PER_SECOND;

const UNIX_EPOCH_JULIAN_DAY: i64 = 2_440_588;
const EPOCH_YEAR: i64 = 1970;

/// Scratch record exchanged between the parser/formatter and the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CalendarFields {
    pub year: i32,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub microsecond: u32,
    pub picosecond: u32,
}

impl CalendarFields {
    pub const fn new(year: i32, month: u8, day: u8) -> Self {
        Self {
            year,
            month,
            day,
            hour: 0,
            minute: 0,
            second: 0,
            microsecond: 0,
            picosecond: 0,
        }
    }

    /// January 1st of `year`.
    pub const fn from_year(year: i32) -> Self {
        Self::new(year, 1, 1)
    }

    pub fn from_date(date: Date) -> Self {
        Self::new(date.year(), date.month() as u8, date.day())
    }

    pub const fn with_time(mut self, hour: u8, minute: u8, second: u8) -> Self {
        self.hour = hour;
        self.minute = minute;
        self.second = second;
        self
    }

    pub const fn with_subsecond(mut self, microsecond: u32, picosecond: u32) -> Self {
        self.microsecond = microsecond;
        self.picosecond = picosecond;
        self
    }

    /// Validated calendar date of these fields.
    pub fn date(&self) -> Result<Date, PeriodError> {
        check_year(self.year)?;
        let month = Month::try_from(self.month)
            .map_err(|_| PeriodError::field("month", self.month))?;
        Date::from_calendar_date(self.year, month, self.day)
            .map_err(|_| PeriodError::field("day", self.day))
    }

    /// Validated time of day in nanoseconds. Picoseconds below one nanosecond are dropped.
    pub fn nanos_of_day(&self) -> Result<i64, PeriodError> {
        if self.hour > 23 {
            return Err(PeriodError::field("hour", self.hour));
        }
        if self.minute > 59 {
            return Err(PeriodError::field("minute", self.minute));
        }
        if self.second > 59 {
            return Err(PeriodError::field("second", self.second));
        }
        if self.microsecond > 999_999 {
            return Err(PeriodError::field("microsecond", self.microsecond));
        }
        if self.picosecond > 999_999 {
            return Err(PeriodError::field("picosecond", self.picosecond));
        }

        let seconds =
            i64::from(self.hour) * 3600 + i64::from(self.minute) * 60 + i64::from(self.second);
        Ok(seconds * NANOS_PER_SECOND
            + i64::from(self.microsecond) * 1000
            + i64::from(self.picosecond) / 1000)
    }

    fn with_nanos_of_day(self, nanos: i64) -> Self {
        let seconds = nanos / NANOS_PER_SECOND;
        let subsecond = nanos % NANOS_PER_SECOND;
        self.with_time(
            (seconds / 3600) as u8,
            (seconds / 60 % 60) as u8,
            (seconds % 60) as u8,
        )
        .with_subsecond((subsecond / 1000) as u32, (subsecond % 1000) as u32 * 1000)
    }
}

/// Which end of a period an instant-based conversion uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum How {
    #[default]
    Start,
    End,
}

/// First and last instant of a period, as unix days plus nanoseconds into that day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Span {
    pub first_day: i64,
    pub start_nanos: i64,
    pub last_day: i64,
    pub end_nanos: i64,
}

/// Weekend handling when an instant is mapped onto business days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Roll {
    /// Saturday and Sunday take Monday's ordinal.
    Forward,
    /// Saturday and Sunday take Friday's ordinal.
    Back,
}

/// Ordinal of the `freq` period containing `fields`.
pub fn to_ordinal(fields: &CalendarFields, freq: Frequency) -> Result<i64, PeriodError> {
    let date = fields.date()?;
    let nanos = fields.nanos_of_day()?;
    ordinal_of(date, nanos, freq, Roll::Forward)
}

/// Calendar fields of the period `ordinal` of `freq`.
///
/// Date fields describe the last day of the period. For intraday frequencies the time
/// fields hold the start of the unit; otherwise they are zero.
pub fn from_ordinal(ordinal: i64, freq: Frequency) -> Result<CalendarFields, PeriodError> {
    let bounds = span(ordinal, freq)?;
    let fields = CalendarFields::from_date(date_of_unix_day(bounds.last_day)?);
    if freq.is_intraday() {
        Ok(fields.with_nanos_of_day(bounds.start_nanos))
    } else {
        Ok(fields)
    }
}

/// Converts `ordinal` of `from` into the `to` period containing its start or end instant.
///
/// Day and intraday frequencies convert through the fixed factor table. Every other pair
/// goes through the calendar. Weeks and business days do not convert into each other.
pub fn asfreq(ordinal: i64, from: Frequency, to: Frequency, how: How) -> Result<i64, PeriodError> {
    if from == to {
        return Ok(ordinal);
    }

    if let Ok(factor) = conversion_factor(from, to) {
        if to.code() < from.code() {
            return Ok(ordinal.div_euclid(factor));
        }
        let offset = match how {
            How::Start => 0,
            How::End => factor - 1,
        };
        return ordinal
            .checked_mul(factor)
            .and_then(|start| start.checked_add(offset))
            .ok_or_else(|| PeriodError::field("ordinal", ordinal));
    }

    if let (Frequency::Week { .. }, Frequency::BusinessDay)
    | (Frequency::BusinessDay, Frequency::Week { .. }) = (from, to)
    {
        return Err(PeriodError::IncompatibleFrequency {
            from: from.to_string(),
            to: to.to_string(),
        });
    }

    // Month and coarser periods roll inward so the business day stays inside the period.
    let inward = matches!(
        from.group(),
        FreqGroup::Annual | FreqGroup::Quarterly | FreqGroup::Monthly
    );
    let bounds = span(ordinal, from)?;
    let (day, nanos, roll) = match how {
        How::Start if inward => (bounds.first_day, bounds.start_nanos, Roll::Forward),
        How::Start => (bounds.first_day, bounds.start_nanos, Roll::Back),
        How::End if inward => (bounds.last_day, bounds.end_nanos, Roll::Back),
        How::End => (bounds.last_day, bounds.end_nanos, Roll::Forward),
    };
    let date = date_of_unix_day(day)?;
    ordinal_of(date, nanos, to, roll)
}

/// Fiscal year and fiscal quarter (1-4) of a calendar month for a year ending in `end`.
pub(crate) fn fiscal(year: i32, month: u8, end: Month) -> (i64, i64) {
    let end = end as u8;
    let fiscal_year = i64::from(year) + i64::from(month > end);
    let fiscal_month = (i64::from(month) - i64::from(end) - 1).rem_euclid(12);
    (fiscal_year, fiscal_month / 3 + 1)
}

pub(crate) fn unix_day(date: Date) -> i64 {
    i64::from(date.to_julian_day()) - UNIX_EPOCH_JULIAN_DAY
}

pub(crate) fn date_of_unix_day(day: i64) -> Result<Date, PeriodError> {
    let out_of_range = || PeriodError::field("day", day);
    let julian = day
        .checked_add(UNIX_EPOCH_JULIAN_DAY)
        .and_then(|julian| i32::try_from(julian).ok())
        .ok_or_else(out_of_range)?;
    let date = Date::from_julian_day(julian).map_err(|_| out_of_range())?;
    check_year(date.year())?;
    Ok(date)
}

pub(crate) fn span(ordinal: i64, freq: Frequency) -> Result<Span, PeriodError> {
    let out_of_range = || PeriodError::field("ordinal", ordinal);

    if freq.is_intraday() {
        let per_day = conversion_factor(Frequency::Day, freq)?;
        let unit = NANOS_PER_DAY / per_day;
        let day = ordinal.div_euclid(per_day);
        let start = ordinal.rem_euclid(per_day) * unit;
        date_of_unix_day(day).map_err(|_| out_of_range())?;
        return Ok(Span {
            first_day: day,
            start_nanos: start,
            last_day: day,
            end_nanos: start + unit - 1,
        });
    }

    let (first_day, last_day) = day_bounds(ordinal, freq).ok_or_else(out_of_range)?;
    date_of_unix_day(first_day).map_err(|_| out_of_range())?;
    date_of_unix_day(last_day).map_err(|_| out_of_range())?;
    Ok(Span {
        first_day,
        start_nanos: 0,
        last_day,
        end_nanos: NANOS_PER_DAY - 1,
    })
}

/// First and last unix day of a period, `None` when it falls outside the supported years.
fn day_bounds(ordinal: i64, freq: Frequency) -> Option<(i64, i64)> {
    match freq {
        Frequency::Year { end } => {
            let first = fiscal_year_start(ordinal.checked_add(EPOCH_YEAR)?, end)?;
            Some((month_first_day(first)?, month_last_day(first + 11)?))
        }
        Frequency::Quarter { end } => {
            let first = fiscal_year_start(ordinal.div_euclid(4) + EPOCH_YEAR, end)?
                + 3 * ordinal.rem_euclid(4);
            Some((month_first_day(first)?, month_last_day(first + 2)?))
        }
        Frequency::Month => {
            let month = ordinal.checked_add(EPOCH_YEAR * 12)?;
            Some((month_first_day(month)?, month_last_day(month)?))
        }
        Frequency::Week { end } => {
            let adj = i64::from(end.number_days_from_sunday());
            let last = ordinal.checked_mul(7)?.checked_add(adj - 4)?;
            Some((last.checked_sub(6)?, last))
        }
        Frequency::BusinessDay => {
            let shifted = ordinal.checked_add(3)?;
            let day = shifted
                .div_euclid(5)
                .checked_mul(7)?
                .checked_add(shifted.rem_euclid(5) - 3)?;
            Some((day, day))
        }
        Frequency::Day => Some((ordinal, ordinal)),
        Frequency::Hour
        | Frequency::Minute
        | Frequency::Second
        | Frequency::Millisecond
        | Frequency::Microsecond
        | Frequency::Nanosecond => {
            let day = ordinal.div_euclid(freq.units_per_day()?);
            Some((day, day))
        }
    }
}

fn ordinal_of(date: Date, nanos: i64, freq: Frequency, roll: Roll) -> Result<i64, PeriodError> {
    let year = date.year();
    let month = date.month() as u8;
    let day = unix_day(date);

    let ordinal = match freq {
        Frequency::Year { end } => fiscal(year, month, end).0 - EPOCH_YEAR,
        Frequency::Quarter { end } => {
            let (fiscal_year, quarter) = fiscal(year, month, end);
            (fiscal_year - EPOCH_YEAR) * 4 + quarter - 1
        }
        Frequency::Month => (i64::from(year) - EPOCH_YEAR) * 12 + i64::from(month) - 1,
        Frequency::Week { end } => {
            let adj = i64::from(end.number_days_from_sunday());
            (day + 3 - adj).div_euclid(7) + 1
        }
        Frequency::BusinessDay => business_ordinal(day, roll),
        Frequency::Day => day,
        Frequency::Hour
        | Frequency::Minute
        | Frequency::Second
        | Frequency::Millisecond
        | Frequency::Microsecond
        | Frequency::Nanosecond => {
            let per_day = conversion_factor(Frequency::Day, freq)?;
            day.checked_mul(per_day)
                .and_then(|units| units.checked_add(nanos / (NANOS_PER_DAY / per_day)))
                .ok_or_else(|| PeriodError::field("year", year))?
        }
    };

    Ok(ordinal)
}

fn business_ordinal(day: i64, roll: Roll) -> i64 {
    let shifted = day + 3;
    let weeks = shifted.div_euclid(7);
    let weekday = shifted.rem_euclid(7) + 1;
    let forward = 5 * weeks + weekday.min(6) - 4;
    match roll {
        Roll::Back if weekday > 5 => forward - 1,
        Roll::Forward | Roll::Back => forward,
    }
}

/// Month index (`year * 12 + month - 1`) of the first month of fiscal year `year`.
fn fiscal_year_start(year: i64, end: Month) -> Option<i64> {
    year.checked_sub(1)?.checked_mul(12)?.checked_add(end as i64)
}

fn month_first_day(index: i64) -> Option<i64> {
    month_date(index, |_, _| 1).map(unix_day)
}

fn month_last_day(index: i64) -> Option<i64> {
    month_date(index, |year, month| month.length(year)).map(unix_day)
}

fn month_date(index: i64, day: impl Fn(i32, Month) -> u8) -> Option<Date> {
    let year = i32::try_from(index.div_euclid(12)).ok()?;
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return None;
    }
    let month = Month::try_from(index.rem_euclid(12) as u8 + 1).ok()?;
    Date::from_calendar_date(year, month, day(year, month)).ok()
}

fn check_year(year: i32) -> Result<(), PeriodError> {
    if (MIN_YEAR..=MAX_YEAR).contains(&year) {
        Ok(())
    } else {
        Err(PeriodError::field("year", year))
    }
}
