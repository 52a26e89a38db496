use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize};
use time::{Date, Duration, Month, PrimitiveDateTime, Time};

use crate::calendar::{self, CalendarFields, How, Span};
use crate::{formatter, parser, Frequency, PeriodError};

/// A span of time identified by its ordinal within a frequency.
///
/// The ordinal counts whole periods of `freq` since the period containing 1970-01-01.
/// Construction validates that the period lies within the supported calendar years, so the
/// field projections below never fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Period {
    ordinal: i64,
    freq: Frequency,
}

#[derive(Deserialize)]
struct RawPeriod {
    ordinal: i64,
    freq: Frequency,
}

impl Period {
    pub fn new(ordinal: i64, freq: Frequency) -> Result<Self, PeriodError> {
        calendar::span(ordinal, freq)?;
        Ok(Self { ordinal, freq })
    }

    /// The `freq` period containing the instant described by `fields`.
    pub fn from_fields(fields: &CalendarFields, freq: Frequency) -> Result<Self, PeriodError> {
        Self::new(calendar::to_ordinal(fields, freq)?, freq)
    }

    /// Fiscal year `year` of an annual frequency, or the period containing its first day.
    pub fn from_year(year: i32, freq: Frequency) -> Result<Self, PeriodError> {
        match freq {
            Frequency::Year { .. } => {
                CalendarFields::from_year(year).date()?;
                Self::new(i64::from(year) - 1970, freq)
            }
            _ => Self::from_fields(&CalendarFields::from_year(year), freq),
        }
    }

    /// Fiscal quarter of a quarterly frequency, or the period containing the first day of
    /// that calendar quarter.
    pub fn from_quarter(year: i32, quarter: u8, freq: Frequency) -> Result<Self, PeriodError> {
        if !(1..=4).contains(&quarter) {
            return Err(PeriodError::field("quarter", quarter));
        }
        match freq {
            Frequency::Quarter { .. } => {
                CalendarFields::from_year(year).date()?;
                Self::new(
                    (i64::from(year) - 1970) * 4 + i64::from(quarter) - 1,
                    freq,
                )
            }
            _ => Self::from_fields(&CalendarFields::new(year, quarter * 3 - 2, 1), freq),
        }
    }

    pub const fn ordinal(&self) -> i64 {
        self.ordinal
    }

    pub const fn freq(&self) -> Frequency {
        self.freq
    }

    pub const fn freqstr(&self) -> &'static str {
        self.freq.freqstr()
    }

    /// Calendar fields of the last day of the period (start of the unit for intraday).
    pub fn fields(&self) -> CalendarFields {
        calendar::from_ordinal(self.ordinal, self.freq)
            .expect("Period ordinal is validated at construction")
    }

    pub(crate) fn span(&self) -> Span {
        calendar::span(self.ordinal, self.freq)
            .expect("Period ordinal is validated at construction")
    }

    pub fn start_date(&self) -> Date {
        day_date(self.span().first_day)
    }

    pub fn end_date(&self) -> Date {
        day_date(self.span().last_day)
    }

    /// First instant of the period.
    pub fn start_time(&self) -> PrimitiveDateTime {
        let span = self.span();
        instant(span.first_day, span.start_nanos)
    }

    /// Last nanosecond of the period.
    pub fn end_time(&self) -> PrimitiveDateTime {
        let span = self.span();
        instant(span.last_day, span.end_nanos)
    }

    pub fn year(&self) -> i32 {
        self.fields().year
    }

    pub fn month(&self) -> u8 {
        self.fields().month
    }

    pub fn day(&self) -> u8 {
        self.fields().day
    }

    pub fn hour(&self) -> u8 {
        self.fields().hour
    }

    pub fn minute(&self) -> u8 {
        self.fields().minute
    }

    pub fn second(&self) -> u8 {
        self.fields().second
    }

    /// Quarter, counted from the fiscal year start for annual and quarterly anchors.
    pub fn quarter(&self) -> u8 {
        self.fiscal().1 as u8
    }

    /// Fiscal year the period belongs to.
    pub fn qyear(&self) -> i32 {
        self.fiscal().0 as i32
    }

    /// ISO-8601 week number of the last day.
    pub fn week(&self) -> u8 {
        self.end_date().iso_week()
    }

    /// Weekday of the last day, Monday = 0.
    pub fn day_of_week(&self) -> u8 {
        self.end_date().weekday().number_days_from_monday()
    }

    pub fn day_of_year(&self) -> u16 {
        self.end_date().ordinal()
    }

    pub fn days_in_month(&self) -> u8 {
        let fields = self.fields();
        let month = Month::try_from(fields.month).expect("validated month");
        month.length(fields.year)
    }

    pub fn field(&self, field: PeriodField) -> i64 {
        match field {
            PeriodField::Year => i64::from(self.year()),
            PeriodField::QYear => i64::from(self.qyear()),
            PeriodField::Quarter => i64::from(self.quarter()),
            PeriodField::Month => i64::from(self.month()),
            PeriodField::Day => i64::from(self.day()),
            PeriodField::Hour => i64::from(self.hour()),
            PeriodField::Minute => i64::from(self.minute()),
            PeriodField::Second => i64::from(self.second()),
            PeriodField::Week => i64::from(self.week()),
            PeriodField::DayOfWeek => i64::from(self.day_of_week()),
            PeriodField::DayOfYear => i64::from(self.day_of_year()),
            PeriodField::DaysInMonth => i64::from(self.days_in_month()),
        }
    }

    /// The `freq` period containing this period's start or end instant.
    pub fn asfreq(&self, freq: Frequency, how: How) -> Result<Self, PeriodError> {
        Self::new(calendar::asfreq(self.ordinal, self.freq, freq, how)?, freq)
    }

    /// The period `n` steps away in the same frequency.
    pub fn checked_add(&self, n: i64) -> Result<Self, PeriodError> {
        let ordinal = self
            .ordinal
            .checked_add(n)
            .ok_or_else(|| PeriodError::field("ordinal", self.ordinal))?;
        Self::new(ordinal, self.freq)
    }

    /// Number of periods from `other` to `self`.
    pub fn offset_from(&self, other: &Self) -> Result<i64, PeriodError> {
        if self.freq != other.freq {
            return Err(PeriodError::IncompatibleFrequency {
                from: other.freq.to_string(),
                to: self.freq.to_string(),
            });
        }
        self.ordinal
            .checked_sub(other.ordinal)
            .ok_or_else(|| PeriodError::field("ordinal", self.ordinal))
    }

    fn fiscal(&self) -> (i64, i64) {
        let fields = self.fields();
        let anchor = match self.freq {
            Frequency::Year { end } | Frequency::Quarter { end } => end,
            _ => Month::December,
        };
        calendar::fiscal(fields.year, fields.month, anchor)
    }
}

impl PartialOrd for Period {
    /// Periods of different frequencies are unordered.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        (self.freq == other.freq).then(|| self.ordinal.cmp(&other.ordinal))
    }
}

impl<'de> Deserialize<'de> for Period {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawPeriod::deserialize(deserializer)?;
        Self::new(raw.ordinal, raw.freq).map_err(D::Error::custom)
    }
}

impl Display for Period {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&formatter::format(self))
    }
}

impl FromStr for Period {
    type Err = PeriodError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        parser::parse(value)?.into_period()
    }
}

fn day_date(day: i64) -> Date {
    calendar::date_of_unix_day(day).expect("Period span is validated at construction")
}

fn instant(day: i64, nanos: i64) -> PrimitiveDateTime {
    PrimitiveDateTime::new(day_date(day), Time::MIDNIGHT) + Duration::nanoseconds(nanos)
}

/// Per-period field projections, also used for bulk field extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodField {
    Year,
    QYear,
    Quarter,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    Week,
    DayOfWeek,
    DayOfYear,
    DaysInMonth,
}

impl PeriodField {
    pub const ALL: [Self; 12] = [
        Self::Year,
        Self::QYear,
        Self::Quarter,
        Self::Month,
        Self::Day,
        Self::Hour,
        Self::Minute,
        Self::Second,
        Self::Week,
        Self::DayOfWeek,
        Self::DayOfYear,
        Self::DaysInMonth,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Year => "year",
            Self::QYear => "qyear",
            Self::Quarter => "quarter",
            Self::Month => "month",
            Self::Day => "day",
            Self::Hour => "hour",
            Self::Minute => "minute",
            Self::Second => "second",
            Self::Week => "week",
            Self::DayOfWeek => "day_of_week",
            Self::DayOfYear => "day_of_year",
            Self::DaysInMonth => "days_in_month",
        }
    }
}

impl Display for PeriodField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
