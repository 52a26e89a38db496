//! Period and period-range parsing.
//!
//! Grammars are told apart by their shape alone: every ASCII digit is replaced by `9` and
//! the resulting pattern is matched against fixed layouts. The year is always the leading
//! four-digit group, so a year such as 2272 can never be read as a clock time.
//!
//! | Shape | Result |
//! |-------|--------|
//! | `9999-999` | day, from an ISO ordinal date |
//! | `9999-99-99/9999-99-99` | week ending on the second date |
//! | `99999999-99999999` | week ending on the second date |
//! | `9999-9999` | range of `Y-DEC` years |
//! | `9999Q9-9999Q9` | range of `Q-DEC` quarters |
//! | `9999` | `Y-DEC` year |
//! | `9999Q9`, `9999-Q9` | `Q-DEC` quarter |
//! | `9999-99` | month |
//! | `9999-W99` | ISO week, as `W-SUN` |
//! | `9999-W99-9`, `99999999`, `9999-99-99` | day |
//! | `9999-99-99 99[:99[:99[.999[999[999]]]]]` | hour to nanosecond |
//!
//! Any of these may carry a trailing frequency annotation such as `[B]` or `[Q-NOV]`,
//! which re-interprets the text in that frequency.

use std::fmt::{Display, Formatter};

use time::{Date, Weekday};
use tracing::trace;

use crate::calendar::{self, CalendarFields};
use crate::{FreqGroup, Frequency, Period, PeriodError, RetroPeriodRange};

/// Result of parsing a period string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Parsed {
    Single(Period),
    Range(RetroPeriodRange),
}

impl Parsed {
    pub fn freq(&self) -> Frequency {
        match self {
            Self::Single(period) => period.freq(),
            Self::Range(range) => range.freq(),
        }
    }

    pub fn into_period(self) -> Result<Period, PeriodError> {
        match self {
            Self::Single(period) => Ok(period),
            Self::Range(range) => Err(PeriodError::parse(
                &range.to_string(),
                "expected a single period, found a range",
            )),
        }
    }

    pub fn into_range(self) -> Result<RetroPeriodRange, PeriodError> {
        match self {
            Self::Range(range) => Ok(range),
            Self::Single(period) => Err(PeriodError::parse(
                &period.to_string(),
                "expected a period range, found a single period",
            )),
        }
    }
}

impl Display for Parsed {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Single(period) => period.fmt(f),
            Self::Range(range) => range.fmt(f),
        }
    }
}

/// Parses `text`, inferring the frequency from its layout or annotation.
pub fn parse(text: &str) -> Result<Parsed, PeriodError> {
    let trimmed = text.trim();
    let (body, annotation) = split_annotation(trimmed)?;
    let token = Token::scan(body)?;
    match annotation {
        Some(freq) => token.resolve_as(freq, trimmed),
        None => token.resolve(trimmed),
    }
}

/// Parses `text` as a period of `freq`.
///
/// Year and quarter tokens name fiscal periods when `freq` is annual or quarterly.
/// Otherwise the result is the `freq` period containing the first instant of the text.
pub fn parse_with_freq(text: &str, freq: Frequency) -> Result<Parsed, PeriodError> {
    let trimmed = text.trim();
    let (body, annotation) = split_annotation(trimmed)?;
    if annotation.is_some_and(|annotated| annotated != freq) {
        return Err(PeriodError::parse(
            trimmed,
            "annotation conflicts with the requested frequency",
        ));
    }
    Token::scan(body)?.resolve_as(freq, trimmed)
}

fn split_annotation(text: &str) -> Result<(&str, Option<Frequency>), PeriodError> {
    let Some(rest) = text.strip_suffix(']') else {
        return Ok((text, None));
    };
    let (body, freq) = rest
        .rsplit_once('[')
        .ok_or_else(|| PeriodError::parse(text, "unbalanced frequency annotation"))?;
    Ok((body, Some(freq.parse()?)))
}

/// A recognised layout with its numeric groups, before frequency resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Year(i32),
    Quarter(i32, u8),
    Month(i32, u8),
    Week { start: Date, end: Date },
    Day(Date),
    Instant(CalendarFields, Frequency),
    YearRange(i32, i32),
    QuarterRange((i32, u8), (i32, u8)),
}

impl Token {
    fn scan(text: &str) -> Result<Self, PeriodError> {
        let shape = shape_of(text);
        let num = |from: usize, to: usize| digits(text, from, to);
        let year = |from: usize| num(from, from + 4) as i32;

        let token = match shape.as_str() {
            "9999-999" => Self::Day(ordinal_date(year(0), num(5, 8))?),
            "9999-99-99/9999-99-99" => {
                let start = date(year(0), num(5, 7), num(8, 10))?;
                let end = date(year(11), num(16, 18), num(19, 21))?;
                week_span(text, start, end)?
            }
            "99999999-99999999" => {
                let invalid = |_: PeriodError| PeriodError::span(text, "not a valid calendar date");
                let start = date(year(0), num(4, 6), num(6, 8)).map_err(invalid)?;
                let end = date(year(9), num(13, 15), num(15, 17)).map_err(invalid)?;
                week_span(text, start, end)?
            }
            "9999-9999" => Self::YearRange(year(0), year(5)),
            "9999Q9-9999Q9" => {
                Self::QuarterRange((year(0), num(5, 6) as u8), (year(7), num(12, 13) as u8))
            }
            "9999" => Self::Year(year(0)),
            "9999Q9" => Self::Quarter(year(0), num(5, 6) as u8),
            "9999-Q9" => Self::Quarter(year(0), num(6, 7) as u8),
            "9999-99" => Self::Month(year(0), num(5, 7) as u8),
            "9999-W99" => {
                let start = iso_week_date(year(0), num(6, 8), 1)?;
                let end = iso_week_date(year(0), num(6, 8), 7)?;
                Self::Week { start, end }
            }
            "9999-W99-9" => Self::Day(iso_week_date(year(0), num(6, 8), num(9, 10))?),
            "99999999" => Self::Day(date(year(0), num(4, 6), num(6, 8))?),
            "9999-99-99" => Self::Day(date(year(0), num(5, 7), num(8, 10))?),
            _ => return Self::scan_instant(text, &shape),
        };

        trace!(text, shape = shape.as_str(), "matched period layout");
        Ok(token)
    }

    /// `9999-99-99` followed by a space or `T` and a time of day.
    fn scan_instant(text: &str, shape: &str) -> Result<Self, PeriodError> {
        let unrecognised = || PeriodError::parse(text, "unrecognised period format");

        let (day, clock) = (shape.get(..10), shape.get(11..));
        let separator = shape.as_bytes().get(10);
        let (Some("9999-99-99"), Some(clock), Some(b' ' | b'T')) = (day, clock, separator) else {
            return Err(unrecognised());
        };

        let freq = match clock {
            "99" => Frequency::Hour,
            "99:99" => Frequency::Minute,
            "99:99:99" => Frequency::Second,
            "99:99:99.999" => Frequency::Millisecond,
            "99:99:99.999999" => Frequency::Microsecond,
            "99:99:99.999999999" => Frequency::Nanosecond,
            _ => return Err(unrecognised()),
        };

        let num = |from: usize, to: usize| digits(text, from, to);
        let mut fields = CalendarFields::new(num(0, 4) as i32, num(5, 7) as u8, num(8, 10) as u8)
            .with_time(num(11, 13) as u8, 0, 0);
        if clock.len() >= 5 {
            fields.minute = num(14, 16) as u8;
        }
        if clock.len() >= 8 {
            fields.second = num(17, 19) as u8;
        }
        if clock.len() > 8 {
            // Right-pad the fraction to nanoseconds.
            let width = clock.len() - 9;
            let nanos = num(20, 20 + width) * 10u32.pow(9 - width as u32);
            fields = fields.with_subsecond(nanos / 1000, nanos % 1000 * 1000);
        }

        trace!(text, freq = freq.freqstr(), "matched timestamp layout");
        Ok(Self::Instant(fields, freq))
    }

    /// Resolves the token in the frequency its layout implies.
    fn resolve(self, text: &str) -> Result<Parsed, PeriodError> {
        let freq = match self {
            Self::Year(_) | Self::YearRange(..) => Frequency::YEAR,
            Self::Quarter(..) | Self::QuarterRange(..) => Frequency::QUARTER,
            Self::Month(..) => Frequency::Month,
            Self::Week { end, .. } => Frequency::Week { end: end.weekday() },
            Self::Day(_) => Frequency::Day,
            Self::Instant(_, freq) => freq,
        };
        self.resolve_as(freq, text)
    }

    fn resolve_as(self, freq: Frequency, text: &str) -> Result<Parsed, PeriodError> {
        let group = freq.group();
        let period = match self {
            Self::YearRange(start, end) => {
                if group != FreqGroup::Annual {
                    return Err(PeriodError::parse(text, "year ranges hold annual periods"));
                }
                if start > end {
                    return Err(PeriodError::span(text, "start year is after end year"));
                }
                let range = RetroPeriodRange::new(
                    Period::from_year(start, freq)?,
                    Period::from_year(end, freq)?,
                )?;
                return Ok(Parsed::Range(range));
            }
            Self::QuarterRange((start_year, start_quarter), (end_year, end_quarter)) => {
                if group != FreqGroup::Quarterly {
                    return Err(PeriodError::parse(text, "quarter ranges hold quarterly periods"));
                }
                let start = Period::from_quarter(start_year, start_quarter, freq)?;
                let end = Period::from_quarter(end_year, end_quarter, freq)?;
                if start.ordinal() > end.ordinal() {
                    return Err(PeriodError::span(text, "start quarter is after end quarter"));
                }
                return Ok(Parsed::Range(RetroPeriodRange::new(start, end)?));
            }
            Self::Year(year) => Period::from_year(year, freq)?,
            Self::Quarter(year, quarter) => Period::from_quarter(year, quarter, freq)?,
            Self::Month(year, month) => {
                Period::from_fields(&CalendarFields::new(year, month, 1), freq)?
            }
            Self::Week { start, end } => match freq {
                Frequency::Week { end: anchor } if anchor != end.weekday() => {
                    return Err(PeriodError::parse(text, "week does not end on its anchor day"));
                }
                Frequency::Week { .. } => {
                    Period::from_fields(&CalendarFields::from_date(end), freq)?
                }
                _ => Period::from_fields(&CalendarFields::from_date(start), freq)?,
            },
            Self::Day(day) => Period::from_fields(&CalendarFields::from_date(day), freq)?,
            Self::Instant(fields, _) => Period::from_fields(&fields, freq)?,
        };
        Ok(Parsed::Single(period))
    }
}

/// Digits become `9`, ASCII letters are upper-cased, other ASCII is kept, and anything
/// else becomes `?` so it can never match a layout.
fn shape_of(text: &str) -> String {
    text.bytes()
        .map(|byte| match byte {
            b'0'..=b'9' => '9',
            byte if byte.is_ascii() => byte.to_ascii_uppercase() as char,
            _ => '?',
        })
        .collect()
}

/// Value of the digit run `text[from..to]`; the caller has matched the shape.
fn digits(text: &str, from: usize, to: usize) -> u32 {
    text.as_bytes()[from..to]
        .iter()
        .fold(0, |value, byte| value * 10 + u32::from(byte - b'0'))
}

/// `month` and `day` come from two-digit groups.
fn date(year: i32, month: u32, day: u32) -> Result<Date, PeriodError> {
    CalendarFields::new(year, month as u8, day as u8).date()
}

fn ordinal_date(year: i32, day_of_year: u32) -> Result<Date, PeriodError> {
    CalendarFields::from_year(year).date()?;
    u16::try_from(day_of_year)
        .ok()
        .and_then(|ordinal| Date::from_ordinal_date(year, ordinal).ok())
        .ok_or_else(|| PeriodError::field("day_of_year", day_of_year))
}

fn iso_week_date(year: i32, week: u32, weekday: u32) -> Result<Date, PeriodError> {
    CalendarFields::from_year(year).date()?;
    if !(1..=7).contains(&weekday) {
        return Err(PeriodError::field("weekday", weekday));
    }
    let weekday = Weekday::Monday.nth_next(weekday as u8 - 1);
    u8::try_from(week)
        .ok()
        .and_then(|week| Date::from_iso_week_date(year, week, weekday).ok())
        .ok_or_else(|| PeriodError::field("week", week))
}

/// A start/end pair naming one week, inclusive on both ends.
fn week_span(text: &str, start: Date, end: Date) -> Result<Token, PeriodError> {
    let days = calendar::unix_day(end) - calendar::unix_day(start);
    if days <= 0 {
        return Err(PeriodError::span(text, "end date must be after start date"));
    }
    if days != 6 {
        return Err(PeriodError::span(text, "a week spans exactly 7 days"));
    }
    Ok(Token::Week { start, end })
}
