//! Frequency registry.
//!
//! Every supported granularity is a [`Frequency`] variant with a stable integer code.
//! Codes are grouped in blocks of 1000 per family, the low digits selecting the anchor:
//!
//! | Family | Codes | Label |
//! |--------|-------|-------|
//! | Annual | 1000 (Dec), 1001 (Jan) … 1011 (Nov) | `Y-DEC` |
//! | Quarterly | 2000 (Dec), 2001 (Jan) … 2011 (Nov) | `Q-DEC` |
//! | Monthly | 3000 | `M` |
//! | Weekly | 4000 (Sun), 4001 (Mon) … 4006 (Sat) | `W-SUN` |
//! | Business day | 5000 | `B` |
//! | Day | 6000 | `D` |
//! | Hour … nanosecond | 7000 … 12000 | `h`, `min`, `s`, `ms`, `us`, `ns` |

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::{Month, Weekday};

use crate::PeriodError;

/// Months indexed by anchor offset: offset 0 is December, 1 is January.
const ANCHOR_MONTHS: [Month; 12] = [
    Month::December,
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
];

/// Weekdays indexed by anchor offset: offset 0 is Sunday.
const ANCHOR_WEEKDAYS: [Weekday; 7] = [
    Weekday::Sunday,
    Weekday::Monday,
    Weekday::Tuesday,
    Weekday::Wednesday,
    Weekday::Thursday,
    Weekday::Friday,
    Weekday::Saturday,
];

const MONTH_ABBRS: [&str; 12] = [
    "DEC", "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV",
];
const WEEKDAY_ABBRS: [&str; 7] = ["SUN", "MON", "TUE", "WED", "THU", "FRI", "SAT"];

const YEAR_LABELS: [&str; 12] = [
    "Y-DEC", "Y-JAN", "Y-FEB", "Y-MAR", "Y-APR", "Y-MAY", "Y-JUN", "Y-JUL", "Y-AUG", "Y-SEP",
    "Y-OCT", "Y-NOV",
];
const QUARTER_LABELS: [&str; 12] = [
    "Q-DEC", "Q-JAN", "Q-FEB", "Q-MAR", "Q-APR", "Q-MAY", "Q-JUN", "Q-JUL", "Q-AUG", "Q-SEP",
    "Q-OCT", "Q-NOV",
];
const WEEK_LABELS: [&str; 7] = ["W-SUN", "W-MON", "W-TUE", "W-WED", "W-THU", "W-FRI", "W-SAT"];

/// Step factors between neighbouring entries of the day/intraday table:
/// day→hour, hour→minute, minute→second, second→ms, ms→us, us→ns.
const DAYTIME_STEPS: [i64; 6] = [24, 60, 60, 1000, 1000, 1000];

/// Temporal granularity of a period, including its anchor where one applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Frequency {
    /// Year ending in `end`.
    Year { end: Month },
    /// Quarter of a year ending in `end`.
    Quarter { end: Month },
    Month,
    /// Week ending on `end`.
    Week { end: Weekday },
    BusinessDay,
    Day,
    Hour,
    Minute,
    Second,
    Millisecond,
    Microsecond,
    Nanosecond,
}

/// Coarse family of a [`Frequency`], used for exhaustive dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FreqGroup {
    Annual,
    Quarterly,
    Monthly,
    Weekly,
    Business,
    Daily,
    Intraday,
}

impl Frequency {
    pub const YEAR: Self = Self::Year {
        end: Month::December,
    };
    pub const QUARTER: Self = Self::Quarter {
        end: Month::December,
    };
    pub const WEEK: Self = Self::Week {
        end: Weekday::Sunday,
    };

    /// All supported frequencies, ordered by code.
    pub fn all() -> Vec<Self> {
        let mut all = Vec::with_capacity(40);
        all.extend(ANCHOR_MONTHS.iter().map(|&end| Self::Year { end }));
        all.extend(ANCHOR_MONTHS.iter().map(|&end| Self::Quarter { end }));
        all.push(Self::Month);
        all.extend(ANCHOR_WEEKDAYS.iter().map(|&end| Self::Week { end }));
        all.extend([
            Self::BusinessDay,
            Self::Day,
            Self::Hour,
            Self::Minute,
            Self::Second,
            Self::Millisecond,
            Self::Microsecond,
            Self::Nanosecond,
        ]);
        all
    }

    /// Stable integer code of this frequency.
    pub const fn code(self) -> i32 {
        match self {
            Self::Year { end } => 1000 + month_offset(end) as i32,
            Self::Quarter { end } => 2000 + month_offset(end) as i32,
            Self::Month => 3000,
            Self::Week { end } => 4000 + end.number_days_from_sunday() as i32,
            Self::BusinessDay => 5000,
            Self::Day => 6000,
            Self::Hour => 7000,
            Self::Minute => 8000,
            Self::Second => 9000,
            Self::Millisecond => 10000,
            Self::Microsecond => 11000,
            Self::Nanosecond => 12000,
        }
    }

    pub fn from_code(code: i32) -> Result<Self, PeriodError> {
        let offset = code.rem_euclid(1000) as usize;
        let freq = match (code.div_euclid(1000), offset) {
            (1, 0..=11) => Self::Year {
                end: ANCHOR_MONTHS[offset],
            },
            (2, 0..=11) => Self::Quarter {
                end: ANCHOR_MONTHS[offset],
            },
            (3, 0) => Self::Month,
            (4, 0..=6) => Self::Week {
                end: ANCHOR_WEEKDAYS[offset],
            },
            (5, 0) => Self::BusinessDay,
            (6, 0) => Self::Day,
            (7, 0) => Self::Hour,
            (8, 0) => Self::Minute,
            (9, 0) => Self::Second,
            (10, 0) => Self::Millisecond,
            (11, 0) => Self::Microsecond,
            (12, 0) => Self::Nanosecond,
            _ => {
                return Err(PeriodError::UnknownFrequency {
                    value: code.to_string(),
                })
            }
        };
        Ok(freq)
    }

    /// Canonical label, e.g. `Y-DEC`, `W-SUN`, `min`.
    pub const fn freqstr(self) -> &'static str {
        match self {
            Self::Year { end } => YEAR_LABELS[month_offset(end)],
            Self::Quarter { end } => QUARTER_LABELS[month_offset(end)],
            Self::Month => "M",
            Self::Week { end } => WEEK_LABELS[end.number_days_from_sunday() as usize],
            Self::BusinessDay => "B",
            Self::Day => "D",
            Self::Hour => "h",
            Self::Minute => "min",
            Self::Second => "s",
            Self::Millisecond => "ms",
            Self::Microsecond => "us",
            Self::Nanosecond => "ns",
        }
    }

    pub const fn group(self) -> FreqGroup {
        match self {
            Self::Year { .. } => FreqGroup::Annual,
            Self::Quarter { .. } => FreqGroup::Quarterly,
            Self::Month => FreqGroup::Monthly,
            Self::Week { .. } => FreqGroup::Weekly,
            Self::BusinessDay => FreqGroup::Business,
            Self::Day => FreqGroup::Daily,
            Self::Hour
            | Self::Minute
            | Self::Second
            | Self::Millisecond
            | Self::Microsecond
            | Self::Nanosecond => FreqGroup::Intraday,
        }
    }

    pub const fn is_intraday(self) -> bool {
        matches!(self.group(), FreqGroup::Intraday)
    }

    /// Position in the day/intraday conversion table, `None` for calendar-only frequencies.
    const fn daytime_rank(self) -> Option<usize> {
        match self {
            Self::Day => Some(0),
            Self::Hour => Some(1),
            Self::Minute => Some(2),
            Self::Second => Some(3),
            Self::Millisecond => Some(4),
            Self::Microsecond => Some(5),
            Self::Nanosecond => Some(6),
            Self::Year { .. }
            | Self::Quarter { .. }
            | Self::Month
            | Self::Week { .. }
            | Self::BusinessDay => None,
        }
    }

    /// Number of units of this frequency in one day (1 for `D`).
    pub(crate) fn units_per_day(self) -> Option<i64> {
        conversion_factor(Self::Day, self).ok()
    }
}

/// Looks up the frequency for a specifier such as `"D"`, `"h"` or `"Q-NOV"`.
pub fn code_of(spec: &str) -> Result<Frequency, PeriodError> {
    spec.parse()
}

/// Number of finer units per coarser unit between two day/intraday frequencies.
///
/// The factor is the ratio of the two granularities and does not depend on argument order:
/// `conversion_factor(D, h)` and `conversion_factor(h, D)` are both 24. Frequencies outside
/// the table (business day, week, month, quarter, year) fail with
/// [`PeriodError::IncompatibleFrequency`].
pub fn conversion_factor(from: Frequency, to: Frequency) -> Result<i64, PeriodError> {
    let (Some(a), Some(b)) = (from.daytime_rank(), to.daytime_rank()) else {
        return Err(PeriodError::IncompatibleFrequency {
            from: from.to_string(),
            to: to.to_string(),
        });
    };
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    Ok(DAYTIME_STEPS[lo..hi].iter().product())
}

/// Index into the anchor tables: 0 for December, `n` for the n-th month otherwise.
pub(crate) const fn month_offset(month: Month) -> usize {
    (month as usize) % 12
}

fn month_from_abbr(abbr: &str) -> Option<Month> {
    MONTH_ABBRS
        .iter()
        .position(|candidate| candidate.eq_ignore_ascii_case(abbr))
        .map(|offset| ANCHOR_MONTHS[offset])
}

fn weekday_from_abbr(abbr: &str) -> Option<Weekday> {
    WEEKDAY_ABBRS
        .iter()
        .position(|candidate| candidate.eq_ignore_ascii_case(abbr))
        .map(|offset| ANCHOR_WEEKDAYS[offset])
}

impl Display for Frequency {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.freqstr())
    }
}

impl FromStr for Frequency {
    type Err = PeriodError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        let parsed = match trimmed.split_once('-') {
            Some((base, anchor)) => match base {
                "Y" | "A" => month_from_abbr(anchor).map(|end| Self::Year { end }),
                "Q" => month_from_abbr(anchor).map(|end| Self::Quarter { end }),
                "W" => weekday_from_abbr(anchor).map(|end| Self::Week { end }),
                _ => None,
            },
            None => match trimmed {
                "Y" | "A" => Some(Self::YEAR),
                "Q" => Some(Self::QUARTER),
                "M" => Some(Self::Month),
                "W" => Some(Self::WEEK),
                "B" => Some(Self::BusinessDay),
                "D" => Some(Self::Day),
                "h" | "H" => Some(Self::Hour),
                "min" | "T" => Some(Self::Minute),
                "s" | "S" => Some(Self::Second),
                "ms" | "L" => Some(Self::Millisecond),
                "us" | "U" => Some(Self::Microsecond),
                "ns" | "N" => Some(Self::Nanosecond),
                _ => None,
            },
        };

        parsed.ok_or_else(|| PeriodError::UnknownFrequency {
            value: trimmed.to_owned(),
        })
    }
}

impl TryFrom<String> for Frequency {
    type Error = PeriodError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Frequency> for String {
    fn from(value: Frequency) -> Self {
        value.freqstr().to_owned()
    }
}
