use std::fmt::{Display, Formatter};

use serde::Serialize;
use tracing::debug;

use crate::{formatter, FreqGroup, Frequency, Period, PeriodError, PeriodField};

/// Contiguous run of annual or quarterly periods, as produced by `YYYY-YYYY` and
/// `YYYYQn-YYYYQn` strings.
///
/// Always non-empty; neighbours are exactly one ordinal apart and share a frequency.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RetroPeriodRange {
    periods: Vec<Period>,
}

impl RetroPeriodRange {
    /// Every period from `start` to `end`, both inclusive.
    pub fn new(start: Period, end: Period) -> Result<Self, PeriodError> {
        if start.freq() != end.freq() {
            return Err(PeriodError::IncompatibleFrequency {
                from: start.freqstr().to_owned(),
                to: end.freqstr().to_owned(),
            });
        }

        let label = || format!("{start}-{end}");
        if !matches!(start.freq().group(), FreqGroup::Annual | FreqGroup::Quarterly) {
            return Err(PeriodError::span(
                &label(),
                "ranges enumerate annual or quarterly periods",
            ));
        }
        if start.ordinal() > end.ordinal() {
            return Err(PeriodError::span(&label(), "start is after end"));
        }

        let periods = (start.ordinal()..=end.ordinal())
            .map(|ordinal| Period::new(ordinal, start.freq()))
            .collect::<Result<Vec<_>, _>>()?;
        debug!(
            freq = start.freqstr(),
            len = periods.len(),
            "enumerated period range"
        );

        Ok(Self { periods })
    }

    pub fn freq(&self) -> Frequency {
        self.first().freq()
    }

    pub fn freqstr(&self) -> &'static str {
        self.freq().freqstr()
    }

    pub fn first(&self) -> Period {
        self.periods[0]
    }

    pub fn last(&self) -> Period {
        self.periods[self.periods.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.periods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    pub fn periods(&self) -> &[Period] {
        &self.periods
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Period> {
        self.periods.iter()
    }

    pub fn ordinals(&self) -> Vec<i64> {
        self.periods.iter().map(Period::ordinal).collect()
    }

    pub fn year(&self) -> Vec<i32> {
        self.periods.iter().map(Period::year).collect()
    }

    pub fn quarter(&self) -> Vec<u8> {
        self.periods.iter().map(Period::quarter).collect()
    }

    pub fn qyear(&self) -> Vec<i32> {
        self.periods.iter().map(Period::qyear).collect()
    }

    pub fn month(&self) -> Vec<u8> {
        self.periods.iter().map(Period::month).collect()
    }

    pub fn field(&self, field: PeriodField) -> Vec<i64> {
        self.periods.iter().map(|period| period.field(field)).collect()
    }
}

impl<'a> IntoIterator for &'a RetroPeriodRange {
    type Item = &'a Period;
    type IntoIter = std::slice::Iter<'a, Period>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Display for RetroPeriodRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&formatter::format_range(self))
    }
}
