//! Element-wise conversion between host arrays and ordinal buffers.
//!
//! The host array is seen through [`ArrayView`]: a flat, row-major slice of typed values
//! plus a shape. Multi-dimensional input is flattened in order; restoring the shape is the
//! caller's concern.

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::{parser, Frequency, Period, PeriodError, PeriodField};

/// Ordinal sentinel for a missing period.
pub const NAT: i64 = i64::MIN;

/// Field value reported for a missing period.
pub const NAT_FIELD: i64 = -1;

/// One slot of an object-typed array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    NaT,
    Period(Period),
    Text(String),
}

impl From<Period> for Element {
    fn from(period: Period) -> Self {
        Self::Period(period)
    }
}

impl From<&str> for Element {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Values<'a> {
    Object(&'a [Element]),
    Int64(&'a [i64]),
    Float64(&'a [f64]),
}

impl Values<'_> {
    pub const fn dtype(&self) -> &'static str {
        match self {
            Self::Object(_) => "object",
            Self::Int64(_) => "int64",
            Self::Float64(_) => "float64",
        }
    }

    pub const fn len(&self) -> usize {
        match self {
            Self::Object(values) => values.len(),
            Self::Int64(values) => values.len(),
            Self::Float64(values) => values.len(),
        }
    }

    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Typed values with a row-major shape of rank ≥ 1.
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayView<'a> {
    values: Values<'a>,
    shape: Vec<usize>,
}

impl<'a> ArrayView<'a> {
    pub fn new(values: Values<'a>, shape: &[usize]) -> Result<Self, PeriodError> {
        let size = shape
            .iter()
            .try_fold(1usize, |size, extent| size.checked_mul(*extent));
        if shape.is_empty() || size != Some(values.len()) {
            return Err(PeriodError::InvalidBufferShape {
                shape: shape.to_vec(),
                len: values.len(),
            });
        }
        Ok(Self {
            values,
            shape: shape.to_vec(),
        })
    }

    /// One-dimensional view over `values`.
    pub fn flat(values: Values<'a>) -> Self {
        let shape = vec![values.len()];
        Self { values, shape }
    }

    pub fn values(&self) -> Values<'a> {
        self.values
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// How element failures are reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorMode {
    /// Stop at the first failing element.
    #[default]
    FailFast,
    /// Keep going; failing elements become [`NAT`] and are listed in the result.
    Collect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BulkOptions {
    pub error_mode: ErrorMode,
    pub parallel: bool,
    /// Minimum element count before work is spread over the rayon pool.
    pub parallel_threshold: usize,
}

impl BulkOptions {
    pub const DEFAULT_PARALLEL_THRESHOLD: usize = 4096;

    pub fn fail_fast() -> Self {
        Self {
            error_mode: ErrorMode::FailFast,
            parallel: true,
            parallel_threshold: Self::DEFAULT_PARALLEL_THRESHOLD,
        }
    }

    pub fn tolerant() -> Self {
        Self {
            error_mode: ErrorMode::Collect,
            ..Self::fail_fast()
        }
    }

    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    fn runs_parallel(&self, len: usize) -> bool {
        self.parallel && len >= self.parallel_threshold
    }
}

impl Default for BulkOptions {
    fn default() -> Self {
        Self::fail_fast()
    }
}

/// Flat ordinals plus the elements that could not be converted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkResult {
    pub ordinals: Vec<i64>,
    pub failures: Vec<PeriodError>,
}

impl BulkResult {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Converts every element of an object array to an ordinal of `freq`.
///
/// Errors are wrapped in [`PeriodError::Element`] carrying the flat index.
pub fn extract_ordinals(
    array: &ArrayView<'_>,
    freq: Frequency,
    options: &BulkOptions,
) -> Result<BulkResult, PeriodError> {
    let Values::Object(elements) = array.values() else {
        return Err(PeriodError::InvalidBufferType {
            expected: "object",
            actual: array.values().dtype(),
        });
    };

    let convert = |(index, element): (usize, &Element)| {
        element_ordinal(element, freq).map_err(|error| error.at(index))
    };
    let parallel = options.runs_parallel(elements.len());
    debug!(
        len = elements.len(),
        ndim = array.ndim(),
        freq = freq.freqstr(),
        parallel,
        "extracting ordinals"
    );

    match options.error_mode {
        ErrorMode::FailFast => {
            let ordinals = if parallel {
                elements
                    .par_iter()
                    .enumerate()
                    .map(convert)
                    .collect::<Result<Vec<_>, _>>()?
            } else {
                elements
                    .iter()
                    .enumerate()
                    .map(convert)
                    .collect::<Result<Vec<_>, _>>()?
            };
            Ok(BulkResult {
                ordinals,
                failures: Vec::new(),
            })
        }
        ErrorMode::Collect => {
            let outcomes: Vec<Result<i64, PeriodError>> = if parallel {
                elements.par_iter().enumerate().map(convert).collect()
            } else {
                elements.iter().enumerate().map(convert).collect()
            };

            let mut result = BulkResult::default();
            result.ordinals.reserve(outcomes.len());
            for outcome in outcomes {
                match outcome {
                    Ok(ordinal) => result.ordinals.push(ordinal),
                    Err(error) => {
                        warn!(%error, "element replaced with NaT");
                        result.ordinals.push(NAT);
                        result.failures.push(error);
                    }
                }
            }
            Ok(result)
        }
    }
}

/// Projects `field` out of an int64 array of `freq` ordinals. [`NAT`] yields [`NAT_FIELD`].
pub fn period_field_array(
    field: PeriodField,
    array: &ArrayView<'_>,
    freq: Frequency,
) -> Result<Vec<i64>, PeriodError> {
    let Values::Int64(ordinals) = array.values() else {
        return Err(PeriodError::InvalidBufferType {
            expected: "int64",
            actual: array.values().dtype(),
        });
    };

    ordinals
        .iter()
        .enumerate()
        .map(|(index, &ordinal)| {
            if ordinal == NAT {
                return Ok(NAT_FIELD);
            }
            Period::new(ordinal, freq)
                .map(|period| period.field(field))
                .map_err(|error| error.at(index))
        })
        .collect()
}

fn element_ordinal(element: &Element, freq: Frequency) -> Result<i64, PeriodError> {
    match element {
        Element::NaT => Ok(NAT),
        Element::Period(period) if period.freq() == freq => Ok(period.ordinal()),
        Element::Period(period) => Err(PeriodError::IncompatibleFrequency {
            from: period.freqstr().to_owned(),
            to: freq.freqstr().to_owned(),
        }),
        Element::Text(text) => Ok(parser::parse_with_freq(text, freq)?
            .into_period()?
            .ordinal()),
    }
}
