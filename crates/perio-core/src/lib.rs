//! Core contracts for perio.
//!
//! This crate contains:
//! - The frequency registry and intraday conversion factors
//! - The ordinal calendar mapping calendar fields to period ordinals and back
//! - Period and period-range values with their field projections
//! - The period parser and canonical formatter
//! - A bulk adapter converting object arrays to ordinal buffers

pub mod bulk;
pub mod calendar;
pub mod domain;
pub mod error;
pub mod formatter;
pub mod frequency;
pub mod parser;

pub use bulk::{
    extract_ordinals, period_field_array, ArrayView, BulkOptions, BulkResult, Element,
    ErrorMode, Values, NAT,
};
pub use calendar::{asfreq, from_ordinal, to_ordinal, CalendarFields, How, MAX_YEAR, MIN_YEAR};
pub use domain::{Period, PeriodField, RetroPeriodRange};
pub use error::PeriodError;
pub use formatter::{format, format_range, format_timestamp};
pub use frequency::{code_of, conversion_factor, FreqGroup, Frequency};
pub use parser::{parse, parse_with_freq, Parsed};
