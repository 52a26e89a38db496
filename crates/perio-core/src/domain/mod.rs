//! # Period values
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Period`] | Ordinal within a frequency, with calendar projections |
//! | [`RetroPeriodRange`] | Contiguous run of annual or quarterly periods |
//! | [`PeriodField`] | Named projection used by bulk field extraction |
//!
//! Both value types are immutable and validated at construction:
//!
//! ```rust
//! use perio_core::{Frequency, Period};
//!
//! let week: Period = "2025-01-06/2025-01-12".parse().unwrap();
//! assert_eq!(week.freqstr(), "W-SUN");
//! assert_eq!(week.day_of_week(), 6);
//!
//! let quarter = Period::from_quarter(1960, 3, Frequency::QUARTER).unwrap();
//! assert_eq!(quarter.to_string(), "1960Q3");
//! ```

mod period;
mod range;

pub use period::{Period, PeriodField};
pub use range::RetroPeriodRange;
