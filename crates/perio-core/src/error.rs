use thiserror::Error;

/// Errors raised by frequency lookup, calendar math, parsing, and bulk extraction.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PeriodError {
    #[error("unknown frequency '{value}'")]
    UnknownFrequency { value: String },

    #[error("cannot convert between frequencies {from} and {to}")]
    IncompatibleFrequency { from: String, to: String },

    #[error("calendar field '{field}' out of range: {value}")]
    InvalidCalendarField { field: &'static str, value: i64 },

    #[error("invalid span '{value}': {reason}")]
    InvalidSpan { value: String, reason: &'static str },

    #[error("could not parse '{value}' as a period: {reason}")]
    PeriodParse { value: String, reason: &'static str },

    #[error("buffer dtype mismatch, expected '{expected}' but got '{actual}'")]
    InvalidBufferType {
        expected: &'static str,
        actual: &'static str,
    },

    /// A bulk view whose rank is 0 or whose extents do not multiply out to `len`.
    #[error("buffer shape mismatch, shape {shape:?} cannot hold {len} values")]
    InvalidBufferShape { shape: Vec<usize>, len: usize },

    #[error("element {index}: {source}")]
    Element {
        index: usize,
        #[source]
        source: Box<PeriodError>,
    },
}

impl PeriodError {
    pub(crate) fn field(field: &'static str, value: impl Into<i64>) -> Self {
        Self::InvalidCalendarField {
            field,
            value: value.into(),
        }
    }

    pub(crate) fn parse(value: &str, reason: &'static str) -> Self {
        Self::PeriodParse {
            value: value.to_owned(),
            reason,
        }
    }

    pub(crate) fn span(value: &str, reason: &'static str) -> Self {
        Self::InvalidSpan {
            value: value.to_owned(),
            reason,
        }
    }

    pub(crate) fn at(self, index: usize) -> Self {
        Self::Element {
            index,
            source: Box::new(self),
        }
    }

    /// The error with any element wrapper removed.
    pub fn root(&self) -> &PeriodError {
        match self {
            Self::Element { source, .. } => source.root(),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_errors_keep_their_cause() {
        let err = PeriodError::field("month", 13).at(4);
        assert_eq!(err.to_string(), "element 4: calendar field 'month' out of range: 13");
        assert!(matches!(
            err.root(),
            PeriodError::InvalidCalendarField { field: "month", .. }
        ));
    }

    #[test]
    fn buffer_mismatch_names_both_types() {
        let err = PeriodError::InvalidBufferType {
            expected: "int64",
            actual: "float64",
        };
        assert_eq!(
            err.to_string(),
            "buffer dtype mismatch, expected 'int64' but got 'float64'"
        );
    }
}
