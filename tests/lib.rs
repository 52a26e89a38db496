// Shared helpers for the perio integration tests
pub use perio_core::{code_of, Frequency, Period};

/// Parses `text` as a single period, naming the text on failure.
pub fn period(text: &str) -> Period {
    text.parse()
        .unwrap_or_else(|error| panic!("'{text}' should parse: {error}"))
}

/// Looks up a frequency by its label or alias.
pub fn freq(label: &str) -> Frequency {
    code_of(label).unwrap_or_else(|error| panic!("'{label}' should be known: {error}"))
}
