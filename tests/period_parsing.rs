//! Behaviour of period string parsing: ordinal dates, explicit and compact week spans,
//! year and quarter ranges, and the errors raised for malformed input.

use perio_core::{
    format_timestamp, parse, parse_with_freq, Frequency, Parsed, Period, PeriodError,
};
use perio_tests::period;
use time::Month;

fn range_of(text: &str) -> perio_core::RetroPeriodRange {
    parse(text)
        .and_then(Parsed::into_range)
        .unwrap_or_else(|error| panic!("'{text}' should parse as a range: {error}"))
}

// =============================================================================
// ISO ordinal dates
// =============================================================================

#[test]
fn ordinal_dates_resolve_to_days() {
    let cases = [
        ("2022-001", (2022, 1, 1)),
        ("2022-032", (2022, 2, 1)),
        ("2022-219", (2022, 8, 7)),
        ("2022-365", (2022, 12, 31)),
        ("2020-060", (2020, 2, 29)),
        ("2020-366", (2020, 12, 31)),
        ("2300-180", (2300, 6, 29)),
        ("2320-001", (2320, 1, 1)),
        ("2400-060", (2400, 2, 29)),
        ("2400-366", (2400, 12, 31)),
    ];
    for (text, expected) in cases {
        let day = period(text);
        assert_eq!(day.freq(), Frequency::Day, "{text}");
        assert_eq!((day.year(), day.month(), day.day()), expected, "{text}");
    }
}

#[test]
fn ordinal_date_beyond_year_end_fails() {
    for text in ["2022-366", "2300-366", "2022-000"] {
        let err = parse(text).expect_err("must fail");
        assert!(
            matches!(err, PeriodError::InvalidCalendarField { .. }),
            "{text}: {err}"
        );
    }
}

// =============================================================================
// Explicit week spans
// =============================================================================

#[test]
fn week_spans_in_later_centuries() {
    let cases = [
        ("2301-01-01/2301-01-07", (2301, 1, 7)),
        ("2350-06-25/2350-07-01", (2350, 7, 1)),
        ("2399-12-25/2399-12-31", (2399, 12, 31)),
        ("2361-12-31/2362-01-06", (2362, 1, 6)),
        ("2481-12-29/2482-01-04", (2482, 1, 4)),
        ("2061-12-26/2062-01-01", (2062, 1, 1)),
        ("2181-12-31/2182-01-06", (2182, 1, 6)),
        ("2272-01-01/2272-01-07", (2272, 1, 7)),
        ("2362-01-01/2362-01-07", (2362, 1, 7)),
        ("2452-01-01/2452-01-07", (2452, 1, 7)),
    ];
    for (text, expected) in cases {
        let week = period(text);
        assert!(matches!(week.freq(), Frequency::Week { .. }), "{text}");
        assert_eq!((week.year(), week.month(), week.day()), expected, "{text}");
        assert_eq!(week.to_string(), text);
    }
}

#[test]
fn week_span_must_cover_seven_days() {
    for text in ["2025-01-06/2025-01-11", "2025-01-06/2025-01-13", "2025-01-12/2025-01-06"] {
        let err = parse(text).expect_err("must fail");
        assert!(matches!(err, PeriodError::InvalidSpan { .. }), "{text}: {err}");
    }
}

// =============================================================================
// Compact week spans
// =============================================================================

/// Compact text, canonical rendering, label, day of week, ISO week.
const COMPACT_WEEKS: [(&str, &str, &str, u8, u8); 9] = [
    ("20250106-20250112", "2025-01-06/2025-01-12", "W-SUN", 6, 2),
    ("20250101-20250107", "2025-01-01/2025-01-07", "W-TUE", 1, 2),
    ("20250112-20250118", "2025-01-12/2025-01-18", "W-SAT", 5, 3),
    ("20250228-20250306", "2025-02-28/2025-03-06", "W-THU", 3, 10),
    ("20251125-20251201", "2025-11-25/2025-12-01", "W-MON", 0, 49),
    ("19991231-20000106", "1999-12-31/2000-01-06", "W-THU", 3, 1),
    ("20161229-20170104", "2016-12-29/2017-01-04", "W-WED", 2, 1),
    ("20121231-20130106", "2012-12-31/2013-01-06", "W-SUN", 6, 1),
    ("20240226-20240303", "2024-02-26/2024-03-03", "W-SUN", 6, 9),
];

#[test]
fn compact_weeks_expose_their_attributes() {
    for (text, rendered, freqstr, day_of_week, iso_week) in COMPACT_WEEKS {
        let week = period(text);
        let (first, last) = rendered.split_once('/').expect("rendered span");

        assert_eq!(week.to_string(), rendered, "{text}");
        assert_eq!(week.freqstr(), freqstr, "{text}");
        assert_eq!(
            format_timestamp(week.start_time()),
            format!("{first} 00:00:00")
        );
        assert_eq!(
            format_timestamp(week.end_time()),
            format!("{last} 23:59:59.999999999")
        );
        assert_eq!(week.day_of_week(), day_of_week, "{text}");
        assert_eq!(week.week(), iso_week, "{text}");
    }
}

#[test]
fn compact_weeks_reparse_to_the_same_period() {
    for (text, ..) in COMPACT_WEEKS {
        let week = period(text);
        assert_eq!(period(&week.to_string()), week, "{text}");
    }
}

#[test]
fn compact_week_span_errors() {
    let span_errors = [
        "20131231-20131231",
        "20130101-20130104",
        "20121231-20130102",
        "20121231-20130131",
        "20120107-20120101",
        "20120101-20111226",
        "19600703-19600703",
        "20250229-20250306",
        "20251229-20251306",
    ];
    for text in span_errors {
        let err = parse(text).expect_err("must fail");
        assert!(matches!(err, PeriodError::InvalidSpan { .. }), "{text}: {err}");
    }
}

#[test]
fn malformed_week_text_is_a_parse_error() {
    let malformed = [
        "251229-260106",
        "990303-990309",
        "2000912-20010918",
        "20250106- 20250112",
        "1970-05-04-1970-05-02",
    ];
    for text in malformed {
        let err = parse(text).expect_err("must fail");
        assert!(matches!(err, PeriodError::PeriodParse { .. }), "{text}: {err}");
    }
}

#[test]
fn old_weeks_end_on_the_expected_weekday() {
    let cases = [
        ("19171206-19171212", 2),
        ("19681230-19690105", 6),
        ("18640225-18640302", 2),
        ("19800226-19800303", 0),
        ("18191230-18200105", 2),
        ("19491228-19500103", 1),
    ];
    for (text, day_of_week) in cases {
        assert_eq!(period(text).day_of_week(), day_of_week, "{text}");
    }
}

#[test]
fn old_weeks_reparse_to_the_same_period() {
    let cases = [
        "18690924-18690930",
        "19171206-19171212",
        "19681230-19690105",
        "19751229-19760104",
        "19931231-19940106",
        "19491228-19500103",
        "18191230-18200105",
        "18531229-18540104",
        "18640225-18640302",
        "19800226-19800303",
    ];
    for text in cases {
        let week = period(text);
        assert_eq!(period(&week.to_string()), week, "{text}");
    }
}

// =============================================================================
// Retro ranges
// =============================================================================

#[test]
fn year_ranges_enumerate_every_year() {
    let cases: [(&str, &[i32]); 4] = [
        ("1970-1973", &[1970, 1971, 1972, 1973]),
        ("1867-1869", &[1867, 1868, 1869]),
        ("1849-1851", &[1849, 1850, 1851]),
        ("1959-1963", &[1959, 1960, 1961, 1962, 1963]),
    ];
    for (text, years) in cases {
        let range = range_of(text);
        assert_eq!(range.year(), years, "{text}");
        assert_eq!(range.freqstr(), "Y-DEC", "{text}");
        assert_eq!(range.to_string(), text);
    }
}

#[test]
fn quarter_ranges_cross_year_boundaries() {
    let cases: [(&str, &[i32], &[u8]); 6] = [
        ("1960Q3-1961Q1", &[1960, 1960, 1961], &[3, 4, 1]),
        (
            "1830Q1-1831Q2",
            &[1830, 1830, 1830, 1830, 1831, 1831],
            &[1, 2, 3, 4, 1, 2],
        ),
        ("1980Q4-1981Q3", &[1980, 1981, 1981, 1981], &[4, 1, 2, 3]),
        ("1850Q2-1851Q1", &[1850, 1850, 1850, 1851], &[2, 3, 4, 1]),
        ("1859Q2-1860Q1", &[1859, 1859, 1859, 1860], &[2, 3, 4, 1]),
        ("1929Q3-1930Q2", &[1929, 1929, 1930, 1930], &[3, 4, 1, 2]),
    ];
    for (text, years, quarters) in cases {
        let range = range_of(text);
        assert_eq!(range.year(), years, "{text}");
        assert_eq!(range.quarter(), quarters, "{text}");
        assert_eq!(range.freqstr(), "Q-DEC", "{text}");
    }
}

#[test]
fn inverted_ranges_fail() {
    for text in ["1973-1970", "1961Q1-1960Q3"] {
        let err = parse(text).expect_err("must fail");
        assert!(matches!(err, PeriodError::InvalidSpan { .. }), "{text}: {err}");
    }
    assert!(parse("1960Q5-1961Q1").is_err());
}

#[test]
fn fiscal_ranges_follow_the_annotation() {
    let range = range_of("2019-2020[Y-JUN]");
    assert_eq!(range.freq(), Frequency::Year { end: Month::June });
    assert_eq!(range.qyear(), vec![2019, 2020]);
    assert_eq!(range.first().start_date().to_string(), "2018-07-01");
    assert_eq!(range.to_string(), "2019-2020[Y-JUN]");
}

// =============================================================================
// Single tokens
// =============================================================================

#[test]
fn single_tokens_infer_their_frequency() {
    let cases = [
        ("2020", "Y-DEC"),
        ("2020Q2", "Q-DEC"),
        ("2020-Q2", "Q-DEC"),
        ("2020-02", "M"),
        ("2020-W07", "W-SUN"),
        ("2020-02-29", "D"),
        ("20200229", "D"),
        ("2020-02-29 13", "h"),
        ("2020-02-29T13:45", "min"),
        ("2020-02-29 13:45:10", "s"),
        ("2020-02-29 13:45:10.123", "ms"),
        ("2020-02-29 13:45:10.123456", "us"),
        ("2020-02-29 13:45:10.123456789", "ns"),
        ("2020-02-28[B]", "B"),
    ];
    for (text, freqstr) in cases {
        assert_eq!(period(text).freqstr(), freqstr, "{text}");
    }
}

#[test]
fn surrounding_whitespace_is_ignored() {
    assert_eq!(period("  2020Q2\n"), period("2020Q2"));
}

#[test]
fn unrecognised_text_fails() {
    for text in ["", "hello", "2020/02", "20-02-2020", "2020-02-29 25", "2020-13"] {
        assert!(parse(text).is_err(), "{text}");
    }
}

#[test]
fn explicit_frequency_reinterprets_tokens() {
    let q_nov = Frequency::Quarter {
        end: Month::November,
    };
    let fiscal = parse_with_freq("2021Q1", q_nov)
        .and_then(Parsed::into_period)
        .expect("must parse");
    assert_eq!(fiscal.start_date().to_string(), "2020-12-01");

    let business = parse_with_freq("2013-10-05", Frequency::BusinessDay)
        .and_then(Parsed::into_period)
        .expect("must parse");
    assert_eq!(business.ordinal(), 11417);

    let hour = parse_with_freq("2020-02", Frequency::Hour)
        .and_then(Parsed::into_period)
        .expect("must parse");
    assert_eq!(hour.to_string(), "2020-02-01 00");
}
