//! Every period renders to text that parses back to the same period, for every frequency
//! and across the supported calendar.

use perio_core::{from_ordinal, parse, to_ordinal, Frequency, Parsed, Period};

fn reparse(period: Period) -> Period {
    let text = period.to_string();
    text.parse()
        .unwrap_or_else(|error| panic!("'{text}' ({}) should parse: {error}", period.freqstr()))
}

#[test]
fn format_then_parse_is_identity_for_every_frequency() {
    // Ordinals around the epoch, a leap day, and a few distant dates.
    let anchors = [
        (1970, 1, 1),
        (1969, 12, 31),
        (2024, 2, 29),
        (1850, 6, 15),
        (2272, 1, 1),
        (2250, 12, 31),
    ];

    for freq in Frequency::all() {
        for (year, month, day) in anchors {
            let fields = perio_core::CalendarFields::new(year, month, day).with_time(22, 59, 7);
            let Ok(period) = Period::from_fields(&fields, freq) else {
                // Nanosecond ordinals only reach a few centuries around the epoch.
                assert!(year < 1678 || year > 2261, "{freq} {year}");
                continue;
            };
            for neighbour in [-1, 0, 1] {
                let period = period.checked_add(neighbour).expect("in range");
                assert_eq!(reparse(period), period, "{freq}");
            }
        }
    }
}

#[test]
fn to_ordinal_inverts_from_ordinal() {
    for freq in Frequency::all() {
        for ordinal in [-1000, -1, 0, 1, 2284, 5000] {
            let fields = from_ordinal(ordinal, freq).expect("in range");
            assert_eq!(to_ordinal(&fields, freq), Ok(ordinal), "{freq} {ordinal}");
        }
    }
}

#[test]
fn week_years_are_never_read_as_clock_times() {
    for year in [2060, 2070, 2080, 2090, 2172, 2272, 2362, 2400, 2482] {
        let week = Period::from_year(year, Frequency::WEEK).expect("valid week");
        let recreated = reparse(week);
        assert_eq!(recreated, week, "{year}");
        assert_eq!(recreated.year(), year, "{year}");
    }
}

#[test]
fn ranges_round_trip() {
    for text in ["1970-1973", "1960Q3-1961Q1", "2019-2020[Y-JUN]", "2020Q4-2021Q2[Q-NOV]"] {
        let parsed = parse(text).expect("must parse");
        assert!(matches!(parsed, Parsed::Range(_)), "{text}");
        assert_eq!(parsed.to_string(), text);
        assert_eq!(parse(&parsed.to_string()), Ok(parsed));
    }
}

#[test]
fn serde_round_trip_preserves_periods() {
    let period: Period = "2021Q1[Q-NOV]".parse().expect("valid period");
    let json = serde_json::to_string(&period).expect("serializable");
    assert_eq!(json, r#"{"ordinal":204,"freq":"Q-NOV"}"#);
    assert_eq!(serde_json::from_str::<Period>(&json).expect("valid json"), period);
}
