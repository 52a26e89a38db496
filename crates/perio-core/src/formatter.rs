//! Canonical period rendering.
//!
//! Every rendering is accepted by [`crate::parse`] and parses back to the same value. Text
//! that alone would be read as a different frequency (business days, non-December fiscal
//! anchors) carries a trailing `[FREQ]` annotation.

use time::{Date, Month, PrimitiveDateTime};

use crate::{Frequency, Period, RetroPeriodRange};

pub fn format(period: &Period) -> String {
    let mut text = bare(period);
    annotate(&mut text, period.freq());
    text
}

/// Renders `YYYY-YYYY` or `YYYYQn-YYYYQn`.
pub fn format_range(range: &RetroPeriodRange) -> String {
    let mut text = format!("{}-{}", bare(&range.first()), bare(&range.last()));
    annotate(&mut text, range.freq());
    text
}

/// Renders `YYYY-MM-DD HH:MM:SS`, followed by six or nine fractional digits when the
/// sub-second part is non-zero.
pub fn format_timestamp(value: PrimitiveDateTime) -> String {
    let mut text = format!(
        "{} {:02}:{:02}:{:02}",
        iso_date(value.date()),
        value.hour(),
        value.minute(),
        value.second()
    );
    let nanos = value.nanosecond();
    if nanos % 1000 != 0 {
        text.push_str(&format!(".{nanos:09}"));
    } else if nanos != 0 {
        text.push_str(&format!(".{:06}", nanos / 1000));
    }
    text
}

fn bare(period: &Period) -> String {
    let fields = period.fields();
    let date = || {
        format!(
            "{:04}-{:02}-{:02}",
            fields.year, fields.month, fields.day
        )
    };

    match period.freq() {
        Frequency::Year { .. } => format!("{:04}", period.qyear()),
        Frequency::Quarter { .. } => format!("{:04}Q{}", period.qyear(), period.quarter()),
        Frequency::Month => format!("{:04}-{:02}", fields.year, fields.month),
        Frequency::Week { .. } => format!(
            "{}/{}",
            iso_date(period.start_date()),
            iso_date(period.end_date())
        ),
        Frequency::BusinessDay | Frequency::Day => date(),
        Frequency::Hour => format!("{} {:02}", date(), fields.hour),
        Frequency::Minute => format!("{} {:02}:{:02}", date(), fields.hour, fields.minute),
        Frequency::Second => format!(
            "{} {:02}:{:02}:{:02}",
            date(),
            fields.hour,
            fields.minute,
            fields.second
        ),
        Frequency::Millisecond => format!(
            "{} {:02}:{:02}:{:02}.{:03}",
            date(),
            fields.hour,
            fields.minute,
            fields.second,
            fields.microsecond / 1000
        ),
        Frequency::Microsecond => format!(
            "{} {:02}:{:02}:{:02}.{:06}",
            date(),
            fields.hour,
            fields.minute,
            fields.second,
            fields.microsecond
        ),
        Frequency::Nanosecond => format!(
            "{} {:02}:{:02}:{:02}.{:09}",
            date(),
            fields.hour,
            fields.minute,
            fields.second,
            fields.microsecond * 1000 + fields.picosecond / 1000
        ),
    }
}

fn annotate(text: &mut String, freq: Frequency) {
    let annotated = match freq {
        Frequency::Year { end } | Frequency::Quarter { end } => end != Month::December,
        Frequency::BusinessDay => true,
        Frequency::Month
        | Frequency::Week { .. }
        | Frequency::Day
        | Frequency::Hour
        | Frequency::Minute
        | Frequency::Second
        | Frequency::Millisecond
        | Frequency::Microsecond
        | Frequency::Nanosecond => false,
    };
    if annotated {
        text.push('[');
        text.push_str(freq.freqstr());
        text.push(']');
    }
}

fn iso_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        date.month() as u8,
        date.day()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CalendarFields;

    fn period(fields: CalendarFields, freq: Frequency) -> Period {
        Period::from_fields(&fields, freq).expect("valid period")
    }

    #[test]
    fn renders_each_granularity() {
        let instant = CalendarFields::new(2024, 2, 29)
            .with_time(7, 5, 9)
            .with_subsecond(123_456, 789_000);
        let cases = [
            (Frequency::YEAR, "2024"),
            (Frequency::QUARTER, "2024Q1"),
            (Frequency::Month, "2024-02"),
            (Frequency::WEEK, "2024-02-26/2024-03-03"),
            (Frequency::Day, "2024-02-29"),
            (Frequency::BusinessDay, "2024-02-29[B]"),
            (Frequency::Hour, "2024-02-29 07"),
            (Frequency::Minute, "2024-02-29 07:05"),
            (Frequency::Second, "2024-02-29 07:05:09"),
            (Frequency::Millisecond, "2024-02-29 07:05:09.123"),
            (Frequency::Microsecond, "2024-02-29 07:05:09.123456"),
            (Frequency::Nanosecond, "2024-02-29 07:05:09.123456789"),
        ];
        for (freq, expected) in cases {
            assert_eq!(format(&period(instant, freq)), expected, "{freq}");
        }
    }

    #[test]
    fn fiscal_anchors_are_annotated() {
        let q_nov = Frequency::Quarter {
            end: Month::November,
        };
        assert_eq!(
            format(&period(CalendarFields::new(2020, 12, 1), q_nov)),
            "2021Q1[Q-NOV]"
        );

        let y_jun = Frequency::Year { end: Month::June };
        assert_eq!(
            format(&period(CalendarFields::new(2019, 7, 1), y_jun)),
            "2020[Y-JUN]"
        );
    }

    #[test]
    fn renders_week_end_labels() {
        let thursday_week = period(
            CalendarFields::new(2025, 3, 6),
            Frequency::Week {
                end: time::Weekday::Thursday,
            },
        );
        assert_eq!(format(&thursday_week), "2025-02-28/2025-03-06");
        assert_eq!(thursday_week.freqstr(), "W-THU");
    }

    #[test]
    fn renders_timestamps_like_wall_clock_values() {
        let week = period(CalendarFields::new(2025, 1, 12), Frequency::WEEK);
        assert_eq!(format_timestamp(week.start_time()), "2025-01-06 00:00:00");
        assert_eq!(
            format_timestamp(week.end_time()),
            "2025-01-12 23:59:59.999999999"
        );

        let micro = period(
            CalendarFields::new(2025, 1, 12).with_subsecond(250_000, 0),
            Frequency::Microsecond,
        );
        assert_eq!(format_timestamp(micro.start_time()), "2025-01-12 00:00:00.250000");
    }
}
