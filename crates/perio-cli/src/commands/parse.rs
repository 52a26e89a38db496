use perio_core::{parse, parse_with_freq, Parsed};
use serde::Serialize;

use crate::cli::ParseArgs;
use crate::error::CliError;

use super::{CommandResult, PeriodView};

#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum ParsedView {
    Period {
        input: String,
        #[serde(flatten)]
        period: PeriodView,
    },
    Range {
        input: String,
        text: String,
        freq: &'static str,
        periods: Vec<PeriodView>,
    },
}

pub fn run(args: &ParseArgs) -> Result<CommandResult, CliError> {
    let parsed = args
        .values
        .iter()
        .map(|value| {
            let parsed = match args.freq {
                Some(freq) => parse_with_freq(value, freq)?,
                None => parse(value)?,
            };
            Ok(view(value, parsed))
        })
        .collect::<Result<Vec<_>, CliError>>()?;

    CommandResult::ok("parse", parsed)
}

fn view(input: &str, parsed: Parsed) -> ParsedView {
    match parsed {
        Parsed::Single(period) => ParsedView::Period {
            input: input.to_owned(),
            period: PeriodView::from(&period),
        },
        Parsed::Range(range) => ParsedView::Range {
            input: input.to_owned(),
            text: range.to_string(),
            freq: range.freqstr(),
            periods: range.iter().map(PeriodView::from).collect(),
        },
    }
}
