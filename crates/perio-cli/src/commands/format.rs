use perio_core::Period;

use crate::cli::FormatArgs;
use crate::error::CliError;

use super::{CommandResult, PeriodView};

pub fn run(args: &FormatArgs) -> Result<CommandResult, CliError> {
    let periods = args
        .ordinals
        .iter()
        .map(|&ordinal| Period::new(ordinal, args.freq).map(|period| PeriodView::from(&period)))
        .collect::<Result<Vec<_>, _>>()?;

    CommandResult::ok("format", periods)
}
