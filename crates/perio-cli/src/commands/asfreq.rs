use perio_core::{How, Period};
use serde::Serialize;

use crate::cli::AsfreqArgs;
use crate::error::CliError;

use super::{CommandResult, PeriodView};

#[derive(Debug, Serialize)]
struct AsfreqData {
    how: How,
    source: PeriodView,
    target: PeriodView,
}

pub fn run(args: &AsfreqArgs) -> Result<CommandResult, CliError> {
    let source: Period = args.period.parse()?;
    let how = How::from(args.how);
    let target = source.asfreq(args.to, how)?;

    CommandResult::ok(
        "asfreq",
        AsfreqData {
            how,
            source: PeriodView::from(&source),
            target: PeriodView::from(&target),
        },
    )
}
