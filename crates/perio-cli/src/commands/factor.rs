use perio_core::conversion_factor;
use serde_json::json;

use crate::cli::FactorArgs;
use crate::error::CliError;

use super::CommandResult;

pub fn run(args: &FactorArgs) -> Result<CommandResult, CliError> {
    let factor = conversion_factor(args.from, args.to)?;

    CommandResult::ok(
        "factor",
        json!({
            "from": args.from.freqstr(),
            "to": args.to.freqstr(),
            "factor": factor,
        }),
    )
}
