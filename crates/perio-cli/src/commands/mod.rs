mod asfreq;
mod extract;
mod factor;
mod format;
mod parse;

use perio_core::{format_timestamp, Period};
use serde::Serialize;
use serde_json::Value;

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[derive(Debug, Serialize)]
pub struct CommandResult {
    pub command: &'static str,
    pub data: Value,
    pub warnings: Vec<String>,
}

impl CommandResult {
    pub fn ok(command: &'static str, data: impl Serialize) -> Result<Self, CliError> {
        Ok(Self {
            command,
            data: serde_json::to_value(data)?,
            warnings: Vec::new(),
        })
    }

    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings.extend(warnings);
        self
    }
}

pub fn run(cli: &Cli) -> Result<CommandResult, CliError> {
    match &cli.command {
        Command::Parse(args) => parse::run(args),
        Command::Format(args) => format::run(args),
        Command::Asfreq(args) => asfreq::run(args),
        Command::Factor(args) => factor::run(args),
        Command::Extract(args) => extract::run(args),
    }
}

/// Canonical rendering of one period shared by the commands.
#[derive(Debug, Serialize)]
struct PeriodView {
    text: String,
    freq: &'static str,
    ordinal: i64,
    start: String,
    end: String,
}

impl From<&Period> for PeriodView {
    fn from(period: &Period) -> Self {
        Self {
            text: period.to_string(),
            freq: period.freqstr(),
            ordinal: period.ordinal(),
            start: format_timestamp(period.start_time()),
            end: format_timestamp(period.end_time()),
        }
    }
}
