//! CLI argument definitions for perio.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `parse` | Parse period strings and show their ordinals and bounds |
//! | `format` | Render ordinals of a frequency as canonical period strings |
//! | `asfreq` | Convert a period to another frequency |
//! | `factor` | Show the conversion factor between two intraday frequencies |
//! | `extract` | Convert a batch of values to ordinals, optionally projecting a field |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `json` | Output format (json, table) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--strict` | `false` | Treat warnings as errors |
//! | `--log-level` | `warn` | Diagnostics written to stderr |
//!
//! # Examples
//!
//! ```bash
//! perio parse 2025-01-06/2025-01-12 1960Q3-1961Q1
//! perio format --freq Q-NOV 204 205
//! perio asfreq 2013-10-05 --to B --how end
//! perio extract --freq D 2024-02-29 NaT 2024-03-01 --field day-of-week
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use perio_core::{Frequency, How, PeriodField};

/// Period ordinals, frequency conversion, and period string parsing.
#[derive(Debug, Parser)]
#[command(name = "perio", author, version, about)]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Treat warnings as failures (exit code 5).
    #[arg(long, global = true, default_value_t = false)]
    pub strict: bool,

    /// Verbosity of diagnostics written to stderr.
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned key/value lines for terminal display.
    Table,
    /// Single JSON object output.
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => Self::ERROR,
            LogLevel::Warn => Self::WARN,
            LogLevel::Info => Self::INFO,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Trace => Self::TRACE,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Parse period strings.
    ///
    /// # Examples
    ///
    ///   perio parse 2272-01-01/2272-01-07
    ///   perio parse 2020Q2 --freq M
    Parse(ParseArgs),

    /// Render ordinals as period strings.
    Format(FormatArgs),

    /// Convert a period to another frequency.
    Asfreq(AsfreqArgs),

    /// Show the conversion factor between two day or intraday frequencies.
    Factor(FactorArgs),

    /// Convert values to ordinals of one frequency.
    ///
    /// Values are period strings or `NaT`; `NaT` becomes the missing-value sentinel.
    Extract(ExtractArgs),
}

#[derive(Debug, Args)]
pub struct ParseArgs {
    /// Period strings, e.g. `2025-01-06/2025-01-12`, `1970-1973`, `2013-10-07[B]`.
    #[arg(required = true, num_args = 1..)]
    pub values: Vec<String>,

    /// Interpret every value in this frequency instead of inferring it.
    #[arg(long)]
    pub freq: Option<Frequency>,
}

#[derive(Debug, Args)]
pub struct FormatArgs {
    /// Frequency of the ordinals.
    #[arg(long)]
    pub freq: Frequency,

    #[arg(required = true, num_args = 1.., allow_negative_numbers = true)]
    pub ordinals: Vec<i64>,
}

#[derive(Debug, Args)]
pub struct AsfreqArgs {
    /// Source period string.
    pub period: String,

    /// Target frequency.
    #[arg(long)]
    pub to: Frequency,

    /// Which end of the source period selects the target period.
    #[arg(long, value_enum, default_value_t = HowArg::Start)]
    pub how: HowArg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum HowArg {
    Start,
    End,
}

impl From<HowArg> for How {
    fn from(how: HowArg) -> Self {
        match how {
            HowArg::Start => Self::Start,
            HowArg::End => Self::End,
        }
    }
}

#[derive(Debug, Args)]
pub struct FactorArgs {
    pub from: Frequency,
    pub to: Frequency,
}

#[derive(Debug, Args)]
pub struct ExtractArgs {
    /// Target frequency.
    #[arg(long)]
    pub freq: Frequency,

    #[arg(required = true, num_args = 1..)]
    pub values: Vec<String>,

    /// Project this field out of the extracted ordinals.
    #[arg(long, value_parser = parse_field)]
    pub field: Option<PeriodField>,

    /// Replace failing values with NaT instead of stopping at the first one.
    #[arg(long, default_value_t = false)]
    pub tolerant: bool,

    /// Convert on the current thread only.
    #[arg(long, default_value_t = false)]
    pub sequential: bool,
}

fn parse_field(value: &str) -> Result<PeriodField, String> {
    let normalized = value.trim().replace('-', "_").to_ascii_lowercase();
    PeriodField::ALL
        .into_iter()
        .find(|field| field.as_str() == normalized)
        .ok_or_else(|| {
            let names = PeriodField::ALL.map(PeriodField::as_str).join(", ");
            format!("unknown field '{value}', expected one of: {names}")
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "perio",
            "format",
            "--freq",
            "Q-NOV",
            "-3",
            "204",
            "--format",
            "table",
        ])
        .expect("must parse");
        assert_eq!(cli.format, OutputFormat::Table);
        let Command::Format(args) = cli.command else {
            panic!("expected format command");
        };
        assert_eq!(args.ordinals, vec![-3, 204]);
        assert_eq!(args.freq.freqstr(), "Q-NOV");
    }

    #[test]
    fn field_names_accept_kebab_case() {
        assert_eq!(parse_field("day-of-week"), Ok(PeriodField::DayOfWeek));
        assert_eq!(parse_field("QYEAR"), Ok(PeriodField::QYear));
        assert!(parse_field("fortnight").is_err());
    }

    #[test]
    fn rejects_unknown_frequency() {
        let result = Cli::try_parse_from(["perio", "factor", "D", "fortnight"]);
        assert!(result.is_err());
    }
}
