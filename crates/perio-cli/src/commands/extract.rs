use perio_core::{
    extract_ordinals, period_field_array, ArrayView, BulkOptions, Element, Values,
};
use serde::Serialize;

use crate::cli::ExtractArgs;
use crate::error::CliError;

use super::CommandResult;

#[derive(Debug, Serialize)]
struct ExtractData {
    freq: &'static str,
    ordinals: Vec<Option<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<FieldData>,
}

#[derive(Debug, Serialize)]
struct FieldData {
    name: &'static str,
    values: Vec<i64>,
}

pub fn run(args: &ExtractArgs) -> Result<CommandResult, CliError> {
    let elements = args
        .values
        .iter()
        .map(|value| match value.trim() {
            "NaT" | "nat" | "NAT" => Element::NaT,
            text => Element::from(text),
        })
        .collect::<Vec<_>>();

    let mut options = if args.tolerant {
        BulkOptions::tolerant()
    } else {
        BulkOptions::fail_fast()
    };
    if args.sequential {
        options = options.sequential();
    }

    let result = extract_ordinals(
        &ArrayView::flat(Values::Object(&elements)),
        args.freq,
        &options,
    )?;

    let field = match args.field {
        Some(field) => Some(FieldData {
            name: field.as_str(),
            values: period_field_array(
                field,
                &ArrayView::flat(Values::Int64(&result.ordinals)),
                args.freq,
            )?,
        }),
        None => None,
    };

    let warnings = result
        .failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>();
    let ordinals = result
        .ordinals
        .iter()
        .map(|&ordinal| (ordinal != perio_core::NAT).then_some(ordinal))
        .collect();

    Ok(CommandResult::ok(
        "extract",
        ExtractData {
            freq: args.freq.freqstr(),
            ordinals,
            field,
        },
    )?
    .with_warnings(warnings))
}
