use std::io::Write;

use quotespan_core::YearDispatcher;

use crate::cli::{Cli, OutputFormat, RangeArgs};
use crate::error::CliError;

pub fn run(cli: &Cli, args: &RangeArgs) -> Result<(), CliError> {
    let plan = YearDispatcher::plan(&args.first_date, &args.last_date)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match cli.format {
        OutputFormat::Ndjson => writeln!(out, "{}", serde_json::to_string(&plan)?)?,
        OutputFormat::Text => {
            let years = plan
                .years
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(out, "range: {} .. {}", plan.start, plan.end)?;
            writeln!(out, "days: {}", plan.days)?;
            writeln!(out, "years ({}): {years}", plan.years.len())?;
        }
    }

    Ok(())
}
