mod plan;
mod prices;

use quotespan_core::RowFormat;

use crate::cli::{Cli, Command, OutputFormat};
use crate::error::CliError;

pub async fn run(cli: &Cli) -> Result<(), CliError> {
    match &cli.command {
        Command::Prices(args) => prices::run(cli, args).await,
        Command::Plan(args) => plan::run(cli, args),
    }
}

fn to_row_format(format: OutputFormat) -> RowFormat {
    match format {
        OutputFormat::Text => RowFormat::Text,
        OutputFormat::Ndjson => RowFormat::Ndjson,
    }
}
