use std::sync::Arc;
use std::time::Duration;

use quotespan_core::{
    DateRange, DispatcherConfig, QuoteServiceFetcher, ResultSink, RunReport, WriterSink,
    YearDispatcher, YearOutcome,
};

use crate::cli::{Cli, PricesArgs};
use crate::error::CliError;

use super::to_row_format;

pub async fn run(cli: &Cli, args: &PricesArgs) -> Result<(), CliError> {
    // Validate before the output file is created.
    let range = DateRange::parse(&args.range.first_date, &args.range.last_date)?;

    let format = to_row_format(cli.format);
    let sink: Arc<dyn ResultSink> = match &args.output {
        Some(path) => Arc::new(WriterSink::create_file(path, format)?),
        None => Arc::new(WriterSink::stdout(format)),
    };

    let fetcher = QuoteServiceFetcher::default()
        .with_base_url(cli.base_url.as_str())
        .with_timeout_ms(cli.timeout_ms);
    let config = DispatcherConfig {
        task_timeout: (cli.task_timeout_ms > 0).then(|| Duration::from_millis(cli.task_timeout_ms)),
    };

    let report = YearDispatcher::new(Arc::new(fetcher), Arc::clone(&sink))
        .with_config(config)
        .run_range(&range)
        .await;
    sink.flush()?;

    if args.summary {
        eprintln!("{}", serde_json::to_string_pretty(&report)?);
    }

    ensure_output_complete(&report)
}

/// Fetch failures, timeouts and panics only cost rows; rows that were matched
/// but never written fail the command.
fn ensure_output_complete(report: &RunReport) -> Result<(), CliError> {
    let mut years = Vec::new();
    let mut reason = String::new();
    for failed in report.sink_failures() {
        years.push(failed.year);
        if let YearOutcome::Failed { reason: cause, .. } = &failed.outcome {
            if reason.is_empty() {
                reason = cause.clone();
            }
        }
    }

    if years.is_empty() {
        Ok(())
    } else {
        Err(CliError::IncompleteOutput { years, reason })
    }
}
