mod cli;
mod report;
mod source;

use std::io::{self, BufReader};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use engine_logging::{engine_debug, engine_error};
use jsvars_engine::{DispatchError, FetchSettings, ReqwestFetcher, WorkerPool};

use crate::cli::Cli;
use crate::report::ConsoleReporter;
use crate::source::TargetSource;

fn main() -> ExitCode {
    let cli = Cli::parse();
    engine_logging::initialize(engine_logging::level_for_verbosity(cli.verbose));

    let palette = cli.palette();
    match run(cli) {
        Ok(processed) => {
            engine_debug!("Scanned {processed} targets");
            ExitCode::SUCCESS
        }
        Err(err) => match err.downcast_ref::<DispatchError>() {
            Some(DispatchError::NoTargets) => {
                eprintln!(
                    "{}Error:{} No URLs provided. Pass URLs as arguments or pipe them into the program.",
                    palette.red, palette.reset
                );
                ExitCode::from(1)
            }
            _ => {
                engine_error!("{err:#}");
                ExitCode::from(2)
            }
        },
    }
}

fn run(cli: Cli) -> anyhow::Result<usize> {
    let settings = cli.scan_settings();
    let palette = cli.palette();
    let source = if cli.urls.is_empty() {
        TargetSource::Lines(BufReader::new(io::stdin()))
    } else {
        TargetSource::List(cli.urls)
    };

    let runtime = tokio::runtime::Runtime::new().context("starting tokio runtime")?;
    runtime.block_on(async move {
        let fetcher =
            ReqwestFetcher::new(FetchSettings::default()).context("building HTTP client")?;
        let pool = WorkerPool::new(Arc::new(fetcher), settings);
        let reporter = Arc::new(ConsoleReporter::stdout(palette));
        let processed = pool.run(source.into_targets(), reporter).await?;
        Ok::<_, anyhow::Error>(processed)
    })
}
