mod cli;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use harvest_engine::{HarvestReport, Harvester, ReqwestFetcher};
use harvest_logging::{harvest_error, harvest_info};

use cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();
    harvest_logging::initialize(cli.log_level(), &cli.log_destination());

    match run(&cli) {
        Ok(report) => {
            harvest_info!(
                "Done: {} entries written to {:?}, {} without rating",
                report.entries,
                report.output_path,
                report.unavailable
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            harvest_error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<HarvestReport> {
    let config = cli.resolve_config()?;
    let fetcher = ReqwestFetcher::new(cli.fetch_settings())?;
    let harvester = Harvester::new(config, fetcher)?;

    // Everything runs sequentially on this one thread.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start the async runtime")?;
    Ok(runtime.block_on(harvester.run())?)
}
