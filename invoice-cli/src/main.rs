use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use tracing::{debug, error};

use invoice_cli::app::{self, Outcome};
use invoice_cli::cli::Cli;
use invoice_cli::config::AppConfig;
use invoice_cli::logging;

// ─── entry point ─────────────────────────────────────────────────────────────

fn try_main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref()).context("failed to load configuration")?;

    let filter = logging::resolve_filter(cli.log_level.as_deref(), &config.logging.level)?;
    let log_file = cli.log_file.as_deref().or(config.logging.file.as_deref());
    logging::init_logging(filter, log_file)?;

    let options = cli.run_options(&config, Local::now().date_naive());
    debug!(?options, "resolved run options");

    match app::run(&options)? {
        Outcome::Rendered(output) => {
            print!("{output}");
            Ok(ExitCode::SUCCESS)
        }
        Outcome::Invalid(errors) => {
            // Printed directly so a quiet log filter cannot hide them
            eprint!("{}", app::describe_failures(&errors));
            for e in errors.iter() {
                error!("{e}");
            }
            Ok(ExitCode::from(2))
        }
    }
}

fn main() -> ExitCode {
    match try_main() {
        Ok(code) => code,
        Err(e) => {
            // Logging may not be up yet, so report on stderr directly
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
