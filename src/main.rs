//! Autoblo - Entry Point
//!
//! Runs ordered plans of filesystem operations from the command line.

use clap::Parser;
use log::info;

use autoblo::cli::{self, Cli};
use autoblo::config::AppConfig;
use autoblo::error::handlers::{error_to_exit_code, handle_error};
use autoblo::error::AppError;
use autoblo::utils::logging::setup_logging;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match AppConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            // Logging is configured from this file, so report directly
            let err = AppError::from(e);
            eprintln!("{}", err);
            std::process::exit(error_to_exit_code(&err));
        }
    };

    // validate() already checked the level
    setup_logging(config.log_level().unwrap_or(log::LevelFilter::Info));
    info!("Launching autoblo...");

    if let Err(e) = cli::run(cli, &config).await {
        handle_error(&e);
        std::process::exit(error_to_exit_code(&e));
    }
}
