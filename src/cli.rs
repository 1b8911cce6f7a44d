//! Command-line shell
//!
//! Loads plan payloads, prints them, runs them, and prints the results.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use log::info;
use tokio::io::AsyncReadExt;

use crate::builder::{PromptPicker, build_plan};
use crate::config::{AppConfig, OutputFormat};
use crate::error::AppError;
use crate::plan::render::{render_plan, render_result};
use crate::plan::{PlanRequest, StepResult, run_request};

/// Autoblo - run ordered plans of filesystem operations
#[derive(Parser, Debug)]
#[command(name = "autoblo")]
#[command(about = "Runs ordered plans of mkdir/copy/move/delete steps")]
#[command(version)]
pub struct Cli {
    /// Configuration file (defaults to ./autoblo.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Execute a plan
    Run {
        /// Plan file (request object or bare step array), `-` for stdin
        plan: PathBuf,

        /// Keep going after a failed step
        #[arg(long)]
        continue_on_fail: bool,

        /// Result output format
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
    },
    /// Print a plan without running it
    Show {
        /// Plan file, `-` for stdin
        plan: PathBuf,
    },
    /// Compose a plan interactively
    Build {
        /// Write the plan here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Runs the selected command
pub async fn run(cli: Cli, config: &AppConfig) -> Result<(), AppError> {
    match cli.command {
        Commands::Run {
            plan,
            continue_on_fail,
            format,
        } => {
            let format = match format {
                Some(format) => format,
                None => config.output_format()?,
            };
            run_plan(&plan, continue_on_fail, format, config).await
        }
        Commands::Show { plan } => {
            let request = load_request(&plan).await?;
            for line in render_plan(request.entries()) {
                println!("{}", line);
            }
            Ok(())
        }
        Commands::Build { output } => build(output.as_deref(), config).await,
    }
}

async fn run_plan(
    plan: &Path,
    continue_on_fail: bool,
    format: OutputFormat,
    config: &AppConfig,
) -> Result<(), AppError> {
    let request = load_request(plan).await?;
    let continue_on_fail = continue_on_fail || request.continue_on_fail_or(config.continue_on_fail);

    if format == OutputFormat::Text {
        if request.entries().is_empty() && request.plan.is_array() {
            println!("no steps to run");
            return Ok(());
        }
        for line in render_plan(request.entries()) {
            println!("{}", line);
        }
        println!("=== run start ===");
    }

    let results = run_request(&request, continue_on_fail).await;

    match format {
        OutputFormat::Text => {
            for result in &results {
                println!("{}", render_result(result));
            }
            println!("=== run end ===");
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&results)?),
    }

    check_results(&results)
}

/// Fails when any step reported failure
pub fn check_results(results: &[StepResult]) -> Result<(), AppError> {
    match results.iter().filter(|r| !r.ok).count() {
        0 => Ok(()),
        failed => Err(AppError::StepsFailed(failed)),
    }
}

async fn build(output: Option<&Path>, config: &AppConfig) -> Result<(), AppError> {
    let steps = {
        let stdin = io::stdin();
        let mut terminal = PromptPicker::new(stdin.lock(), io::stderr());
        build_plan(&mut terminal)?
    };

    let request = PlanRequest::from_steps(&steps, config.continue_on_fail)?;
    let json = serde_json::to_string_pretty(&request)?;

    match output {
        Some(path) => {
            tokio::fs::write(path, format!("{}\n", json)).await?;
            info!("Wrote {} step(s) to {}", steps.len(), path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{}", json)?;
        }
    }
    Ok(())
}

async fn load_request(plan: &Path) -> Result<PlanRequest, AppError> {
    let raw = if plan == Path::new("-") {
        let mut raw = String::new();
        tokio::io::stdin().read_to_string(&mut raw).await?;
        raw
    } else {
        tokio::fs::read_to_string(plan).await?
    };
    Ok(PlanRequest::parse(&raw)?)
}
