//! HLP CLI
//!
//! Command-line interface for the HLP comparator-chain engine.

use std::io;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use log::{debug, error};

use hlp::cli::commands;
use hlp::cli::{Cli, Commands};
use hlp::EditorConfig;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logger
    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    debug!("HLP v{}", env!("CARGO_PKG_VERSION"));

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            error!("{:#}", err);
            if let Some(hlp_err) = err.downcast_ref::<hlp::HlpError>() {
                for hint in hlp_err.recovery_suggestions() {
                    eprintln!("  {}", hint);
                }
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = match &cli.config {
        Some(path) => EditorConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => EditorConfig::default(),
    };

    match cli.command {
        Commands::Eval { source } => commands::eval(&commands::read_text(&source)?, &config)?,
        Commands::Normalize { source } => commands::normalize(&commands::read_text(&source)?)?,
        Commands::Json { source } => commands::json(&commands::read_text(&source)?)?,
        Commands::Check { texts } => {
            let failures = commands::check(&texts, &mut io::stdout().lock())?;
            if failures > 0 {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Edit { text } => {
            commands::edit(
                text.as_deref(),
                config,
                io::stdin().lock(),
                &mut io::stdout().lock(),
            )?;
        }
    }

    Ok(ExitCode::SUCCESS)
}
