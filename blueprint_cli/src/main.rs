//! # Blueprint CLI
//!
//! Command-line front end for `blueprint_core`: validate blueprint files,
//! expand them into buildings, and scaffold example blueprints.
//!
//! Exit codes:
//! - 0: Success
//! - 1: General error
//! - 2: Invalid input (unreadable file, bad JSON, version mismatch)
//! - 3: Validation failure

use std::process::ExitCode;

use blueprint_core::BlueprintError;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;

use commands::{Cli, Commands};

/// CI-friendly exit codes
pub struct ExitCodes;

impl ExitCodes {
    pub const SUCCESS: u8 = 0;
    pub const GENERAL_ERROR: u8 = 1;
    pub const INVALID_INPUT: u8 = 2;
    pub const VALIDATION_FAILURE: u8 = 3;
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let result = match cli.command {
        Commands::Validate(args) => commands::validate::execute(args),
        Commands::Build(args) => commands::build::execute(args),
        Commands::Info(args) => commands::info::execute(args),
        Commands::Create(args) => commands::create::execute(args),
    };

    match result {
        Ok(()) => ExitCode::from(ExitCodes::SUCCESS),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            if let Some(error) = e.downcast_ref::<BlueprintError>() {
                for violation in error.violations() {
                    eprintln!("  - {}", violation);
                }
            }
            ExitCode::from(categorize_error(&e))
        }
    }
}

fn init_logging(verbose: bool, quiet: bool) {
    let level = if verbose {
        "blueprint=debug"
    } else if quiet {
        "blueprint=error"
    } else {
        "blueprint=info"
    };

    let mut filter = EnvFilter::from_default_env();
    for directive in [level, "warn"] {
        if let Ok(directive) = directive.parse() {
            filter = filter.add_directive(directive);
        }
    }

    // Logging may already be initialized; carry on either way
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}

/// Categorize error to determine exit code
fn categorize_error(e: &anyhow::Error) -> u8 {
    match e.downcast_ref::<BlueprintError>() {
        Some(BlueprintError::InvalidBlueprint { .. }) | Some(BlueprintError::EmptyBuilding(_)) => {
            ExitCodes::VALIDATION_FAILURE
        }
        Some(BlueprintError::FileError { .. })
        | Some(BlueprintError::SerializationError { .. })
        | Some(BlueprintError::VersionMismatch { .. })
        | Some(BlueprintError::InvalidInput { .. }) => ExitCodes::INVALID_INPUT,
        Some(BlueprintError::Internal { .. }) | None => ExitCodes::GENERAL_ERROR,
    }
}
