//! Create command - Write an example blueprint to start from.

use std::path::PathBuf;

use anyhow::{Context, Result};
use blueprint_core::file_io::{save_blueprint, BlueprintFile};
use blueprint_core::scalars::Height;
use blueprint_core::templates::Example;
use blueprint_core::{validate, BlueprintError};
use clap::{Args, ValueEnum};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExampleKind {
    Office,
    Tower,
    Podium,
}

impl From<ExampleKind> for Example {
    fn from(kind: ExampleKind) -> Self {
        match kind {
            ExampleKind::Office => Example::Office,
            ExampleKind::Tower => Example::Tower,
            ExampleKind::Podium => Example::Podium,
        }
    }
}

#[derive(Args)]
pub struct CreateArgs {
    /// Path of the blueprint file to write
    pub output: PathBuf,

    /// Example building to start from
    #[arg(short, long, value_enum, default_value_t = ExampleKind::Office)]
    pub example: ExampleKind,

    /// Number of storeys
    #[arg(
        short,
        long,
        default_value_t = 10,
        value_parser = clap::value_parser!(u32).range(1..=i64::from(Example::MAX_STOREYS))
    )]
    pub storeys: u32,

    /// Typical storey height in millimetres
    #[arg(long, default_value_t = 3000.0)]
    pub height: f64,

    /// Project name stored in the file
    #[arg(short, long)]
    pub name: Option<String>,

    /// Overwrite an existing file
    #[arg(short, long)]
    pub force: bool,
}

pub fn execute(args: CreateArgs) -> Result<()> {
    if args.output.exists() && !args.force {
        anyhow::bail!(
            "File already exists: {} (use --force to overwrite)",
            args.output.display()
        );
    }

    let example = Example::from(args.example);
    if args.storeys < example.min_storeys() {
        info!(
            "The {} example needs at least {} storeys; using {}",
            example,
            example.min_storeys(),
            example.min_storeys()
        );
    }

    Height::create(args.height).map_err(|e| {
        BlueprintError::invalid_input("height", args.height.to_string(), e.to_string())
    })?;

    let blueprint = example.blueprint(args.storeys, args.height);
    validate(&blueprint).map_err(BlueprintError::from)?;

    let name = args.name.unwrap_or_else(|| example.name().to_string());
    let file = BlueprintFile::new(Some(name), blueprint);
    save_blueprint(&file, &args.output)
        .with_context(|| format!("Failed to write blueprint {}", args.output.display()))?;

    println!("Created {} blueprint: {}", example, args.output.display());
    println!("  {}", example.description());
    Ok(())
}
