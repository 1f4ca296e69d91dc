//! Build command - Validate and expand a blueprint.

use std::path::PathBuf;

use anyhow::{Context, Result};
use blueprint_core::file_io::{save_document, BuildingDocument};
use blueprint_core::{build, BuildingSummary};
use clap::Args;
use tracing::info;

use super::SettingsArgs;

#[derive(Args)]
pub struct BuildArgs {
    /// Blueprint file to build
    pub file: PathBuf,

    /// Write the building document to this path
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Include the node/element analysis model in the document
    #[arg(long)]
    pub with_model: bool,

    #[command(flatten)]
    pub settings: SettingsArgs,
}

pub fn execute(args: BuildArgs) -> Result<()> {
    info!("Building blueprint: {}", args.file.display());

    let file = super::load(&args.file, &args.settings)?;
    let building = build(&file.blueprint)?;

    let mut document = BuildingDocument::new(file.display_name(), building);
    if args.with_model {
        document = document.with_model();
    }

    match &args.output {
        Some(path) => {
            save_document(&document, path)
                .with_context(|| format!("Failed to save building to {}", path.display()))?;
            info!("Saved building document: {}", path.display());
            println!("{}", summary_line(&document.summary));
            println!("Written to {}", path.display());
        }
        None => {
            println!("{}", summary_line(&document.summary));
            if let Some(model) = &document.model {
                println!(
                    "Analysis model: {} node(s), {} element(s)",
                    model.nodes.len(),
                    model.elements.len()
                );
            }
        }
    }

    Ok(())
}

fn summary_line(summary: &BuildingSummary) -> String {
    format!(
        "{} storey(s) ({} master, {} similar), {} slab(s), {} column(s), {:.0} mm to {:.0} mm",
        summary.storey_count,
        summary.master_count,
        summary.similar_count,
        summary.slab_count,
        summary.column_count,
        summary.base_elevation.value(),
        summary.roof_elevation.value(),
    )
}
