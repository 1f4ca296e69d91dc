//! Info command - Print the storey stack a blueprint expands into.

use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::Result;
use blueprint_core::{build, Building, Storey};
use clap::Args;

use super::SettingsArgs;

#[derive(Args)]
pub struct InfoArgs {
    /// Blueprint file to inspect
    pub file: PathBuf,

    #[command(flatten)]
    pub settings: SettingsArgs,
}

pub fn execute(args: InfoArgs) -> Result<()> {
    let file = super::load(&args.file, &args.settings)?;
    let building = build(&file.blueprint)?;

    println!("Blueprint: {}", file.display_name());
    println!("Version:   {}", file.version);
    println!();
    print!("{}", storey_table(&building));
    Ok(())
}

/// Storeys listed top-down, the way a section drawing reads.
fn storey_table(building: &Building) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<12} {:>12} {:>10}  {}",
        "Storey", "Elevation", "Height", "Type"
    );

    for storey in building.storeys().iter().rev() {
        let kind = match storey {
            Storey::Master(_) => "master".to_string(),
            Storey::Similar(s) => match building.storey(s.similar_to) {
                Some(master) => format!("similar to {}", master.name()),
                None => "similar".to_string(),
            },
        };
        let _ = writeln!(
            out,
            "{:<12} {:>12.0} {:>10.0}  {}",
            storey.name().as_str(),
            storey.elevation().millimetres().value(),
            storey.height().millimetres().value(),
            kind
        );
    }

    let summary = building.summary();
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{} storey(s), {} slab(s), {} column(s), total height {:.0} mm",
        summary.storey_count,
        summary.slab_count,
        summary.column_count,
        summary.total_height.value()
    );
    out
}
