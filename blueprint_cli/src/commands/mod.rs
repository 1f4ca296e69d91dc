//! CLI command definitions.
//!
//! Each subcommand maps to one step of the blueprint workflow: scaffold,
//! validate, build, inspect.

use std::path::Path;

use anyhow::{Context, Result};
use blueprint_core::file_io::{load_blueprint, BlueprintFile};
use blueprint_core::ValidationSettings;
use clap::{Args, Parser, Subcommand};
use tracing::debug;

pub mod build;
pub mod create;
pub mod info;
pub mod validate;

/// blueprint - building blueprint validation and storey expansion
#[derive(Parser)]
#[command(name = "blueprint")]
#[command(version, about = "Validate building blueprints and expand them into storeys")]
#[command(long_about = r#"
Validate building blueprints and expand them into storeys, slabs and columns.

WORKFLOWS:
  create    → Write an example blueprint to start from
  validate  → Check every rule and list all violations
  build     → Validate and expand, optionally saving a building document
  info      → Print the storey stack of a blueprint

EXIT CODES:
  0 - Success
  1 - General error
  2 - Invalid input (unreadable file, bad JSON, version mismatch)
  3 - Validation failure
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate a blueprint and list every violation
    Validate(validate::ValidateArgs),

    /// Validate and expand a blueprint into a building
    Build(build::BuildArgs),

    /// Print the storeys a blueprint expands into
    Info(info::InfoArgs),

    /// Write an example blueprint
    Create(create::CreateArgs),
}

/// Validation overrides shared by the commands that validate.
#[derive(Args, Debug, Clone, Default)]
pub struct SettingsArgs {
    /// Accept groups whose range covers a single floor
    #[arg(long, env = "BLUEPRINT_ALLOW_SINGLE_STOREY")]
    pub allow_single_storey: bool,

    /// Maximum floors a single group may expand into
    #[arg(long, env = "BLUEPRINT_MAX_STOREYS")]
    pub max_storeys: Option<u32>,
}

impl SettingsArgs {
    /// Overlay the flags on settings read from the blueprint file.
    pub fn apply(&self, settings: &mut ValidationSettings) {
        if self.allow_single_storey {
            settings.allow_single_storey_groups = true;
        }
        if let Some(max) = self.max_storeys {
            settings.max_storeys_per_group = max;
        }
    }
}

/// Load a blueprint file and apply the command-line overrides.
pub fn load(path: &Path, overrides: &SettingsArgs) -> Result<BlueprintFile> {
    let mut file = load_blueprint(path)
        .with_context(|| format!("Failed to load blueprint {}", path.display()))?;
    overrides.apply(&mut file.blueprint.settings);
    debug!(settings = ?file.blueprint.settings, "effective validation settings");
    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_subcommands() {
        let cli = Cli::try_parse_from([
            "blueprint",
            "-v",
            "validate",
            "tower.json",
            "--max-storeys",
            "40",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Validate(args) => {
                assert_eq!(args.settings.max_storeys, Some(40));
            }
            _ => panic!("expected validate"),
        }
    }

    #[test]
    fn test_verbose_and_quiet_conflict() {
        assert!(Cli::try_parse_from(["blueprint", "-v", "-q", "info", "a.json"]).is_err());
    }

    #[test]
    fn test_overrides_only_touch_given_flags() {
        let mut settings = ValidationSettings {
            allow_single_storey_groups: true,
            max_storeys_per_group: 12,
        };
        SettingsArgs::default().apply(&mut settings);
        assert!(settings.allow_single_storey_groups);
        assert_eq!(settings.max_storeys_per_group, 12);

        SettingsArgs {
            allow_single_storey: false,
            max_storeys: Some(300),
        }
        .apply(&mut settings);
        assert_eq!(settings.max_storeys_per_group, 300);
    }
}
