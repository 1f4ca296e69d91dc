//! Validate command - Check a blueprint against every rule.

use std::path::PathBuf;

use anyhow::Result;
use blueprint_core::{validate, BlueprintError, Violation};
use clap::Args;
use serde::Serialize;
use tracing::info;

use super::SettingsArgs;

#[derive(Args)]
pub struct ValidateArgs {
    /// Blueprint file to validate
    pub file: PathBuf,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub settings: SettingsArgs,
}

/// Machine-readable validation report.
#[derive(Debug, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub groups: usize,
    pub violations: Vec<Violation>,
}

pub fn execute(args: ValidateArgs) -> Result<()> {
    info!("Validating blueprint: {}", args.file.display());

    let file = super::load(&args.file, &args.settings)?;
    let blueprint = &file.blueprint;

    let violations = match validate(blueprint) {
        Ok(_) => Vec::new(),
        Err(violations) => violations.into_vec(),
    };
    let report = ValidationReport {
        valid: violations.is_empty(),
        groups: blueprint.storey_groups.len(),
        violations,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if report.valid {
        println!(
            "{}: valid ({} storey group(s))",
            file.display_name(),
            report.groups
        );
    }

    if report.valid {
        Ok(())
    } else {
        Err(BlueprintError::InvalidBlueprint {
            violations: report.violations,
        }
        .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blueprint_core::file_io::{save_blueprint, BlueprintFile};
    use blueprint_core::templates::Example;

    fn args(file: PathBuf) -> ValidateArgs {
        ValidateArgs {
            file,
            json: false,
            settings: SettingsArgs::default(),
        }
    }

    #[test]
    fn test_example_blueprint_validates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("office.json");
        save_blueprint(
            &BlueprintFile::new(None, Example::Office.blueprint(4, 3000.0)),
            &path,
        )
        .unwrap();

        assert!(execute(args(path)).is_ok());
    }

    #[test]
    fn test_violations_returned_as_blueprint_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        let mut blueprint = Example::Office.blueprint(4, 3000.0);
        blueprint.storey_groups[0].typical_height_mm = 0.0;
        blueprint.storey_groups[0].slab_vertices.truncate(2);
        save_blueprint(&BlueprintFile::new(None, blueprint), &path).unwrap();

        let error = execute(args(path)).unwrap_err();
        let error = error.downcast_ref::<BlueprintError>().unwrap();
        assert_eq!(error.violations().len(), 2);
    }

    #[test]
    fn test_storey_limit_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("office.json");
        save_blueprint(
            &BlueprintFile::new(None, Example::Office.blueprint(10, 3000.0)),
            &path,
        )
        .unwrap();

        let mut strict = args(path);
        strict.settings.max_storeys = Some(5);
        assert!(execute(strict).is_err());
    }
}
