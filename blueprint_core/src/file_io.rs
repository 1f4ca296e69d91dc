//! # File I/O Module
//!
//! Reading blueprint files and writing results, kept outside the engine so
//! that validation and expansion stay pure.
//!
//! - **Atomic saves**: Write to .tmp, sync, rename to prevent corruption
//! - **Version validation**: Ensure schema compatibility on load
//!
//! ## File Format
//!
//! Blueprints are JSON files; the blueprint fields sit at the top level next
//! to an optional `version` and `name`. Built buildings are written as a
//! [`BuildingDocument`] with metadata, summary and optional analysis model.
//!
//! ## Example
//!
//! ```rust,no_run
//! use blueprint_core::file_io::{load_blueprint, save_document, BuildingDocument};
//! use blueprint_core::expansion::build;
//! use std::path::Path;
//!
//! let file = load_blueprint(Path::new("tower.json"))?;
//! let building = build(&file.blueprint)?;
//! let document = BuildingDocument::new(file.display_name(), building);
//! save_document(&document, Path::new("tower.building.json"))?;
//! # Ok::<(), blueprint_core::errors::BlueprintError>(())
//! ```

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::blueprint::BuildingBlueprint;
use crate::building::{Building, BuildingSummary};
use crate::errors::{BlueprintError, BlueprintResult};
use crate::export::AnalysisModel;

/// Current schema version for blueprint and building files
pub const SCHEMA_VERSION: &str = "0.1.0";

fn default_version() -> String {
    SCHEMA_VERSION.to_string()
}

/// A blueprint as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlueprintFile {
    /// Schema version (for migration compatibility)
    #[serde(default = "default_version")]
    pub version: String,

    /// Optional project name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(flatten)]
    pub blueprint: BuildingBlueprint,
}

impl BlueprintFile {
    pub fn new(name: Option<String>, blueprint: BuildingBlueprint) -> Self {
        BlueprintFile {
            version: SCHEMA_VERSION.to_string(),
            name,
            blueprint,
        }
    }

    /// The project name, or "Untitled" when none was given.
    pub fn display_name(&self) -> String {
        self.name
            .clone()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| "Untitled".to_string())
    }
}

/// Metadata stored in the header of a building document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub version: String,
    pub id: Uuid,
    pub name: String,
    pub generated: DateTime<Utc>,
}

/// A built building as written to disk.
#[derive(Debug, Clone, Serialize)]
pub struct BuildingDocument {
    pub meta: DocumentMetadata,
    pub summary: BuildingSummary,
    pub building: Building,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<AnalysisModel>,
}

impl BuildingDocument {
    pub fn new(name: impl Into<String>, building: Building) -> Self {
        BuildingDocument {
            meta: DocumentMetadata {
                version: SCHEMA_VERSION.to_string(),
                id: Uuid::new_v4(),
                name: name.into(),
                generated: Utc::now(),
            },
            summary: building.summary(),
            building,
            model: None,
        }
    }

    /// Attach the analysis model derived from the building.
    pub fn with_model(mut self) -> Self {
        self.model = Some(AnalysisModel::from_building(&self.building));
        self
    }
}

/// Load a blueprint from a JSON file.
///
/// # Returns
///
/// * `Ok(BlueprintFile)` - Successfully loaded blueprint (not yet validated)
/// * `Err(BlueprintError::VersionMismatch)` - File version is incompatible
/// * `Err(BlueprintError::SerializationError)` - Invalid JSON
/// * `Err(BlueprintError::FileError)` - I/O error
pub fn load_blueprint(path: &Path) -> BlueprintResult<BlueprintFile> {
    let mut file = File::open(path)
        .map_err(|e| BlueprintError::file_error("open", path.display().to_string(), e.to_string()))?;

    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|e| BlueprintError::file_error("read", path.display().to_string(), e.to_string()))?;

    let blueprint = parse_blueprint(&contents).map_err(|e| match e {
        BlueprintError::SerializationError { reason } => BlueprintError::SerializationError {
            reason: format!("Invalid JSON in {}: {}", path.display(), reason),
        },
        other => other,
    })?;

    debug!(
        path = %path.display(),
        groups = blueprint.blueprint.storey_groups.len(),
        "loaded blueprint"
    );
    Ok(blueprint)
}

/// Parse and version-check a blueprint from a JSON string.
pub fn parse_blueprint(json: &str) -> BlueprintResult<BlueprintFile> {
    let file: BlueprintFile =
        serde_json::from_str(json).map_err(|e| BlueprintError::SerializationError {
            reason: e.to_string(),
        })?;
    validate_version(&file.version)?;
    Ok(file)
}

/// Save a blueprint with atomic write semantics.
pub fn save_blueprint(file: &BlueprintFile, path: &Path) -> BlueprintResult<()> {
    let json = serde_json::to_string_pretty(file).map_err(|e| BlueprintError::SerializationError {
        reason: e.to_string(),
    })?;
    write_atomic(json.as_bytes(), path)
}

/// Save a building document with atomic write semantics.
pub fn save_document(document: &BuildingDocument, path: &Path) -> BlueprintResult<()> {
    let json =
        serde_json::to_string_pretty(document).map_err(|e| BlueprintError::SerializationError {
            reason: e.to_string(),
        })?;
    write_atomic(json.as_bytes(), path)
}

/// The save process:
/// 1. Write to a temporary file next to the target
/// 2. Sync to disk (fsync)
/// 3. Rename over the target (atomic on most filesystems)
fn write_atomic(bytes: &[u8], path: &Path) -> BlueprintResult<()> {
    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = Path::new(&tmp_name);

    let mut tmp_file = File::create(tmp_path).map_err(|e| {
        BlueprintError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(bytes).map_err(|e| {
        BlueprintError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        BlueprintError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(tmp_path, path).map_err(|e| {
        // Clean up temp file if rename fails
        let _ = fs::remove_file(tmp_path);
        BlueprintError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    Ok(())
}

/// Validate that a file version is compatible with the current schema.
fn validate_version(file_version: &str) -> BlueprintResult<()> {
    let mismatch = || BlueprintError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let parse = |version: &str| -> Option<Vec<u32>> {
        version.split('.').map(|p| p.trim().parse().ok()).collect()
    };
    let file_parts = parse(file_version).ok_or_else(mismatch)?;
    let current_parts = parse(SCHEMA_VERSION).ok_or_else(mismatch)?;

    let (Some(file_major), Some(current_major)) = (file_parts.first(), current_parts.first())
    else {
        return Err(mismatch());
    };

    // Major version must match
    if file_major != current_major {
        return Err(mismatch());
    }

    // For 0.x versions, a newer minor version is not readable
    if *current_major == 0 {
        if let (Some(file_minor), Some(current_minor)) = (file_parts.get(1), current_parts.get(1)) {
            if file_minor > current_minor {
                return Err(mismatch());
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expansion::build;
    use crate::templates::Example;

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("office.json");

        let file = BlueprintFile::new(
            Some("Office".to_string()),
            Example::Office.blueprint(3, 3000.0),
        );
        save_blueprint(&file, &path).unwrap();

        let loaded = load_blueprint(&path).unwrap();
        assert_eq!(loaded, file);
        assert_eq!(loaded.display_name(), "Office");
    }

    #[test]
    fn test_atomic_save_creates_no_tmp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tower.building.json");

        let building = build(&Example::Tower.blueprint(5, 3000.0)).unwrap();
        let document = BuildingDocument::new("Tower", building).with_model();
        save_document(&document, &path).unwrap();

        assert!(path.exists());
        assert!(!dir.path().join("tower.building.json.tmp").exists());

        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["meta"]["name"], "Tower");
        assert_eq!(written["summary"]["storey_count"], 5);
        assert!(written["model"]["nodes"].is_array());
    }

    #[test]
    fn test_version_defaults_when_missing() {
        let file = parse_blueprint(r#"{ "base_elevation_mm": 0.0, "storey_groups": [] }"#).unwrap();
        assert_eq!(file.version, SCHEMA_VERSION);
        assert_eq!(file.display_name(), "Untitled");
    }

    #[test]
    fn test_version_validation() {
        assert!(validate_version(SCHEMA_VERSION).is_ok());
        assert!(validate_version("0.1.7").is_ok());
        assert!(validate_version("0.0.3").is_ok());
        assert!(validate_version("1.0.0").is_err());
        assert!(validate_version("0.2.0").is_err());
        assert!(validate_version("latest").is_err());
    }

    #[test]
    fn test_newer_file_rejected_on_parse() {
        let json = r#"{ "version": "0.9.0", "base_elevation_mm": 0.0, "storey_groups": [] }"#;
        assert!(matches!(
            parse_blueprint(json),
            Err(BlueprintError::VersionMismatch { .. })
        ));
    }

    #[test]
    fn test_missing_file_is_file_error() {
        let dir = tempfile::tempdir().unwrap();
        let error = load_blueprint(&dir.path().join("absent.json")).unwrap_err();
        assert_eq!(error.error_code(), "FILE_ERROR");
    }

    #[test]
    fn test_invalid_json_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        match load_blueprint(&path).unwrap_err() {
            BlueprintError::SerializationError { reason } => {
                assert!(reason.contains("broken.json"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
