//! # Error Types
//!
//! Structured error types for blueprint_core. Rule failures are plain values
//! (`RangeError`, `HeightError`, `GeometryError`) that the validation engine
//! accumulates; nothing in the rule engine panics or short-circuits.
//!
//! ## Example
//!
//! ```rust
//! use blueprint_core::errors::{HeightError, ValidationError};
//!
//! let error = ValidationError::from(HeightError::HeightLessThanZero);
//! assert_eq!(error.error_code(), "HEIGHT_LESS_THAN_ZERO");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for blueprint_core operations
pub type BlueprintResult<T> = Result<T, BlueprintError>;

/// Structural defects in floor-numbering input.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RangeError {
    #[error("range start must be greater than zero")]
    NonPositiveStart,

    #[error("range end must be greater than zero")]
    NonPositiveEnd,

    #[error("range start must be less than range end")]
    StartGreaterThanEnd,

    #[error("range must begin on the floor directly above the previous group")]
    NonConsecutiveRange,

    #[error("range spans more storeys than the configured limit")]
    TooManyStoreys,
}

/// Defects in the vertical-geometry input.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeightError {
    #[error("typical height is less than zero")]
    HeightLessThanZero,

    #[error("typical height is zero")]
    HeightEqualToZero,

    #[error("typical height is not a finite number")]
    InvalidHeight,
}

/// Defects in slab, column and datum geometry.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeometryError {
    #[error("base elevation must be a finite, non-negative number")]
    InvalidBaseElevation,

    #[error("slab thickness must be a finite number greater than zero")]
    NonPositiveSlabThickness,

    #[error("slab outline needs at least three vertices")]
    DegenerateSlabOutline,

    #[error("slab vertices and column coordinates must be finite numbers")]
    NonFiniteCoordinate,

    #[error("storey elevations must stay finite and rise with every storey")]
    UnrepresentableElevation,
}

/// A single rule failure.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "category", content = "kind")]
pub enum ValidationError {
    #[error(transparent)]
    Range(#[from] RangeError),

    #[error(transparent)]
    Height(#[from] HeightError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

impl ValidationError {
    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::Range(RangeError::NonPositiveStart) => "NON_POSITIVE_START",
            ValidationError::Range(RangeError::NonPositiveEnd) => "NON_POSITIVE_END",
            ValidationError::Range(RangeError::StartGreaterThanEnd) => "START_GREATER_THAN_END",
            ValidationError::Range(RangeError::NonConsecutiveRange) => "NON_CONSECUTIVE_RANGE",
            ValidationError::Range(RangeError::TooManyStoreys) => "TOO_MANY_STOREYS",
            ValidationError::Height(HeightError::HeightLessThanZero) => "HEIGHT_LESS_THAN_ZERO",
            ValidationError::Height(HeightError::HeightEqualToZero) => "HEIGHT_EQUAL_TO_ZERO",
            ValidationError::Height(HeightError::InvalidHeight) => "INVALID_HEIGHT",
            ValidationError::Geometry(GeometryError::InvalidBaseElevation) => {
                "INVALID_BASE_ELEVATION"
            }
            ValidationError::Geometry(GeometryError::NonPositiveSlabThickness) => {
                "NON_POSITIVE_SLAB_THICKNESS"
            }
            ValidationError::Geometry(GeometryError::DegenerateSlabOutline) => {
                "DEGENERATE_SLAB_OUTLINE"
            }
            ValidationError::Geometry(GeometryError::NonFiniteCoordinate) => {
                "NON_FINITE_COORDINATE"
            }
            ValidationError::Geometry(GeometryError::UnrepresentableElevation) => {
                "UNREPRESENTABLE_ELEVATION"
            }
        }
    }
}

/// Failures of the scalar smart constructors.
#[derive(Error, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ScalarError {
    #[error("{value} is not greater than zero")]
    NotPositive { value: f64 },

    #[error("{value} is negative")]
    Negative { value: f64 },

    #[error("{value} is not a finite number")]
    NotFinite { value: f64 },

    #[error("name cannot be empty")]
    EmptyName,
}

/// Returned by expansion when the blueprint has no storey groups.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[error("blueprint contains no storey groups")]
pub struct EmptyBuildingError;

/// Where in the blueprint a rule failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "scope", rename_all = "snake_case")]
pub enum Location {
    /// Blueprint-level field (base elevation)
    Blueprint,
    /// A single storey group, by position in the blueprint
    Group { index: usize },
    /// The boundary between two adjacent storey groups
    Between { lower: usize, upper: usize },
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Blueprint => write!(f, "blueprint"),
            Location::Group { index } => write!(f, "group {}", index + 1),
            Location::Between { lower, upper } => {
                write!(f, "groups {} and {}", lower + 1, upper + 1)
            }
        }
    }
}

/// A rule failure together with the rule that produced it and where.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    /// Name of the rule that failed
    pub rule: String,
    pub location: Location,
    pub error: ValidationError,
}

impl Violation {
    pub fn new(rule: impl Into<String>, location: Location, error: ValidationError) -> Self {
        Violation {
            rule: rule.into(),
            location,
            error,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} [{}]", self.location, self.error, self.rule)
    }
}

/// Crate-level error type.
///
/// Each variant provides specific context about what went wrong,
/// enabling programmatic error handling by the CLI and other consumers.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum BlueprintError {
    /// One or more validation rules failed; every failure is listed
    #[error("Blueprint failed validation with {} violation(s)", .violations.len())]
    InvalidBlueprint { violations: Vec<Violation> },

    /// The blueprint has no storey groups
    #[error("Empty building: {0}")]
    EmptyBuilding(EmptyBuildingError),

    /// An input value is invalid (out of range, wrong type, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl BlueprintError {
    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        BlueprintError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(
        operation: impl Into<String>,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        BlueprintError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// The rule violations, if this is a validation failure
    pub fn violations(&self) -> &[Violation] {
        match self {
            BlueprintError::InvalidBlueprint { violations } => violations,
            _ => &[],
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            BlueprintError::InvalidBlueprint { .. } => "INVALID_BLUEPRINT",
            BlueprintError::EmptyBuilding(_) => "EMPTY_BUILDING",
            BlueprintError::InvalidInput { .. } => "INVALID_INPUT",
            BlueprintError::FileError { .. } => "FILE_ERROR",
            BlueprintError::SerializationError { .. } => "SERIALIZATION_ERROR",
            BlueprintError::VersionMismatch { .. } => "VERSION_MISMATCH",
            BlueprintError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

impl From<EmptyBuildingError> for BlueprintError {
    fn from(error: EmptyBuildingError) -> Self {
        BlueprintError::EmptyBuilding(error)
    }
}
