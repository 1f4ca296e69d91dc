//! # blueprint_core - Building Blueprint Engine
//!
//! `blueprint_core` turns a compact building description into a complete
//! storey stack. A blueprint lists storey groups (ranges of identical floors
//! with a typical height, slab outline and column positions); the engine
//! checks every rule over it, reports all failures at once, and expands a
//! passing blueprint into storeys, slabs and columns at absolute elevations.
//!
//! ## Design Philosophy
//!
//! - **Accumulating**: Validation reports every violated rule, never just the first
//! - **Typed**: Validated scalars are smart-constructed, so a built [`Building`] cannot
//!   hold a negative height or a dangling storey reference
//! - **Deterministic**: The same blueprint always expands to the same building
//! - **JSON-First**: Inputs, outputs and errors are serde-serializable
//!
//! ## Quick Start
//!
//! ```rust
//! use blueprint_core::templates::Example;
//! use blueprint_core::build;
//!
//! let blueprint = Example::Tower.blueprint(8, 3000.0);
//! let building = build(&blueprint).unwrap();
//!
//! assert_eq!(building.storeys().len(), 8);
//! assert!(building.storeys()[0].is_master());
//! ```
//!
//! ## Modules
//!
//! - [`blueprint`] - Raw input records
//! - [`validation`] - Rules and the accumulating rule engine
//! - [`expansion`] - Storey, slab and column generation
//! - [`building`] - The expanded building model
//! - [`scalars`] - Smart-constructed validated scalars
//! - [`export`] - Node/element analysis model in SI units
//! - [`templates`] - Example blueprints
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types
//! - [`file_io`] - Loading blueprints and atomic saves

pub mod blueprint;
pub mod building;
pub mod errors;
pub mod expansion;
pub mod export;
pub mod file_io;
pub mod scalars;
pub mod templates;
pub mod units;
pub mod validation;

// Re-export commonly used types at crate root for convenience
pub use blueprint::{BuildingBlueprint, IntegerRange, Point2, StoreyGroup, ValidationSettings};
pub use building::{Building, BuildingSummary, Storey, StoreyIndex};
pub use errors::{BlueprintError, BlueprintResult, Violation};
pub use expansion::{build, expand};
pub use file_io::{load_blueprint, save_blueprint, save_document, BlueprintFile, BuildingDocument};
pub use validation::{validate, validate_with, ValidatedBlueprint, Violations};
