//! # Blueprint Validation
//!
//! The rule engine: independent predicate checks over raw storey groups
//! ([`rules`]) and the combinators that apply them across a whole blueprint
//! while collecting every failure ([`engine`]).
//!
//! # Example
//!
//! ```
//! use blueprint_core::blueprint::{BuildingBlueprint, IntegerRange, Point2, StoreyGroup};
//! use blueprint_core::errors::RangeError;
//! use blueprint_core::validation::validate;
//!
//! let floor = |start, end| StoreyGroup {
//!     range: IntegerRange::new(start, end),
//!     typical_height_mm: 3000.0,
//!     slab_thickness_mm: 200.0,
//!     slab_vertices: vec![
//!         Point2::new(0.0, 0.0),
//!         Point2::new(6000.0, 0.0),
//!         Point2::new(6000.0, 6000.0),
//!     ],
//!     column_coordinates: vec![],
//! };
//!
//! let gap = BuildingBlueprint::new(0.0)
//!     .with_group(floor(1, 3))
//!     .with_group(floor(5, 6));
//! let violations = validate(&gap).unwrap_err();
//! assert!(violations.contains(RangeError::NonConsecutiveRange));
//! ```

pub mod engine;
pub mod rules;

pub use engine::{
    apply_to_each, apply_to_pairs, validate, validate_with, RuleOutcome, ValidGroup,
    ValidatedBlueprint, Violations,
};
pub use rules::{BlueprintRule, GroupRule, PairRule, RuleSet, ValidationOutcome};
