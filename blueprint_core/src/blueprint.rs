//! # Blueprint Input
//!
//! The unvalidated, user-authored description of a building: a base elevation
//! and an ordered list of storey groups, bottom to top. Nothing here is
//! checked; see [`crate::validation`] for the rule engine.
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "base_elevation_mm": 0.0,
//!   "storey_groups": [
//!     {
//!       "range": { "start": 1, "end": 3 },
//!       "typical_height_mm": 3000.0,
//!       "slab_thickness_mm": 250.0,
//!       "slab_vertices": [
//!         { "x": 0.0, "y": 0.0 },
//!         { "x": 12000.0, "y": 0.0 },
//!         { "x": 12000.0, "y": 8000.0 },
//!         { "x": 0.0, "y": 8000.0 }
//!       ],
//!       "column_coordinates": [
//!         { "x": 0.0, "y": 0.0 },
//!         { "x": 12000.0, "y": 8000.0 }
//!       ]
//!     }
//!   ],
//!   "settings": { "allow_single_storey_groups": false }
//! }
//! ```

use serde::{Deserialize, Serialize};

/// Inclusive floor-number range, e.g. storeys 1 to 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegerRange {
    pub start: i64,
    pub end: i64,
}

impl IntegerRange {
    pub fn new(start: i64, end: i64) -> Self {
        IntegerRange { start, end }
    }

    /// Number of floors covered, or `None` when the bounds are reversed or
    /// the count does not fit in a `u64`.
    pub fn floor_count(&self) -> Option<u64> {
        if self.end < self.start {
            return None;
        }
        let span = i128::from(self.end) - i128::from(self.start) + 1;
        u64::try_from(span).ok()
    }
}

/// Plan coordinate in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub fn new(x: f64, y: f64) -> Self {
        Point2 { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// A run of physically identical floors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreyGroup {
    /// Floors covered by this group
    pub range: IntegerRange,

    /// Floor-to-floor height in millimetres
    pub typical_height_mm: f64,

    /// Slab thickness in millimetres
    pub slab_thickness_mm: f64,

    /// Slab outline in plan, millimetres
    #[serde(default)]
    pub slab_vertices: Vec<Point2>,

    /// Column positions in plan, millimetres
    #[serde(default)]
    pub column_coordinates: Vec<Point2>,
}

/// Options that change which rules the engine applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationSettings {
    /// Accept groups whose range starts and ends on the same floor
    pub allow_single_storey_groups: bool,

    /// Upper bound on the number of floors one group may expand into
    pub max_storeys_per_group: u32,
}

/// Default limit on floors per group
pub const DEFAULT_MAX_STOREYS_PER_GROUP: u32 = 200;

impl Default for ValidationSettings {
    fn default() -> Self {
        ValidationSettings {
            allow_single_storey_groups: false,
            max_storeys_per_group: DEFAULT_MAX_STOREYS_PER_GROUP,
        }
    }
}

/// Root input container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingBlueprint {
    /// Elevation of the lowest storey above the datum, in millimetres
    pub base_elevation_mm: f64,

    /// Storey groups, bottom to top
    pub storey_groups: Vec<StoreyGroup>,

    #[serde(default)]
    pub settings: ValidationSettings,
}

impl BuildingBlueprint {
    pub fn new(base_elevation_mm: f64) -> Self {
        BuildingBlueprint {
            base_elevation_mm,
            storey_groups: Vec::new(),
            settings: ValidationSettings::default(),
        }
    }

    /// Append a group on top of the existing ones.
    pub fn with_group(mut self, group: StoreyGroup) -> Self {
        self.storey_groups.push(group);
        self
    }

    pub fn with_settings(mut self, settings: ValidationSettings) -> Self {
        self.settings = settings;
        self
    }
}
