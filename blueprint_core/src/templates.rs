//! # Example Blueprints
//!
//! Ready-made blueprints for demos, tests and as starting points for new
//! files. Every example passes validation for any storey count and any
//! ordinary positive storey height.
//!
//! ```rust
//! use blueprint_core::templates::Example;
//! use blueprint_core::validation::validate;
//!
//! for example in Example::ALL {
//!     let blueprint = example.blueprint(6, 3200.0);
//!     assert!(validate(&blueprint).is_ok(), "{example} should validate");
//! }
//! ```

use std::fmt;

use crate::blueprint::{BuildingBlueprint, IntegerRange, Point2, StoreyGroup, ValidationSettings};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Example {
    /// One group of identical office floors on an 8 m grid
    Office,
    /// Tall lobby floors below a run of typical floors
    Tower,
    /// Wide retail podium with a narrower block above
    Podium,
}

impl Example {
    pub const ALL: [Example; 3] = [Example::Office, Example::Tower, Example::Podium];

    /// Largest storey count an example is built with.
    pub const MAX_STOREYS: u32 = 10_000;

    pub fn name(&self) -> &'static str {
        match self {
            Example::Office => "office",
            Example::Tower => "tower",
            Example::Podium => "podium",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Example::Office => "Single group of office floors, 24 m x 16 m, 8 m column grid",
            Example::Tower => "Two lobby floors at 1.5x height under typical floors, 30 m square",
            Example::Podium => "Two-storey 40 m x 30 m podium under a 20 m square block",
        }
    }

    /// Smallest storey count the example can be built with.
    pub fn min_storeys(&self) -> u32 {
        match self {
            Example::Office => 1,
            Example::Tower | Example::Podium => 4,
        }
    }

    /// Build the example. `storeys` is clamped between
    /// [`Example::min_storeys`] and [`Example::MAX_STOREYS`].
    pub fn blueprint(&self, storeys: u32, typical_height_mm: f64) -> BuildingBlueprint {
        let storeys = storeys.clamp(self.min_storeys(), Self::MAX_STOREYS);
        let top = i64::from(storeys);
        let settings = ValidationSettings {
            allow_single_storey_groups: top == 1,
            max_storeys_per_group: storeys.max(ValidationSettings::default().max_storeys_per_group),
        };

        let blueprint = BuildingBlueprint::new(0.0).with_settings(settings);
        match self {
            Example::Office => blueprint.with_group(group(
                1,
                top,
                typical_height_mm,
                rectangle(24000.0, 16000.0),
                grid(24000.0, 16000.0, 8000.0),
            )),
            Example::Tower => blueprint
                .with_group(group(
                    1,
                    2,
                    typical_height_mm * 1.5,
                    rectangle(30000.0, 30000.0),
                    grid(30000.0, 30000.0, 7500.0),
                ))
                .with_group(group(
                    3,
                    top,
                    typical_height_mm,
                    rectangle(30000.0, 30000.0),
                    grid(30000.0, 30000.0, 7500.0),
                )),
            Example::Podium => blueprint
                .with_group(group(
                    1,
                    2,
                    4500.0_f64.max(typical_height_mm),
                    rectangle(40000.0, 30000.0),
                    grid(40000.0, 30000.0, 10000.0),
                ))
                .with_group(group(
                    3,
                    top,
                    typical_height_mm,
                    rectangle(20000.0, 20000.0),
                    grid(20000.0, 20000.0, 10000.0),
                )),
        }
    }
}

impl fmt::Display for Example {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn group(
    start: i64,
    end: i64,
    typical_height_mm: f64,
    slab_vertices: Vec<Point2>,
    column_coordinates: Vec<Point2>,
) -> StoreyGroup {
    StoreyGroup {
        range: IntegerRange::new(start, end),
        typical_height_mm,
        slab_thickness_mm: 250.0,
        slab_vertices,
        column_coordinates,
    }
}

fn rectangle(width: f64, depth: f64) -> Vec<Point2> {
    vec![
        Point2::new(0.0, 0.0),
        Point2::new(width, 0.0),
        Point2::new(width, depth),
        Point2::new(0.0, depth),
    ]
}

/// Column positions on a regular grid covering the rectangle, edges included.
fn grid(width: f64, depth: f64, spacing: f64) -> Vec<Point2> {
    let along = |extent: f64| {
        let bays = (extent / spacing).round().max(1.0) as usize;
        (0..=bays).map(move |i| extent * i as f64 / bays as f64)
    };
    along(depth)
        .flat_map(|y| along(width).map(move |x| Point2::new(x, y)))
        .collect()
}
