//! # Storey Expansion
//!
//! Turns a [`ValidatedBlueprint`] into a [`Building`]: one storey and one slab
//! per floor, with elevations accumulated from the base datum, and one column
//! per coordinate per storey transition.
//!
//! ## Algorithm
//!
//! 1. Start an elevation cursor at the base elevation.
//! 2. For each group, bottom to top, and each floor in the group's range:
//!    the first floor becomes a [`MasterStorey`], the rest become
//!    [`SimilarStorey`]s pointing at it; a slab is placed at the cursor; the
//!    cursor rises by the group's typical height.
//! 3. For every consecutive pair of storeys, one column per coordinate of the
//!    lower storey's group spans the two elevations.
//!
//! ## Example
//!
//! ```rust
//! use blueprint_core::blueprint::{BuildingBlueprint, IntegerRange, Point2, StoreyGroup};
//! use blueprint_core::expansion::build;
//!
//! let group = |start, end, height| StoreyGroup {
//!     range: IntegerRange::new(start, end),
//!     typical_height_mm: height,
//!     slab_thickness_mm: 200.0,
//!     slab_vertices: vec![
//!         Point2::new(0.0, 0.0),
//!         Point2::new(6000.0, 0.0),
//!         Point2::new(6000.0, 6000.0),
//!     ],
//!     column_coordinates: vec![Point2::new(0.0, 0.0)],
//! };
//!
//! let blueprint = BuildingBlueprint::new(0.0)
//!     .with_group(group(1, 2, 3000.0))
//!     .with_group(group(3, 4, 3500.0));
//!
//! let building = build(&blueprint).unwrap();
//! let elevations: Vec<f64> = building
//!     .storeys()
//!     .iter()
//!     .map(|s| s.elevation().millimetres().0)
//!     .collect();
//! assert_eq!(elevations, vec![0.0, 3000.0, 6000.0, 9500.0]);
//! assert_eq!(building.columns().len(), 3);
//! ```

use tracing::{debug, info};

use crate::blueprint::{BuildingBlueprint, Point2};
use crate::building::{
    Building, Column, MasterStorey, Point3, SimilarStorey, Slab, Storey, StoreyIndex,
};
use crate::errors::{BlueprintError, BlueprintResult, EmptyBuildingError};
use crate::scalars::{Elevation, Name};
use crate::validation::{validate, ValidatedBlueprint};

/// Expand a validated blueprint into a building.
///
/// Fails only when the blueprint has no storey groups.
pub fn expand(validated: &ValidatedBlueprint<'_>) -> Result<Building, EmptyBuildingError> {
    if validated.groups().is_empty() {
        return Err(EmptyBuildingError);
    }

    let floor_total: usize = validated.groups().iter().map(|g| g.floors().count()).sum();
    let mut storeys = Vec::with_capacity(floor_total);
    let mut slabs = Vec::with_capacity(floor_total);
    // Owning group of each storey, parallel to `storeys`
    let mut owners = Vec::with_capacity(floor_total);
    let mut cursor = validated.base_elevation();

    for (group_index, group) in validated.groups().iter().enumerate() {
        let master = StoreyIndex::new(storeys.len());

        for floor in group.floors() {
            let name = Name::numbered("Storey", floor);

            let storey = if floor == group.first_floor {
                Storey::Master(MasterStorey {
                    name,
                    floor,
                    elevation: cursor,
                    height: group.typical_height,
                })
            } else {
                Storey::Similar(SimilarStorey {
                    name,
                    floor,
                    elevation: cursor,
                    height: group.typical_height,
                    similar_to: master,
                })
            };

            slabs.push(Slab {
                name: Name::numbered("Slab", floor),
                storey: StoreyIndex::new(storeys.len()),
                elevation: cursor,
                thickness: group.slab_thickness,
                vertices: lift(group.slab_vertices, cursor),
            });
            storeys.push(storey);
            owners.push(group_index);

            cursor = cursor.raised_by(group.typical_height);
        }
    }

    let mut columns = Vec::new();
    for lower in 0..storeys.len().saturating_sub(1) {
        let upper = lower + 1;
        let group = &validated.groups()[owners[lower]];
        let bottom = storeys[lower].elevation().millimetres().0;
        let top = storeys[upper].elevation().millimetres().0;
        let floor = storeys[lower].floor();

        for (position, point) in group.column_coordinates.iter().enumerate() {
            columns.push(Column {
                name: Name::numbered("Column", format_args!("{floor}-{}", position + 1)),
                lower_storey: StoreyIndex::new(lower),
                upper_storey: StoreyIndex::new(upper),
                start: Point3::new(point.x, point.y, bottom),
                end: Point3::new(point.x, point.y, top),
            });
        }
    }

    debug!(
        storeys = storeys.len(),
        slabs = slabs.len(),
        columns = columns.len(),
        "expanded blueprint"
    );
    Ok(Building::from_parts(storeys, slabs, columns))
}

/// Validate and expand in one step.
///
/// # Returns
///
/// * `Ok(Building)` - every rule passed and the blueprint had storey groups
/// * `Err(BlueprintError::InvalidBlueprint)` - every rule violation found
/// * `Err(BlueprintError::EmptyBuilding)` - the blueprint had no storey groups
pub fn build(blueprint: &BuildingBlueprint) -> BlueprintResult<Building> {
    let validated = validate(blueprint).map_err(BlueprintError::from)?;
    let building = expand(&validated)?;
    info!(
        storeys = building.storeys().len(),
        columns = building.columns().len(),
        "building assembled"
    );
    Ok(building)
}

fn lift(vertices: &[Point2], elevation: Elevation) -> Vec<Point3> {
    let z = elevation.millimetres().0;
    vertices.iter().map(|v| Point3::new(v.x, v.y, z)).collect()
}
