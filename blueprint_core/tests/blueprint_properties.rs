//! Property tests for validation and expansion: failures accumulate one per
//! broken rule, and expanded buildings keep their storey invariants for any
//! well-formed stack of groups.

use blueprint_core::blueprint::{BuildingBlueprint, IntegerRange, Point2, StoreyGroup};
use blueprint_core::errors::{GeometryError, HeightError, RangeError};
use blueprint_core::scalars::PositiveInt;
use blueprint_core::{build, validate};
use proptest::prelude::*;

fn group(start: i64, end: i64, height: f64) -> StoreyGroup {
    StoreyGroup {
        range: IntegerRange::new(start, end),
        typical_height_mm: height,
        slab_thickness_mm: 200.0,
        slab_vertices: vec![
            Point2::new(0.0, 0.0),
            Point2::new(8000.0, 0.0),
            Point2::new(8000.0, 8000.0),
            Point2::new(0.0, 8000.0),
        ],
        column_coordinates: vec![Point2::new(0.0, 0.0), Point2::new(8000.0, 8000.0)],
    }
}

/// Consecutive groups of the given sizes and heights, starting at floor 1.
fn stack(groups: &[(i64, f64)]) -> BuildingBlueprint {
    let mut next = 1;
    groups
        .iter()
        .fold(BuildingBlueprint::new(0.0), |blueprint, &(size, height)| {
            let start = next;
            next += size;
            blueprint.with_group(group(start, start + size - 1, height))
        })
}

fn groups_strategy() -> impl Strategy<Value = Vec<(i64, f64)>> {
    prop::collection::vec((2i64..6, 500.0f64..6000.0), 1..8)
}

proptest! {
    /// PositiveInt accepts exactly the integers above zero.
    #[test]
    fn prop_positive_int_is_total(value: i64) {
        let created = PositiveInt::create(value);
        prop_assert_eq!(created.is_ok(), value > 0);
        if let Ok(positive) = created {
            prop_assert_eq!(positive.get(), value);
        }
    }

    /// Breaking the height of k groups yields exactly k violations.
    #[test]
    fn prop_violations_accumulate_per_broken_group(
        groups in groups_strategy(),
        broken in prop::collection::vec(any::<bool>(), 8)
    ) {
        let mut blueprint = stack(&groups);
        let mut expected = 0;
        for (group, &break_it) in blueprint.storey_groups.iter_mut().zip(&broken) {
            if break_it {
                group.typical_height_mm = -group.typical_height_mm;
                expected += 1;
            }
        }

        match validate(&blueprint) {
            Ok(_) => prop_assert_eq!(expected, 0),
            Err(violations) => {
                prop_assert_eq!(violations.len(), expected);
                prop_assert!(violations
                    .iter()
                    .all(|v| v.error == HeightError::HeightLessThanZero.into()));
            }
        }
    }

    /// Storeys rise strictly, each by the height of the storey below.
    #[test]
    fn prop_elevations_increase_by_storey_height(groups in groups_strategy()) {
        let building = build(&stack(&groups)).unwrap();
        let storeys = building.storeys();

        let expected_count: i64 = groups.iter().map(|(size, _)| size).sum();
        prop_assert_eq!(storeys.len() as i64, expected_count);

        for pair in storeys.windows(2) {
            let lower = pair[0].elevation().millimetres().0;
            let upper = pair[1].elevation().millimetres().0;
            let height = pair[0].height().millimetres().0;
            prop_assert!(upper > lower);
            prop_assert!((upper - lower - height).abs() < 1e-6);
        }
    }

    /// Every group produces one master followed by similars pointing at it.
    #[test]
    fn prop_similar_storeys_point_at_their_master(groups in groups_strategy()) {
        let building = build(&stack(&groups)).unwrap();

        let masters = building.storeys().iter().filter(|s| s.is_master()).count();
        prop_assert_eq!(masters, groups.len());

        for storey in building.storeys() {
            if let Some(master) = storey.similar_to() {
                let master = building.storey(master).unwrap();
                prop_assert!(master.is_master());
                prop_assert_eq!(master.height(), storey.height());
                prop_assert!(master.floor() < storey.floor());
            }
        }
    }

    /// Two adjacent groups pass only when the upper starts right above the lower.
    #[test]
    fn prop_consecutive_ranges(start in 1i64..100, size in 2i64..10, gap in -3i64..4) {
        let lower_end = start + size - 1;
        let upper_start = lower_end + 1 + gap;
        let blueprint = BuildingBlueprint::new(0.0)
            .with_group(group(start, lower_end, 3000.0))
            .with_group(group(upper_start, upper_start + size, 3000.0));

        let result = validate(&blueprint);
        if gap == 0 {
            prop_assert!(result.is_ok());
        } else {
            let violations = result.unwrap_err();
            prop_assert!(violations.contains(RangeError::NonConsecutiveRange));
        }
    }

    /// A blueprint that validates expands to finite, strictly rising
    /// elevations, however large its base or heights.
    #[test]
    fn prop_validated_elevations_are_finite_and_rising(
        base in prop_oneof![0.0f64..1e4, 1e15f64..1e18],
        heights in prop::collection::vec(prop_oneof![1.0f64..5000.0, 1e306f64..1e308], 1..4)
    ) {
        let groups: Vec<(i64, f64)> = heights.iter().map(|&h| (2, h)).collect();
        let mut blueprint = stack(&groups);
        blueprint.base_elevation_mm = base;

        match build(&blueprint) {
            Ok(building) => {
                let elevations: Vec<f64> = building
                    .storeys()
                    .iter()
                    .map(|s| s.elevation().millimetres().0)
                    .collect();
                prop_assert!(elevations.iter().all(|e| e.is_finite()));
                prop_assert!(elevations.windows(2).all(|w| w[1] > w[0]));
                prop_assert!(building.summary().roof_elevation.0.is_finite());
            }
            Err(error) => {
                prop_assert!(error
                    .violations()
                    .iter()
                    .all(|v| v.error == GeometryError::UnrepresentableElevation.into()));
                prop_assert_eq!(error.violations().len(), 1);
            }
        }
    }

    /// The same blueprint always expands to the same building.
    #[test]
    fn prop_expansion_is_deterministic(groups in groups_strategy()) {
        let blueprint = stack(&groups);
        prop_assert_eq!(build(&blueprint).unwrap(), build(&blueprint).unwrap());
    }
}
