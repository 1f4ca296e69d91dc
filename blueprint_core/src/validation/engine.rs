//! Accumulating validation.
//!
//! Every blueprint rule runs against the blueprint, every group rule against
//! every group and every pair rule against every adjacent pair. All outcomes
//! are gathered before success is decided, so a caller sees every defect in
//! one pass. Duplicate failures are kept.

use thiserror::Error;
use tracing::debug;

use crate::blueprint::{BuildingBlueprint, Point2, StoreyGroup, ValidationSettings};
use crate::errors::{
    BlueprintError, GeometryError, HeightError, Location, RangeError, ValidationError, Violation,
};
use crate::scalars::{Elevation, Height, PositiveInt, PositiveLength};

use super::rules::{GroupRule, PairRule, RuleSet, ValidationOutcome};

/// One rule applied to one subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleOutcome {
    pub rule: &'static str,
    pub location: Location,
    pub outcome: ValidationOutcome,
}

impl RuleOutcome {
    fn into_violation(self) -> Option<Violation> {
        self.outcome
            .failure()
            .map(|error| Violation::new(self.rule, self.location, error))
    }
}

/// Apply every group rule to every group, in group order then rule order.
pub fn apply_to_each(rules: &[GroupRule], groups: &[StoreyGroup]) -> Vec<RuleOutcome> {
    groups
        .iter()
        .enumerate()
        .flat_map(|(index, group)| {
            rules.iter().map(move |rule| RuleOutcome {
                rule: rule.name,
                location: Location::Group { index },
                outcome: rule.check(group),
            })
        })
        .collect()
}

/// Apply every pair rule to every adjacent pair of groups.
pub fn apply_to_pairs(rules: &[PairRule], groups: &[StoreyGroup]) -> Vec<RuleOutcome> {
    groups
        .windows(2)
        .enumerate()
        .flat_map(|(lower, pair)| {
            rules.iter().map(move |rule| RuleOutcome {
                rule: rule.name,
                location: Location::Between {
                    lower,
                    upper: lower + 1,
                },
                outcome: rule.check(&pair[0], &pair[1]),
            })
        })
        .collect()
}

impl RuleSet {
    /// Run every rule and return every outcome, passing or not.
    pub fn collect_outcomes(&self, blueprint: &BuildingBlueprint) -> Vec<RuleOutcome> {
        let mut outcomes: Vec<RuleOutcome> = self
            .blueprint_rules()
            .iter()
            .map(|rule| RuleOutcome {
                rule: rule.name,
                location: Location::Blueprint,
                outcome: rule.check(blueprint),
            })
            .collect();
        outcomes.extend(apply_to_each(self.group_rules(), &blueprint.storey_groups));
        outcomes.extend(apply_to_pairs(self.pair_rules(), &blueprint.storey_groups));
        outcomes
    }

    /// Run every rule and keep only the failures.
    pub fn collect_violations(&self, blueprint: &BuildingBlueprint) -> Vec<Violation> {
        self.collect_outcomes(blueprint)
            .into_iter()
            .filter_map(RuleOutcome::into_violation)
            .collect()
    }
}

/// A non-empty list of rule violations.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("blueprint failed validation with {} violation(s)", .0.len())]
pub struct Violations(Vec<Violation>);

impl Violations {
    /// Wrap a list of violations; `None` when the list is empty.
    pub fn new(violations: Vec<Violation>) -> Option<Self> {
        if violations.is_empty() {
            None
        } else {
            Some(Violations(violations))
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn as_slice(&self) -> &[Violation] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.0.iter()
    }

    pub fn into_vec(self) -> Vec<Violation> {
        self.0
    }

    /// Whether any violation carries this error.
    pub fn contains(&self, error: impl Into<ValidationError>) -> bool {
        let error = error.into();
        self.0.iter().any(|v| v.error == error)
    }
}

impl IntoIterator for Violations {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl From<Violations> for BlueprintError {
    fn from(violations: Violations) -> Self {
        BlueprintError::InvalidBlueprint {
            violations: violations.into_vec(),
        }
    }
}

/// A storey group whose values have all been converted to checked scalars.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidGroup<'a> {
    pub first_floor: PositiveInt,
    pub last_floor: PositiveInt,
    pub typical_height: Height,
    pub slab_thickness: PositiveLength,
    pub slab_vertices: &'a [Point2],
    pub column_coordinates: &'a [Point2],
}

impl ValidGroup<'_> {
    /// Floor numbers covered by this group, ascending.
    pub fn floors(&self) -> impl Iterator<Item = PositiveInt> {
        let last = self.last_floor;
        std::iter::successors(Some(self.first_floor), |floor| floor.checked_next())
            .take_while(move |floor| *floor <= last)
    }
}

/// Proof that a blueprint passed every rule of the rule set built from its
/// settings. Only [`validate`] and [`validate_with`] produce one.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedBlueprint<'a> {
    blueprint: &'a BuildingBlueprint,
    base_elevation: Elevation,
    groups: Vec<ValidGroup<'a>>,
}

impl<'a> ValidatedBlueprint<'a> {
    pub fn blueprint(&self) -> &'a BuildingBlueprint {
        self.blueprint
    }

    pub fn base_elevation(&self) -> Elevation {
        self.base_elevation
    }

    pub fn groups(&self) -> &[ValidGroup<'a>] {
        &self.groups
    }
}

/// Validate a blueprint against the rules selected by its own settings.
///
/// # Example
///
/// ```rust
/// use blueprint_core::blueprint::{BuildingBlueprint, IntegerRange, Point2, StoreyGroup};
/// use blueprint_core::errors::{HeightError, RangeError};
/// use blueprint_core::validation::validate;
///
/// let blueprint = BuildingBlueprint::new(0.0).with_group(StoreyGroup {
///     range: IntegerRange::new(1, 1),
///     typical_height_mm: -1.0,
///     slab_thickness_mm: 200.0,
///     slab_vertices: vec![
///         Point2::new(0.0, 0.0),
///         Point2::new(5000.0, 0.0),
///         Point2::new(5000.0, 5000.0),
///     ],
///     column_coordinates: vec![],
/// });
///
/// let violations = validate(&blueprint).unwrap_err();
/// assert_eq!(violations.len(), 2);
/// assert!(violations.contains(RangeError::StartGreaterThanEnd));
/// assert!(violations.contains(HeightError::HeightLessThanZero));
/// ```
pub fn validate(blueprint: &BuildingBlueprint) -> Result<ValidatedBlueprint<'_>, Violations> {
    validate_with(blueprint, &blueprint.settings)
}

/// Validate a blueprint against the rules selected by `settings`, ignoring
/// the settings stored in the blueprint.
pub fn validate_with<'a>(
    blueprint: &'a BuildingBlueprint,
    settings: &ValidationSettings,
) -> Result<ValidatedBlueprint<'a>, Violations> {
    let rules = RuleSet::from_settings(settings);
    let violations = rules.collect_violations(blueprint);

    for violation in &violations {
        debug!(
            rule = violation.rule.as_str(),
            location = %violation.location,
            code = violation.error.error_code(),
            "rule failed"
        );
    }
    if let Some(violations) = Violations::new(violations) {
        return Err(violations);
    }

    let base_elevation = Elevation::create(blueprint.base_elevation_mm).map_err(|_| {
        single(
            Location::Blueprint,
            GeometryError::InvalidBaseElevation.into(),
        )
    })?;

    let mut groups = Vec::with_capacity(blueprint.storey_groups.len());
    let mut conversion_failures = Vec::new();
    for (index, group) in blueprint.storey_groups.iter().enumerate() {
        match typed_group(index, group) {
            Ok(valid) => groups.push(valid),
            Err(violation) => conversion_failures.push(violation),
        }
    }
    if let Some(violations) = Violations::new(conversion_failures) {
        return Err(violations);
    }

    debug!(groups = groups.len(), "blueprint passed validation");
    Ok(ValidatedBlueprint {
        blueprint,
        base_elevation,
        groups,
    })
}

const CONVERSION_RULE: &str = "scalar_conversion";

fn single(location: Location, error: ValidationError) -> Violations {
    Violations(vec![Violation::new(CONVERSION_RULE, location, error)])
}

fn typed_group(index: usize, group: &StoreyGroup) -> Result<ValidGroup<'_>, Violation> {
    let location = Location::Group { index };
    let fail = |error: ValidationError| Violation::new(CONVERSION_RULE, location, error);

    let first_floor = PositiveInt::create(group.range.start)
        .map_err(|_| fail(RangeError::NonPositiveStart.into()))?;
    let last_floor = PositiveInt::create(group.range.end)
        .map_err(|_| fail(RangeError::NonPositiveEnd.into()))?;
    if first_floor > last_floor {
        return Err(fail(RangeError::StartGreaterThanEnd.into()));
    }
    let typical_height = Height::create(group.typical_height_mm)
        .map_err(|_| fail(HeightError::InvalidHeight.into()))?;
    let slab_thickness = PositiveLength::create(group.slab_thickness_mm)
        .map_err(|_| fail(GeometryError::NonPositiveSlabThickness.into()))?;

    Ok(ValidGroup {
        first_floor,
        last_floor,
        typical_height,
        slab_thickness,
        slab_vertices: &group.slab_vertices,
        column_coordinates: &group.column_coordinates,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blueprint::IntegerRange;

    fn group(start: i64, end: i64, height: f64) -> StoreyGroup {
        StoreyGroup {
            range: IntegerRange::new(start, end),
            typical_height_mm: height,
            slab_thickness_mm: 250.0,
            slab_vertices: vec![
                Point2::new(0.0, 0.0),
                Point2::new(8000.0, 0.0),
                Point2::new(8000.0, 8000.0),
                Point2::new(0.0, 8000.0),
            ],
            column_coordinates: vec![Point2::new(0.0, 0.0), Point2::new(8000.0, 8000.0)],
        }
    }

    fn blueprint(groups: Vec<StoreyGroup>) -> BuildingBlueprint {
        groups
            .into_iter()
            .fold(BuildingBlueprint::new(0.0), BuildingBlueprint::with_group)
    }

    #[test]
    fn test_valid_blueprint_produces_typed_groups() {
        let bp = blueprint(vec![group(1, 3, 3000.0), group(4, 6, 3200.0)]);
        let validated = validate(&bp).unwrap();
        assert_eq!(validated.groups().len(), 2);
        assert_eq!(validated.groups()[1].first_floor.get(), 4);
        let floors: Vec<i64> = validated.groups()[1].floors().map(|f| f.get()).collect();
        assert_eq!(floors, vec![4, 5, 6]);
        assert_eq!(validated.base_elevation().millimetres().0, 0.0);
    }

    #[test]
    fn test_outcomes_cover_every_rule_and_subject() {
        let bp = blueprint(vec![group(1, 3, 3000.0), group(4, 6, 3000.0), group(7, 9, 3000.0)]);
        let rules = RuleSet::standard();
        let outcomes = rules.collect_outcomes(&bp);
        let expected = rules.blueprint_rules().len()
            + 3 * rules.group_rules().len()
            + 2 * rules.pair_rules().len();
        assert_eq!(outcomes.len(), expected);
        assert!(outcomes.iter().all(|o| o.outcome.is_valid()));
    }

    #[test]
    fn test_failures_accumulate_across_groups_and_pairs() {
        let bp = blueprint(vec![
            group(1, 3, 0.0),
            group(5, 6, -10.0),
            group(7, 7, 3000.0),
        ]);
        let violations = validate(&bp).unwrap_err();

        assert_eq!(violations.len(), 4);
        assert!(violations.contains(HeightError::HeightEqualToZero));
        assert!(violations.contains(HeightError::HeightLessThanZero));
        assert!(violations.contains(RangeError::NonConsecutiveRange));
        assert!(violations.contains(RangeError::StartGreaterThanEnd));
    }

    #[test]
    fn test_duplicate_failures_are_kept() {
        let bp = blueprint(vec![group(1, 2, 0.0), group(3, 4, 0.0)]);
        let violations = validate(&bp).unwrap_err();
        let zero_heights = violations
            .iter()
            .filter(|v| v.error == HeightError::HeightEqualToZero.into())
            .count();
        assert_eq!(zero_heights, 2);
    }

    #[test]
    fn test_violation_locations() {
        let bp = blueprint(vec![group(1, 3, 3000.0), group(5, 6, 3000.0)]);
        let violations = validate(&bp).unwrap_err().into_vec();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].location, Location::Between { lower: 0, upper: 1 });
        assert_eq!(violations[0].rule, "ranges_are_consecutive");
    }

    #[test]
    fn test_settings_override_allows_single_storey() {
        let bp = blueprint(vec![group(1, 1, 3000.0), group(2, 4, 3000.0)]);
        assert!(validate(&bp).is_err());

        let relaxed = ValidationSettings {
            allow_single_storey_groups: true,
            ..ValidationSettings::default()
        };
        let validated = validate_with(&bp, &relaxed).unwrap();
        assert_eq!(validated.groups()[0].floors().count(), 1);
    }

    #[test]
    fn test_storey_limit_from_settings() {
        let mut bp = blueprint(vec![group(1, 50, 3000.0)]);
        bp.settings.max_storeys_per_group = 20;
        let violations = validate(&bp).unwrap_err();
        assert!(violations.contains(RangeError::TooManyStoreys));
    }

    #[test]
    fn test_unrepresentable_elevations_rejected() {
        let overflow = blueprint(vec![group(1, 3, 1e308)]);
        let violations = validate(&overflow).unwrap_err().into_vec();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].location, Location::Blueprint);
        assert_eq!(violations[0].rule, "elevations_are_representable");

        let mut stalled = blueprint(vec![group(1, 3, 1.0)]);
        stalled.base_elevation_mm = 1e17;
        assert!(validate(&stalled)
            .unwrap_err()
            .contains(GeometryError::UnrepresentableElevation));
    }

    #[test]
    fn test_empty_blueprint_passes_validation() {
        let bp = BuildingBlueprint::new(0.0);
        let validated = validate(&bp).unwrap();
        assert!(validated.groups().is_empty());
    }

    #[test]
    fn test_violations_convert_to_blueprint_error() {
        let bp = blueprint(vec![group(0, 2, 3000.0)]);
        let error: BlueprintError = validate(&bp).unwrap_err().into();
        assert_eq!(error.error_code(), "INVALID_BLUEPRINT");
        assert_eq!(error.violations().len(), 1);
    }
}
