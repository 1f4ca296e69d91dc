//! Rule definitions.
//!
//! Every rule is a pure function from raw input to a [`ValidationOutcome`].
//! Rules never look at each other's results; combining them is the job of
//! [`super::engine`].

use crate::blueprint::{BuildingBlueprint, StoreyGroup, ValidationSettings};
use crate::errors::{GeometryError, HeightError, RangeError, ScalarError, ValidationError};
use crate::scalars::{Elevation, Height, PositiveInt, PositiveLength};

/// Result of running one rule against one subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationOutcome {
    Valid,
    Range(RangeError),
    Height(HeightError),
    Geometry(GeometryError),
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationOutcome::Valid)
    }

    /// The failure carried by this outcome, if any.
    pub fn failure(self) -> Option<ValidationError> {
        match self {
            ValidationOutcome::Valid => None,
            ValidationOutcome::Range(e) => Some(e.into()),
            ValidationOutcome::Height(e) => Some(e.into()),
            ValidationOutcome::Geometry(e) => Some(e.into()),
        }
    }
}

// ============================================================================
// Single-group rules
// ============================================================================

/// Both range bounds must be greater than zero. The start bound is reported
/// when both fail.
pub fn range_values_are_positive(group: &StoreyGroup) -> ValidationOutcome {
    if PositiveInt::create(group.range.start).is_err() {
        ValidationOutcome::Range(RangeError::NonPositiveStart)
    } else if PositiveInt::create(group.range.end).is_err() {
        ValidationOutcome::Range(RangeError::NonPositiveEnd)
    } else {
        ValidationOutcome::Valid
    }
}

/// The range must end strictly above where it starts.
pub fn range_end_exceeds_start(group: &StoreyGroup) -> ValidationOutcome {
    if group.range.start >= group.range.end {
        ValidationOutcome::Range(RangeError::StartGreaterThanEnd)
    } else {
        ValidationOutcome::Valid
    }
}

/// Relaxed form of [`range_end_exceeds_start`] that admits single-storey groups.
pub fn range_end_not_before_start(group: &StoreyGroup) -> ValidationOutcome {
    if group.range.start > group.range.end {
        ValidationOutcome::Range(RangeError::StartGreaterThanEnd)
    } else {
        ValidationOutcome::Valid
    }
}

pub fn typical_height_is_positive(group: &StoreyGroup) -> ValidationOutcome {
    match PositiveLength::create(group.typical_height_mm) {
        Ok(_) => ValidationOutcome::Valid,
        Err(ScalarError::NotFinite { .. }) => ValidationOutcome::Height(HeightError::InvalidHeight),
        Err(_) if group.typical_height_mm < 0.0 => {
            ValidationOutcome::Height(HeightError::HeightLessThanZero)
        }
        Err(_) => ValidationOutcome::Height(HeightError::HeightEqualToZero),
    }
}

pub fn slab_thickness_is_positive(group: &StoreyGroup) -> ValidationOutcome {
    match PositiveLength::create(group.slab_thickness_mm) {
        Ok(_) => ValidationOutcome::Valid,
        Err(_) => ValidationOutcome::Geometry(GeometryError::NonPositiveSlabThickness),
    }
}

/// A slab outline needs at least three vertices to enclose an area.
pub fn slab_outline_is_polygon(group: &StoreyGroup) -> ValidationOutcome {
    if group.slab_vertices.len() < 3 {
        ValidationOutcome::Geometry(GeometryError::DegenerateSlabOutline)
    } else {
        ValidationOutcome::Valid
    }
}

pub fn coordinates_are_finite(group: &StoreyGroup) -> ValidationOutcome {
    let all_finite = group
        .slab_vertices
        .iter()
        .chain(group.column_coordinates.iter())
        .all(|p| p.is_finite());
    if all_finite {
        ValidationOutcome::Valid
    } else {
        ValidationOutcome::Geometry(GeometryError::NonFiniteCoordinate)
    }
}

/// Build a rule that caps how many floors one group may expand into.
///
/// Reversed ranges are left to the ordering rules.
pub fn storey_count_within(limit: u32) -> impl Fn(&StoreyGroup) -> ValidationOutcome {
    move |group: &StoreyGroup| {
        if group.range.start > group.range.end {
            return ValidationOutcome::Valid;
        }
        match group.range.floor_count() {
            Some(count) if count <= u64::from(limit) => ValidationOutcome::Valid,
            _ => ValidationOutcome::Range(RangeError::TooManyStoreys),
        }
    }
}

// ============================================================================
// Pairwise rules
// ============================================================================

/// The upper group must start on the floor directly above the lower group's
/// last floor: no gap and no overlap.
pub fn ranges_are_consecutive(lower: &StoreyGroup, upper: &StoreyGroup) -> ValidationOutcome {
    match upper.range.start.checked_sub(lower.range.end) {
        Some(1) => ValidationOutcome::Valid,
        _ => ValidationOutcome::Range(RangeError::NonConsecutiveRange),
    }
}

// ============================================================================
// Blueprint rules
// ============================================================================

pub fn base_elevation_is_valid(blueprint: &BuildingBlueprint) -> ValidationOutcome {
    match Elevation::create(blueprint.base_elevation_mm) {
        Ok(_) => ValidationOutcome::Valid,
        Err(_) => ValidationOutcome::Geometry(GeometryError::InvalidBaseElevation),
    }
}

/// Build a rule that replays the storey elevation climb of expansion and
/// fails when an elevation would overflow or stop rising, including the top
/// of the highest storey.
///
/// Blueprints with a bad base elevation, a malformed group or a group above
/// `limit` floors pass here; the rules for those defects report them.
pub fn elevations_are_representable(
    limit: u32,
) -> impl Fn(&BuildingBlueprint) -> ValidationOutcome {
    move |blueprint: &BuildingBlueprint| {
        let Ok(mut cursor) = Elevation::create(blueprint.base_elevation_mm) else {
            return ValidationOutcome::Valid;
        };
        for group in &blueprint.storey_groups {
            let Ok(height) = Height::create(group.typical_height_mm) else {
                return ValidationOutcome::Valid;
            };
            let floors = match group.range.floor_count() {
                Some(count) if count <= u64::from(limit) => count,
                _ => return ValidationOutcome::Valid,
            };
            for _ in 0..floors {
                match cursor.checked_raised_by(height) {
                    Some(next) => cursor = next,
                    None => {
                        return ValidationOutcome::Geometry(
                            GeometryError::UnrepresentableElevation,
                        )
                    }
                }
            }
        }
        ValidationOutcome::Valid
    }
}

// ============================================================================
// Rule containers
// ============================================================================

type GroupCheck = Box<dyn Fn(&StoreyGroup) -> ValidationOutcome + Send + Sync>;
type PairCheck = Box<dyn Fn(&StoreyGroup, &StoreyGroup) -> ValidationOutcome + Send + Sync>;
type BlueprintCheck = Box<dyn Fn(&BuildingBlueprint) -> ValidationOutcome + Send + Sync>;

/// A named rule over one storey group.
pub struct GroupRule {
    pub name: &'static str,
    check: GroupCheck,
}

impl GroupRule {
    pub fn new(
        name: &'static str,
        check: impl Fn(&StoreyGroup) -> ValidationOutcome + Send + Sync + 'static,
    ) -> Self {
        GroupRule {
            name,
            check: Box::new(check),
        }
    }

    pub fn check(&self, group: &StoreyGroup) -> ValidationOutcome {
        (self.check)(group)
    }
}

/// A named rule over two adjacent storey groups, lower first.
pub struct PairRule {
    pub name: &'static str,
    check: PairCheck,
}

impl PairRule {
    pub fn new(
        name: &'static str,
        check: impl Fn(&StoreyGroup, &StoreyGroup) -> ValidationOutcome + Send + Sync + 'static,
    ) -> Self {
        PairRule {
            name,
            check: Box::new(check),
        }
    }

    pub fn check(&self, lower: &StoreyGroup, upper: &StoreyGroup) -> ValidationOutcome {
        (self.check)(lower, upper)
    }
}

/// A named rule over blueprint-level fields.
pub struct BlueprintRule {
    pub name: &'static str,
    check: BlueprintCheck,
}

impl BlueprintRule {
    pub fn new(
        name: &'static str,
        check: impl Fn(&BuildingBlueprint) -> ValidationOutcome + Send + Sync + 'static,
    ) -> Self {
        BlueprintRule {
            name,
            check: Box::new(check),
        }
    }

    pub fn check(&self, blueprint: &BuildingBlueprint) -> ValidationOutcome {
        (self.check)(blueprint)
    }
}

/// The complete set of rules applied to a blueprint.
///
/// # Example
///
/// ```rust
/// use blueprint_core::blueprint::ValidationSettings;
/// use blueprint_core::validation::RuleSet;
///
/// let strict = RuleSet::standard();
/// assert!(strict.group_rule_names().contains(&"range_end_exceeds_start"));
///
/// let relaxed = RuleSet::from_settings(&ValidationSettings {
///     allow_single_storey_groups: true,
///     ..ValidationSettings::default()
/// });
/// assert!(relaxed.group_rule_names().contains(&"range_end_not_before_start"));
/// ```
pub struct RuleSet {
    blueprint_rules: Vec<BlueprintRule>,
    group_rules: Vec<GroupRule>,
    pair_rules: Vec<PairRule>,
}

impl RuleSet {
    /// A rule set with no rules at all.
    pub fn empty() -> Self {
        RuleSet {
            blueprint_rules: Vec::new(),
            group_rules: Vec::new(),
            pair_rules: Vec::new(),
        }
    }

    /// Rules for the default settings.
    pub fn standard() -> Self {
        Self::from_settings(&ValidationSettings::default())
    }

    pub fn from_settings(settings: &ValidationSettings) -> Self {
        let ordering = if settings.allow_single_storey_groups {
            GroupRule::new("range_end_not_before_start", range_end_not_before_start)
        } else {
            GroupRule::new("range_end_exceeds_start", range_end_exceeds_start)
        };

        RuleSet::empty()
            .with_blueprint_rule(BlueprintRule::new(
                "base_elevation_is_valid",
                base_elevation_is_valid,
            ))
            .with_blueprint_rule(BlueprintRule::new(
                "elevations_are_representable",
                elevations_are_representable(settings.max_storeys_per_group),
            ))
            .with_group_rule(GroupRule::new(
                "range_values_are_positive",
                range_values_are_positive,
            ))
            .with_group_rule(ordering)
            .with_group_rule(GroupRule::new(
                "storey_count_within_limit",
                storey_count_within(settings.max_storeys_per_group),
            ))
            .with_group_rule(GroupRule::new(
                "typical_height_is_positive",
                typical_height_is_positive,
            ))
            .with_group_rule(GroupRule::new(
                "slab_thickness_is_positive",
                slab_thickness_is_positive,
            ))
            .with_group_rule(GroupRule::new(
                "slab_outline_is_polygon",
                slab_outline_is_polygon,
            ))
            .with_group_rule(GroupRule::new(
                "coordinates_are_finite",
                coordinates_are_finite,
            ))
            .with_pair_rule(PairRule::new(
                "ranges_are_consecutive",
                ranges_are_consecutive,
            ))
    }

    pub fn with_blueprint_rule(mut self, rule: BlueprintRule) -> Self {
        self.blueprint_rules.push(rule);
        self
    }

    pub fn with_group_rule(mut self, rule: GroupRule) -> Self {
        self.group_rules.push(rule);
        self
    }

    pub fn with_pair_rule(mut self, rule: PairRule) -> Self {
        self.pair_rules.push(rule);
        self
    }

    pub fn blueprint_rules(&self) -> &[BlueprintRule] {
        &self.blueprint_rules
    }

    pub fn group_rules(&self) -> &[GroupRule] {
        &self.group_rules
    }

    pub fn pair_rules(&self) -> &[PairRule] {
        &self.pair_rules
    }

    pub fn group_rule_names(&self) -> Vec<&'static str> {
        self.group_rules.iter().map(|r| r.name).collect()
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::standard()
    }
}
