//! # Validated Scalars
//!
//! Smart constructors that turn primitive numbers and strings into checked
//! scalar types, or reject them at the boundary. None of them clamp: an
//! out-of-range input is always an error.
//!
//! ## Example
//!
//! ```rust
//! use blueprint_core::scalars::{PositiveInt, PositiveLength};
//!
//! assert!(PositiveInt::create(1).is_ok());
//! assert!(PositiveInt::create(0).is_err());
//!
//! let height = PositiveLength::create(3000.0).unwrap();
//! assert_eq!(height.millimetres().0, 3000.0);
//! ```

use std::fmt;

use serde::Serialize;

use crate::errors::ScalarError;
use crate::units::Millimetres;

/// An integer greater than zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct PositiveInt(i64);

impl PositiveInt {
    pub fn create(value: i64) -> Result<Self, ScalarError> {
        if value <= 0 {
            return Err(ScalarError::NotPositive {
                value: value as f64,
            });
        }
        Ok(PositiveInt(value))
    }

    pub fn get(self) -> i64 {
        self.0
    }

    /// The next integer up, `None` on overflow.
    pub fn checked_next(self) -> Option<PositiveInt> {
        self.0.checked_add(1).map(PositiveInt)
    }
}

impl fmt::Display for PositiveInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A finite length greater than zero, in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct PositiveLength(Millimetres);

impl PositiveLength {
    /// Create a length from a raw millimetre value.
    pub fn create(value_mm: f64) -> Result<Self, ScalarError> {
        if !value_mm.is_finite() {
            return Err(ScalarError::NotFinite { value: value_mm });
        }
        if value_mm <= 0.0 {
            return Err(ScalarError::NotPositive { value: value_mm });
        }
        Ok(PositiveLength(Millimetres(value_mm)))
    }

    pub fn millimetres(self) -> Millimetres {
        self.0
    }
}

/// A non-empty identifying string. Carries no meaning beyond identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Name(String);

impl Name {
    pub fn create(value: impl Into<String>) -> Result<Self, ScalarError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ScalarError::EmptyName);
        }
        Ok(Name(value))
    }

    /// Name made of a fixed, non-blank prefix and a number.
    pub(crate) fn numbered(prefix: &'static str, number: impl fmt::Display) -> Self {
        Name(format!("{prefix} {number}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Vertical position above the building's base datum. Zero is allowed.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Elevation(Millimetres);

impl Elevation {
    pub fn create(value_mm: f64) -> Result<Self, ScalarError> {
        if !value_mm.is_finite() {
            return Err(ScalarError::NotFinite { value: value_mm });
        }
        if value_mm < 0.0 {
            return Err(ScalarError::Negative { value: value_mm });
        }
        Ok(Elevation(Millimetres(value_mm)))
    }

    /// Elevation reached after climbing `height` from this one, or `None`
    /// when the sum overflows or is too close to this one to rise above it.
    pub fn checked_raised_by(self, height: Height) -> Option<Elevation> {
        let next = self.0 + height.millimetres();
        (next.value().is_finite() && next > self.0).then_some(Elevation(next))
    }

    /// Unchecked form of [`Elevation::checked_raised_by`]. Validation replays
    /// every climb of a blueprint with the checked form, so expansion of a
    /// validated blueprint never leaves the finite, rising range.
    pub(crate) fn raised_by(self, height: Height) -> Elevation {
        Elevation(self.0 + height.millimetres())
    }

    pub fn millimetres(self) -> Millimetres {
        self.0
    }
}

/// Vertical extent of one storey.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Height(PositiveLength);

impl Height {
    pub fn create(value_mm: f64) -> Result<Self, ScalarError> {
        PositiveLength::create(value_mm).map(Height)
    }

    pub fn length(self) -> PositiveLength {
        self.0
    }

    pub fn millimetres(self) -> Millimetres {
        self.0.millimetres()
    }
}

impl From<PositiveLength> for Height {
    fn from(length: PositiveLength) -> Self {
        Height(length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_int_boundaries() {
        assert_eq!(
            PositiveInt::create(0),
            Err(ScalarError::NotPositive { value: 0.0 })
        );
        assert_eq!(PositiveInt::create(1).unwrap().get(), 1);
        assert!(PositiveInt::create(-7).is_err());
        assert!(PositiveInt::create(i64::MAX).is_ok());
    }

    #[test]
    fn test_positive_int_checked_next() {
        let one = PositiveInt::create(1).unwrap();
        assert_eq!(one.checked_next().unwrap().get(), 2);
        assert!(PositiveInt::create(i64::MAX).unwrap().checked_next().is_none());
    }

    #[test]
    fn test_positive_length_rejects_zero_and_negative() {
        assert!(PositiveLength::create(0.0).is_err());
        assert!(PositiveLength::create(-250.0).is_err());
        assert_eq!(
            PositiveLength::create(250.0).unwrap().millimetres(),
            Millimetres(250.0)
        );
    }

    #[test]
    fn test_positive_length_rejects_non_finite() {
        assert!(matches!(
            PositiveLength::create(f64::NAN),
            Err(ScalarError::NotFinite { .. })
        ));
        assert!(matches!(
            PositiveLength::create(f64::INFINITY),
            Err(ScalarError::NotFinite { .. })
        ));
    }

    #[test]
    fn test_name_rejects_blank() {
        assert_eq!(Name::create("   "), Err(ScalarError::EmptyName));
        assert_eq!(Name::create("Storey 1").unwrap().as_str(), "Storey 1");
    }

    #[test]
    fn test_elevation_allows_zero() {
        assert_eq!(Elevation::create(0.0).unwrap().millimetres().0, 0.0);
        assert_eq!(
            Elevation::create(-1.0),
            Err(ScalarError::Negative { value: -1.0 })
        );
    }

    #[test]
    fn test_elevation_raised_by_height() {
        let ground = Elevation::create(0.0).unwrap();
        let first = ground.raised_by(Height::create(3000.0).unwrap());
        assert_eq!(first.millimetres().0, 3000.0);
        assert_eq!(
            ground.checked_raised_by(Height::create(3000.0).unwrap()),
            Some(first)
        );
    }

    #[test]
    fn test_checked_raise_rejects_overflow_and_lost_height() {
        let high = Elevation::create(1e308).unwrap();
        assert_eq!(high.checked_raised_by(Height::create(1e308).unwrap()), None);

        // 1 mm is below the spacing of f64 values near 1e17
        let far = Elevation::create(1e17).unwrap();
        assert_eq!(far.checked_raised_by(Height::create(1.0).unwrap()), None);
    }

    #[test]
    fn test_scalars_serialize_as_plain_values() {
        let height = Height::create(3500.0).unwrap();
        assert_eq!(serde_json::to_string(&height).unwrap(), "3500.0");

        let name = Name::create("Slab 2").unwrap();
        assert_eq!(serde_json::to_string(&name).unwrap(), "\"Slab 2\"");
    }
}
