//! [`Unit`]: a validated unit symbol and the factors converting it into
//! other units of the same dimension.
//!
//! # Example
//!
//! ```
//! use genai_impacts_core::units::Unit;
//!
//! let kwh = Unit::parse("kWh").unwrap();
//! let wh = Unit::parse("Wh").unwrap();
//! assert_eq!(kwh.conversion_factor(&wh).unwrap(), 1000.0);
//!
//! // Energy in watt-hours and joules share a dimension
//! let kj = Unit::parse("kJ").unwrap();
//! assert!(kwh.is_compatible(&kj));
//! ```

use super::dimension::Dimension;
use super::parser::{ParseError, ParsedUnit};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Why a conversion could not be computed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConversionError {
    /// The two units measure different things.
    #[error(
        "cannot convert from '{from_unit}' to '{to_unit}': incompatible dimensions ({from} vs {to})"
    )]
    IncompatibleDimensions {
        from: Dimension,
        to: Dimension,
        from_unit: String,
        to_unit: String,
    },
    /// One side is not a known unit.
    #[error("unit parse error: {0}")]
    ParseError(#[from] ParseError),
}

/// A unit symbol checked against the registry.
///
/// # Equality
///
/// Two units are equal if they have the same normalized representation.
/// This means `Unit::parse("kJ/km") == Unit::parse("kJ per km")`.
///
/// # Serialization
///
/// Units serialize as their normalized string, so they can be written
/// directly in configuration files.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Unit {
    /// Text as written by the caller.
    original: String,
    parsed: ParsedUnit,
}

impl Unit {
    /// Parses a unit string.
    ///
    /// ```
    /// use genai_impacts_core::units::Unit;
    ///
    /// let u1 = Unit::parse("kJ/km").unwrap();
    /// let u2 = Unit::parse("kJ / km").unwrap();
    /// assert_eq!(u1, u2);
    /// ```
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let parsed = ParsedUnit::parse(input)?;
        Ok(Self {
            original: input.trim().to_string(),
            parsed,
        })
    }

    #[must_use]
    pub fn original(&self) -> &str {
        &self.original
    }

    /// Canonical spelling, e.g. `kJ / km`.
    #[must_use]
    pub fn normalized(&self) -> String {
        self.parsed.normalized()
    }

    #[must_use]
    pub fn is_dimensionless(&self) -> bool {
        self.parsed.is_dimensionless().unwrap_or(false)
    }

    pub fn dimension(&self) -> Result<Dimension, ParseError> {
        self.parsed.dimension()
    }

    /// Returns the conversion factor to the base units of its dimension.
    pub fn to_base_factor(&self) -> Result<f64, ParseError> {
        self.parsed.to_base_factor()
    }

    /// Returns the numerator of a ratio unit (or the unit itself).
    pub fn numerator(&self) -> Result<Self, ParseError> {
        Self::parse(self.parsed.numerator())
    }

    /// Returns the denominator of a ratio unit, if any.
    pub fn denominator(&self) -> Result<Option<Self>, ParseError> {
        self.parsed.denominator().map(Self::parse).transpose()
    }

    /// Unknown units are never compatible with anything.
    pub fn is_compatible(&self, other: &Self) -> bool {
        match (self.dimension(), other.dimension()) {
            (Ok(d1), Ok(d2)) => d1.is_compatible(&d2),
            _ => false,
        }
    }

    /// Multiplier taking a magnitude in `self` to `other` (`kWh` to `Wh` is 1000).
    ///
    /// Fails with [`ConversionError::IncompatibleDimensions`] across dimensions.
    pub fn conversion_factor(&self, other: &Self) -> Result<f64, ConversionError> {
        let dim_self = self.dimension()?;
        let dim_other = other.dimension()?;

        if !dim_self.is_compatible(&dim_other) {
            return Err(ConversionError::IncompatibleDimensions {
                from: dim_self,
                to: dim_other,
                from_unit: self.normalized(),
                to_unit: other.normalized(),
            });
        }

        if self == other {
            return Ok(1.0);
        }

        // value_other = value_self * (factor_self / factor_other)
        Ok(self.to_base_factor()? / other.to_base_factor()?)
    }

    /// `value` in `self`, expressed in `other`.
    pub fn convert_to(&self, value: f64, other: &Self) -> Result<f64, ConversionError> {
        let factor = self.conversion_factor(other)?;
        Ok(value * factor)
    }
}

impl PartialEq for Unit {
    fn eq(&self, other: &Self) -> bool {
        self.parsed == other.parsed
    }
}

impl Eq for Unit {}

impl std::hash::Hash for Unit {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.parsed.hash(state);
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.normalized())
    }
}

impl std::str::FromStr for Unit {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Unit {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Unit> for String {
    fn from(unit: Unit) -> Self {
        unit.normalized()
    }
}

/// [`Unit::conversion_factor`] for two unit symbols.
///
/// ```
/// use genai_impacts_core::units::conversion_factor;
///
/// let factor = conversion_factor("kWh", "kJ").unwrap();
/// assert!((factor - 3600.0).abs() < 1e-9);
/// ```
pub fn conversion_factor(from: &str, to: &str) -> Result<f64, ConversionError> {
    let from_unit = Unit::parse(from)?;
    let to_unit = Unit::parse(to)?;
    from_unit.conversion_factor(&to_unit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use is_close::is_close;

    #[test]
    fn test_unit_equality() {
        let u1 = Unit::parse("h/kgCO2eq").unwrap();
        let u2 = Unit::parse("h / kgCO2eq").unwrap();
        let u3 = Unit::parse("h per kgCO2eq").unwrap();
        assert_eq!(u1, u2);
        assert_eq!(u2, u3);
    }

    #[test]
    fn test_unit_inequality() {
        let u1 = Unit::parse("kWh").unwrap();
        let u2 = Unit::parse("Wh").unwrap();
        assert_ne!(u1, u2);
    }

    #[test]
    fn test_is_compatible() {
        let kwh = Unit::parse("kWh").unwrap();
        let mj = Unit::parse("MJ").unwrap();
        assert!(kwh.is_compatible(&mj));

        let gwp = Unit::parse("kgCO2eq").unwrap();
        let adpe = Unit::parse("kgSbeq").unwrap();
        assert!(!gwp.is_compatible(&adpe));
    }

    #[test]
    fn test_conversion_factor_identity() {
        let u1 = Unit::parse("kJ/km").unwrap();
        let u2 = Unit::parse("kJ / km").unwrap();
        assert_eq!(u1.conversion_factor(&u2).unwrap(), 1.0);
    }

    #[test]
    fn test_ladder_factors() {
        assert!(is_close!(conversion_factor("kWh", "Wh").unwrap(), 1e3));
        assert!(is_close!(conversion_factor("Wh", "mWh").unwrap(), 1e3));
        assert!(is_close!(conversion_factor("kgCO2eq", "gCO2eq").unwrap(), 1e3));
        assert!(is_close!(conversion_factor("mgSbeq", "µgSbeq").unwrap(), 1e3));
        assert!(is_close!(conversion_factor("MJ", "kJ").unwrap(), 1e3));
        assert!(is_close!(conversion_factor("L", "mL").unwrap(), 1e3));
    }

    #[test]
    fn test_watt_hours_to_joules() {
        assert!(is_close!(conversion_factor("kWh", "kJ").unwrap(), 3600.0));
        assert!(is_close!(conversion_factor("TWh", "GWh").unwrap(), 1e3));
    }

    #[test]
    fn test_incompatible_dimensions_error() {
        let gwp = Unit::parse("kgCO2eq").unwrap();
        let energy = Unit::parse("kWh").unwrap();
        let result = gwp.conversion_factor(&energy);

        assert!(matches!(
            result,
            Err(ConversionError::IncompatibleDimensions { .. })
        ));
        let message = result.unwrap_err().to_string();
        assert!(message.contains("kgCO2eq"), "{message}");
        assert!(message.contains("kWh"), "{message}");
    }

    #[test]
    fn test_ratio_parts() {
        let rate = Unit::parse("kWh/km").unwrap();
        assert_eq!(rate.numerator().unwrap(), Unit::parse("kWh").unwrap());
        assert_eq!(
            rate.denominator().unwrap(),
            Some(Unit::parse("km").unwrap())
        );
        assert_eq!(Unit::parse("kWh").unwrap().denominator().unwrap(), None);
    }

    #[test]
    fn test_convert_to() {
        let km = Unit::parse("km").unwrap();
        let m = Unit::parse("m").unwrap();
        assert!(is_close!(km.convert_to(0.25, &m).unwrap(), 250.0));
    }

    #[test]
    fn test_serde_as_string() {
        let unit = Unit::parse("kJ per km").unwrap();
        let json = serde_json::to_string(&unit).unwrap();
        assert_eq!(json, "\"kJ / km\"");

        let back: Unit = serde_json::from_str(&json).unwrap();
        assert_eq!(back, unit);

        assert!(serde_json::from_str::<Unit>("\"furlong\"").is_err());
    }

    #[test]
    fn test_original_preserved() {
        let unit = Unit::parse(" kJ per km ").unwrap();
        assert_eq!(unit.original(), "kJ per km");
        assert_eq!(unit.normalized(), "kJ / km");
    }
}
