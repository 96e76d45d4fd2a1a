//! Physical quantities: a magnitude tagged with a [`Unit`].
//!
//! Quantities are immutable. Every conversion produces a new quantity; the
//! magnitude is only ever multiplied by an exact ratio of registry factors.

use super::conversion::{ConversionError, Unit};
use super::dimension::Dimension;
use super::parser::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A magnitude expressed in a unit.
///
/// ```
/// use genai_impacts_core::units::Quantity;
///
/// let energy = Quantity::parse("0.05 kWh").unwrap();
/// let wh = energy.to_symbol("Wh").unwrap();
/// assert!((wh.magnitude() - 50.0).abs() < 1e-9);
/// assert_eq!(wh.unit().to_string(), "Wh");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Quantity {
    magnitude: f64,
    unit: Unit,
}

impl Quantity {
    /// Creates a quantity from a magnitude and an already parsed unit.
    #[must_use]
    pub fn new(magnitude: f64, unit: Unit) -> Self {
        Self { magnitude, unit }
    }

    /// Creates a quantity from a magnitude and a unit symbol.
    pub fn with_symbol(magnitude: f64, symbol: &str) -> Result<Self, ParseError> {
        Ok(Self::new(magnitude, Unit::parse(symbol)?))
    }

    /// Parses a quantity written as `"<magnitude> <unit>"`, e.g. `"294 kJ/km"`.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let trimmed = input.trim();
        let (magnitude, unit) = trimmed
            .split_once(char::is_whitespace)
            .ok_or_else(|| ParseError::Malformed(trimmed.to_string()))?;
        let magnitude: f64 = magnitude
            .parse()
            .map_err(|_| ParseError::InvalidMagnitude(magnitude.to_string()))?;
        Ok(Self::new(magnitude, Unit::parse(unit)?))
    }

    #[must_use]
    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    #[must_use]
    pub fn unit(&self) -> &Unit {
        &self.unit
    }

    /// Returns the physical dimension of the quantity's unit.
    pub fn dimension(&self) -> Result<Dimension, ParseError> {
        self.unit.dimension()
    }

    /// Returns true if the quantity can be converted to `unit`.
    pub fn is_compatible(&self, unit: &Unit) -> bool {
        self.unit.is_compatible(unit)
    }

    /// Converts the quantity to another unit of the same dimension.
    pub fn to(&self, unit: &Unit) -> Result<Self, ConversionError> {
        let magnitude = self.unit.convert_to(self.magnitude, unit)?;
        Ok(Self::new(magnitude, unit.clone()))
    }

    /// Converts the quantity to the unit named by `symbol`.
    pub fn to_symbol(&self, symbol: &str) -> Result<Self, ConversionError> {
        self.to(&Unit::parse(symbol)?)
    }

    /// Returns a new quantity with the magnitude multiplied by `factor`.
    #[must_use]
    pub fn scale(&self, factor: f64) -> Self {
        Self::new(self.magnitude * factor, self.unit.clone())
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match f.precision() {
            Some(precision) => write!(f, "{:.*} {}", precision, self.magnitude, self.unit),
            None => write!(f, "{} {}", self.magnitude, self.unit),
        }
    }
}

impl std::str::FromStr for Quantity {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Quantity {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Quantity> for String {
    fn from(quantity: Quantity) -> Self {
        quantity.to_string()
    }
}
