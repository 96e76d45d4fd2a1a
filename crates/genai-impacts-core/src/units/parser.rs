//! Parsing of unit expressions.
//!
//! Impact and equivalence units are either a single symbol (`kWh`,
//! `mgCO2eq`) or a ratio of two symbols (`kJ/km`, `h / kgCO2eq`). The parser
//! accepts a few syntactic variations:
//!
//! - Division: `kJ/km`, `kJ / km`, `kJ per km`
//! - Whitespace: leading, trailing and repeated whitespace is ignored
//!
//! # Grammar
//!
//! ```text
//! unit_expr = symbol (('/' | 'per') symbol)?
//! symbol    = any run of non-whitespace characters other than '/'
//! ```

use super::dimension::Dimension;
use super::registry::UNIT_REGISTRY;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a unit or quantity string was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Empty unit string.
    #[error("empty unit string")]
    EmptyUnit,
    /// Unknown unit symbol.
    #[error("unknown unit: '{0}'")]
    UnknownUnit(String),
    /// The expression is not a symbol or a ratio of two symbols.
    #[error("malformed unit expression: '{0}'")]
    Malformed(String),
    /// The magnitude part of a quantity string is not a number.
    #[error("invalid magnitude: '{0}'")]
    InvalidMagnitude(String),
}

/// A parsed unit expression: a numerator symbol and an optional denominator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParsedUnit {
    numerator: String,
    denominator: Option<String>,
}

impl ParsedUnit {
    /// Parses a unit expression.
    ///
    /// Symbols are validated against the unit registry so that an unknown
    /// unit is reported at parse time rather than at conversion time.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyUnit);
        }

        let spaced = trimmed.replace('/', " / ");
        let tokens: Vec<&str> = spaced.split_whitespace().collect();

        let parsed = match tokens.as_slice() {
            [num] => Self {
                numerator: (*num).to_string(),
                denominator: None,
            },
            [num, sep, den] if *sep == "/" || *sep == "per" => Self {
                numerator: (*num).to_string(),
                denominator: Some((*den).to_string()),
            },
            _ => return Err(ParseError::Malformed(trimmed.to_string())),
        };

        // Validate eagerly
        parsed.dimension()?;
        Ok(parsed)
    }

    /// Returns the numerator symbol.
    #[must_use]
    pub fn numerator(&self) -> &str {
        &self.numerator
    }

    /// Returns the denominator symbol, if this unit is a ratio.
    #[must_use]
    pub fn denominator(&self) -> Option<&str> {
        self.denominator.as_deref()
    }

    /// Returns the normalized string representation.
    ///
    /// Ratios are written with spaces around the slash: `kJ / km`.
    #[must_use]
    pub fn normalized(&self) -> String {
        match &self.denominator {
            Some(den) => format!("{} / {den}", self.numerator),
            None => self.numerator.clone(),
        }
    }

    /// Calculates the physical dimension of this unit.
    pub fn dimension(&self) -> Result<Dimension, ParseError> {
        let num = lookup(&self.numerator)?.dimension;
        match &self.denominator {
            Some(den) => Ok(num - lookup(den)?.dimension),
            None => Ok(num),
        }
    }

    /// Returns true if this unit is dimensionless.
    pub fn is_dimensionless(&self) -> Result<bool, ParseError> {
        Ok(self.dimension()?.is_dimensionless())
    }

    /// Calculates the conversion factor to the base units of its dimension.
    pub fn to_base_factor(&self) -> Result<f64, ParseError> {
        let num = lookup(&self.numerator)?.to_base_factor;
        match &self.denominator {
            Some(den) => Ok(num / lookup(den)?.to_base_factor),
            None => Ok(num),
        }
    }
}

fn lookup(symbol: &str) -> Result<super::registry::UnitInfo, ParseError> {
    UNIT_REGISTRY
        .lookup(symbol)
        .ok_or_else(|| ParseError::UnknownUnit(symbol.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use is_close::is_close;

    #[test]
    fn test_parse_simple() {
        let unit = ParsedUnit::parse("kWh").unwrap();
        assert_eq!(unit.numerator(), "kWh");
        assert_eq!(unit.denominator(), None);
        assert_eq!(unit.normalized(), "kWh");
    }

    #[test]
    fn test_parse_ratio_notations() {
        let a = ParsedUnit::parse("kJ/km").unwrap();
        let b = ParsedUnit::parse("kJ / km").unwrap();
        let c = ParsedUnit::parse("  kJ   per km ").unwrap();
        assert_eq!(a, b);
        assert_eq!(b, c);
        assert_eq!(a.normalized(), "kJ / km");
    }

    #[test]
    fn test_ratio_dimension() {
        let unit = ParsedUnit::parse("h/kgCO2eq").unwrap();
        assert_eq!(unit.dimension().unwrap(), Dimension::TIME_PER_EMISSIONS);
    }

    #[test]
    fn test_ratio_factor() {
        // 1 kWh/km = 3.6e6 J / 1e3 m = 3600 J/m
        let unit = ParsedUnit::parse("kWh/km").unwrap();
        assert!(is_close!(unit.to_base_factor().unwrap(), 3600.0));
    }

    #[test]
    fn test_empty() {
        assert_eq!(ParsedUnit::parse("   "), Err(ParseError::EmptyUnit));
    }

    #[test]
    fn test_unknown() {
        assert_eq!(
            ParsedUnit::parse("furlong"),
            Err(ParseError::UnknownUnit("furlong".to_string()))
        );
        assert_eq!(
            ParsedUnit::parse("kJ/furlong"),
            Err(ParseError::UnknownUnit("furlong".to_string()))
        );
    }

    #[test]
    fn test_malformed() {
        assert!(matches!(
            ParsedUnit::parse("kJ km"),
            Err(ParseError::Malformed(_))
        ));
        assert!(matches!(
            ParsedUnit::parse("kJ/km/h"),
            Err(ParseError::Malformed(_))
        ));
        assert!(matches!(
            ParsedUnit::parse("/km"),
            Err(ParseError::Malformed(_))
        ));
    }
}
