//! Raw impact values as produced by the external impact estimator.
//!
//! The estimator reports each criterion either as a single value or, when the
//! model architecture is uncertain, as a `{min, mean, max}` range. Both forms
//! are captured by the [`Estimate`] sum type; code consuming estimates matches
//! on the variant instead of inspecting runtime types.

use crate::errors::{ImpactError, ImpactResult};
use crate::units::Dimension;
use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// The five impact criteria reported by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Criterion {
    /// Electricity consumption.
    Energy,
    /// Global warming potential.
    Gwp,
    /// Abiotic depletion potential for elements.
    Adpe,
    /// Primary energy.
    Pe,
    /// Water consumption footprint.
    Wcf,
}

impl Criterion {
    /// All criteria in display order.
    pub const ALL: [Criterion; 5] = [
        Criterion::Energy,
        Criterion::Gwp,
        Criterion::Adpe,
        Criterion::Pe,
        Criterion::Wcf,
    ];

    /// Unit in which the estimator reports raw magnitudes for this criterion.
    #[must_use]
    pub const fn base_unit(&self) -> &'static str {
        match self {
            Criterion::Energy => "kWh",
            Criterion::Gwp => "kgCO2eq",
            Criterion::Adpe => "kgSbeq",
            Criterion::Pe => "MJ",
            Criterion::Wcf => "L",
        }
    }

    #[must_use]
    pub const fn dimension(&self) -> Dimension {
        match self {
            Criterion::Energy | Criterion::Pe => Dimension::ENERGY,
            Criterion::Gwp => Dimension::EMISSIONS,
            Criterion::Adpe => Dimension::DEPLETION,
            Criterion::Wcf => Dimension::VOLUME,
        }
    }

    /// Human readable name used as a heading in the dashboard.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Criterion::Energy => "Energy",
            Criterion::Gwp => "GHG Emissions",
            Criterion::Adpe => "Abiotic Resources",
            Criterion::Pe => "Primary Energy",
            Criterion::Wcf => "Water",
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Criterion::Energy => "energy",
            Criterion::Gwp => "gwp",
            Criterion::Adpe => "adpe",
            Criterion::Pe => "pe",
            Criterion::Wcf => "wcf",
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Criterion {
    type Err = ImpactError;

    /// Parses a criterion name, ignoring case (`"ENERGY"`, `"gwp"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Criterion::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ImpactError::UnsupportedDimension(s.to_string()))
    }
}

/// A `{min, mean, max}` triple satisfying `min <= mean <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRange")]
pub struct RangeValue {
    min: f64,
    mean: f64,
    max: f64,
}

#[derive(Deserialize)]
struct RawRange {
    min: f64,
    mean: f64,
    max: f64,
}

impl TryFrom<RawRange> for RangeValue {
    type Error = ImpactError;

    fn try_from(raw: RawRange) -> Result<Self, Self::Error> {
        Self::new(raw.min, raw.mean, raw.max)
    }
}

impl RangeValue {
    /// Creates a range, rejecting triples that are out of order.
    ///
    /// NaN values fail the ordering check and are rejected as well.
    pub fn new(min: f64, mean: f64, max: f64) -> ImpactResult<Self> {
        if !(min <= mean && mean <= max) {
            return Err(ImpactError::InvalidRange { min, mean, max });
        }
        Ok(Self { min, mean, max })
    }

    #[must_use]
    pub fn min(&self) -> f64 {
        self.min
    }

    #[must_use]
    pub fn mean(&self) -> f64 {
        self.mean
    }

    #[must_use]
    pub fn max(&self) -> f64 {
        self.max
    }
}

/// An impact magnitude, either a point estimate or a range.
///
/// Deserialises from a number or a `{min, mean, max}` map; an out-of-order
/// map reports the [`ImpactError::InvalidRange`] message.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Estimate {
    Point(f64),
    Range(RangeValue),
}

impl<'de> Deserialize<'de> for Estimate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(EstimateVisitor)
    }
}

struct EstimateVisitor;

impl<'de> Visitor<'de> for EstimateVisitor {
    type Value = Estimate;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number or a {min, mean, max} map")
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
        Ok(Estimate::Point(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
        Ok(Estimate::Point(value as f64))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        Ok(Estimate::Point(value as f64))
    }

    fn visit_map<A>(self, map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        RangeValue::deserialize(de::value::MapAccessDeserializer::new(map)).map(Estimate::Range)
    }
}

impl Estimate {
    /// Convenience constructor for a validated range.
    pub fn range(min: f64, mean: f64, max: f64) -> ImpactResult<Self> {
        Ok(Estimate::Range(RangeValue::new(min, mean, max)?))
    }

    /// The central value: the point itself or the mean of a range.
    #[must_use]
    pub fn central(&self) -> f64 {
        match self {
            Estimate::Point(value) => *value,
            Estimate::Range(range) => range.mean(),
        }
    }

    #[must_use]
    pub fn is_range(&self) -> bool {
        matches!(self, Estimate::Range(_))
    }
}

impl From<f64> for Estimate {
    fn from(value: f64) -> Self {
        Estimate::Point(value)
    }
}

impl From<RangeValue> for Estimate {
    fn from(value: RangeValue) -> Self {
        Estimate::Range(value)
    }
}

/// Sub-breakdown of impacts (usage or embodied phase).
///
/// Not every phase reports every criterion, so all fields are optional.
/// The formatter passes breakdowns through unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImpactBreakdown {
    pub energy: Option<Estimate>,
    pub gwp: Option<Estimate>,
    pub adpe: Option<Estimate>,
    pub pe: Option<Estimate>,
    pub wcf: Option<Estimate>,
}

impl ImpactBreakdown {
    #[must_use]
    pub fn get(&self, criterion: Criterion) -> Option<&Estimate> {
        match criterion {
            Criterion::Energy => self.energy.as_ref(),
            Criterion::Gwp => self.gwp.as_ref(),
            Criterion::Adpe => self.adpe.as_ref(),
            Criterion::Pe => self.pe.as_ref(),
            Criterion::Wcf => self.wcf.as_ref(),
        }
    }
}

/// Raw impacts of one request, in the estimator's base units
/// (kWh, kgCO2eq, kgSbeq, MJ, L).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Impacts {
    pub energy: Estimate,
    pub gwp: Estimate,
    pub adpe: Estimate,
    pub pe: Estimate,
    pub wcf: Estimate,
    #[serde(default)]
    pub usage: ImpactBreakdown,
    #[serde(default)]
    pub embodied: ImpactBreakdown,
}

impl Impacts {
    #[must_use]
    pub fn get(&self, criterion: Criterion) -> &Estimate {
        match criterion {
            Criterion::Energy => &self.energy,
            Criterion::Gwp => &self.gwp,
            Criterion::Adpe => &self.adpe,
            Criterion::Pe => &self.pe,
            Criterion::Wcf => &self.wcf,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_ordering() {
        assert!(RangeValue::new(0.04, 0.05, 0.06).is_ok());
        assert!(RangeValue::new(0.05, 0.05, 0.05).is_ok());

        assert_eq!(
            RangeValue::new(0.06, 0.05, 0.07),
            Err(ImpactError::InvalidRange {
                min: 0.06,
                mean: 0.05,
                max: 0.07
            })
        );
        assert!(RangeValue::new(0.04, 0.08, 0.07).is_err());
        assert!(RangeValue::new(f64::NAN, 0.05, 0.07).is_err());
    }

    #[test]
    fn test_estimate_deserialize_point_and_range() {
        let point: Estimate = serde_json::from_str("0.05").unwrap();
        assert_eq!(point, Estimate::Point(0.05));

        let range: Estimate =
            serde_json::from_str(r#"{"min": 0.04, "mean": 0.05, "max": 0.06}"#).unwrap();
        assert!(range.is_range());
        assert_eq!(range.central(), 0.05);
    }

    #[test]
    fn test_estimate_deserialize_rejects_unordered_range() {
        let result: Result<Estimate, _> =
            serde_json::from_str(r#"{"min": 0.07, "mean": 0.05, "max": 0.06}"#);
        let message = result.unwrap_err().to_string();
        assert!(message.contains("Invalid range"), "{message}");
        assert!(message.contains("min=0.07"), "{message}");
    }

    #[test]
    fn test_impacts_deserialize_reports_unordered_range() {
        let result: Result<Impacts, _> = serde_json::from_str(
            r#"{
                "energy": {"min": 0.07, "mean": 0.05, "max": 0.06},
                "gwp": 0.03, "adpe": 0.001, "pe": 0.5, "wcf": 0.1
            }"#,
        );
        let message = result.unwrap_err().to_string();
        assert!(message.contains("Invalid range"), "{message}");
        assert!(message.contains("mean=0.05"), "{message}");
    }

    #[test]
    fn test_estimate_deserialize_rejects_other_shapes() {
        assert!(serde_json::from_str::<Estimate>(r#""0.05""#).is_err());
        assert!(serde_json::from_str::<Estimate>(r#"{"min": 0.04, "mean": 0.05}"#).is_err());
        assert_eq!(
            serde_json::from_str::<Estimate>("1").unwrap(),
            Estimate::Point(1.0)
        );
    }

    #[test]
    fn test_criterion_from_str() {
        assert_eq!("ENERGY".parse::<Criterion>().unwrap(), Criterion::Energy);
        assert_eq!("wcf".parse::<Criterion>().unwrap(), Criterion::Wcf);
        assert!(matches!(
            "noise".parse::<Criterion>(),
            Err(ImpactError::UnsupportedDimension(_))
        ));
    }

    #[test]
    fn test_criterion_base_units_match_dimension() {
        use crate::units::Unit;

        for criterion in Criterion::ALL {
            let unit = Unit::parse(criterion.base_unit()).unwrap();
            assert_eq!(unit.dimension().unwrap(), criterion.dimension());
        }
    }

    #[test]
    fn test_impacts_deserialize_without_breakdowns() {
        let impacts: Impacts = serde_json::from_str(
            r#"{"energy": 0.05, "gwp": 0.03, "adpe": 0.001, "pe": 0.5, "wcf": 0.1}"#,
        )
        .unwrap();
        assert_eq!(impacts.get(Criterion::Pe), &Estimate::Point(0.5));
        assert_eq!(impacts.usage, ImpactBreakdown::default());
    }
}
