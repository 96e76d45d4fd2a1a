//! Equivalence parameters
//!
//! Empirical conversion constants and world-adoption scaling used by the
//! equivalence engine. Each structure provides defaults matching the values
//! displayed by the dashboard, and can be overridden from a TOML file.
//!
//! ```toml
//! [constants]
//! ev_energy = "0.2 kWh/km"
//!
//! [scaling]
//! population_share = 0.02
//! ```

use crate::errors::{ImpactError, ImpactResult};
use crate::units::{Dimension, Quantity};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

fn quantity(value: &str) -> Quantity {
    // Default literals are covered by `test_defaults_are_valid`
    Quantity::parse(value).unwrap_or_else(|e| panic!("invalid default quantity '{value}': {e}"))
}

/// Empirical conversion ratios used to express impacts as everyday activities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EquivalenceConstants {
    /// Energy spent running one kilometre.
    ///
    /// Default: 294 kJ/km
    pub running_energy: Quantity,

    /// Energy spent walking one kilometre.
    ///
    /// Default: 196 kJ/km
    pub walking_energy: Quantity,

    /// Running distance from which the physical activity equivalence reports
    /// running instead of walking (inclusive).
    ///
    /// Default: 1 km
    pub running_threshold: Quantity,

    /// Electricity consumed by an electric vehicle per kilometre.
    ///
    /// Default: 0.17 kWh/km
    pub ev_energy: Quantity,

    /// Hours of video streaming per kgCO2eq emitted.
    ///
    /// Default: 15.6 h/kgCO2eq
    pub streaming_gwp: Quantity,

    /// Yearly electricity production of one nuclear power plant.
    ///
    /// Default: 6 TWh
    pub yearly_nuclear_energy: Quantity,

    /// Yearly electricity production of one onshore wind turbine.
    ///
    /// Default: 4.2 GWh
    pub yearly_wind_energy: Quantity,

    /// Yearly electricity consumption of Ireland.
    ///
    /// Default: 33 TWh
    pub yearly_ireland_electricity_consumption: Quantity,

    /// Emissions attributed to one passenger on a Paris ↔ New York return flight.
    ///
    /// Default: 1770 kgCO2eq
    pub airplane_paris_nyc_gwp: Quantity,
}

impl Default for EquivalenceConstants {
    fn default() -> Self {
        Self {
            running_energy: quantity("294 kJ/km"),
            walking_energy: quantity("196 kJ/km"),
            running_threshold: quantity("1 km"),
            ev_energy: quantity("0.17 kWh/km"),
            streaming_gwp: quantity("15.6 h/kgCO2eq"),
            yearly_nuclear_energy: quantity("6 TWh"),
            yearly_wind_energy: quantity("4.2 GWh"),
            yearly_ireland_electricity_consumption: quantity("33 TWh"),
            airplane_paris_nyc_gwp: quantity("1770 kgCO2eq"),
        }
    }
}

impl EquivalenceConstants {
    /// Checks that every constant has the expected dimension and a strictly
    /// positive magnitude.
    pub fn validate(&self) -> ImpactResult<()> {
        let expectations = [
            ("running_energy", &self.running_energy, Dimension::ENERGY_PER_LENGTH),
            ("walking_energy", &self.walking_energy, Dimension::ENERGY_PER_LENGTH),
            ("running_threshold", &self.running_threshold, Dimension::LENGTH),
            ("ev_energy", &self.ev_energy, Dimension::ENERGY_PER_LENGTH),
            ("streaming_gwp", &self.streaming_gwp, Dimension::TIME_PER_EMISSIONS),
            ("yearly_nuclear_energy", &self.yearly_nuclear_energy, Dimension::ENERGY),
            ("yearly_wind_energy", &self.yearly_wind_energy, Dimension::ENERGY),
            (
                "yearly_ireland_electricity_consumption",
                &self.yearly_ireland_electricity_consumption,
                Dimension::ENERGY,
            ),
            ("airplane_paris_nyc_gwp", &self.airplane_paris_nyc_gwp, Dimension::EMISSIONS),
        ];

        for (name, value, expected) in expectations {
            let dimension = value.dimension()?;
            if dimension != expected {
                return Err(ImpactError::InvalidParameter {
                    name: name.to_string(),
                    reason: format!("expected dimension {expected}, got {dimension} ({value})"),
                });
            }
            if !(value.magnitude().is_finite() && value.magnitude() > 0.0) {
                return Err(ImpactError::InvalidParameter {
                    name: name.to_string(),
                    reason: format!("must be positive, got {value}"),
                });
            }
        }
        Ok(())
    }
}

/// Projection of a single request onto a share of the world population
/// repeating it every day for a year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScalingParameters {
    /// World population.
    ///
    /// Default: 8 billion
    pub world_population: f64,

    /// Share of the population adopting the usage.
    ///
    /// Default: 0.01 (1%)
    pub population_share: f64,

    /// Days per year the request is repeated.
    ///
    /// Default: 365
    pub days_in_year: f64,
}

impl Default for ScalingParameters {
    fn default() -> Self {
        Self {
            world_population: 8_000_000_000.0,
            population_share: 0.01,
            days_in_year: 365.0,
        }
    }
}

impl ScalingParameters {
    /// Number of people adopting the usage (80 million by default).
    #[must_use]
    pub fn adopting_population(&self) -> f64 {
        self.population_share * self.world_population
    }

    /// Multiplier applied to one request: adopting population × days per year.
    #[must_use]
    pub fn adoption_factor(&self) -> f64 {
        self.adopting_population() * self.days_in_year
    }

    pub fn validate(&self) -> ImpactResult<()> {
        let checks = [
            ("world_population", self.world_population),
            ("population_share", self.population_share),
            ("days_in_year", self.days_in_year),
        ];
        for (name, value) in checks {
            if !(value.is_finite() && value > 0.0) {
                return Err(ImpactError::InvalidParameter {
                    name: name.to_string(),
                    reason: format!("must be positive, got {value}"),
                });
            }
        }
        if self.population_share > 1.0 {
            return Err(ImpactError::InvalidParameter {
                name: "population_share".to_string(),
                reason: format!("must not exceed 1, got {}", self.population_share),
            });
        }
        Ok(())
    }
}

/// All parameters of the equivalence engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EquivalenceParameters {
    pub constants: EquivalenceConstants,
    pub scaling: ScalingParameters,
}

impl EquivalenceParameters {
    /// Parses and validates parameters from a TOML document.
    ///
    /// Missing tables and fields keep their default values.
    pub fn from_toml_str(source: &str) -> ImpactResult<Self> {
        let parameters: Self =
            toml::from_str(source).map_err(|e| ImpactError::Config(e.to_string()))?;
        parameters.validate()?;

        if parameters != Self::default() {
            warn!("equivalence parameters differ from the defaults");
        }
        Ok(parameters)
    }

    /// Reads parameters from a TOML file.
    pub fn from_path(path: impl AsRef<Path>) -> ImpactResult<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading equivalence parameters");
        let source = std::fs::read_to_string(path)
            .map_err(|e| ImpactError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&source)
    }

    pub fn to_toml_string(&self) -> ImpactResult<String> {
        toml::to_string(self).map_err(|e| ImpactError::Config(e.to_string()))
    }

    pub fn validate(&self) -> ImpactResult<()> {
        self.constants.validate()?;
        self.scaling.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use is_close::is_close;

    #[test]
    fn test_defaults_are_valid() {
        EquivalenceParameters::default().validate().unwrap();
    }

    #[test]
    fn test_default_units() {
        let constants = EquivalenceConstants::default();
        assert_eq!(constants.running_energy.unit().to_string(), "kJ / km");
        assert_eq!(constants.ev_energy.unit().to_string(), "kWh / km");
        assert_eq!(constants.streaming_gwp.unit().to_string(), "h / kgCO2eq");
        assert_eq!(constants.yearly_nuclear_energy.unit().to_string(), "TWh");
        assert_eq!(constants.yearly_wind_energy.unit().to_string(), "GWh");
    }

    #[test]
    fn test_adoption_factor() {
        let scaling = ScalingParameters::default();
        assert!(is_close!(scaling.adopting_population(), 80_000_000.0));
        assert!(is_close!(scaling.adoption_factor(), 29_200_000_000.0));
    }

    #[test]
    fn test_partial_toml_override() {
        let parameters = EquivalenceParameters::from_toml_str(
            r#"
            [constants]
            ev_energy = "0.2 kWh/km"

            [scaling]
            population_share = 0.02
            "#,
        )
        .unwrap();

        assert!(is_close!(parameters.constants.ev_energy.magnitude(), 0.2));
        assert_eq!(
            parameters.constants.running_energy,
            EquivalenceConstants::default().running_energy
        );
        assert!(is_close!(parameters.scaling.adopting_population(), 160_000_000.0));
        assert_eq!(parameters.scaling.days_in_year, 365.0);
    }

    #[test]
    fn test_empty_toml_is_default() {
        let parameters = EquivalenceParameters::from_toml_str("").unwrap();
        assert_eq!(parameters, EquivalenceParameters::default());
    }

    #[test]
    fn test_toml_round_trip() {
        let parameters = EquivalenceParameters::default();
        let serialised = parameters.to_toml_string().unwrap();
        let deserialised = EquivalenceParameters::from_toml_str(&serialised).unwrap();
        assert_eq!(parameters, deserialised);
    }

    #[test]
    fn test_wrong_dimension_rejected() {
        let result = EquivalenceParameters::from_toml_str(
            r#"
            [constants]
            streaming_gwp = "15.6 h/kgSbeq"
            "#,
        );
        assert!(matches!(
            result,
            Err(ImpactError::InvalidParameter { ref name, .. }) if name == "streaming_gwp"
        ));
    }

    #[test]
    fn test_non_positive_rejected() {
        let result = EquivalenceParameters::from_toml_str(
            r#"
            [constants]
            yearly_wind_energy = "0 GWh"
            "#,
        );
        assert!(matches!(result, Err(ImpactError::InvalidParameter { .. })));

        let result = EquivalenceParameters::from_toml_str(
            r#"
            [scaling]
            population_share = 1.5
            "#,
        );
        assert!(matches!(result, Err(ImpactError::InvalidParameter { .. })));
    }

    #[test]
    fn test_unknown_unit_is_config_error() {
        let result = EquivalenceParameters::from_toml_str(
            r#"
            [constants]
            ev_energy = "0.2 kWh/furlong"
            "#,
        );
        assert!(matches!(result, Err(ImpactError::Config(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = EquivalenceParameters::from_path("/nonexistent/equivalences.toml");
        assert!(matches!(result, Err(ImpactError::Config(_))));
    }
}
