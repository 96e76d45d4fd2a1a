//! Equivalence Engine
//!
//! Expresses a formatted energy or emissions quantity as an everyday
//! comparison: a walking or running distance, an electric vehicle trip, hours
//! of video streaming, and, once projected to world-wide adoption, power plants,
//! a country's electricity consumption or transatlantic flights.
//!
//! Inputs may be in any unit of the expected dimension; they are converted
//! through the unit registry before the ratios are applied.
//!
//! # World-adoption scaling
//!
//! Electricity production, country consumption and flight equivalences first
//! project one request onto 1% of the world population repeating it every day
//! for a year:
//!
//! ```text
//! scaled = raw × (population_share × world_population) × days_in_year
//!        = raw × 80 000 000 × 365
//! ```

use crate::errors::{ImpactError, ImpactResult};
use crate::formatting::{FormattedImpacts, Ladder};
use crate::parameters::EquivalenceParameters;
use crate::units::{Quantity, Unit};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;
use tracing::debug;

const DISTANCE_LADDER: [&str; 2] = ["km", "m"];
const TIME_LADDER: [&str; 3] = ["h", "min", "s"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhysicalActivity {
    Running,
    Walking,
}

impl PhysicalActivity {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            PhysicalActivity::Running => "running",
            PhysicalActivity::Walking => "walking",
        }
    }
}

impl fmt::Display for PhysicalActivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnergyProduction {
    Nuclear,
    Wind,
}

impl EnergyProduction {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            EnergyProduction::Nuclear => "nuclear",
            EnergyProduction::Wind => "wind",
        }
    }
}

impl fmt::Display for EnergyProduction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every equivalence of one request, as rendered by the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquivalenceSummary {
    pub physical_activity: PhysicalActivity,
    pub distance: Quantity,
    pub electric_vehicle: Quantity,
    pub streaming: Quantity,
    pub electricity_production: EnergyProduction,
    pub plant_count: f64,
    pub country_multiple: f64,
    pub flights: f64,
}

/// Converts impacts into comparison quantities using an explicit set of
/// [`EquivalenceParameters`].
#[derive(Debug, Clone, PartialEq)]
pub struct EquivalenceEngine {
    parameters: EquivalenceParameters,
    distance_ladder: Ladder,
    time_ladder: Ladder,
}

impl Default for EquivalenceEngine {
    fn default() -> Self {
        Self {
            parameters: EquivalenceParameters::default(),
            distance_ladder: Ladder::from_static(&DISTANCE_LADDER),
            time_ladder: Ladder::from_static(&TIME_LADDER),
        }
    }
}

impl EquivalenceEngine {
    /// Creates an engine after validating `parameters`.
    pub fn new(parameters: EquivalenceParameters) -> ImpactResult<Self> {
        parameters.validate()?;
        debug!(
            adoption_factor = parameters.scaling.adoption_factor(),
            "building equivalence engine"
        );
        Ok(Self {
            parameters,
            ..Self::default()
        })
    }

    pub fn parameters(&self) -> &EquivalenceParameters {
        &self.parameters
    }

    /// Running distance if it reaches the running threshold, walking distance
    /// otherwise.
    pub fn physical_activity(
        &self,
        energy: &Quantity,
    ) -> ImpactResult<(PhysicalActivity, Quantity)> {
        let constants = &self.parameters.constants;
        let running = divide_by_rate(energy, &constants.running_energy)?;
        let threshold = &constants.running_threshold;

        let reaches_threshold = running.to(threshold.unit())?.magnitude() >= threshold.magnitude();
        let (activity, distance) = if reaches_threshold {
            (PhysicalActivity::Running, running)
        } else {
            (
                PhysicalActivity::Walking,
                divide_by_rate(energy, &constants.walking_energy)?,
            )
        };
        Ok((activity, self.distance_ladder.rescale(&distance)?))
    }

    /// Distance an electric vehicle covers with `energy`.
    pub fn electric_vehicle(&self, energy: &Quantity) -> ImpactResult<Quantity> {
        let distance = divide_by_rate(energy, &self.parameters.constants.ev_energy)?;
        self.distance_ladder.rescale(&distance)
    }

    /// Hours of video streaming emitting the same `gwp`.
    pub fn streaming(&self, gwp: &Quantity) -> ImpactResult<Quantity> {
        let time = multiply_by_rate(gwp, &self.parameters.constants.streaming_gwp)?;
        self.time_ladder.rescale(&time)
    }

    /// Number of nuclear plants, or wind turbines when less than one plant is
    /// needed, producing the world-adoption energy in a year.
    pub fn electricity_production(
        &self,
        energy: &Quantity,
    ) -> ImpactResult<(EnergyProduction, f64)> {
        let constants = &self.parameters.constants;
        let nuclear = self.scaled_ratio(energy, &constants.yearly_nuclear_energy)?;
        if nuclear >= 1.0 {
            return Ok((EnergyProduction::Nuclear, nuclear));
        }
        let wind = self.scaled_ratio(energy, &constants.yearly_wind_energy)?;
        Ok((EnergyProduction::Wind, wind))
    }

    /// World-adoption energy as a multiple of Ireland's yearly consumption.
    pub fn country_multiple(&self, energy: &Quantity) -> ImpactResult<f64> {
        self.scaled_ratio(
            energy,
            &self.parameters.constants.yearly_ireland_electricity_consumption,
        )
    }

    /// World-adoption emissions as a number of Paris ↔ New York return flights.
    pub fn flight(&self, gwp: &Quantity) -> ImpactResult<f64> {
        self.scaled_ratio(gwp, &self.parameters.constants.airplane_paris_nyc_gwp)
    }

    /// Projects a single request onto world-wide adoption.
    #[must_use]
    pub fn scale_to_adoption(&self, quantity: &Quantity) -> Quantity {
        quantity.scale(self.parameters.scaling.adoption_factor())
    }

    /// Computes every equivalence from the central energy and GWP values of
    /// formatted impacts.
    pub fn summarize(&self, impacts: &FormattedImpacts) -> ImpactResult<EquivalenceSummary> {
        let energy = impacts.energy.central();
        let gwp = impacts.gwp.central();

        let (physical_activity, distance) = self.physical_activity(energy)?;
        let (electricity_production, plant_count) = self.electricity_production(energy)?;
        Ok(EquivalenceSummary {
            physical_activity,
            distance,
            electric_vehicle: self.electric_vehicle(energy)?,
            streaming: self.streaming(gwp)?,
            electricity_production,
            plant_count,
            country_multiple: self.country_multiple(energy)?,
            flights: self.flight(gwp)?,
        })
    }

    fn scaled_ratio(&self, quantity: &Quantity, yearly: &Quantity) -> ImpactResult<f64> {
        let scaled = self.scale_to_adoption(&quantity.to(yearly.unit())?);
        Ok(scaled.magnitude() / yearly.magnitude())
    }
}

/// Splits a ratio unit such as `kJ / km` into its parts.
fn rate_parts(rate: &Quantity) -> ImpactResult<(Unit, Unit)> {
    let unit = rate.unit();
    let denominator = unit.denominator()?.ok_or_else(|| ImpactError::InvalidParameter {
        name: unit.to_string(),
        reason: "expected a ratio of two units".to_string(),
    })?;
    Ok((unit.numerator()?, denominator))
}

/// `quantity / rate`, expressed in the rate's denominator unit.
fn divide_by_rate(quantity: &Quantity, rate: &Quantity) -> ImpactResult<Quantity> {
    let (numerator, denominator) = rate_parts(rate)?;
    let magnitude = quantity.to(&numerator)?.magnitude() / rate.magnitude();
    Ok(Quantity::new(magnitude, denominator))
}

/// `quantity × rate`, expressed in the rate's numerator unit.
fn multiply_by_rate(quantity: &Quantity, rate: &Quantity) -> ImpactResult<Quantity> {
    let (numerator, denominator) = rate_parts(rate)?;
    let magnitude = quantity.to(&denominator)?.magnitude() * rate.magnitude();
    Ok(Quantity::new(magnitude, numerator))
}

static DEFAULT_ENGINE: LazyLock<EquivalenceEngine> = LazyLock::new(EquivalenceEngine::default);

/// Physical activity equivalence using the default constants.
pub fn equivalence_physical_activity(
    energy: &Quantity,
) -> ImpactResult<(PhysicalActivity, Quantity)> {
    DEFAULT_ENGINE.physical_activity(energy)
}

pub fn equivalence_electric_vehicle(energy: &Quantity) -> ImpactResult<Quantity> {
    DEFAULT_ENGINE.electric_vehicle(energy)
}

pub fn equivalence_streaming(gwp: &Quantity) -> ImpactResult<Quantity> {
    DEFAULT_ENGINE.streaming(gwp)
}

pub fn equivalence_electricity_production(
    energy: &Quantity,
) -> ImpactResult<(EnergyProduction, f64)> {
    DEFAULT_ENGINE.electricity_production(energy)
}

pub fn equivalence_country_multiple(energy: &Quantity) -> ImpactResult<f64> {
    DEFAULT_ENGINE.country_multiple(energy)
}

pub fn equivalence_flight(gwp: &Quantity) -> ImpactResult<f64> {
    DEFAULT_ENGINE.flight(gwp)
}
