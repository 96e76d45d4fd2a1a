//! Core of the GenAI impacts dashboard.
//!
//! Two independent components turn the raw output of an impact estimator into
//! something a reader can relate to:
//!
//! - the [Unit Formatter](formatting) rescales each criterion into its most
//!   readable unit;
//! - the [Equivalence Engine](equivalences) expresses energy and emissions as
//!   everyday activities, optionally projected to world-wide adoption.
//!
//! ```
//! use genai_impacts_core::{equivalence_electric_vehicle, format_energy};
//!
//! let energy = format_energy(0.05).unwrap();
//! assert_eq!(energy.unit().to_string(), "Wh");
//!
//! let distance = equivalence_electric_vehicle(&energy).unwrap();
//! assert_eq!(distance.unit().to_string(), "m");
//! ```

pub mod equivalences;
pub mod errors;
pub mod estimate;
pub mod formatting;
pub mod parameters;
pub mod units;

pub use equivalences::{
    equivalence_country_multiple, equivalence_electric_vehicle,
    equivalence_electricity_production, equivalence_flight, equivalence_physical_activity,
    equivalence_streaming, EnergyProduction, EquivalenceEngine, EquivalenceSummary,
    PhysicalActivity,
};
pub use errors::{ImpactError, ImpactResult};
pub use estimate::{Criterion, Estimate, ImpactBreakdown, Impacts, RangeValue};
pub use formatting::{
    format_adpe, format_energy, format_gwp, format_impacts, format_pe, format_wcf,
    ConversionTable, FormattedEstimate, FormattedImpacts, Ladder, UnitFormatter,
};
pub use parameters::{EquivalenceConstants, EquivalenceParameters, ScalingParameters};
pub use units::{Quantity, Unit};
