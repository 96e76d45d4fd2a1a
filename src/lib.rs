//! Environmental impacts of generative AI requests.
//!
//! This crate bundles the workspace for consumers and, with the `python`
//! feature, builds the `_lib` extension module used by the dashboard.
//!
//! - [`genai_impacts_core`]: unit formatting and the equivalence engine
//! - [`catalog`]: scenarios, models, throughputs and electricity mix zones

pub use genai_impacts_catalog as catalog;
pub use genai_impacts_core::{equivalences, errors, estimate, formatting, parameters, units};

pub use genai_impacts_core::{
    equivalence_country_multiple, equivalence_electric_vehicle,
    equivalence_electricity_production, equivalence_flight, equivalence_physical_activity,
    equivalence_streaming, format_adpe, format_energy, format_gwp, format_impacts, format_pe,
    format_wcf, Criterion, EquivalenceEngine, EquivalenceParameters, Estimate, ImpactError,
    ImpactResult, Impacts, Quantity, UnitFormatter,
};

#[cfg(feature = "python")]
pub mod python;
