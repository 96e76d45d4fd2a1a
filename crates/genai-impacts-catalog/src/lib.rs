//! Reference data behind the GenAI impacts dashboard selectors: prompt
//! scenarios, the model catalogue, generation throughputs and electricity
//! mix zones.

pub mod electricity_mix;
pub mod errors;
pub mod latency;
pub mod models;
pub mod scenarios;

pub use electricity_mix::{country_name, criterion_label, Country, COUNTRIES};
pub use errors::{CatalogError, CatalogResult};
pub use latency::{LatencyEstimator, DEFAULT_THROUGHPUT};
pub use models::{ArchitectureType, ModelCatalog, ModelRecord, ParameterCount};
pub use scenarios::{default_scenario, Scenario, SCENARIOS};
