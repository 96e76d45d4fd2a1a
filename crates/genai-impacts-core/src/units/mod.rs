//! Unit parsing, normalization, and conversion for impact quantities.
//!
//! This module replaces an implicit global unit system with a small, explicit
//! registry covering exactly the units that environmental impact reporting and
//! its equivalences need.
//!
//! # Quick Start
//!
//! ```
//! use genai_impacts_core::units::{Quantity, Unit};
//!
//! let energy = Quantity::parse("294 kJ").unwrap();
//! let rate = Quantity::parse("294 kJ/km").unwrap();
//!
//! // Ratios expose their parts for dimensional bookkeeping
//! let per = rate.unit().numerator().unwrap();
//! assert_eq!(energy.to(&per).unwrap().magnitude(), 294.0);
//!
//! // Incompatible units produce errors
//! let gwp = Unit::parse("kgCO2eq").unwrap();
//! assert!(energy.to(&gwp).is_err());
//! ```
//!
//! # Supported Units
//!
//! | Dimension | Base | Symbols |
//! |-----------|------|---------|
//! | Energy | J | `J`, `Wh` with SI prefixes (`kJ`, `MJ`, `mWh`, `kWh`, `TWh`) |
//! | GWP | kgCO2eq | `gCO2eq` with SI prefixes, `tCO2eq` |
//! | ADPe | kgSbeq | `gSbeq` with SI prefixes (`µgSbeq`, `ugSbeq`) |
//! | Volume | L | `L` with SI prefixes, `m3` |
//! | Length | m | `m` with SI prefixes |
//! | Time | s | `s`, `min`, `h`, `day`, `yr` |
//!
//! # Module Structure
//!
//! - [`dimension`]: Physical dimension exponents
//! - [`registry`]: Symbols, prefixes and aliases
//! - [`parser`]: Single symbols and ratios
//! - [`conversion`]: [`Unit`] type and conversion API
//! - [`quantity`]: [`Quantity`], a magnitude tagged with a unit

pub mod conversion;
pub mod dimension;
pub mod parser;
pub mod quantity;
pub mod registry;

pub use conversion::{conversion_factor, ConversionError, Unit};
pub use dimension::Dimension;
pub use parser::{ParseError, ParsedUnit};
pub use quantity::Quantity;
pub use registry::{UnitInfo, UnitRegistry, UNIT_REGISTRY};

#[cfg(test)]
mod tests {
    use super::*;
    use is_close::is_close;

    /// Every ladder step used for display is an exact power of 1000.
    #[test]
    fn test_display_ladders_are_powers_of_1000() {
        let ladders: [&[&str]; 5] = [
            &["kWh", "Wh", "mWh"],
            &["kgCO2eq", "gCO2eq", "mgCO2eq"],
            &["kgSbeq", "gSbeq", "mgSbeq", "µgSbeq"],
            &["MJ", "kJ"],
            &["L", "mL"],
        ];

        for ladder in ladders {
            for pair in ladder.windows(2) {
                let factor = conversion_factor(pair[0], pair[1]).unwrap();
                assert!(
                    is_close!(factor, 1000.0),
                    "{} -> {}: {factor}",
                    pair[0],
                    pair[1]
                );
            }
        }
    }

    #[test]
    fn test_energy_rate_bookkeeping() {
        // 0.17 kWh/km applied to 0.17 kWh covers one kilometre
        let rate = Quantity::parse("0.17 kWh/km").unwrap();
        let energy = Quantity::parse("170 Wh").unwrap();

        let numerator = rate.unit().numerator().unwrap();
        let denominator = rate.unit().denominator().unwrap().unwrap();

        let km = energy.to(&numerator).unwrap().magnitude() / rate.magnitude();
        assert!(is_close!(km, 1.0));
        assert_eq!(denominator.to_string(), "km");
    }

    #[test]
    fn test_dimensionless() {
        let unit = Unit::parse("kWh/MJ").unwrap();
        assert!(unit.is_dimensionless());
        assert!(is_close!(unit.to_base_factor().unwrap(), 3.6));
    }
}
