//! Dimension exponents over the base quantities of impact reporting.
//!
//! Dimensions are represented as integer exponents over the base quantities
//! that appear in environmental impact reporting. Energy is tracked as a
//! single base quantity (watt-hours and joules are both energy), while the two
//! characterisation masses (CO2-equivalent and antimony-equivalent) are kept
//! apart so that a GWP value can never be converted into an ADPe value.
//!
//! # Base Dimensions
//!
//! - Energy (E)
//! - CO2-equivalent mass (G), used for global warming potential
//! - Antimony-equivalent mass (S), used for abiotic depletion potential
//! - Volume (V)
//! - Length (L)
//! - Time (T)
//!
//! Ratios such as `kJ/km` or `h/kgCO2eq` are represented as combinations of
//! these base dimensions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Mul, Neg, Sub};

/// Exponents of each base quantity.
///
/// For example:
/// - A running energy cost (`kJ/km`) has dimensions E·L⁻¹
/// - A streaming ratio (`h/kgCO2eq`) has dimensions T·G⁻¹
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Dimension {
    /// Energy exponent (E)
    pub energy: i8,
    /// CO2-equivalent mass exponent (G)
    pub emissions: i8,
    /// Antimony-equivalent mass exponent (S)
    pub depletion: i8,
    /// Volume exponent (V)
    pub volume: i8,
    /// Length exponent (L)
    pub length: i8,
    /// Time exponent (T)
    pub time: i8,
}

impl Dimension {
    /// All exponents zero.
    #[must_use]
    pub const fn dimensionless() -> Self {
        Self::new(0, 0, 0, 0, 0, 0)
    }

    #[must_use]
    pub const fn new(
        energy: i8,
        emissions: i8,
        depletion: i8,
        volume: i8,
        length: i8,
        time: i8,
    ) -> Self {
        Self {
            energy,
            emissions,
            depletion,
            volume,
            length,
            time,
        }
    }

    /// Energy dimension (E¹).
    pub const ENERGY: Self = Self::new(1, 0, 0, 0, 0, 0);

    /// CO2-equivalent mass dimension (G¹).
    pub const EMISSIONS: Self = Self::new(0, 1, 0, 0, 0, 0);

    /// Antimony-equivalent mass dimension (S¹).
    pub const DEPLETION: Self = Self::new(0, 0, 1, 0, 0, 0);

    /// Volume dimension (V¹).
    pub const VOLUME: Self = Self::new(0, 0, 0, 1, 0, 0);

    /// Distance (L¹).
    pub const LENGTH: Self = Self::new(0, 0, 0, 0, 1, 0);

    /// Time dimension (T¹).
    pub const TIME: Self = Self::new(0, 0, 0, 0, 0, 1);

    /// Energy per distance (E·L⁻¹), e.g. `kJ/km`.
    pub const ENERGY_PER_LENGTH: Self = Self::new(1, 0, 0, 0, -1, 0);

    /// Time per emissions (T·G⁻¹), e.g. `h/kgCO2eq`.
    pub const TIME_PER_EMISSIONS: Self = Self::new(0, -1, 0, 0, 0, 1);

    #[must_use]
    pub const fn is_dimensionless(&self) -> bool {
        self.is_compatible(&Self::dimensionless())
    }

    /// Quantities convert into each other only when every exponent matches.
    #[must_use]
    pub const fn is_compatible(&self, other: &Self) -> bool {
        self.energy == other.energy
            && self.emissions == other.emissions
            && self.depletion == other.depletion
            && self.volume == other.volume
            && self.length == other.length
            && self.time == other.time
    }

    /// Multiplies every exponent by `exp`.
    #[must_use]
    pub const fn pow(&self, exp: i8) -> Self {
        Self {
            energy: self.energy * exp,
            emissions: self.emissions * exp,
            depletion: self.depletion * exp,
            volume: self.volume * exp,
            length: self.length * exp,
            time: self.time * exp,
        }
    }
}

impl Mul for Dimension {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self {
            energy: self.energy + rhs.energy,
            emissions: self.emissions + rhs.emissions,
            depletion: self.depletion + rhs.depletion,
            volume: self.volume + rhs.volume,
            length: self.length + rhs.length,
            time: self.time + rhs.time,
        }
    }
}

impl Sub for Dimension {
    type Output = Self;

    /// `a - b` is the dimension of `a / b`.
    fn sub(self, rhs: Self) -> Self::Output {
        self * -rhs
    }
}

impl Neg for Dimension {
    type Output = Self;

    /// `-a` is the dimension of `1 / a`.
    fn neg(self) -> Self::Output {
        self.pow(-1)
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_dimensionless() {
            return write!(f, "dimensionless");
        }

        let symbols = [
            (self.energy, "E"),
            (self.emissions, "G"),
            (self.depletion, "S"),
            (self.volume, "V"),
            (self.length, "L"),
            (self.time, "T"),
        ];

        let parts: Vec<String> = symbols
            .iter()
            .filter(|(exp, _)| *exp != 0)
            .map(|(exp, sym)| {
                if *exp == 1 {
                    sym.to_string()
                } else {
                    format!("{sym}^{exp}")
                }
            })
            .collect();

        write!(f, "{}", parts.join(" "))
    }
}
