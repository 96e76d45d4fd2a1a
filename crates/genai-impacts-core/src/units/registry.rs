//! Unit registry with impact-reporting units and conversion factors.
//!
//! Every symbol maps to a dimension and a factor to the base unit of that
//! dimension. Registered families:
//!
//! - Energy in joules and watt-hours with SI prefixes
//! - Characterised emissions (`gCO2eq`) and depletion (`gSbeq`) masses
//! - Volume, length and time units used by equivalences
//!
//! # Factors
//!
//! A factor multiplies a magnitude in the registered unit to give the base
//! unit magnitude:
//! - Wh has factor 3600 (1 Wh = 3600 J)
//! - gCO2eq has factor 1e-3 (1 gCO2eq = 1e-3 kgCO2eq)
//! - yr has factor 31536000 (1 yr = 365 days)

use super::dimension::Dimension;
use std::collections::HashMap;
use std::sync::LazyLock;

/// A registered or prefixed unit.
#[derive(Debug, Clone)]
pub struct UnitInfo {
    /// Symbol as looked up.
    pub name: String,
    pub dimension: Dimension,
    /// Conversion factor to the base unit of the dimension.
    pub to_base_factor: f64,
    /// Optional: the unit this one is a prefixed form of (e.g. `Wh` for `kWh`).
    pub base_unit: Option<String>,
}

impl UnitInfo {
    fn new(name: &str, dimension: Dimension, to_base_factor: f64) -> Self {
        Self {
            name: name.to_string(),
            dimension,
            to_base_factor,
            base_unit: None,
        }
    }
}

/// SI prefix multipliers.
#[derive(Debug, Clone, Copy)]
pub struct SiPrefix {
    pub symbol: &'static str,
    pub factor: f64,
}

/// SI prefixes from pico to exa.
pub static SI_PREFIXES: &[SiPrefix] = &[
    SiPrefix {
        symbol: "E",
        factor: 1e18,
    },
    SiPrefix {
        symbol: "P",
        factor: 1e15,
    },
    SiPrefix {
        symbol: "T",
        factor: 1e12,
    },
    SiPrefix {
        symbol: "G",
        factor: 1e9,
    },
    SiPrefix {
        symbol: "M",
        factor: 1e6,
    },
    SiPrefix {
        symbol: "k",
        factor: 1e3,
    },
    SiPrefix {
        symbol: "c",
        factor: 1e-2,
    },
    SiPrefix {
        symbol: "m",
        factor: 1e-3,
    },
    // micro sign (U+00B5), greek mu (U+03BC) and ascii 'u'
    SiPrefix {
        symbol: "µ",
        factor: 1e-6,
    },
    SiPrefix {
        symbol: "μ",
        factor: 1e-6,
    },
    SiPrefix {
        symbol: "u",
        factor: 1e-6,
    },
    SiPrefix {
        symbol: "n",
        factor: 1e-9,
    },
    SiPrefix {
        symbol: "p",
        factor: 1e-12,
    },
];

/// Joules per watt-hour.
pub const JOULES_PER_WATT_HOUR: f64 = 3600.0;
/// Seconds per year (365 days, matching the adoption scaling convention).
pub const SECONDS_PER_YEAR: f64 = 365.0 * SECONDS_PER_DAY;
/// Seconds per day.
pub const SECONDS_PER_DAY: f64 = 24.0 * SECONDS_PER_HOUR;
/// Seconds per hour.
pub const SECONDS_PER_HOUR: f64 = 3600.0;
/// Seconds per minute.
pub const SECONDS_PER_MINUTE: f64 = 60.0;

/// The global unit registry.
pub static UNIT_REGISTRY: LazyLock<UnitRegistry> = LazyLock::new(UnitRegistry::new);

/// Symbol table behind unit parsing.
#[derive(Debug)]
pub struct UnitRegistry {
    units: HashMap<&'static str, UnitInfo>,
    /// Spelled-out names (`hours`, `litre`) to registered symbols.
    aliases: HashMap<&'static str, &'static str>,
}

impl Default for UnitRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl UnitRegistry {
    /// Creates a new unit registry populated with the supported units.
    pub fn new() -> Self {
        let mut registry = Self {
            units: HashMap::new(),
            aliases: HashMap::new(),
        };
        registry.register_energy_units();
        registry.register_characterisation_units();
        registry.register_volume_units();
        registry.register_length_units();
        registry.register_time_units();
        registry.insert("1", Dimension::dimensionless(), 1.0);
        registry
    }

    /// Looks up a unit by symbol, handling prefixes and aliases.
    pub fn lookup(&self, symbol: &str) -> Option<UnitInfo> {
        if let Some(info) = self.units.get(symbol) {
            return Some(info.clone());
        }

        if let Some(&canonical) = self.aliases.get(symbol) {
            if let Some(info) = self.units.get(canonical) {
                return Some(info.clone());
            }
        }

        self.lookup_prefixed(symbol)
    }

    /// Attempts to parse a symbol as a prefixed version of a registered unit.
    fn lookup_prefixed(&self, symbol: &str) -> Option<UnitInfo> {
        SI_PREFIXES.iter().find_map(|prefix| {
            let base_symbol = symbol.strip_prefix(prefix.symbol)?;
            let canonical = match self.units.get(base_symbol) {
                Some(_) => base_symbol,
                None => self.aliases.get(base_symbol).copied()?,
            };
            let base_info = self.units.get(canonical)?;
            Some(UnitInfo {
                name: symbol.to_string(),
                dimension: base_info.dimension,
                to_base_factor: base_info.to_base_factor * prefix.factor,
                base_unit: Some(base_info.name.clone()),
            })
        })
    }

    fn insert(&mut self, symbol: &'static str, dimension: Dimension, factor: f64) {
        self.units
            .insert(symbol, UnitInfo::new(symbol, dimension, factor));
    }

    /// Registers energy units (base: joule).
    fn register_energy_units(&mut self) {
        self.insert("J", Dimension::ENERGY, 1.0);
        self.insert("Wh", Dimension::ENERGY, JOULES_PER_WATT_HOUR);

        self.aliases.insert("joule", "J");
        self.aliases.insert("joules", "J");
    }

    /// Registers characterised masses (base: kgCO2eq and kgSbeq).
    ///
    /// The gram forms are registered so that SI prefixes apply naturally:
    /// `kgCO2eq` resolves as `k` + `gCO2eq`.
    fn register_characterisation_units(&mut self) {
        self.insert("gCO2eq", Dimension::EMISSIONS, 1e-3);
        self.insert("tCO2eq", Dimension::EMISSIONS, 1e3);

        self.insert("gSbeq", Dimension::DEPLETION, 1e-3);
    }

    /// Registers volume units (base: litre).
    fn register_volume_units(&mut self) {
        self.insert("L", Dimension::VOLUME, 1.0);
        self.insert("m3", Dimension::VOLUME, 1e3);

        self.aliases.insert("l", "L");
        self.aliases.insert("liter", "L");
        self.aliases.insert("litre", "L");
        self.aliases.insert("liters", "L");
        self.aliases.insert("litres", "L");
    }

    /// Registers length units (base: metre).
    fn register_length_units(&mut self) {
        self.insert("m", Dimension::LENGTH, 1.0);

        self.aliases.insert("meter", "m");
        self.aliases.insert("meters", "m");
        self.aliases.insert("metre", "m");
        self.aliases.insert("metres", "m");
    }

    /// Registers time units (base: second).
    fn register_time_units(&mut self) {
        self.insert("s", Dimension::TIME, 1.0);
        self.insert("min", Dimension::TIME, SECONDS_PER_MINUTE);
        self.insert("h", Dimension::TIME, SECONDS_PER_HOUR);
        self.insert("day", Dimension::TIME, SECONDS_PER_DAY);
        self.insert("yr", Dimension::TIME, SECONDS_PER_YEAR);

        self.aliases.insert("sec", "s");
        self.aliases.insert("second", "s");
        self.aliases.insert("seconds", "s");
        self.aliases.insert("minute", "min");
        self.aliases.insert("minutes", "min");
        self.aliases.insert("hour", "h");
        self.aliases.insert("hours", "h");
        self.aliases.insert("days", "day");
        self.aliases.insert("year", "yr");
        self.aliases.insert("years", "yr");
    }
}
