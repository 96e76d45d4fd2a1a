//! Unit Formatter
//!
//! Rescales raw impact magnitudes into the most readable unit of their
//! criterion.
//!
//! # Algorithm
//!
//! Each criterion owns a [`Ladder`] of units ordered from largest to smallest:
//!
//! | Criterion | Ladder |
//! |-----------|--------|
//! | Energy | kWh → Wh → mWh |
//! | GWP | kgCO2eq → gCO2eq → mgCO2eq |
//! | ADPe | kgSbeq → gSbeq → mgSbeq → µgSbeq |
//! | PE | MJ → kJ |
//! | WCF | L → mL |
//!
//! Formatting starts at the largest unit and steps down while the magnitude is
//! below 1 and a smaller unit exists. A magnitude of exactly zero stays at the
//! largest unit.
//!
//! For a range the display unit is chosen from the mean alone; `min` and `max`
//! are converted into that unit so all three stay comparable.

use crate::errors::{ImpactError, ImpactResult};
use crate::estimate::{Criterion, Estimate, ImpactBreakdown, Impacts};
use crate::units::{Quantity, Unit};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::LazyLock;
use tracing::debug;

/// An ordered list of display units, largest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Ladder {
    symbols: Vec<String>,
    units: Vec<Unit>,
}

impl Ladder {
    /// Creates a ladder after checking that every step is a known unit of the
    /// same dimension and that units strictly decrease in size.
    pub fn new<S: AsRef<str>>(symbols: &[S]) -> ImpactResult<Self> {
        let ladder = Self::parse(symbols)?;

        let first = ladder.units.first().ok_or_else(|| ImpactError::InvalidParameter {
            name: "ladder".to_string(),
            reason: "a ladder needs at least one unit".to_string(),
        })?;
        for pair in ladder.units.windows(2) {
            // Incompatible steps surface as a unit mismatch
            let factor = pair[0].conversion_factor(&pair[1])?;
            if factor <= 1.0 {
                return Err(ImpactError::InvalidParameter {
                    name: "ladder".to_string(),
                    reason: format!("'{}' is not larger than '{}'", pair[0], pair[1]),
                });
            }
        }
        debug!(largest = %first, steps = ladder.units.len(), "validated unit ladder");
        Ok(ladder)
    }

    fn parse<S: AsRef<str>>(symbols: &[S]) -> ImpactResult<Self> {
        let symbols: Vec<String> = symbols.iter().map(|s| s.as_ref().to_string()).collect();
        let units = symbols
            .iter()
            .map(|s| Unit::parse(s).map_err(ImpactError::from))
            .collect::<ImpactResult<Vec<_>>>()?;
        Ok(Self { symbols, units })
    }

    /// Ladders built from symbols known to the registry.
    ///
    /// Built-in ladders are covered by `test_default_ladders_are_valid` and
    /// `test_display_ladders_are_valid`.
    pub(crate) fn from_static<S: AsRef<str>>(symbols: &[S]) -> Self {
        Self::parse(symbols).unwrap_or_else(|e| panic!("invalid built-in ladder: {e}"))
    }

    /// The ladder's unit symbols, largest first.
    #[must_use]
    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    /// The ladder's units, largest first.
    #[must_use]
    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    /// Expresses `quantity` in the most readable unit of this ladder.
    ///
    /// The step-down test uses the absolute magnitude so that signed values
    /// are placed symmetrically; impact magnitudes are never negative.
    pub fn rescale(&self, quantity: &Quantity) -> ImpactResult<Quantity> {
        let (largest, smaller) = self.units.split_first().ok_or_else(|| {
            ImpactError::InvalidParameter {
                name: "ladder".to_string(),
                reason: "empty ladder".to_string(),
            }
        })?;

        let mut current = quantity.to(largest)?;
        if current.magnitude() == 0.0 {
            // Also clears the sign of -0
            return Ok(Quantity::new(0.0, largest.clone()));
        }
        for unit in smaller {
            if current.magnitude().abs() >= 1.0 {
                break;
            }
            current = quantity.to(unit)?;
        }
        if current.unit() != largest {
            debug!(from = %quantity, to = %current, "stepped down display unit");
        }
        Ok(current)
    }
}

impl TryFrom<Vec<String>> for Ladder {
    type Error = ImpactError;

    fn try_from(value: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<Ladder> for Vec<String> {
    fn from(ladder: Ladder) -> Self {
        ladder.symbols
    }
}

/// Mapping from criterion to its display ladder.
///
/// The default table holds the standard ladders; callers can replace any of
/// them with [`ConversionTable::with_ladder`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionTable {
    ladders: BTreeMap<Criterion, Ladder>,
}

impl Default for ConversionTable {
    fn default() -> Self {
        let ladders = [
            (Criterion::Energy, &["kWh", "Wh", "mWh"][..]),
            (Criterion::Gwp, &["kgCO2eq", "gCO2eq", "mgCO2eq"][..]),
            (Criterion::Adpe, &["kgSbeq", "gSbeq", "mgSbeq", "µgSbeq"][..]),
            (Criterion::Pe, &["MJ", "kJ"][..]),
            (Criterion::Wcf, &["L", "mL"][..]),
        ]
        .into_iter()
        .map(|(criterion, symbols)| (criterion, Ladder::from_static(symbols)))
        .collect();
        Self { ladders }
    }
}

impl ConversionTable {
    /// Replaces the ladder used for `criterion`.
    ///
    /// Fails if the ladder's units do not measure the criterion's dimension.
    pub fn with_ladder(mut self, criterion: Criterion, ladder: Ladder) -> ImpactResult<Self> {
        let base = Unit::parse(criterion.base_unit())?;
        for unit in ladder.units() {
            base.conversion_factor(unit)?;
        }
        self.ladders.insert(criterion, ladder);
        Ok(self)
    }

    pub fn ladder(&self, criterion: Criterion) -> ImpactResult<&Ladder> {
        self.ladders
            .get(&criterion)
            .ok_or_else(|| ImpactError::UnsupportedDimension(criterion.to_string()))
    }
}

/// A formatted estimate: a single quantity or a range sharing one unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FormattedEstimate {
    Point {
        value: Quantity,
    },
    Range {
        min: Quantity,
        mean: Quantity,
        max: Quantity,
    },
}

impl FormattedEstimate {
    /// The value to display prominently: the point or the range mean.
    #[must_use]
    pub fn central(&self) -> &Quantity {
        match self {
            FormattedEstimate::Point { value } => value,
            FormattedEstimate::Range { mean, .. } => mean,
        }
    }

    #[must_use]
    pub fn unit(&self) -> &Unit {
        self.central().unit()
    }

    /// `(min, max)` for a range, `None` for a point.
    #[must_use]
    pub fn bounds(&self) -> Option<(&Quantity, &Quantity)> {
        match self {
            FormattedEstimate::Point { .. } => None,
            FormattedEstimate::Range { min, max, .. } => Some((min, max)),
        }
    }
}

/// Display-ready impacts of one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattedImpacts {
    pub energy: FormattedEstimate,
    pub gwp: FormattedEstimate,
    pub adpe: FormattedEstimate,
    pub pe: FormattedEstimate,
    pub wcf: FormattedEstimate,
    /// True when every criterion carries `min`/`max` bounds.
    pub ranges: bool,
}

impl FormattedImpacts {
    #[must_use]
    pub fn get(&self, criterion: Criterion) -> &FormattedEstimate {
        match criterion {
            Criterion::Energy => &self.energy,
            Criterion::Gwp => &self.gwp,
            Criterion::Adpe => &self.adpe,
            Criterion::Pe => &self.pe,
            Criterion::Wcf => &self.wcf,
        }
    }

    /// Returns one criterion of `self` and `other`, both in `self`'s unit.
    ///
    /// Used to compare two models side by side on the same scale.
    pub fn compare(
        &self,
        other: &FormattedImpacts,
        criterion: Criterion,
    ) -> ImpactResult<(Quantity, Quantity)> {
        let left = self.get(criterion).central().clone();
        let right = other.get(criterion).central().to(left.unit())?;
        Ok((left, right))
    }
}

/// Formats impact magnitudes using a [`ConversionTable`].
#[derive(Debug, Clone, Default)]
pub struct UnitFormatter {
    table: ConversionTable,
}

impl UnitFormatter {
    pub fn new(table: ConversionTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &ConversionTable {
        &self.table
    }

    /// Formats a raw magnitude given in the criterion's base unit.
    pub fn format(&self, criterion: Criterion, value: f64) -> ImpactResult<Quantity> {
        let quantity = Quantity::with_symbol(value, criterion.base_unit())?;
        self.format_quantity(criterion, &quantity)
    }

    /// Formats a quantity already tagged with a unit of the criterion's
    /// dimension. Formatting a formatted quantity again is a no-op.
    pub fn format_quantity(
        &self,
        criterion: Criterion,
        quantity: &Quantity,
    ) -> ImpactResult<Quantity> {
        check_magnitude(criterion, quantity.magnitude())?;
        let dimension = quantity.dimension()?;
        if dimension != criterion.dimension() {
            return Err(ImpactError::UnitMismatch {
                from: quantity.unit().to_string(),
                to: criterion.base_unit().to_string(),
            });
        }
        self.table.ladder(criterion)?.rescale(quantity)
    }

    /// Formats a point or range estimate given in the criterion's base unit.
    pub fn format_estimate(
        &self,
        criterion: Criterion,
        estimate: &Estimate,
    ) -> ImpactResult<FormattedEstimate> {
        match estimate {
            Estimate::Point(value) => Ok(FormattedEstimate::Point {
                value: self.format(criterion, *value)?,
            }),
            Estimate::Range(range) => {
                let mean = self.format(criterion, range.mean())?;
                let in_display_unit = |value: f64| -> ImpactResult<Quantity> {
                    check_magnitude(criterion, value)?;
                    Ok(Quantity::with_symbol(value + 0.0, criterion.base_unit())?.to(mean.unit())?)
                };
                Ok(FormattedEstimate::Range {
                    min: in_display_unit(range.min())?,
                    max: in_display_unit(range.max())?,
                    mean,
                })
            }
        }
    }

    /// Formats all five criteria of a bundle.
    ///
    /// The usage and embodied breakdowns are returned unchanged. A bundle
    /// mixing point and range estimates is rejected.
    pub fn format_impacts(
        &self,
        impacts: Impacts,
    ) -> ImpactResult<(FormattedImpacts, ImpactBreakdown, ImpactBreakdown)> {
        let ranges = Criterion::ALL
            .iter()
            .filter(|c| impacts.get(**c).is_range())
            .count();
        if ranges != 0 && ranges != Criterion::ALL.len() {
            return Err(ImpactError::MixedEstimates {
                points: Criterion::ALL.len() - ranges,
                ranges,
            });
        }

        let formatted = FormattedImpacts {
            energy: self.format_estimate(Criterion::Energy, &impacts.energy)?,
            gwp: self.format_estimate(Criterion::Gwp, &impacts.gwp)?,
            adpe: self.format_estimate(Criterion::Adpe, &impacts.adpe)?,
            pe: self.format_estimate(Criterion::Pe, &impacts.pe)?,
            wcf: self.format_estimate(Criterion::Wcf, &impacts.wcf)?,
            ranges: ranges != 0,
        };
        debug!(
            ranges = formatted.ranges,
            energy = %formatted.energy.central(),
            gwp = %formatted.gwp.central(),
            "formatted impacts"
        );
        Ok((formatted, impacts.usage, impacts.embodied))
    }
}

fn check_magnitude(criterion: Criterion, value: f64) -> ImpactResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ImpactError::InvalidMagnitude {
            criterion: criterion.to_string(),
            value,
        })
    }
}

static DEFAULT_FORMATTER: LazyLock<UnitFormatter> = LazyLock::new(UnitFormatter::default);

/// Formats an energy value given in kWh.
pub fn format_energy(value: f64) -> ImpactResult<Quantity> {
    DEFAULT_FORMATTER.format(Criterion::Energy, value)
}

/// Formats a global warming potential given in kgCO2eq.
pub fn format_gwp(value: f64) -> ImpactResult<Quantity> {
    DEFAULT_FORMATTER.format(Criterion::Gwp, value)
}

/// Formats an abiotic depletion potential given in kgSbeq.
pub fn format_adpe(value: f64) -> ImpactResult<Quantity> {
    DEFAULT_FORMATTER.format(Criterion::Adpe, value)
}

/// Formats a primary energy value given in MJ.
pub fn format_pe(value: f64) -> ImpactResult<Quantity> {
    DEFAULT_FORMATTER.format(Criterion::Pe, value)
}

/// Formats a water consumption footprint given in L.
pub fn format_wcf(value: f64) -> ImpactResult<Quantity> {
    DEFAULT_FORMATTER.format(Criterion::Wcf, value)
}

/// Formats a whole impact bundle with the standard ladders.
pub fn format_impacts(
    impacts: Impacts,
) -> ImpactResult<(FormattedImpacts, ImpactBreakdown, ImpactBreakdown)> {
    DEFAULT_FORMATTER.format_impacts(impacts)
}
