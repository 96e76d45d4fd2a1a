//! Python bindings for the dashboard.
//!
//! ```python
//! from genai_impacts._lib import Quantity, format_energy, equivalence_physical_activity
//!
//! energy = format_energy(0.05)  # 50 Wh
//! activity, distance = equivalence_physical_activity(energy)
//! ```
//!
//! Structured results (formatted impact bundles, scenarios, model records) are
//! returned as plain Python dictionaries and lists.

use crate::catalog::{self, LatencyEstimator, ModelCatalog};
use genai_impacts_core::{
    equivalences, formatting, EquivalenceEngine, EquivalenceParameters, ImpactResult, Impacts,
    Quantity,
};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pythonize::{depythonize_bound, pythonize};
use std::fmt::Display;

fn value_error(e: impl Display) -> PyErr {
    PyValueError::new_err(e.to_string())
}

/// A magnitude tagged with a unit.
///
/// Parameters
/// ----------
/// magnitude : float
///     The numeric value.
/// unit : str
///     The unit symbol, e.g. ``"kWh"`` or ``"kJ/km"``.
///
/// Raises
/// ------
/// ValueError
///     If the unit is unknown.
#[pyclass(name = "Quantity")]
#[derive(Clone)]
pub struct PyQuantity {
    inner: Quantity,
}

impl From<Quantity> for PyQuantity {
    fn from(inner: Quantity) -> Self {
        Self { inner }
    }
}

#[pymethods]
impl PyQuantity {
    #[new]
    fn new(magnitude: f64, unit: &str) -> PyResult<Self> {
        let inner = Quantity::with_symbol(magnitude, unit).map_err(value_error)?;
        Ok(Self { inner })
    }

    /// Parse a quantity written as ``"<magnitude> <unit>"``.
    ///
    /// >>> Quantity.parse("294 kJ/km").unit
    /// 'kJ / km'
    #[staticmethod]
    fn parse(input: &str) -> PyResult<Self> {
        Quantity::parse(input).map(Self::from).map_err(value_error)
    }

    #[getter]
    fn magnitude(&self) -> f64 {
        self.inner.magnitude()
    }

    #[getter]
    fn unit(&self) -> String {
        self.inner.unit().to_string()
    }

    /// Convert to another unit of the same dimension.
    ///
    /// Raises
    /// ------
    /// ValueError
    ///     If the units are incompatible.
    fn to(&self, unit: &str) -> PyResult<Self> {
        self.inner
            .to_symbol(unit)
            .map(Self::from)
            .map_err(value_error)
    }

    fn __str__(&self) -> String {
        self.inner.to_string()
    }

    fn __repr__(&self) -> String {
        format!("Quantity({}, '{}')", self.inner.magnitude(), self.inner.unit())
    }

    fn __eq__(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

/// Equivalence engine with custom parameters.
#[pyclass(name = "EquivalenceEngine")]
pub struct PyEquivalenceEngine {
    inner: EquivalenceEngine,
}

#[pymethods]
impl PyEquivalenceEngine {
    #[new]
    fn new() -> Self {
        Self {
            inner: EquivalenceEngine::default(),
        }
    }

    /// Load parameters from a TOML file; missing fields keep their defaults.
    #[staticmethod]
    fn from_path(path: &str) -> PyResult<Self> {
        let parameters = EquivalenceParameters::from_path(path).map_err(value_error)?;
        let inner = EquivalenceEngine::new(parameters).map_err(value_error)?;
        Ok(Self { inner })
    }

    fn physical_activity(&self, energy: &PyQuantity) -> PyResult<(String, PyQuantity)> {
        let (activity, distance) = self
            .inner
            .physical_activity(&energy.inner)
            .map_err(value_error)?;
        Ok((activity.as_str().to_string(), distance.into()))
    }

    fn electric_vehicle(&self, energy: &PyQuantity) -> PyResult<PyQuantity> {
        self.inner
            .electric_vehicle(&energy.inner)
            .map(PyQuantity::from)
            .map_err(value_error)
    }

    fn streaming(&self, gwp: &PyQuantity) -> PyResult<PyQuantity> {
        self.inner
            .streaming(&gwp.inner)
            .map(PyQuantity::from)
            .map_err(value_error)
    }

    fn electricity_production(&self, energy: &PyQuantity) -> PyResult<(String, f64)> {
        let (kind, count) = self
            .inner
            .electricity_production(&energy.inner)
            .map_err(value_error)?;
        Ok((kind.as_str().to_string(), count))
    }

    fn country_multiple(&self, energy: &PyQuantity) -> PyResult<f64> {
        self.inner.country_multiple(&energy.inner).map_err(value_error)
    }

    fn flight(&self, gwp: &PyQuantity) -> PyResult<f64> {
        self.inner.flight(&gwp.inner).map_err(value_error)
    }
}

fn to_py(result: ImpactResult<Quantity>) -> PyResult<PyQuantity> {
    result.map(PyQuantity::from).map_err(value_error)
}

/// Format an energy in kWh into its most readable unit.
#[pyfunction]
fn format_energy(value: f64) -> PyResult<PyQuantity> {
    to_py(formatting::format_energy(value))
}

/// Format emissions in kgCO2eq into their most readable unit.
#[pyfunction]
fn format_gwp(value: f64) -> PyResult<PyQuantity> {
    to_py(formatting::format_gwp(value))
}

#[pyfunction]
fn format_adpe(value: f64) -> PyResult<PyQuantity> {
    to_py(formatting::format_adpe(value))
}

#[pyfunction]
fn format_pe(value: f64) -> PyResult<PyQuantity> {
    to_py(formatting::format_pe(value))
}

#[pyfunction]
fn format_wcf(value: f64) -> PyResult<PyQuantity> {
    to_py(formatting::format_wcf(value))
}

/// Format a whole impact bundle.
///
/// Parameters
/// ----------
/// impacts : dict
///     ``energy``, ``gwp``, ``adpe``, ``pe`` and ``wcf`` as floats or
///     ``{"min", "mean", "max"}`` dicts, with optional ``usage`` and
///     ``embodied`` breakdowns.
///
/// Returns
/// -------
/// tuple[dict, dict, dict]
///     The formatted impacts, and the usage and embodied breakdowns unchanged.
#[pyfunction]
fn format_impacts(
    py: Python<'_>,
    impacts: Bound<'_, PyAny>,
) -> PyResult<(PyObject, PyObject, PyObject)> {
    let impacts: Impacts = depythonize_bound(impacts).map_err(value_error)?;
    let (formatted, usage, embodied) =
        formatting::format_impacts(impacts).map_err(value_error)?;
    Ok((
        pythonize(py, &formatted)?,
        pythonize(py, &usage)?,
        pythonize(py, &embodied)?,
    ))
}

#[pyfunction]
fn equivalence_physical_activity(energy: &PyQuantity) -> PyResult<(String, PyQuantity)> {
    let (activity, distance) =
        equivalences::equivalence_physical_activity(&energy.inner).map_err(value_error)?;
    Ok((activity.as_str().to_string(), distance.into()))
}

#[pyfunction]
fn equivalence_electric_vehicle(energy: &PyQuantity) -> PyResult<PyQuantity> {
    equivalences::equivalence_electric_vehicle(&energy.inner)
        .map(PyQuantity::from)
        .map_err(value_error)
}

#[pyfunction]
fn equivalence_streaming(gwp: &PyQuantity) -> PyResult<PyQuantity> {
    equivalences::equivalence_streaming(&gwp.inner)
        .map(PyQuantity::from)
        .map_err(value_error)
}

#[pyfunction]
fn equivalence_electricity_production(energy: &PyQuantity) -> PyResult<(String, f64)> {
    let (kind, count) =
        equivalences::equivalence_electricity_production(&energy.inner).map_err(value_error)?;
    Ok((kind.as_str().to_string(), count))
}

#[pyfunction]
fn equivalence_country_multiple(energy: &PyQuantity) -> PyResult<f64> {
    equivalences::equivalence_country_multiple(&energy.inner).map_err(value_error)
}

#[pyfunction]
fn equivalence_flight(gwp: &PyQuantity) -> PyResult<f64> {
    equivalences::equivalence_flight(&gwp.inner).map_err(value_error)
}

/// Prompt scenarios as ``(label, output_tokens)`` pairs.
#[pyfunction]
fn scenarios() -> Vec<(String, u32)> {
    catalog::SCENARIOS
        .iter()
        .map(|s| (s.label(), s.output_tokens))
        .collect()
}

#[pyfunction]
fn country_name(code: &str) -> Option<String> {
    catalog::country_name(code)
}

#[pyfunction]
fn electricity_mix_criterion(criterion: &str) -> Option<&'static str> {
    catalog::criterion_label(criterion)
}

/// Load the model catalogue as a list of dicts.
#[pyfunction]
#[pyo3(signature = (path, main_only=true))]
fn load_models(py: Python<'_>, path: &str, main_only: bool) -> PyResult<PyObject> {
    let catalog = ModelCatalog::from_path(path, main_only).map_err(value_error)?;
    Ok(pythonize(py, &catalog.models())?)
}

/// Generation latency estimates from a throughput table.
#[pyclass(name = "LatencyEstimator")]
pub struct PyLatencyEstimator {
    inner: LatencyEstimator,
}

#[pymethods]
impl PyLatencyEstimator {
    #[new]
    fn new(path: &str) -> PyResult<Self> {
        let inner = LatencyEstimator::from_path(path).map_err(value_error)?;
        Ok(Self { inner })
    }

    fn get_throughput(&self, provider: &str, model_name: &str) -> f64 {
        self.inner.throughput(provider, model_name)
    }

    /// Estimated generation time in seconds.
    #[pyo3(signature = (provider, model_name, output_tokens, throughput=None))]
    fn estimate(
        &self,
        provider: &str,
        model_name: &str,
        output_tokens: u32,
        throughput: Option<f64>,
    ) -> PyResult<f64> {
        self.inner
            .estimate(provider, model_name, output_tokens, throughput)
            .map_err(value_error)
    }
}

#[pymodule]
#[pyo3(name = "_lib")]
fn genai_impacts(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    m.add_class::<PyQuantity>()?;
    m.add_class::<PyEquivalenceEngine>()?;
    m.add_class::<PyLatencyEstimator>()?;

    m.add_function(wrap_pyfunction!(format_energy, m)?)?;
    m.add_function(wrap_pyfunction!(format_gwp, m)?)?;
    m.add_function(wrap_pyfunction!(format_adpe, m)?)?;
    m.add_function(wrap_pyfunction!(format_pe, m)?)?;
    m.add_function(wrap_pyfunction!(format_wcf, m)?)?;
    m.add_function(wrap_pyfunction!(format_impacts, m)?)?;

    m.add_function(wrap_pyfunction!(equivalence_physical_activity, m)?)?;
    m.add_function(wrap_pyfunction!(equivalence_electric_vehicle, m)?)?;
    m.add_function(wrap_pyfunction!(equivalence_streaming, m)?)?;
    m.add_function(wrap_pyfunction!(equivalence_electricity_production, m)?)?;
    m.add_function(wrap_pyfunction!(equivalence_country_multiple, m)?)?;
    m.add_function(wrap_pyfunction!(equivalence_flight, m)?)?;

    m.add_function(wrap_pyfunction!(scenarios, m)?)?;
    m.add_function(wrap_pyfunction!(country_name, m)?)?;
    m.add_function(wrap_pyfunction!(electricity_mix_criterion, m)?)?;
    m.add_function(wrap_pyfunction!(load_models, m)?)?;
    Ok(())
}
