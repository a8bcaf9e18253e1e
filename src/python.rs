//! Python bindings
//!
//! NOTE: this module is only the interface between Rust and Python. The real
//! work happens in the other modules, and they do not use `pyo3`.

use log::debug;
use ndarray::Array1;
use numpy::{IntoPyArray, PyArray1, PyReadonlyArray1, ToPyArray};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::column::ColumnSolution;
use crate::config::ColumnConfig;
use crate::error::RadError;
use crate::planck;
use crate::rtm::LayerStack;

impl From<RadError> for PyErr {
    fn from(e: RadError) -> Self {
        match e {
            RadError::Domain { .. } => PyValueError::new_err(e.to_string()),
            RadError::InvalidProfile(_) => PyValueError::new_err(e.to_string()),
            RadError::MissingAttribute { .. } => PyValueError::new_err(e.to_string()),
            RadError::Config(_) => PyValueError::new_err(e.to_string()),
            RadError::ThreadPool(_) => PyValueError::new_err(e.to_string()),
        }
    }
}

/// Results of a column run.
///
/// This is just a container of 1d numpy arrays. The level arrays have shape
/// (`num_levels`, ) and the layer arrays (`num_levels - 1`, ).
#[pyclass]
#[derive(Debug)]
struct ColumnResult {
    solution: ColumnSolution,
}

/// Implement all the "getters" for the Python properties
#[pymethods]
impl ColumnResult {
    #[getter]
    fn temperature<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        self.solution.profile.temperature.to_pyarray(py)
    }

    #[getter]
    fn pressure<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        self.solution.profile.pressure.to_pyarray(py)
    }

    #[getter]
    fn density<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        self.solution.profile.density.to_pyarray(py)
    }

    #[getter]
    fn height<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        self.solution.profile.height.to_pyarray(py)
    }

    #[getter]
    fn tau<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        self.solution.tau.to_pyarray(py)
    }

    #[getter]
    fn up_rad<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        self.solution.radiances.up.to_pyarray(py)
    }

    #[getter]
    fn down_rad<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        self.solution.radiances.down.to_pyarray(py)
    }

    /// Heating rate in K/s at each layer midpoint
    #[getter]
    fn heating_rate<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        self.solution.heating_rate.to_pyarray(py)
    }

    #[getter]
    fn mid_height<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        self.solution.mid_height.to_pyarray(py)
    }
}

/// Blackbody radiance in W/m^2/m/sr for `wavelength` in m (shape
/// (`num_wavelengths`, )) and a `temperature` in K.
#[pyfunction]
fn blackbody_radiance<'py>(
    py: Python<'py>,
    wavelength: PyReadonlyArray1<'py, f64>,
    temperature: f64,
) -> Bound<'py, PyArray1<f64>> {
    planck::radiance_spectrum(wavelength.as_array(), temperature).into_pyarray(py)
}

/// Blackbody radiance in W/m^2/m/sr at a single `wavelength` in m for each
/// `temperature` in K (shape (`num_temperatures`, )).
#[pyfunction]
fn blackbody_radiance_profile<'py>(
    py: Python<'py>,
    wavelength: f64,
    temperature: PyReadonlyArray1<'py, f64>,
) -> Bound<'py, PyArray1<f64>> {
    planck::radiance_profile(wavelength, temperature.as_array()).into_pyarray(py)
}

/// Blackbody exitance in W/m^2/m for `wavelength` in m and a `temperature`
/// in K.
#[pyfunction]
fn blackbody_exitance<'py>(
    py: Python<'py>,
    wavelength: PyReadonlyArray1<'py, f64>,
    temperature: f64,
) -> Bound<'py, PyArray1<f64>> {
    wavelength
        .as_array()
        .mapv(|wavelength| planck::blackbody_exitance(wavelength, temperature))
        .into_pyarray(py)
}

/// Brightness temperature in K for paired `wavelength` (m) and `radiance`
/// (W/m^2/m/sr) arrays.
#[pyfunction]
fn brightness_temperature<'py>(
    py: Python<'py>,
    wavelength: PyReadonlyArray1<'py, f64>,
    radiance: PyReadonlyArray1<'py, f64>,
) -> PyResult<Bound<'py, PyArray1<f64>>> {
    let temperature =
        planck::brightness_temperature_spectrum(wavelength.as_array(), radiance.as_array())?;
    Ok(temperature.into_pyarray(py))
}

/// Radiance at the top of a layer stack in W/m^2/m/sr.
///
/// `layer_temperatures` has shape (`num_levels - 1`, ) and `level_tau` has
/// shape (`num_levels`, ) with `level_tau[0] == 0`.
#[pyfunction]
fn multi_layer_radiance(
    surface_temperature: f64,
    layer_temperatures: PyReadonlyArray1<'_, f64>,
    level_tau: PyReadonlyArray1<'_, f64>,
    wavelength: f64,
) -> PyResult<f64> {
    let radiance = crate::rtm::multi_layer_radiance(
        surface_temperature,
        layer_temperatures.as_slice()?,
        level_tau.as_slice()?,
        wavelength,
    )?;
    Ok(radiance)
}

/// Radiance at the top of a layer stack for many wavelengths.
///
/// The number of worker threads is controlled by `num_threads`. It must be a
/// positive integer, or `None` to automatically choose the number of threads.
#[pyfunction]
#[pyo3(signature = (surface_temperature, layer_temperatures, level_tau, wavelength, num_threads=None))]
fn multi_layer_spectrum<'py>(
    py: Python<'py>,
    surface_temperature: f64,
    layer_temperatures: PyReadonlyArray1<'py, f64>,
    level_tau: PyReadonlyArray1<'py, f64>,
    wavelength: PyReadonlyArray1<'py, f64>,
    num_threads: Option<usize>,
) -> PyResult<Bound<'py, PyArray1<f64>>> {
    let stack = LayerStack::new(
        surface_temperature,
        layer_temperatures.as_slice()?,
        level_tau.as_slice()?,
    )?;
    let wavelength = wavelength.as_slice()?.to_vec();
    debug!("input shapes are consistent");

    let spectrum: Array1<f64> =
        py.allow_threads(|| stack.spectrum_in_pool(&wavelength, num_threads))?;
    Ok(spectrum.into_pyarray(py))
}

/// Build a hydrostatic column and run the two-stream solver on it.
///
/// Any argument left as `None` takes the course default (see
/// `ColumnConfig`).
#[pyfunction]
#[pyo3(signature = (mixing_ratio=None, mass_absorption=None, surface_temperature=None, surface_pressure=None, lapse_rate=None, layer_thickness=None, num_levels=None))]
#[allow(clippy::too_many_arguments)]
fn solve_column(
    py: Python<'_>,
    mixing_ratio: Option<f64>,
    mass_absorption: Option<f64>,
    surface_temperature: Option<f64>,
    surface_pressure: Option<f64>,
    lapse_rate: Option<f64>,
    layer_thickness: Option<f64>,
    num_levels: Option<usize>,
) -> PyResult<ColumnResult> {
    let defaults = ColumnConfig::default();
    let config = ColumnConfig {
        mixing_ratio: mixing_ratio.unwrap_or(defaults.mixing_ratio),
        mass_absorption: mass_absorption.unwrap_or(defaults.mass_absorption),
        surface_temperature: surface_temperature.unwrap_or(defaults.surface_temperature),
        surface_pressure: surface_pressure.unwrap_or(defaults.surface_pressure),
        lapse_rate: lapse_rate.unwrap_or(defaults.lapse_rate),
        layer_thickness: layer_thickness.unwrap_or(defaults.layer_thickness),
        num_levels: num_levels.unwrap_or(defaults.num_levels),
    };

    let solution = py.allow_threads(|| config.solve())?;
    Ok(ColumnResult { solution })
}

/// A Python module implemented in Rust.
#[pymodule]
fn atmos_rad(m: &Bound<'_, PyModule>) -> PyResult<()> {
    pyo3_log::init();

    m.add_function(wrap_pyfunction!(blackbody_radiance, m)?)?;
    m.add_function(wrap_pyfunction!(blackbody_radiance_profile, m)?)?;
    m.add_function(wrap_pyfunction!(blackbody_exitance, m)?)?;
    m.add_function(wrap_pyfunction!(brightness_temperature, m)?)?;
    m.add_function(wrap_pyfunction!(multi_layer_radiance, m)?)?;
    m.add_function(wrap_pyfunction!(multi_layer_spectrum, m)?)?;
    m.add_function(wrap_pyfunction!(solve_column, m)?)?;
    m.add_class::<ColumnResult>()?;
    Ok(())
}
