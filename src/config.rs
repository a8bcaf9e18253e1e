//! Configuration for a column run.

use serde::{Deserialize, Serialize};

use crate::column::ColumnSolution;
use crate::error::RadResult;

/// Inputs for [`ColumnSolution::compute`].
///
/// Defaults reproduce the course heating-rate exercise: a 15 km column of 1 m
/// layers with a single well-mixed absorber. Any field left out of a TOML
/// document keeps its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnConfig {
    /// Absorbing gas mixing ratio (kg/kg).
    /// Default: 0.01
    pub mixing_ratio: f64,

    /// Mass absorption coefficient of the gas (m²/kg).
    /// Default: 0.01
    pub mass_absorption: f64,

    /// Surface (and lowest level) temperature (K).
    /// Default: 300.0
    pub surface_temperature: f64,

    /// Surface pressure (Pa).
    /// Default: 100e3
    pub surface_pressure: f64,

    /// Rate of temperature change with height (K/m).
    /// Default: -7e-3
    pub lapse_rate: f64,

    /// Thickness of every layer (m).
    /// Default: 1.0
    pub layer_thickness: f64,

    /// Number of levels, including the surface.
    /// Default: 15000
    pub num_levels: usize,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            mixing_ratio: 0.01,
            mass_absorption: 0.01,
            surface_temperature: 300.0,
            surface_pressure: 100e3,
            lapse_rate: -7e-3,
            layer_thickness: 1.0,
            num_levels: 15_000,
        }
    }
}

impl ColumnConfig {
    /// Parse a configuration from a TOML document.
    pub fn from_toml_str(document: &str) -> RadResult<Self> {
        Ok(toml::from_str(document)?)
    }

    /// Run the column with this configuration.
    pub fn solve(&self) -> RadResult<ColumnSolution> {
        ColumnSolution::compute(self)
    }
}
