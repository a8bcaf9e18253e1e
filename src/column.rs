//! A didactic two-stream radiative transfer column.
//!
//! The column is a synthetic hydrostatic atmosphere with a single well-mixed
//! gray absorber. Broadband radiance is carried up and down through it one
//! layer at a time, and the divergence of the net radiance gives a heating
//! rate. Every step is first order (explicit Euler, sourced from one end of
//! the layer), which is a known approximation kept so results line up with
//! the course notebooks.
//!
//! Arithmetic problems such as a zero density are not caught and show up as
//! Inf or NaN in the outputs.

mod heating;
mod hydrostatic;
mod two_stream;

pub use heating::{heating_rate, mid_heights};
pub use hydrostatic::{build_hydrostatic_profile, column_optical_depth, AtmosphereProfile};
pub use two_stream::{two_stream_radiances, TwoStreamRadiances};

use crate::config::ColumnConfig;
use crate::error::{ProfileError, RadResult};
use log::info;
use ndarray::Array1;

/// Gas constant for dry air (J/kg/K)
pub const R_DRY: f64 = 287.0;
/// Gravitational acceleration (m/s²)
pub const GRAVITY: f64 = 9.8;
/// Heat capacity of dry air at constant pressure (J/kg/K)
pub const CP_DRY: f64 = 1004.0;
/// Stefan-Boltzmann constant per steradian, `σ/π` (W/m²/sr/K⁴)
pub const SIGMA_PI: f64 = 5.67e-8 / std::f64::consts::PI;
/// Seconds in an hour, for converting heating rates from K/s to K/hr
pub const SECONDS_PER_HOUR: f64 = 3600.0;

/// Everything computed for one column run.
#[derive(Debug, Clone)]
pub struct ColumnSolution {
    /// Hydrostatic temperature, pressure, density, and height at each level.
    pub profile: AtmosphereProfile,
    /// Optical depth at each level, 0 at the surface.
    pub tau: Array1<f64>,
    /// Upward and downward broadband radiance at each level.
    pub radiances: TwoStreamRadiances,
    /// Heating rate in K/s for each layer.
    pub heating_rate: Array1<f64>,
    /// Height in m of each layer midpoint, aligned with `heating_rate`.
    pub mid_height: Array1<f64>,
}

impl ColumnSolution {
    /// Build the profile and run the two-stream solver on it.
    pub fn compute(config: &ColumnConfig) -> RadResult<Self> {
        info!(
            "Solving column with {} levels of {} m",
            config.num_levels, config.layer_thickness
        );

        let profile = build_hydrostatic_profile(
            config.surface_temperature,
            config.surface_pressure,
            config.lapse_rate,
            config.layer_thickness,
            config.num_levels,
        )?;
        let tau = column_optical_depth(
            config.mixing_ratio,
            config.mass_absorption,
            profile.density.view(),
            profile.height.view(),
        )?;
        let radiances = two_stream_radiances(
            tau.view(),
            profile.temperature.view(),
            profile.height.view(),
            config.surface_temperature,
        )?;
        let heating_rate = heating_rate(
            radiances.net_upward().view(),
            profile.height.view(),
            profile.density.view(),
        )?;
        let mid_height = mid_heights(profile.height.view());

        info!("Column optical depth is {:.4}", tau[tau.len() - 1]);

        Ok(Self {
            profile,
            tau,
            radiances,
            heating_rate,
            mid_height,
        })
    }

    /// Heating rate in K/hr.
    pub fn heating_rate_per_hour(&self) -> Array1<f64> {
        &self.heating_rate * SECONDS_PER_HOUR
    }
}

/// Check that level-aligned sequences all have the same, non-zero, length.
///
/// The first entry sets the expected length, which is returned.
fn aligned_levels(lengths: &[(&'static str, usize)]) -> Result<usize, ProfileError> {
    let num_levels = lengths.first().map_or(0, |&(_, len)| len);
    if num_levels == 0 {
        return Err(ProfileError::TooFewLevels {
            minimum: 1,
            actual: 0,
        });
    }
    match lengths.iter().find(|&&(_, len)| len != num_levels) {
        Some(&(what, actual)) => Err(ProfileError::LengthMismatch {
            what,
            expected: num_levels,
            actual,
        }),
        None => Ok(num_levels),
    }
}
