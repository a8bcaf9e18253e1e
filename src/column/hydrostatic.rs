//! Hydrostatic atmosphere and its optical depth.

use super::{aligned_levels, GRAVITY, R_DRY};
use crate::error::{ProfileError, RadResult};
use log::debug;
use ndarray::{Array1, ArrayView1};

/// Level-aligned state of a hydrostatic atmosphere, built from the surface up.
#[derive(Debug, Clone, PartialEq)]
pub struct AtmosphereProfile {
    /// Temperature in K.
    pub temperature: Array1<f64>,
    /// Pressure in Pa.
    pub pressure: Array1<f64>,
    /// Air density in kg/m³.
    pub density: Array1<f64>,
    /// Height above the surface in m, starting at 0.
    pub height: Array1<f64>,
}

impl AtmosphereProfile {
    /// Number of levels, including the surface.
    pub fn num_levels(&self) -> usize {
        self.height.len()
    }
}

/// Integrate the hydrostatic equation upward from the surface.
///
/// Starting from `surface_temperature` (K) and `surface_pressure` (Pa) at
/// height 0, march up `num_levels - 1` layers of constant `layer_thickness`
/// (m) with a constant `lapse_rate` (K/m, negative when temperature falls
/// with height). Each step is explicit Euler using the lower level's density:
///
/// ```text
/// T[i+1] = T[i] + lapse_rate * dz
/// rho[i] = p[i] / (R_d T[i])
/// p[i+1] = p[i] - rho[i] g dz
/// ```
///
/// Nothing stops the pressure from going negative for a tall enough column.
pub fn build_hydrostatic_profile(
    surface_temperature: f64,
    surface_pressure: f64,
    lapse_rate: f64,
    layer_thickness: f64,
    num_levels: usize,
) -> RadResult<AtmosphereProfile> {
    if num_levels == 0 {
        return Err(ProfileError::TooFewLevels {
            minimum: 1,
            actual: 0,
        }
        .into());
    }

    let mut temperature = Array1::zeros(num_levels);
    let mut pressure = Array1::zeros(num_levels);
    let mut density = Array1::zeros(num_levels);
    let mut height = Array1::zeros(num_levels);

    temperature[0] = surface_temperature;
    pressure[0] = surface_pressure;
    density[0] = surface_pressure / (R_DRY * surface_temperature);

    for i in 0..num_levels - 1 {
        height[i + 1] = height[i] + layer_thickness;
        temperature[i + 1] = temperature[i] + lapse_rate * layer_thickness;
        pressure[i + 1] = pressure[i] - density[i] * GRAVITY * layer_thickness;
        density[i + 1] = pressure[i + 1] / (R_DRY * temperature[i + 1]);
    }
    debug!("built hydrostatic profile with {num_levels} levels");

    Ok(AtmosphereProfile {
        temperature,
        pressure,
        density,
        height,
    })
}

/// Vertical optical depth from the surface for a well-mixed absorber.
///
/// For a gas `mixing_ratio` in kg/kg and a `mass_absorption` coefficient in
/// m²/kg, accumulate
///
/// ```text
/// tau[i+1] = tau[i] + mixing_ratio * mass_absorption * rho[i] * (z[i+1] - z[i])
/// ```
///
/// with `tau[0] = 0`. Like the hydrostatic integration, each layer uses the
/// density of its lower level.
pub fn column_optical_depth(
    mixing_ratio: f64,
    mass_absorption: f64,
    density: ArrayView1<'_, f64>,
    height: ArrayView1<'_, f64>,
) -> RadResult<Array1<f64>> {
    let num_levels = aligned_levels(&[("density", density.len()), ("height", height.len())])?;

    let mut tau = Array1::zeros(num_levels);
    for i in 0..num_levels - 1 {
        let delta_z = height[i + 1] - height[i];
        tau[i + 1] = tau[i] + mixing_ratio * mass_absorption * density[i] * delta_z;
    }
    Ok(tau)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RadError;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn constant_layer_thickness() {
        for layer_thickness in [1.0, 250.0] {
            let profile =
                build_hydrostatic_profile(288.0, 101_325.0, -6.5e-3, layer_thickness, 40)
                    .unwrap();
            assert_eq!(profile.num_levels(), 40);
            assert_eq!(profile.temperature.len(), 40);
            assert_eq!(profile.pressure.len(), 40);
            assert_eq!(profile.density.len(), 40);
            assert_eq!(profile.height[0], 0.);
            for i in 0..39 {
                assert_eq!(profile.height[i + 1] - profile.height[i], layer_thickness);
            }
        }
    }

    #[test]
    fn pressure_and_density_fall_with_height() {
        let profile = build_hydrostatic_profile(300.0, 100e3, -7e-3, 100.0, 100).unwrap();
        for i in 0..99 {
            assert!(profile.pressure[i + 1] < profile.pressure[i]);
            assert!(profile.density[i + 1] < profile.density[i]);
        }
    }

    #[test]
    fn first_euler_step() {
        let profile = build_hydrostatic_profile(300.0, 100e3, -7e-3, 10.0, 2).unwrap();
        let rho0 = 100e3 / (287.0 * 300.0);
        assert_relative_eq!(profile.density[0], rho0);
        assert_relative_eq!(profile.temperature[1], 299.93, max_relative = 1e-12);
        assert_relative_eq!(profile.pressure[1], 100e3 - rho0 * 9.8 * 10.0);
        assert_relative_eq!(
            profile.density[1],
            profile.pressure[1] / (287.0 * profile.temperature[1])
        );
    }

    #[test]
    fn single_level() {
        let profile = build_hydrostatic_profile(300.0, 100e3, -7e-3, 10.0, 1).unwrap();
        assert_eq!(profile.num_levels(), 1);
        assert!(matches!(
            build_hydrostatic_profile(300.0, 100e3, -7e-3, 10.0, 0),
            Err(RadError::InvalidProfile(ProfileError::TooFewLevels { .. }))
        ));
    }

    #[test]
    fn optical_depth_uses_lower_density() {
        let density = array![1.2, 1.0, 0.8];
        let height = array![0.0, 100.0, 300.0];
        let tau = column_optical_depth(0.01, 0.5, density.view(), height.view()).unwrap();

        assert_eq!(tau[0], 0.);
        assert_relative_eq!(tau[1], 0.01 * 0.5 * 1.2 * 100.0);
        assert_relative_eq!(tau[2], tau[1] + 0.01 * 0.5 * 1.0 * 200.0, max_relative = 1e-12);

        assert!(matches!(
            column_optical_depth(0.01, 0.5, density.view(), height.slice(ndarray::s![..2])),
            Err(RadError::InvalidProfile(ProfileError::LengthMismatch {
                what: "height",
                ..
            }))
        ));
    }
}
