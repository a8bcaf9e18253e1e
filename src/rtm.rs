//! Monochromatic radiance from a multi-layer, non-scattering atmosphere

mod core;


pub use self::core::{layer_weights, level_transmittance};

use crate::error::{ProfileError, RadError, RadResult};
use crate::planck::{blackbody_radiance, brightness_temperature};
use log::{debug, info};
use ndarray::Array1;
use rayon::prelude::*;
use smallvec::SmallVec;

/// A validated stack of atmospheric layers above a black surface.
///
/// The layout for N levels (counting the surface) and N-1 layers is:
///
/// ```text
/// ============= level_tau[N-1] (top of atmosphere)
///   layer_temperatures[N-2]
/// ============= level_tau[N-2]
///   ...
/// ============= level_tau[1]
///   layer_temperatures[0]
/// ============= level_tau[0] = 0 (surface at surface_temperature)
/// ```
#[derive(Debug, Clone)]
pub struct LayerStack {
    /// Temperature of the black surface in K.
    surface_temperature: f64,
    /// Layer temperatures in K, nearest the surface first. This has length
    /// `num_levels - 1`.
    layer_temperatures: SmallVec<[f64; 64]>,
    /// Optical depth at each level, starting at 0 at the surface and
    /// non-decreasing going up. This has length `num_levels`.
    level_tau: SmallVec<[f64; 64]>,
}

impl LayerStack {
    /// Check and store the profile.
    ///
    /// `level_tau` must have one more element than `layer_temperatures`, start
    /// at exactly 0, stay finite, and never decrease. Anything else is an
    /// [`RadError::InvalidProfile`].
    pub fn new(
        surface_temperature: f64,
        layer_temperatures: &[f64],
        level_tau: &[f64],
    ) -> RadResult<Self> {
        let surface_tau = *level_tau.first().ok_or(ProfileError::TooFewLevels {
            minimum: 1,
            actual: 0,
        })?;

        if layer_temperatures.len() + 1 != level_tau.len() {
            return Err(ProfileError::LengthMismatch {
                what: "layer_temperatures",
                expected: level_tau.len() - 1,
                actual: layer_temperatures.len(),
            }
            .into());
        }
        if surface_tau != 0. {
            return Err(ProfileError::SurfaceDepth(surface_tau).into());
        }
        if let Some((index, &value)) = level_tau
            .iter()
            .enumerate()
            .find(|(_, tau)| !tau.is_finite())
        {
            return Err(ProfileError::NonFiniteDepth { index, value }.into());
        }
        if let Some((index, &value)) = level_tau.iter().enumerate().find(|(_, &tau)| tau < 0.) {
            return Err(ProfileError::NegativeDepth { index, value }.into());
        }
        if let Some(index) = (1..level_tau.len()).find(|&i| level_tau[i] < level_tau[i - 1]) {
            return Err(ProfileError::DecreasingDepth { index }.into());
        }
        debug!(
            "layer stack with {} layers is valid",
            layer_temperatures.len()
        );

        Ok(Self {
            surface_temperature,
            layer_temperatures: SmallVec::from_slice(layer_temperatures),
            level_tau: SmallVec::from_slice(level_tau),
        })
    }

    /// Number of layers, one less than the number of levels.
    pub fn num_layers(&self) -> usize {
        self.layer_temperatures.len()
    }

    /// Optical depth of the whole column.
    pub fn total_optical_depth(&self) -> f64 {
        // There's always at least the surface level
        self.level_tau[self.level_tau.len() - 1]
    }

    /// Fraction of the surface emission that reaches the top of the column.
    pub fn surface_transmittance(&self) -> f64 {
        f64::exp(-self.total_optical_depth())
    }

    /// Weight of each layer's emission in the radiance at the top.
    pub fn weights(&self) -> SmallVec<[f64; 64]> {
        layer_weights(&self.level_tau)
    }

    /// Upwelling radiance in W/m²/m/sr at the top of the column for a
    /// `wavelength` in m.
    ///
    /// This is the surface emission attenuated by the whole column, plus each
    /// layer's Planck radiance scaled by its weight.
    pub fn radiance(&self, wavelength: f64) -> f64 {
        let surface =
            blackbody_radiance(wavelength, self.surface_temperature) * self.surface_transmittance();
        let atmosphere: f64 = self
            .layer_temperatures
            .iter()
            .zip(self.weights())
            .map(|(&temperature, weight)| blackbody_radiance(wavelength, temperature) * weight)
            .sum();

        surface + atmosphere
    }

    /// Brightness temperature in K of the radiance at the top of the column.
    pub fn brightness_temperature(&self, wavelength: f64) -> RadResult<f64> {
        brightness_temperature(wavelength, self.radiance(wavelength))
    }

    /// Radiance at the top of the column for many wavelengths, computed in
    /// parallel on the current rayon pool.
    pub fn spectrum(&self, wavelengths: &[f64]) -> Array1<f64> {
        let radiances: Vec<f64> = wavelengths
            .par_iter()
            .map(|&wavelength| self.radiance(wavelength))
            .collect();
        Array1::from(radiances)
    }

    /// Same as [`LayerStack::spectrum`], but on a dedicated pool.
    ///
    /// The number of worker threads is controlled by `num_threads`, or `None`
    /// to automatically choose the number of threads.
    pub fn spectrum_in_pool(
        &self,
        wavelengths: &[f64],
        num_threads: Option<usize>,
    ) -> RadResult<Array1<f64>> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads.unwrap_or(0))
            .build()
            .map_err(|e| RadError::ThreadPool(e.to_string()))?;

        info!(
            "Computing radiance at {} wavelengths on {} threads",
            wavelengths.len(),
            pool.current_num_threads()
        );
        Ok(pool.install(|| self.spectrum(wavelengths)))
    }
}

/// Radiance leaving the top of an N-level atmosphere over a black surface.
///
/// `surface_temperature` is in K, `layer_temperatures` (length N-1, nearest
/// the surface first) in K, `level_tau` (length N, starting at 0) is the
/// cumulative absorption optical depth at each level, and `wavelength` is in
/// m. The result is in W/m²/m/sr.
///
/// See [`LayerStack`] for the layout and the checks on the profile.
pub fn multi_layer_radiance(
    surface_temperature: f64,
    layer_temperatures: &[f64],
    level_tau: &[f64],
    wavelength: f64,
) -> RadResult<f64> {
    LayerStack::new(surface_temperature, layer_temperatures, level_tau)
        .map(|stack| stack.radiance(wavelength))
}
