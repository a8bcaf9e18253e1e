//! Blackbody radiation from Planck's law.
//!
//! Everything is in SI units: wavelength in m, temperature in K, and
//! monochromatic radiance in W/m²/m/sr. Callers holding µm or W/m²/µm/sr must
//! convert before calling in.

use std::f64::consts::PI;

use ndarray::{Array1, Array2, ArrayView1};

use crate::error::{ProfileError, RadError, RadResult};

/// Speed of light in vacuum (m/s)
pub const SPEED_OF_LIGHT: f64 = 299_792_458.0;
/// Planck's constant (J s)
pub const PLANCK: f64 = 6.626_070_04e-34;
/// Boltzmann's constant (J/K)
pub const BOLTZMANN: f64 = 1.380_648_52e-23;

/// First radiation constant for radiance, `2 h c²` (W m² / sr)
pub const C1: f64 = 2.0 * PLANCK * SPEED_OF_LIGHT * SPEED_OF_LIGHT;
/// Second radiation constant, `h c / k` (m K)
pub const C2: f64 = PLANCK * SPEED_OF_LIGHT / BOLTZMANN;

/// Stefan-Boltzmann constant (W/m²/K⁴), derived from the constants above:
/// `2 π⁵ k⁴ / (15 h³ c²)`.
pub const STEFAN_BOLTZMANN: f64 = 2.0
    * (PI * PI * PI * PI * PI)
    * (BOLTZMANN * BOLTZMANN * BOLTZMANN * BOLTZMANN)
    / (15.0 * (PLANCK * PLANCK * PLANCK) * (SPEED_OF_LIGHT * SPEED_OF_LIGHT));

/// Monochromatic blackbody radiance.
///
/// For a `wavelength` in m and a `temperature` in K, compute the radiance in
/// W/m²/m/sr:
///
/// ```text
/// L(λ, T) = c1 / (λ⁵ (exp(c2 / (λ T)) - 1))
/// ```
///
/// The inputs are not checked. A zero temperature gives 0, a negative
/// temperature gives a negative radiance, and a zero wavelength gives NaN, all
/// following IEEE-754 arithmetic.
pub fn blackbody_radiance(wavelength: f64, temperature: f64) -> f64 {
    C1 / (wavelength.powi(5) * (C2 / (wavelength * temperature)).exp_m1())
}

/// Monochromatic blackbody exitance (hemispheric flux density) in W/m²/m.
///
/// This is `π` times [`blackbody_radiance`], assuming isotropic radiance.
pub fn blackbody_exitance(wavelength: f64, temperature: f64) -> f64 {
    PI * blackbody_radiance(wavelength, temperature)
}

/// Invert Planck's law to get the brightness temperature.
///
/// For a `wavelength` in m and a monochromatic `radiance` in W/m²/m/sr,
/// compute the temperature in K of the blackbody emitting that radiance:
///
/// ```text
/// T = c2 / (λ ln(c1 / (λ⁵ L) + 1))
/// ```
///
/// A wavelength or radiance that is not strictly positive (or is NaN) is
/// rejected with [`RadError::Domain`].
pub fn brightness_temperature(wavelength: f64, radiance: f64) -> RadResult<f64> {
    // Negated comparisons so that NaN is rejected too
    if !(wavelength > 0.) {
        return Err(RadError::Domain {
            quantity: "wavelength",
            value: wavelength,
        });
    }
    if !(radiance > 0.) {
        return Err(RadError::Domain {
            quantity: "radiance",
            value: radiance,
        });
    }
    Ok(C2 / (wavelength * (C1 / (wavelength.powi(5) * radiance)).ln_1p()))
}

/// Radiance at each of `wavelengths` for a single `temperature`.
pub fn radiance_spectrum(wavelengths: ArrayView1<'_, f64>, temperature: f64) -> Array1<f64> {
    wavelengths.mapv(|wavelength| blackbody_radiance(wavelength, temperature))
}

/// Radiance at a single `wavelength` for each of `temperatures`.
pub fn radiance_profile(wavelength: f64, temperatures: ArrayView1<'_, f64>) -> Array1<f64> {
    temperatures.mapv(|temperature| blackbody_radiance(wavelength, temperature))
}

/// Radiance for every combination of temperature and wavelength.
///
/// The output has shape (`temperatures.len()`, `wavelengths.len()`), so row
/// `i` is the spectrum at `temperatures[i]`.
pub fn radiance_grid(
    temperatures: ArrayView1<'_, f64>,
    wavelengths: ArrayView1<'_, f64>,
) -> Array2<f64> {
    Array2::from_shape_fn((temperatures.len(), wavelengths.len()), |(i, j)| {
        blackbody_radiance(wavelengths[j], temperatures[i])
    })
}

/// Brightness temperature for paired wavelengths and radiances.
///
/// Stops at the first element that fails [`brightness_temperature`].
pub fn brightness_temperature_spectrum(
    wavelengths: ArrayView1<'_, f64>,
    radiances: ArrayView1<'_, f64>,
) -> RadResult<Array1<f64>> {
    if wavelengths.len() != radiances.len() {
        return Err(ProfileError::LengthMismatch {
            what: "radiances",
            expected: wavelengths.len(),
            actual: radiances.len(),
        }
        .into());
    }
    wavelengths
        .iter()
        .zip(radiances)
        .map(|(&wavelength, &radiance)| brightness_temperature(wavelength, radiance))
        .collect::<RadResult<Vec<_>>>()
        .map(Array1::from)
}

/// Broadband (wavelength-integrated) blackbody radiance `σ T⁴ / π` in W/m²/sr.
pub fn broadband_radiance(temperature: f64) -> f64 {
    broadband_exitance(temperature) / PI
}

/// Broadband blackbody exitance `σ T⁴` in W/m².
pub fn broadband_exitance(temperature: f64) -> f64 {
    STEFAN_BOLTZMANN * temperature.powi(4)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use ndarray::array;

    /// Radiances from the course fixture, converted to W/m²/µm/sr.
    #[test]
    fn planck_fixture() {
        let temperatures = array![200., 250., 350.];
        let wavelengths = array![8e-6, 10e-6, 12e-6];
        let expected = [
            0.4521, 0.8954, 1.1955, 2.7324, 3.7835, 3.9883, 21.4495, 19.8525, 16.0931,
        ];

        let grid = radiance_grid(temperatures.view(), wavelengths.view());
        assert_eq!(grid.dim(), (3, 3));
        for (got, want) in grid.iter().zip(expected) {
            assert_abs_diff_eq!(got * 1e-6, want, epsilon = 1.5e-4);
        }
    }

    #[test]
    fn round_trip() {
        let wavelengths = [1e-7, 5e-7, 1e-6, 3.7e-6, 11e-6, 1e-4, 1e-3];
        let temperatures = [100., 150., 200., 273.15, 300., 350., 400.];
        for &wavelength in &wavelengths {
            for &temperature in &temperatures {
                let radiance = blackbody_radiance(wavelength, temperature);
                // Deep in the Wien tail the radiance underflows to zero
                if radiance == 0. {
                    assert!(wavelength * temperature < C2 / 700.);
                    continue;
                }
                let tb = brightness_temperature(wavelength, radiance).unwrap();
                assert_relative_eq!(tb, temperature, max_relative = 1e-6);
            }
        }
    }

    #[test]
    fn increasing_in_temperature() {
        for wavelength in [4e-6, 10e-6, 15e-6, 100e-6] {
            let radiances: Vec<f64> = (150..=350)
                .step_by(10)
                .map(|t| blackbody_radiance(wavelength, t as f64))
                .collect();
            assert!(radiances.windows(2).all(|w| w[1] > w[0]));
        }
    }

    /// Integrating the spectrum should recover the Stefan-Boltzmann law.
    #[test]
    fn stefan_boltzmann_consistency() {
        const TEMPERATURE: f64 = 280.;
        // 0.1 to 700 µm in steps of 0.01 µm
        let num_points = 69_991;
        let step = 0.01e-6;
        let spectrum = radiance_spectrum(
            Array1::from_shape_fn(num_points, |i| 0.1e-6 + i as f64 * step).view(),
            TEMPERATURE,
        );
        let integral = step
            * (spectrum.sum() - 0.5 * (spectrum[0] + spectrum[num_points - 1]));

        assert_relative_eq!(
            integral,
            broadband_radiance(TEMPERATURE),
            max_relative = 0.01
        );
    }

    #[test]
    fn sigma_matches_codata() {
        assert_relative_eq!(STEFAN_BOLTZMANN, 5.670_367e-8, max_relative = 1e-6);
    }

    #[test]
    fn exitance_is_pi_radiance() {
        assert_relative_eq!(
            blackbody_exitance(10e-6, 290.),
            PI * blackbody_radiance(10e-6, 290.)
        );
    }

    #[test]
    fn bad_inversion_inputs() {
        assert!(matches!(
            brightness_temperature(10e-6, 0.),
            Err(RadError::Domain {
                quantity: "radiance",
                ..
            })
        ));
        assert!(matches!(
            brightness_temperature(-1e-6, 1e6),
            Err(RadError::Domain {
                quantity: "wavelength",
                ..
            })
        ));
        assert!(brightness_temperature(10e-6, f64::NAN).is_err());
    }

    #[test]
    fn unchecked_radiance_inputs_propagate() {
        assert!(blackbody_radiance(0., 300.).is_nan());
        assert!(blackbody_radiance(10e-6, -300.) < 0.);
    }

    #[test]
    fn spectrum_inversion() {
        let wavelengths = array![8e-6, 11e-6, 12e-6];
        let radiances = radiance_spectrum(wavelengths.view(), 288.);
        let tb = brightness_temperature_spectrum(wavelengths.view(), radiances.view()).unwrap();
        for &t in tb.iter() {
            assert_relative_eq!(t, 288., max_relative = 1e-9);
        }

        let short = array![1e6];
        assert!(matches!(
            brightness_temperature_spectrum(wavelengths.view(), short.view()),
            Err(RadError::InvalidProfile(ProfileError::LengthMismatch { .. }))
        ));
    }

    #[test]
    fn profile_is_a_grid_column() {
        let temperatures = array![200., 250., 300., 350.];
        let wavelengths = array![8e-6, 10e-6, 12e-6];
        let grid = radiance_grid(temperatures.view(), wavelengths.view());

        let profile = radiance_profile(10e-6, temperatures.view());
        assert_eq!(profile.len(), 4);
        assert_eq!(profile, grid.column(1));
        assert!(profile.windows(2).into_iter().all(|w| w[1] > w[0]));
    }
}
