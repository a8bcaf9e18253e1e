//! Flux transmission through a plane-parallel slab.
//!
//! Beam radiance crossing a layer of vertical optical depth `tau` at cosine
//! zenith angle `μ` is attenuated by `exp(-tau/μ)`. Integrating over the
//! hemisphere for isotropic radiance gives the flux transmission
//!
//! ```text
//! t_f = 2 ∫₀¹ μ exp(-tau/μ) dμ = 2 E₃(tau)
//! ```
//!
//! which is usually approximated by a single beam along a slant path with a
//! diffusivity factor of 1.66.

use crate::error::{RadError, RadResult};

/// Ratio of the effective slant path to the vertical path for diffuse flux
pub const DIFFUSIVITY_FACTOR: f64 = 1.66;

/// Number of Simpson intervals used by [`flux_transmission`]. Must be even.
pub const FLUX_QUADRATURE_INTERVALS: usize = 2000;

/// Vertical beam transmission, `exp(-tau)`.
pub fn beam_transmission(tau: f64) -> f64 {
    f64::exp(-tau)
}

/// Diffuse flux transmission using the diffusivity approximation,
/// `exp(-1.66 tau)`.
pub fn diffuse_transmission(tau: f64) -> f64 {
    f64::exp(-DIFFUSIVITY_FACTOR * tau)
}

/// Hemispheric flux transmission `2 E₃(tau)` by numerical quadrature.
///
/// The integrand `μ exp(-tau/μ)` goes smoothly to zero as `μ → 0`, so
/// composite Simpson's rule over `μ ∈ [0, 1]` converges quickly. A negative
/// (or NaN) `tau` is a [`RadError::Domain`] error.
pub fn flux_transmission(tau: f64) -> RadResult<f64> {
    if !(tau >= 0.) {
        return Err(RadError::Domain {
            quantity: "optical depth",
            value: tau,
        });
    }

    let integrand = |mu: f64| {
        if mu > 0. {
            mu * f64::exp(-tau / mu)
        } else {
            0.
        }
    };

    let step = 1.0 / FLUX_QUADRATURE_INTERVALS as f64;
    let interior: f64 = (1..FLUX_QUADRATURE_INTERVALS)
        .map(|i| {
            let weight = if i % 2 == 1 { 4. } else { 2. };
            weight * integrand(i as f64 * step)
        })
        .sum();
    let integral = (integrand(0.) + interior + integrand(1.)) * step / 3.;

    Ok(2. * integral)
}
