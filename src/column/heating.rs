//! Radiative heating rate from the divergence of net radiance.

use super::{aligned_levels, CP_DRY};
use crate::error::RadResult;
use ndarray::{Array1, ArrayView1};

/// Heating rate in K/s for each layer.
///
/// The net upward flux is differenced across each layer, and the divergence
/// is divided by the layer's mean density times `c_pd`:
///
/// ```text
/// dT/dt[i] = -(F[i+1] - F[i]) / (z[i+1] - z[i]) / (rho_mid[i] c_pd)
/// ```
///
/// The output has one fewer element than the inputs and lines up with
/// [`mid_heights`].
pub fn heating_rate(
    net_upward: ArrayView1<'_, f64>,
    height: ArrayView1<'_, f64>,
    density: ArrayView1<'_, f64>,
) -> RadResult<Array1<f64>> {
    let num_levels = aligned_levels(&[
        ("net_upward", net_upward.len()),
        ("height", height.len()),
        ("density", density.len()),
    ])?;

    Ok(Array1::from_shape_fn(num_levels - 1, |i| {
        let flux_divergence = -(net_upward[i + 1] - net_upward[i]) / (height[i + 1] - height[i]);
        let rho_mid = 0.5 * (density[i] + density[i + 1]);
        flux_divergence / (rho_mid * CP_DRY)
    }))
}

/// Height of the midpoint of each layer.
pub fn mid_heights(height: ArrayView1<'_, f64>) -> Array1<f64> {
    height
        .windows(2)
        .into_iter()
        .map(|z| 0.5 * (z[0] + z[1]))
        .collect()
}
