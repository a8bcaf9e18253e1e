//! Upward and downward broadband radiance through the column.

use super::{aligned_levels, SIGMA_PI};
use crate::error::RadResult;
use ndarray::{Array1, ArrayView1};

/// Level-aligned broadband radiances in W/m²/sr.
#[derive(Debug, Clone, PartialEq)]
pub struct TwoStreamRadiances {
    /// Upwelling radiance. The first element is the surface emission.
    pub up: Array1<f64>,
    /// Downwelling radiance. The last element is 0 at the top of the
    /// atmosphere.
    pub down: Array1<f64>,
}

impl TwoStreamRadiances {
    /// Net upward radiance, `up - down`, at each level.
    pub fn net_upward(&self) -> Array1<f64> {
        &self.up - &self.down
    }
}

/// Carry broadband radiance through the column one layer at a time.
///
/// The upward pass starts from a black surface at `surface_temperature` and
/// at each layer keeps `trans = exp(-(tau[i] - tau[i-1]))` of the radiance
/// from below while adding `(1 - trans) σ/π T⁴` emitted by the layer. Going
/// up, a layer emits at the temperature of its *lower* level. The downward
/// pass starts from zero at the top and works the same way, except a layer
/// emits at the temperature of its *upper* level.
///
/// `height` is only used to check that the profile is aligned.
pub fn two_stream_radiances(
    tau: ArrayView1<'_, f64>,
    temperature: ArrayView1<'_, f64>,
    height: ArrayView1<'_, f64>,
    surface_temperature: f64,
) -> RadResult<TwoStreamRadiances> {
    let num_levels = aligned_levels(&[
        ("tau", tau.len()),
        ("temperature", temperature.len()),
        ("height", height.len()),
    ])?;

    let layer_radiance =
        |level: usize, trans: f64| (1. - trans) * SIGMA_PI * temperature[level].powi(4);

    let mut up = Array1::zeros(num_levels);
    up[0] = SIGMA_PI * surface_temperature.powi(4);
    for upper in 1..num_levels {
        let lower = upper - 1;
        let trans = f64::exp(-(tau[upper] - tau[lower]));
        up[upper] = trans * up[lower] + layer_radiance(lower, trans);
    }

    let mut down = Array1::zeros(num_levels);
    for lower in (0..num_levels - 1).rev() {
        let upper = lower + 1;
        let trans = f64::exp(-(tau[upper] - tau[lower]));
        down[lower] = trans * down[upper] + layer_radiance(upper, trans);
    }

    Ok(TwoStreamRadiances { up, down })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    fn emission(temperature: f64) -> f64 {
        SIGMA_PI * temperature.powi(4)
    }

    #[test]
    fn three_levels_by_hand() {
        let tau = array![0.0, 1.0, 2.0];
        let temperature = array![300.0, 250.0, 200.0];
        let height = array![0.0, 1000.0, 2000.0];
        let radiances =
            two_stream_radiances(tau.view(), temperature.view(), height.view(), 310.0).unwrap();

        let trans = f64::exp(-1.0);
        let up1 = trans * emission(310.0) + (1. - trans) * emission(300.0);
        let up2 = trans * up1 + (1. - trans) * emission(250.0);
        let down1 = (1. - trans) * emission(200.0);
        let down0 = trans * down1 + (1. - trans) * emission(250.0);

        assert_relative_eq!(radiances.up[0], emission(310.0));
        assert_relative_eq!(radiances.up[1], up1, max_relative = 1e-12);
        assert_relative_eq!(radiances.up[2], up2, max_relative = 1e-12);
        assert_relative_eq!(radiances.down[0], down0, max_relative = 1e-12);
        assert_relative_eq!(radiances.down[1], down1, max_relative = 1e-12);
        assert_eq!(radiances.down[2], 0.);

        let net = radiances.net_upward();
        assert_relative_eq!(net[1], up1 - down1, max_relative = 1e-12);
    }

    #[test]
    fn transparent_column() {
        let tau = array![0.0, 0.0, 0.0, 0.0];
        let temperature = array![290.0, 280.0, 270.0, 260.0];
        let height = array![0.0, 1.0, 2.0, 3.0];
        let radiances =
            two_stream_radiances(tau.view(), temperature.view(), height.view(), 295.0).unwrap();

        for level in 0..4 {
            assert_relative_eq!(radiances.up[level], emission(295.0));
            assert_eq!(radiances.down[level], 0.);
        }
    }

    #[test]
    fn isothermal_upwelling_is_constant() {
        let tau = array![0.0, 0.3, 0.9, 1.4];
        let temperature = Array1::from_elem(4, 270.0);
        let height = array![0.0, 1.0, 2.0, 3.0];
        let radiances =
            two_stream_radiances(tau.view(), temperature.view(), height.view(), 270.0).unwrap();

        for &up in radiances.up.iter() {
            assert_relative_eq!(up, emission(270.0), max_relative = 1e-12);
        }
        // Downwelling grows toward the surface
        assert!(radiances.down.windows(2).into_iter().all(|w| w[0] > w[1]));
    }
}
