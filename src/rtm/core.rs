//! Core multi-layer RTM functions.

use smallvec::SmallVec;

/// Transmittance from each level to the top of the column.
///
/// For level optical depths `level_tau`, with the surface at index `0` and
/// the top of the atmosphere at the last index, compute
/// `exp(-(tau_total - tau[i]))` for every level. The top level always has a
/// transmittance of 1.
pub fn level_transmittance(level_tau: &[f64]) -> SmallVec<[f64; 64]> {
    let tau_total = level_tau.last().copied().unwrap_or(0.);
    level_tau
        .iter()
        .map(|tau| f64::exp(-(tau_total - tau)))
        .collect()
}

/// Contribution of each layer to the radiance leaving the top of the column.
///
/// The weight for layer `i` (between levels `i` and `i + 1`) is the
/// difference of the level transmittances, `trans[i + 1] - trans[i]`, so the
/// output is one shorter than `level_tau`. The weights sum to
/// `1 - exp(-tau_total)`, the emissivity of the whole column.
pub fn layer_weights(level_tau: &[f64]) -> SmallVec<[f64; 64]> {
    level_transmittance(level_tau)
        .windows(2)
        .map(|trans| trans[1] - trans[0])
        .collect()
}
