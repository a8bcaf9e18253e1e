//! Precipitation radar relations.
//!
//! Units follow radar meteorology convention rather than SI: drop diameters
//! in mm, rain rate in mm/hr, reflectivity factor `Z` in mm⁶/m³, and range in
//! km.

use ndarray::{Array1, ArrayView1};

/// Marshall-Palmer intercept parameter (m⁻³ mm⁻¹)
pub const MARSHALL_PALMER_N0: f64 = 8000.0;

/// Marshall-Palmer drop size distribution.
///
/// For drop `diameters` in mm and a `rain_rate` in mm/hr, compute the number
/// density `n(D) = N0 exp(-Λ D)` in m⁻³ mm⁻¹, with the slope
/// `Λ = 4.1 R^-0.21` in mm⁻¹.
pub fn marshall_palmer(diameters: ArrayView1<'_, f64>, rain_rate: f64) -> Array1<f64> {
    let slope = 4.1 * rain_rate.powf(-0.21);
    diameters.mapv(|diameter| MARSHALL_PALMER_N0 * f64::exp(-slope * diameter))
}

/// Hardware constants in the weather radar equation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadarConstants {
    /// Transmitted power `Pt` in W.
    pub transmitted_power: f64,
    /// Equipment factor `b` (dimensionless).
    pub equipment_factor: f64,
    /// Range factor `R1` in km.
    pub range_factor: f64,
}

impl RadarConstants {
    /// A NEXRAD (WSR-88D) radar.
    pub const NEXRAD: Self = Self {
        transmitted_power: 750e3,
        equipment_factor: 14255.0,
        range_factor: 2.17e-10,
    };

    /// Power returned to the radar, in W.
    ///
    /// For a reflectivity factor `z` in mm⁶/m³, the dielectric factor `k2`
    /// (`|K|²`, 0.93 for liquid water), the two-way `attenuation` factor
    /// (1 for none), and the `range` in km:
    ///
    /// ```text
    /// Pr = Pt b |K|² / La² (R1 / R)² Z
    /// ```
    pub fn received_power(&self, z: f64, k2: f64, attenuation: f64, range: f64) -> f64 {
        self.transmitted_power * self.equipment_factor * k2 / attenuation.powi(2)
            * (self.range_factor / range).powi(2)
            * z
    }
}

/// Reflectivity factor in dBZ.
pub fn to_dbz(z: f64) -> f64 {
    10. * z.log10()
}

/// Reflectivity factor in mm⁶/m³ from dBZ.
pub fn from_dbz(dbz: f64) -> f64 {
    10_f64.powf(dbz / 10.)
}

/// Power in dBm (decibels relative to 1 mW).
pub fn watts_to_dbm(power: f64) -> f64 {
    10. * (power * 1e3).log10()
}
