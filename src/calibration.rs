//! Radiometric calibration of satellite counts.
//!
//! Level 1 imagery stores quantized counts (digital numbers) that map
//! linearly onto top-of-atmosphere radiance or reflectance. Swath products
//! also mark missing samples with sentinel values, which are described per
//! variable by a [`FillPolicy`], and pack the rest with a scale and offset
//! applied according to a [`ScaleConvention`].

use std::collections::HashMap;

use log::debug;
use ndarray::{Array2, ArrayView2, ArrayViewMut1};

use crate::error::{RadError, RadResult};

/// Linear mapping from counts to radiance, in whatever radiance units the
/// product's metadata uses (usually W/m²/µm/sr).
///
/// A count of zero always means "no data" and maps to NaN.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RadianceCalibration {
    /// Gain and offset, `L = mult * Q + add` (Landsat 8 `RADIANCE_MULT_BAND_n`
    /// and `RADIANCE_ADD_BAND_n`).
    Rescale {
        /// Multiplicative scaling factor
        mult: f32,
        /// Additive offset
        add: f32,
    },
    /// Radiance range mapped onto a count range (Landsat 4, 5, and 7
    /// `LMIN`/`LMAX` and `QCALMIN`/`QCALMAX`).
    MinMax {
        /// Radiance at `count_min`
        radiance_min: f32,
        /// Radiance at `count_max`
        radiance_max: f32,
        /// Smallest calibrated count
        count_min: f32,
        /// Largest calibrated count
        count_max: f32,
    },
}

impl RadianceCalibration {
    /// Radiance for a single count.
    pub fn radiance(&self, count: u16) -> f32 {
        if count == 0 {
            return f32::NAN;
        }
        let count = f32::from(count);
        match *self {
            Self::Rescale { mult, add } => mult * count + add,
            Self::MinMax {
                radiance_min,
                radiance_max,
                count_min,
                count_max,
            } => {
                (radiance_max - radiance_min) / (count_max - count_min) * (count - count_min)
                    + radiance_min
            }
        }
    }

    /// Radiance for a whole scene.
    pub fn to_radiance(&self, counts: ArrayView2<'_, u16>) -> Array2<f32> {
        counts.mapv(|count| self.radiance(count))
    }
}

/// Landsat 8 top-of-atmosphere reflectance for one band of a scene.
///
/// `rho = (mult * Q + add) / sin(sun_elevation)`, from the
/// `REFLECTANCE_MULT_BAND_n`, `REFLECTANCE_ADD_BAND_n` and `SUN_ELEVATION`
/// metadata. A count of zero maps to NaN.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReflectanceCalibration {
    mult: f32,
    add: f32,
    sin_elevation: f32,
}

impl ReflectanceCalibration {
    /// Calibration for a scene with the sun `sun_elevation` degrees above the
    /// horizon.
    pub fn new(mult: f32, add: f32, sun_elevation: f32) -> RadResult<Self> {
        if !(sun_elevation > 0.) {
            return Err(RadError::Domain {
                quantity: "sun_elevation",
                value: f64::from(sun_elevation),
            });
        }
        Ok(Self {
            mult,
            add,
            sin_elevation: sun_elevation.to_radians().sin(),
        })
    }

    /// Reflectance for a single count.
    pub fn reflectance(&self, count: u16) -> f32 {
        if count == 0 {
            return f32::NAN;
        }
        (self.mult * f32::from(count) + self.add) / self.sin_elevation
    }

    /// Reflectance for a whole scene.
    pub fn to_reflectance(&self, counts: ArrayView2<'_, u16>) -> Array2<f32> {
        counts.mapv(|count| self.reflectance(count))
    }
}

/// Order in which a variable's scale and offset are applied to packed values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScaleConvention {
    /// `value * scale_factor + add_offset` (netCDF/CF `scale_factor` and
    /// `add_offset`)
    #[default]
    ScaleThenOffset,
    /// `(value - offset) * scale` (MODIS `radiance_scales` and
    /// `radiance_offsets`)
    OffsetThenScale,
}

impl ScaleConvention {
    /// Unpack a single value.
    pub fn unpack(&self, value: f64, scale: f64, offset: f64) -> f64 {
        match self {
            Self::ScaleThenOffset => value * scale + offset,
            Self::OffsetThenScale => (value - offset) * scale,
        }
    }
}

/// Where the missing-data sentinel for a variable comes from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FillPolicy {
    /// The variable's `_FillValue` attribute
    FillAttribute,
    /// The variable's `missing` attribute
    MissingAttribute,
    /// A fixed value, for products that don't record it (e.g. `-9999`)
    Literal(f64),
}

/// The attributes of a variable that matter for masking and scaling.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VariableAttributes {
    /// `_FillValue`, if present
    pub fill_value: Option<f64>,
    /// `missing`, if present
    pub missing: Option<f64>,
    /// Factor applied to every valid sample, if present
    pub scale_factor: Option<f64>,
    /// Offset applied to every valid sample, if present
    pub add_offset: Option<f64>,
    /// How `scale_factor` and `add_offset` combine
    pub convention: ScaleConvention,
}

impl FillPolicy {
    /// Resolve the sentinel value for `variable` with the given attributes.
    pub fn sentinel(&self, variable: &str, attributes: &VariableAttributes) -> RadResult<f64> {
        let (value, attribute) = match *self {
            FillPolicy::Literal(value) => return Ok(value),
            FillPolicy::FillAttribute => (attributes.fill_value, "_FillValue"),
            FillPolicy::MissingAttribute => (attributes.missing, "missing"),
        };
        value.ok_or_else(|| RadError::MissingAttribute {
            variable: variable.to_owned(),
            attribute,
        })
    }
}

/// Fill policies chosen by variable name, with a fallback for everything
/// else.
#[derive(Debug, Clone)]
pub struct FillPolicies {
    fallback: FillPolicy,
    by_variable: HashMap<String, FillPolicy>,
}

impl Default for FillPolicies {
    fn default() -> Self {
        Self::new(FillPolicy::FillAttribute)
    }
}

impl FillPolicies {
    /// A table where every variable uses `fallback`.
    pub fn new(fallback: FillPolicy) -> Self {
        Self {
            fallback,
            by_variable: HashMap::new(),
        }
    }

    /// Use `policy` for the variable called `variable`.
    pub fn with(mut self, variable: impl Into<String>, policy: FillPolicy) -> Self {
        self.by_variable.insert(variable.into(), policy);
        self
    }

    /// The policy for `variable`.
    pub fn policy(&self, variable: &str) -> FillPolicy {
        self.by_variable
            .get(variable)
            .copied()
            .unwrap_or(self.fallback)
    }

    /// Mask and scale `values` in place.
    ///
    /// Samples equal to the variable's sentinel become NaN; the rest are
    /// unpacked with the scale factor and offset (1 and 0 when absent) in the
    /// variable's convention. Returns the number of masked samples.
    pub fn apply(
        &self,
        variable: &str,
        attributes: &VariableAttributes,
        mut values: ArrayViewMut1<'_, f64>,
    ) -> RadResult<usize> {
        let sentinel = self.policy(variable).sentinel(variable, attributes)?;
        let scale = attributes.scale_factor.unwrap_or(1.);
        let offset = attributes.add_offset.unwrap_or(0.);
        let convention = attributes.convention;

        let mut num_masked = 0;
        values.map_inplace(|value| {
            if *value == sentinel {
                *value = f64::NAN;
                num_masked += 1;
            } else {
                *value = convention.unpack(*value, scale, offset);
            }
        });
        debug!("masked {num_masked} fill values in {variable}");

        Ok(num_masked)
    }
}
