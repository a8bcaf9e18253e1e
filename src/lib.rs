//! Planck functions and plane-parallel radiative transfer.
//!
//! The toolkit covers three related calculations for thermal infrared
//! remote sensing:
//!
//! - [`planck`]: blackbody radiance and exitance, and the inverse
//!   (brightness temperature)
//! - [`rtm`]: monochromatic radiance at the top of a multi-layer,
//!   non-scattering atmosphere over a black surface
//! - [`column`]: a hydrostatic column with a two-stream broadband solver and
//!   the resulting heating rate
//!
//! along with flux transmission ([`diffuse`]), calibration of satellite counts
//! ([`calibration`]), and weather radar relations ([`radar`]).
//!
//! Everything is a pure function of its inputs, in SI units unless noted. The
//! optional `python` feature builds a Python extension module on top; that is
//! the only place `pyo3` is used.

pub mod calibration;
pub mod column;
pub mod config;
pub mod diffuse;
pub mod error;
pub mod planck;
pub mod radar;
pub mod rtm;

#[cfg(feature = "python")]
mod python;

pub use column::{
    build_hydrostatic_profile, column_optical_depth, heating_rate, two_stream_radiances,
    AtmosphereProfile, ColumnSolution, TwoStreamRadiances,
};
pub use config::ColumnConfig;
pub use error::{ProfileError, RadError, RadResult};
pub use planck::{blackbody_exitance, blackbody_radiance, brightness_temperature};
pub use rtm::{multi_layer_radiance, LayerStack};
