//! Error types.

use thiserror::Error;

/// Possible radiation toolkit errors.
#[derive(Debug, Error)]
pub enum RadError {
    /// An input is outside the physically valid range
    #[error("{quantity} must be positive, got {value}")]
    Domain {
        /// Name of the offending input
        quantity: &'static str,
        /// The value that was rejected
        value: f64,
    },
    /// A profile doesn't have the expected shape or ordering
    #[error("invalid profile: {0}")]
    InvalidProfile(#[from] ProfileError),
    /// A fill policy refers to an attribute the variable doesn't carry
    #[error("variable {variable} has no {attribute} attribute")]
    MissingAttribute {
        /// Variable name
        variable: String,
        /// Attribute the policy asked for
        attribute: &'static str,
    },
    /// The column configuration couldn't be parsed
    #[error("bad column configuration: {0}")]
    Config(#[from] toml::de::Error),
    /// The worker pool couldn't be started
    #[error("couldn't build thread pool: {0}")]
    ThreadPool(String),
}

/// Ways a vertical profile can be malformed.
#[derive(Debug, Error, PartialEq)]
pub enum ProfileError {
    /// Two aligned sequences disagree in length
    #[error("{what} has length {actual}, expected {expected}")]
    LengthMismatch {
        /// Which sequence is wrong
        what: &'static str,
        /// Length implied by the other inputs
        expected: usize,
        /// Length that was given
        actual: usize,
    },
    /// Not enough levels to form the profile
    #[error("need at least {minimum} levels, got {actual}")]
    TooFewLevels {
        /// Smallest allowed number of levels
        minimum: usize,
        /// Number of levels given
        actual: usize,
    },
    /// The optical depth at the surface isn't zero
    #[error("optical depth at the surface must be 0, got {0}")]
    SurfaceDepth(f64),
    /// An optical depth is negative
    #[error("optical depth at level {index} is negative ({value})")]
    NegativeDepth {
        /// Level index
        index: usize,
        /// The negative value
        value: f64,
    },
    /// An optical depth is infinite or NaN
    #[error("optical depth at level {index} is not finite ({value})")]
    NonFiniteDepth {
        /// Level index
        index: usize,
        /// The offending value
        value: f64,
    },
    /// Optical depth decreases going up the column
    #[error("optical depth decreases between levels {} and {index}", .index - 1)]
    DecreasingDepth {
        /// Index of the upper level of the offending pair
        index: usize,
    },
}

/// Convenience type for `Result<T, RadError>`.
pub type RadResult<T> = Result<T, RadError>;
