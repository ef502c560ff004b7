use thiserror::Error;

/// Unified error type for the spline engine crate.
#[derive(Debug, Error)]
pub enum SplineError {
    /// Abscissa and ordinate arrays disagree in length.
    #[error("length mismatch: x has {x} samples, y has {y}")]
    LengthMismatch { x: usize, y: usize },
    /// Too few samples for the finite-difference stencils.
    #[error("insufficient points: need at least {required}, got {actual}")]
    InsufficientPoints { required: usize, actual: usize },
    /// Abscissas must be strictly increasing.
    #[error("abscissas not strictly increasing at index {index}")]
    NotIncreasing { index: usize },
    /// NaN or infinite sample.
    #[error("non-finite sample at index {index}")]
    NonFinite { index: usize },
    /// Knot specification that cannot describe a valid knot set.
    #[error("invalid knots: {0}")]
    InvalidKnots(String),
    /// Unrecognised basis family, auxiliary mode or other selector.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// Wrapper around I/O errors.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Serialization or deserialization failures.
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    /// YAML parsing error.
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// TOML parsing error.
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
    /// Any other context dependent failure.
    #[error("{0}")]
    Other(String),
}

impl SplineError {
    pub fn other<T: Into<String>>(msg: T) -> Self {
        Self::Other(msg.into())
    }

    pub fn knots<T: Into<String>>(msg: T) -> Self {
        Self::InvalidKnots(msg.into())
    }

    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::LengthMismatch { .. } => "length_mismatch",
            Self::InsufficientPoints { .. } => "insufficient_points",
            Self::NotIncreasing { .. } => "not_increasing",
            Self::NonFinite { .. } => "non_finite",
            Self::InvalidKnots(_) => "invalid_knots",
            Self::InvalidConfig(_) => "invalid_config",
            Self::Io(_) => "io",
            Self::Serde(_) | Self::Yaml(_) | Self::Toml(_) => "parse",
            Self::Other(_) => "other",
        }
    }

    /// True for the fatal input-shape failures that abort a single reconstruction.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::LengthMismatch { .. }
                | Self::InsufficientPoints { .. }
                | Self::NotIncreasing { .. }
                | Self::NonFinite { .. }
                | Self::InvalidKnots(_)
        )
    }
}

pub type Result<T, E = SplineError> = std::result::Result<T, E>;
