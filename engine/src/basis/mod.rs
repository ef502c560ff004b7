//! Hermite basis families.
//!
//! Each family is a fixed table of three pure evaluators (value, first
//! derivative, antiderivative) over one segment `[tk0, tk1]`, written in the
//! local coordinate `t = (x - tk0) / (tk1 - tk0)`. Queries outside the
//! segment extrapolate the polynomial.
//!
//! ```text
//! cubic   p(x) = y0 φ0 + y1 φ1 + y0' ψ0 + y1' ψ1
//! quintic p(x) = y0 φ0 + y1 φ1 + y0' ψ0 + y1' ψ1 + y0'' θ0 + y1'' θ1
//! ```

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::SplineError;

pub mod cubic;
pub mod quintic;

/// Polynomial family used on every segment.
///
/// Serde goes through [`FromStr`], so file selectors are case-insensitive and
/// unknown names fail with [`SplineError::InvalidConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum BasisFamily {
    /// Degree 3, C1 at knots.
    Cubic,
    /// Degree 5, C2 at knots.
    Quintic,
}

impl Default for BasisFamily {
    fn default() -> Self {
        Self::Cubic
    }
}

impl BasisFamily {
    /// Quintic segments also consume second derivatives at both ends.
    pub fn needs_second_derivative(self) -> bool {
        matches!(self, Self::Quintic)
    }

    /// Look up the evaluator for `kind`; resolved once per reconstruction.
    pub const fn evaluator(self, kind: Evaluation) -> BasisFn {
        match (self, kind) {
            (Self::Cubic, Evaluation::Value) => cubic::value,
            (Self::Cubic, Evaluation::Derivative) => cubic::derivative,
            (Self::Cubic, Evaluation::Antiderivative) => cubic::antiderivative,
            (Self::Quintic, Evaluation::Value) => quintic::value,
            (Self::Quintic, Evaluation::Derivative) => quintic::derivative,
            (Self::Quintic, Evaluation::Antiderivative) => quintic::antiderivative,
        }
    }

    /// Evaluate `kind` at every query point of one segment.
    pub fn evaluate(self, kind: Evaluation, ends: &SegmentEnds, xs: &[f64]) -> Vec<f64> {
        let f = self.evaluator(kind);
        xs.iter().map(|&x| f(ends, x)).collect()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cubic => "cubic",
            Self::Quintic => "quintic",
        }
    }
}

impl fmt::Display for BasisFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BasisFamily {
    type Err = SplineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cubic" => Ok(Self::Cubic),
            "quintic" => Ok(Self::Quintic),
            other => Err(SplineError::InvalidConfig(format!(
                "unknown spline type '{other}' (expected cubic or quintic)"
            ))),
        }
    }
}

impl TryFrom<String> for BasisFamily {
    type Error = SplineError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<BasisFamily> for &'static str {
    fn from(family: BasisFamily) -> Self {
        family.as_str()
    }
}

/// Companion quantity returned next to the reconstructed values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum AuxMode {
    Derive,
    Integrate,
}

impl Default for AuxMode {
    fn default() -> Self {
        Self::Derive
    }
}

impl AuxMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Derive => "derive",
            Self::Integrate => "integrate",
        }
    }
}

impl fmt::Display for AuxMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for AuxMode {
    type Error = SplineError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<AuxMode> for &'static str {
    fn from(mode: AuxMode) -> Self {
        mode.as_str()
    }
}

impl FromStr for AuxMode {
    type Err = SplineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "derive" => Ok(Self::Derive),
            "integrate" => Ok(Self::Integrate),
            other => Err(SplineError::InvalidConfig(format!(
                "unknown auxiliary function '{other}' (expected derive or integrate)"
            ))),
        }
    }
}

/// Which evaluator of a family to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Evaluation {
    Value,
    Derivative,
    Antiderivative,
}

impl From<AuxMode> for Evaluation {
    fn from(mode: AuxMode) -> Self {
        match mode {
            AuxMode::Derive => Self::Derivative,
            AuxMode::Integrate => Self::Antiderivative,
        }
    }
}

/// Single-point evaluator over one segment.
pub type BasisFn = fn(&SegmentEnds, f64) -> f64;

/// Known quantities at both ends of a segment.
///
/// `dd0`/`dd1` are ignored by the cubic family.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SegmentEnds {
    pub tk0: f64,
    pub tk1: f64,
    pub y0: f64,
    pub y1: f64,
    pub d0: f64,
    pub d1: f64,
    #[serde(default)]
    pub dd0: f64,
    #[serde(default)]
    pub dd1: f64,
}

impl SegmentEnds {
    /// Ends of segment `[k0, k1]` drawn from aligned sample and derivative arrays.
    pub fn from_samples(
        x: &[f64],
        y: &[f64],
        dy: &[f64],
        d2y: Option<&[f64]>,
        k0: usize,
        k1: usize,
    ) -> Self {
        let (dd0, dd1) = d2y.map_or((0.0, 0.0), |d2| (d2[k0], d2[k1]));
        Self {
            tk0: x[k0],
            tk1: x[k1],
            y0: y[k0],
            y1: y[k1],
            d0: dy[k0],
            d1: dy[k1],
            dd0,
            dd1,
        }
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.tk1 - self.tk0
    }

    #[inline]
    pub fn local(&self, x: f64) -> f64 {
        (x - self.tk0) / (self.tk1 - self.tk0)
    }
}
