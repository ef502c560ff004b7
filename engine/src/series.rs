use crate::errors::{Result, SplineError};

/// Smallest series the three-point stencils can differentiate.
pub const MIN_SAMPLES: usize = 3;

/// Validated, borrowed view over paired abscissas and ordinates.
///
/// Construction checks equal length, the stencil minimum, finiteness and
/// strictly increasing abscissas. The view never copies the caller's data.
#[derive(Debug, Clone, Copy)]
pub struct SampleSeries<'a> {
    x: &'a [f64],
    y: &'a [f64],
}

impl<'a> SampleSeries<'a> {
    pub fn new(x: &'a [f64], y: &'a [f64]) -> Result<Self> {
        check_shape(x, y)?;
        if let Some(index) = x.iter().chain(y).position(|v| !v.is_finite()) {
            return Err(SplineError::NonFinite {
                index: index % x.len(),
            });
        }
        if let Some(index) = x.windows(2).position(|w| w[1] <= w[0]) {
            return Err(SplineError::NotIncreasing { index: index + 1 });
        }
        Ok(Self { x, y })
    }

    pub fn x(&self) -> &'a [f64] {
        self.x
    }

    pub fn y(&self) -> &'a [f64] {
        self.y
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn last_index(&self) -> usize {
        self.x.len() - 1
    }
}

/// Length agreement and stencil minimum, shared with the differentiator.
pub(crate) fn check_shape(x: &[f64], y: &[f64]) -> Result<()> {
    if x.len() != y.len() {
        return Err(SplineError::LengthMismatch {
            x: x.len(),
            y: y.len(),
        });
    }
    if x.len() < MIN_SAMPLES {
        return Err(SplineError::InsufficientPoints {
            required: MIN_SAMPLES,
            actual: x.len(),
        });
    }
    Ok(())
}
