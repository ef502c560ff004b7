use crate::errors::{Result, SplineError};

fn check_pairs(x: &[f64], y: &[f64]) -> Result<()> {
    if x.len() != y.len() {
        return Err(SplineError::LengthMismatch {
            x: x.len(),
            y: y.len(),
        });
    }
    if x.len() < 2 {
        return Err(SplineError::InsufficientPoints {
            required: 2,
            actual: x.len(),
        });
    }
    Ok(())
}

fn panels<'a>(x: &'a [f64], y: &'a [f64]) -> impl Iterator<Item = f64> + 'a {
    x.windows(2)
        .zip(y.windows(2))
        .map(|(xw, yw)| 0.5 * (xw[1] - xw[0]) * (yw[0] + yw[1]))
}

/// Trapezoidal rule over the whole sample range.
pub fn trapezoid(x: &[f64], y: &[f64]) -> Result<f64> {
    check_pairs(x, y)?;
    Ok(panels(x, y).sum())
}

/// Running trapezoidal integral, zero at `x[0]`.
pub fn cumulative_trapezoid(x: &[f64], y: &[f64]) -> Result<Vec<f64>> {
    check_pairs(x, y)?;
    let mut out = Vec::with_capacity(x.len());
    out.push(0.0);
    let mut acc = 0.0;
    for panel in panels(x, y) {
        acc += panel;
        out.push(acc);
    }
    Ok(out)
}
