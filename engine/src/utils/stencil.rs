use crate::{errors::Result, series::check_shape};

/// First derivative for samples on a non-uniform grid.
///
/// Interior points use the central difference over both neighbours; the two
/// edges use second-order one-sided three-point formulas.
pub fn first_derivative(x: &[f64], f: &[f64]) -> Result<Vec<f64>> {
    check_shape(x, f)?;
    let n = x.len();
    let mut df = vec![0.0; n];
    for i in 1..n - 1 {
        df[i] = (f[i + 1] - f[i - 1]) / (x[i + 1] - x[i - 1]);
    }
    df[0] = (-3.0 * f[0] + 4.0 * f[1] - f[2]) / (x[2] - x[0]);
    df[n - 1] = (3.0 * f[n - 1] - 4.0 * f[n - 2] + f[n - 3]) / (x[n - 1] - x[n - 3]);
    Ok(df)
}

/// Second derivative from the three-point stencil
/// `(f[i+1] - 2 f[i] + f[i-1]) / ((x[i+1] - x[i]) (x[i] - x[i-1]))`.
///
/// Exact for uniform spacing only; on a stretched grid it is an
/// approximation. Each edge reuses the stencil of its interior neighbour.
pub fn second_derivative(x: &[f64], f: &[f64]) -> Result<Vec<f64>> {
    check_shape(x, f)?;
    let n = x.len();
    let stencil = |i: usize| {
        (f[i + 1] - 2.0 * f[i] + f[i - 1]) / ((x[i + 1] - x[i]) * (x[i] - x[i - 1]))
    };
    let mut d2f = vec![0.0; n];
    for (i, slot) in d2f.iter_mut().enumerate().take(n - 1).skip(1) {
        *slot = stencil(i);
    }
    d2f[0] = stencil(1);
    d2f[n - 1] = stencil(n - 2);
    Ok(d2f)
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::errors::SplineError;

    #[test]
    fn quadratic_first_derivative_is_exact_on_uniform_grid() {
        let x: Vec<f64> = (0..6).map(|k| k as f64 * 0.2).collect();
        let f: Vec<f64> = x.iter().map(|v| v * v).collect();
        let df = first_derivative(&x, &f).unwrap();
        for (xi, di) in x.iter().zip(&df) {
            assert_abs_diff_eq!(*di, 2.0 * xi, epsilon = 1e-12);
        }
    }

    #[test]
    fn interior_central_difference_is_exact_for_lines_on_stretched_grid() {
        let x = [0.0, 0.1, 0.4, 1.0, 1.1];
        let f: Vec<f64> = x.iter().map(|v| 3.0 * v - 1.0).collect();
        let df = first_derivative(&x, &f).unwrap();
        for d in &df[1..4] {
            assert_abs_diff_eq!(*d, 3.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn second_derivative_edges_copy_neighbour_stencil() {
        let x = [0.0, 0.5, 1.0, 1.5, 2.0];
        let f = [0.0, 1.0, 0.0, 2.0, 1.0];
        let d2f = second_derivative(&x, &f).unwrap();
        assert_eq!(d2f[0], d2f[1]);
        assert_eq!(d2f[4], d2f[3]);
        assert_abs_diff_eq!(d2f[1], -8.0, epsilon = 1e-12);
    }

    #[test]
    fn quadratic_second_derivative_on_uniform_grid() {
        let x: Vec<f64> = (0..5).map(|k| k as f64).collect();
        let f: Vec<f64> = x.iter().map(|v| 1.5 * v * v).collect();
        for d in second_derivative(&x, &f).unwrap() {
            assert_abs_diff_eq!(d, 3.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn stencils_need_three_points() {
        let err = first_derivative(&[0.0, 1.0], &[0.0, 1.0]).unwrap_err();
        assert!(matches!(err, SplineError::InsufficientPoints { .. }));
        let err = second_derivative(&[0.0, 1.0, 2.0], &[0.0, 1.0]).unwrap_err();
        assert!(matches!(err, SplineError::LengthMismatch { .. }));
    }
}
