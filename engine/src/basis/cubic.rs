//! Cubic Hermite basis.
//!
//! ```text
//! φ0(t) = 2t³ - 3t² + 1        ψ0(t) = h (t³ - 2t² + t)
//! φ1(t) = -2t³ + 3t²           ψ1(t) = h (t³ - t²)
//! ```

use super::SegmentEnds;

/// Interpolated value at `x`.
#[inline]
pub fn value(s: &SegmentEnds, x: f64) -> f64 {
    let h = s.width();
    let t = s.local(x);
    let t2 = t * t;
    let t3 = t2 * t;

    let phi0 = 2.0 * t3 - 3.0 * t2 + 1.0;
    let phi1 = -2.0 * t3 + 3.0 * t2;
    let psi0 = h * (t3 - 2.0 * t2 + t);
    let psi1 = h * (t3 - t2);

    s.y0 * phi0 + s.y1 * phi1 + s.d0 * psi0 + s.d1 * psi1
}

/// First derivative with respect to `x`.
#[inline]
pub fn derivative(s: &SegmentEnds, x: f64) -> f64 {
    let h = s.width();
    let t = s.local(x);
    let t2 = t * t;

    let phi0 = 6.0 / h * (t2 - t);
    let phi1 = 6.0 / h * (t - t2);
    let psi0 = 3.0 * t2 - 4.0 * t + 1.0;
    let psi1 = 3.0 * t2 - 2.0 * t;

    s.y0 * phi0 + s.y1 * phi1 + s.d0 * psi0 + s.d1 * psi1
}

/// Antiderivative with respect to `x`, zero at `tk0`.
#[inline]
pub fn antiderivative(s: &SegmentEnds, x: f64) -> f64 {
    let h = s.width();
    let t = s.local(x);
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;

    let phi0 = h * (0.5 * t4 - t3 + t);
    let phi1 = h * (-0.5 * t4 + t3);
    let psi0 = h * h * (0.25 * t4 - 2.0 / 3.0 * t3 + 0.5 * t2);
    let psi1 = h * h * (0.25 * t4 - t3 / 3.0);

    s.y0 * phi0 + s.y1 * phi1 + s.d0 * psi0 + s.d1 * psi1
}
