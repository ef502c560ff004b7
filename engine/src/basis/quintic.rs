//! Quintic Hermite basis, matching value, slope and curvature at both ends.
//!
//! ```text
//! φ0(t) = -6t⁵ + 15t⁴ - 10t³ + 1      ψ0(t) = h (-3t⁵ + 8t⁴ - 6t³ + t)
//! φ1(t) = 6t⁵ - 15t⁴ + 10t³           ψ1(t) = h (-3t⁵ + 7t⁴ - 4t³)
//! θ0(t) = h² (-t⁵/2 + 3t⁴/2 - 3t³/2 + t²/2)
//! θ1(t) = h² (t⁵/2 - t⁴ + t³/2)
//! ```

use super::SegmentEnds;

#[inline]
pub fn value(s: &SegmentEnds, x: f64) -> f64 {
    let h = s.width();
    let t = s.local(x);
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;
    let t5 = t4 * t;

    let phi0 = -6.0 * t5 + 15.0 * t4 - 10.0 * t3 + 1.0;
    let phi1 = 6.0 * t5 - 15.0 * t4 + 10.0 * t3;
    let psi0 = h * (-3.0 * t5 + 8.0 * t4 - 6.0 * t3 + t);
    let psi1 = h * (-3.0 * t5 + 7.0 * t4 - 4.0 * t3);
    let theta0 = h * h * (-0.5 * t5 + 1.5 * t4 - 1.5 * t3 + 0.5 * t2);
    let theta1 = h * h * (0.5 * t5 - t4 + 0.5 * t3);

    s.y0 * phi0 + s.y1 * phi1 + s.d0 * psi0 + s.d1 * psi1 + s.dd0 * theta0 + s.dd1 * theta1
}

#[inline]
pub fn derivative(s: &SegmentEnds, x: f64) -> f64 {
    let h = s.width();
    let t = s.local(x);
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;

    let phi0 = 30.0 / h * (-t4 + 2.0 * t3 - t2);
    let phi1 = 30.0 / h * (t4 - 2.0 * t3 + t2);
    let psi0 = 1.0 - 18.0 * t2 + 32.0 * t3 - 15.0 * t4;
    let psi1 = -12.0 * t2 + 28.0 * t3 - 15.0 * t4;
    let theta0 = h * (t - 4.5 * t2 + 6.0 * t3 - 2.5 * t4);
    let theta1 = h * (1.5 * t2 - 4.0 * t3 + 2.5 * t4);

    s.y0 * phi0 + s.y1 * phi1 + s.d0 * psi0 + s.d1 * psi1 + s.dd0 * theta0 + s.dd1 * theta1
}

/// Antiderivative with respect to `x`, zero at `tk0`.
#[inline]
pub fn antiderivative(s: &SegmentEnds, x: f64) -> f64 {
    let h = s.width();
    let t = s.local(x);
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;
    let t5 = t4 * t;
    let t6 = t5 * t;

    let phi0 = h * (-t6 + 3.0 * t5 - 2.5 * t4 + t);
    let phi1 = h * (t6 - 3.0 * t5 + 2.5 * t4);
    let psi0 = h * h * (-0.5 * t6 + 1.6 * t5 - 1.5 * t4 + 0.5 * t2);
    let psi1 = h * h * (-0.5 * t6 + 1.4 * t5 - t4);
    let theta0 = h * h * h * (-t6 / 12.0 + 0.3 * t5 - 0.375 * t4 + t3 / 6.0);
    let theta1 = h * h * h * (t6 / 12.0 - 0.2 * t5 + 0.125 * t4);

    s.y0 * phi0 + s.y1 * phi1 + s.d0 * psi0 + s.d1 * psi1 + s.dd0 * theta0 + s.dd1 * theta1
}
