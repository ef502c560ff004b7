use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::errors::{Result, SplineError};

/// Sweep orientation of a discrete-ordinates direction along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepDirection {
    /// Positive direction cosine, swept from the low edge.
    Forward,
    /// Negative direction cosine, swept from the high edge.
    Backward,
}

impl SweepDirection {
    pub fn from_cosine(mu: f64) -> Self {
        if mu < 0.0 {
            Self::Backward
        } else {
            Self::Forward
        }
    }
}

/// Closure relating cell-center flux to the outgoing edge flux.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeScheme {
    /// `edge_out = 2 center - edge_in`
    Diamond,
    /// `edge_out = center`
    Step,
}

impl Default for EdgeScheme {
    fn default() -> Self {
        Self::Diamond
    }
}

impl EdgeScheme {
    #[inline]
    pub fn outgoing(self, center: f64, incoming: f64) -> f64 {
        match self {
            Self::Diamond => 2.0 * center - incoming,
            Self::Step => center,
        }
    }
}

/// Cell edges from centers and widths: left faces, then the last right face.
pub fn spatial_edges(centers: &[f64], widths: &[f64]) -> Result<Vec<f64>> {
    if centers.len() != widths.len() {
        return Err(SplineError::LengthMismatch {
            x: centers.len(),
            y: widths.len(),
        });
    }
    let mut edges: Vec<f64> = centers
        .iter()
        .zip(widths)
        .map(|(c, w)| c - 0.5 * w)
        .collect();
    if let (Some(c), Some(w)) = (centers.last(), widths.last()) {
        edges.push(c + 0.5 * w);
    }
    Ok(edges)
}

/// Edge fluxes implied by cell-center fluxes for one sweep, restricted to `edges`.
///
/// The sweep enters with zero flux. `edges` indexes the `centers.len() + 1`
/// faces of the full medium.
pub fn flux_edges(
    centers: &[f64],
    direction: SweepDirection,
    edges: Range<usize>,
    scheme: EdgeScheme,
) -> Result<Vec<f64>> {
    let n = centers.len();
    if edges.start > edges.end || edges.end > n + 1 {
        return Err(SplineError::InvalidConfig(format!(
            "edge range {}..{} outside 0..{}",
            edges.start,
            edges.end,
            n + 1
        )));
    }
    let mut faces = vec![0.0; n + 1];
    match direction {
        SweepDirection::Forward => {
            for i in 0..n {
                faces[i + 1] = scheme.outgoing(centers[i], faces[i]);
            }
        }
        SweepDirection::Backward => {
            for i in (0..n).rev() {
                faces[i] = scheme.outgoing(centers[i], faces[i + 1]);
            }
        }
    }
    Ok(faces[edges].to_vec())
}

/// Merge `n` centers with their `n + 1` edges as `[e0, c0, e1, ..., c_{n-1}, e_n]`.
pub fn interleave_centers_edges(centers: &[f64], edges: &[f64]) -> Result<Vec<f64>> {
    if edges.len() != centers.len() + 1 {
        return Err(SplineError::LengthMismatch {
            x: centers.len() + 1,
            y: edges.len(),
        });
    }
    let mut out = Vec::with_capacity(centers.len() + edges.len());
    for (e, c) in edges.iter().zip(centers) {
        out.push(*e);
        out.push(*c);
    }
    out.extend(edges.last());
    Ok(out)
}

/// Insert the midpoint between every neighbouring pair of `x` and of `y`.
pub fn mesh_refinement(x: &[f64], y: &[f64]) -> Result<(Vec<f64>, Vec<f64>)> {
    if x.len() != y.len() {
        return Err(SplineError::LengthMismatch {
            x: x.len(),
            y: y.len(),
        });
    }
    Ok((refine(x), refine(y)))
}

fn refine(v: &[f64]) -> Vec<f64> {
    let mut out = Vec::with_capacity((2 * v.len()).saturating_sub(1));
    for w in v.windows(2) {
        out.push(w[0]);
        out.push(0.5 * (w[0] + w[1]));
    }
    out.extend(v.last());
    out
}
