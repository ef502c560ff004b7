//! Ghost-point extension for the two-dimensional sweep.
//!
//! Region centers and edges are interleaved, refined once more by midpoint
//! insertion, reconstructed with the piecewise driver, and sampled back at
//! the region's cell centers. After interleaving and one refinement the
//! center of cell `k` sits at refined index `2 + 4k`.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::{
    config::GhostConfig,
    errors::{Result, SplineError},
    knots::KnotWarning,
    spline::hermite,
};

pub mod mesh;

use mesh::{flux_edges, interleave_centers_edges, mesh_refinement, spatial_edges, SweepDirection};

/// Offset of the first cell center on the refined grid.
pub const REFINED_OFFSET: usize = 2;
/// Refined-grid distance between consecutive cell centers.
pub const REFINED_STRIDE: usize = 4;

/// Reconstructed flux and slope at each region cell center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct GhostPoints {
    pub values: Vec<f64>,
    pub derivatives: Vec<f64>,
    #[serde(default)]
    pub warning: Option<KnotWarning>,
}

impl GhostPoints {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Synthesize ghost values and slopes for one region of the medium.
///
/// `x_centers`/`x_widths` describe the region; `y_centers` holds the flux of
/// the whole medium and `split` selects the region's cells within it.
pub fn ghost_splines(
    x_centers: &[f64],
    y_centers: &[f64],
    x_widths: &[f64],
    direction: SweepDirection,
    split: Range<usize>,
    cfg: &GhostConfig,
) -> Result<GhostPoints> {
    if split.start > split.end || split.end > y_centers.len() {
        return Err(SplineError::InvalidConfig(format!(
            "split {}..{} outside medium of {} cells",
            split.start,
            split.end,
            y_centers.len()
        )));
    }
    if split.len() != x_centers.len() {
        return Err(SplineError::LengthMismatch {
            x: x_centers.len(),
            y: split.len(),
        });
    }

    let x_edges = spatial_edges(x_centers, x_widths)?;
    let y_edges = flux_edges(y_centers, direction, split.start..split.end + 1, cfg.scheme)?;
    let y_both = interleave_centers_edges(&y_centers[split], &y_edges)?;
    let x_both = interleave_centers_edges(x_centers, &x_edges)?;
    let (x_plus, y_plus) = mesh_refinement(&x_both, &y_both)?;

    let rec = hermite(&x_plus, &y_plus, &cfg.spline())?;
    let pick = |v: &[f64]| -> Vec<f64> {
        v.iter()
            .skip(REFINED_OFFSET)
            .step_by(REFINED_STRIDE)
            .copied()
            .collect()
    };
    let points = GhostPoints {
        values: pick(&rec.values),
        derivatives: pick(&rec.auxiliary),
        warning: rec.warning,
    };
    tracing::debug!(target: "spline", cells = points.len(), ?direction, "ghost points built");
    crate::telemetry::record_ghost(&points);
    Ok(points)
}
