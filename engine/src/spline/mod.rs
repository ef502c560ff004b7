//! Piecewise Hermite driver.
//!
//! Resolves knots, estimates derivatives once, then evaluates every segment
//! on its own slice of the sample grid. Each shared knot is emitted once:
//! segments contribute `x[k0..k1]` and the final segment also emits `x[last]`.

use serde::{Deserialize, Serialize};

use crate::{
    basis::{AuxMode, BasisFamily, Evaluation, SegmentEnds},
    config::SplineConfig,
    errors::Result,
    knots::{select_knots, KnotSelection, KnotWarning},
    series::SampleSeries,
    utils::{first_derivative, second_derivative},
};

pub mod model;

pub use model::HermiteSpline;

/// Values and companion output aligned with the input grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reconstruction {
    pub values: Vec<f64>,
    /// Derivative or per-segment antiderivative, per `aux`.
    pub auxiliary: Vec<f64>,
    pub aux: AuxMode,
    pub knots: Vec<usize>,
    #[serde(default)]
    pub warning: Option<KnotWarning>,
}

/// Reconstruct `y` on its own grid with the configured basis and knots.
pub fn hermite(x: &[f64], y: &[f64], cfg: &SplineConfig) -> Result<Reconstruction> {
    cfg.validate()?;
    let series = SampleSeries::new(x, y)?;
    let selection = select_knots(&series, cfg.knots.as_ref(), cfg.atol)?;
    let segments = segment_ends(&series, &selection, cfg.stype)?;

    let aux = Evaluation::from(cfg.aux_func);
    let mut values = Vec::with_capacity(series.len());
    let mut auxiliary = Vec::with_capacity(series.len());
    let last_segment = segments.len() - 1;
    for (seg, (ends, pair)) in segments.iter().zip(selection.knots.windows(2)).enumerate() {
        let stop = if seg == last_segment { pair[1] + 1 } else { pair[1] };
        let xs = &x[pair[0]..stop];
        values.extend(cfg.stype.evaluate(Evaluation::Value, ends, xs));
        auxiliary.extend(cfg.stype.evaluate(aux, ends, xs));
    }

    Ok(Reconstruction {
        values,
        auxiliary,
        aux: cfg.aux_func,
        knots: selection.knots,
        warning: selection.warning,
    })
}

/// Endpoint data for every consecutive knot pair.
pub(crate) fn segment_ends(
    series: &SampleSeries<'_>,
    selection: &KnotSelection,
    family: BasisFamily,
) -> Result<Vec<SegmentEnds>> {
    let (x, y) = (series.x(), series.y());
    let dy = first_derivative(x, y)?;
    let d2y = if family.needs_second_derivative() {
        Some(second_derivative(x, y)?)
    } else {
        None
    };
    Ok(selection
        .knots
        .windows(2)
        .map(|pair| SegmentEnds::from_samples(x, y, &dy, d2y.as_deref(), pair[0], pair[1]))
        .collect())
}
