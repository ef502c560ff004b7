use serde::{Deserialize, Serialize};

use crate::{
    basis::{BasisFamily, Evaluation, SegmentEnds},
    config::SplineConfig,
    errors::Result,
    knots::{select_knots, KnotWarning},
    series::SampleSeries,
    utils::cumulative_trapezoid,
};

use super::segment_ends;

/// Fitted piecewise Hermite spline that can be queried anywhere.
///
/// Unlike [`super::hermite`], which evaluates on the sample grid only, this
/// keeps the per-segment endpoint data so the profile can be resampled onto a
/// refined grid. `integral` is a running antiderivative from `x[0]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HermiteSpline {
    family: BasisFamily,
    segments: Vec<SegmentEnds>,
    /// Integral over all segments before segment `i`.
    offsets: Vec<f64>,
    knots: Vec<usize>,
    warning: Option<KnotWarning>,
}

impl HermiteSpline {
    pub fn fit(x: &[f64], y: &[f64], cfg: &SplineConfig) -> Result<Self> {
        cfg.validate()?;
        let series = SampleSeries::new(x, y)?;
        let selection = select_knots(&series, cfg.knots.as_ref(), cfg.atol)?;
        let segments = segment_ends(&series, &selection, cfg.stype)?;

        let antiderivative = cfg.stype.evaluator(Evaluation::Antiderivative);
        let mut offsets = Vec::with_capacity(segments.len());
        let mut acc = 0.0;
        for seg in &segments {
            offsets.push(acc);
            acc += antiderivative(seg, seg.tk1);
        }

        Ok(Self {
            family: cfg.stype,
            segments,
            offsets,
            knots: selection.knots,
            warning: selection.warning,
        })
    }

    pub fn family(&self) -> BasisFamily {
        self.family
    }

    pub fn knots(&self) -> &[usize] {
        &self.knots
    }

    pub fn warning(&self) -> Option<KnotWarning> {
        self.warning
    }

    pub fn segments(&self) -> &[SegmentEnds] {
        &self.segments
    }

    /// Abscissas of the knots, first to last.
    pub fn breakpoints(&self) -> Vec<f64> {
        let mut out: Vec<f64> = self.segments.iter().map(|s| s.tk0).collect();
        if let Some(last) = self.segments.last() {
            out.push(last.tk1);
        }
        out
    }

    pub fn domain(&self) -> (f64, f64) {
        let first = self.segments.first().map_or(f64::NAN, |s| s.tk0);
        let last = self.segments.last().map_or(f64::NAN, |s| s.tk1);
        (first, last)
    }

    /// Segment owning `x`; points outside the domain extrapolate the end segments.
    fn locate(&self, x: f64) -> usize {
        self.segments
            .partition_point(|s| s.tk1 < x)
            .min(self.segments.len() - 1)
    }

    pub fn value(&self, x: f64) -> f64 {
        let i = self.locate(x);
        self.family.evaluator(Evaluation::Value)(&self.segments[i], x)
    }

    pub fn derivative(&self, x: f64) -> f64 {
        let i = self.locate(x);
        self.family.evaluator(Evaluation::Derivative)(&self.segments[i], x)
    }

    /// Integral of the spline from the first knot to `x`.
    pub fn integral(&self, x: f64) -> f64 {
        let i = self.locate(x);
        self.offsets[i] + self.family.evaluator(Evaluation::Antiderivative)(&self.segments[i], x)
    }

    /// Evaluate `kind` at every query point.
    pub fn evaluate(&self, xs: &[f64], kind: Evaluation) -> Vec<f64> {
        match kind {
            Evaluation::Value => xs.iter().map(|&x| self.value(x)).collect(),
            Evaluation::Derivative => xs.iter().map(|&x| self.derivative(x)).collect(),
            Evaluation::Antiderivative => xs.iter().map(|&x| self.integral(x)).collect(),
        }
    }

    /// Largest gap between the running integral and the trapezoidal
    /// integral of the samples `(x, y)`.
    pub fn quadrature_gap(&self, x: &[f64], y: &[f64]) -> Result<f64> {
        let quadrature = cumulative_trapezoid(x, y)?;
        let origin = self.integral(x[0]);
        Ok(x.iter()
            .zip(&quadrature)
            .map(|(&xi, q)| (self.integral(xi) - origin - q).abs())
            .fold(0.0, f64::max))
    }
}
