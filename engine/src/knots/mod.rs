//! Break-point selection for piecewise Hermite reconstruction.
//!
//! Knots are indices into the abscissa array. The adaptive selector marks a
//! sample whenever the area between it and the chord through its neighbours
//! exceeds `atol`, then unions the result with a sparse uniform set so long
//! smooth stretches still get segment boundaries.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    errors::{Result, SplineError},
    series::SampleSeries,
};

/// Adaptive sensitivity tuned for smooth flux profiles.
pub const DEFAULT_ATOL: f64 = 5e-5;

/// Fraction of the sample count used for the minimum-density uniform set.
const DENSITY_FRACTION: f64 = 0.2;

/// Caller-supplied knot request. `None` at the call site selects adaptive mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KnotSpec {
    /// Number of uniform segments; yields `count + 1` knots.
    Count(usize),
    /// Explicit knot indices, used as given.
    Indices(Vec<usize>),
}

/// Recoverable degradation reported alongside a knot set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum KnotWarning {
    /// More knots were requested than samples exist.
    Clamped {
        requested: usize,
        available: usize,
        reduced_to: usize,
    },
}

impl fmt::Display for KnotWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Clamped {
                requested,
                available,
                reduced_to,
            } => write!(
                f,
                "{requested} knots requested but only {available} samples exist; \
                 reduced to {reduced_to} segments"
            ),
        }
    }
}

/// Resolved knot set plus any warning raised while resolving it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnotSelection {
    pub knots: Vec<usize>,
    pub warning: Option<KnotWarning>,
}

impl KnotSelection {
    pub fn segments(&self) -> usize {
        self.knots.len().saturating_sub(1)
    }
}

/// Evenly distributed indices `0..=span` split into `segments` gaps.
///
/// Gaps are `span / segments` wide; the remainder widens gaps spread across
/// the range. Returns `None` for zero segments. With `segments > span` the
/// output repeats indices.
pub fn uniform_indices(span: usize, segments: usize) -> Option<Vec<usize>> {
    if segments == 0 {
        return None;
    }
    let mut gaps = vec![span / segments; segments];
    let extra = span % segments;
    for i in 0..extra {
        let pos = if extra == 1 {
            0
        } else {
            i * (segments - 1) / (extra - 1)
        };
        gaps[pos] += 1;
    }
    let mut out = Vec::with_capacity(segments + 1);
    let mut acc = 0;
    out.push(acc);
    for gap in gaps {
        acc += gap;
        out.push(acc);
    }
    Some(out)
}

/// Area-deviation knot placement with a uniform minimum density.
pub fn adaptive_knots(series: &SampleSeries<'_>, atol: f64) -> Vec<usize> {
    let (x, y) = (series.x(), series.y());
    let n = series.len();
    let mut knots = vec![0];
    for cell in 0..n - 2 {
        let bend = 0.5 * y[cell] - y[cell + 1] + 0.5 * y[cell + 2];
        let area = (bend * (x[cell + 1] - x[cell])).abs();
        if area > atol {
            knots.push(cell + 1);
        }
    }
    knots.push(n - 1);
    let density = (n as f64 * DENSITY_FRACTION) as usize;
    if let Some(extra) = uniform_indices(n - 1, density) {
        knots.extend(extra);
    }
    knots.sort_unstable();
    knots.dedup();
    knots
}

/// Resolve a knot request against a series, clamping oversize requests.
pub fn select_knots(
    series: &SampleSeries<'_>,
    spec: Option<&KnotSpec>,
    atol: f64,
) -> Result<KnotSelection> {
    let last = series.last_index();
    let mut knots = match spec {
        None => adaptive_knots(series, atol),
        Some(KnotSpec::Count(count)) => uniform_indices(last, *count)
            .ok_or_else(|| SplineError::knots("knot count must be at least one segment"))?,
        Some(KnotSpec::Indices(indices)) => indices.clone(),
    };

    let mut warning = None;
    if knots.len() > series.len() {
        let clamped = KnotWarning::Clamped {
            requested: knots.len(),
            available: series.len(),
            reduced_to: last,
        };
        tracing::warn!(target: "spline", "{clamped}");
        warning = Some(clamped);
        knots = uniform_indices(last, last)
            .ok_or_else(|| SplineError::knots("series has a single sample"))?;
    }

    validate(&knots, series.len())?;
    tracing::debug!(
        target: "spline",
        knots = knots.len(),
        samples = series.len(),
        "knots resolved"
    );
    Ok(KnotSelection { knots, warning })
}

fn validate(knots: &[usize], samples: usize) -> Result<()> {
    if knots.len() < 2 {
        return Err(SplineError::knots(format!(
            "need at least two knots, got {}",
            knots.len()
        )));
    }
    if knots[0] != 0 {
        return Err(SplineError::knots(format!(
            "first knot must be 0, got {}",
            knots[0]
        )));
    }
    if let Some(w) = knots.windows(2).find(|w| w[1] <= w[0]) {
        return Err(SplineError::knots(format!(
            "knots must be strictly increasing ({} then {})",
            w[0], w[1]
        )));
    }
    let end = knots[knots.len() - 1];
    if end != samples - 1 {
        return Err(SplineError::knots(format!(
            "last knot must be {}, got {end}",
            samples - 1
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(n: usize) -> (Vec<f64>, Vec<f64>) {
        let x: Vec<f64> = (0..n).map(|k| k as f64 / (n - 1) as f64).collect();
        (x.clone(), x)
    }

    #[test]
    fn uniform_indices_spread_remainder() {
        assert_eq!(uniform_indices(4, 1), Some(vec![0, 4]));
        assert_eq!(uniform_indices(9, 3), Some(vec![0, 3, 6, 9]));
        assert_eq!(uniform_indices(10, 3), Some(vec![0, 4, 7, 10]));
        assert_eq!(uniform_indices(11, 3), Some(vec![0, 4, 7, 11]));
        assert_eq!(uniform_indices(5, 0), None);
    }

    #[test]
    fn identity_line_has_no_interior_knots() {
        let x = [0.0, 0.25, 0.5, 0.75, 1.0];
        let series = SampleSeries::new(&x, &x).unwrap();
        let selection = select_knots(&series, None, DEFAULT_ATOL).unwrap();
        assert_eq!(selection.knots, vec![0, 4]);
        assert!(selection.warning.is_none());
    }

    #[test]
    fn kink_becomes_knot() {
        let x = [0.0, 1.0, 2.0, 3.0];
        let y = [0.0, 0.0, 1.0, 2.0];
        let series = SampleSeries::new(&x, &y).unwrap();
        let knots = adaptive_knots(&series, 1e-3);
        assert_eq!(knots, vec![0, 1, 3]);
    }

    #[test]
    fn long_series_gets_minimum_density() {
        let (x, y) = line(21);
        let series = SampleSeries::new(&x, &y).unwrap();
        assert_eq!(adaptive_knots(&series, DEFAULT_ATOL), vec![0, 5, 10, 15, 20]);
    }

    #[test]
    fn oversize_count_is_clamped_with_warning() {
        let (x, y) = line(10);
        let series = SampleSeries::new(&x, &y).unwrap();
        let selection = select_knots(&series, Some(&KnotSpec::Count(100)), DEFAULT_ATOL).unwrap();
        assert_eq!(selection.segments(), 9);
        assert_eq!(selection.knots, (0..10).collect::<Vec<_>>());
        assert_eq!(
            selection.warning,
            Some(KnotWarning::Clamped {
                requested: 101,
                available: 10,
                reduced_to: 9
            })
        );
    }

    #[test]
    fn explicit_indices_are_checked() {
        let (x, y) = line(6);
        let series = SampleSeries::new(&x, &y).unwrap();
        let ok = select_knots(&series, Some(&KnotSpec::Indices(vec![0, 2, 5])), 0.0).unwrap();
        assert_eq!(ok.knots, vec![0, 2, 5]);
        for bad in [vec![0, 3, 3, 5], vec![1, 5], vec![0, 4], vec![0]] {
            let err = select_knots(&series, Some(&KnotSpec::Indices(bad)), 0.0).unwrap_err();
            assert!(matches!(err, SplineError::InvalidKnots(_)));
        }
    }

    #[test]
    fn zero_count_is_rejected() {
        let (x, y) = line(6);
        let series = SampleSeries::new(&x, &y).unwrap();
        assert!(select_knots(&series, Some(&KnotSpec::Count(0)), 0.0).is_err());
    }

    #[test]
    fn knot_spec_deserializes_from_number_or_list() {
        let count: KnotSpec = serde_json::from_str("8").unwrap();
        assert_eq!(count, KnotSpec::Count(8));
        let list: KnotSpec = serde_json::from_str("[0, 3, 7]").unwrap();
        assert_eq!(list, KnotSpec::Indices(vec![0, 3, 7]));
    }
}
