use metrics::{counter, gauge};

use crate::{
    errors::SplineError, ghost::GhostPoints, runtime::BatchReport, spline::Reconstruction,
};

pub fn record_reconstruction(rec: &Reconstruction) {
    gauge!("spline.knots", rec.knots.len() as f64);
    gauge!("spline.samples", rec.values.len() as f64);
    if rec.warning.is_some() {
        counter!("spline.knots.clamped", 1);
    }
}

pub fn record_failure(err: &SplineError) {
    counter!("spline.failures", 1, "kind" => err.kind());
}

pub fn record_ghost(points: &GhostPoints) {
    gauge!("spline.ghost.points", points.len() as f64);
}

pub fn record_batch(report: &BatchReport) {
    counter!("spline.batch.profiles", report.profiles.len() as u64);
    gauge!("spline.batch.failures", report.failures as f64);
    gauge!("spline.batch.knot_clamps", report.knot_clamps as f64);
}
