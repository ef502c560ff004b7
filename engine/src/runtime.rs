use std::sync::Arc;

use rayon::{prelude::*, ThreadPool};
use serde::{Deserialize, Serialize};

use crate::{
    config::{Concurrency, EngineConfig, SplineConfig},
    errors::{Result, SplineError},
    spline::{hermite, Reconstruction},
    telemetry,
};

/// One sampled profile, e.g. the flux along a single angular direction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: u64,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    /// Per-profile selectors; the engine default applies when absent.
    #[serde(default)]
    pub spline: Option<SplineConfig>,
}

impl Profile {
    pub fn new(id: u64, x: Vec<f64>, y: Vec<f64>) -> Self {
        Self {
            id,
            x,
            y,
            spline: None,
        }
    }
}

/// Batch of independent profiles reconstructed together.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProfileBatch {
    pub profiles: Vec<Profile>,
}

/// Outcome of one profile: a reconstruction or the error that aborted it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileReport {
    pub id: u64,
    pub reconstruction: Option<Reconstruction>,
    pub error: Option<String>,
}

/// Aggregated report returned to the caller.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BatchReport {
    pub profiles: Vec<ProfileReport>,
    pub knot_clamps: usize,
    pub failures: usize,
}

impl BatchReport {
    pub fn summary(&self) -> String {
        format!(
            "profiles={}, knot_clamps={}, failures={}",
            self.profiles.len(),
            self.knot_clamps,
            self.failures
        )
    }

    pub fn get(&self, id: u64) -> Option<&ProfileReport> {
        self.profiles.iter().find(|p| p.id == id)
    }
}

/// Batch front end over the piecewise driver.
///
/// Only the configuration and worker pool live between calls; every report
/// is handed straight back to the caller.
pub trait ReconstructionEngine {
    fn prepare(&mut self, cfg: EngineConfig) -> Result<()>;
    fn reconstruct(&self, batch: ProfileBatch) -> Result<BatchReport>;
    fn shutdown(&mut self) -> Result<()>;
}

/// Concrete engine implementation.
#[derive(Default)]
pub struct SplineEngine {
    cfg: Option<EngineConfig>,
    pool: Option<Arc<ThreadPool>>,
}

impl SplineEngine {
    pub fn new() -> Self {
        Self::default()
    }

    fn evaluate_profile(cfg: &EngineConfig, profile: &Profile) -> ProfileReport {
        let spline = profile.spline.as_ref().unwrap_or(&cfg.spline);
        match hermite(&profile.x, &profile.y, spline) {
            Ok(rec) => {
                telemetry::record_reconstruction(&rec);
                ProfileReport {
                    id: profile.id,
                    reconstruction: Some(rec),
                    error: None,
                }
            }
            Err(err) => {
                tracing::warn!(
                    target: "spline",
                    profile_id = profile.id,
                    "reconstruction failed: {err}"
                );
                telemetry::record_failure(&err);
                ProfileReport {
                    id: profile.id,
                    reconstruction: None,
                    error: Some(err.to_string()),
                }
            }
        }
    }

    fn evaluate_batch(cfg: &EngineConfig, batch: ProfileBatch, parallel: bool) -> BatchReport {
        let profiles: Vec<ProfileReport> = if parallel {
            batch
                .profiles
                .par_iter()
                .map(|p| Self::evaluate_profile(cfg, p))
                .collect()
        } else {
            batch
                .profiles
                .iter()
                .map(|p| Self::evaluate_profile(cfg, p))
                .collect()
        };

        let failures = profiles.iter().filter(|p| p.error.is_some()).count();
        let knot_clamps = profiles
            .iter()
            .filter_map(|p| p.reconstruction.as_ref())
            .filter(|rec| rec.warning.is_some())
            .count();
        let report = BatchReport {
            profiles,
            knot_clamps,
            failures,
        };
        telemetry::record_batch(&report);
        tracing::info!(target: "spline", "batch complete: {}", report.summary());
        report
    }
}

impl ReconstructionEngine for SplineEngine {
    fn prepare(&mut self, cfg: EngineConfig) -> Result<()> {
        cfg.spline.validate()?;
        self.pool = None;
        if let Concurrency::Rayon { workers } = cfg.concurrency {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(workers)
                .build()
                .map_err(|err| SplineError::other(format!("failed to build rayon pool: {err}")))?;
            self.pool = Some(Arc::new(pool));
        }
        self.cfg = Some(cfg);
        Ok(())
    }

    fn reconstruct(&self, batch: ProfileBatch) -> Result<BatchReport> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| SplineError::other("engine not prepared"))?;
        let report = match &self.pool {
            Some(pool) => pool.install(|| SplineEngine::evaluate_batch(cfg, batch, true)),
            None => SplineEngine::evaluate_batch(cfg, batch, false),
        };
        Ok(report)
    }

    fn shutdown(&mut self) -> Result<()> {
        self.cfg = None;
        self.pool = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{basis::BasisFamily, knots::KnotSpec};

    fn batch() -> ProfileBatch {
        let x: Vec<f64> = (0..12).map(|k| k as f64 * 0.1).collect();
        let mut profiles: Vec<Profile> = (0..6)
            .map(|id| {
                let y = x.iter().map(|v| (v * (id + 1) as f64).cos()).collect();
                Profile::new(id, x.clone(), y)
            })
            .collect();
        profiles.push(Profile::new(99, vec![0.0, 1.0], vec![0.0, 1.0]));
        let mut clamped = Profile::new(100, x.clone(), x.clone());
        clamped.spline = Some(SplineConfig {
            stype: BasisFamily::Quintic,
            knots: Some(KnotSpec::Count(50)),
            ..SplineConfig::default()
        });
        profiles.push(clamped);
        ProfileBatch { profiles }
    }

    #[test]
    fn parallel_and_single_agree() {
        let mut single = SplineEngine::new();
        single
            .prepare(EngineConfig {
                concurrency: Concurrency::Single,
                ..EngineConfig::default()
            })
            .unwrap();
        let mut pooled = SplineEngine::new();
        pooled
            .prepare(EngineConfig {
                concurrency: Concurrency::Rayon { workers: 3 },
                ..EngineConfig::default()
            })
            .unwrap();

        let a = single.reconstruct(batch()).unwrap();
        let b = pooled.reconstruct(batch()).unwrap();
        assert_eq!(a.profiles.len(), 8);
        assert_eq!(a.summary(), b.summary());
        for (pa, pb) in a.profiles.iter().zip(&b.profiles) {
            assert_eq!(pa.id, pb.id);
            assert_eq!(pa.reconstruction, pb.reconstruction);
        }
    }

    #[test]
    fn failures_and_clamps_are_counted() {
        let mut engine = SplineEngine::new();
        engine
            .prepare(EngineConfig {
                concurrency: Concurrency::Single,
                ..EngineConfig::default()
            })
            .unwrap();
        let report = engine.reconstruct(batch()).unwrap();
        assert_eq!(report.failures, 1);
        assert_eq!(report.knot_clamps, 1);
        assert!(report.get(99).unwrap().error.is_some());
        let clamped = report.get(100).unwrap().reconstruction.as_ref().unwrap();
        assert_eq!(clamped.knots.len(), 12);
    }

    #[test]
    fn requires_prepare_and_stops_after_shutdown() {
        let mut engine = SplineEngine::new();
        assert!(engine.reconstruct(ProfileBatch::default()).is_err());
        engine.prepare(EngineConfig::default()).unwrap();
        assert!(engine.reconstruct(ProfileBatch::default()).is_ok());
        engine.shutdown().unwrap();
        assert!(engine.reconstruct(ProfileBatch::default()).is_err());
    }

    #[test]
    fn repeated_batches_are_independent() {
        let mut engine = SplineEngine::new();
        engine
            .prepare(EngineConfig {
                concurrency: Concurrency::Rayon { workers: 2 },
                ..EngineConfig::default()
            })
            .unwrap();
        let first = engine.reconstruct(batch()).unwrap();
        for _ in 0..50 {
            engine.reconstruct(batch()).unwrap();
        }
        let last = engine.reconstruct(batch()).unwrap();
        assert_eq!(first.profiles.len(), last.profiles.len());
        assert_eq!(first.summary(), last.summary());
        for (a, b) in first.profiles.iter().zip(&last.profiles) {
            assert_eq!(a.reconstruction, b.reconstruction);
        }
    }
}
