use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{
    config::SplineConfig,
    runtime::{Profile, ProfileBatch},
};

/// Sampled profile as written by the transport solver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredProfile {
    pub id: u64,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

/// On-disk batch: samples plus optional per-profile selector overrides.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StoredProfiles {
    pub profiles: Vec<StoredProfile>,
    #[serde(default)]
    pub overrides: HashMap<u64, SplineConfig>,
}

impl From<StoredProfiles> for ProfileBatch {
    fn from(value: StoredProfiles) -> Self {
        let overrides = value.overrides;
        let profiles = value
            .profiles
            .into_iter()
            .map(|stored| Profile {
                spline: overrides.get(&stored.id).cloned(),
                id: stored.id,
                x: stored.x,
                y: stored.y,
            })
            .collect();
        ProfileBatch { profiles }
    }
}

impl From<ProfileBatch> for StoredProfiles {
    fn from(batch: ProfileBatch) -> Self {
        let mut overrides = HashMap::new();
        let mut profiles = Vec::with_capacity(batch.profiles.len());
        for profile in batch.profiles {
            if let Some(spline) = profile.spline {
                overrides.insert(profile.id, spline);
            }
            profiles.push(StoredProfile {
                id: profile.id,
                x: profile.x,
                y: profile.y,
            });
        }
        StoredProfiles {
            profiles,
            overrides,
        }
    }
}
