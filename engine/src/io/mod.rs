use std::{fs, path::Path};

use serde::{de::DeserializeOwned, Serialize};

use crate::errors::Result;

pub mod simple;

pub fn load_json<T, P>(path: P) -> Result<T>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let bytes = fs::read(path)?;
    let value = serde_json::from_slice(&bytes)?;
    Ok(value)
}

pub fn write_json<T, P>(path: P, value: &T) -> Result<()>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let bytes = serde_json::to_vec_pretty(value)?;
    fs::write(path, bytes)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        basis::BasisFamily,
        config::SplineConfig,
        io::simple::{StoredProfile, StoredProfiles},
        runtime::ProfileBatch,
    };

    #[test]
    fn stored_profiles_survive_disk_and_keep_overrides() {
        let mut stored = StoredProfiles {
            profiles: vec![
                StoredProfile {
                    id: 1,
                    x: vec![0.0, 0.5, 1.0],
                    y: vec![1.0, 0.5, 0.0],
                },
                StoredProfile {
                    id: 2,
                    x: vec![0.0, 1.0, 2.0],
                    y: vec![0.0, 1.0, 4.0],
                },
            ],
            ..StoredProfiles::default()
        };
        stored.overrides.insert(
            2,
            SplineConfig {
                stype: BasisFamily::Quintic,
                ..SplineConfig::default()
            },
        );

        let path = std::env::temp_dir().join(format!("spline-io-{}.json", std::process::id()));
        write_json(&path, &stored).unwrap();
        let loaded: StoredProfiles = load_json(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        let batch: ProfileBatch = loaded.into();
        assert_eq!(batch.profiles.len(), 2);
        assert!(batch.profiles[0].spline.is_none());
        assert_eq!(
            batch.profiles[1].spline.as_ref().map(|s| s.stype),
            Some(BasisFamily::Quintic)
        );
        let back: StoredProfiles = batch.into();
        assert_eq!(back.overrides.len(), 1);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_json::<StoredProfiles, _>("/nonexistent/profiles.json").unwrap_err();
        assert!(matches!(err, crate::errors::SplineError::Io(_)));
    }
}
