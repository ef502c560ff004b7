use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    basis::{AuxMode, BasisFamily},
    errors::{Result, SplineError},
    ghost::mesh::EdgeScheme,
    knots::{KnotSpec, DEFAULT_ATOL},
};

/// Concurrency strategy for the batch runtime.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Concurrency {
    /// Single-threaded deterministic execution.
    Single,
    /// Rayon work-stealing pool with the specified number of workers.
    Rayon { workers: usize },
}

impl Default for Concurrency {
    fn default() -> Self {
        Self::Rayon {
            workers: num_cpus::get().max(1),
        }
    }
}

const fn default_atol() -> f64 {
    DEFAULT_ATOL
}

/// Selectors for one piecewise reconstruction.
///
/// `knots = None` selects adaptive placement driven by `atol`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SplineConfig {
    #[serde(default)]
    pub stype: BasisFamily,
    #[serde(default)]
    pub aux_func: AuxMode,
    #[serde(default = "default_atol")]
    pub atol: f64,
    #[serde(default)]
    pub knots: Option<KnotSpec>,
}

impl Default for SplineConfig {
    fn default() -> Self {
        Self {
            stype: BasisFamily::default(),
            aux_func: AuxMode::default(),
            atol: default_atol(),
            knots: None,
        }
    }
}

impl SplineConfig {
    /// Build from the textual selectors used by solver scripts.
    pub fn from_selectors(stype: &str, aux_func: &str) -> Result<Self> {
        Ok(Self {
            stype: stype.parse()?,
            aux_func: aux_func.parse()?,
            ..Self::default()
        })
    }

    pub fn with_knots(mut self, knots: Option<KnotSpec>) -> Self {
        self.knots = knots;
        self
    }

    pub fn with_atol(mut self, atol: f64) -> Self {
        self.atol = atol;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.atol.is_finite() || self.atol < 0.0 {
            return Err(SplineError::InvalidConfig(format!(
                "atol must be finite and non-negative, got {}",
                self.atol
            )));
        }
        Ok(())
    }
}

/// Ghost-point extension settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GhostConfig {
    #[serde(default = "GhostConfig::default_stype")]
    pub stype: BasisFamily,
    #[serde(default)]
    pub scheme: EdgeScheme,
    #[serde(default = "default_atol")]
    pub atol: f64,
    #[serde(default)]
    pub knots: Option<KnotSpec>,
}

impl GhostConfig {
    const fn default_stype() -> BasisFamily {
        BasisFamily::Quintic
    }

    /// Reconstruction settings for the refined mesh; ghosts always carry slopes.
    pub fn spline(&self) -> SplineConfig {
        SplineConfig {
            stype: self.stype,
            aux_func: AuxMode::Derive,
            atol: self.atol,
            knots: self.knots.clone(),
        }
    }
}

impl Default for GhostConfig {
    fn default() -> Self {
        Self {
            stype: Self::default_stype(),
            scheme: EdgeScheme::default(),
            atol: default_atol(),
            knots: None,
        }
    }
}

/// Input/output locations used by the command line front end.
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct IoConfig {
    pub input: Option<String>,
    pub output: Option<String>,
}

/// Engine configuration loaded from TOML/YAML.
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct EngineConfig {
    #[serde(default)]
    pub concurrency: Concurrency,
    #[serde(default)]
    pub spline: SplineConfig,
    #[serde(default)]
    pub ghost: GhostConfig,
    #[serde(default)]
    pub io: IoConfig,
}

impl EngineConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let doc: Value = toml::from_str(raw)?;
        Self::from_document(doc)
    }

    /// Parse a YAML document.
    pub fn from_yaml_str(raw: &str) -> Result<Self> {
        let doc: Value = serde_yaml::from_str(raw)?;
        Self::from_document(doc)
    }

    /// Load a configuration from a TOML file on disk.
    pub fn from_toml_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_toml_str(&fs::read_to_string(path)?)
    }

    /// Load a configuration from a YAML file on disk.
    pub fn from_yaml_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_yaml_str(&fs::read_to_string(path)?)
    }

    /// Pick the loader from the file extension.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_path(path),
            Some("yaml" | "yml") => Self::from_yaml_path(path),
            other => Err(SplineError::InvalidConfig(format!(
                "unsupported config extension {other:?}"
            ))),
        }
    }

    fn from_document(doc: Value) -> Result<Self> {
        let doc = match doc {
            Value::Null => Value::Object(Default::default()),
            doc => doc,
        };
        check_selectors(&doc)?;
        Ok(serde_json::from_value(doc)?)
    }
}

/// Unknown selector strings are configuration errors, not parse errors.
fn check_selectors(doc: &Value) -> Result<()> {
    for pointer in ["/spline/stype", "/ghost/stype"] {
        if let Some(name) = doc.pointer(pointer).and_then(Value::as_str) {
            name.parse::<BasisFamily>()?;
        }
    }
    if let Some(name) = doc.pointer("/spline/aux_func").and_then(Value::as_str) {
        name.parse::<AuxMode>()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_sections_fill_defaults() {
        let raw = r#"
            [concurrency]
            mode = "single"

            [spline]
            stype = "quintic"
            aux_func = "integrate"
            knots = 12

            [ghost]
            scheme = "step"
        "#;
        let cfg = EngineConfig::from_toml_str(raw).unwrap();
        assert_eq!(cfg.concurrency, Concurrency::Single);
        assert_eq!(cfg.spline.stype, BasisFamily::Quintic);
        assert_eq!(cfg.spline.aux_func, AuxMode::Integrate);
        assert_eq!(cfg.spline.knots, Some(KnotSpec::Count(12)));
        assert_eq!(cfg.spline.atol, DEFAULT_ATOL);
        assert_eq!(cfg.ghost.stype, BasisFamily::Quintic);
        assert_eq!(cfg.ghost.scheme, EdgeScheme::Step);
    }

    #[test]
    fn yaml_accepts_explicit_knot_list() {
        let raw = "spline:\n  knots: [0, 4, 9]\n  atol: 1.0e-4\n";
        let cfg = EngineConfig::from_yaml_str(raw).unwrap();
        assert_eq!(cfg.spline.knots, Some(KnotSpec::Indices(vec![0, 4, 9])));
        assert_eq!(cfg.spline.stype, BasisFamily::Cubic);
        assert_eq!(cfg.spline.atol, 1.0e-4);
    }

    #[test]
    fn unknown_selector_is_invalid_config() {
        let err = SplineConfig::from_selectors("bezier", "derive").unwrap_err();
        assert!(matches!(err, SplineError::InvalidConfig(_)));
        let ok = SplineConfig::from_selectors("quintic", "integrate").unwrap();
        assert_eq!(ok.stype, BasisFamily::Quintic);
    }

    #[test]
    fn negative_atol_rejected() {
        assert!(SplineConfig::default().with_atol(-1.0).validate().is_err());
        assert!(SplineConfig::default().validate().is_ok());
    }

    #[test]
    fn unknown_selector_in_file_is_invalid_config() {
        let path = std::env::temp_dir().join(format!("spline-cfg-{}.toml", std::process::id()));
        fs::write(&path, "[spline]\nstype = \"linear\"\n").unwrap();
        let err = EngineConfig::from_path(&path).unwrap_err();
        let _ = fs::remove_file(&path);
        assert!(matches!(err, SplineError::InvalidConfig(_)), "{err:?}");
        assert_eq!(err.kind(), "invalid_config");

        let err = EngineConfig::from_yaml_str("spline:\n  aux_func: differentiate\n").unwrap_err();
        assert!(matches!(err, SplineError::InvalidConfig(_)));
        let err = EngineConfig::from_toml_str("[ghost]\nstype = \"bezier\"\n").unwrap_err();
        assert!(matches!(err, SplineError::InvalidConfig(_)));
    }

    #[test]
    fn file_selectors_are_case_insensitive() {
        let cfg = EngineConfig::from_toml_str("[spline]\nstype = \"Quintic\"\n").unwrap();
        assert_eq!(cfg.spline.stype, BasisFamily::Quintic);
        let cfg = EngineConfig::from_yaml_str("spline:\n  aux_func: Integrate\n").unwrap();
        assert_eq!(cfg.spline.aux_func, AuxMode::Integrate);
    }

    #[test]
    fn malformed_document_is_parse_error() {
        let err = EngineConfig::from_toml_str("[spline\nstype =").unwrap_err();
        assert_eq!(err.kind(), "parse");
        let err = EngineConfig::from_yaml_str("spline:\n  atol: [1, 2]\n").unwrap_err();
        assert_eq!(err.kind(), "parse");
    }

    #[test]
    fn unknown_extension_rejected() {
        let err = EngineConfig::from_path("engine.ini").unwrap_err();
        assert!(matches!(err, SplineError::InvalidConfig(_)));
    }
}
