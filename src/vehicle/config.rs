use std::fs::File;
use std::path::Path;

use nalgebra::Vector3;
use serde::Deserialize;

use crate::dynamics::state::positive;
use crate::error::ConfigError;

// ---------------------------------------------------------------------------
// Rocket configuration record (YAML)
// ---------------------------------------------------------------------------

/// Rocket design as read from a YAML file.
///
/// ```yaml
/// mass: { initial: 30.0, dry: 20.0 }
/// engine: { thrust_N: 2000.0, burn_time_s: 5.0 }
/// aerodynamics: { drag_coefficient: 0.3, cross_sectional_area_m2: 0.008 }
/// initial_state:
///   position_m: [0.0, 0.0, 0.0]
///   velocity_ms: [0.0, 0.0, 0.0]
///   initial_direction_vector: [0.0, 0.0, 1.0]
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RocketConfig {
    #[serde(default)]
    pub name: Option<String>,
    pub mass: MassConfig,
    pub engine: EngineConfig,
    pub aerodynamics: AeroConfig,
    #[serde(default)]
    pub initial_state: InitialStateConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct MassConfig {
    pub initial: f64, // kg, structure + propellant
    pub dry: f64,     // kg
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct EngineConfig {
    #[serde(rename = "thrust_N")]
    pub thrust_n: f64,
    pub burn_time_s: f64,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AeroConfig {
    pub drag_coefficient: f64,
    pub cross_sectional_area_m2: f64,
}

/// Vectors are kept as plain lists so a wrong component count surfaces as a
/// [`ConfigError::VectorDimension`] rather than a generic parse failure.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct InitialStateConfig {
    pub position_m: Vec<f64>,
    pub velocity_ms: Vec<f64>,
    pub initial_direction_vector: Vec<f64>,
}

impl Default for InitialStateConfig {
    fn default() -> Self {
        Self {
            position_m: vec![0.0, 0.0, 0.0],
            velocity_ms: vec![0.0, 0.0, 0.0],
            initial_direction_vector: vec![0.0, 0.0, 1.0],
        }
    }
}

impl RocketConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load a configuration file. The rocket is named after the file stem
    /// unless the file names it.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let reader = File::open(path)?;
        let mut config: Self = serde_yaml::from_reader(reader)?;
        if config.name.is_none() {
            config.name = path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned());
        }
        Ok(config)
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("rocket")
    }

    /// Check physical sanity of every scalar and the shape of every vector.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("mass.initial", self.mass.initial)?;
        positive("mass.dry", self.mass.dry)?;
        non_negative("engine.thrust_N", self.engine.thrust_n)?;
        finite("engine.burn_time_s", self.engine.burn_time_s)?;
        non_negative("aerodynamics.drag_coefficient", self.aerodynamics.drag_coefficient)?;
        positive(
            "aerodynamics.cross_sectional_area_m2",
            self.aerodynamics.cross_sectional_area_m2,
        )?;
        self.position()?;
        self.velocity()?;
        self.direction()?;
        Ok(())
    }

    pub fn position(&self) -> Result<Vector3<f64>, ConfigError> {
        vector3("initial_state.position_m", &self.initial_state.position_m)
    }

    pub fn velocity(&self) -> Result<Vector3<f64>, ConfigError> {
        vector3("initial_state.velocity_ms", &self.initial_state.velocity_ms)
    }

    /// Configured thrust direction, not yet normalized.
    pub fn direction(&self) -> Result<Vector3<f64>, ConfigError> {
        vector3(
            "initial_state.initial_direction_vector",
            &self.initial_state.initial_direction_vector,
        )
    }
}

/// Convert a 3-element list into a vector, rejecting any other length.
pub fn vector3(field: &'static str, values: &[f64]) -> Result<Vector3<f64>, ConfigError> {
    if values.len() != 3 {
        return Err(ConfigError::VectorDimension { field, len: values.len() });
    }
    if values.iter().any(|v| !v.is_finite()) {
        return Err(ConfigError::NonFinite { field });
    }
    Ok(Vector3::from_column_slice(values))
}

fn finite(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite { field })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value < 0.0 {
        return Err(ConfigError::Negative { field, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const FULL: &str = r#"
name: Pathfinder
mass:
  initial: 30.0
  dry: 20.0
engine:
  thrust_N: 2000.0
  burn_time_s: 5.0
aerodynamics:
  drag_coefficient: 0.3
  cross_sectional_area_m2: 0.008
initial_state:
  position_m: [0.0, 0.0, 10.0]
  velocity_ms: [1.0, 0.0, 0.0]
  initial_direction_vector: [0.0, 1.0, 1.0]
"#;

    const MINIMAL: &str = r#"
mass: { initial: 30.0, dry: 20.0 }
engine: { thrust_N: 2000.0, burn_time_s: 5.0 }
aerodynamics: { drag_coefficient: 0.3, cross_sectional_area_m2: 0.008 }
"#;

    #[test]
    fn parses_full_record() {
        let c = RocketConfig::from_yaml_str(FULL).unwrap();
        assert_eq!(c.display_name(), "Pathfinder");
        assert_eq!(c.mass.initial, 30.0);
        assert_eq!(c.engine.thrust_n, 2000.0);
        assert_eq!(c.aerodynamics.cross_sectional_area_m2, 0.008);
        assert_eq!(c.position().unwrap(), Vector3::new(0.0, 0.0, 10.0));
        assert_eq!(c.velocity().unwrap(), Vector3::new(1.0, 0.0, 0.0));
        assert_eq!(c.direction().unwrap(), Vector3::new(0.0, 1.0, 1.0));
        assert!(c.validate().is_ok());
    }

    #[test]
    fn initial_state_defaults() {
        let c = RocketConfig::from_yaml_str(MINIMAL).unwrap();
        assert_eq!(c.position().unwrap(), Vector3::zeros());
        assert_eq!(c.velocity().unwrap(), Vector3::zeros());
        assert_eq!(c.direction().unwrap(), Vector3::z());
    }

    #[test]
    fn partial_initial_state_keeps_other_defaults() {
        let yaml = format!("{MINIMAL}initial_state:\n  position_m: [0.0, 0.0, 100.0]\n");
        let c = RocketConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(c.position().unwrap().z, 100.0);
        assert_eq!(c.direction().unwrap(), Vector3::z());
    }

    #[test]
    fn missing_section_is_a_parse_error() {
        let err = RocketConfig::from_yaml_str("mass: { initial: 1.0, dry: 1.0 }").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }

    #[test]
    fn wrong_vector_length_is_fatal() {
        let yaml = format!("{MINIMAL}initial_state:\n  velocity_ms: [0.0, 1.0]\n");
        let c = RocketConfig::from_yaml_str(&yaml).unwrap();
        assert!(matches!(
            c.validate(),
            Err(ConfigError::VectorDimension { field: "initial_state.velocity_ms", len: 2 })
        ));
    }

    #[test]
    fn rejects_non_positive_dry_mass() {
        let mut c = RocketConfig::from_yaml_str(MINIMAL).unwrap();
        c.mass.dry = 0.0;
        assert!(matches!(
            c.validate(),
            Err(ConfigError::NonPositive { field: "mass.dry", .. })
        ));
    }

    #[test]
    fn rejects_negative_thrust() {
        let mut c = RocketConfig::from_yaml_str(MINIMAL).unwrap();
        c.engine.thrust_n = -1.0;
        assert!(matches!(c.validate(), Err(ConfigError::Negative { .. })));
    }

    #[test]
    fn zero_burn_time_is_allowed() {
        let mut c = RocketConfig::from_yaml_str(MINIMAL).unwrap();
        c.engine.burn_time_s = 0.0;
        assert!(c.validate().is_ok());
    }

    #[test]
    fn load_names_rocket_after_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("small_rocket.yaml");
        let mut file = File::create(&path).unwrap();
        file.write_all(MINIMAL.as_bytes()).unwrap();

        let c = RocketConfig::load(&path).unwrap();
        assert_eq!(c.display_name(), "small_rocket");
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = RocketConfig::load(dir.path().join("nope.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
