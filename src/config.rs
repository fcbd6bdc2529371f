//! Simulation configuration.
//!
//! A [`SimulationConfig`] describes a whole run: screen size, optional RNG
//! seed, which scenario to set up, whether collisions are on, and how the
//! diagnostics overlay is justified. It can be serialized to JSON and
//! loaded back by the driver binary:
//!
//! ```json
//! {
//!   "name": "Warp",
//!   "width": 1024,
//!   "height": 768,
//!   "scenario": { "type": "hyperdrive", "mass_floor": 4000 },
//!   "justification": "right"
//! }
//! ```

use crate::body::Bounds;
use crate::decay::MIN_SIZE;
use crate::error::ConfigError;
use crate::overlay::Justification;
use crate::spawner::StarTemplate;
use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

fn default_width() -> f64 {
    800.0
}

fn default_height() -> f64 {
    600.0
}

fn default_initial_stars() -> usize {
    1
}

fn default_mass_floor() -> f64 {
    2500.0
}

/// Largest accepted mass floor. A hyperdrive field at this floor is
/// roughly fifty thousand stars.
pub const MAX_MASS_FLOOR: f64 = 1_000_000.0;

/// Inclusive size range for newly spawned stars.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct SizeRange {
    pub min: f64,
    pub max: f64,
}

impl SizeRange {
    /// `template` with its size bounds replaced by this range.
    pub fn apply(&self, mut template: StarTemplate) -> StarTemplate {
        template.size_min = self.min;
        template.size_max = self.max;
        template
    }

    fn validate(&self, field: &'static str) -> Result<(), ConfigError> {
        let ordered = self.min.is_finite() && self.max.is_finite() && self.min <= self.max;
        if ordered && self.min >= MIN_SIZE {
            Ok(())
        } else {
            Err(ConfigError::InvalidRange {
                field,
                min: self.min,
                max: self.max,
            })
        }
    }
}

/// One drag gesture replayed at startup.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct Launch {
    pub from: DVec2,
    pub to: DVec2,
}

/// Which built-in setup to run.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Scenario {
    /// A few big stars that shed debris and explode when worn out.
    FallingStars {
        #[serde(default = "default_initial_stars")]
        initial_stars: usize,
        /// Keep the star category above this mass. Off when absent.
        #[serde(default)]
        mass_floor: Option<f64>,
        /// Overrides the 5..=20 star sizes.
        #[serde(default)]
        star_size: Option<SizeRange>,
    },
    /// Star field rushing outward from the centre, topped up to a mass floor.
    Hyperdrive {
        #[serde(default = "default_mass_floor")]
        mass_floor: f64,
        /// Overrides the 1..=7 star sizes.
        #[serde(default)]
        star_size: Option<SizeRange>,
    },
    /// Drag-aimed spark fountains.
    Firework {
        #[serde(default)]
        launches: Vec<Launch>,
    },
}

impl Scenario {
    pub fn name(&self) -> &'static str {
        match self {
            Scenario::FallingStars { .. } => "falling_stars",
            Scenario::Hyperdrive { .. } => "hyperdrive",
            Scenario::Firework { .. } => "firework",
        }
    }

    /// Template for the stars this scenario spawns, if it spawns any.
    pub fn star_template(&self) -> Option<StarTemplate> {
        let (template, star_size) = match self {
            Scenario::FallingStars { star_size, .. } => (StarTemplate::falling_star(), star_size),
            Scenario::Hyperdrive { star_size, .. } => (StarTemplate::hyperdrive(), star_size),
            Scenario::Firework { .. } => return None,
        };
        Some(sized(template, *star_size))
    }
}

impl Default for Scenario {
    fn default() -> Self {
        Scenario::Hyperdrive {
            mass_floor: default_mass_floor(),
            star_size: None,
        }
    }
}

/// Complete simulation configuration
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SimulationConfig {
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_width")]
    pub width: f64,
    #[serde(default = "default_height")]
    pub height: f64,
    /// Fixed RNG seed; entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub scenario: Scenario,
    /// Resolve collisions between stars.
    #[serde(default)]
    pub collisions: bool,
    /// Alignment of the diagnostics overlay.
    #[serde(default)]
    pub justification: Justification,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            name: "Untitled".into(),
            width: default_width(),
            height: default_height(),
            seed: None,
            scenario: Scenario::default(),
            collisions: false,
            justification: Justification::default(),
        }
    }
}

impl SimulationConfig {
    /// Falling stars with a single star to start.
    pub fn falling_stars() -> Self {
        Self {
            name: "Falling stars".into(),
            scenario: Scenario::FallingStars {
                initial_stars: default_initial_stars(),
                mass_floor: None,
                star_size: None,
            },
            ..Default::default()
        }
    }

    pub fn hyperdrive() -> Self {
        Self {
            name: "Hyperdrive".into(),
            ..Default::default()
        }
    }

    /// Firework with no launches; emitters come from drag gestures.
    pub fn firework() -> Self {
        Self {
            name: "Firework".into(),
            scenario: Scenario::Firework { launches: Vec::new() },
            ..Default::default()
        }
    }

    /// Built-in configuration by scenario name.
    pub fn preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "falling_stars" | "falling-stars" => Ok(Self::falling_stars()),
            "hyperdrive" => Ok(Self::hyperdrive()),
            "firework" => Ok(Self::firework()),
            other => Err(ConfigError::InvalidValue {
                field: "scenario",
                value: other.to_owned(),
            }),
        }
    }

    /// Load and validate a configuration from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Parse and validate a configuration from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Save the configuration to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let valid_side = |side: f64| side.is_finite() && side > 0.0;
        if !valid_side(self.width) || !valid_side(self.height) {
            return Err(ConfigError::InvalidBounds {
                width: self.width,
                height: self.height,
            });
        }

        match &self.scenario {
            Scenario::FallingStars {
                mass_floor,
                star_size,
                ..
            } => {
                if let Some(floor) = mass_floor {
                    validate_floor(*floor)?;
                }
                star_size.map_or(Ok(()), |range| range.validate("star_size"))
            }
            Scenario::Hyperdrive { mass_floor, star_size } => {
                validate_floor(*mass_floor)?;
                star_size.map_or(Ok(()), |range| range.validate("star_size"))
            }
            Scenario::Firework { .. } => Ok(()),
        }
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::from_size(self.width, self.height)
    }
}

pub(crate) fn sized(template: StarTemplate, star_size: Option<SizeRange>) -> StarTemplate {
    match star_size {
        Some(range) => range.apply(template),
        None => template,
    }
}

fn validate_floor(floor: f64) -> Result<(), ConfigError> {
    if floor.is_finite() && (0.0..=MAX_MASS_FLOOR).contains(&floor) {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            field: "mass_floor",
            value: floor.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SimulationConfig::default();
        assert_eq!(config.bounds(), Bounds::from_size(800.0, 600.0));
        assert_eq!(
            config.scenario,
            Scenario::Hyperdrive {
                mass_floor: 2500.0,
                star_size: None
            }
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_round_trip() {
        let mut config = SimulationConfig::firework();
        config.seed = Some(9);
        config.scenario = Scenario::Firework {
            launches: vec![Launch {
                from: DVec2::new(400.0, 580.0),
                to: DVec2::new(420.0, 500.0),
            }],
        };

        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(SimulationConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn test_minimal_json_uses_defaults() {
        let config = SimulationConfig::from_json_str(r#"{"scenario":{"type":"falling_stars"}}"#).unwrap();
        assert_eq!(config.width, 800.0);
        assert_eq!(
            config.scenario,
            Scenario::FallingStars {
                initial_stars: 1,
                mass_floor: None,
                star_size: None
            }
        );
        assert_eq!(config.justification, Justification::Right);
    }

    #[test]
    fn test_invalid_bounds() {
        let err = SimulationConfig::from_json_str(r#"{"width":0,"height":600}"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBounds { .. }));
    }

    #[test]
    fn test_invalid_mass_floor() {
        let err =
            SimulationConfig::from_json_str(r#"{"scenario":{"type":"hyperdrive","mass_floor":-1}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { field: "mass_floor", .. }));
    }

    #[test]
    fn test_huge_mass_floor_rejected() {
        let err =
            SimulationConfig::from_json_str(r#"{"scenario":{"type":"hyperdrive","mass_floor":1e15}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { field: "mass_floor", .. }));

        let json = r#"{"scenario":{"type":"falling_stars","mass_floor":1e7}}"#;
        assert!(SimulationConfig::from_json_str(json).is_err());
        let json = r#"{"scenario":{"type":"hyperdrive","mass_floor":1e6}}"#;
        assert!(SimulationConfig::from_json_str(json).is_ok());
    }

    #[test]
    fn test_star_size_range() {
        let json = r#"{"scenario":{"type":"hyperdrive","star_size":{"min":2,"max":4}}}"#;
        let config = SimulationConfig::from_json_str(json).unwrap();
        let template = config.scenario.star_template().unwrap();
        assert_eq!((template.size_min, template.size_max), (2.0, 4.0));

        let reversed = r#"{"scenario":{"type":"falling_stars","star_size":{"min":9,"max":3}}}"#;
        let err = SimulationConfig::from_json_str(reversed).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidRange {
                field: "star_size",
                min,
                max
            } if min == 9.0 && max == 3.0
        ));

        let too_small = r#"{"scenario":{"type":"hyperdrive","star_size":{"min":0.5,"max":3}}}"#;
        assert!(matches!(
            SimulationConfig::from_json_str(too_small),
            Err(ConfigError::InvalidRange { .. })
        ));

        assert!(SimulationConfig::firework().scenario.star_template().is_none());
    }

    #[test]
    fn test_invalid_justification() {
        let err = SimulationConfig::from_json_str(r#"{"justification":"middle"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
        assert!(err.to_string().contains("middle"));
    }

    #[test]
    fn test_unknown_preset() {
        assert!(SimulationConfig::preset("hyperdrive").is_ok());
        let err = SimulationConfig::preset("nebula").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { field: "scenario", .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = SimulationConfig::from_path("/nonexistent/starfall.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
