//! Configuration file handling.
//!
//! Configuration is organized into two sections: the machine description
//! (bed travel, print head and gantry clearances) and the queue behavior
//! flags a user can toggle at runtime. Files are JSON or TOML, dispatched
//! on the file extension, and validated on load so that a broken machine
//! description is rejected before any placement engine is built from it.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::info;

use platekit_core::geometry::{Cuboid, Rectangle};
use platekit_core::machine::{gantry_from_clearances, GantryOrientation, MachineGeometry};

use crate::error::{ConfigError, SettingsError, SettingsResult};

/// Default clearance between objects, in mm, if not configured.
pub const DEFAULT_PADDING: f64 = 5.0;

/// Travel limits of one stepper axis, in mm.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRange {
    pub position_min: f64,
    pub position_max: f64,
}

impl Default for AxisRange {
    fn default() -> Self {
        Self {
            position_min: 0.0,
            position_max: 200.0,
        }
    }
}

/// Machine description the placement engine is built from.
///
/// Head and gantry values are clearances measured from the nozzle, so
/// they are positive in both directions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineSettings {
    pub stepper_x: AxisRange,
    pub stepper_y: AxisRange,
    pub stepper_z: AxisRange,

    /// Head footprint behind the nozzle on X.
    pub printhead_x_min: f64,
    /// Head footprint ahead of the nozzle on X.
    pub printhead_x_max: f64,
    pub printhead_y_min: f64,
    pub printhead_y_max: f64,

    /// Bar extent behind the nozzle on the travel axis.
    pub gantry_xy_min: f64,
    /// Bar extent ahead of the nozzle on the travel axis.
    pub gantry_xy_max: f64,
    pub gantry_orientation: GantryOrientation,
    /// Z height below which the bar passes over printed objects.
    pub gantry_z_min: f64,

    /// Minimum clearance kept between objects, in mm.
    pub padding: f64,
}

impl Default for MachineSettings {
    fn default() -> Self {
        Self {
            stepper_x: AxisRange::default(),
            stepper_y: AxisRange::default(),
            stepper_z: AxisRange::default(),
            printhead_x_min: 25.0,
            printhead_x_max: 25.0,
            printhead_y_min: 25.0,
            printhead_y_max: 25.0,
            gantry_xy_min: 20.0,
            gantry_xy_max: 20.0,
            gantry_orientation: GantryOrientation::AlongX,
            gantry_z_min: 50.0,
            padding: DEFAULT_PADDING,
        }
    }
}

impl MachineSettings {
    /// The build volume as a box.
    pub fn printbed(&self) -> Cuboid {
        Cuboid::new(
            self.stepper_x.position_min,
            self.stepper_y.position_min,
            self.stepper_z.position_min,
            self.stepper_x.position_max,
            self.stepper_y.position_max,
            self.stepper_z.position_max,
        )
    }

    /// The head footprint as seen from above, nozzle at (0, 0).
    pub fn printhead(&self) -> Rectangle {
        Rectangle::new(
            -self.printhead_x_min,
            -self.printhead_y_min,
            self.printhead_x_max,
            self.printhead_y_max,
        )
    }

    /// The static geometry handed to the placement engine.
    pub fn to_geometry(&self) -> MachineGeometry {
        let printbed = self.printbed();
        MachineGeometry {
            printbed,
            printhead: self.printhead(),
            gantry: gantry_from_clearances(
                &printbed,
                self.gantry_xy_min,
                self.gantry_xy_max,
                self.gantry_orientation,
            ),
            gantry_orientation: self.gantry_orientation,
            gantry_height: self.gantry_z_min,
            padding: self.padding,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let out_of_range = |key: &str, value: f64| ConfigError::ValueOutOfRange {
            key: key.to_string(),
            value: value.to_string(),
        };

        for (name, axis) in [
            ("machine.stepper_x", self.stepper_x),
            ("machine.stepper_y", self.stepper_y),
            ("machine.stepper_z", self.stepper_z),
        ] {
            if axis.position_max <= axis.position_min {
                return Err(out_of_range(
                    &format!("{name}.position_max"),
                    axis.position_max,
                ));
            }
        }
        if self.printhead_x_min + self.printhead_x_max < 0.0 {
            return Err(out_of_range(
                "machine.printhead_x_max",
                self.printhead_x_max,
            ));
        }
        if self.printhead_y_min + self.printhead_y_max < 0.0 {
            return Err(out_of_range(
                "machine.printhead_y_max",
                self.printhead_y_max,
            ));
        }
        if self.gantry_xy_min + self.gantry_xy_max < 0.0 {
            return Err(out_of_range("machine.gantry_xy_max", self.gantry_xy_max));
        }
        if self.gantry_z_min < 0.0 {
            return Err(out_of_range("machine.gantry_z_min", self.gantry_z_min));
        }
        if self.padding <= 0.0 {
            return Err(out_of_range("machine.padding", self.padding));
        }
        Ok(())
    }
}

/// Which loaded material counts as compatible when deciding whether a
/// queued job may start. Only the flag lives here; the actual material
/// check is performed by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MaterialCondition {
    /// The exact same material must be loaded.
    Exact,
    /// Any material of the same type will do.
    Type,
    /// Print regardless of the loaded material.
    #[default]
    Any,
}

impl std::fmt::Display for MaterialCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exact => write!(f, "exact"),
            Self::Type => write!(f, "type"),
            Self::Any => write!(f, "any"),
        }
    }
}

impl FromStr for MaterialCondition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "exact" => Ok(Self::Exact),
            "type" => Ok(Self::Type),
            "any" => Ok(Self::Any),
            _ => Err(format!("Unknown material condition: {}", s)),
        }
    }
}

/// User-facing queue behavior flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct QueueSettings {
    /// Start queued jobs while finished prints still occupy the bed.
    pub continuous_printing: bool,
    /// Search for a placement offset when the sliced position collides.
    pub reposition: bool,
    /// Material compatibility required before a queued job may start.
    pub condition: MaterialCondition,
}

/// Top-level configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub machine: MachineSettings,
    pub queue: QueueSettings,
}

impl Config {
    /// Load and validate a configuration file (`.json` or `.toml`).
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path)?;

        let config: Self = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)?
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            toml::from_str(&content)?
        } else {
            return Err(ConfigError::UnsupportedFormat(
                path.extension()
                    .and_then(|ext| ext.to_str())
                    .unwrap_or("none")
                    .to_string(),
            )
            .into());
        };

        config.validate()?;
        info!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Save the configuration (`.json` or `.toml`, by extension).
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        let content = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::to_string_pretty(self)?
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            toml::to_string_pretty(self)?
        } else {
            return Err(ConfigError::UnsupportedFormat(
                path.extension()
                    .and_then(|ext| ext.to_str())
                    .unwrap_or("none")
                    .to_string(),
            )
            .into());
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// The default configuration file location for this platform.
    pub fn default_config_path() -> SettingsResult<PathBuf> {
        let base = dirs::config_dir()
            .ok_or_else(|| SettingsError::ConfigDirectory("no config directory".to_string()))?;
        Ok(base.join("platekit").join("config.toml"))
    }

    /// Reject configurations the placement engine must never be built
    /// from.
    pub fn validate(&self) -> SettingsResult<()> {
        self.machine.validate()?;
        Ok(())
    }
}
