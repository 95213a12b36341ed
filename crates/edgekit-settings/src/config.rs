//! Configuration for board-outline routing
//!
//! Configuration is organized into logical sections:
//! - Machine settings (heights, feed, spindle, entry point)
//! - Tool settings (cutter diameter)
//! - Geometry settings (endpoint tolerance, arc approximation)
//!
//! Files may be JSON or TOML; the format is picked from the extension.

use crate::error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
use edgekit_core::{Point, Tolerance};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Machine motion settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineSettings {
    /// Z height for travel moves between contours (mm)
    pub retract_height: f64,
    /// Z height the rapid plunge stops at before feeding into the stock (mm)
    pub plunge_start_height: f64,
    /// Final Z of the cut (mm, negative below the stock top)
    pub cut_depth: f64,
    /// Cutting feed rate (mm/min)
    pub feed_rate: f64,
    /// Spindle speed (RPM)
    pub spindle_speed: f64,
    /// Machine position used to pick where each contour is entered
    pub entry_point: Point,
}

impl Default for MachineSettings {
    fn default() -> Self {
        Self {
            retract_height: 20.0,
            plunge_start_height: 1.0,
            cut_depth: -1.65,
            feed_rate: 100.0,
            spindle_speed: 10000.0,
            entry_point: Point::new(0.0, 0.0),
        }
    }
}

/// Cutter settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolSettings {
    /// Cutter diameter (mm)
    pub tool_diameter: f64,
}

impl ToolSettings {
    /// Radius used for compensation.
    pub fn radius(&self) -> f64 {
        self.tool_diameter / 2.0
    }
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self { tool_diameter: 2.0 }
    }
}

/// Geometry reconstruction settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometrySettings {
    /// Grid step that endpoints are snapped to before linking
    pub endpoint_tolerance: Tolerance,
    /// Line segments per arc when no deviation bound is set
    pub arc_segment_count: usize,
    /// Maximum chord deviation (mm); when set, segment count follows arc radius
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arc_max_deviation: Option<f64>,
}

impl Default for GeometrySettings {
    fn default() -> Self {
        Self {
            endpoint_tolerance: Tolerance::default(),
            arc_segment_count: 20,
            arc_max_deviation: None,
        }
    }
}

/// Complete routing configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub machine: MachineSettings,
    pub tool: ToolSettings,
    pub geometry: GeometrySettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Default location: `<config dir>/edgekit/config.toml`
    pub fn default_path() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("edgekit").join("config.toml"))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("no configuration directory on this platform".into())
            })
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SettingsError::LoadError(format!("{}: {}", path.display(), e))
        })?;

        let config: Self = match Self::format_of(path)? {
            FileFormat::Json => serde_json::from_str(&content)?,
            FileFormat::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match Self::format_of(path)? {
            FileFormat::Json => serde_json::to_string_pretty(self)?,
            FileFormat::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        let m = &self.machine;
        positive("machine.feed_rate", m.feed_rate)?;
        positive("machine.spindle_speed", m.spindle_speed)?;
        finite("machine.retract_height", m.retract_height)?;
        finite("machine.plunge_start_height", m.plunge_start_height)?;
        finite("machine.cut_depth", m.cut_depth)?;
        finite("machine.entry_point.x", m.entry_point.x)?;
        finite("machine.entry_point.y", m.entry_point.y)?;

        if m.retract_height < m.plunge_start_height {
            return Err(ConfigError::Inconsistent(format!(
                "retract height {} is below plunge start height {}",
                m.retract_height, m.plunge_start_height
            )));
        }
        if m.plunge_start_height <= m.cut_depth {
            return Err(ConfigError::Inconsistent(format!(
                "plunge start height {} must be above cut depth {}",
                m.plunge_start_height, m.cut_depth
            )));
        }

        positive("tool.tool_diameter", self.tool.tool_diameter)?;

        if self.geometry.arc_segment_count == 0 {
            return Err(ConfigError::ValueOutOfRange {
                key: "geometry.arc_segment_count".to_string(),
                value: "0".to_string(),
            });
        }
        if let Some(deviation) = self.geometry.arc_max_deviation {
            positive("geometry.arc_max_deviation", deviation)?;
        }

        Ok(())
    }

    fn format_of(path: &Path) -> ConfigResult<FileFormat> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(FileFormat::Json),
            Some("toml") => Ok(FileFormat::Toml),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

enum FileFormat {
    Json,
    Toml,
}

fn finite(key: &str, value: f64) -> ConfigResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::ValueOutOfRange {
            key: key.to_string(),
            value: value.to_string(),
        })
    }
}

fn positive(key: &str, value: f64) -> ConfigResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::ValueOutOfRange {
            key: key.to_string(),
            value: value.to_string(),
        })
    }
}
