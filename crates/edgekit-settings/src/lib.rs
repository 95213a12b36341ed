//! EdgeKit Settings Crate
//!
//! Handles routing configuration: machine motion, cutter and geometry
//! reconstruction settings, with JSON/TOML persistence and validation.

pub mod config;
pub mod error;

pub use config::{Config, GeometrySettings, MachineSettings, ToolSettings};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
