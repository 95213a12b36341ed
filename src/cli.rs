//! Command line interface.
//!
//! Flags override values loaded from the configuration file, which in turn
//! override the built-in defaults.

use anyhow::{Context, Result};
use clap::Parser;
use edgekit_camtools::{BoardOutlineConverter, ConversionReport};
use edgekit_core::{Point, Tolerance};
use edgekit_settings::Config;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

#[derive(Parser, Debug, Clone)]
#[command(name = "edgekit")]
#[command(version, about = "Route a PCB board outline to radius-compensated G-code", long_about = None)]
pub struct Cli {
    /// Board outline: Gerber file, or a .json array of draw-command records
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output G-code file; `-` writes to stdout (default: input with .nc extension)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Configuration file (.toml or .json)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Retract height (mm)
    #[arg(short = 'r', long = "retract")]
    pub retract_height: Option<f64>,

    /// Height the rapid plunge stops at (mm)
    #[arg(short = 's', long = "start")]
    pub plunge_start_height: Option<f64>,

    /// Cut depth (mm)
    #[arg(short = 'e', long = "end", allow_hyphen_values = true)]
    pub cut_depth: Option<f64>,

    /// Tool diameter (mm)
    #[arg(short = 't', long = "tool")]
    pub tool_diameter: Option<f64>,

    /// Entry point X Y (mm)
    #[arg(short = 'x', long = "entry", num_args = 2, value_names = ["X", "Y"], allow_hyphen_values = true)]
    pub entry_point: Option<Vec<f64>>,

    /// Feed rate (mm/min)
    #[arg(short = 'f', long = "feed")]
    pub feed_rate: Option<f64>,

    /// Spindle speed (RPM)
    #[arg(long = "rpm")]
    pub spindle_speed: Option<f64>,

    /// Endpoint quantization step (mm)
    #[arg(long)]
    pub tolerance: Option<f64>,

    /// Segments per arc for containment and offsetting
    #[arg(long = "segments")]
    pub arc_segment_count: Option<usize>,

    /// Maximum chord deviation (mm); replaces the fixed segment count
    #[arg(long = "max-deviation")]
    pub arc_max_deviation: Option<f64>,
}

impl Cli {
    /// Configuration file to load: `-c` if given, else the per-user default
    /// when it exists.
    pub fn config_source(&self) -> Option<PathBuf> {
        if let Some(path) = &self.config {
            return Some(path.clone());
        }
        match Config::default_path() {
            Ok(path) if path.is_file() => Some(path),
            Ok(_) => None,
            Err(e) => {
                debug!("No default configuration: {}", e);
                None
            }
        }
    }

    /// Loads the configuration file, then applies the flags.
    pub fn resolve_config(&self) -> Result<Config> {
        let mut config = match self.config_source() {
            Some(path) => {
                debug!("Loading configuration from {}", path.display());
                Config::load_from_file(&path)
                    .with_context(|| format!("failed to load config {}", path.display()))?
            }
            None => Config::default(),
        };
        self.apply_overrides(&mut config)?;
        config.validate().context("invalid configuration")?;
        Ok(config)
    }

    pub fn apply_overrides(&self, config: &mut Config) -> Result<()> {
        let machine = &mut config.machine;
        if let Some(v) = self.retract_height {
            machine.retract_height = v;
        }
        if let Some(v) = self.plunge_start_height {
            machine.plunge_start_height = v;
        }
        if let Some(v) = self.cut_depth {
            machine.cut_depth = v;
        }
        if let Some(v) = self.feed_rate {
            machine.feed_rate = v;
        }
        if let Some(v) = self.spindle_speed {
            machine.spindle_speed = v;
        }
        if let Some([x, y]) = self.entry_point.as_deref() {
            machine.entry_point = Point::new(*x, *y);
        }
        if let Some(v) = self.tool_diameter {
            config.tool.tool_diameter = v;
        }
        if let Some(v) = self.tolerance {
            config.geometry.endpoint_tolerance = Tolerance::new(v)?;
        }
        if let Some(v) = self.arc_segment_count {
            config.geometry.arc_segment_count = v;
        }
        if let Some(v) = self.arc_max_deviation {
            config.geometry.arc_max_deviation = Some(v);
        }
        Ok(())
    }

    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| self.input.with_extension("nc"))
    }
}

/// Converts the input file and writes the program.
pub fn run(cli: &Cli) -> Result<ConversionReport> {
    let config = cli.resolve_config()?;
    info!("Routing {}", cli.input.display());

    let report = BoardOutlineConverter::new(config)
        .convert_file(&cli.input)
        .with_context(|| format!("failed to convert {}", cli.input.display()))?;

    let output = cli.output_path();
    write_output(&output, &report.gcode)?;

    if report.is_clean() {
        info!("Wrote {}", output.display());
    } else {
        warn!(
            "Wrote {} with {} diagnostic(s)",
            output.display(),
            report.diagnostics.len()
        );
    }
    Ok(report)
}

fn write_output(path: &Path, gcode: &str) -> Result<()> {
    if path == Path::new("-") {
        io::stdout().write_all(gcode.as_bytes())?;
        return Ok(());
    }
    fs::write(path, gcode).with_context(|| format!("failed to write {}", path.display()))
}
