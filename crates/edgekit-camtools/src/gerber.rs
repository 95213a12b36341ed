//! Gerber board-outline decoding.
//!
//! Reads an RS-274X outline layer with `gerber_parser` and turns its D01/D02
//! operations into [`DrawCommand`]s. Aperture geometry is irrelevant for an
//! outline: only the drawn centerlines matter, so apertures are ignored and
//! a flash only moves the current point.

use crate::command::{DrawCommand, InterpolationCode, PenState};
use crate::error::{CamToolResult, FileFormatError};
use gerber_parser::parse;
use gerber_types::{
    Command, CoordinateNumber, Coordinates, DCode, FunctionCode, GCode, InterpolationMode,
    Operation, Unit,
};
use regex::Regex;
use std::io::BufReader;
use tracing::{debug, info, warn};

const DEFAULT_DECIMALS: i32 = 4;
const MM_PER_INCH: f64 = 25.4;

/// Coordinate scaling taken from the file's %FS and %MO headers.
#[derive(Debug, Clone, Copy)]
struct CoordinateScale {
    divisor: f64,
    unit_scale: f64,
}

impl CoordinateScale {
    /// Value of a coordinate word in millimeters.
    fn convert(&self, number: &CoordinateNumber) -> f64 {
        raw_coordinate(number) / self.divisor * self.unit_scale
    }

    fn axis(&self, value: Option<&CoordinateNumber>, current: f64) -> f64 {
        value.map(|v| self.convert(v)).unwrap_or(current)
    }

    /// Resolves modal coordinates against the current position.
    fn point(&self, coords: &Option<Coordinates>, current: (f64, f64)) -> (f64, f64) {
        let x = self.axis(coords.as_ref().and_then(|c| c.x.as_ref()), current.0);
        let y = self.axis(coords.as_ref().and_then(|c| c.y.as_ref()), current.1);
        (x, y)
    }
}

/// Reads the numeric payload of a coordinate word.
fn raw_coordinate(number: &CoordinateNumber) -> f64 {
    let s = format!("{:?}", number);
    if let Some(start) = s.find("nano: ") {
        let rest = &s[start + 6..];
        let end = rest.find([' ', '}']).unwrap_or(rest.len());
        return rest[..end].parse::<f64>().unwrap_or(0.0);
    }
    s.trim_start_matches("CoordinateNumber(")
        .trim_end_matches(')')
        .trim_start_matches("CoordinateNumber {")
        .trim_end_matches('}')
        .trim()
        .parse::<f64>()
        .unwrap_or(0.0)
}

/// Keeps only the first occurrence of a header block such as `%FS...*%`.
fn keep_first(content: &str, pattern: &str) -> String {
    let Ok(re) = Regex::new(pattern) else {
        return content.to_string();
    };
    let mut count = 0;
    re.replace_all(content, |caps: &regex::Captures| {
        count += 1;
        if count > 1 {
            String::new()
        } else {
            caps[0].to_string()
        }
    })
    .to_string()
}

pub struct GerberDecoder;

impl GerberDecoder {
    /// Decodes a Gerber outline into draw commands in file order.
    pub fn decode(content: &str) -> CamToolResult<Vec<DrawCommand>> {
        if content.trim().is_empty() {
            return Err(FileFormatError::EmptyFile("Gerber input has no content".to_string()).into());
        }

        // Some CAD exports repeat the format and unit headers; the parser rejects that.
        let sanitized = keep_first(&keep_first(content, r"%FS.*?\*%"), r"%MO.*?\*%");

        let reader = BufReader::new(sanitized.as_bytes());
        let doc = match parse(reader) {
            Ok(d) => d,
            Err((d, e)) => {
                warn!(
                    "Gerber parser returned error, attempting to use partial document. Error: {:?}",
                    e
                );
                d
            }
        };

        let decimals = match &doc.format_specification {
            Some(fmt) => {
                debug!("Format specification: {}.{}", fmt.integer, fmt.decimal);
                fmt.decimal as i32
            }
            None => {
                warn!("No format specification found, assuming 2.{}", DEFAULT_DECIMALS);
                DEFAULT_DECIMALS
            }
        };

        let unit_scale = match &doc.units {
            Some(Unit::Millimeters) => 1.0,
            Some(Unit::Inches) => MM_PER_INCH,
            None => {
                warn!("No units found, assuming millimeters");
                1.0
            }
        };

        let scale = CoordinateScale {
            divisor: 10f64.powi(decimals),
            unit_scale,
        };

        let mut commands = Vec::new();
        let mut current = (0.0, 0.0);
        let mut interpolation = InterpolationMode::Linear;
        let mut flashes = 0usize;

        for command in doc.commands() {
            match command {
                Command::FunctionCode(FunctionCode::DCode(DCode::Operation(op))) => match op {
                    Operation::Interpolate(coord, offset) => {
                        let (x, y) = scale.point(coord, current);
                        let code = match interpolation {
                            InterpolationMode::Linear => InterpolationCode::Linear,
                            InterpolationMode::ClockwiseCircular => InterpolationCode::ClockwiseArc,
                            InterpolationMode::CounterclockwiseCircular => {
                                InterpolationCode::CounterClockwiseArc
                            }
                        };
                        let (i, j) = if code.is_arc() {
                            let i = scale.axis(offset.as_ref().and_then(|c| c.x.as_ref()), 0.0);
                            let j = scale.axis(offset.as_ref().and_then(|c| c.y.as_ref()), 0.0);
                            (i, j)
                        } else {
                            (0.0, 0.0)
                        };
                        commands.push(DrawCommand {
                            code,
                            x,
                            y,
                            i,
                            j,
                            pen: PenState::Cut,
                        });
                        current = (x, y);
                    }
                    Operation::Move(coord) => {
                        current = scale.point(coord, current);
                        commands.push(DrawCommand::move_to(current.0, current.1));
                    }
                    Operation::Flash(coord) => {
                        flashes += 1;
                        current = scale.point(coord, current);
                        commands.push(DrawCommand::move_to(current.0, current.1));
                    }
                },
                Command::FunctionCode(FunctionCode::GCode(GCode::InterpolationMode(mode))) => {
                    interpolation = *mode;
                }
                _ => {}
            }
        }

        if flashes > 0 {
            warn!("Treated {} flash operation(s) on the outline layer as moves", flashes);
        }
        info!("Decoded {} draw commands from Gerber input", commands.len());
        Ok(commands)
    }
}
