//! Draw commands: the typed input of the edge extractor.
//!
//! A [`RawDrawCommand`] is the loosely typed `{code, X, Y, I, J, D}` record
//! produced by a decoder. [`RawDrawCommand::decode`] checks it and yields a
//! [`DrawCommand`]; anything missing or unrecognized is a fatal
//! [`CamToolError::MalformedCommand`].

use crate::error::{CamToolError, CamToolResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Interpolation mode of a draw command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InterpolationCode {
    Linear,
    ClockwiseArc,
    CounterClockwiseArc,
}

impl InterpolationCode {
    pub fn is_arc(&self) -> bool {
        !matches!(self, InterpolationCode::Linear)
    }
}

impl FromStr for InterpolationCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "G01" | "G1" | "LINEAR" => Ok(Self::Linear),
            "G02" | "G2" | "ARC_CW" => Ok(Self::ClockwiseArc),
            "G03" | "G3" | "ARC_CCW" => Ok(Self::CounterClockwiseArc),
            other => Err(format!("unknown interpolation code '{}'", other)),
        }
    }
}

impl fmt::Display for InterpolationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear => write!(f, "G01"),
            Self::ClockwiseArc => write!(f, "G02"),
            Self::CounterClockwiseArc => write!(f, "G03"),
        }
    }
}

/// Whether the pen draws (D01) or just moves (D02).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PenState {
    Cut,
    Move,
}

impl FromStr for PenState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "D01" | "D1" | "01" | "1" | "CUT" => Ok(Self::Cut),
            "D02" | "D2" | "02" | "2" | "MOVE" => Ok(Self::Move),
            other => Err(format!("unknown pen code '{}'", other)),
        }
    }
}

/// A checked draw command. Coordinates are in millimeters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawCommand {
    pub code: InterpolationCode,
    pub x: f64,
    pub y: f64,
    /// Arc center X, relative to the command's start point
    pub i: f64,
    /// Arc center Y, relative to the command's start point
    pub j: f64,
    pub pen: PenState,
}

impl DrawCommand {
    pub fn line_to(x: f64, y: f64) -> Self {
        Self {
            code: InterpolationCode::Linear,
            x,
            y,
            i: 0.0,
            j: 0.0,
            pen: PenState::Cut,
        }
    }

    pub fn move_to(x: f64, y: f64) -> Self {
        Self {
            code: InterpolationCode::Linear,
            x,
            y,
            i: 0.0,
            j: 0.0,
            pen: PenState::Move,
        }
    }

    pub fn arc_to(x: f64, y: f64, i: f64, j: f64, clockwise: bool) -> Self {
        Self {
            code: if clockwise {
                InterpolationCode::ClockwiseArc
            } else {
                InterpolationCode::CounterClockwiseArc
            },
            x,
            y,
            i,
            j,
            pen: PenState::Cut,
        }
    }
}

/// An unchecked `{code, X, Y, I, J, D}` record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawDrawCommand {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(rename = "X", default)]
    pub x: Option<f64>,
    #[serde(rename = "Y", default)]
    pub y: Option<f64>,
    #[serde(rename = "I", default)]
    pub i: Option<f64>,
    #[serde(rename = "J", default)]
    pub j: Option<f64>,
    #[serde(rename = "D", default)]
    pub d: Option<String>,
}

impl RawDrawCommand {
    /// Validates the record. `index` is only used for error reporting.
    pub fn decode(&self, index: usize) -> CamToolResult<DrawCommand> {
        let malformed = |reason: String| CamToolError::MalformedCommand { index, reason };

        let pen: PenState = self
            .d
            .as_deref()
            .ok_or_else(|| malformed("missing D (pen) code".to_string()))?
            .parse()
            .map_err(malformed)?;
        let x = self
            .x
            .filter(|v| v.is_finite())
            .ok_or_else(|| malformed("missing or non-finite X".to_string()))?;
        let y = self
            .y
            .filter(|v| v.is_finite())
            .ok_or_else(|| malformed("missing or non-finite Y".to_string()))?;

        let code = match (self.code.as_deref(), pen) {
            (Some(code), _) => code.parse::<InterpolationCode>().map_err(malformed)?,
            // The interpolation mode is irrelevant for a pen-up move.
            (None, PenState::Move) => InterpolationCode::Linear,
            (None, PenState::Cut) => {
                return Err(malformed("missing interpolation code".to_string()))
            }
        };

        let (i, j) = if code.is_arc() && pen == PenState::Cut {
            if self.i.is_none() && self.j.is_none() {
                return Err(malformed("arc without I/J center offset".to_string()));
            }
            (self.i.unwrap_or(0.0), self.j.unwrap_or(0.0))
        } else {
            (0.0, 0.0)
        };
        if !i.is_finite() || !j.is_finite() {
            return Err(malformed("non-finite I/J".to_string()));
        }

        Ok(DrawCommand {
            code,
            x,
            y,
            i,
            j,
            pen,
        })
    }
}

/// Validates a whole record stream, stopping at the first malformed record.
pub fn decode_commands(raw: &[RawDrawCommand]) -> CamToolResult<Vec<DrawCommand>> {
    raw.iter()
        .enumerate()
        .map(|(index, record)| record.decode(index))
        .collect()
}

/// Reads a JSON array of raw records.
pub fn parse_json_commands(content: &str) -> CamToolResult<Vec<DrawCommand>> {
    let raw: Vec<RawDrawCommand> = serde_json::from_str(content)?;
    decode_commands(&raw)
}
