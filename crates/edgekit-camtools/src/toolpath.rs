//! Toolpath Emitter
//!
//! Writes compensated contours as a G-code program: a setup header, one
//! rapid/plunge/cut/retract block per contour, and a spindle-stop footer.

use crate::error::CamToolResult;
use edgekit_core::{Contour, Edge, Point};
use edgekit_settings::MachineSettings;
use std::fmt::Write;

/// Formats a coordinate to three decimals, never printing `-0.000`.
pub fn format_coord(value: f64) -> String {
    let text = format!("{:.3}", value);
    if text.trim_start_matches('-').chars().all(|c| c == '0' || c == '.') {
        text.trim_start_matches('-').to_string()
    } else {
        text
    }
}

/// Index of the edge whose start is nearest `entry`. The first of equally
/// near edges wins.
pub fn nearest_edge(contour: &Contour, entry: Point) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, edge) in contour.edges().iter().enumerate() {
        let distance = edge.start().distance_to(&entry);
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((index, distance)),
        }
    }
    best.map(|(index, _)| index)
}

/// Rotates a closed contour so it starts at the edge nearest `entry`.
///
/// Open contours are returned unchanged; their start is fixed.
pub fn rotate_to_entry(contour: &Contour, entry: Point) -> Contour {
    if !contour.is_closed() {
        return contour.clone();
    }
    match nearest_edge(contour, entry) {
        Some(index) => contour.rotated(index),
        None => contour.clone(),
    }
}

/// One contour to be machined, with the comment written above it.
#[derive(Debug, Clone)]
pub struct ToolpathBlock {
    pub label: String,
    pub contour: Contour,
}

/// Totals written into the program header.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ProgramSummary {
    pub contours_cut: usize,
    pub contours_skipped: usize,
    /// Total cutting length in mm
    pub cut_length: f64,
}

#[derive(Debug, Clone)]
pub struct ToolpathEmitter {
    machine: MachineSettings,
}

impl ToolpathEmitter {
    pub fn new(machine: MachineSettings) -> Self {
        Self { machine }
    }

    pub fn machine(&self) -> &MachineSettings {
        &self.machine
    }

    /// Renders a complete program.
    pub fn emit(&self, blocks: &[ToolpathBlock], summary: &ProgramSummary) -> CamToolResult<String> {
        let mut gcode = String::new();
        self.write_header(&mut gcode, summary)?;
        for block in blocks {
            self.write_block(&mut gcode, block)?;
        }
        self.write_footer(&mut gcode)?;
        Ok(gcode)
    }

    pub fn write_header(&self, gcode: &mut String, summary: &ProgramSummary) -> CamToolResult<()> {
        let m = &self.machine;
        writeln!(gcode, "; Board outline routing")?;
        writeln!(gcode, "; Contours cut: {}", summary.contours_cut)?;
        writeln!(gcode, "; Contours skipped: {}", summary.contours_skipped)?;
        writeln!(gcode, "; Cut length: {} mm", format_coord(summary.cut_length))?;
        writeln!(gcode)?;
        writeln!(gcode, "G21 ; Set units to millimeters")?;
        writeln!(gcode, "G90 ; Absolute positioning")?;
        writeln!(gcode, "G17 ; XY plane selection")?;
        writeln!(gcode, "G94 ; Feed per minute")?;
        writeln!(gcode, "G40 ; Cutter compensation off")?;
        writeln!(gcode, "G49 ; Tool length offset off")?;
        writeln!(gcode, "F{}", format_coord(m.feed_rate))?;
        writeln!(gcode, "M03 S{}", format_coord(m.spindle_speed))?;
        writeln!(gcode)?;
        Ok(())
    }

    /// Rapid to start, plunge, cut every edge, retract.
    pub fn write_block(&self, gcode: &mut String, block: &ToolpathBlock) -> CamToolResult<()> {
        let m = &self.machine;
        let Some(start) = block.contour.start_point() else {
            return Ok(());
        };

        writeln!(gcode, "; {}", block.label)?;
        writeln!(gcode, "G00 Z{}", format_coord(m.retract_height))?;
        writeln!(gcode, "G00 X{} Y{}", format_coord(start.x), format_coord(start.y))?;
        writeln!(gcode, "G00 Z{}", format_coord(m.plunge_start_height))?;
        writeln!(gcode, "G01 Z{}", format_coord(m.cut_depth))?;
        for edge in block.contour.edges() {
            writeln!(gcode, "{}", motion(edge))?;
        }
        writeln!(gcode, "G00 Z{}", format_coord(m.retract_height))?;
        writeln!(gcode)?;
        Ok(())
    }

    pub fn write_footer(&self, gcode: &mut String) -> CamToolResult<()> {
        writeln!(gcode, "M05 ; Spindle stop")?;
        writeln!(gcode, "M30 ; Program end")?;
        Ok(())
    }
}

/// The motion word for one edge.
fn motion(edge: &Edge) -> String {
    match *edge {
        Edge::Line { end, .. } => format!("G01 X{} Y{}", format_coord(end.x), format_coord(end.y)),
        Edge::Arc {
            end,
            clockwise,
            ..
        } => {
            let (i, j) = edge.center_offset().unwrap_or((0.0, 0.0));
            format!(
                "{} X{} Y{} I{} J{}",
                if clockwise { "G02" } else { "G03" },
                format_coord(end.x),
                format_coord(end.y),
                format_coord(i),
                format_coord(j)
            )
        }
    }
}
