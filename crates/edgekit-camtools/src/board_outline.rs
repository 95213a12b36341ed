//! Board outline conversion.
//!
//! Runs the whole pipeline over one draw-command stream:
//! extraction, linking, segmentation, nesting, radius compensation,
//! entry-point reordering and G-code emission.

use crate::arc_segmenter::ArcSegmenter;
use crate::command::{parse_json_commands, DrawCommand};
use crate::error::{CamToolError, CamToolResult, Diagnostic};
use crate::extractor::EdgeExtractor;
use crate::gerber::GerberDecoder;
use crate::nesting::NestingAnalyzer;
use crate::offset::{compensate, CavalierBuffer, PolygonBuffer};
use crate::path_linker::PathLinker;
use crate::toolpath::{rotate_to_entry, ProgramSummary, ToolpathBlock, ToolpathEmitter};
use edgekit_core::Polygon;
use edgekit_settings::Config;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Result of a conversion: the program plus everything that went wrong
/// without stopping it.
#[derive(Debug, Clone)]
pub struct ConversionReport {
    pub gcode: String,
    pub diagnostics: Vec<Diagnostic>,
    pub summary: ProgramSummary,
}

impl ConversionReport {
    /// True when no contour was skipped, left open or left disconnected.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Reads draw commands from a file: `.json` holds raw command records,
/// anything else is treated as Gerber.
pub fn read_commands(path: &Path) -> CamToolResult<Vec<DrawCommand>> {
    let content = fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    if is_json {
        parse_json_commands(&content)
    } else {
        GerberDecoder::decode(&content)
    }
}

/// Board outline to G-code converter.
pub struct BoardOutlineConverter<B: PolygonBuffer = CavalierBuffer> {
    config: Config,
    buffer: B,
}

impl BoardOutlineConverter<CavalierBuffer> {
    pub fn new(config: Config) -> Self {
        Self::with_buffer(config, CavalierBuffer)
    }
}

impl<B: PolygonBuffer> BoardOutlineConverter<B> {
    /// Uses a custom buffering primitive for radius compensation.
    pub fn with_buffer(config: Config, buffer: B) -> Self {
        Self { config, buffer }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn convert_file(&self, path: &Path) -> CamToolResult<ConversionReport> {
        let commands = read_commands(path)?;
        self.convert(&commands)
    }

    pub fn convert(&self, commands: &[DrawCommand]) -> CamToolResult<ConversionReport> {
        self.config
            .validate()
            .map_err(|e| CamToolError::InvalidParameters(e.to_string()))?;

        let geometry = &self.config.geometry;
        let machine = &self.config.machine;
        let tool_radius = self.config.tool.radius();

        let edges = EdgeExtractor::extract(geometry.endpoint_tolerance, commands);
        let linked = PathLinker::link(edges);
        let mut diagnostics = linked.diagnostics;

        let segmenter = ArcSegmenter::from_settings(geometry);
        let mut polygons: Vec<(usize, Polygon)> = Vec::new();
        let mut open = Vec::new();
        for (index, contour) in linked.contours.iter().enumerate() {
            if !contour.is_closed() {
                open.push((index, contour));
                continue;
            }
            match segmenter.polygon(contour) {
                Ok(polygon) => polygons.push((index, polygon)),
                Err(e) => {
                    warn!("Skipping contour {}: {}", index, e);
                    diagnostics.push(Diagnostic::OffsetInfeasible {
                        loop_index: index,
                        distance: 0.0,
                        reason: e.to_string(),
                    });
                }
            }
        }

        let nested = NestingAnalyzer::default().analyze(polygons)?;
        let (compensated, offset_diagnostics) = compensate(&self.buffer, &nested, tool_radius);
        diagnostics.extend(offset_diagnostics);

        let mut blocks: Vec<ToolpathBlock> = compensated
            .into_iter()
            .map(|c| ToolpathBlock {
                label: format!(
                    "Contour {} (level {}, {} {:.3} mm)",
                    c.index,
                    c.level,
                    c.direction,
                    c.distance.abs()
                ),
                contour: rotate_to_entry(&c.contour, machine.entry_point),
            })
            .collect();

        // Open contours have no inside to compensate toward; cut them as drawn.
        blocks.extend(open.into_iter().map(|(index, contour)| ToolpathBlock {
            label: format!("Contour {} (unclosed, uncompensated)", index),
            contour: contour.clone(),
        }));

        let summary = ProgramSummary {
            contours_cut: blocks.len(),
            contours_skipped: diagnostics
                .iter()
                .filter(|d| matches!(d, Diagnostic::OffsetInfeasible { .. }))
                .count(),
            cut_length: blocks.iter().map(|b| b.contour.length()).sum(),
        };

        let gcode = ToolpathEmitter::new(machine.clone()).emit(&blocks, &summary)?;

        info!(
            "Generated toolpath: {} contour(s) cut, {} skipped, {:.3} mm of cutting",
            summary.contours_cut, summary.contours_skipped, summary.cut_length
        );
        for diagnostic in &diagnostics {
            warn!("{}", diagnostic);
        }

        Ok(ConversionReport {
            gcode,
            diagnostics,
            summary,
        })
    }
}
