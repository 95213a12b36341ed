//! Edge Extractor
//!
//! Turns a draw-command stream into directed edges. Pen-up moves only
//! relocate the current position; pen-down commands emit one edge from the
//! current position to the command's endpoint.

use crate::command::{DrawCommand, InterpolationCode, PenState};
use edgekit_core::{Edge, Point, Tolerance};
use tracing::debug;

/// Stateful walker over draw commands.
#[derive(Debug, Clone)]
pub struct EdgeExtractor {
    tolerance: Tolerance,
    current: Point,
}

impl EdgeExtractor {
    /// Creates an extractor positioned at the origin.
    pub fn new(tolerance: Tolerance) -> Self {
        Self {
            tolerance,
            current: Point::new(0.0, 0.0),
        }
    }

    /// Current pen position.
    pub fn position(&self) -> Point {
        self.current
    }

    /// Processes one command, returning the edge it draws, if any.
    pub fn step(&mut self, command: &DrawCommand) -> Option<Edge> {
        let target = self.tolerance.point(command.x, command.y);
        let start = self.current;
        self.current = target;

        match command.pen {
            PenState::Move => None,
            PenState::Cut => Some(match command.code {
                InterpolationCode::Linear => Edge::line(start, target),
                InterpolationCode::ClockwiseArc | InterpolationCode::CounterClockwiseArc => {
                    let center = self
                        .tolerance
                        .point(start.x + command.i, start.y + command.j);
                    Edge::arc(
                        start,
                        target,
                        center,
                        command.code == InterpolationCode::ClockwiseArc,
                    )
                }
            }),
        }
    }

    /// Extracts every edge of a command stream.
    pub fn extract(tolerance: Tolerance, commands: &[DrawCommand]) -> Vec<Edge> {
        let mut extractor = Self::new(tolerance);
        let edges: Vec<Edge> = commands
            .iter()
            .filter_map(|command| extractor.step(command))
            .collect();
        debug!(
            "Extracted {} edges from {} commands",
            edges.len(),
            commands.len()
        );
        edges
    }
}
