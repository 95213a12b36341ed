//! Path Linker
//!
//! Rebuilds contours from an unordered set of directed edges whose
//! orientation may not match the traversal direction. Linking is greedy:
//! a chain is seeded with the first pool edge and repeatedly grown by the
//! earliest pool edge that touches one of its ends, reversing that edge when
//! needed. When nothing else attaches the chain is finished and the next
//! chain is seeded from what is left in the pool.
//!
//! Endpoint comparison is exact; points must already be quantized.

use crate::error::Diagnostic;
use edgekit_core::{Contour, Edge};
use std::collections::VecDeque;
use tracing::{debug, warn};

/// Outcome of linking an edge pool.
#[derive(Debug, Clone, Default)]
pub struct LinkResult {
    /// Reconstructed contours, closed or not, in the order they were built
    pub contours: Vec<Contour>,
    /// Edges that attached to nothing
    pub orphans: Vec<Edge>,
    /// Unclosed contours and disconnected edges
    pub diagnostics: Vec<Diagnostic>,
}

impl LinkResult {
    pub fn closed_contours(&self) -> impl Iterator<Item = &Contour> {
        self.contours.iter().filter(|c| c.is_closed())
    }
}

/// How a pool edge attaches to a chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Attachment {
    Append,
    Prepend,
    PrependReversed,
    AppendReversed,
}

pub struct PathLinker;

impl PathLinker {
    /// Drains `pool` into contours.
    pub fn link(mut pool: Vec<Edge>) -> LinkResult {
        let mut result = LinkResult::default();

        while !pool.is_empty() {
            let seed = pool.remove(0);
            let chain = Self::grow_chain(seed, &mut pool);

            if chain.len() == 1 && chain[0].start() != chain[0].end() {
                warn!("Edge {} is not connected to any other edge", chain[0]);
                result.orphans.push(chain[0]);
                continue;
            }

            let contour = Contour::new(chain.into_iter().collect());
            let loop_index = result.contours.len();
            if let (false, Some(start), Some(end)) =
                (contour.is_closed(), contour.start_point(), contour.end_point())
            {
                warn!(
                    "Contour {} is not closed: starts at {} but ends at {}",
                    loop_index, start, end
                );
                result.diagnostics.push(Diagnostic::UnclosedLoop {
                    loop_index,
                    start,
                    end,
                });
            }
            debug!("Contour {} linked from {} edges", loop_index, contour.len());
            result.contours.push(contour);
        }

        if !result.orphans.is_empty() {
            result.diagnostics.push(Diagnostic::DisconnectedGeometry {
                loop_index: result.contours.len(),
                edges: result.orphans.clone(),
            });
        }

        result
    }

    /// Grows one chain from `seed`, removing every attached edge from `pool`.
    ///
    /// Growth stops at the first full pass without a match, or as soon as the
    /// chain closes on itself.
    fn grow_chain(seed: Edge, pool: &mut Vec<Edge>) -> VecDeque<Edge> {
        let mut chain = VecDeque::from([seed]);

        while !Self::chain_is_closed(&chain) {
            let found = pool.iter().enumerate().find_map(|(index, edge)| {
                Self::attachment(&chain, edge).map(|how| (index, how))
            });

            let Some((index, how)) = found else {
                break;
            };
            let edge = pool.remove(index);
            debug!("{:?} {}", how, edge);
            match how {
                Attachment::Append => chain.push_back(edge),
                Attachment::Prepend => chain.push_front(edge),
                Attachment::PrependReversed => chain.push_front(edge.reversed()),
                Attachment::AppendReversed => chain.push_back(edge.reversed()),
            }
        }

        chain
    }

    fn attachment(chain: &VecDeque<Edge>, edge: &Edge) -> Option<Attachment> {
        let (first, last) = (chain.front()?, chain.back()?);
        let (chain_start, chain_end) = (first.start(), last.end());

        if edge.start() == chain_end {
            Some(Attachment::Append)
        } else if edge.end() == chain_start {
            Some(Attachment::Prepend)
        } else if edge.start() == chain_start {
            Some(Attachment::PrependReversed)
        } else if edge.end() == chain_end {
            Some(Attachment::AppendReversed)
        } else {
            None
        }
    }

    fn chain_is_closed(chain: &VecDeque<Edge>) -> bool {
        match (chain.front(), chain.back()) {
            (Some(first), Some(last)) => first.start() == last.end(),
            _ => false,
        }
    }
}
