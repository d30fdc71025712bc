//! Adjacency constraint derivation and indexed lookup
//!
//! Derives, for every ordered pattern pair and direction, whether the pair
//! may sit adjacent in the output. Admissible neighbor sets are stored as
//! one bitset row per (direction, pattern), giving the propagation loop
//! constant-time lookup instead of scans over a triple list.

use crate::algorithm::bitset::PatternBitset;
use crate::analysis::patterns::{Pattern, PatternCatalog};
use crate::spatial::topology::Direction;

/// Indexed admissible-neighbor sets for every pattern and direction
///
/// Immutable once built; shared read-only by every solver run on the same
/// sample.
#[derive(Debug, Clone)]
pub struct AdjacencyTable {
    directions: Vec<Direction>,
    pattern_count: usize,
    allowed: Vec<PatternBitset>,
    empty: PatternBitset,
}

impl AdjacencyTable {
    /// Derive the table for a catalog over a direction set
    ///
    /// Quadratic in catalog size per direction; this is the dominant cost
    /// for image samples and is computed once per model.
    pub fn build<P: Pattern>(catalog: &PatternCatalog<P>, directions: &[Direction]) -> Self {
        let pattern_count = catalog.len();
        let mut allowed = Vec::with_capacity(directions.len() * pattern_count);

        for &direction in directions {
            for (_, content) in catalog {
                let mut row = PatternBitset::new(pattern_count);
                for (neighbor_id, neighbor) in catalog {
                    if content.admits(neighbor, direction, catalog) {
                        row.insert(neighbor_id);
                    }
                }
                allowed.push(row);
            }
        }

        Self {
            directions: directions.to_vec(),
            pattern_count,
            allowed,
            empty: PatternBitset::new(pattern_count),
        }
    }

    /// Admissible neighbors of a pattern along a direction index
    ///
    /// Unknown patterns or directions admit nothing.
    pub fn allowed(&self, pattern: usize, direction_index: usize) -> &PatternBitset {
        if pattern >= self.pattern_count {
            return &self.empty;
        }
        self.allowed
            .get(direction_index * self.pattern_count + pattern)
            .unwrap_or(&self.empty)
    }

    /// Whether one pattern admits another along a direction index
    pub fn contains(&self, pattern: usize, neighbor: usize, direction_index: usize) -> bool {
        self.allowed(pattern, direction_index).contains(neighbor)
    }

    /// Directions the table was built for, in row order
    pub fn directions(&self) -> &[Direction] {
        &self.directions
    }

    /// Number of catalog patterns the table covers
    pub const fn pattern_count(&self) -> usize {
        self.pattern_count
    }
}
