//! Cell domain state for a single generation attempt
//!
//! A wave owns one domain bitset per cell. Domains only ever shrink between
//! restarts; snapshot and restore give the solver its contradiction recovery.

use crate::algorithm::bitset::PatternBitset;
use crate::spatial::topology::Topology;

/// Saved copy of every cell domain, taken before an observation
///
/// Taking or restoring a snapshot costs O(cells × patterns); this is the
/// main scalability limit of the solver loop.
#[derive(Debug, Clone)]
pub struct WaveSnapshot {
    domains: Vec<PatternBitset>,
}

/// The complete lattice of cell domains for one generation attempt
///
/// Owned exclusively by one solver run, mutated in place during propagation,
/// and replaced wholesale on restart.
#[derive(Debug, Clone)]
pub struct Wave {
    domains: Vec<PatternBitset>,
    topology: Topology,
    pattern_count: usize,
}

impl Wave {
    /// Create a wave with every cell holding the full pattern set
    pub fn full(topology: Topology, pattern_count: usize) -> Self {
        let domains = vec![PatternBitset::all(pattern_count); topology.cell_count()];
        Self {
            domains,
            topology,
            pattern_count,
        }
    }

    /// Layout the wave's cells are arranged on
    pub const fn topology(&self) -> Topology {
        self.topology
    }

    /// Number of catalog patterns the domains range over
    pub const fn pattern_count(&self) -> usize {
        self.pattern_count
    }

    /// Number of cells
    pub const fn cell_count(&self) -> usize {
        self.domains.len()
    }

    /// Every cell domain in flat index order
    pub fn domains(&self) -> &[PatternBitset] {
        &self.domains
    }

    /// Domain of a single cell
    pub fn domain(&self, cell: usize) -> Option<&PatternBitset> {
        self.domains.get(cell)
    }

    /// Fix a cell to a single pattern
    pub fn collapse_cell(&mut self, cell: usize, pattern: usize) {
        if let Some(domain) = self.domains.get_mut(cell) {
            *domain = PatternBitset::singleton(self.pattern_count, pattern);
        }
    }

    /// Intersect a cell domain with an allowed set
    ///
    /// Returns whether the domain actually shrank.
    pub fn restrict(&mut self, cell: usize, allowed: &PatternBitset) -> bool {
        self.domains.get_mut(cell).is_some_and(|domain| {
            let before = domain.count();
            domain.intersect_with(allowed);
            domain.count() < before
        })
    }

    /// Flat index of the first empty domain, if any
    pub fn first_contradiction(&self) -> Option<usize> {
        self.domains.iter().position(PatternBitset::is_empty)
    }

    /// Whether every domain holds exactly one pattern
    pub fn is_collapsed(&self) -> bool {
        self.domains.iter().all(|domain| domain.count() == 1)
    }

    /// The single remaining pattern at a cell, if that cell is collapsed
    pub fn collapsed_pattern(&self, cell: usize) -> Option<usize> {
        self.domains
            .get(cell)
            .filter(|domain| domain.count() == 1)
            .and_then(PatternBitset::first)
    }

    /// Copy every domain for later restoration
    pub fn snapshot(&self) -> WaveSnapshot {
        WaveSnapshot {
            domains: self.domains.clone(),
        }
    }

    /// Replace every domain with a snapshot's contents
    pub fn restore(&mut self, snapshot: WaveSnapshot) {
        self.domains = snapshot.domains;
    }
}
