use bitvec::prelude::*;
use std::collections::VecDeque;

use crate::algorithm::bitset::PatternBitset;
use crate::analysis::adjacency::AdjacencyTable;
use crate::spatial::wave::Wave;

/// Queue of cells whose domains changed and whose neighbors need revisiting
///
/// Deduplicates pending cells so each is queued at most once at a time.
#[derive(Debug)]
pub struct Worklist {
    queue: VecDeque<usize>,
    pending: BitVec,
}

impl Worklist {
    /// Create a worklist covering a cell count
    pub fn new(cells: usize) -> Self {
        Self {
            queue: VecDeque::new(),
            pending: bitvec![0; cells],
        }
    }

    /// Queue a cell unless it is already pending
    ///
    /// Cells beyond the covered count are ignored
    pub fn push(&mut self, cell: usize) {
        if self.pending.get(cell).as_deref() == Some(&false) {
            self.pending.set(cell, true);
            self.queue.push_back(cell);
        }
    }

    /// Remove and return the next pending cell
    pub fn pop(&mut self) -> Option<usize> {
        let cell = self.queue.pop_front()?;
        if cell < self.pending.len() {
            self.pending.set(cell, false);
        }
        Some(cell)
    }

    /// Whether no cells are pending
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Number of pending cells
    pub fn len(&self) -> usize {
        self.queue.len()
    }
}

/// Run constraint propagation to a fixed point from a seed cell
///
/// Pops a cell, rebuilds the admissible support set for each neighbor from
/// the cell's remaining domain, and intersects the neighbor's domain with
/// it. Neighbors whose domains shrink are queued in turn. Domains only ever
/// shrink, so the fixed point is always reached.
///
/// The pass stops as soon as any domain empties and returns that cell; a
/// full fixed point returns `None`.
pub fn propagate(wave: &mut Wave, adjacency: &AdjacencyTable, seed_cell: usize) -> Option<usize> {
    let topology = wave.topology();
    let mut worklist = Worklist::new(wave.cell_count());
    worklist.push(seed_cell);

    while let Some(cell) = worklist.pop() {
        if wave.domain(cell).is_some_and(PatternBitset::is_empty) {
            return Some(cell);
        }

        for (direction_index, &direction) in topology.directions().iter().enumerate() {
            let Some(neighbor) = topology.neighbor(cell, direction) else {
                continue;
            };

            let mut support = PatternBitset::new(wave.pattern_count());
            if let Some(domain) = wave.domain(cell) {
                for pattern in domain.iter_ones() {
                    support.union_with(adjacency.allowed(pattern, direction_index));
                }
            }

            if wave.restrict(neighbor, &support) {
                if wave.domain(neighbor).is_some_and(PatternBitset::is_empty) {
                    return Some(neighbor);
                }
                worklist.push(neighbor);
            }
        }
    }
    None
}
