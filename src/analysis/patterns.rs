//! Pattern types and catalog extraction from sample data
//!
//! Slides fixed-size windows over 1-D sequences (circularly) and 2-D grids
//! (wrap-padded) to build a deduplicated pattern catalog with occurrence
//! counts. Grid extraction supports transformations (rotation, reflection)
//! to increase pattern variety from limited source data.

use ndarray::Array2;
use std::collections::HashMap;
use std::hash::Hash;

use crate::spatial::topology::Direction;

/// Atomic unit of a sample's alphabet
///
/// Anything cloneable with content-based equality and hashing qualifies:
/// characters for text samples, palette labels for images.
pub trait Symbol: Clone + Eq + Hash {}

impl<T: Clone + Eq + Hash> Symbol for T {}

/// A fixed-length run of symbols cut from a sequence sample
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SequencePattern<S> {
    symbols: Vec<S>,
}

impl<S: Symbol> SequencePattern<S> {
    /// Create a pattern from its symbol run
    pub const fn new(symbols: Vec<S>) -> Self {
        Self { symbols }
    }

    /// Number of symbols in the pattern
    pub const fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Whether the pattern holds no symbols
    pub const fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// The pattern's symbols in order
    pub fn symbols(&self) -> &[S] {
        &self.symbols
    }
}

/// A square block of symbols cut from a grid sample, stored row-major
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlockPattern<S> {
    size: usize,
    symbols: Vec<S>,
}

impl<S: Symbol> BlockPattern<S> {
    /// Create a pattern from row-major symbols
    ///
    /// Returns `None` when the symbol count does not match `size * size`.
    pub fn new(size: usize, symbols: Vec<S>) -> Option<Self> {
        (symbols.len() == size * size).then_some(Self { size, symbols })
    }

    /// Side length of the block
    pub const fn size(&self) -> usize {
        self.size
    }

    /// The block's symbols in row-major order
    pub fn symbols(&self) -> &[S] {
        &self.symbols
    }

    /// Symbol at a row and column within the block
    pub fn get(&self, row: usize, col: usize) -> Option<&S> {
        if row < self.size && col < self.size {
            self.symbols.get(row * self.size + col)
        } else {
            None
        }
    }

    /// The block rotated 90° clockwise
    #[must_use]
    pub fn rotated(&self) -> Self {
        let n = self.size;
        let mut symbols = Vec::with_capacity(n * n);
        for i in 0..n {
            for j in 0..n {
                if let Some(symbol) = self.get(n - 1 - j, i) {
                    symbols.push(symbol.clone());
                }
            }
        }
        Self { size: n, symbols }
    }

    /// The block mirrored horizontally
    #[must_use]
    pub fn mirrored(&self) -> Self {
        let n = self.size;
        let mut symbols = Vec::with_capacity(n * n);
        for i in 0..n {
            for j in 0..n {
                if let Some(symbol) = self.get(i, n - 1 - j) {
                    symbols.push(symbol.clone());
                }
            }
        }
        Self { size: n, symbols }
    }
}

/// Admissibility of one pattern beside another
///
/// Implemented by both pattern kinds so the adjacency table can be built
/// generically: overlay the two patterns along a direction and require every
/// full-size window of the overlay to exist in the catalog.
pub trait Pattern: Clone + Eq + Hash + Sized {
    /// Whether `neighbor` may sit on the `direction` side of `self`
    ///
    /// Closed-world check: any window of the overlay never seen in the
    /// catalog invalidates the pairing.
    fn admits(
        &self,
        neighbor: &Self,
        direction: Direction,
        catalog: &PatternCatalog<Self>,
    ) -> bool;
}

impl<S: Symbol> Pattern for SequencePattern<S> {
    fn admits(
        &self,
        neighbor: &Self,
        direction: Direction,
        catalog: &PatternCatalog<Self>,
    ) -> bool {
        let n = self.symbols.len();
        if n == 0 || neighbor.symbols.len() != n {
            return false;
        }

        // Negative direction puts the neighbor before this pattern
        let mut composite = Vec::with_capacity(2 * n);
        if direction[1] < 0 {
            composite.extend(neighbor.symbols.iter().cloned());
            composite.extend(self.symbols.iter().cloned());
        } else {
            composite.extend(self.symbols.iter().cloned());
            composite.extend(neighbor.symbols.iter().cloned());
        }

        composite
            .windows(n)
            .all(|window| catalog.contains_symbols(window))
    }
}

impl<S: Symbol> Pattern for BlockPattern<S> {
    fn admits(
        &self,
        neighbor: &Self,
        direction: Direction,
        catalog: &PatternCatalog<Self>,
    ) -> bool {
        let n = self.size;
        if n == 0 || neighbor.size != n {
            return false;
        }

        // Overlay the neighbor on the direction side: below/above for row
        // offsets, right/left for column offsets
        let (first, second) = if direction[0] < 0 || direction[1] < 0 {
            (neighbor, self)
        } else {
            (self, neighbor)
        };
        let vertical = direction[0] != 0;
        let (rows, cols) = if vertical { (2 * n, n) } else { (n, 2 * n) };

        let composite_at = |row: usize, col: usize| {
            if vertical {
                if row >= n {
                    second.get(row - n, col)
                } else {
                    first.get(row, col)
                }
            } else if col >= n {
                second.get(row, col - n)
            } else {
                first.get(row, col)
            }
        };

        for row_offset in 0..=(rows - n) {
            for col_offset in 0..=(cols - n) {
                let mut window = Vec::with_capacity(n * n);
                for i in 0..n {
                    for j in 0..n {
                        if let Some(symbol) = composite_at(row_offset + i, col_offset + j) {
                            window.push(symbol.clone());
                        }
                    }
                }
                if window.len() != n * n || !catalog.contains_symbols(&window) {
                    return false;
                }
            }
        }
        true
    }
}

/// Optional symmetry augmentation applied during grid extraction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PatternTransforms {
    /// Include the three 90° rotations of every window
    pub rotations: bool,
    /// Include the horizontal mirror of every window and of each rotation
    pub reflections: bool,
}

/// Deduplicated fixed-size patterns with occurrence counts
///
/// Pattern identifiers are indices into the insertion-ordered content list,
/// so identical samples always yield identical identifier assignments.
#[derive(Debug, Clone, Default)]
pub struct PatternCatalog<P> {
    contents: Vec<P>,
    frequencies: Vec<usize>,
    index: HashMap<P, usize>,
}

impl<P: Clone + Eq + Hash> PatternCatalog<P> {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self {
            contents: Vec::new(),
            frequencies: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Record one occurrence of a pattern
    ///
    /// Duplicate content merges into the existing entry and accumulates its
    /// count. Returns the pattern's identifier.
    pub fn insert(&mut self, pattern: P) -> usize {
        if let Some(&id) = self.index.get(&pattern) {
            if let Some(count) = self.frequencies.get_mut(id) {
                *count += 1;
            }
            id
        } else {
            let id = self.contents.len();
            self.contents.push(pattern.clone());
            self.frequencies.push(1);
            self.index.insert(pattern, id);
            id
        }
    }

    /// Identifier of a pattern, if catalogued
    pub fn id_of(&self, pattern: &P) -> Option<usize> {
        self.index.get(pattern).copied()
    }

    /// Whether a pattern exists in the catalog
    pub fn contains(&self, pattern: &P) -> bool {
        self.index.contains_key(pattern)
    }

    /// Content of a pattern identifier
    pub fn content(&self, id: usize) -> Option<&P> {
        self.contents.get(id)
    }

    /// Number of distinct patterns
    pub const fn len(&self) -> usize {
        self.contents.len()
    }

    /// Whether the catalog holds no patterns
    pub const fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    /// Occurrence counts indexed by pattern identifier
    pub fn frequencies(&self) -> &[usize] {
        &self.frequencies
    }

    /// Iterate over identifier and content pairs
    pub fn iter(&self) -> std::iter::Enumerate<std::slice::Iter<'_, P>> {
        self.contents.iter().enumerate()
    }
}

impl<'a, P> IntoIterator for &'a PatternCatalog<P> {
    type Item = (usize, &'a P);
    type IntoIter = std::iter::Enumerate<std::slice::Iter<'a, P>>;

    fn into_iter(self) -> Self::IntoIter {
        self.contents.iter().enumerate()
    }
}

impl<S: Symbol> PatternCatalog<SequencePattern<S>> {
    fn contains_symbols(&self, symbols: &[S]) -> bool {
        self.index
            .contains_key(&SequencePattern::new(symbols.to_vec()))
    }
}

impl<S: Symbol> PatternCatalog<BlockPattern<S>> {
    fn contains_symbols(&self, symbols: &[S]) -> bool {
        let size = (self.contents.first()).map_or(0, BlockPattern::size);
        BlockPattern::new(size, symbols.to_vec())
            .is_some_and(|pattern| self.index.contains_key(&pattern))
    }
}

/// Extract the circular window catalog of a sequence sample
///
/// Every length-`n` window of the sample read circularly (boundary-crossing
/// windows included) becomes a catalog occurrence. Degenerate parameters
/// (`n` of zero, or larger than the sample) yield an empty catalog.
pub fn extract_sequence_patterns<S: Symbol>(
    sample: &[S],
    n: usize,
) -> PatternCatalog<SequencePattern<S>> {
    let mut catalog = PatternCatalog::new();
    if n == 0 || n > sample.len() {
        return catalog;
    }

    for start in 0..sample.len() {
        let symbols: Vec<S> = sample.iter().cycle().skip(start).take(n).cloned().collect();
        catalog.insert(SequencePattern::new(symbols));
    }
    catalog
}

/// Extract the wrap-padded window catalog of a grid sample
///
/// The sample is read as if padded by `n` on the right and bottom with its
/// own wrapped-around columns and rows, then an `n`×`n` window slides over
/// every original position. Transformed copies are catalogued when enabled.
/// Degenerate parameters yield an empty catalog.
pub fn extract_grid_patterns<S: Symbol>(
    sample: &Array2<S>,
    n: usize,
    transforms: PatternTransforms,
) -> PatternCatalog<BlockPattern<S>> {
    let mut catalog = PatternCatalog::new();
    let (rows, cols) = sample.dim();
    if n == 0 || n > rows || n > cols {
        return catalog;
    }

    for r in 0..rows {
        for c in 0..cols {
            let mut symbols = Vec::with_capacity(n * n);
            for i in 0..n {
                for j in 0..n {
                    if let Some(symbol) = sample.get(((r + i) % rows, (c + j) % cols)) {
                        symbols.push(symbol.clone());
                    }
                }
            }
            let Some(window) = BlockPattern::new(n, symbols) else {
                continue;
            };

            let mut variants = vec![window];
            if transforms.rotations {
                for _ in 0..3 {
                    if let Some(last) = variants.last() {
                        variants.push(last.rotated());
                    }
                }
            }
            if transforms.reflections {
                let unreflected = variants.len();
                for i in 0..unreflected {
                    if let Some(variant) = variants.get(i) {
                        variants.push(variant.mirrored());
                    }
                }
            }
            for variant in variants {
                catalog.insert(variant);
            }
        }
    }
    catalog
}
