use bitvec::prelude::*;
use std::fmt;

/// Fixed-size bitset over catalog pattern identifiers
///
/// Backs both cell domains and adjacency rows. Pattern identifiers are
/// 0-based catalog indices. Provides O(1) membership testing and word-wise
/// set operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatternBitset {
    bits: BitVec,
    pattern_count: usize,
}

impl PatternBitset {
    /// Create a bitset with no patterns present
    pub fn new(pattern_count: usize) -> Self {
        Self {
            bits: bitvec![0; pattern_count],
            pattern_count,
        }
    }

    /// Create a bitset containing every catalog pattern
    pub fn all(pattern_count: usize) -> Self {
        Self {
            bits: bitvec![1; pattern_count],
            pattern_count,
        }
    }

    /// Create a bitset containing a single pattern
    pub fn singleton(pattern_count: usize, pattern: usize) -> Self {
        let mut bitset = Self::new(pattern_count);
        bitset.insert(pattern);
        bitset
    }

    /// Insert a pattern identifier
    ///
    /// Identifiers at or beyond the catalog size are ignored
    pub fn insert(&mut self, pattern: usize) {
        if pattern < self.pattern_count {
            self.bits.set(pattern, true);
        }
    }

    /// Test pattern membership
    pub fn contains(&self, pattern: usize) -> bool {
        self.bits.get(pattern).as_deref() == Some(&true)
    }

    /// Intersect this bitset with another in-place
    pub fn intersect_with(&mut self, other: &Self) {
        self.bits &= &other.bits;
    }

    /// Union another bitset into this one in-place
    pub fn union_with(&mut self, other: &Self) {
        self.bits |= &other.bits;
    }

    /// Create a new bitset containing the intersection
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        let mut result = self.clone();
        result.intersect_with(other);
        result
    }

    /// Test if no patterns are present
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Count patterns in the set
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Lowest pattern identifier present, if any
    pub fn first(&self) -> Option<usize> {
        self.bits.first_one()
    }

    /// Iterate over pattern identifiers present in the set
    pub fn iter_ones(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.iter_ones()
    }

    /// Extract all pattern identifiers as a vector
    pub fn to_vec(&self) -> Vec<usize> {
        self.bits.iter_ones().collect()
    }
}

impl fmt::Display for PatternBitset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PatternBitset({} patterns: {:?})",
            self.count(),
            self.to_vec()
        )
    }
}
