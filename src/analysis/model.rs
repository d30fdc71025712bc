//! Sample models combining a pattern catalog with its adjacency table
//!
//! A model is derived once per input sample and is immutable afterward;
//! any number of generation runs may share it read-only.

use ndarray::Array2;

use crate::analysis::adjacency::AdjacencyTable;
use crate::analysis::patterns::{
    BlockPattern, PatternCatalog, PatternTransforms, SequencePattern, Symbol,
    extract_grid_patterns, extract_sequence_patterns,
};
use crate::io::error::{Result, configuration_error};
use crate::spatial::topology::{GRID_DIRECTIONS, RING_DIRECTIONS};

/// Catalog and adjacency table derived from one sample
#[derive(Debug, Clone)]
pub struct Model<P> {
    catalog: PatternCatalog<P>,
    adjacency: AdjacencyTable,
    pattern_size: usize,
}

impl<P> Model<P> {
    /// The deduplicated pattern catalog
    pub const fn catalog(&self) -> &PatternCatalog<P> {
        &self.catalog
    }

    /// The admissible-neighbor lookup table
    pub const fn adjacency(&self) -> &AdjacencyTable {
        &self.adjacency
    }

    /// Window size the catalog was extracted with
    pub const fn pattern_size(&self) -> usize {
        self.pattern_size
    }
}

impl<S: Symbol> Model<SequencePattern<S>> {
    /// Build a model from a sequence sample
    ///
    /// # Errors
    ///
    /// Returns `AlgorithmError::Configuration` when the sample is empty or
    /// `pattern_size` is zero or exceeds the sample length.
    pub fn from_sequence(sample: &[S], pattern_size: usize) -> Result<Self> {
        if sample.is_empty() {
            return Err(configuration_error("sample", &"", &"sample must not be empty"));
        }
        validate_pattern_size(pattern_size, sample.len())?;

        let catalog = extract_sequence_patterns(sample, pattern_size);
        let adjacency = AdjacencyTable::build(&catalog, &RING_DIRECTIONS);
        Ok(Self {
            catalog,
            adjacency,
            pattern_size,
        })
    }
}

impl<S: Symbol> Model<BlockPattern<S>> {
    /// Build a model from a grid sample
    ///
    /// # Errors
    ///
    /// Returns `AlgorithmError::Configuration` when the sample has a zero
    /// dimension or `pattern_size` is zero or exceeds either dimension.
    pub fn from_grid(sample: &Array2<S>, pattern_size: usize) -> Result<Self> {
        Self::from_grid_with_transforms(sample, pattern_size, PatternTransforms::default())
    }

    /// Build a model from a grid sample with symmetry augmentation
    ///
    /// # Errors
    ///
    /// Returns `AlgorithmError::Configuration` under the same conditions as
    /// [`Model::from_grid`].
    pub fn from_grid_with_transforms(
        sample: &Array2<S>,
        pattern_size: usize,
        transforms: PatternTransforms,
    ) -> Result<Self> {
        let (rows, cols) = sample.dim();
        if rows == 0 || cols == 0 {
            return Err(configuration_error(
                "sample",
                &format!("{rows}x{cols}"),
                &"sample must not be empty",
            ));
        }
        validate_pattern_size(pattern_size, rows.min(cols))?;

        let catalog = extract_grid_patterns(sample, pattern_size, transforms);
        let adjacency = AdjacencyTable::build(&catalog, &GRID_DIRECTIONS);
        Ok(Self {
            catalog,
            adjacency,
            pattern_size,
        })
    }
}

fn validate_pattern_size(pattern_size: usize, limit: usize) -> Result<()> {
    if pattern_size == 0 {
        return Err(configuration_error(
            "pattern_size",
            &pattern_size,
            &"pattern size must be at least 1",
        ));
    }
    if pattern_size > limit {
        return Err(configuration_error(
            "pattern_size",
            &pattern_size,
            &format!("pattern size exceeds sample extent {limit}"),
        ));
    }
    Ok(())
}
