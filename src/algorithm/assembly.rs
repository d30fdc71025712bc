use ndarray::Array2;

use crate::algorithm::bitset::PatternBitset;
use crate::analysis::patterns::{BlockPattern, PatternCatalog, SequencePattern, Symbol};
use crate::io::error::{AlgorithmError, Result, configuration_error};
use crate::spatial::topology::Topology;
use crate::spatial::wave::Wave;

/// Concatenate the full pattern content of every collapsed cell
///
/// Output length is the cell count times the pattern size.
///
/// # Errors
///
/// Returns `AlgorithmError::IncompleteWave` when any cell still holds more
/// or fewer than one candidate pattern.
pub fn assemble_sequence<S: Symbol>(
    wave: &Wave,
    catalog: &PatternCatalog<SequencePattern<S>>,
) -> Result<Vec<S>> {
    let mut output = Vec::new();
    for cell in 0..wave.cell_count() {
        let pattern = collapsed_content(wave, catalog, cell)?;
        output.extend(pattern.symbols().iter().cloned());
    }
    Ok(output)
}

/// Tile the full pattern content of every collapsed cell into a grid
///
/// Each cell contributes its whole block at offset (row × size, col × size),
/// so the output measures (rows × size) by (cols × size).
///
/// # Errors
///
/// Returns `AlgorithmError::IncompleteWave` when any cell still holds more
/// or fewer than one candidate pattern, and `AlgorithmError::Configuration`
/// when the wave is not laid out on a grid.
pub fn assemble_grid<S: Symbol>(
    wave: &Wave,
    catalog: &PatternCatalog<BlockPattern<S>>,
) -> Result<Array2<S>> {
    let Topology::Grid { rows, cols } = wave.topology() else {
        return Err(configuration_error("topology", &"ring", &"grid assembly requires a grid wave"));
    };

    let mut contents = Vec::with_capacity(wave.cell_count());
    for cell in 0..wave.cell_count() {
        contents.push(collapsed_content(wave, catalog, cell)?);
    }
    let size = contents.first().map_or(0, |pattern| pattern.size());

    let mut symbols = Vec::with_capacity(rows * cols * size * size);
    for out_row in 0..rows * size {
        for out_col in 0..cols * size {
            let cell = (out_row / size) * cols + out_col / size;
            if let Some(symbol) = contents
                .get(cell)
                .and_then(|pattern| pattern.get(out_row % size, out_col % size))
            {
                symbols.push(symbol.clone());
            }
        }
    }

    Array2::from_shape_vec((rows * size, cols * size), symbols).map_err(|err| {
        configuration_error("pattern_size", &err, &"catalog patterns disagree on size")
    })
}

fn collapsed_content<'a, P: Clone + Eq + std::hash::Hash>(
    wave: &Wave,
    catalog: &'a PatternCatalog<P>,
    cell: usize,
) -> Result<&'a P> {
    let remaining = wave.domain(cell).map_or(0, PatternBitset::count);
    wave.collapsed_pattern(cell)
        .and_then(|id| catalog.content(id))
        .ok_or(AlgorithmError::IncompleteWave { cell, remaining })
}
