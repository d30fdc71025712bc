use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::spatial::wave::Wave;

/// Seeded random selector for reproducible stochastic choices
pub struct RandomSelector {
    rng: StdRng,
}

impl RandomSelector {
    /// Create a deterministic random selector
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Uniform random selection of one of `options` indices
    ///
    /// Returns 0 when there are no options
    pub fn uniform_choice(&mut self, options: usize) -> usize {
        if options == 0 {
            return 0;
        }
        self.rng.random_range(0..options)
    }

    /// Generic weighted random selection
    ///
    /// Returns index into weights array using cumulative distribution
    pub fn weighted_choice(&mut self, weights: &[f64]) -> usize {
        let total: f64 = weights.iter().sum();
        if total <= 0.0 {
            return 0;
        }

        let mut rand_val = self.rng.random::<f64>() * total;
        for (i, &weight) in weights.iter().enumerate() {
            rand_val -= weight;
            if rand_val <= 0.0 {
                return i;
            }
        }
        weights.len() - 1
    }
}

/// How observation draws a pattern from the selected cell's domain
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SamplingStrategy {
    /// Every candidate pattern is equally likely
    #[default]
    Uniform,

    /// Candidates are weighted by their sample occurrence counts
    FrequencyWeighted,
}

/// Select and collapse the lowest-entropy uncertain cell
///
/// Scans cells in flat index order, takes the first cell whose domain is the
/// smallest above one, and collapses it to one randomly drawn candidate.
/// Returns the collapsed cell, or `None` when no cell is uncertain.
pub fn observe_cell(
    wave: &mut Wave,
    frequencies: &[usize],
    strategy: SamplingStrategy,
    selector: &mut RandomSelector,
) -> Option<usize> {
    let mut best: Option<(usize, usize)> = None;
    for (cell, domain) in wave.domains().iter().enumerate() {
        let size = domain.count();
        if size > 1 && best.is_none_or(|(_, smallest)| size < smallest) {
            best = Some((cell, size));
        }
    }

    let (cell, _) = best?;
    let candidates = wave.domain(cell)?.to_vec();
    let index = match strategy {
        SamplingStrategy::Uniform => selector.uniform_choice(candidates.len()),
        SamplingStrategy::FrequencyWeighted => {
            let weights: Vec<f64> = candidates
                .iter()
                .map(|&id| frequencies.get(id).copied().unwrap_or(0) as f64)
                .collect();
            selector.weighted_choice(&weights)
        }
    };

    let chosen = candidates.get(index).copied()?;
    wave.collapse_cell(cell, chosen);
    Some(cell)
}
