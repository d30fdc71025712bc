use ndarray::Array2;

use crate::algorithm::assembly::{assemble_grid, assemble_sequence};
use crate::algorithm::propagation::propagate;
use crate::algorithm::selection::{RandomSelector, SamplingStrategy, observe_cell};
use crate::analysis::adjacency::AdjacencyTable;
use crate::analysis::model::Model;
use crate::analysis::patterns::{BlockPattern, SequencePattern, Symbol};
use crate::io::configuration::{DEFAULT_ATTEMPT_FACTOR, DEFAULT_MAX_RESTARTS, MAX_WAVE_CELLS};
use crate::io::error::{AlgorithmError, Result, configuration_error};
use crate::spatial::topology::Topology;
use crate::spatial::wave::Wave;

/// Solver parameters controlling retry policy and sampling behavior
#[derive(Clone, Copy, Debug)]
pub struct SolverConfig {
    /// Observation attempts allowed per wave cell before a full restart
    pub attempt_factor: usize,
    /// Full restarts allowed before generation is abandoned
    pub max_restarts: usize,
    /// How observation draws patterns from a domain
    pub sampling: SamplingStrategy,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            attempt_factor: DEFAULT_ATTEMPT_FACTOR,
            max_restarts: DEFAULT_MAX_RESTARTS,
            sampling: SamplingStrategy::default(),
        }
    }
}

/// Result of driving the solver through one observe and propagate cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// A cell was observed and its consequences propagated
    Progressed,
    /// The attempt budget ran out and a fresh wave replaced the old one
    Restarted,
    /// Every cell is collapsed; the wave is ready for assembly
    Collapsed,
}

/// Drives the observe, propagate, and recover loop over one wave
///
/// Owns the wave, the random source, and all retry counters. The adjacency
/// table and frequency data are shared read-only, so independent solvers
/// can run in parallel over the same model.
pub struct Solver<'a> {
    adjacency: &'a AdjacencyTable,
    frequencies: &'a [usize],
    wave: Wave,
    selector: RandomSelector,
    config: SolverConfig,
    attempt_budget: usize,
    attempts: usize,
    restarts: usize,
}

impl<'a> Solver<'a> {
    /// Create a solver over a fresh full wave
    pub fn new(
        adjacency: &'a AdjacencyTable,
        frequencies: &'a [usize],
        topology: Topology,
        config: SolverConfig,
        seed: u64,
    ) -> Self {
        let wave = Wave::full(topology, adjacency.pattern_count());
        let attempt_budget = config.attempt_factor.saturating_mul(topology.cell_count());
        Self {
            adjacency,
            frequencies,
            wave,
            selector: RandomSelector::new(seed),
            config,
            attempt_budget,
            attempts: 0,
            restarts: 0,
        }
    }

    /// Current wave state
    pub const fn wave(&self) -> &Wave {
        &self.wave
    }

    /// Observation attempts since the last restart
    pub const fn attempts(&self) -> usize {
        self.attempts
    }

    /// Observation attempts allowed before the next restart
    pub const fn attempt_budget(&self) -> usize {
        self.attempt_budget
    }

    /// Full restarts performed so far
    pub const fn restarts(&self) -> usize {
        self.restarts
    }

    /// Run one observe and propagate cycle
    ///
    /// A snapshot taken before the observation is restored whenever the
    /// cycle ends in a contradiction, so the wave only ever advances through
    /// consistent states. Exceeding the attempt budget replaces the wave
    /// with a fresh one.
    ///
    /// # Errors
    ///
    /// Returns `AlgorithmError::DeadlockExceeded` once the restart budget is
    /// spent.
    pub fn step(&mut self) -> Result<StepOutcome> {
        self.attempts += 1;

        let snapshot = self.wave.snapshot();
        let observed = observe_cell(
            &mut self.wave,
            self.frequencies,
            self.config.sampling,
            &mut self.selector,
        );

        let contradiction = match observed {
            Some(cell) => propagate(&mut self.wave, self.adjacency, cell).is_some(),
            None => self.wave.first_contradiction().is_some(),
        };

        if observed.is_none() && !contradiction {
            return Ok(StepOutcome::Collapsed);
        }

        if self.attempts > self.attempt_budget {
            return self.restart();
        }

        if contradiction {
            self.wave.restore(snapshot);
        }

        Ok(StepOutcome::Progressed)
    }

    /// Drive the solver until the wave collapses
    ///
    /// # Errors
    ///
    /// Returns `AlgorithmError::DeadlockExceeded` when repeated restarts
    /// fail to produce a collapsed wave.
    pub fn solve(&mut self) -> Result<()> {
        loop {
            if self.step()? == StepOutcome::Collapsed {
                return Ok(());
            }
        }
    }

    fn restart(&mut self) -> Result<StepOutcome> {
        if self.restarts >= self.config.max_restarts {
            return Err(AlgorithmError::DeadlockExceeded {
                restarts: self.restarts,
                attempts: self.attempts,
            });
        }
        self.restarts += 1;
        self.attempts = 0;
        self.wave = Wave::full(self.wave.topology(), self.adjacency.pattern_count());
        Ok(StepOutcome::Restarted)
    }
}

/// Generate one sequence from a model
///
/// # Errors
///
/// Returns `AlgorithmError::Configuration` for an invalid cell count and
/// `AlgorithmError::DeadlockExceeded` when the solve is abandoned.
pub fn generate_sequence<S: Symbol>(
    model: &Model<SequencePattern<S>>,
    cells: usize,
    seed: u64,
) -> Result<Vec<S>> {
    generate_sequence_with(model, cells, seed, SolverConfig::default())
}

/// Generate one sequence with explicit solver configuration
///
/// # Errors
///
/// Returns `AlgorithmError::Configuration` for an invalid cell count and
/// `AlgorithmError::DeadlockExceeded` when the solve is abandoned.
pub fn generate_sequence_with<S: Symbol>(
    model: &Model<SequencePattern<S>>,
    cells: usize,
    seed: u64,
    config: SolverConfig,
) -> Result<Vec<S>> {
    validate_wave_cells(cells)?;
    let topology = Topology::Ring { cells };
    let mut solver = Solver::new(
        model.adjacency(),
        model.catalog().frequencies(),
        topology,
        config,
        seed,
    );
    solver.solve()?;
    assemble_sequence(solver.wave(), model.catalog())
}

/// Generate one grid from a model
///
/// # Errors
///
/// Returns `AlgorithmError::Configuration` for invalid cell dimensions and
/// `AlgorithmError::DeadlockExceeded` when the solve is abandoned.
pub fn generate_grid<S: Symbol>(
    model: &Model<BlockPattern<S>>,
    rows: usize,
    cols: usize,
    seed: u64,
) -> Result<Array2<S>> {
    generate_grid_with(model, rows, cols, seed, SolverConfig::default())
}

/// Generate one grid with explicit solver configuration
///
/// # Errors
///
/// Returns `AlgorithmError::Configuration` for invalid cell dimensions and
/// `AlgorithmError::DeadlockExceeded` when the solve is abandoned.
pub fn generate_grid_with<S: Symbol>(
    model: &Model<BlockPattern<S>>,
    rows: usize,
    cols: usize,
    seed: u64,
    config: SolverConfig,
) -> Result<Array2<S>> {
    validate_wave_cells(rows.saturating_mul(cols))?;
    let topology = Topology::Grid { rows, cols };
    let mut solver = Solver::new(
        model.adjacency(),
        model.catalog().frequencies(),
        topology,
        config,
        seed,
    );
    solver.solve()?;
    assemble_grid(solver.wave(), model.catalog())
}

pub(crate) fn validate_wave_cells(total: usize) -> Result<()> {
    if total == 0 {
        return Err(configuration_error("cells", &total, &"cell count must be at least 1"));
    }
    if total > MAX_WAVE_CELLS {
        return Err(configuration_error(
            "cells",
            &total,
            &format!("cell count exceeds limit {MAX_WAVE_CELLS}"),
        ));
    }
    Ok(())
}
