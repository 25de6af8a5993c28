//! Formula assembly, solver orchestration, and model decoding

use super::constraints::{Clause, ConstraintGenerator, ConstraintStatistics};
use super::solver::{SolverOptions, SolverSolution};
use super::solver_factory::UnifiedSatSolver;
use crate::config::{BoardGeometry, Settings, SolverBackend};
use crate::error::SudokuError;
use crate::puzzle::Grid;
use anyhow::{Context, Result};
use std::time::Duration;

/// Drives one puzzle through the full pipeline: validate, assemble the
/// formula, hand it to the configured solver backend, decode the model.
///
/// The structural clause families are built once at construction and shared
/// by every solve; only the clue clauses differ between puzzles.
pub struct SudokuEncoder {
    geometry: BoardGeometry,
    generator: ConstraintGenerator,
    structural: Vec<Clause>,
    backend: SolverBackend,
    timeout: Duration,
}

impl SudokuEncoder {
    /// Create an encoder from settings
    pub fn new(settings: &Settings) -> Self {
        let geometry = settings.encoding.geometry;
        let generator = ConstraintGenerator::new(geometry);
        let structural = generator.structural_clauses();

        Self {
            geometry,
            generator,
            structural,
            backend: settings.solver.backend,
            timeout: Duration::from_secs(settings.solver.timeout_seconds),
        }
    }

    /// Full formula for one puzzle: the shared structural clauses followed
    /// by the puzzle's clue clauses
    pub fn encode(&self, puzzle: &Grid) -> Result<Vec<Clause>, SudokuError> {
        let mut formula = self.structural.clone();
        formula.extend(self.generator.clue_clauses(puzzle)?);
        Ok(formula)
    }

    /// Solve a puzzle and return the completed grid.
    ///
    /// Fails with [`SudokuError::Unsolvable`] when the solver proves the
    /// clues contradictory; that is an expected outcome for bad puzzles,
    /// not a pipeline fault.
    pub fn solve(&self, puzzle: &Grid) -> Result<Grid> {
        let formula = self.encode(puzzle)?;

        let mut solver = self.fresh_solver();
        solver
            .add_clauses(&formula)
            .context("Failed to load formula into SAT solver")?;

        match solver.solve().context("SAT solving failed")? {
            Some(solution) => Ok(self.decode_model(&solution)?),
            None => Err(SudokuError::Unsolvable.into()),
        }
    }

    /// Count the puzzle's solutions, up to `limit`.
    ///
    /// A well-posed puzzle reports exactly 1; a count of 2 already proves
    /// the clues underdetermine the board, so small limits suffice.
    pub fn count_solutions(&self, puzzle: &Grid, limit: usize) -> Result<usize> {
        let formula = self.encode(puzzle)?;

        let mut solver = self.fresh_solver();
        solver
            .add_clauses(&formula)
            .context("Failed to load formula into SAT solver")?;

        let solutions = solver
            .solve_multiple(limit)
            .context("SAT solving failed")?;
        Ok(solutions.len())
    }

    /// Read a completed grid back out of a solver model.
    ///
    /// For each cell the first digit whose variable the model sets true is
    /// taken. A cell with no true digit variable cannot happen against a
    /// well-formed formula, so it is surfaced as [`SudokuError::DecodeFailure`]
    /// instead of being papered over with a sentinel.
    pub fn decode_model(&self, solution: &SolverSolution) -> Result<Grid, SudokuError> {
        let side = self.geometry.side();
        let indexer = self.generator.indexer();
        let mut grid = Grid::empty(self.geometry);

        for row in 0..side {
            for col in 0..side {
                let digit = indexer
                    .digit_literals(row + 1, col + 1)
                    .into_iter()
                    .find(|&(_, id)| solution.is_true(id))
                    .map(|(digit, _)| digit);

                match digit {
                    Some(digit) => grid.set(row, col, digit as u8),
                    None => return Err(SudokuError::DecodeFailure { row, col }),
                }
            }
        }

        Ok(grid)
    }

    /// Board geometry the encoder was built for
    pub fn geometry(&self) -> BoardGeometry {
        self.geometry
    }

    /// Get encoding statistics
    pub fn statistics(&self) -> EncodingStatistics {
        EncodingStatistics {
            constraints: self.generator.statistics(),
            backend: self.backend,
        }
    }

    fn fresh_solver(&self) -> UnifiedSatSolver {
        let mut solver = UnifiedSatSolver::new(self.backend);
        solver.configure(&SolverOptions {
            timeout: Some(self.timeout),
        });
        solver
    }
}

/// Statistics about the SAT encoding
#[derive(Debug, Clone)]
pub struct EncodingStatistics {
    pub constraints: ConstraintStatistics,
    pub backend: SolverBackend,
}

impl std::fmt::Display for EncodingStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SAT Encoding Statistics:")?;
        writeln!(f, "  Backend: {:?}", self.backend)?;
        write!(f, "{}", self.constraints)?;
        Ok(())
    }
}
