//! Sudoku SAT Solver
//!
//! This library solves Sudoku puzzles by reduction to boolean
//! satisfiability: the board becomes a CNF formula, an off-the-shelf SAT
//! solver finds a model, and the model is decoded back into a completed
//! grid.

pub mod config;
pub mod error;
pub mod puzzle;
pub mod sat;
pub mod solving;
pub mod utils;

pub use config::Settings;
pub use error::SudokuError;
pub use puzzle::Grid;
pub use solving::{Solution, SudokuProblem};

use anyhow::Result;

/// Main entry point: load the puzzle named in the settings and solve it
pub fn solve_puzzle(settings: Settings) -> Result<Solution> {
    let mut problem = SudokuProblem::new(settings)?;
    problem.solve()
}
