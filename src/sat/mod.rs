//! SAT encoding and solving components

pub mod constraints;
pub mod encoder;
pub mod solver;
pub mod solver_factory;
pub mod splr_solver;
pub mod variables;

pub use constraints::{Clause, ConstraintGenerator};
pub use encoder::SudokuEncoder;
pub use solver::{CadicalSolver, SolverOptions, SolverSolution};
pub use solver_factory::UnifiedSatSolver;
pub use splr_solver::SplrSolver;
pub use variables::VariableIndexer;
