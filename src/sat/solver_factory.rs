//! Factory for creating SAT solver instances based on configuration

use super::constraints::Clause;
use super::solver::{CadicalSolver, SolverOptions, SolverSolution, SolverStatistics};
use super::splr_solver::SplrSolver;
use crate::config::SolverBackend;
use anyhow::Result;

/// Unified SAT solver interface that can use different backends
pub enum UnifiedSatSolver {
    Cadical(CadicalSolver),
    Splr(SplrSolver),
}

impl UnifiedSatSolver {
    /// Create a new solver instance based on the specified backend
    pub fn new(backend: SolverBackend) -> Self {
        match backend {
            SolverBackend::Cadical => UnifiedSatSolver::Cadical(CadicalSolver::new()),
            SolverBackend::Splr => UnifiedSatSolver::Splr(SplrSolver::new()),
        }
    }

    /// Add clauses to the solver
    pub fn add_clauses(&mut self, clauses: &[Clause]) -> Result<()> {
        match self {
            UnifiedSatSolver::Cadical(solver) => solver.add_clauses(clauses),
            UnifiedSatSolver::Splr(solver) => solver.add_clauses(clauses),
        }
    }

    /// Add a single clause to the solver
    pub fn add_clause(&mut self, clause: &Clause) -> Result<()> {
        match self {
            UnifiedSatSolver::Cadical(solver) => solver.add_clause(clause),
            UnifiedSatSolver::Splr(solver) => solver.add_clause(clause),
        }
    }

    /// Solve the loaded formula. `Ok(None)` means proven unsatisfiable.
    pub fn solve(&mut self) -> Result<Option<SolverSolution>> {
        match self {
            UnifiedSatSolver::Cadical(solver) => solver.solve(),
            UnifiedSatSolver::Splr(solver) => solver.solve(),
        }
    }

    /// Solve and find multiple solutions up to a limit
    pub fn solve_multiple(&mut self, max_solutions: usize) -> Result<Vec<SolverSolution>> {
        match self {
            UnifiedSatSolver::Cadical(solver) => solver.solve_multiple(max_solutions),
            UnifiedSatSolver::Splr(solver) => solver.solve_multiple(max_solutions),
        }
    }

    /// Get solver statistics
    pub fn statistics(&self) -> SolverStatistics {
        match self {
            UnifiedSatSolver::Cadical(solver) => solver.statistics(),
            UnifiedSatSolver::Splr(solver) => solver.statistics(),
        }
    }

    /// Get the number of variables
    pub fn variable_count(&self) -> usize {
        match self {
            UnifiedSatSolver::Cadical(solver) => solver.variable_count(),
            UnifiedSatSolver::Splr(solver) => solver.variable_count(),
        }
    }

    /// Get the number of clauses
    pub fn clause_count(&self) -> usize {
        match self {
            UnifiedSatSolver::Cadical(solver) => solver.clause_count(),
            UnifiedSatSolver::Splr(solver) => solver.clause_count(),
        }
    }

    /// Set solver configuration options
    pub fn configure(&mut self, options: &SolverOptions) {
        match self {
            UnifiedSatSolver::Cadical(solver) => solver.configure(options),
            UnifiedSatSolver::Splr(solver) => solver.configure(options),
        }
    }

    /// Get the backend type being used
    pub fn backend(&self) -> SolverBackend {
        match self {
            UnifiedSatSolver::Cadical(_) => SolverBackend::Cadical,
            UnifiedSatSolver::Splr(_) => SolverBackend::Splr,
        }
    }
}

impl Default for UnifiedSatSolver {
    fn default() -> Self {
        UnifiedSatSolver::Cadical(CadicalSolver::new())
    }
}
