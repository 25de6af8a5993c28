//! SAT solver integration using CaDiCaL

use super::constraints::Clause;
use anyhow::Result;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// SAT solver wrapper for CaDiCaL
pub struct CadicalSolver {
    solver: cadical::Solver,
    variable_count: usize,
    clause_count: usize,
    timeout: Option<Duration>,
}

/// A satisfying assignment returned by a solver
#[derive(Debug, Clone)]
pub struct SolverSolution {
    pub assignment: HashMap<i32, bool>,
    pub solve_time: Duration,
}

impl SolverSolution {
    /// Truth value of a variable; unassigned variables read as false
    pub fn is_true(&self, variable: i32) -> bool {
        self.assignment.get(&variable).copied().unwrap_or(false)
    }
}

/// Size counters for a loaded formula
#[derive(Debug, Clone)]
pub struct SolverStatistics {
    pub variable_count: usize,
    pub clause_count: usize,
}

/// Configuration options for a SAT solver backend
#[derive(Debug, Clone, Default)]
pub struct SolverOptions {
    pub timeout: Option<Duration>,
}

impl CadicalSolver {
    /// Create a new SAT solver instance
    pub fn new() -> Self {
        Self {
            solver: cadical::Solver::new(),
            variable_count: 0,
            clause_count: 0,
            timeout: None,
        }
    }

    /// Set solving timeout
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = Some(timeout);
    }

    /// Add clauses to the solver
    pub fn add_clauses(&mut self, clauses: &[Clause]) -> Result<()> {
        for clause in clauses {
            self.add_clause(clause)?;
        }
        Ok(())
    }

    /// Add a single clause to the solver
    pub fn add_clause(&mut self, clause: &Clause) -> Result<()> {
        if clause.is_empty() {
            anyhow::bail!("Cannot add empty clause (unsatisfiable)");
        }

        for &literal in &clause.literals {
            let var = literal.unsigned_abs() as usize;
            if var > self.variable_count {
                self.variable_count = var;
            }
        }

        self.solver.add_clause(clause.literals.iter().copied());

        self.clause_count += 1;
        Ok(())
    }

    /// Solve the loaded formula. `Ok(None)` means proven unsatisfiable.
    ///
    /// This call blocks until the solver finishes. CaDiCaL 0.1 exposes no
    /// direct timeout hook, so the configured timeout is currently
    /// best-effort only at this boundary.
    pub fn solve(&mut self) -> Result<Option<SolverSolution>> {
        let start_time = Instant::now();

        let result = self.solver.solve();
        let solve_time = start_time.elapsed();

        if result == Some(true) {
            let assignment = self.extract_assignment();
            Ok(Some(SolverSolution {
                assignment,
                solve_time,
            }))
        } else {
            Ok(None)
        }
    }

    /// Solve repeatedly, blocking each found model, until `max_solutions`
    /// models are collected or the formula becomes unsatisfiable
    pub fn solve_multiple(&mut self, max_solutions: usize) -> Result<Vec<SolverSolution>> {
        let mut solutions = Vec::new();
        let start_time = Instant::now();

        for _ in 0..max_solutions {
            if self.solver.solve() == Some(true) {
                let assignment = self.extract_assignment();
                solutions.push(SolverSolution {
                    assignment: assignment.clone(),
                    solve_time: start_time.elapsed(),
                });

                self.add_blocking_clause(&assignment)?;
            } else {
                break;
            }
        }

        Ok(solutions)
    }

    /// Extract variable assignment from the solver
    fn extract_assignment(&self) -> HashMap<i32, bool> {
        let mut assignment = HashMap::new();

        for var in 1..=self.variable_count as i32 {
            if let Some(value) = self.solver.value(var) {
                assignment.insert(var, value);
            }
        }

        assignment
    }

    /// Add a clause ruling out the given assignment
    fn add_blocking_clause(&mut self, assignment: &HashMap<i32, bool>) -> Result<()> {
        let blocking_literals = assignment
            .iter()
            .map(|(&var, &value)| if value { -var } else { var })
            .collect();

        self.add_clause(&Clause::new(blocking_literals))
    }

    /// Get solver statistics
    pub fn statistics(&self) -> SolverStatistics {
        SolverStatistics {
            variable_count: self.variable_count,
            clause_count: self.clause_count,
        }
    }

    /// Get the number of variables
    pub fn variable_count(&self) -> usize {
        self.variable_count
    }

    /// Get the number of clauses
    pub fn clause_count(&self) -> usize {
        self.clause_count
    }

    /// Apply configuration options
    pub fn configure(&mut self, options: &SolverOptions) {
        if let Some(timeout) = options.timeout {
            self.set_timeout(timeout);
        }
    }
}

impl Default for CadicalSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SolverStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SAT Solver Statistics:")?;
        writeln!(f, "  Variables: {}", self.variable_count)?;
        writeln!(f, "  Clauses: {}", self.clause_count)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solver_creation() {
        let solver = CadicalSolver::new();
        assert_eq!(solver.variable_count(), 0);
        assert_eq!(solver.clause_count(), 0);
    }

    #[test]
    fn test_simple_satisfiable() {
        let mut solver = CadicalSolver::new();

        // x1 ∨ x2, ¬x1 ∨ x2: x2 must be true
        solver.add_clause(&Clause::binary(1, 2)).unwrap();
        solver.add_clause(&Clause::binary(-1, 2)).unwrap();

        let solution = solver.solve().unwrap();
        assert!(solution.is_some());
        assert!(solution.unwrap().is_true(2));
    }

    #[test]
    fn test_unsatisfiable() {
        let mut solver = CadicalSolver::new();

        solver.add_clause(&Clause::unit(1)).unwrap();
        solver.add_clause(&Clause::unit(-1)).unwrap();

        let solution = solver.solve().unwrap();
        assert!(solution.is_none());
    }

    #[test]
    fn test_multiple_solutions() {
        let mut solver = CadicalSolver::new();

        // x1 ∨ x2 has three models
        solver.add_clause(&Clause::binary(1, 2)).unwrap();

        let solutions = solver.solve_multiple(4).unwrap();
        assert_eq!(solutions.len(), 3);

        for solution in &solutions {
            assert!(solution.is_true(1) || solution.is_true(2));
        }
    }

    #[test]
    fn test_empty_clause_error() {
        let mut solver = CadicalSolver::new();
        assert!(solver.add_clause(&Clause::new(vec![])).is_err());
    }

    #[test]
    fn test_variable_count_tracking() {
        let mut solver = CadicalSolver::new();

        solver.add_clause(&Clause::new(vec![1, -5, 3])).unwrap();
        assert_eq!(solver.variable_count(), 5);

        solver.add_clause(&Clause::binary(2, -7)).unwrap();
        assert_eq!(solver.variable_count(), 7);
        assert_eq!(solver.clause_count(), 2);
    }
}
