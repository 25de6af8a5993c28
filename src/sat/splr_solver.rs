//! Splr SAT solver integration
//!
//! Splr consumes a whole formula in one call instead of accepting clauses
//! incrementally, so this wrapper buffers clauses and converts on solve.

use super::constraints::Clause;
use super::solver::{SolverOptions, SolverSolution, SolverStatistics};
use anyhow::Result;
use splr::Certificate;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// SAT solver wrapper for Splr
pub struct SplrSolver {
    clauses: Vec<Vec<i32>>,
    variable_count: usize,
    timeout: Option<Duration>,
}

impl SplrSolver {
    /// Create a new SAT solver instance
    pub fn new() -> Self {
        Self {
            clauses: Vec::new(),
            variable_count: 0,
            timeout: None,
        }
    }

    /// Set solving timeout.
    ///
    /// Splr's certificate interface offers no timeout hook, so the value is
    /// recorded but not enforced at this boundary.
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

        self.clauses.push(clause.literals.clone());
        Ok(())
    }

    /// Solve the buffered formula. `Ok(None)` means proven unsatisfiable.
    pub fn solve(&mut self) -> Result<Option<SolverSolution>> {
        let start_time = Instant::now();

        let certificate = Certificate::try_from(self.clauses.clone())
            .map_err(|e| anyhow::anyhow!("Splr solver error: {:?}", e))?;

        let solve_time = start_time.elapsed();

        match certificate {
            Certificate::SAT(literals) => {
                let mut assignment = HashMap::new();
                for literal in literals {
                    assignment.insert(literal.abs(), literal > 0);
                }
                Ok(Some(SolverSolution {
                    assignment,
                    solve_time,
                }))
            }
            Certificate::UNSAT => Ok(None),
        }
    }

    /// Solve repeatedly, blocking each found model, until `max_solutions`
    /// models are collected or the formula becomes unsatisfiable
    pub fn solve_multiple(&mut self, max_solutions: usize) -> Result<Vec<SolverSolution>> {
        let mut solutions = Vec::new();

        for _ in 0..max_solutions {
            match self.solve()? {
                Some(solution) => {
                    let blocking_literals = solution
                        .assignment
                        .iter()
                        .map(|(&var, &value)| if value { -var } else { var })
                        .collect();
                    solutions.push(solution);
                    self.add_clause(&Clause::new(blocking_literals))?;
                }
                None => break,
            }
        }

        Ok(solutions)
    }

    /// Get solver statistics
    pub fn statistics(&self) -> SolverStatistics {
        SolverStatistics {
            variable_count: self.variable_count,
            clause_count: self.clauses.len(),
        }
    }

    /// Get the number of variables
    pub fn variable_count(&self) -> usize {
        self.variable_count
    }

    /// Get the number of clauses
    pub fn clause_count(&self) -> usize {
        self.clauses.len()
    }

    /// Apply configuration options
    pub fn configure(&mut self, options: &SolverOptions) {
        if let Some(timeout) = options.timeout {
            self.set_timeout(timeout);
        }
    }
}

impl Default for SplrSolver {
    fn default() -> Self {
        Self::new()
    }
}
