//! CNF constraint generation for the Sudoku encoding

use super::VariableIndexer;
use crate::config::BoardGeometry;
use crate::error::SudokuError;
use crate::puzzle::{Grid, Subset, SudokuRules};
use itertools::Itertools;
use rayon::prelude::*;

/// A SAT clause: the disjunction of its literals
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    pub literals: Vec<i32>, // Positive for variable, negative for negation
}

impl Clause {
    /// Create a new clause from literals
    pub fn new(literals: Vec<i32>) -> Self {
        Self { literals }
    }

    /// Create a unit clause (single literal)
    pub fn unit(literal: i32) -> Self {
        Self {
            literals: vec![literal],
        }
    }

    /// Create a binary clause (two literals)
    pub fn binary(lit1: i32, lit2: i32) -> Self {
        Self {
            literals: vec![lit1, lit2],
        }
    }

    /// Check if clause is empty (unsatisfiable)
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// Check if clause is unit
    pub fn is_unit(&self) -> bool {
        self.literals.len() == 1
    }

    /// Number of literals in the clause
    pub fn len(&self) -> usize {
        self.literals.len()
    }
}

/// Generates the CNF clause families for a Sudoku board.
///
/// Four families make up a puzzle's formula. Three are structural and hold
/// for every puzzle on the same board: each cell holds at least one digit,
/// each cell holds at most one digit, and no row, column, or box repeats a
/// digit. The fourth pins the pre-filled clue cells of one concrete puzzle.
pub struct ConstraintGenerator {
    geometry: BoardGeometry,
    indexer: VariableIndexer,
}

impl ConstraintGenerator {
    /// Create a generator for the given board geometry
    pub fn new(geometry: BoardGeometry) -> Self {
        Self {
            geometry,
            indexer: VariableIndexer::new(geometry),
        }
    }

    /// The indexer backing this generator's literals
    pub fn indexer(&self) -> &VariableIndexer {
        &self.indexer
    }

    /// Every structural clause, in a fixed order: base clauses, per-cell
    /// uniqueness, then row, column, and box uniqueness.
    ///
    /// Output is identical from call to call; nothing here depends on a
    /// specific puzzle.
    pub fn structural_clauses(&self) -> Vec<Clause> {
        let mut clauses = self.base_clauses();
        clauses.extend(self.cell_uniqueness_clauses());
        clauses.extend(self.row_uniqueness_clauses());
        clauses.extend(self.column_uniqueness_clauses());
        clauses.extend(self.box_uniqueness_clauses());
        clauses
    }

    /// One clause per cell naming all of its digit literals: the cell must
    /// hold at least one digit
    pub fn base_clauses(&self) -> Vec<Clause> {
        let side = self.geometry.side();
        let mut clauses = Vec::with_capacity(self.geometry.cell_count());

        for row in 1..=side {
            for column in 1..=side {
                let literals = self
                    .indexer
                    .digit_literals(row, column)
                    .into_iter()
                    .map(|(_, id)| id)
                    .collect();
                clauses.push(Clause::new(literals));
            }
        }

        clauses
    }

    /// For each cell, one clause per unordered digit pair forbidding the
    /// cell from holding both
    pub fn cell_uniqueness_clauses(&self) -> Vec<Clause> {
        let side = self.geometry.side();
        let mut clauses = Vec::new();

        for row in 1..=side {
            for column in 1..=side {
                for (d1, d2) in (1..=side).tuple_combinations() {
                    clauses.push(Clause::binary(
                        -self.indexer.index(row, column, d1),
                        -self.indexer.index(row, column, d2),
                    ));
                }
            }
        }

        clauses
    }

    /// Clauses forbidding a repeated digit within one cell subset.
    ///
    /// The subset is plain data; the same generator serves rows, columns,
    /// and boxes. For every unordered pair of cells and every digit, one
    /// binary clause rules out both cells holding that digit.
    pub fn subset_uniqueness_clauses(&self, cells: &[(usize, usize)]) -> Vec<Clause> {
        assert_eq!(
            cells.len(),
            self.geometry.side(),
            "uniqueness subsets must name exactly {} cells",
            self.geometry.side()
        );

        let mut clauses = Vec::new();

        for (&(row_a, col_a), &(row_b, col_b)) in cells.iter().tuple_combinations() {
            for digit in 1..=self.geometry.digit_count() {
                clauses.push(Clause::binary(
                    -self.indexer.index(row_a, col_a, digit),
                    -self.indexer.index(row_b, col_b, digit),
                ));
            }
        }

        clauses
    }

    /// Subset uniqueness applied to every row
    pub fn row_uniqueness_clauses(&self) -> Vec<Clause> {
        self.subset_family(SudokuRules::rows(self.geometry))
    }

    /// Subset uniqueness applied to every column
    pub fn column_uniqueness_clauses(&self) -> Vec<Clause> {
        self.subset_family(SudokuRules::columns(self.geometry))
    }

    /// Subset uniqueness applied to every box
    pub fn box_uniqueness_clauses(&self) -> Vec<Clause> {
        self.subset_family(SudokuRules::boxes(self.geometry))
    }

    /// Run the subset generator over a family of subsets.
    ///
    /// The subsets are independent, so they are encoded in parallel; the
    /// ordered collect keeps the concatenation deterministic.
    fn subset_family(&self, subsets: Vec<Subset>) -> Vec<Clause> {
        subsets
            .par_iter()
            .map(|subset| self.subset_uniqueness_clauses(subset))
            .collect::<Vec<_>>()
            .into_iter()
            .flatten()
            .collect()
    }

    /// One unit clause per pre-filled cell of the puzzle. The only clause
    /// family that depends on the puzzle instance.
    pub fn clue_clauses(&self, puzzle: &Grid) -> Result<Vec<Clause>, SudokuError> {
        if puzzle.geometry() != self.geometry {
            return Err(SudokuError::InvalidGridShape {
                expected: self.geometry.side(),
                rows: puzzle.geometry().side(),
                cols: puzzle.geometry().side(),
            });
        }

        Ok(puzzle
            .clues()
            .into_iter()
            .map(|(row, col, digit)| {
                Clause::unit(self.indexer.index(row + 1, col + 1, digit as usize))
            })
            .collect())
    }

    /// Clause counts, derivable from the geometry alone
    pub fn statistics(&self) -> ConstraintStatistics {
        let side = self.geometry.side();
        let cells = self.geometry.cell_count();
        let pairs = side * (side - 1) / 2;

        let base_clauses = cells;
        let cell_uniqueness_clauses = cells * pairs;
        let subset_family_clauses = side * pairs * side;

        ConstraintStatistics {
            variable_count: self.geometry.variable_count(),
            base_clauses,
            cell_uniqueness_clauses,
            row_uniqueness_clauses: subset_family_clauses,
            column_uniqueness_clauses: subset_family_clauses,
            box_uniqueness_clauses: subset_family_clauses,
        }
    }
}

/// Structural clause counts for one board geometry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintStatistics {
    pub variable_count: usize,
    pub base_clauses: usize,
    pub cell_uniqueness_clauses: usize,
    pub row_uniqueness_clauses: usize,
    pub column_uniqueness_clauses: usize,
    pub box_uniqueness_clauses: usize,
}

impl ConstraintStatistics {
    /// Total structural clauses across all families
    pub fn structural_total(&self) -> usize {
        self.base_clauses
            + self.cell_uniqueness_clauses
            + self.row_uniqueness_clauses
            + self.column_uniqueness_clauses
            + self.box_uniqueness_clauses
    }
}

impl std::fmt::Display for ConstraintStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Constraint Statistics:")?;
        writeln!(f, "  Variables: {}", self.variable_count)?;
        writeln!(f, "  Base clauses: {}", self.base_clauses)?;
        writeln!(f, "  Cell uniqueness: {}", self.cell_uniqueness_clauses)?;
        writeln!(f, "  Row uniqueness: {}", self.row_uniqueness_clauses)?;
        writeln!(f, "  Column uniqueness: {}", self.column_uniqueness_clauses)?;
        writeln!(f, "  Box uniqueness: {}", self.box_uniqueness_clauses)?;
        writeln!(f, "  Structural total: {}", self.structural_total())?;
        Ok(())
    }
}
