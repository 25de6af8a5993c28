//! Independent checking of decoded grids
//!
//! The solver's model is not taken on faith: every solved grid is re-checked
//! against the Sudoku rules directly before it is handed back to the caller.

use crate::config::BoardGeometry;
use crate::puzzle::{Cell, Grid, SudokuRules};
use anyhow::Result;

/// Validates candidate solutions against the puzzle they came from
pub struct SolutionValidator {
    geometry: BoardGeometry,
}

/// Result of solution validation
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub error_message: Option<String>,
    pub details: ValidationDetails,
}

/// Detailed validation information
#[derive(Debug, Clone, Default)]
pub struct ValidationDetails {
    pub is_complete: bool,
    pub rows_valid: bool,
    pub columns_valid: bool,
    pub boxes_valid: bool,
    pub clues_preserved: bool,
    pub violations: Vec<RuleViolation>,
}

/// One rule broken by a candidate grid
#[derive(Debug, Clone)]
pub struct RuleViolation {
    pub cells: Vec<Cell>,
    pub description: String,
}

impl SolutionValidator {
    /// Create a validator for boards of the given geometry
    pub fn new(geometry: BoardGeometry) -> Self {
        Self { geometry }
    }

    /// Check a candidate grid: complete, every row/column/box a permutation
    /// of the digits, and every original clue left untouched
    pub fn validate(&self, puzzle: &Grid, candidate: &Grid) -> Result<ValidationResult> {
        if candidate.geometry() != self.geometry || puzzle.geometry() != self.geometry {
            return Ok(ValidationResult {
                is_valid: false,
                error_message: Some(format!(
                    "Grid geometry mismatch: expected a {0}x{0} board",
                    self.geometry.side()
                )),
                details: ValidationDetails::default(),
            });
        }

        let mut violations = Vec::new();

        let is_complete = candidate.is_complete();
        if !is_complete {
            violations.push(RuleViolation {
                cells: vec![],
                description: format!("{} cells are still unknown", candidate.unknown_count()),
            });
        }

        let rows_valid = self.check_family(candidate, SudokuRules::rows(self.geometry), "row", &mut violations);
        let columns_valid = self.check_family(
            candidate,
            SudokuRules::columns(self.geometry),
            "column",
            &mut violations,
        );
        let boxes_valid = self.check_family(candidate, SudokuRules::boxes(self.geometry), "box", &mut violations);

        let clues_preserved = self.check_clues(puzzle, candidate, &mut violations);

        let is_valid = is_complete && rows_valid && columns_valid && boxes_valid && clues_preserved;

        let details = ValidationDetails {
            is_complete,
            rows_valid,
            columns_valid,
            boxes_valid,
            clues_preserved,
            violations,
        };

        let error_message = if is_valid {
            None
        } else {
            Some(Self::describe_failures(&details))
        };

        Ok(ValidationResult {
            is_valid,
            error_message,
            details,
        })
    }

    /// Check one subset family, collecting a violation per broken subset
    fn check_family(
        &self,
        candidate: &Grid,
        subsets: Vec<Vec<Cell>>,
        family_name: &str,
        violations: &mut Vec<RuleViolation>,
    ) -> bool {
        let mut valid = true;

        for (index, subset) in subsets.into_iter().enumerate() {
            let digits = SudokuRules::subset_digits(candidate, &subset);
            if !SudokuRules::is_permutation_of_digits(&digits, self.geometry) {
                violations.push(RuleViolation {
                    cells: subset,
                    description: format!(
                        "{} {} holds {:?}, not a permutation of 1..={}",
                        family_name,
                        index + 1,
                        digits,
                        self.geometry.side()
                    ),
                });
                valid = false;
            }
        }

        valid
    }

    /// Check that every clue survives in the candidate
    fn check_clues(&self, puzzle: &Grid, candidate: &Grid, violations: &mut Vec<RuleViolation>) -> bool {
        let mut preserved = true;

        for (row, col, digit) in puzzle.clues() {
            let actual = candidate.get(row, col);
            if actual != digit {
                violations.push(RuleViolation {
                    cells: vec![(row + 1, col + 1)],
                    description: format!(
                        "clue at ({}, {}) changed from {} to {}",
                        row + 1,
                        col + 1,
                        digit,
                        actual
                    ),
                });
                preserved = false;
            }
        }

        preserved
    }

    /// Generate a descriptive error message from validation details
    fn describe_failures(details: &ValidationDetails) -> String {
        let mut message = String::new();

        if !details.is_complete {
            message.push_str("Grid is incomplete. ");
        }
        if !(details.rows_valid && details.columns_valid && details.boxes_valid) {
            message.push_str("Digit uniqueness is broken. ");
        }
        if !details.clues_preserved {
            message.push_str("Original clues were altered. ");
        }

        for (i, violation) in details.violations.iter().take(3).enumerate() {
            if i == 0 {
                message.push_str("Examples: ");
            }
            message.push_str(&format!("{}; ", violation.description));
        }

        if details.violations.len() > 3 {
            message.push_str(&format!("... and {} more", details.violations.len() - 3));
        }

        message
    }
}
