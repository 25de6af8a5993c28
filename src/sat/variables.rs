//! Variable numbering for the SAT encoding

use crate::config::BoardGeometry;

/// Maps (row, column, digit) triples to SAT variable ids and back.
///
/// The mapping is a pure arithmetic bijection: with 1-based row, column,
/// and digit, the id is `cells * (row - 1) + side * (column - 1) + digit`.
/// For the standard board that places cell (1, 1) at ids 1..=9, cell (1, 2)
/// at 10..=18, and so on up to id 729. No id is ever 0, which keeps every
/// literal usable in signed clause form.
#[derive(Debug, Clone, Copy)]
pub struct VariableIndexer {
    geometry: BoardGeometry,
}

impl VariableIndexer {
    /// Create an indexer for the given board geometry
    pub fn new(geometry: BoardGeometry) -> Self {
        Self { geometry }
    }

    /// Variable id for a (row, column, digit) triple, all 1-based.
    ///
    /// # Panics
    ///
    /// Panics if any argument is outside 1..=side. Callers own their
    /// coordinates; handing this function a bad triple is a bug, not a
    /// recoverable condition.
    pub fn index(&self, row: usize, column: usize, digit: usize) -> i32 {
        let side = self.geometry.side();
        assert!(
            (1..=side).contains(&row) && (1..=side).contains(&column),
            "cell ({}, {}) outside 1..={}",
            row,
            column,
            side
        );
        assert!(
            (1..=side).contains(&digit),
            "digit {} outside 1..={}",
            digit,
            side
        );

        let row_offset = self.geometry.cell_count() * (row - 1);
        let column_offset = side * (column - 1);

        (row_offset + column_offset + digit) as i32
    }

    /// Recover the (row, column, digit) triple behind a variable id.
    ///
    /// # Panics
    ///
    /// Panics if the id is outside 1..=variable_count.
    pub fn decode(&self, id: i32) -> (usize, usize, usize) {
        assert!(
            id >= 1 && id as usize <= self.geometry.variable_count(),
            "variable id {} outside 1..={}",
            id,
            self.geometry.variable_count()
        );

        let zero_based = id as usize - 1;
        let side = self.geometry.side();
        let cells = self.geometry.cell_count();

        let row = zero_based / cells + 1;
        let rest = zero_based % cells;
        let column = rest / side + 1;
        let digit = rest % side + 1;

        (row, column, digit)
    }

    /// Every digit a cell can hold, paired with its variable id, in
    /// ascending digit order
    pub fn digit_literals(&self, row: usize, column: usize) -> Vec<(usize, i32)> {
        (1..=self.geometry.digit_count())
            .map(|digit| (digit, self.index(row, column, digit)))
            .collect()
    }

    /// Total number of variables the indexer hands out
    pub fn variable_count(&self) -> usize {
        self.geometry.variable_count()
    }

    /// Board geometry the indexer was built against
    pub fn geometry(&self) -> BoardGeometry {
        self.geometry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_known_ids() {
        let indexer = VariableIndexer::new(BoardGeometry::standard());

        assert_eq!(indexer.index(1, 1, 1), 1);
        assert_eq!(indexer.index(1, 1, 9), 9);
        assert_eq!(indexer.index(1, 2, 1), 10);
        assert_eq!(indexer.index(2, 1, 1), 82);
        assert_eq!(indexer.index(9, 9, 9), 729);
    }

    #[test]
    fn test_bijection_covers_all_ids_exactly_once() {
        let indexer = VariableIndexer::new(BoardGeometry::standard());
        let mut ids = HashSet::new();

        for row in 1..=9 {
            for column in 1..=9 {
                for digit in 1..=9 {
                    let id = indexer.index(row, column, digit);
                    assert!((1..=729).contains(&id));
                    assert!(
                        ids.insert(id),
                        "triple ({}, {}, {}) collides on id {}",
                        row,
                        column,
                        digit,
                        id
                    );
                }
            }
        }

        assert_eq!(ids.len(), 729);
    }

    #[test]
    fn test_decode_inverts_index() {
        let indexer = VariableIndexer::new(BoardGeometry::standard());

        for row in 1..=9 {
            for column in 1..=9 {
                for digit in 1..=9 {
                    let id = indexer.index(row, column, digit);
                    assert_eq!(indexer.decode(id), (row, column, digit));
                }
            }
        }
    }

    #[test]
    fn test_digit_literals() {
        let indexer = VariableIndexer::new(BoardGeometry::standard());
        let literals = indexer.digit_literals(1, 1);

        assert_eq!(literals.len(), 9);
        assert_eq!(literals[0], (1, 1));
        assert_eq!(literals[8], (9, 9));
    }

    #[test]
    fn test_small_geometry_bijection() {
        let indexer = VariableIndexer::new(BoardGeometry::with_box_side(2));
        let mut ids = HashSet::new();

        for row in 1..=4 {
            for column in 1..=4 {
                for digit in 1..=4 {
                    ids.insert(indexer.index(row, column, digit));
                }
            }
        }

        assert_eq!(ids.len(), 64);
        assert_eq!(indexer.variable_count(), 64);
    }

    #[test]
    #[should_panic]
    fn test_zero_row_panics() {
        let indexer = VariableIndexer::new(BoardGeometry::standard());
        indexer.index(0, 1, 1);
    }

    #[test]
    #[should_panic]
    fn test_digit_out_of_range_panics() {
        let indexer = VariableIndexer::new(BoardGeometry::standard());
        indexer.index(1, 1, 10);
    }
}
