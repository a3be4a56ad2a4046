use crate::cell::Cell;

/// The simulation board: a fixed-size rectangular grid of cells stored in
/// row-major order. Dimensions are fixed at construction; relocation mutates
/// the grid in place and never grows or shrinks it.
#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Board {
    pub fn new(width: usize, height: usize) -> Board {
        Board {
            width,
            height,
            cells: vec![Cell::Empty; width * height],
        }
    }

    /// Parses a board from a string picture, one line per row.
    ///
    /// `$` is a type A occupant, `.` a type B occupant and a space an empty
    /// cell. The width is the longest line; shorter lines are padded with
    /// empty cells.
    pub fn parse(contents: &str) -> Board {
        let lines: Vec<&str> = contents.lines().collect();
        let height = lines.len();
        let width = lines
            .iter()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0);

        let mut board = Board::new(width, height);
        for (row, line) in lines.iter().enumerate() {
            for (col, value) in line.chars().enumerate() {
                board.set(row, col, Cell::from_char(value));
            }
        }

        board
    }

    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row * self.width + col]
    }

    pub fn set(&mut self, row: usize, col: usize, value: Cell) {
        self.cells[row * self.width + col] = value;
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Converts a flattened index back to a `(row, col)` coordinate.
    pub fn coords(&self, index: usize) -> (usize, usize) {
        (index / self.width, index % self.width)
    }

    pub fn count(&self, value: Cell) -> usize {
        self.cells.iter().filter(|cell| **cell == value).count()
    }

    /// Whether the occupant at `(row, col)` is satisfied with its
    /// neighborhood.
    ///
    /// An occupant is happy when the fraction of its non-empty Moore
    /// neighbors that share its type is at least `threshold`. Empty cells are
    /// vacuously happy, and so is an occupant with no non-empty neighbors at
    /// all. Positions outside the board around edges and corners are skipped,
    /// not counted as empty or different.
    pub fn is_happy(&self, row: usize, col: usize, threshold: f64) -> bool {
        let cell = self.get(row, col);
        if cell.is_empty() {
            return true;
        }

        let mut same = 0;
        let mut different = 0;

        // For each coordinate around the given one in all 8 directions
        for i in -1..=1 {
            for j in -1..=1 {
                if i == 0 && j == 0 {
                    continue;
                }

                let n_row = row as i32 + i;
                let n_col = col as i32 + j;

                // Skip if the coordinate is out of bounds
                if n_row < 0
                    || n_row >= self.height as i32
                    || n_col < 0
                    || n_col >= self.width as i32
                {
                    continue;
                }

                let neighbor = self.get(n_row as usize, n_col as usize);
                if neighbor.is_empty() {
                    continue;
                }

                if neighbor == cell {
                    same += 1;
                } else {
                    different += 1;
                }
            }
        }

        // An occupant with no non-empty neighbors is vacuously satisfied
        if same + different == 0 {
            return true;
        }

        same as f64 / (same + different) as f64 >= threshold
    }

    /// Returns the flattened indices of all unhappy occupants in row-major
    /// scan order.
    ///
    /// The order is load-bearing: it is the order in which the round driver
    /// relocates occupants within a round. Empty cells are never included.
    pub fn unhappy_indices(&self, threshold: f64) -> Vec<usize> {
        let mut unhappy = Vec::new();

        for row in 0..self.height {
            for col in 0..self.width {
                if !self.is_happy(row, col, threshold) {
                    unhappy.push(row * self.width + col);
                }
            }
        }

        unhappy
    }

    /// Moves the occupant at `index` to the nearest empty cell, scanning
    /// forward in flattened order from the cell just after it and wrapping
    /// around past the end of the board, stopping before reaching its own
    /// position again.
    ///
    /// Returns the destination index, or `None` when the board has no empty
    /// cell, in which case the board is left untouched.
    pub fn relocate(&mut self, index: usize) -> Option<usize> {
        let total = self.width * self.height;

        let mut candidate = (index + 1) % total;
        while candidate != index {
            if self.cells[candidate].is_empty() {
                self.cells[candidate] = self.cells[index];
                self.cells[index] = Cell::Empty;
                return Some(candidate);
            }
            candidate = (candidate + 1) % total;
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn when_parsing_a_board_it_is_created_with_the_correct_width_and_height() {
        let board = Board::parse("$ .\n. $");

        assert_eq!(board.width(), 3);
        assert_eq!(board.height(), 2);
        assert_eq!(board.get(0, 0), Cell::TypeA);
        assert_eq!(board.get(0, 1), Cell::Empty);
        assert_eq!(board.get(0, 2), Cell::TypeB);
        assert_eq!(board.get(1, 0), Cell::TypeB);
        assert_eq!(board.get(1, 2), Cell::TypeA);
    }

    #[test]
    fn when_a_cell_is_empty_it_is_always_happy() {
        let board = Board::parse("$.\n  ");

        assert!(board.is_happy(1, 0, 1.0));
        assert!(board.is_happy(1, 1, 1.0));
    }

    #[test]
    fn when_an_occupant_has_no_neighbors_it_is_happy_at_any_threshold() {
        let board = Board::parse("   \n $ \n   ");

        assert!(board.is_happy(1, 1, 1.0));
        // No range check on the threshold, so even an unsatisfiable one is
        // vacuously met
        assert!(board.is_happy(1, 1, 5.0));
    }

    #[test]
    fn when_the_same_fraction_equals_the_threshold_the_occupant_is_happy() {
        // The center has exactly 2 same and 2 different neighbors
        let board = Board::parse("$$ \n $ \n.. ");

        assert!(board.is_happy(1, 1, 0.5));
        assert!(!board.is_happy(1, 1, 0.51));
    }

    #[test]
    fn when_neighbors_are_outside_the_board_they_are_skipped() {
        // The corner occupant only has 3 in-bounds neighbors, one of them
        // occupied by the same type
        let board = Board::parse("$$\n  ");

        assert!(board.is_happy(0, 0, 1.0));
        assert!(board.is_happy(0, 1, 1.0));
    }

    #[test]
    fn when_scanning_for_unhappy_occupants_they_are_returned_in_row_major_order() {
        // At a threshold of 1.0 every occupant has a different-type neighbor
        let board = Board::parse("$.\n.$");

        assert_eq!(board.unhappy_indices(1.0), vec![0, 1, 2, 3]);
    }

    #[test]
    fn when_every_occupant_is_happy_the_scan_is_empty() {
        let board = Board::parse("$$\n$$");

        assert!(board.unhappy_indices(1.0).is_empty());
    }

    #[test]
    fn when_relocating_the_nearest_forward_empty_cell_is_taken() {
        let mut board = Board::parse("$.  ");

        // Index 1 is occupied so the occupant lands on index 2
        assert_eq!(board.relocate(0), Some(2));
        assert_eq!(board.get(0, 0), Cell::Empty);
        assert_eq!(board.get(0, 2), Cell::TypeA);
    }

    #[test]
    fn when_no_empty_cell_is_ahead_the_search_wraps_around_to_the_beginning() {
        let mut board = Board::parse(" ..$");

        assert_eq!(board.relocate(3), Some(0));
        assert_eq!(board.get(0, 0), Cell::TypeA);
        assert_eq!(board.get(0, 3), Cell::Empty);
    }

    #[test]
    fn when_the_board_is_full_relocation_is_a_no_op() {
        let mut board = Board::parse("$.\n.$");
        let before = board.clone();

        assert_eq!(board.relocate(0), None);
        assert_eq!(board, before);
    }

    #[test]
    fn when_relocating_the_occupant_counts_are_conserved() {
        let mut board = Board::parse("$.$ \n.$. ");

        board.relocate(0);
        board.relocate(5);

        assert_eq!(board.count(Cell::TypeA), 3);
        assert_eq!(board.count(Cell::TypeB), 3);
        assert_eq!(board.count(Cell::Empty), 2);
    }

    #[test]
    fn when_converting_a_flattened_index_the_row_and_col_are_correct() {
        let board = Board::new(4, 3);

        assert_eq!(board.coords(0), (0, 0));
        assert_eq!(board.coords(5), (1, 1));
        assert_eq!(board.coords(11), (2, 3));
    }
}
