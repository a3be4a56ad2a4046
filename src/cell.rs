use crossterm::style::Color;

/// A single cell of the board.
///
/// A cell is either empty or holds exactly one occupant of one of the two
/// types. The display characters are `$` for type A, `.` for type B and a
/// space for an empty cell.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Cell {
    Empty,
    TypeA,
    TypeB,
}

impl Cell {
    pub fn from_char(value: char) -> Cell {
        match value {
            ' ' => Cell::Empty,
            '$' => Cell::TypeA,
            '.' => Cell::TypeB,
            _ => panic!("Invalid character value: {}", value),
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => ' ',
            Cell::TypeA => '$',
            Cell::TypeB => '.',
        }
    }

    /// The color used when drawing the cell to the console.
    pub fn color(self) -> Color {
        match self {
            Cell::Empty => Color::Reset,
            Cell::TypeA => Color::Yellow,
            Cell::TypeB => Color::Cyan,
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}
