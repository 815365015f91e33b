use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const CELL_COUNT: usize = 9;

pub const CENTER: usize = 4;
pub const CORNERS: [usize; 4] = [0, 2, 6, 8];
pub const SIDES: [usize; 4] = [1, 3, 5, 7];

/// Every winning configuration: rows, then columns, then diagonals.
pub const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    pub fn opponent(&self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Mark::X => 'X',
            Mark::O => 'O',
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for Mark {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "x" | "X" => Ok(Mark::X),
            "o" | "O" => Ok(Mark::O),
            other => Err(format!("Unknown mark '{}', expected X or O", other)),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Occupied(Mark),
}

impl Cell {
    pub fn mark(&self) -> Option<Mark> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(mark) => Some(*mark),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

/// 3x3 board, row-major: 0..=2 top row, 3..=5 middle, 6..=8 bottom.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: [Cell; CELL_COUNT],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses nine symbols: `X`, `O`, and `_`, `.` or `-` for an empty cell.
    /// Whitespace and `|` separators are ignored.
    pub fn parse(layout: &str) -> Result<Self, String> {
        let mut cells = [Cell::Empty; CELL_COUNT];
        let mut count = 0;

        for ch in layout.chars().filter(|c| !c.is_whitespace() && *c != '|') {
            if count == CELL_COUNT {
                return Err(format!("Board layout '{}' has more than 9 cells", layout));
            }
            cells[count] = match ch {
                'X' | 'x' => Cell::Occupied(Mark::X),
                'O' | 'o' => Cell::Occupied(Mark::O),
                '_' | '.' | '-' => Cell::Empty,
                other => return Err(format!("Unexpected symbol '{}' in board layout", other)),
            };
            count += 1;
        }

        if count != CELL_COUNT {
            return Err(format!("Board layout '{}' has {} cells, expected 9", layout, count));
        }
        Ok(Self { cells })
    }

    pub fn mark_at(&self, index: usize) -> Option<Mark> {
        self.cells[index].mark()
    }

    pub fn is_empty_cell(&self, index: usize) -> bool {
        index < CELL_COUNT && self.cells[index].is_empty()
    }

    pub fn set(&mut self, index: usize, mark: Mark) {
        self.cells[index] = Cell::Occupied(mark);
    }

    pub(crate) fn clear(&mut self, index: usize) {
        self.cells[index] = Cell::Empty;
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_empty())
    }

    pub fn count(&self, mark: Mark) -> usize {
        self.cells.iter().filter(|cell| cell.mark() == Some(mark)).count()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..3 {
            for col in 0..3 {
                let index = row * 3 + col;
                match self.cells[index] {
                    Cell::Empty => write!(f, "{}", index + 1)?,
                    Cell::Occupied(mark) => write!(f, "{}", mark)?,
                }
                if col < 2 {
                    write!(f, "|")?;
                }
            }
            if row < 2 {
                write!(f, "\n-+-+-\n")?;
            }
        }
        Ok(())
    }
}

/// Always derived from a board, never stored next to it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Win(Mark),
    Draw,
    InProgress,
}

impl Outcome {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::InProgress)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Difficulty::ALL
            .into_iter()
            .find(|difficulty| difficulty.label() == lower)
            .ok_or_else(|| format!("Unknown difficulty '{}', expected easy, medium or hard", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reads_row_major() {
        let board = Board::parse("XX_ _O_ ___").unwrap();
        assert_eq!(board.mark_at(0), Some(Mark::X));
        assert_eq!(board.mark_at(1), Some(Mark::X));
        assert_eq!(board.mark_at(4), Some(Mark::O));
        assert!(board.is_empty_cell(2));
        assert_eq!(board.count(Mark::X), 2);
        assert_eq!(board.count(Mark::O), 1);
    }

    #[test]
    fn test_parse_rejects_bad_layouts() {
        assert!(Board::parse("XX").is_err());
        assert!(Board::parse("XXXXXXXXXX").is_err());
        assert!(Board::parse("XX_?O____").is_err());
    }

    #[test]
    fn test_display_numbers_empty_cells() {
        let board = Board::parse("X________").unwrap();
        assert_eq!(board.to_string(), "X|2|3\n-+-+-\n4|5|6\n-+-+-\n7|8|9");
    }

    #[test]
    fn test_is_empty_cell_out_of_range() {
        assert!(!Board::new().is_empty_cell(9));
    }

    #[test]
    fn test_difficulty_from_str() {
        assert_eq!("Hard".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert_eq!(" easy ".parse::<Difficulty>(), Ok(Difficulty::Easy));
        assert!("impossible".parse::<Difficulty>().is_err());
    }

    #[test]
    fn test_mark_opponent() {
        assert_eq!(Mark::X.opponent(), Mark::O);
        assert_eq!(Mark::O.opponent(), Mark::X);
        assert_eq!("o".parse::<Mark>(), Ok(Mark::O));
    }
}
