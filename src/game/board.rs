//! Tic-Tac-Toe Board

use std::fmt;

/// Player symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
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

    pub fn as_str(&self) -> &'static str {
        match self {
            Mark::X => "X",
            Mark::O => "O",
        }
    }

    /// Parse a classifier label into a symbol.
    pub fn from_label(label: &str) -> Option<Mark> {
        match label {
            "X" => Some(Mark::X),
            "O" => Some(Mark::O),
            _ => None,
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Row, column, and diagonal index triples (0-based)
const WIN_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// Nine-cell board addressed 1-9, row-major.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    cells: [Option<Mark>; 9],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `cell` (1-9) is on the board and unoccupied.
    pub fn is_free(&self, cell: usize) -> bool {
        (1..=9).contains(&cell) && self.cells[cell - 1].is_none()
    }

    /// Place `mark` on `cell` (1-9). Returns false when the cell is out of
    /// range or already taken.
    pub fn place(&mut self, cell: usize, mark: Mark) -> bool {
        if !self.is_free(cell) {
            return false;
        }
        self.cells[cell - 1] = Some(mark);
        true
    }

    /// The winning mark, if any line is complete.
    pub fn winner(&self) -> Option<Mark> {
        for line in &WIN_LINES {
            if let Some(mark) = self.cells[line[0]] {
                if self.cells[line[1]] == Some(mark) && self.cells[line[2]] == Some(mark) {
                    return Some(mark);
                }
            }
        }
        None
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| c.is_some())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in 0..3 {
            let cell = |col: usize| {
                self.cells[row * 3 + col]
                    .map(|m| m.as_str())
                    .unwrap_or(" ")
            };
            writeln!(f, " {} | {} | {} ", cell(0), cell(1), cell(2))?;
            if row < 2 {
                writeln!(f, "---+---+---")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_and_occupancy() {
        let mut board = Board::new();
        assert!(board.is_free(5));
        assert!(board.place(5, Mark::X));
        assert!(!board.is_free(5));
        assert!(!board.place(5, Mark::O));
    }

    #[test]
    fn test_out_of_range_cells() {
        let mut board = Board::new();
        assert!(!board.is_free(0));
        assert!(!board.is_free(10));
        assert!(!board.place(0, Mark::X));
        assert!(!board.place(10, Mark::X));
    }

    #[test]
    fn test_row_win() {
        let mut board = Board::new();
        for cell in [4, 5, 6] {
            board.place(cell, Mark::O);
        }
        assert_eq!(board.winner(), Some(Mark::O));
    }

    #[test]
    fn test_column_win() {
        let mut board = Board::new();
        for cell in [2, 5, 8] {
            board.place(cell, Mark::X);
        }
        assert_eq!(board.winner(), Some(Mark::X));
    }

    #[test]
    fn test_diagonal_win() {
        let mut board = Board::new();
        for cell in [3, 5, 7] {
            board.place(cell, Mark::X);
        }
        assert_eq!(board.winner(), Some(Mark::X));
    }

    #[test]
    fn test_no_winner_on_mixed_line() {
        let mut board = Board::new();
        board.place(1, Mark::X);
        board.place(2, Mark::O);
        board.place(3, Mark::X);
        assert_eq!(board.winner(), None);
    }

    #[test]
    fn test_draw_detection() {
        // X O X / X O O / O X X : full board, no line
        let mut board = Board::new();
        let layout = [
            (1, Mark::X),
            (2, Mark::O),
            (3, Mark::X),
            (4, Mark::X),
            (5, Mark::O),
            (6, Mark::O),
            (7, Mark::O),
            (8, Mark::X),
            (9, Mark::X),
        ];
        for (cell, mark) in layout {
            assert!(board.place(cell, mark));
        }
        assert!(board.is_full());
        assert_eq!(board.winner(), None);
    }

    #[test]
    fn test_display_layout() {
        let mut board = Board::new();
        board.place(1, Mark::X);
        board.place(5, Mark::O);
        let rendered = board.to_string();
        assert!(rendered.starts_with(" X |   |   "));
        assert!(rendered.contains("---+---+---"));
        assert!(rendered.contains(" | O | "));
    }

    #[test]
    fn test_mark_labels() {
        assert_eq!(Mark::from_label("X"), Some(Mark::X));
        assert_eq!(Mark::from_label("O"), Some(Mark::O));
        assert_eq!(Mark::from_label("7"), None);
        assert_eq!(Mark::X.opponent(), Mark::O);
    }
}
