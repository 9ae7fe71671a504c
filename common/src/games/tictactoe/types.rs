use std::fmt;

use serde::{Deserialize, Serialize};

pub const BOARD_SIZE: usize = 3;

/// Content of a single board cell.
///
/// `X` is the maximizing player and moves first, `O` is the minimizing player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    X,
    O,
}

impl Cell {
    pub fn opponent(&self) -> Option<Cell> {
        match self {
            Cell::X => Some(Cell::O),
            Cell::O => Some(Cell::X),
            Cell::Empty => None,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Cell> {
        match symbol {
            '.' | ' ' | '_' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::X),
            'O' | 'o' => Some(Cell::O),
            _ => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A cell coordinate, 0-indexed. Only meaningful relative to a specific board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub row: usize,
    pub col: usize,
}

impl Move {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Builds a move from the 1-indexed coordinates shown to players.
    pub fn from_one_indexed(row: usize, col: usize) -> Option<Self> {
        if (1..=BOARD_SIZE).contains(&row) && (1..=BOARD_SIZE).contains(&col) {
            Some(Self::new(row - 1, col - 1))
        } else {
            None
        }
    }

    pub fn is_in_bounds(&self) -> bool {
        self.row < BOARD_SIZE && self.col < BOARD_SIZE
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row + 1, self.col + 1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    XWon,
    OWon,
    Draw,
}

impl GameStatus {
    pub fn is_over(&self) -> bool {
        *self != GameStatus::InProgress
    }
}

/// Which side makes the first move in a console game. The computer always plays `X`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum FirstPlayerMode {
    #[default]
    Computer,
    Human,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WinningLine {
    pub mark: Cell,
    pub start: Move,
    pub end: Move,
}

impl WinningLine {
    pub fn new(mark: Cell, start: Move, end: Move) -> Self {
        Self { mark, start, end }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent_of_players() {
        assert_eq!(Cell::X.opponent(), Some(Cell::O));
        assert_eq!(Cell::O.opponent(), Some(Cell::X));
        assert_eq!(Cell::Empty.opponent(), None);
    }

    #[test]
    fn test_move_from_one_indexed_bounds() {
        assert_eq!(Move::from_one_indexed(1, 3), Some(Move::new(0, 2)));
        assert_eq!(Move::from_one_indexed(0, 1), None);
        assert_eq!(Move::from_one_indexed(2, 4), None);
    }

    #[test]
    fn test_move_displays_one_indexed() {
        assert_eq!(Move::new(0, 2).to_string(), "(1,3)");
    }
}
