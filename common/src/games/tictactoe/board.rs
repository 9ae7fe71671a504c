use std::fmt;

use super::error::{InvalidMoveReason, TicTacToeError};
use super::types::{Cell, Move, BOARD_SIZE};
use super::win_detector::check_win;

/// A 3×3 grid value. Moves never mutate a board in place; `apply_move`
/// hands back a fresh copy so sibling search branches never share state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cells(cells: [[Cell; BOARD_SIZE]; BOARD_SIZE]) -> Self {
        Self { cells }
    }

    /// Parses the compact notation `"XX./OO./..."`: three rows of three symbols
    /// (`X`, `O`, `.`), separated by `/` or whitespace.
    pub fn from_rows(notation: &str) -> Result<Self, String> {
        let rows: Vec<&str> = notation
            .split(|c: char| c == '/' || c.is_whitespace())
            .filter(|row| !row.is_empty())
            .collect();

        if rows.len() != BOARD_SIZE {
            return Err(format!("Expected {} rows, found {}", BOARD_SIZE, rows.len()));
        }

        let mut cells = [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE];
        for (row, text) in rows.iter().enumerate() {
            let symbols: Vec<char> = text.chars().collect();
            if symbols.len() != BOARD_SIZE {
                return Err(format!(
                    "Row {} must have {} cells, found {}",
                    row + 1,
                    BOARD_SIZE,
                    symbols.len()
                ));
            }
            for (col, &symbol) in symbols.iter().enumerate() {
                cells[row][col] = Cell::from_symbol(symbol)
                    .ok_or_else(|| format!("Unknown cell symbol '{}' in row {}", symbol, row + 1))?;
            }
        }

        Ok(Self { cells })
    }

    pub fn cells(&self) -> &[[Cell; BOARD_SIZE]; BOARD_SIZE] {
        &self.cells
    }

    pub fn get(&self, mv: Move) -> Option<Cell> {
        if !mv.is_in_bounds() {
            return None;
        }
        Some(self.cells[mv.row][mv.col])
    }

    pub fn is_full(&self) -> bool {
        self.cells
            .iter()
            .all(|row| row.iter().all(|&cell| cell != Cell::Empty))
    }

    pub fn count(&self, mark: Cell) -> usize {
        self.cells
            .iter()
            .flat_map(|row| row.iter())
            .filter(|&&cell| cell == mark)
            .count()
    }

    /// Copy of this board with `mark` placed at `mv`. Callers guarantee the cell is empty.
    pub(crate) fn with_mark(&self, mv: Move, mark: Cell) -> Board {
        debug_assert_eq!(self.cells[mv.row][mv.col], Cell::Empty);
        let mut next = *self;
        next.cells[mv.row][mv.col] = mark;
        next
    }

    /// Compact notation accepted by [`Board::from_rows`].
    pub fn to_rows(&self) -> String {
        self.cells
            .iter()
            .map(|row| row.iter().map(Cell::symbol).collect::<String>())
            .collect::<Vec<_>>()
            .join("/")
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  1   2   3")?;
        for (row, cells) in self.cells.iter().enumerate() {
            let line = cells
                .iter()
                .map(|cell| cell.symbol().to_string())
                .collect::<Vec<_>>()
                .join(" | ");
            writeln!(f, "{} {}", row + 1, line)?;
            if row + 1 < BOARD_SIZE {
                writeln!(f, "  ---------")?;
            }
        }
        Ok(())
    }
}

/// Empty cells in row-major order. The search breaks ties by this order.
pub fn legal_moves(board: &Board) -> Vec<Move> {
    let mut moves = Vec::with_capacity(BOARD_SIZE * BOARD_SIZE);
    for (row, cells) in board.cells.iter().enumerate() {
        for (col, &cell) in cells.iter().enumerate() {
            if cell == Cell::Empty {
                moves.push(Move::new(row, col));
            }
        }
    }
    moves
}

pub fn is_valid_move(board: &Board, mv: Move) -> bool {
    board.get(mv) == Some(Cell::Empty)
}

pub fn apply_move(board: &Board, mv: Move, player: Cell) -> Result<Board, TicTacToeError> {
    if player == Cell::Empty {
        return Err(TicTacToeError::InvalidMove { mv, reason: InvalidMoveReason::EmptyMark });
    }

    match board.get(mv) {
        None => Err(TicTacToeError::InvalidMove { mv, reason: InvalidMoveReason::OutOfBounds }),
        Some(Cell::Empty) => Ok(board.with_mark(mv, player)),
        Some(_) => Err(TicTacToeError::InvalidMove { mv, reason: InvalidMoveReason::Occupied }),
    }
}

/// X moves first, so X is to move whenever both sides have placed the same number of marks.
pub fn side_to_move(board: &Board) -> Cell {
    if board.count(Cell::X) <= board.count(Cell::O) {
        Cell::X
    } else {
        Cell::O
    }
}

pub fn winner(board: &Board) -> Cell {
    check_win(board).unwrap_or(Cell::Empty)
}

pub fn is_terminal(board: &Board) -> bool {
    winner(board) != Cell::Empty || board.is_full()
}

/// +1 when X has a line, -1 when O has one, 0 otherwise.
/// Only meaningful once [`is_terminal`] holds.
pub fn utility(board: &Board) -> i32 {
    match winner(board) {
        Cell::X => 1,
        Cell::O => -1,
        Cell::Empty => 0,
    }
}
