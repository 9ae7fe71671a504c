use super::types::Move;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidMoveReason {
    OutOfBounds,
    Occupied,
    EmptyMark,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TicTacToeError {
    InvalidMove { mv: Move, reason: InvalidMoveReason },
    InvalidState(String),
}

impl TicTacToeError {
    pub fn is_invalid_move(&self) -> bool {
        matches!(self, TicTacToeError::InvalidMove { .. })
    }
}

impl std::fmt::Display for TicTacToeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TicTacToeError::InvalidMove { mv, reason } => match reason {
                InvalidMoveReason::OutOfBounds => {
                    write!(f, "Invalid move: cell {} is off the board", mv)
                }
                InvalidMoveReason::Occupied => {
                    write!(f, "Invalid move: cell {} is already marked", mv)
                }
                InvalidMoveReason::EmptyMark => {
                    write!(f, "Invalid move: cannot place an empty mark at {}", mv)
                }
            },
            TicTacToeError::InvalidState(message) => write!(f, "Invalid state: {}", message),
        }
    }
}

impl std::error::Error for TicTacToeError {}
