mod board;
mod bot_controller;
mod error;
mod game_state;
mod types;
mod win_detector;

pub use board::{
    apply_move, is_terminal, is_valid_move, legal_moves, side_to_move, utility, winner, Board,
};
pub use bot_controller::{
    best_move, minimax_value, AlphaBetaSearch, SearchResult, NEG_INFINITY, POS_INFINITY,
};
pub use error::{InvalidMoveReason, TicTacToeError};
pub use game_state::TicTacToeGameState;
pub use types::{Cell, FirstPlayerMode, GameStatus, Move, WinningLine, BOARD_SIZE};
pub use win_detector::{check_win, check_win_with_line};
