use super::board::{apply_move, is_terminal, legal_moves, side_to_move, utility, Board};
use super::error::TicTacToeError;
use super::types::{Cell, GameStatus, Move, WinningLine};
use super::win_detector::{check_win, check_win_with_line};

/// One game in progress. Owns the turn order so the board itself stays a plain value.
#[derive(Debug, Clone)]
pub struct TicTacToeGameState {
    pub board: Board,
    pub current_mark: Cell,
    pub status: GameStatus,
    pub last_move: Option<Move>,
}

impl Default for TicTacToeGameState {
    fn default() -> Self {
        Self::new()
    }
}

impl TicTacToeGameState {
    pub fn new() -> Self {
        Self::with_first_mark(Cell::X)
    }

    pub fn with_first_mark(first_mark: Cell) -> Self {
        Self {
            board: Board::new(),
            current_mark: first_mark,
            status: GameStatus::InProgress,
            last_move: None,
        }
    }

    /// Resumes from an arbitrary position. The side to move is inferred from the mark counts.
    pub fn from_board(board: Board) -> Result<Self, TicTacToeError> {
        let x_count = board.count(Cell::X);
        let o_count = board.count(Cell::O);
        if x_count.abs_diff(o_count) > 1 {
            return Err(TicTacToeError::InvalidState(format!(
                "board {} has {} X and {} O marks",
                board.to_rows(),
                x_count,
                o_count
            )));
        }

        let mut state = Self {
            board,
            current_mark: side_to_move(&board),
            status: GameStatus::InProgress,
            last_move: None,
        };
        state.check_game_over();
        Ok(state)
    }

    pub fn place_mark(&mut self, mark: Cell, mv: Move) -> Result<(), TicTacToeError> {
        if self.status.is_over() {
            return Err(TicTacToeError::InvalidState("game is already over".to_string()));
        }

        if mark != self.current_mark {
            return Err(TicTacToeError::InvalidState(format!(
                "it is {}'s turn, not {}'s",
                self.current_mark, mark
            )));
        }

        self.board = apply_move(&self.board, mv, mark)?;
        self.last_move = Some(mv);

        self.check_game_over();

        if self.status == GameStatus::InProgress {
            self.switch_turn();
        }

        Ok(())
    }

    pub fn available_moves(&self) -> Vec<Move> {
        if self.status.is_over() {
            return Vec::new();
        }
        legal_moves(&self.board)
    }

    pub fn winning_line(&self) -> Option<WinningLine> {
        check_win_with_line(&self.board)
    }

    pub fn utility(&self) -> i32 {
        utility(&self.board)
    }

    /// Final status once the game is over, `None` while it is still running.
    pub fn outcome(&self) -> Option<GameStatus> {
        self.status.is_over().then_some(self.status)
    }

    fn switch_turn(&mut self) {
        if let Some(next) = self.current_mark.opponent() {
            self.current_mark = next;
        }
    }

    fn check_game_over(&mut self) {
        if !is_terminal(&self.board) {
            return;
        }

        self.status = match check_win(&self.board) {
            Some(Cell::X) => GameStatus::XWon,
            Some(Cell::O) => GameStatus::OWon,
            _ => GameStatus::Draw,
        };
    }
}
