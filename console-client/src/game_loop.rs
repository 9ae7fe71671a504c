use std::io::{self, BufRead, Write};

use common::games::tictactoe::{
    is_valid_move, AlphaBetaSearch, Board, Cell, FirstPlayerMode, GameStatus, Move, TicTacToeError,
    TicTacToeGameState,
};
use common::{log, log_debug};

pub const COMPUTER_MARK: Cell = Cell::X;
pub const HUMAN_MARK: Cell = Cell::O;

#[derive(Debug, Clone)]
pub struct GameSettings {
    pub first_player: FirstPlayerMode,
    pub show_search_stats: bool,
    /// Custom starting position; the side to move is inferred from the mark counts
    /// and `first_player` is ignored.
    pub start_position: Option<Board>,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            first_player: FirstPlayerMode::Computer,
            show_search_stats: false,
            start_position: None,
        }
    }
}

#[derive(Debug)]
pub enum GameLoopError {
    Io(io::Error),
    InputClosed,
    Engine(TicTacToeError),
}

impl std::fmt::Display for GameLoopError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameLoopError::Io(e) => write!(f, "IO error: {}", e),
            GameLoopError::InputClosed => write!(f, "Input closed before the game finished"),
            GameLoopError::Engine(e) => write!(f, "Engine error: {}", e),
        }
    }
}

impl std::error::Error for GameLoopError {}

impl From<io::Error> for GameLoopError {
    fn from(e: io::Error) -> Self {
        GameLoopError::Io(e)
    }
}

impl From<TicTacToeError> for GameLoopError {
    fn from(e: TicTacToeError) -> Self {
        GameLoopError::Engine(e)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveInputError {
    Malformed(String),
    OutOfRange { row: i64, col: i64 },
}

/// Parses `"row col"` with both values 1-indexed in `1..=3`.
pub fn parse_move_input(line: &str) -> Result<Move, MoveInputError> {
    let mut parts = line.split_whitespace();
    let (Some(row), Some(col)) = (parts.next(), parts.next()) else {
        return Err(MoveInputError::Malformed(line.trim().to_string()));
    };

    let row: i64 = row
        .parse()
        .map_err(|_| MoveInputError::Malformed(line.trim().to_string()))?;
    let col: i64 = col
        .parse()
        .map_err(|_| MoveInputError::Malformed(line.trim().to_string()))?;

    let to_index = |value: i64| usize::try_from(value).ok();
    to_index(row)
        .zip(to_index(col))
        .and_then(|(r, c)| Move::from_one_indexed(r, c))
        .ok_or(MoveInputError::OutOfRange { row, col })
}

fn initial_state(settings: &GameSettings) -> Result<TicTacToeGameState, TicTacToeError> {
    if let Some(board) = settings.start_position {
        return TicTacToeGameState::from_board(board);
    }
    let first_mark = match settings.first_player {
        FirstPlayerMode::Computer => COMPUTER_MARK,
        FirstPlayerMode::Human => HUMAN_MARK,
    };
    Ok(TicTacToeGameState::with_first_mark(first_mark))
}

/// Plays one game to completion, reading the human's moves from `input` and
/// writing everything shown to the player to `output`.
pub fn run_game<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    settings: &GameSettings,
) -> Result<GameStatus, GameLoopError> {
    let mut state = initial_state(settings)?;
    let mut search = AlphaBetaSearch::new();

    writeln!(output, "Tic-Tac-Toe: minimax with alpha-beta pruning")?;

    loop {
        writeln!(output)?;
        write!(output, "{}", state.board)?;
        writeln!(output)?;

        if state.status.is_over() {
            announce_outcome(output, &state)?;
            log!("Game finished: {:?} on {}", state.status, state.board.to_rows());
            return Ok(state.status);
        }

        if state.current_mark == COMPUTER_MARK {
            let result = search.search(&state.board)?;
            state.place_mark(COMPUTER_MARK, result.best_move)?;
            writeln!(output, "Computer plays {} at {}", COMPUTER_MARK, result.best_move)?;
            if settings.show_search_stats {
                writeln!(
                    output,
                    "  searched {} positions, guaranteed outcome {}",
                    result.nodes,
                    describe_value(result.value)
                )?;
            }
        } else {
            let mv = read_human_move(input, output, &mut state)?;
            log_debug!("Human played {}", mv);
        }
    }
}

fn read_human_move<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    state: &mut TicTacToeGameState,
) -> Result<Move, GameLoopError> {
    writeln!(output, "You are {}. Enter: row column (1..3 1..3):", HUMAN_MARK)?;
    output.flush()?;

    let mut line = String::new();
    loop {
        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Err(GameLoopError::InputClosed);
        }

        let mv = match parse_move_input(&line) {
            Ok(mv) => mv,
            Err(MoveInputError::Malformed(text)) => {
                log_debug!("Could not parse move input '{}'", text);
                writeln!(output, "Please enter two numbers 1..3:")?;
                output.flush()?;
                continue;
            }
            Err(MoveInputError::OutOfRange { row, col }) => {
                log_debug!("Move input {} {} is off the board", row, col);
                writeln!(output, "Invalid move, try again:")?;
                output.flush()?;
                continue;
            }
        };

        if !is_valid_move(&state.board, mv) {
            log_debug!("Cell {} is already marked", mv);
            writeln!(output, "Invalid move, try again:")?;
            output.flush()?;
            continue;
        }

        match state.place_mark(HUMAN_MARK, mv) {
            Ok(()) => return Ok(mv),
            Err(e) if e.is_invalid_move() => {
                log_debug!("{}", e);
                writeln!(output, "Invalid move, try again:")?;
                output.flush()?;
            }
            Err(e) => return Err(e.into()),
        }
    }
}

fn announce_outcome<W: Write>(output: &mut W, state: &TicTacToeGameState) -> io::Result<()> {
    let line = state
        .winning_line()
        .map(|line| format!(" {} to {}", line.start, line.end))
        .unwrap_or_default();

    match state.utility() {
        1 => writeln!(output, ">> {} (computer) wins{}.", COMPUTER_MARK, line),
        -1 => writeln!(output, ">> {} (you) win{}.", HUMAN_MARK, line),
        _ => writeln!(output, ">> Draw."),
    }
}

fn describe_value(value: i32) -> &'static str {
    match value {
        1 => "win",
        -1 => "loss",
        _ => "draw",
    }
}
