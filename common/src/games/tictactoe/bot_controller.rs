use crate::log_debug;
use super::board::{is_terminal, legal_moves, utility, Board};
use super::error::TicTacToeError;
use super::types::{Cell, Move};

/// Stand-ins for -∞ and +∞; every utility lies strictly between them.
pub const NEG_INFINITY: i32 = i32::MIN;
pub const POS_INFINITY: i32 = i32::MAX;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub best_move: Move,
    /// Utility X is guaranteed to reach by playing `best_move`.
    pub value: i32,
    /// Number of max/min nodes visited below the root.
    pub nodes: u64,
}

/// Full-depth minimax for X with alpha-beta cutoffs.
///
/// Children are visited in [`legal_moves`] order, and the first move reaching the
/// best value is kept, so ties go to the earliest cell in row-major order.
#[derive(Debug, Clone)]
pub struct AlphaBetaSearch {
    pruning: bool,
    nodes: u64,
}

impl Default for AlphaBetaSearch {
    fn default() -> Self {
        Self::new()
    }
}

impl AlphaBetaSearch {
    pub fn new() -> Self {
        Self { pruning: true, nodes: 0 }
    }

    /// Same recursion with cutoffs disabled: every subtree is explored and the
    /// alpha/beta bounds never move.
    pub fn without_pruning() -> Self {
        Self { pruning: false, nodes: 0 }
    }

    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Picks X's move. The root deliberately never cuts off on beta: nothing above
    /// it bounds the result, so only alpha is raised between root children.
    pub fn search(&mut self, board: &Board) -> Result<SearchResult, TicTacToeError> {
        if is_terminal(board) {
            return Err(TicTacToeError::InvalidState(format!(
                "no legal moves to search on finished board {}",
                board.to_rows()
            )));
        }

        self.nodes = 0;
        let mut alpha = NEG_INFINITY;
        let beta = POS_INFINITY;
        let mut best_value = NEG_INFINITY;
        let mut best_move = None;

        for mv in legal_moves(board) {
            let child = board.with_mark(mv, Cell::X);
            let value = self.min_value(&child, alpha, beta);
            if value > best_value {
                best_value = value;
                best_move = Some(mv);
            }
            if self.pruning {
                alpha = alpha.max(best_value);
            }
        }

        let best_move = best_move.ok_or_else(|| {
            TicTacToeError::InvalidState("search finished without a candidate move".to_string())
        })?;

        log_debug!(
            "Search picked {} on {} with value {} after {} nodes",
            best_move,
            board.to_rows(),
            best_value,
            self.nodes
        );

        Ok(SearchResult {
            best_move,
            value: best_value,
            nodes: self.nodes,
        })
    }

    pub fn max_value(&mut self, board: &Board, mut alpha: i32, beta: i32) -> i32 {
        self.nodes += 1;
        if is_terminal(board) {
            return utility(board);
        }

        let mut value = NEG_INFINITY;
        for mv in legal_moves(board) {
            let child = board.with_mark(mv, Cell::X);
            value = value.max(self.min_value(&child, alpha, beta));
            if !self.pruning {
                continue;
            }
            if value >= beta {
                return value;
            }
            alpha = alpha.max(value);
        }
        value
    }

    pub fn min_value(&mut self, board: &Board, alpha: i32, mut beta: i32) -> i32 {
        self.nodes += 1;
        if is_terminal(board) {
            return utility(board);
        }

        let mut value = POS_INFINITY;
        for mv in legal_moves(board) {
            let child = board.with_mark(mv, Cell::O);
            value = value.min(self.max_value(&child, alpha, beta));
            if !self.pruning {
                continue;
            }
            if value <= alpha {
                return value;
            }
            beta = beta.min(value);
        }
        value
    }

    /// Game value of `board` with `to_move` about to play, searched with an open window.
    pub fn evaluate(&mut self, board: &Board, to_move: Cell) -> i32 {
        match to_move {
            Cell::O => self.min_value(board, NEG_INFINITY, POS_INFINITY),
            _ => self.max_value(board, NEG_INFINITY, POS_INFINITY),
        }
    }
}

/// The computer's entry point: the optimal move for X on a board where X is to move.
pub fn best_move(board: &Board) -> Result<Move, TicTacToeError> {
    AlphaBetaSearch::new()
        .search(board)
        .map(|result| result.best_move)
}

/// Exact game value of `board` by plain minimax, with no pruning.
pub fn minimax_value(board: &Board, to_move: Cell) -> i32 {
    AlphaBetaSearch::without_pruning().evaluate(board, to_move)
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::board::{apply_move, side_to_move};
    use std::collections::HashSet;

    fn board(rows: &str) -> Board {
        Board::from_rows(rows).unwrap()
    }

    fn reachable_boards() -> Vec<Board> {
        let mut seen = HashSet::new();
        let mut stack = vec![Board::new()];
        let mut boards = Vec::new();

        while let Some(current) = stack.pop() {
            if !seen.insert(current) {
                continue;
            }
            boards.push(current);
            if is_terminal(&current) {
                continue;
            }
            let mark = side_to_move(&current);
            for mv in legal_moves(&current) {
                stack.push(apply_move(&current, mv, mark).unwrap());
            }
        }

        boards
    }

    /// O's counterpart to `best_move`: the first move minimizing X's value.
    fn best_reply_for_o(board: &Board) -> Move {
        let mut search = AlphaBetaSearch::new();
        let mut best = None;
        let mut best_value = POS_INFINITY;
        for mv in legal_moves(board) {
            let value = search.evaluate(&board.with_mark(mv, Cell::O), Cell::X);
            if value < best_value {
                best_value = value;
                best = Some(mv);
            }
        }
        best.unwrap()
    }

    #[test]
    fn test_takes_immediate_win() {
        let result = AlphaBetaSearch::new().search(&board("XX./OO./...")).unwrap();
        assert_eq!(result.best_move, Move::new(0, 2));
        assert_eq!(result.value, 1);
    }

    #[test]
    fn test_blocks_immediate_loss() {
        let result = AlphaBetaSearch::new().search(&board("X../OO./...")).unwrap();
        assert_eq!(result.best_move, Move::new(1, 2));
        assert_eq!(result.value, 0);
    }

    #[test]
    fn test_tie_goes_to_first_move_in_scan_order() {
        // (0,2) and (2,0) both win on the spot; (0,2) comes first.
        assert_eq!(best_move(&board("XX./X.O/.OO")).unwrap(), Move::new(0, 2));
        // Every opening draws with best play, so the first cell is chosen.
        assert_eq!(best_move(&Board::new()).unwrap(), Move::new(0, 0));
    }

    #[test]
    fn test_best_move_on_terminal_board_is_invalid_state() {
        let won = best_move(&board("XXX/OO./..."));
        assert!(matches!(won, Err(TicTacToeError::InvalidState(_))));

        let full = best_move(&board("XOX/XOO/OXX"));
        assert!(matches!(full, Err(TicTacToeError::InvalidState(_))));
    }

    #[test]
    fn test_empty_board_is_a_draw() {
        let result = AlphaBetaSearch::new().search(&Board::new()).unwrap();
        assert_eq!(result.value, 0);
        assert_eq!(result.nodes, 18296);
    }

    #[test]
    fn test_optimal_play_from_empty_board_draws() {
        let mut current = Board::new();
        let mut mark = Cell::X;

        while !is_terminal(&current) {
            let mv = if mark == Cell::X {
                best_move(&current).unwrap()
            } else {
                best_reply_for_o(&current)
            };
            current = apply_move(&current, mv, mark).unwrap();
            mark = mark.opponent().unwrap();
        }

        assert_eq!(utility(&current), 0);
    }

    #[test]
    fn test_best_move_points_at_empty_cell() {
        for current in reachable_boards() {
            if is_terminal(&current) || side_to_move(&current) != Cell::X {
                continue;
            }
            let mv = best_move(&current).unwrap();
            assert_eq!(current.get(mv), Some(Cell::Empty), "board {}", current.to_rows());
        }
    }

    #[test]
    fn test_pruning_never_changes_values() {
        for current in reachable_boards() {
            let to_move = side_to_move(&current);
            let pruned = AlphaBetaSearch::new().evaluate(&current, to_move);
            let full = minimax_value(&current, to_move);
            assert_eq!(pruned, full, "board {}", current.to_rows());
        }
    }

    #[test]
    fn test_minimax_value_of_known_positions() {
        assert_eq!(minimax_value(&Board::new(), Cell::X), 0);
        assert_eq!(minimax_value(&board("XX./OO./..."), Cell::X), 1);
        assert_eq!(minimax_value(&board("XX./OO./X.."), Cell::O), -1);
        assert_eq!(minimax_value(&board("XXX/OO./..."), Cell::O), 1);
    }

    #[test]
    fn test_pruning_matches_root_choice_and_visits_fewer_nodes() {
        let start = board("X../.O./...");
        let mut pruned = AlphaBetaSearch::new();
        let mut full = AlphaBetaSearch::without_pruning();

        let pruned_result = pruned.search(&start).unwrap();
        let full_result = full.search(&start).unwrap();

        assert_eq!(pruned_result.best_move, full_result.best_move);
        assert_eq!(pruned_result.value, full_result.value);
        assert!(pruned.nodes() < full.nodes());
    }

    #[test]
    fn test_utility_of_reachable_terminal_boards() {
        for current in reachable_boards() {
            if !is_terminal(&current) {
                continue;
            }
            let x_line = check_line(&current, Cell::X);
            let o_line = check_line(&current, Cell::O);
            assert!(!(x_line && o_line));
            let expected = if x_line {
                1
            } else if o_line {
                -1
            } else {
                0
            };
            assert_eq!(utility(&current), expected);
        }
    }

    fn check_line(current: &Board, mark: Cell) -> bool {
        const LINES: [[(usize, usize); 3]; 8] = [
            [(0, 0), (0, 1), (0, 2)],
            [(1, 0), (1, 1), (1, 2)],
            [(2, 0), (2, 1), (2, 2)],
            [(0, 0), (1, 0), (2, 0)],
            [(0, 1), (1, 1), (2, 1)],
            [(0, 2), (1, 2), (2, 2)],
            [(0, 0), (1, 1), (2, 2)],
            [(0, 2), (1, 1), (2, 0)],
        ];
        LINES.iter().any(|line| {
            line.iter()
                .all(|&(row, col)| current.get(Move::new(row, col)) == Some(mark))
        })
    }
}
