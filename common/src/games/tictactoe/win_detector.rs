use super::board::Board;
use super::types::{Cell, Move, WinningLine, BOARD_SIZE};

pub fn check_win(board: &Board) -> Option<Cell> {
    check_win_with_line(board).map(|line| line.mark)
}

/// Rows and columns are scanned in a single pass; diagonals are only looked at
/// when the center is taken, since both of them run through it.
pub fn check_win_with_line(board: &Board) -> Option<WinningLine> {
    let cells = board.cells();

    for i in 0..BOARD_SIZE {
        let row_mark = cells[i][0];
        if row_mark != Cell::Empty && row_mark == cells[i][1] && cells[i][1] == cells[i][2] {
            return Some(WinningLine::new(row_mark, Move::new(i, 0), Move::new(i, 2)));
        }

        let col_mark = cells[0][i];
        if col_mark != Cell::Empty && col_mark == cells[1][i] && cells[1][i] == cells[2][i] {
            return Some(WinningLine::new(col_mark, Move::new(0, i), Move::new(2, i)));
        }
    }

    let center = cells[1][1];
    if center == Cell::Empty {
        return None;
    }

    if cells[0][0] == center && center == cells[2][2] {
        return Some(WinningLine::new(center, Move::new(0, 0), Move::new(2, 2)));
    }
    if cells[0][2] == center && center == cells[2][0] {
        return Some(WinningLine::new(center, Move::new(0, 2), Move::new(2, 0)));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(rows: &str) -> Board {
        Board::from_rows(rows).unwrap()
    }

    #[test]
    fn test_no_winner_on_empty_board() {
        assert_eq!(check_win(&Board::new()), None);
    }

    #[test]
    fn test_row_win() {
        let line = check_win_with_line(&board("OO./XXX/...")).unwrap();
        assert_eq!(line.mark, Cell::X);
        assert_eq!(line.start, Move::new(1, 0));
        assert_eq!(line.end, Move::new(1, 2));
    }

    #[test]
    fn test_column_win() {
        let line = check_win_with_line(&board("XO./XO./.O.")).unwrap();
        assert_eq!(line.mark, Cell::O);
        assert_eq!(line.start, Move::new(0, 1));
        assert_eq!(line.end, Move::new(2, 1));
    }

    #[test]
    fn test_main_diagonal_win() {
        assert_eq!(check_win(&board("XO./OX./..X")), Some(Cell::X));
    }

    #[test]
    fn test_anti_diagonal_win() {
        let line = check_win_with_line(&board("XXO/XO./O..")).unwrap();
        assert_eq!(line.mark, Cell::O);
        assert_eq!(line.start, Move::new(0, 2));
        assert_eq!(line.end, Move::new(2, 0));
    }

    #[test]
    fn test_corners_without_center_are_not_a_win() {
        assert_eq!(check_win(&board("X.O/.../O.X")), None);
    }

    #[test]
    fn test_full_board_without_line() {
        assert_eq!(check_win(&board("XOX/XOO/OXX")), None);
    }
}
