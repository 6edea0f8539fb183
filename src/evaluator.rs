//! Attack detection and the win condition.
//!
//! Every function here is a pure predicate over a slice of queens; nothing is
//! cached between calls, so results always reflect the set passed in.

use crate::board::Position;

/// Whether two distinct cells share a row, a column or a diagonal.
///
/// Identical positions are not considered here; callers decide whether a
/// queen counts against its own square.
pub fn on_same_line(a: Position, b: Position) -> bool {
    a.row == b.row || a.col == b.col || a.row.abs_diff(b.row) == a.col.abs_diff(b.col)
}

/// True iff some queen stands exactly on `position`. O(Q).
pub fn has_queen(position: Position, queens: &[Position]) -> bool {
    queens.iter().any(|q| *q == position)
}

/// True iff `position` lies on the attack lines of any queen, including a
/// queen standing on `position` itself. Drives the range highlight.
pub fn is_in_range(position: Position, queens: &[Position]) -> bool {
    queens.iter().any(|q| on_same_line(*q, position))
}

/// True iff some *other* queen shares a row, column or diagonal with
/// `position`. A queen never attacks its own square. O(Q).
pub fn is_attacked(position: Position, queens: &[Position]) -> bool {
    queens
        .iter()
        .filter(|q| **q != position)
        .any(|q| on_same_line(*q, position))
}

/// Whether a new queen may go on `position`: in bounds, empty and out of
/// range of every existing queen.
pub fn is_valid_queen_placement(position: Position, queens: &[Position], board_size: usize) -> bool {
    position.is_within(board_size) && !has_queen(position, queens) && !is_in_range(position, queens)
}

/// Exactly `board_size` queens with no pair attacking each other.
///
/// Any other count is rejected before the O(Q²) pairwise check runs, so a set
/// holding more queens than the board side is never complete.
pub fn is_game_complete(queens: &[Position], board_size: usize) -> bool {
    if queens.len() != board_size {
        return false;
    }
    !queens.iter().enumerate().any(|(i, a)| {
        queens[i + 1..].iter().any(|b| on_same_line(*a, *b))
    })
}

/// The three visual states the board derives for one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellState {
    pub has_queen: bool,
    pub is_attacked: bool,
    pub is_in_range: bool,
}

pub fn cell_state(position: Position, queens: &[Position]) -> CellState {
    CellState {
        has_queen: has_queen(position, queens),
        is_attacked: is_attacked(position, queens),
        is_in_range: is_in_range(position, queens),
    }
}

/// Every cell of a `board_size`² board in row-major order with its state,
/// evaluated lazily against `queens`.
pub fn board_cells(
    queens: &[Position],
    board_size: usize,
) -> impl Iterator<Item = (Position, CellState)> + '_ {
    let n = i32::try_from(board_size).unwrap_or(i32::MAX);
    (0..n).flat_map(move |row| {
        (0..n).map(move |col| {
            let position = Position::new(row, col);
            (position, cell_state(position, queens))
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(row: i32, col: i32) -> Position {
        Position::new(row, col)
    }

    fn two_queens() -> Vec<Position> {
        vec![p(0, 0), p(1, 2)]
    }

    #[test]
    fn has_queen_matches_exact_cell() {
        let queens = vec![p(0, 0), p(1, 2), p(3, 1)];
        assert!(has_queen(p(0, 0), &queens));
        assert!(has_queen(p(1, 2), &queens));
        assert!(!has_queen(p(0, 1), &queens));
        assert!(!has_queen(p(2, 2), &queens));
        assert!(!has_queen(p(0, 0), &[]));
    }

    #[test]
    fn in_range_rows_columns_diagonals() {
        let queens = two_queens();
        assert!(is_in_range(p(0, 3), &queens));
        assert!(is_in_range(p(3, 0), &queens));
        assert!(is_in_range(p(2, 2), &queens));
        assert!(is_in_range(p(2, 1), &queens));
        assert!(is_in_range(p(3, 3), &queens));
        assert!(is_in_range(p(2, 3), &queens));
        assert!(is_in_range(p(3, 2), &queens));
        assert!(!is_in_range(p(3, 1), &queens));
    }

    #[test]
    fn in_range_is_reflexive() {
        let queens = two_queens();
        assert!(is_in_range(p(0, 0), &queens));
        assert!(is_in_range(p(1, 2), &queens));
        assert!(is_in_range(p(5, 5), &[p(5, 5)]));
    }

    #[test]
    fn attacked_skips_own_square() {
        let queens = two_queens();
        // (0,0) and (1,2) are a knight's move apart, so neither attacks the other.
        assert!(!is_attacked(p(0, 0), &queens));
        assert!(!is_attacked(p(1, 2), &queens));
        assert!(!is_attacked(p(2, 2), &[p(2, 2)]));
    }

    #[test]
    fn attacked_cells() {
        let queens = two_queens();
        assert!(is_attacked(p(0, 1), &queens));
        assert!(is_attacked(p(2, 0), &queens));
        assert!(is_attacked(p(2, 2), &queens));
        assert!(is_attacked(p(2, 1), &queens));
        assert!(is_attacked(p(3, 3), &queens));
        assert!(is_attacked(p(2, 3), &queens));
        assert!(is_attacked(p(3, 2), &queens));
        assert!(!is_attacked(p(3, 1), &queens));
    }

    #[test]
    fn occupied_queen_attacked_by_another() {
        let queens = vec![p(0, 0), p(3, 3)];
        assert!(is_attacked(p(0, 0), &queens));
        assert!(is_attacked(p(3, 3), &queens));
    }

    #[test]
    fn no_wraparound() {
        // (0,0) and (3,1) would only meet on a wrapped diagonal.
        assert!(!is_attacked(p(3, 1), &[p(0, 0)]));
        assert!(!is_in_range(p(1, 3), &[p(0, 0)]));
    }

    #[test]
    fn valid_placement_bounds() {
        let queens = two_queens();
        assert!(!is_valid_queen_placement(p(-1, 0), &queens, 4));
        assert!(!is_valid_queen_placement(p(0, -1), &queens, 4));
        assert!(!is_valid_queen_placement(p(4, 0), &queens, 4));
        assert!(!is_valid_queen_placement(p(0, 4), &queens, 4));
        assert!(!is_valid_queen_placement(p(0, 0), &[], 0));
    }

    #[test]
    fn valid_placement_rejects_occupied_and_threatened() {
        let queens = two_queens();
        assert!(!is_valid_queen_placement(p(0, 0), &queens, 4));
        assert!(!is_valid_queen_placement(p(1, 2), &queens, 4));
        for cell in [p(0, 1), p(2, 0), p(2, 2), p(2, 1), p(3, 3), p(2, 3), p(3, 2)] {
            assert!(!is_valid_queen_placement(cell, &queens, 4), "{cell}");
        }
        assert!(is_valid_queen_placement(p(3, 1), &queens, 4));
    }

    #[test]
    fn valid_placement_on_single_cell_board() {
        assert!(is_valid_queen_placement(p(0, 0), &[], 1));
        assert!(is_game_complete(&[p(0, 0)], 1));
    }

    #[test]
    fn completion_needs_exact_count() {
        let solution = vec![p(0, 1), p(1, 3), p(2, 0), p(3, 2)];
        assert!(!is_game_complete(&[], 4));
        assert!(!is_game_complete(&solution[..3], 4));
        let mut five = solution.clone();
        five.push(p(3, 3));
        assert!(!is_game_complete(&five, 4));
        assert!(!is_game_complete(&two_queens(), 4));
    }

    #[test]
    fn known_four_queens_solution() {
        let solution = vec![p(0, 1), p(1, 3), p(2, 0), p(3, 2)];
        assert!(is_game_complete(&solution, 4));
        // Click order does not matter.
        let shuffled = vec![p(3, 2), p(0, 1), p(2, 0), p(1, 3)];
        assert!(is_game_complete(&shuffled, 4));
    }

    #[test]
    fn mutually_attacking_block_is_not_complete() {
        let block = vec![p(0, 0), p(0, 1), p(1, 0), p(1, 1)];
        assert!(!is_game_complete(&block, 4));
    }

    #[test]
    fn eight_queens_solution() {
        let cols = [0, 4, 7, 5, 2, 6, 1, 3];
        let queens: Vec<Position> = cols.iter().enumerate().map(|(r, &c)| p(r as i32, c)).collect();
        assert!(is_game_complete(&queens, 8));
        for q in &queens {
            assert!(!is_attacked(*q, &queens));
        }
    }

    #[test]
    fn attack_relation_is_symmetric() {
        let cells: Vec<Position> = (0..5).flat_map(|r| (0..5).map(move |c| p(r, c))).collect();
        for a in &cells {
            for b in cells.iter().filter(|b| *b != a) {
                assert_eq!(
                    is_attacked(*a, &[*b]),
                    is_attacked(*b, &[*a]),
                    "{a} vs {b}"
                );
            }
        }
    }

    #[test]
    fn lone_queen_is_never_attacked() {
        for r in 0..6 {
            for c in 0..6 {
                assert!(!is_attacked(p(r, c), &[p(r, c)]));
                assert!(is_in_range(p(r, c), &[p(r, c)]));
            }
        }
    }

    #[test]
    fn extreme_coordinates_do_not_overflow() {
        let far = p(i32::MIN, i32::MAX);
        assert!(!is_in_range(far, &[p(0, 0)]));
        assert!(is_in_range(p(i32::MAX, i32::MAX), &[p(i32::MIN, i32::MIN)]));
    }

    #[test]
    fn cell_states_for_render_pass() {
        let queens = two_queens();
        let cells: Vec<(Position, CellState)> = board_cells(&queens, 4).collect();
        assert_eq!(cells.len(), 16);
        assert_eq!(cells[0].0, p(0, 0));
        assert_eq!(cells[15].0, p(3, 3));

        assert_eq!(
            cell_state(p(0, 0), &queens),
            CellState { has_queen: true, is_attacked: false, is_in_range: true }
        );
        assert_eq!(
            cell_state(p(0, 1), &queens),
            CellState { has_queen: false, is_attacked: true, is_in_range: true }
        );
        assert_eq!(cell_state(p(3, 1), &queens), CellState::default());
    }
}
