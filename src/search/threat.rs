//! Tactical threat probes
//!
//! Exhaustive single-placement probes built on the line scanner. Each probe
//! hypothetically places a stone, classifies the lines through it, and undoes
//! the placement before returning: the board is always restored.
//!
//! Scans run in row-major order, so ties break toward the lowest
//! (row, col) and results are deterministic.

use crate::board::{classify_line, Board, Pos, Stone, DIRECTIONS, TOTAL_CELLS};

/// Find a move that completes five-in-a-row for `color`, if one exists.
///
/// Brute force over every empty cell in row-major order: place, test all four
/// directions, undo. Returns the first success.
#[must_use]
pub fn find_winning_move(board: &mut Board, color: Stone) -> Option<Pos> {
    for idx in 0..TOTAL_CELLS {
        let pos = Pos::from_index(idx);
        if !board.is_empty(pos) {
            continue;
        }

        board.place_stone(pos, color);
        let wins = DIRECTIONS
            .iter()
            .any(|&(dr, dc)| classify_line(board, pos, dr, dc, color).is_win());
        board.remove_stone(pos);

        if wins {
            return Some(pos);
        }
    }
    None
}

/// Would placing `color` at `pos` create a four with at least one open end?
///
/// An open four threatens five on the next move at low cost: the opponent
/// must answer immediately or lose.
#[must_use]
pub fn creates_open_four(board: &mut Board, pos: Pos, color: Stone) -> bool {
    debug_assert!(board.is_empty(pos));
    board.place_stone(pos, color);
    let found = DIRECTIONS.iter().any(|&(dr, dc)| {
        let scan = classify_line(board, pos, dr, dc, color);
        scan.run_length == 4 && scan.open_ends >= 1
    });
    board.remove_stone(pos);
    found
}

/// Would placing `color` at `pos` create two live threes at once?
///
/// Two simultaneous both-ends-open threes cannot both be blocked in one
/// reply.
#[must_use]
pub fn creates_double_three(board: &mut Board, pos: Pos, color: Stone) -> bool {
    debug_assert!(board.is_empty(pos));
    board.place_stone(pos, color);
    let mut open_threes = 0;
    for &(dr, dc) in &DIRECTIONS {
        let scan = classify_line(board, pos, dr, dc, color);
        if scan.run_length == 3 && scan.open_ends == 2 {
            open_threes += 1;
            if open_threes >= 2 {
                break;
            }
        }
    }
    board.remove_stone(pos);
    open_threes >= 2
}

/// First cell (row-major) where `color` would create an open four.
#[must_use]
pub fn find_open_four_move(board: &mut Board, color: Stone) -> Option<Pos> {
    for idx in 0..TOTAL_CELLS {
        let pos = Pos::from_index(idx);
        if board.is_empty(pos) && creates_open_four(board, pos, color) {
            return Some(pos);
        }
    }
    None
}

/// First cell (row-major) where `color` would create a double three.
#[must_use]
pub fn find_double_three_move(board: &mut Board, color: Stone) -> Option<Pos> {
    for idx in 0..TOTAL_CELLS {
        let pos = Pos::from_index(idx);
        if board.is_empty(pos) && creates_double_three(board, pos, color) {
            return Some(pos);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BOARD_SIZE;
    use rand::Rng;
    use rand_xoshiro::rand_core::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;

    /// Oracle: place at every empty cell and check for five with a plain
    /// nested scan, independent of the scanner module.
    fn winning_move_oracle(board: &mut Board, color: Stone) -> Option<Pos> {
        for idx in 0..TOTAL_CELLS {
            let pos = Pos::from_index(idx);
            if !board.is_empty(pos) {
                continue;
            }
            board.place_stone(pos, color);
            let mut wins = false;
            for &(dr, dc) in &DIRECTIONS {
                let mut count = 1;
                for sign in [1, -1] {
                    let mut r = i32::from(pos.row) + dr * sign;
                    let mut c = i32::from(pos.col) + dc * sign;
                    while Pos::is_valid(r, c) && board.get(Pos::new(r as u8, c as u8)) == color {
                        count += 1;
                        r += dr * sign;
                        c += dc * sign;
                    }
                }
                if count >= 5 {
                    wins = true;
                    break;
                }
            }
            board.remove_stone(pos);
            if wins {
                return Some(pos);
            }
        }
        None
    }

    #[test]
    fn test_finds_horizontal_win() {
        let mut board = Board::new();
        for col in 3..7 {
            board.place_stone(Pos::new(7, col), Stone::Black);
        }

        // Both (7,2) and (7,7) win; row-major order picks (7,2)
        assert_eq!(
            find_winning_move(&mut board, Stone::Black),
            Some(Pos::new(7, 2))
        );
    }

    #[test]
    fn test_finds_closed_four_exit() {
        let mut board = Board::new();
        board.place_stone(Pos::new(7, 3), Stone::White);
        for col in 4..8 {
            board.place_stone(Pos::new(7, col), Stone::Black);
        }

        // (7,8) is the only winning continuation
        assert_eq!(
            find_winning_move(&mut board, Stone::Black),
            Some(Pos::new(7, 8))
        );
    }

    #[test]
    fn test_no_win_available() {
        let mut board = Board::new();
        board.place_stone(Pos::new(7, 7), Stone::Black);
        board.place_stone(Pos::new(8, 8), Stone::White);
        assert_eq!(find_winning_move(&mut board, Stone::Black), None);
        assert_eq!(find_winning_move(&mut board, Stone::White), None);
    }

    #[test]
    fn test_gap_win_found() {
        let mut board = Board::new();
        // OO_OO: filling the gap completes five
        for col in [4u8, 5, 7, 8] {
            board.place_stone(Pos::new(9, col), Stone::White);
        }
        assert_eq!(
            find_winning_move(&mut board, Stone::White),
            Some(Pos::new(9, 6))
        );
    }

    #[test]
    fn test_probes_restore_board() {
        let mut board = Board::new();
        for col in 3..7 {
            board.place_stone(Pos::new(7, col), Stone::Black);
        }
        let snapshot = board.clone();

        let _ = find_winning_move(&mut board, Stone::Black);
        let _ = creates_open_four(&mut board, Pos::new(7, 2), Stone::Black);
        let _ = creates_double_three(&mut board, Pos::new(10, 10), Stone::Black);
        let _ = find_open_four_move(&mut board, Stone::White);
        let _ = find_double_three_move(&mut board, Stone::White);

        assert_eq!(board, snapshot);
    }

    #[test]
    fn test_open_four_detection() {
        let mut board = Board::new();
        // _OOO_ : extending either end makes an open-ended four
        for col in 5..8 {
            board.place_stone(Pos::new(7, col), Stone::Black);
        }

        assert!(creates_open_four(&mut board, Pos::new(7, 4), Stone::Black));
        assert!(creates_open_four(&mut board, Pos::new(7, 8), Stone::Black));
        assert!(!creates_open_four(&mut board, Pos::new(7, 3), Stone::Black));

        // Block one side: XOOO_: extending at (7,8) still yields a four
        // with one open end
        board.place_stone(Pos::new(7, 4), Stone::White);
        assert!(creates_open_four(&mut board, Pos::new(7, 8), Stone::Black));
    }

    #[test]
    fn test_double_three_detection() {
        let mut board = Board::new();
        // Two pairs crossing at (7,7): horizontal (7,5),(7,6) and
        // vertical (5,7),(6,7): placing there makes two open threes
        board.place_stone(Pos::new(7, 5), Stone::Black);
        board.place_stone(Pos::new(7, 6), Stone::Black);
        board.place_stone(Pos::new(5, 7), Stone::Black);
        board.place_stone(Pos::new(6, 7), Stone::Black);

        assert!(creates_double_three(&mut board, Pos::new(7, 7), Stone::Black));
        assert_eq!(
            find_double_three_move(&mut board, Stone::Black),
            Some(Pos::new(7, 7))
        );
    }

    #[test]
    fn test_single_three_is_not_double() {
        let mut board = Board::new();
        board.place_stone(Pos::new(7, 5), Stone::Black);
        board.place_stone(Pos::new(7, 6), Stone::Black);

        assert!(!creates_double_three(&mut board, Pos::new(7, 7), Stone::Black));
    }

    #[test]
    fn test_blocked_three_is_not_live() {
        let mut board = Board::new();
        // Horizontal pair with a white stone closing one end
        board.place_stone(Pos::new(7, 4), Stone::White);
        board.place_stone(Pos::new(7, 5), Stone::Black);
        board.place_stone(Pos::new(7, 6), Stone::Black);
        // Vertical pair, fully open
        board.place_stone(Pos::new(5, 7), Stone::Black);
        board.place_stone(Pos::new(6, 7), Stone::Black);

        // The horizontal three would have only one open end
        assert!(!creates_double_three(&mut board, Pos::new(7, 7), Stone::Black));
    }

    #[test]
    fn test_matches_oracle_on_random_boards() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(0x5eed);

        for _ in 0..50 {
            let mut board = Board::new();
            let stones = rng.gen_range(8..40);
            for i in 0..stones {
                let r = rng.gen_range(0..BOARD_SIZE as u8);
                let c = rng.gen_range(0..BOARD_SIZE as u8);
                let pos = Pos::new(r, c);
                if board.is_empty(pos) {
                    let color = if i % 2 == 0 { Stone::Black } else { Stone::White };
                    board.place_stone(pos, color);
                }
            }

            for color in [Stone::Black, Stone::White] {
                let expected = winning_move_oracle(&mut board, color);
                let actual = find_winning_move(&mut board, color);
                assert_eq!(actual, expected, "disagreement on {color:?}");
            }
        }
    }
}
