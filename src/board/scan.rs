//! Directional line scanner: run lengths and open ends
//!
//! All pattern classification in the engine goes through this one scanner,
//! keeping the threat probes, the evaluator, and the candidate heuristic in
//! agreement about what an "open three" or a "four" is. Classification is
//! defined purely in terms of run length and open ends.

use super::{Board, Pos, Stone, WIN_LENGTH};

/// Direction vectors for line checking (4 directions).
/// Each direction only needs to be checked once: both ways are scanned
/// from the reference point, which covers all 8 compass directions.
pub const DIRECTIONS: [(i32, i32); 4] = [
    (0, 1),  // Horizontal
    (1, 0),  // Vertical
    (1, 1),  // Diagonal SE
    (1, -1), // Diagonal SW
];

/// Classification of the line through a point in one direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineScan {
    /// Contiguous same-colored stones through the reference point,
    /// including the reference stone. Capped at [`WIN_LENGTH`]: any
    /// overline is reported as a win.
    pub run_length: u8,
    /// How many of the run's two ends abut an empty, in-bounds cell (0-2)
    pub open_ends: u8,
}

impl LineScan {
    /// A run of five or more, in any openness
    #[inline]
    pub fn is_win(self) -> bool {
        self.run_length >= WIN_LENGTH
    }
}

/// Count the run of `color` stones through `pos` in direction `(dr, dc)`.
///
/// Walks forward while cells match `color`, then backward, summing length.
/// The stone at `pos` must already be placed; the minimum result is 1.
#[inline]
pub fn count_run(board: &Board, pos: Pos, color: Stone, dr: i32, dc: i32) -> u8 {
    debug_assert_eq!(board.get(pos), color);
    let mut count = 1u8;

    let mut r = i32::from(pos.row) + dr;
    let mut c = i32::from(pos.col) + dc;
    while Pos::is_valid(r, c) && board.get(Pos::new(r as u8, c as u8)) == color {
        count += 1;
        r += dr;
        c += dc;
    }

    r = i32::from(pos.row) - dr;
    c = i32::from(pos.col) - dc;
    while Pos::is_valid(r, c) && board.get(Pos::new(r as u8, c as u8)) == color {
        count += 1;
        r -= dr;
        c -= dc;
    }

    count
}

/// Classify the line of `color` stones through `pos` in direction `(dr, dc)`.
///
/// Walks both ways from the reference stone, then checks the cell just past
/// each end: empty and in-bounds counts as an open end, occupied or off-board
/// as closed. Allocation-free; this is called O(cells x 4 directions) times
/// per evaluation.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn classify_line(board: &Board, pos: Pos, dr: i32, dc: i32, color: Stone) -> LineScan {
    debug_assert_eq!(board.get(pos), color);
    let mut run_length = 1u8;
    let mut open_ends = 0u8;

    // Positive direction
    let mut r = i32::from(pos.row) + dr;
    let mut c = i32::from(pos.col) + dc;
    while Pos::is_valid(r, c) && board.get(Pos::new(r as u8, c as u8)) == color {
        run_length += 1;
        r += dr;
        c += dc;
    }
    if Pos::is_valid(r, c) && board.get(Pos::new(r as u8, c as u8)) == Stone::Empty {
        open_ends += 1;
    }

    // Negative direction
    r = i32::from(pos.row) - dr;
    c = i32::from(pos.col) - dc;
    while Pos::is_valid(r, c) && board.get(Pos::new(r as u8, c as u8)) == color {
        run_length += 1;
        r -= dr;
        c -= dc;
    }
    if Pos::is_valid(r, c) && board.get(Pos::new(r as u8, c as u8)) == Stone::Empty {
        open_ends += 1;
    }

    LineScan {
        run_length: run_length.min(WIN_LENGTH),
        open_ends,
    }
}
