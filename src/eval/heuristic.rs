//! Heuristic evaluation of board positions
//!
//! This is the leaf evaluator for the minimax search: a weighted sum of line
//! patterns over every occupied cell. It is a heuristic approximation and
//! makes no optimality claim: terminal detection is the search's job.

use crate::board::{classify_line, Board, Pos, Stone, DIRECTIONS};

use super::weights::EvalWeights;

/// Score the four lines through a single stone at `pos`.
///
/// The stone must already be placed (callers probing an empty cell place
/// hypothetically and undo). Each direction is classified independently and
/// mapped through the weight table.
#[must_use]
pub fn evaluate_point(board: &Board, pos: Pos, color: Stone, weights: &EvalWeights) -> i32 {
    debug_assert_eq!(board.get(pos), color);
    DIRECTIONS
        .iter()
        .map(|&(dr, dc)| weights.line_score(classify_line(board, pos, dr, dc, color)))
        .sum()
}

/// Evaluate the whole board from `my_color`'s perspective.
///
/// Sums [`evaluate_point`] over every occupied cell, adding own terms and
/// subtracting opponent terms scaled by `weights.defense_pct`. Positive
/// scores favor `my_color`.
#[must_use]
pub fn evaluate_board(board: &Board, my_color: Stone, opp_color: Stone, weights: &EvalWeights) -> i32 {
    debug_assert_eq!(my_color.opponent(), opp_color);

    let mut my_score = 0i64;
    if let Some(stones) = board.stones(my_color) {
        for pos in stones.iter_ones() {
            my_score += i64::from(evaluate_point(board, pos, my_color, weights));
        }
    }

    let mut opp_score = 0i64;
    if let Some(stones) = board.stones(opp_color) {
        for pos in stones.iter_ones() {
            opp_score += i64::from(evaluate_point(board, pos, opp_color, weights));
        }
    }

    (my_score - opp_score * i64::from(weights.defense_pct) / 100) as i32
}
