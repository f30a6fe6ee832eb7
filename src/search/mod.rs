//! Search module
//!
//! Contains:
//! - Threat probes: immediate wins, open fours, double threes
//! - Candidate generation with proximity filtering and heuristic ordering
//! - Depth-limited minimax with alpha-beta pruning under a wall-clock deadline

pub mod alphabeta;
pub mod candidates;
pub mod threat;

pub use alphabeta::{SearchOutcome, Searcher};
pub use candidates::candidate_moves;
pub use threat::{
    creates_double_three, creates_open_four, find_double_three_move, find_open_four_move,
    find_winning_move,
};
