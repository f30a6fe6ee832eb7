//! Evaluation module for board positions
//!
//! Pattern recognition and scoring:
//! - One explicit weight table ([`EvalWeights`]) threaded through every call,
//!   no module-level globals
//! - Per-stone line scoring and whole-board summation

pub mod heuristic;
pub mod weights;

pub use heuristic::{evaluate_board, evaluate_point};
pub use weights::EvalWeights;
