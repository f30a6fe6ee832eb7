//! Move-selection engine for 15x15 five-in-a-row (Gomoku)
//!
//! Given a board snapshot and the color to move, the engine chooses a single
//! best move under a wall-clock budget. It holds no game state between
//! invocations: the board is supplied fresh on every call.
//!
//! # Architecture
//!
//! - [`board`]: grid and bitboard representation plus the directional line
//!   scanner (run length / open ends)
//! - [`rules`]: move legality and five-in-a-row detection
//! - [`eval`]: weight table and heuristic position evaluator
//! - [`search`]: tactical threat probes, candidate generation, and
//!   depth-limited minimax with alpha-beta pruning
//! - [`engine`]: the decision cascade tying it all together
//! - [`config`] / [`error`]: tuning knobs and structured errors
//!
//! # Quick Start
//!
//! ```
//! use gomoku_ai::{Board, Engine, Stone};
//!
//! let engine = Engine::new();
//! let board = Board::new();
//!
//! // Black opens; an empty board always yields the center
//! let result = engine.select(&board, Stone::Black).unwrap();
//! assert_eq!((result.best_move.row, result.best_move.col), (7, 7));
//! ```
//!
//! # Selection Priority
//!
//! 1. Empty board: center
//! 2. Own winning move
//! 3. Block the opponent's winning move
//! 4. Create an open four or double three
//! 5. Block the opponent's open four or double three
//! 6. Alpha-beta search over heuristic-ordered candidates
//! 7. Top quick-heuristic candidate if the deadline expires first
//!
//! Steps 2-5 are pluggable [`engine::Tactic`] probes; the cascade can be
//! extended without touching the search controller.
//!
//! # Performance
//!
//! One scratch board per invocation, mutated in place with place/undo pairs;
//! no per-node copying. The deadline is checked between root candidates, so
//! an overrun degrades move quality but never loses the result. Root-level
//! parallel search is available via [`config::SearchConfig::threads`].

pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod eval;
pub mod rules;
pub mod search;

// Re-export commonly used types for convenience
pub use board::{Board, Pos, Stone, BOARD_SIZE};
pub use config::{EngineConfig, SearchConfig};
pub use engine::{Engine, MoveResult, SearchKind, Tactic};
pub use error::{ConfigError, EngineError};
pub use eval::EvalWeights;
