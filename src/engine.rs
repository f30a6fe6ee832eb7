//! Move selection: the decision cascade
//!
//! The engine picks one move for a board snapshot and a color, working down a
//! priority cascade:
//!
//! 1. Empty board: take the center
//! 2. Tactic probes, in order: own win, block opponent's win, own fork
//!    (open four over double three), block opponent's fork
//! 3. Alpha-beta search over heuristic-ordered candidates under the
//!    wall-clock budget
//! 4. Top quick-heuristic candidate if the deadline expired before any
//!    candidate finished
//!
//! The cascade is an ordered list of [`Tactic`] trait objects, so new probes
//! can be inserted without touching the search controller. On a legal,
//! non-terminal board selection never fails; the only error is
//! [`EngineError::NoLegalMove`] on a full board.

use std::time::{Duration, Instant};

use crate::board::{Board, Pos, Stone, CENTER};
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::rules::is_full;
use crate::search::{
    candidate_moves, find_double_three_move, find_open_four_move, find_winning_move, Searcher,
};

/// A single tactical probe in the cascade.
///
/// A probe inspects the position for one motif and returns the move answering
/// it, or `None` to pass to the next stage. Probes may place and undo stones
/// on the scratch board but must restore it before returning.
pub trait Tactic: Send + Sync {
    /// Short name, reported in [`MoveResult`]
    fn name(&self) -> &'static str;
    /// Probe the position for this tactic's move
    fn probe(&self, board: &mut Board, color: Stone) -> Option<Pos>;
}

/// Complete five-in-a-row right now.
struct WinNow;

impl Tactic for WinNow {
    fn name(&self) -> &'static str {
        "win"
    }

    fn probe(&self, board: &mut Board, color: Stone) -> Option<Pos> {
        find_winning_move(board, color)
    }
}

/// Occupy the cell where the opponent would complete five.
struct BlockWin;

impl Tactic for BlockWin {
    fn name(&self) -> &'static str {
        "block-win"
    }

    fn probe(&self, board: &mut Board, color: Stone) -> Option<Pos> {
        find_winning_move(board, color.opponent())
    }
}

/// Create an open four, or failing that a double three.
struct OwnFork;

impl Tactic for OwnFork {
    fn name(&self) -> &'static str {
        "fork"
    }

    fn probe(&self, board: &mut Board, color: Stone) -> Option<Pos> {
        if let Some(pos) = find_open_four_move(board, color) {
            return Some(pos);
        }
        find_double_three_move(board, color)
    }
}

/// Take the cell where the opponent would fork.
struct BlockFork;

impl Tactic for BlockFork {
    fn name(&self) -> &'static str {
        "block-fork"
    }

    fn probe(&self, board: &mut Board, color: Stone) -> Option<Pos> {
        let opponent = color.opponent();
        if let Some(pos) = find_open_four_move(board, opponent) {
            return Some(pos);
        }
        find_double_three_move(board, opponent)
    }
}

/// Which stage of the cascade produced the move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    /// Empty board, center opening
    Opening,
    /// One of the tactic probes, by name
    Tactic(&'static str),
    /// Alpha-beta search result
    AlphaBeta,
    /// Deadline expired before any root candidate finished; the top
    /// quick-heuristic candidate was used
    Fallback,
}

/// Result of a move selection with provenance and statistics.
#[derive(Debug, Clone)]
pub struct MoveResult {
    /// The chosen move
    pub best_move: Pos,
    /// Search score (meaningful for [`SearchKind::AlphaBeta`] results)
    pub score: i32,
    /// Cascade stage that produced the move
    pub kind: SearchKind,
    /// Time taken in milliseconds
    pub time_ms: u64,
    /// Interior search nodes visited
    pub nodes: u64,
}

/// The move-selection engine.
///
/// Stateless between invocations: the board is supplied fresh on every call
/// and nothing about a game is retained. One engine value can therefore serve
/// concurrent games, as long as each call gets its own board.
pub struct Engine {
    config: EngineConfig,
    tactics: Vec<Box<dyn Tactic>>,
}

impl Engine {
    /// Engine with default configuration and the standard tactic cascade.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Engine with a custom configuration and the standard tactic cascade.
    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            config,
            tactics: Self::default_tactics(),
        }
    }

    /// Engine with a custom probe cascade. Probes run in list order, before
    /// the search stage.
    #[must_use]
    pub fn with_tactics(config: EngineConfig, tactics: Vec<Box<dyn Tactic>>) -> Self {
        Self { config, tactics }
    }

    /// The standard cascade: win, block win, fork, block fork.
    #[must_use]
    pub fn default_tactics() -> Vec<Box<dyn Tactic>> {
        vec![
            Box::new(WinNow),
            Box::new(BlockWin),
            Box::new(OwnFork),
            Box::new(BlockFork),
        ]
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Select the best move for `color` on `board`.
    ///
    /// Never fails on a legal, non-terminal board; a deadline overrun
    /// degrades move quality, not the result. A full board yields
    /// [`EngineError::NoLegalMove`], which the caller treats as
    /// end-of-game.
    pub fn select(&self, board: &Board, color: Stone) -> Result<MoveResult, EngineError> {
        let start = Instant::now();

        if is_full(board) {
            return Err(EngineError::NoLegalMove);
        }
        if board.is_board_empty() {
            return Ok(self.result(CENTER, 0, SearchKind::Opening, start, 0));
        }

        // One scratch buffer for the whole invocation; probes and search
        // mutate it in place and restore it
        let mut scratch = board.clone();

        for tactic in &self.tactics {
            if let Some(pos) = tactic.probe(&mut scratch, color) {
                log::debug!("tactic {} fires at {:?}", tactic.name(), pos);
                return Ok(self.result(pos, 0, SearchKind::Tactic(tactic.name()), start, 0));
            }
        }

        let deadline = start + Duration::from_millis(self.config.search.time_budget_ms);
        let mut searcher = Searcher::new(self.config.search.clone(), self.config.weights.clone());
        let outcome = if self.config.search.threads == 1 {
            searcher.search_best(&mut scratch, color, Some(deadline))
        } else {
            searcher.search_best_parallel(&scratch, color, Some(deadline))
        };

        if let Some(best) = outcome.best_move {
            return Ok(self.result(best, outcome.score, SearchKind::AlphaBeta, start, outcome.nodes));
        }

        // Deadline expired before any candidate finished: fall back to the
        // top quick-heuristic candidate. Non-full boards always yield at
        // least one candidate.
        let fallback = candidate_moves(&mut scratch, &self.config.weights)
            .first()
            .copied()
            .ok_or(EngineError::NoLegalMove)?;
        log::debug!("deadline fallback at {fallback:?}");
        Ok(self.result(fallback, 0, SearchKind::Fallback, start, outcome.nodes))
    }

    /// Convenience wrapper returning just the move.
    pub fn choose(&self, board: &Board, color: Stone) -> Result<Pos, EngineError> {
        self.select(board, color).map(|result| result.best_move)
    }

    fn result(
        &self,
        best_move: Pos,
        score: i32,
        kind: SearchKind,
        start: Instant,
        nodes: u64,
    ) -> MoveResult {
        MoveResult {
            best_move,
            score,
            kind,
            time_ms: start.elapsed().as_millis() as u64,
            nodes,
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
