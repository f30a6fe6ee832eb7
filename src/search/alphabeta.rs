//! Depth-limited minimax with alpha-beta pruning
//!
//! The controller iterates heuristic-ordered candidates with bounded
//! branching, mutates one board in place via place/undo pairs, and evaluates
//! leaves with the static evaluator. Immediate wins short-circuit with a
//! terminal score boosted by remaining depth, so faster wins are preferred.
//!
//! Time discipline: the wall-clock deadline is checked between top-level
//! candidates only, never deep inside the recursion. On overrun the
//! best-so-far result is returned with `timed_out` set; a caller that got no
//! completed candidate falls back to the top heuristic candidate.
//!
//! Root candidates are each searched with a full alpha-beta window. Within a
//! subtree the bounds propagate and prune normally; across root candidates
//! nothing is shared. That forfeits some root-level pruning but makes the
//! result independent of evaluation order: the parallel mode (one worker
//! per root candidate, independent board clones, no shared bound) returns
//! bit-for-bit the same move as the sequential mode.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use rayon::prelude::*;

use crate::board::{Board, Pos, Stone};
use crate::config::SearchConfig;
use crate::eval::{evaluate_board, EvalWeights};
use crate::rules::has_five_at;

use super::candidates::candidate_moves;

/// Terminal score for a forced win. Dominates any static evaluation sum.
pub const WIN_SCORE: i32 = 10_000_000;

/// Infinity for alpha-beta bounds
const INF: i32 = WIN_SCORE + 1_000;

/// Stone count at which adaptive depth adds a ply
const ADAPTIVE_DEPTH_STONES: u32 = 20;

/// Result of a root search.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Best move found, if any candidate completed
    pub best_move: Option<Pos>,
    /// Score of the best move
    pub score: i32,
    /// Depth searched
    pub depth: u8,
    /// Root candidates fully evaluated
    pub completed: usize,
    /// Interior nodes visited
    pub nodes: u64,
    /// Whether the deadline cut the root iteration short
    pub timed_out: bool,
}

/// Minimax search controller.
///
/// Holds the search knobs and the weight table; all board state is passed in
/// per call, so one `Searcher` can serve many games but a single search is
/// strictly call-scoped.
pub struct Searcher {
    config: SearchConfig,
    weights: EvalWeights,
    nodes: u64,
}

impl Searcher {
    #[must_use]
    pub fn new(config: SearchConfig, weights: EvalWeights) -> Self {
        Self {
            config,
            weights,
            nodes: 0,
        }
    }

    /// Depth for this position: the configured base, plus one ply late-game
    /// when adaptive depth is enabled.
    fn effective_depth(&self, board: &Board) -> u8 {
        if self.config.adaptive_depth && board.stone_count() >= ADAPTIVE_DEPTH_STONES {
            self.config.depth + 1
        } else {
            self.config.depth
        }
    }

    /// Search the root candidates sequentially.
    ///
    /// The deadline is checked before each candidate; candidates already
    /// started run to completion. The board is restored to its input state
    /// before returning.
    #[must_use]
    pub fn search_best(
        &mut self,
        board: &mut Board,
        color: Stone,
        deadline: Option<Instant>,
    ) -> SearchOutcome {
        self.nodes = 0;
        let depth = self.effective_depth(board);
        let opponent = color.opponent();

        let mut moves = candidate_moves(board, &self.weights);
        moves.truncate(self.config.root_breadth);

        let mut best_move = None;
        let mut best_score = -INF;
        let mut completed = 0;
        let mut timed_out = false;

        for &mov in &moves {
            if deadline.is_some_and(|d| Instant::now() >= d) {
                timed_out = true;
                break;
            }

            board.place_stone(mov, color);
            let wins_now = has_five_at(board, mov, color);
            let score = if wins_now {
                WIN_SCORE + i32::from(depth)
            } else {
                self.minimax(board, depth - 1, -INF, INF, false, color, opponent)
            };
            board.remove_stone(mov);

            completed += 1;
            if score > best_score {
                best_score = score;
                best_move = Some(mov);
            }
            if wins_now {
                // An immediate five scores WIN_SCORE + depth, strictly above
                // anything the recursion can return; nothing can beat it
                break;
            }
        }

        log::debug!(
            "search depth={depth} completed={completed}/{} nodes={} timed_out={timed_out}",
            moves.len(),
            self.nodes
        );

        SearchOutcome {
            best_move,
            score: best_score,
            depth,
            completed,
            nodes: self.nodes,
            timed_out,
        }
    }

    /// Root-split parallel search: one worker per root candidate, each on an
    /// independent board clone with a full window. No alpha/beta bound is
    /// shared across workers, so results equal the sequential mode exactly;
    /// a cooperative stop flag keeps the deadline binding.
    #[must_use]
    pub fn search_best_parallel(
        &self,
        board: &Board,
        color: Stone,
        deadline: Option<Instant>,
    ) -> SearchOutcome {
        let depth = self.effective_depth(board);
        let opponent = color.opponent();

        let mut moves = {
            let mut scratch = board.clone();
            candidate_moves(&mut scratch, &self.weights)
        };
        moves.truncate(self.config.root_breadth);

        let threads = if self.config.threads == 0 {
            num_cpus::get()
        } else {
            self.config.threads
        };
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .expect("failed to build search thread pool");

        let stop = AtomicBool::new(false);
        let results: Vec<Option<(usize, Pos, i32, u64)>> = pool.install(|| {
            moves
                .par_iter()
                .enumerate()
                .map(|(index, &mov)| {
                    if stop.load(Ordering::Relaxed) {
                        return None;
                    }
                    if deadline.is_some_and(|d| Instant::now() >= d) {
                        stop.store(true, Ordering::Relaxed);
                        return None;
                    }

                    let mut worker_board = board.clone();
                    let mut worker = Searcher::new(self.config.clone(), self.weights.clone());
                    worker_board.place_stone(mov, color);
                    // Peers are not stopped on a win: an immediate five is
                    // detected without recursing, and computing every
                    // candidate keeps the argmax identical to the
                    // sequential mode
                    let score = if has_five_at(&worker_board, mov, color) {
                        WIN_SCORE + i32::from(depth)
                    } else {
                        worker.minimax(&mut worker_board, depth - 1, -INF, INF, false, color, opponent)
                    };
                    Some((index, mov, score, worker.nodes))
                })
                .collect()
        });

        let mut best: Option<(usize, Pos, i32)> = None;
        let mut completed = 0;
        let mut nodes = 0;
        for (index, mov, score, worker_nodes) in results.into_iter().flatten() {
            completed += 1;
            nodes += worker_nodes;
            // Higher score wins; ties keep the better-ordered (lower) index
            let better = match best {
                None => true,
                Some((bi, _, bs)) => score > bs || (score == bs && index < bi),
            };
            if better {
                best = Some((index, mov, score));
            }
        }

        let timed_out = completed < moves.len();
        SearchOutcome {
            best_move: best.map(|(_, mov, _)| mov),
            score: best.map_or(-INF, |(_, _, score)| score),
            depth,
            completed,
            nodes,
            timed_out,
        }
    }

    /// Recursive minimax with alpha-beta pruning.
    ///
    /// The maximizing ply places `my_color`, the minimizing ply `opp_color`;
    /// every placement is undone before the loop continues. Wins found during
    /// expansion short-circuit with depth-boosted terminal scores.
    fn minimax(
        &mut self,
        board: &mut Board,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
        my_color: Stone,
        opp_color: Stone,
    ) -> i32 {
        self.nodes += 1;

        if depth == 0 {
            return evaluate_board(board, my_color, opp_color, &self.weights);
        }

        let mut moves = candidate_moves(board, &self.weights);
        if moves.is_empty() {
            return evaluate_board(board, my_color, opp_color, &self.weights);
        }
        moves.truncate(self.config.branch_breadth);

        if maximizing {
            let mut best = -INF;
            for &mov in &moves {
                board.place_stone(mov, my_color);
                let score = if has_five_at(board, mov, my_color) {
                    WIN_SCORE + i32::from(depth)
                } else {
                    self.minimax(board, depth - 1, alpha, beta, false, my_color, opp_color)
                };
                board.remove_stone(mov);

                best = best.max(score);
                alpha = alpha.max(score);
                if beta <= alpha {
                    break;
                }
            }
            best
        } else {
            let mut best = INF;
            for &mov in &moves {
                board.place_stone(mov, opp_color);
                let score = if has_five_at(board, mov, opp_color) {
                    -(WIN_SCORE + i32::from(depth))
                } else {
                    self.minimax(board, depth - 1, alpha, beta, true, my_color, opp_color)
                };
                board.remove_stone(mov);

                best = best.min(score);
                beta = beta.min(score);
                if beta <= alpha {
                    break;
                }
            }
            best
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};
    use std::time::Duration;

    fn searcher() -> Searcher {
        Searcher::new(SearchConfig::default(), EvalWeights::default())
    }

    fn board_hash(board: &Board) -> u64 {
        let mut hasher = DefaultHasher::new();
        board.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_finds_winning_extension() {
        let mut board = Board::new();
        for col in 3..7 {
            board.place_stone(Pos::new(7, col), Stone::Black);
        }

        let outcome = searcher().search_best(&mut board, Stone::Black, None);
        let best = outcome.best_move.unwrap();
        assert!(
            best == Pos::new(7, 2) || best == Pos::new(7, 7),
            "expected a five-completing move, got {best:?}"
        );
        assert!(outcome.score >= WIN_SCORE);
    }

    #[test]
    fn test_search_leaves_board_unchanged() {
        let mut board = Board::new();
        board.place_stone(Pos::new(7, 7), Stone::Black);
        board.place_stone(Pos::new(8, 8), Stone::White);
        board.place_stone(Pos::new(7, 8), Stone::Black);

        let before = board_hash(&board);
        let _ = searcher().search_best(&mut board, Stone::White, None);
        assert_eq!(board_hash(&board), before, "place/undo pairing violated");
    }

    #[test]
    fn test_search_reproducible() {
        let mut config = SearchConfig::default();
        config.depth = 2;
        config.root_breadth = 10;
        config.branch_breadth = 10;

        let mut board = Board::new();
        board.place_stone(Pos::new(7, 7), Stone::Black);
        board.place_stone(Pos::new(8, 8), Stone::White);
        board.place_stone(Pos::new(6, 6), Stone::Black);

        let first = Searcher::new(config.clone(), EvalWeights::default())
            .search_best(&mut board.clone(), Stone::White, None);
        let second = Searcher::new(config, EvalWeights::default())
            .search_best(&mut board, Stone::White, None);

        assert_eq!(first.best_move, second.best_move);
        assert_eq!(first.score, second.score);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let mut board = Board::new();
        board.place_stone(Pos::new(7, 7), Stone::Black);
        board.place_stone(Pos::new(7, 8), Stone::White);
        board.place_stone(Pos::new(8, 7), Stone::Black);
        board.place_stone(Pos::new(6, 6), Stone::White);

        let mut config = SearchConfig::default();
        config.depth = 2;

        let sequential = Searcher::new(config.clone(), EvalWeights::default())
            .search_best(&mut board.clone(), Stone::Black, None);

        config.threads = 4;
        let parallel = Searcher::new(config, EvalWeights::default())
            .search_best_parallel(&board, Stone::Black, None);

        assert_eq!(parallel.best_move, sequential.best_move);
        assert_eq!(parallel.score, sequential.score);
    }

    #[test]
    fn test_expired_deadline_reports_timeout() {
        let mut board = Board::new();
        board.place_stone(Pos::new(7, 7), Stone::Black);

        let past = Instant::now() - Duration::from_millis(10);
        let outcome = searcher().search_best(&mut board, Stone::White, Some(past));

        assert!(outcome.timed_out);
        assert_eq!(outcome.completed, 0);
        assert!(outcome.best_move.is_none());
    }

    #[test]
    fn test_prefers_faster_win() {
        // Black can win now at (7,7); depth-boosted terminal scores must
        // make the immediate win outrank wins seen deeper in the tree.
        let mut board = Board::new();
        for col in 3..7 {
            board.place_stone(Pos::new(7, col), Stone::Black);
        }
        for col in 3..6 {
            board.place_stone(Pos::new(9, col), Stone::White);
        }

        let outcome = searcher().search_best(&mut board, Stone::Black, None);
        let best = outcome.best_move.unwrap();
        assert!(
            best == Pos::new(7, 2) || best == Pos::new(7, 7),
            "expected the immediate win, got {best:?}"
        );
    }

    #[test]
    fn test_adaptive_depth_adds_ply_late_game() {
        let mut config = SearchConfig::default();
        config.adaptive_depth = true;
        let searcher = Searcher::new(config, EvalWeights::default());

        let mut board = Board::new();
        assert_eq!(searcher.effective_depth(&board), 3);

        let mut placed = 0;
        'outer: for r in (0..15u8).step_by(3) {
            for c in (0..15u8).step_by(2) {
                if placed >= 20 {
                    break 'outer;
                }
                let color = if placed % 2 == 0 { Stone::Black } else { Stone::White };
                board.place_stone(Pos::new(r, c), color);
                placed += 1;
            }
        }
        assert_eq!(searcher.effective_depth(&board), 4);
    }
}
