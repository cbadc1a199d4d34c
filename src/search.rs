//! Exact minimax search with alpha-beta pruning and a transposition cache.
//!
//! The full remaining game tree is at most 9 ply, so the search is exact
//! and always terminates; no depth cutoff heuristic is needed. Trial moves
//! are placed and retracted on a shared mutable board rather than cloning
//! per branch.

use crate::board::{Board, Player, Square};
use std::collections::HashMap;
use tracing::{debug, instrument};

/// Score for a won position before depth adjustment.
pub const WIN_SCORE: i32 = 10;

/// Minimax searcher with a per-game transposition cache.
///
/// The cache is keyed by board content alone ([`Board::key`]). This is
/// sound for win/lose/draw classification because turn parity is fully
/// determined by mark counts, so a given board always implies the same
/// player to move. Cached scores carry the depth adjustment from the
/// branch that first computed them, which can bias the tie-break among
/// equally decisive moves; the classification itself is never affected.
///
/// A searcher must never be shared across different boards or across a
/// board reset: call [`Searcher::clear`] whenever the game restarts.
#[derive(Debug, Clone, Default)]
pub struct Searcher {
    cache: HashMap<u16, i32>,
}

impl Searcher {
    /// Creates a searcher with an empty cache.
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
        }
    }

    /// Clears the transposition cache. Must be called on board reset.
    pub fn clear(&mut self) {
        self.cache.clear();
    }

    /// Number of positions currently held in the cache.
    pub fn cached_positions(&self) -> usize {
        self.cache.len()
    }

    /// Classifies a terminal candidate: +10 if the engine has a line,
    /// -10 if the human does, 0 otherwise.
    ///
    /// At most one side can have a line on any reachable board.
    pub fn evaluate(board: &Board) -> i32 {
        if board.is_winner(Player::Ai) {
            WIN_SCORE
        } else if board.is_winner(Player::Human) {
            -WIN_SCORE
        } else {
            0
        }
    }

    /// Recursive minimax with alpha-beta pruning.
    ///
    /// `maximizing` is true when the engine is to move. Depth-adjusted
    /// terminal scores (`10 - depth`, `-10 + depth`) make the engine
    /// prefer the fastest win and the slowest loss. The board is restored
    /// to its pre-call state before returning.
    pub fn search(
        &mut self,
        board: &mut Board,
        depth: i32,
        maximizing: bool,
        mut alpha: i32,
        mut beta: i32,
    ) -> i32 {
        // Terminal base cases come before the cache.
        let score = Self::evaluate(board);
        if score == WIN_SCORE {
            return score - depth;
        }
        if score == -WIN_SCORE {
            return score + depth;
        }
        if board.is_full() {
            return 0;
        }

        let key = board.key();
        if let Some(&cached) = self.cache.get(&key) {
            return cached;
        }

        let best = if maximizing {
            let mut best = i32::MIN;
            for pos in board.empty_positions() {
                board.set(pos, Square::Occupied(Player::Ai));
                let value = self.search(board, depth + 1, false, alpha, beta);
                board.retract(pos);
                best = best.max(value);
                alpha = alpha.max(best);
                if beta <= alpha {
                    break;
                }
            }
            best
        } else {
            let mut best = i32::MAX;
            for pos in board.empty_positions() {
                board.set(pos, Square::Occupied(Player::Human));
                let value = self.search(board, depth + 1, true, alpha, beta);
                board.retract(pos);
                best = best.min(value);
                beta = beta.min(best);
                if beta <= alpha {
                    break;
                }
            }
            best
        };

        self.cache.insert(key, best);
        best
    }

    /// Returns the engine's best move, or `None` on a full board.
    ///
    /// Tries every empty position in board order and keeps the strict
    /// maximum, so the first-found move wins ties — consistent with the
    /// move-generation order of [`Board::empty_positions`].
    #[instrument(skip(self, board))]
    pub fn best_move(&mut self, board: &mut Board) -> Option<usize> {
        let mut best: Option<(usize, i32)> = None;
        for pos in board.empty_positions() {
            board.set(pos, Square::Occupied(Player::Ai));
            let value = self.search(board, 0, false, i32::MIN, i32::MAX);
            board.retract(pos);
            if best.is_none_or(|(_, s)| value > s) {
                best = Some((pos, value));
            }
        }
        if let Some((pos, value)) = best {
            debug!(position = pos, value, "best move selected");
        }
        best.map(|(pos, _)| pos)
    }
}
