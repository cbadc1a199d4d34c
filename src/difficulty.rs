//! Difficulty-tiered move selection.
//!
//! Each tier is a pure function of (board, searcher, random source), so
//! tests can inject a seeded generator and replay decisions exactly.

use crate::board::{Board, Player, Square};
use crate::search::Searcher;
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Probability that the Medium tier plays a uniformly random move
/// instead of consulting the search.
pub const MEDIUM_BLUNDER_CHANCE: f64 = 0.3;

/// Number of candidate positions (in board order) the Medium tier
/// evaluates when it does search.
///
/// A deliberate breadth limiter, not a performance shortcut: moves past
/// the cap are never considered, which is the tier's source of bounded
/// suboptimality.
pub const MEDIUM_BREADTH: usize = 5;

/// Engine skill level.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
pub enum Difficulty {
    /// Uniformly random play; never searches.
    Easy,
    /// Mostly searched play with a blunder chance and a breadth cap.
    Medium,
    /// Full search over every empty position; unbeatable.
    Hard,
}

/// Chooses the engine's move at the given difficulty.
///
/// Returns `None` only when no empty position exists.
#[instrument(skip(board, searcher, rng))]
pub fn choose_move<R: Rng>(
    difficulty: Difficulty,
    board: &mut Board,
    searcher: &mut Searcher,
    rng: &mut R,
) -> Option<usize> {
    let empty = board.empty_positions();
    if empty.is_empty() {
        return None;
    }

    match difficulty {
        Difficulty::Easy => empty.choose(rng).copied(),
        Difficulty::Medium => {
            if rng.random::<f64>() < MEDIUM_BLUNDER_CHANCE {
                return empty.choose(rng).copied();
            }
            let cap = empty.len().min(MEDIUM_BREADTH);
            pick_best(&empty[..cap], board, searcher)
        }
        Difficulty::Hard => searcher.best_move(board),
    }
}

/// Scores each candidate via the searcher and returns the first-found
/// maximum, mirroring the tie-break of [`Searcher::best_move`].
fn pick_best(candidates: &[usize], board: &mut Board, searcher: &mut Searcher) -> Option<usize> {
    let mut best: Option<(usize, i32)> = None;
    for &pos in candidates {
        board.set(pos, Square::Occupied(Player::Ai));
        let value = searcher.search(board, 0, false, i32::MIN, i32::MAX);
        board.retract(pos);
        if best.is_none_or(|(_, s)| value > s) {
            best = Some((pos, value));
        }
    }
    best.map(|(pos, _)| pos)
}
