//! Tic-tac-toe engine with an exact minimax AI and persistent statistics.
//!
//! # Architecture
//!
//! - **Board**: the 3x3 grid, turn parity, and terminal checks
//! - **Searcher**: minimax with alpha-beta pruning and a per-game
//!   transposition cache
//! - **Difficulty**: three skill tiers trading optimality for variability
//! - **StatsStore**: append-only outcome ledger with derived aggregates,
//!   durable across runs
//! - **GameSession**: the turn-taking state machine tying them together
//!
//! The crate is presentation-agnostic: rendering, input loops, and menu
//! flow belong to the caller.
//!
//! # Example
//!
//! ```no_run
//! use tictactoe_ai::{Difficulty, GameSession, StatsStore};
//!
//! # fn example() -> Result<(), tictactoe_ai::MoveError> {
//! let store = StatsStore::load("game_stats.json");
//! let mut session = GameSession::new(Difficulty::Hard, true, store);
//!
//! session.place_human_move(4)?;
//! let reply = session.run_ai_turn()?;
//! println!("engine played {reply}\n{}", session.board());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod board;
mod difficulty;
mod error;
mod search;
mod session;
mod stats;

pub use board::{Board, Player, Square};
pub use difficulty::{Difficulty, MEDIUM_BLUNDER_CHANCE, MEDIUM_BREADTH, choose_move};
pub use error::{MoveError, StatsError};
pub use search::{Searcher, WIN_SCORE};
pub use session::{GameSession, Turn};
pub use stats::{GameOutcome, GameRecord, GameStats, StatsStore};
