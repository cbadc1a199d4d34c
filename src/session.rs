//! Turn-taking state machine: sequences human and engine moves, detects
//! terminal conditions, and records outcomes in the statistics store.

use crate::board::{Board, Player};
use crate::difficulty::{Difficulty, choose_move};
use crate::error::MoveError;
use crate::search::Searcher;
use crate::stats::{GameOutcome, GameRecord, GameStats, StatsStore};
use chrono::Utc;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, instrument, warn};

/// Whose turn it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    /// Waiting for a human move.
    Human,
    /// Waiting for an engine move.
    Ai,
}

/// One in-progress game plus the process-lifetime statistics store.
///
/// The session exclusively owns its board and search cache; both reset
/// between games while the store persists. Single-threaded by design —
/// concurrent games each need their own session over their own store.
#[derive(Debug)]
pub struct GameSession {
    board: Board,
    searcher: Searcher,
    store: StatsStore,
    difficulty: Difficulty,
    turn: Turn,
    outcome: Option<GameOutcome>,
    history: Vec<usize>,
    rng: StdRng,
}

impl GameSession {
    /// Creates a session and starts the first game.
    #[instrument(skip(store))]
    pub fn new(difficulty: Difficulty, human_first: bool, store: StatsStore) -> Self {
        Self::with_rng(difficulty, human_first, store, StdRng::from_os_rng())
    }

    /// Creates a session with an injected random source (seedable for
    /// deterministic tests).
    pub fn with_rng(
        difficulty: Difficulty,
        human_first: bool,
        store: StatsStore,
        rng: StdRng,
    ) -> Self {
        info!(%difficulty, human_first, "starting session");
        Self {
            board: Board::new(),
            searcher: Searcher::new(),
            store,
            difficulty,
            turn: if human_first { Turn::Human } else { Turn::Ai },
            outcome: None,
            history: Vec::new(),
            rng,
        }
    }

    /// Resets the board and search cache for a new game, preserving the
    /// statistics store.
    #[instrument(skip(self))]
    pub fn new_game(&mut self, difficulty: Difficulty, human_first: bool) {
        info!(%difficulty, human_first, "new game");
        self.board = Board::new();
        self.searcher.clear();
        self.difficulty = difficulty;
        self.turn = if human_first { Turn::Human } else { Turn::Ai };
        self.outcome = None;
        self.history.clear();
    }

    /// Applies a validated human move.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::GameOver`] once the game is terminal,
    /// [`MoveError::OutOfTurn`] on the engine's turn, and the placement
    /// errors of [`Board::place`] otherwise. All are recoverable by
    /// re-prompting.
    #[instrument(skip(self))]
    pub fn place_human_move(&mut self, pos: usize) -> Result<(), MoveError> {
        if self.outcome.is_some() {
            return Err(MoveError::GameOver);
        }
        if self.turn != Turn::Human {
            return Err(MoveError::OutOfTurn);
        }

        self.board.place(pos, Player::Human)?;
        self.history.push(pos);
        debug!(position = pos, "human moved");

        if self.board.is_winner(Player::Human) {
            self.finish(GameOutcome::HumanWin);
        } else if self.board.is_full() {
            self.finish(GameOutcome::Draw);
        } else {
            self.turn = Turn::Ai;
        }
        Ok(())
    }

    /// Runs one engine turn and returns the chosen position.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::GameOver`] once the game is terminal and
    /// [`MoveError::OutOfTurn`] on the human's turn.
    #[instrument(skip(self))]
    pub fn run_ai_turn(&mut self) -> Result<usize, MoveError> {
        if self.outcome.is_some() {
            return Err(MoveError::GameOver);
        }
        if self.turn != Turn::Ai {
            return Err(MoveError::OutOfTurn);
        }

        // A non-terminal board always has an empty position.
        let pos = choose_move(
            self.difficulty,
            &mut self.board,
            &mut self.searcher,
            &mut self.rng,
        )
        .ok_or(MoveError::GameOver)?;

        self.board.place(pos, Player::Ai)?;
        self.history.push(pos);
        debug!(position = pos, "engine moved");

        if self.board.is_winner(Player::Ai) {
            self.finish(GameOutcome::AiWin);
        } else if self.board.is_full() {
            self.finish(GameOutcome::Draw);
        } else {
            self.turn = Turn::Human;
        }
        Ok(pos)
    }

    /// Records the terminal outcome. A persistence failure is surfaced
    /// as a diagnostic and never aborts gameplay.
    fn finish(&mut self, outcome: GameOutcome) {
        info!(%outcome, moves = self.history.len(), "game over");
        self.outcome = Some(outcome);

        let record = GameRecord::new(
            outcome,
            Utc::now(),
            self.history.len() as u32,
            self.difficulty,
        );
        if let Err(err) = self.store.record(record) {
            warn!(error = %err, "failed to persist statistics");
        }
    }

    /// Returns the outcome once the game is terminal.
    pub fn is_terminal(&self) -> Option<GameOutcome> {
        self.outcome
    }

    /// Returns the aggregate statistics.
    pub fn statistics(&self) -> &GameStats {
        self.store.stats()
    }

    /// Returns the current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns whose turn it is.
    pub fn turn(&self) -> Turn {
        self.turn
    }

    /// Returns the current game's difficulty.
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Number of moves played in the current game.
    pub fn move_count(&self) -> usize {
        self.history.len()
    }
}
