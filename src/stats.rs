//! Game-outcome ledger and derived aggregate statistics.
//!
//! One global ledger per installation, persisted as a single JSON
//! document. Records are append-only; aggregates are recomputed on every
//! append and written back synchronously.

use crate::difficulty::Difficulty;
use crate::error::StatsError;
use chrono::{DateTime, Utc};
use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

/// Final result of a completed game.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
pub enum GameOutcome {
    /// The human player won.
    HumanWin,
    /// The engine won.
    AiWin,
    /// Neither side won.
    Draw,
}

/// A single completed game. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, new)]
pub struct GameRecord {
    outcome: GameOutcome,
    played_at: DateTime<Utc>,
    moves: u32,
    difficulty: Difficulty,
}

/// Aggregate statistics over the full ledger.
///
/// `average_moves` is the exact arithmetic mean of `moves` across all
/// records, recomputed whenever a record is appended.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Getters)]
pub struct GameStats {
    human_wins: u32,
    ai_wins: u32,
    draws: u32,
    total_games: u32,
    average_moves: f64,
    games: Vec<GameRecord>,
}

/// Persistent statistics store backed by a JSON file.
#[derive(Debug, Clone)]
pub struct StatsStore {
    path: PathBuf,
    stats: GameStats,
}

impl StatsStore {
    /// Opens the store at the given path, loading any prior ledger.
    ///
    /// A read or parse failure is non-fatal: it is surfaced as a
    /// diagnostic and the store degrades to zeroed statistics. A missing
    /// file is the quiet first-run case.
    #[instrument(skip(path))]
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let stats = match Self::read(&path) {
            Ok(stats) => {
                info!(path = %path.display(), games = stats.total_games, "statistics loaded");
                stats
            }
            Err(err) => {
                if path.exists() {
                    warn!(path = %path.display(), error = %err, "failed to load statistics, starting from defaults");
                } else {
                    debug!(path = %path.display(), "no statistics file yet");
                }
                GameStats::default()
            }
        };
        Self { path, stats }
    }

    fn read(path: &Path) -> Result<GameStats, StatsError> {
        let data = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }

    /// Appends a completed game, updates the aggregates, and persists
    /// the full ledger synchronously.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError`] if the save fails. The in-memory
    /// statistics are already updated in that case; the persisted ledger
    /// stays stale until the next successful save.
    #[instrument(skip(self), fields(outcome = %record.outcome, moves = record.moves))]
    pub fn record(&mut self, record: GameRecord) -> Result<(), StatsError> {
        match record.outcome {
            GameOutcome::HumanWin => self.stats.human_wins += 1,
            GameOutcome::AiWin => self.stats.ai_wins += 1,
            GameOutcome::Draw => self.stats.draws += 1,
        }
        self.stats.total_games += 1;
        self.stats.games.push(record);

        let total_moves: u64 = self.stats.games.iter().map(|g| g.moves as u64).sum();
        self.stats.average_moves = total_moves as f64 / self.stats.total_games as f64;

        debug!(total_games = self.stats.total_games, "game recorded");
        self.save()
    }

    /// Writes the full ledger to disk.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError`] on an io or serialization failure.
    #[instrument(skip(self))]
    pub fn save(&self) -> Result<(), StatsError> {
        let data = serde_json::to_string_pretty(&self.stats)?;
        fs::write(&self.path, data)?;
        Ok(())
    }

    /// Returns the current aggregate statistics.
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    /// Returns the ledger path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}
