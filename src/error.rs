//! Error types for move validation and statistics persistence.

use tracing::instrument;

/// Error that can occur when validating or applying a move.
///
/// Move errors are recovered locally by the caller re-prompting;
/// they are never fatal to a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The position is outside the board (must be 0-8).
    #[display("position {_0} is out of range (must be 0-8)")]
    OutOfRange(usize),

    /// The square at the position is already occupied.
    #[display("position {_0} is already occupied")]
    Occupied(usize),

    /// The game has already reached a terminal state.
    #[display("game is already over")]
    GameOver,

    /// The move was attempted on the other player's turn.
    #[display("it is not that player's turn")]
    OutOfTurn,
}

impl std::error::Error for MoveError {}

/// Statistics persistence error with location tracking.
///
/// Load and save failures are never fatal to gameplay: a load failure
/// degrades to zeroed statistics, a save failure leaves the persisted
/// ledger stale until the next successful save.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("statistics error: {} at {}:{}", message, file, line)]
pub struct StatsError {
    /// Error message.
    pub message: String,
    /// Line number where the error occurred.
    pub line: u32,
    /// Source file where the error occurred.
    pub file: &'static str,
}

impl StatsError {
    /// Creates a new statistics error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<std::io::Error> for StatsError {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        Self::new(format!("io error: {}", err))
    }
}

impl From<serde_json::Error> for StatsError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        Self::new(format!("serialization error: {}", err))
    }
}
