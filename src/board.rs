//! Core domain types: players, squares, and the 3x3 board.

use crate::error::MoveError;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Player in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    /// The human player (marks render as X).
    Human,
    /// The engine player (marks render as O).
    Ai,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::Human => Player::Ai,
            Player::Ai => Player::Human,
        }
    }
}

/// A square on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    Empty,
    /// Square occupied by a player.
    Occupied(Player),
}

/// The 8 winning lines: 3 rows, 3 columns, 2 diagonals.
const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// 3x3 tic-tac-toe board.
///
/// Squares are indexed 0-8 in row-major order. Turn parity is fully
/// determined by mark counts (#Human - #Ai is always 0 or 1), which is
/// what lets the search cache key on board content alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// Squares in row-major order (0-8).
    squares: [Square; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; 9],
        }
    }

    /// Gets the square at the given position (0-8).
    pub fn get(&self, pos: usize) -> Option<Square> {
        self.squares.get(pos).copied()
    }

    /// Checks if a square is empty.
    pub fn is_empty(&self, pos: usize) -> bool {
        matches!(self.get(pos), Some(Square::Empty))
    }

    /// Sets a square without validation. Callers guarantee `pos < 9`.
    pub(crate) fn set(&mut self, pos: usize, square: Square) {
        self.squares[pos] = square;
    }

    /// Places a player's mark at the given position.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::OutOfRange`] if `pos > 8` and
    /// [`MoveError::Occupied`] if the square already holds a mark.
    #[instrument(skip(self))]
    pub fn place(&mut self, pos: usize, player: Player) -> Result<(), MoveError> {
        match self.get(pos) {
            None => Err(MoveError::OutOfRange(pos)),
            Some(Square::Occupied(_)) => Err(MoveError::Occupied(pos)),
            Some(Square::Empty) => {
                self.set(pos, Square::Occupied(player));
                Ok(())
            }
        }
    }

    /// Clears the square at the given position.
    ///
    /// Used by the searcher to undo trial moves; never fails on a
    /// valid position.
    pub fn retract(&mut self, pos: usize) {
        self.set(pos, Square::Empty);
    }

    /// Checks whether the given player has completed a line.
    pub fn is_winner(&self, player: Player) -> bool {
        LINES.iter().any(|line| {
            line.iter()
                .all(|&i| self.squares[i] == Square::Occupied(player))
        })
    }

    /// Checks for a winner on the board.
    pub fn winner(&self) -> Option<Player> {
        for [a, b, c] in LINES {
            let occ = self.squares[a];
            if occ != Square::Empty && occ == self.squares[b] && occ == self.squares[c] {
                return match occ {
                    Square::Occupied(p) => Some(p),
                    Square::Empty => None,
                };
            }
        }
        None
    }

    /// Checks if the board is full.
    pub fn is_full(&self) -> bool {
        self.squares.iter().all(|s| *s != Square::Empty)
    }

    /// Returns the empty positions in board order (0..8).
    ///
    /// This is the search's move-generation order: first-found wins
    /// ties among equally valued moves.
    pub fn empty_positions(&self) -> Vec<usize> {
        (0..9).filter(|&i| self.is_empty(i)).collect()
    }

    /// Deterministic encoding of all 9 squares for the search cache.
    ///
    /// Base-3 packing: 3^9 = 19683 distinct boards fit in a `u16`.
    pub fn key(&self) -> u16 {
        self.squares.iter().fold(0u16, |acc, s| {
            acc * 3
                + match s {
                    Square::Empty => 0,
                    Square::Occupied(Player::Human) => 1,
                    Square::Occupied(Player::Ai) => 2,
                }
        })
    }

    /// Returns all squares as a slice.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..3 {
            for col in 0..3 {
                let pos = row * 3 + col;
                let symbol = match self.squares[pos] {
                    Square::Empty => pos.to_string(),
                    Square::Occupied(Player::Human) => "X".to_string(),
                    Square::Occupied(Player::Ai) => "O".to_string(),
                };
                write!(f, "{}", symbol)?;
                if col < 2 {
                    write!(f, "|")?;
                }
            }
            if row < 2 {
                writeln!(f, "\n-+-+-")?;
            }
        }
        Ok(())
    }
}
