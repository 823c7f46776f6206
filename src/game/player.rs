use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two Hex players.
///
/// `Player1` connects the top row to the bottom row, `Player2` connects the
/// left column to the right column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    Player1,
    Player2,
}

impl Player {
    pub fn opponent(self) -> Player {
        match self {
            Player::Player1 => Player::Player2,
            Player::Player2 => Player::Player1,
        }
    }

    /// Index usable for per-player arrays
    pub fn index(self) -> usize {
        match self {
            Player::Player1 => 0,
            Player::Player2 => 1,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Player1 => write!(f, "PLAYER_1"),
            Player::Player2 => write!(f, "PLAYER_2"),
        }
    }
}
