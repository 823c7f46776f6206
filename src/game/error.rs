//! Game rule errors

use thiserror::Error;

/// Errors raised by the Hex rules engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("Cell ({row},{col}) is outside a {size}x{size} board")]
    CellOutOfBounds { row: usize, col: usize, size: usize },

    #[error("Cell ({row},{col}) is already occupied")]
    CellOccupied { row: usize, col: usize },
}
