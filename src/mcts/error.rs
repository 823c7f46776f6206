//! Search error types

use crate::game::error::GameError;
use thiserror::Error;

/// Errors raised while building or searching a tree.
///
/// None of them aborts a decision on its own: the driver logs and skips the
/// iteration that produced it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MctsError {
    #[error("Action index {action} is out of range for {len} valid actions")]
    ActionOutOfRange { action: usize, len: usize },

    #[error("Statistics hold {actual} slots but the node has {expected} valid actions")]
    StatisticsMismatch { expected: usize, actual: usize },

    #[error("Action {action} records {wins} wins for only {visits} visits")]
    WinsExceedVisits { action: usize, wins: u32, visits: u32 },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Game error: {0}")]
    Game(#[from] GameError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mcts_error_display() {
        let err = MctsError::ActionOutOfRange { action: 7, len: 3 };
        assert!(format!("{}", err).contains("Action index 7"));

        let err = MctsError::StatisticsMismatch {
            expected: 4,
            actual: 5,
        };
        assert!(format!("{}", err).contains("5 slots"));

        let err = MctsError::WinsExceedVisits {
            action: 2,
            wins: 3,
            visits: 1,
        };
        assert!(format!("{}", err).contains("3 wins for only 1 visits"));

        let err = MctsError::InvalidConfig("workers must be positive".to_string());
        assert!(format!("{}", err).contains("Invalid configuration"));

        let err: MctsError = GameError::CellOccupied { row: 1, col: 1 }.into();
        assert!(format!("{}", err).contains("already occupied"));
    }
}
