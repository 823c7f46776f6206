//! # Hex MCTS Library
//!
//! Monte Carlo Tree Search player for the board game Hex.
//!
//! ## Features
//!
//! - **Game Engine**: Hex board, move rules and edge-to-edge win detection
//! - **Search Engine**: time-budgeted MCTS with UCT, AMAF and RAVE trees
//! - **Rollouts**: random playouts that answer every intrusion into a bridge
//! - **Root Parallelization**: independent worker trees merged at the root
//!
//! ## Usage
//!
//! ```rust,no_run
//! use hex_mcts::{HexGame, MCTSHyperparameters, MctsAgent, Player};
//! use std::time::Duration;
//!
//! let game = HexGame::new(11, Player::Player1);
//! let mut agent = MctsAgent::new(MCTSHyperparameters::default(), game.clone())?;
//! let _chosen = agent.choose_move(&game, Duration::from_millis(500))?;
//! # Ok::<(), hex_mcts::HexMctsError>(())
//! ```

// ============================================================================
// PUBLIC API MODULES
// ============================================================================

/// Players that can be seated at a Hex board
pub mod agent;

/// Core game logic and rules
pub mod game;

/// Logger configuration
pub mod logging;

/// Monte Carlo Tree Search engine
pub mod mcts;

/// Hex-specific playout heuristics
pub mod strategy;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

pub use agent::{Agent, RandomAgent};
pub use game::{create_board_empty, Board, Cell, GameError, HexEnvironment, HexGame, Player};
pub use mcts::{
    create_mcts_tree, run_iteration, MCTSHyperparameters, MCTSResult, MctsAgent, MctsError,
    MctsTree, NodeId, NodeStatistics, NodeType, SearchNode,
};

// ============================================================================
// ERROR TYPES
// ============================================================================

/// Main error type for the Hex MCTS library
#[derive(Debug, thiserror::Error)]
pub enum HexMctsError {
    #[error("Game error: {0}")]
    Game(#[from] GameError),

    #[error("Search error: {0}")]
    Search(#[from] MctsError),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, HexMctsError>;

// ============================================================================
// LIBRARY VERSION INFO
// ============================================================================

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Library description
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
