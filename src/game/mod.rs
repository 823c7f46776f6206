pub mod board;
pub mod cell;
pub mod error;
pub mod find_winner_path;
pub mod hex_game;
pub mod player;

pub use board::{create_board_empty, Board};
pub use cell::Cell;
pub use error::GameError;
pub use hex_game::{HexEnvironment, HexGame};
pub use player::Player;
