use crate::game::board::{create_board_empty, Board};
use crate::game::cell::Cell;
use crate::game::error::GameError;
use crate::game::find_winner_path::{find_winner_path, has_winning_path};
use crate::game::player::Player;

/// Rules collaborator consumed by the search engine.
///
/// The engine only reads snapshots through this trait and mutates a scratch
/// instance it owns. It never touches the caller's authoritative game.
pub trait HexEnvironment {
    /// Overwrites the working state with an arbitrary snapshot
    fn reset(&mut self, board: &Board, turn: Player, winner: Option<Player>);

    fn board(&self) -> &Board;

    fn turn(&self) -> Player;

    fn winner(&self) -> Option<Player>;

    /// Legal moves for the current state, in a stable order for a fixed board
    fn valid_actions(&self) -> Vec<Cell>;

    /// Assigns a cell to `player`, records a win if the move connects, and
    /// hands the turn to the opponent.
    fn make_move_on_board(&mut self, row: usize, col: usize, player: Player) -> Result<(), GameError>;

    /// Connecting path from `start`, empty when no win goes through it
    fn find_winner_path(&self, board: &Board, start: Cell, player: Player) -> Vec<Cell>;
}

/// Standard Hex rules on a square rhombic board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HexGame {
    board: Board,
    turn: Player,
    winner: Option<Player>,
}

impl HexGame {
    pub fn new(size: usize, first_player: Player) -> Self {
        HexGame {
            board: create_board_empty(size),
            turn: first_player,
            winner: None,
        }
    }

    pub fn from_state(board: Board, turn: Player, winner: Option<Player>) -> Self {
        HexGame {
            board,
            turn,
            winner,
        }
    }

    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }
}

impl HexEnvironment for HexGame {
    fn reset(&mut self, board: &Board, turn: Player, winner: Option<Player>) {
        self.board.clone_from(board);
        self.turn = turn;
        self.winner = winner;
    }

    fn board(&self) -> &Board {
        &self.board
    }

    fn turn(&self) -> Player {
        self.turn
    }

    fn winner(&self) -> Option<Player> {
        self.winner
    }

    fn valid_actions(&self) -> Vec<Cell> {
        self.board.empty_cells()
    }

    fn make_move_on_board(&mut self, row: usize, col: usize, player: Player) -> Result<(), GameError> {
        let cell = Cell::new(row, col);
        if !self.board.contains(row, col) {
            return Err(GameError::CellOutOfBounds {
                row,
                col,
                size: self.board.size(),
            });
        }
        if !self.board.is_empty_cell(cell) {
            return Err(GameError::CellOccupied { row, col });
        }

        self.board.set(cell, player)?;
        if self.winner.is_none() && has_winning_path(&self.board, player) {
            self.winner = Some(player);
        }
        self.turn = player.opponent();
        Ok(())
    }

    fn find_winner_path(&self, board: &Board, start: Cell, player: Player) -> Vec<Cell> {
        find_winner_path(board, start, player)
    }
}
