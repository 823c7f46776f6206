use crate::game::cell::Cell;
use crate::game::error::GameError;
use crate::game::player::Player;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Hex neighbour offsets for the rhombic board layout
const NEIGHBOR_OFFSETS: [(isize, isize); 6] = [(-1, 0), (-1, 1), (0, -1), (0, 1), (1, -1), (1, 0)];

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    size: usize,
    cells: Vec<Option<Player>>,
}

pub fn create_board_empty(size: usize) -> Board {
    Board {
        size,
        cells: vec![None; size * size],
    }
}

impl Board {
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.size && col < self.size
    }

    /// Owner of the cell, `None` when empty or out of bounds
    pub fn player_at(&self, cell: Cell) -> Option<Player> {
        if !self.contains(cell.row, cell.col) {
            return None;
        }
        self.cells[cell.row * self.size + cell.col]
    }

    pub fn is_empty_cell(&self, cell: Cell) -> bool {
        self.contains(cell.row, cell.col) && self.player_at(cell).is_none()
    }

    /// Assigns a cell to a player without any rule checks besides bounds.
    pub fn set(&mut self, cell: Cell, player: Player) -> Result<(), GameError> {
        if !self.contains(cell.row, cell.col) {
            return Err(GameError::CellOutOfBounds {
                row: cell.row,
                col: cell.col,
                size: self.size,
            });
        }
        self.cells[cell.row * self.size + cell.col] = Some(player);
        Ok(())
    }

    /// Returns the in-bounds hex neighbours of a cell
    pub fn neighbors(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        NEIGHBOR_OFFSETS.iter().filter_map(move |&(dr, dc)| {
            let row = cell.row.checked_add_signed(dr)?;
            let col = cell.col.checked_add_signed(dc)?;
            self.contains(row, col).then_some(Cell::new(row, col))
        })
    }

    pub fn is_adjacent(&self, a: Cell, b: Cell) -> bool {
        self.neighbors(a).any(|n| n == b)
    }

    /// Returns all empty cells in row-major order.
    ///
    /// The ordering is stable for a fixed board, so statistics arrays built
    /// from it stay index-aligned across repeated reads.
    pub fn empty_cells(&self) -> Vec<Cell> {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(i, owner)| {
                if owner.is_none() {
                    Some(Cell::new(i / self.size, i % self.size))
                } else {
                    None
                }
            })
            .collect()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|owner| owner.is_some())
    }

    /// Cells of the given row, left to right
    pub fn row_cells(&self, row: usize) -> Vec<Cell> {
        if row >= self.size {
            return Vec::new();
        }
        (0..self.size).map(|col| Cell::new(row, col)).collect()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.size {
            write!(f, "{}", " ".repeat(row))?;
            for col in 0..self.size {
                let symbol = match self.player_at(Cell::new(row, col)) {
                    Some(Player::Player1) => 'X',
                    Some(Player::Player2) => 'O',
                    None => '.',
                };
                write!(f, "{} ", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
