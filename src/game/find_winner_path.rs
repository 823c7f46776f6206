use crate::game::board::Board;
use crate::game::cell::Cell;
use crate::game::player::Player;
use std::collections::{HashMap, VecDeque};

/// Returns true if the cell lies on the edge the player starts connecting from
pub fn is_start_edge(player: Player, cell: Cell) -> bool {
    match player {
        Player::Player1 => cell.row == 0,
        Player::Player2 => cell.col == 0,
    }
}

/// Returns true if the cell lies on the edge the player must reach
pub fn is_target_edge(player: Player, cell: Cell, size: usize) -> bool {
    match player {
        Player::Player1 => cell.row + 1 == size,
        Player::Player2 => cell.col + 1 == size,
    }
}

/// Breadth-first search for a connecting path of `player` stones.
///
/// The path starts at `start` (which must be owned by `player` and lie on the
/// player's start edge) and ends on the opposite edge. An empty vector means
/// no win goes through `start`.
pub fn find_winner_path(board: &Board, start: Cell, player: Player) -> Vec<Cell> {
    if board.player_at(start) != Some(player) || !is_start_edge(player, start) {
        return Vec::new();
    }

    let size = board.size();
    let mut predecessors: HashMap<Cell, Option<Cell>> = HashMap::new();
    let mut queue = VecDeque::new();
    predecessors.insert(start, None);
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        if is_target_edge(player, current, size) {
            let mut path = vec![current];
            let mut cursor = current;
            while let Some(Some(previous)) = predecessors.get(&cursor) {
                path.push(*previous);
                cursor = *previous;
            }
            path.reverse();
            return path;
        }

        for neighbor in board.neighbors(current) {
            if board.player_at(neighbor) == Some(player) && !predecessors.contains_key(&neighbor) {
                predecessors.insert(neighbor, Some(current));
                queue.push_back(neighbor);
            }
        }
    }

    Vec::new()
}

/// Returns true if `player` has any connection between their two edges
pub fn has_winning_path(board: &Board, player: Player) -> bool {
    let size = board.size();
    (0..size)
        .map(|i| match player {
            Player::Player1 => Cell::new(0, i),
            Player::Player2 => Cell::new(i, 0),
        })
        .any(|start| !find_winner_path(board, start, player).is_empty())
}
