//! Bridge pattern detection used by the rollout policy
//!
//! A bridge is two stones of the same player that are not adjacent but share
//! exactly two empty neighbours (the carrier). If the other player occupies
//! one carrier cell, the bridge owner keeps the connection by answering in the
//! second one. Rollouts always play that answer, which keeps simulated games
//! closer to real Hex play.

use crate::game::board::Board;
use crate::game::cell::Cell;
use crate::game::player::Player;

/// Cells adjacent to both `a` and `b`
fn common_neighbors(board: &Board, a: Cell, b: Cell) -> Vec<Cell> {
    board
        .neighbors(a)
        .filter(|&n| board.is_adjacent(n, b))
        .collect()
}

/// Returns the cells `opponent` should occupy to save a bridge that the stone
/// on `just_played` intruded.
///
/// # Arguments
/// * `opponent` - Owner of the bridges to check
/// * `board` - Board after `just_played` has been occupied
/// * `just_played` - The intruding cell
///
/// # Returns
/// The free carrier cells, deduplicated, or an empty vector if no bridge is threatened
pub fn get_possible_opponent_bridge_nodes(
    opponent: Player,
    board: &Board,
    just_played: Cell,
) -> Vec<Cell> {
    if !board.contains(just_played.row, just_played.col) {
        return Vec::new();
    }

    let owned: Vec<Cell> = board
        .neighbors(just_played)
        .filter(|&n| board.player_at(n) == Some(opponent))
        .collect();

    let mut responses = Vec::new();
    for (i, &a) in owned.iter().enumerate() {
        for &b in &owned[i + 1..] {
            if board.is_adjacent(a, b) {
                continue;
            }

            let carrier = common_neighbors(board, a, b);
            if carrier.len() != 2 {
                continue;
            }

            for cell in carrier {
                if cell != just_played && board.is_empty_cell(cell) && !responses.contains(&cell) {
                    responses.push(cell);
                }
            }
        }
    }

    responses
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::board::create_board_empty;

    fn board_with_bridge() -> Board {
        // (1,1) and (2,2) form a bridge carried by (1,2) and (2,1)
        let mut board = create_board_empty(5);
        board.set(Cell::new(1, 1), Player::Player2).unwrap();
        board.set(Cell::new(2, 2), Player::Player2).unwrap();
        board
    }

    #[test]
    fn test_intrusion_returns_other_carrier() {
        let mut board = board_with_bridge();
        board.set(Cell::new(1, 2), Player::Player1).unwrap();

        let responses = get_possible_opponent_bridge_nodes(Player::Player2, &board, Cell::new(1, 2));
        assert_eq!(responses, vec![Cell::new(2, 1)]);
    }

    #[test]
    fn test_no_response_when_other_carrier_taken() {
        let mut board = board_with_bridge();
        board.set(Cell::new(2, 1), Player::Player1).unwrap();
        board.set(Cell::new(1, 2), Player::Player1).unwrap();

        let responses = get_possible_opponent_bridge_nodes(Player::Player2, &board, Cell::new(1, 2));
        assert!(responses.is_empty());
    }

    #[test]
    fn test_own_bridge_is_not_reported_for_wrong_owner() {
        let mut board = board_with_bridge();
        board.set(Cell::new(1, 2), Player::Player1).unwrap();

        let responses = get_possible_opponent_bridge_nodes(Player::Player1, &board, Cell::new(1, 2));
        assert!(responses.is_empty());
    }

    #[test]
    fn test_opposite_stones_are_not_a_bridge() {
        // (1,2) and (3,2) both touch (2,2) but share no second cell
        let mut board = create_board_empty(5);
        board.set(Cell::new(1, 2), Player::Player2).unwrap();
        board.set(Cell::new(3, 2), Player::Player2).unwrap();
        board.set(Cell::new(2, 2), Player::Player1).unwrap();

        let responses = get_possible_opponent_bridge_nodes(Player::Player2, &board, Cell::new(2, 2));
        assert!(responses.is_empty());
    }

    #[test]
    fn test_every_threatened_bridge_yields_a_response() {
        // (1,1), (2,2) and (3,0) pairwise form three bridges through (2,1)
        let mut board = create_board_empty(5);
        board.set(Cell::new(1, 1), Player::Player2).unwrap();
        board.set(Cell::new(2, 2), Player::Player2).unwrap();
        board.set(Cell::new(3, 0), Player::Player2).unwrap();
        board.set(Cell::new(2, 1), Player::Player1).unwrap();

        let mut responses = get_possible_opponent_bridge_nodes(Player::Player2, &board, Cell::new(2, 1));
        responses.sort();
        assert_eq!(
            responses,
            vec![Cell::new(1, 2), Cell::new(2, 0), Cell::new(3, 1)]
        );
    }

    #[test]
    fn test_out_of_bounds_cell_is_ignored() {
        let board = board_with_bridge();
        assert!(get_possible_opponent_bridge_nodes(Player::Player2, &board, Cell::new(9, 9)).is_empty());
    }
}
