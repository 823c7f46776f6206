//! Bridge-aware random rollout shared by every tree variant
//!
//! Simulation fills every empty cell of the board in a shuffled order,
//! alternating players. Whenever a stone intrudes into one of the opponent's
//! bridges, the opponent immediately answers in the other carrier cell and the
//! intruder keeps the move. Once the board is full the winner is read from the
//! first row: Hex has no draws, so if player 1 has no connection player 2 has.

use crate::game::board::Board;
use crate::game::cell::Cell;
use crate::game::hex_game::HexEnvironment;
use crate::game::player::Player;
use crate::mcts::error::MctsError;
use crate::mcts::node::SearchNode;
use crate::strategy::bridge_pattern::get_possible_opponent_bridge_nodes;
use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;
use std::collections::HashSet;

/// Cells each player occupied during one simulation, in play order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerMoves {
    moves: [Vec<Cell>; 2],
}

impl PlayerMoves {
    pub fn record(&mut self, player: Player, cell: Cell) {
        self.moves[player.index()].push(cell);
    }

    pub fn get(&self, player: Player) -> &[Cell] {
        &self.moves[player.index()]
    }

    /// Membership set for one player, for repeated lookups
    pub fn cells_of(&self, player: Player) -> HashSet<Cell> {
        self.moves[player.index()].iter().copied().collect()
    }

    pub fn clear(&mut self) {
        for moves in &mut self.moves {
            moves.clear();
        }
    }

    pub fn is_empty(&self) -> bool {
        self.moves.iter().all(Vec::is_empty)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RolloutOutcome {
    pub winner: Player,
    pub moves: PlayerMoves,
}

/// Plays the position out to a full board.
///
/// # Arguments
/// * `env` - Scratch environment, reset to the given state before use
/// * `state` - Board to start from (left untouched)
/// * `active_player` - Player to move first
/// * `rng` - Source for the move order and bridge answers
///
/// # Returns
/// The winner of the filled board and the cells each player took
pub fn simulate<R: Rng + ?Sized>(
    env: &mut dyn HexEnvironment,
    state: &Board,
    active_player: Player,
    rng: &mut R,
) -> Result<RolloutOutcome, MctsError> {
    env.reset(state, active_player, None);

    let mut candidates = env.valid_actions();
    candidates.shuffle(rng);

    let mut board = env.board().clone();
    let mut already_played: HashSet<Cell> = HashSet::new();
    let mut moves = PlayerMoves::default();
    let mut player = active_player;

    for cell in candidates {
        if already_played.contains(&cell) {
            continue;
        }

        board.set(cell, player)?;
        moves.record(player, cell);

        let opponent = player.opponent();
        let answers = get_possible_opponent_bridge_nodes(opponent, &board, cell);
        match answers.choose(rng) {
            Some(&answer) => {
                board.set(answer, opponent)?;
                already_played.insert(answer);
                moves.record(opponent, answer);
            }
            None => player = opponent,
        }
    }

    let player1_wins = board
        .row_cells(0)
        .into_iter()
        .filter(|&cell| board.player_at(cell) == Some(Player::Player1))
        .any(|cell| !env.find_winner_path(&board, cell, Player::Player1).is_empty());

    let winner = if player1_wins {
        Player::Player1
    } else {
        Player::Player2
    };

    Ok(RolloutOutcome { winner, moves })
}

/// Outcome of the simulation phase for a tree node.
///
/// A decided node reports its winner without playing anything, otherwise its
/// state is played out with [`simulate`].
pub fn simulate_leaf<R: Rng + ?Sized>(
    env: &mut dyn HexEnvironment,
    leaf: &SearchNode,
    rng: &mut R,
) -> Result<RolloutOutcome, MctsError> {
    match leaf.winner {
        Some(winner) => Ok(RolloutOutcome {
            winner,
            moves: PlayerMoves::default(),
        }),
        None => simulate(env, &leaf.state, leaf.active_player, rng),
    }
}
