//! All-Moves-As-First tree
//!
//! Selection and expansion are those of UCT. Backup additionally credits, at
//! every ancestor, each sibling action whose cell the ancestor's player ended
//! up occupying somewhere in the simulation, in the tree part or the rollout.

use crate::game::hex_game::HexEnvironment;
use crate::game::player::Player;
use crate::mcts::error::MctsError;
use crate::mcts::mcts_tree::MctsTree;
use crate::mcts::node::{NodeId, SearchNode};
use crate::mcts::rollout::{self, PlayerMoves};
use crate::mcts::selection::{select_leaf, upper_confidence_bounds, SelectionResult};
use crate::mcts::tree::SearchTree;
use rand::rngs::StdRng;

#[derive(Debug, Clone)]
pub struct AmafTree {
    tree: SearchTree,
    exploration: f64,
    simulation_moves: PlayerMoves,
}

impl AmafTree {
    pub fn new(root: SearchNode, exploration: f64) -> Self {
        AmafTree {
            tree: SearchTree::new(root),
            exploration,
            simulation_moves: PlayerMoves::default(),
        }
    }

    /// Rollout moves of the pending simulation, consumed by the next backup
    pub fn simulation_moves_mut(&mut self) -> &mut PlayerMoves {
        &mut self.simulation_moves
    }
}

impl MctsTree for AmafTree {
    fn select(&self, rng: &mut StdRng) -> SelectionResult {
        select_leaf(&self.tree, rng, |_, node| {
            upper_confidence_bounds(&node.stats, self.exploration)
        })
    }

    fn expand(
        &mut self,
        env: &mut dyn HexEnvironment,
        node: NodeId,
        action: Option<usize>,
    ) -> Result<NodeId, MctsError> {
        self.tree.expand(env, node, action)
    }

    fn simulate(
        &mut self,
        env: &mut dyn HexEnvironment,
        node: NodeId,
        rng: &mut StdRng,
    ) -> Result<Player, MctsError> {
        let outcome = rollout::simulate_leaf(env, self.tree.get(node), rng)?;
        self.simulation_moves = outcome.moves;
        Ok(outcome.winner)
    }

    fn backup(&mut self, leaf: NodeId, winner: Player) {
        let rollout = std::mem::take(&mut self.simulation_moves);
        let played = self.tree.played_cells(leaf, rollout);

        for (parent, action) in self.tree.path_to_root(leaf) {
            let node = self.tree.get_mut(parent);
            let won = node.active_player == winner;
            node.stats.record(action, won);

            let own_moves = &played[node.active_player.index()];
            let credited: Vec<usize> = node
                .valid_actions
                .iter()
                .enumerate()
                .filter(|&(i, cell)| i != action && own_moves.contains(cell))
                .map(|(i, _)| i)
                .collect();
            for i in credited {
                node.stats.record(i, won);
            }
        }
    }

    fn tree(&self) -> &SearchTree {
        &self.tree
    }
}
