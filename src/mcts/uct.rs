//! Plain UCT tree
//!
//! Selection follows the UCT bound, backup credits only the edges actually
//! walked from the leaf to the root.

use crate::game::hex_game::HexEnvironment;
use crate::game::player::Player;
use crate::mcts::error::MctsError;
use crate::mcts::mcts_tree::MctsTree;
use crate::mcts::node::{NodeId, SearchNode};
use crate::mcts::rollout;
use crate::mcts::selection::{select_leaf, upper_confidence_bounds, SelectionResult};
use crate::mcts::tree::SearchTree;
use rand::rngs::StdRng;

#[derive(Debug, Clone)]
pub struct UctTree {
    tree: SearchTree,
    exploration: f64,
}

impl UctTree {
    pub fn new(root: SearchNode, exploration: f64) -> Self {
        UctTree {
            tree: SearchTree::new(root),
            exploration,
        }
    }

    /// UCT scores of a node's actions for display, without exploration
    pub fn exploitation_scores(&self, node: NodeId) -> Vec<f64> {
        upper_confidence_bounds(&self.tree.get(node).stats, 0.0)
    }
}

impl MctsTree for UctTree {
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
        Ok(outcome.winner)
    }

    fn backup(&mut self, leaf: NodeId, winner: Player) {
        for (parent, action) in self.tree.path_to_root(leaf) {
            let node = self.tree.get_mut(parent);
            let won = node.active_player == winner;
            node.stats.record(action, won);
        }
    }

    fn tree(&self) -> &SearchTree {
        &self.tree
    }
}
