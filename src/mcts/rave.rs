//! Rapid Action Value Estimation tree
//!
//! Each node keeps its regular UCT counters plus a second, AMAF-style set of
//! counters. Selection blends the two win rates with a weight
//! β = sqrt(k / (3n + k)) that fades as real visits `n` accumulate.

use crate::game::hex_game::HexEnvironment;
use crate::game::player::Player;
use crate::mcts::error::MctsError;
use crate::mcts::mcts_tree::MctsTree;
use crate::mcts::node::{NodeId, NodeStatistics, SearchNode};
use crate::mcts::rollout::{self, PlayerMoves};
use crate::mcts::selection::{select_leaf, SelectionResult};
use crate::mcts::tree::SearchTree;
use rand::rngs::StdRng;

#[derive(Debug, Clone)]
pub struct RaveTree {
    tree: SearchTree,
    exploration: f64,
    rave_k: f64,
    /// AMAF counters, indexed like the arena
    amaf: Vec<NodeStatistics>,
    simulation_moves: PlayerMoves,
}

/// Weight of the AMAF estimate for an action visited `visits` times
pub fn rave_beta(visits: u32, rave_k: f64) -> f64 {
    if rave_k <= 0.0 {
        return 0.0;
    }
    (rave_k / (3.0 * f64::from(visits) + rave_k)).sqrt()
}

/// Blended score of every action of a node.
///
/// Unvisited actions score `+inf`. An action without AMAF samples falls back
/// to its own win rate.
pub fn rave_scores(stats: &NodeStatistics, amaf: &NodeStatistics, c: f64, rave_k: f64) -> Vec<f64> {
    let total = stats.total_visits() as f64;
    (0..stats.len())
        .map(|i| {
            let visits = stats.visits()[i];
            if visits == 0 {
                return f64::INFINITY;
            }
            let q_uct = f64::from(stats.wins()[i]) / f64::from(visits);
            let q_amaf = amaf.win_rate(i).unwrap_or(q_uct);
            let beta = rave_beta(visits, rave_k);
            let exploration = c * (total.ln() / f64::from(visits)).sqrt();
            (1.0 - beta) * q_uct + beta * q_amaf + exploration
        })
        .collect()
}

impl RaveTree {
    pub fn new(root: SearchNode, exploration: f64, rave_k: f64) -> Self {
        let tree = SearchTree::new(root);
        let amaf = vec![NodeStatistics::new(tree.root().valid_actions.len())];
        RaveTree {
            tree,
            exploration,
            rave_k,
            amaf,
            simulation_moves: PlayerMoves::default(),
        }
    }

    pub fn amaf_statistics(&self, node: NodeId) -> &NodeStatistics {
        &self.amaf[node.0]
    }

    pub fn simulation_moves_mut(&mut self) -> &mut PlayerMoves {
        &mut self.simulation_moves
    }
}

impl MctsTree for RaveTree {
    fn select(&self, rng: &mut StdRng) -> SelectionResult {
        select_leaf(&self.tree, rng, |id, node| {
            rave_scores(&node.stats, &self.amaf[id.0], self.exploration, self.rave_k)
        })
    }

    fn expand(
        &mut self,
        env: &mut dyn HexEnvironment,
        node: NodeId,
        action: Option<usize>,
    ) -> Result<NodeId, MctsError> {
        let leaf = self.tree.expand(env, node, action)?;
        while self.amaf.len() < self.tree.len() {
            let id = NodeId(self.amaf.len());
            let len = self.tree.get(id).valid_actions.len();
            self.amaf.push(NodeStatistics::new(len));
        }
        Ok(leaf)
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
            let amaf = &mut self.amaf[parent.0];
            for (i, cell) in node.valid_actions.iter().enumerate() {
                if own_moves.contains(cell) {
                    amaf.record(i, won);
                }
            }
        }
    }

    fn tree(&self) -> &SearchTree {
        &self.tree
    }
}
