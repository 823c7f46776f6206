use crate::game::hex_game::HexEnvironment;
use crate::game::player::Player;
use crate::mcts::error::MctsError;
use crate::mcts::node::{NodeId, NodeStatistics};
use crate::mcts::selection::SelectionResult;
use crate::mcts::tree::SearchTree;
use rand::rngs::StdRng;

/// The four MCTS phases plus policy extraction.
///
/// UCT, AMAF and RAVE trees implement this trait over the same arena and
/// statistics representation. They differ in how actions are scored and how a
/// simulation result is credited on the way back to the root.
pub trait MctsTree {
    /// Walks down to the node to expand next
    fn select(&self, rng: &mut StdRng) -> SelectionResult;

    /// Adds the child for `action`, or returns `node` when there is nothing to expand
    fn expand(
        &mut self,
        env: &mut dyn HexEnvironment,
        node: NodeId,
        action: Option<usize>,
    ) -> Result<NodeId, MctsError>;

    /// Plays `node` out to a decided game and returns the winner
    fn simulate(
        &mut self,
        env: &mut dyn HexEnvironment,
        node: NodeId,
        rng: &mut StdRng,
    ) -> Result<Player, MctsError>;

    /// Credits `winner` on every edge from `leaf` up to the root
    fn backup(&mut self, leaf: NodeId, winner: Player);

    fn tree(&self) -> &SearchTree;

    fn winner(&self, node: NodeId) -> Option<Player> {
        self.tree().get(node).winner
    }

    fn root_statistics(&self) -> &NodeStatistics {
        &self.tree().root().stats
    }

    /// Normalized root visit counts, `None` before the first simulation
    fn calculate_policy(&self) -> Option<Vec<f64>> {
        self.root_statistics().policy()
    }
}

/// Runs one selection, expansion, simulation and backup cycle
pub fn run_iteration(
    tree: &mut dyn MctsTree,
    env: &mut dyn HexEnvironment,
    rng: &mut StdRng,
) -> Result<NodeId, MctsError> {
    let SelectionResult { node, action } = tree.select(rng);
    let leaf = tree.expand(env, node, action)?;
    let winner = match tree.winner(leaf) {
        Some(winner) => winner,
        None => tree.simulate(env, leaf, rng)?,
    };
    tree.backup(leaf, winner);
    Ok(leaf)
}
