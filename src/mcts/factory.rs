use crate::mcts::amaf::AmafTree;
use crate::mcts::hyperparameters::MCTSHyperparameters;
use crate::mcts::mcts_tree::MctsTree;
use crate::mcts::node::SearchNode;
use crate::mcts::node_type::NodeType;
use crate::mcts::rave::RaveTree;
use crate::mcts::uct::UctTree;

/// Builds the search tree variant for `node_type`, rooted at `root`
pub fn create_mcts_tree(
    node_type: NodeType,
    params: &MCTSHyperparameters,
    root: SearchNode,
) -> Box<dyn MctsTree> {
    match node_type {
        NodeType::Uct => Box::new(UctTree::new(root, params.exploration_coefficient)),
        NodeType::Amaf => Box::new(AmafTree::new(root, params.amaf_exploration_coefficient)),
        NodeType::Rave => Box::new(RaveTree::new(
            root,
            params.exploration_coefficient,
            params.rave_k,
        )),
    }
}
