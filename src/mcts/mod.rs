pub mod algorithm;
pub mod amaf;
pub mod error;
pub mod factory;
pub mod hyperparameters;
pub mod mcts_result;
pub mod mcts_tree;
pub mod node;
pub mod node_type;
pub mod rave;
pub mod rollout;
pub mod selection;
pub mod tree;
pub mod uct;

pub use algorithm::MctsAgent;
pub use error::MctsError;
pub use factory::create_mcts_tree;
pub use hyperparameters::MCTSHyperparameters;
pub use mcts_result::MCTSResult;
pub use mcts_tree::{run_iteration, MctsTree};
pub use node::{NodeId, NodeStatistics, SearchNode};
pub use node_type::NodeType;
