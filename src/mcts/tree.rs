//! Arena-allocated search tree.
//!
//! Nodes live in a contiguous vector and refer to each other by [`NodeId`].
//! Ownership flows from the arena only; the parent link stored in each node
//! is a plain index used to walk back up during backup.

use crate::game::cell::Cell;
use crate::game::hex_game::HexEnvironment;
use crate::game::player::Player;
use crate::mcts::error::MctsError;
use crate::mcts::node::{NodeId, SearchNode};
use crate::mcts::rollout::PlayerMoves;
use std::collections::HashSet;

#[derive(Debug, Clone)]
pub struct SearchTree {
    nodes: Vec<SearchNode>,
}

impl SearchTree {
    /// Create a tree holding only `root`. Any parent link on it is dropped.
    pub fn new(mut root: SearchNode) -> Self {
        root.incoming = None;
        root.children.clear();
        SearchTree { nodes: vec![root] }
    }

    /// # Panics
    /// Panics if the NodeId does not belong to this tree.
    pub fn get(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id.0]
    }

    /// # Panics
    /// Panics if the NodeId does not belong to this tree.
    pub fn get_mut(&mut self, id: NodeId) -> &mut SearchNode {
        &mut self.nodes[id.0]
    }

    pub fn root(&self) -> &SearchNode {
        self.get(NodeId::ROOT)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false, the root is never removed
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &SearchNode)> {
        self.nodes.iter().enumerate().map(|(i, node)| (NodeId(i), node))
    }

    /// Adds `node` below `parent` for the given action, returning its id
    pub fn add_child(&mut self, parent: NodeId, action: usize, mut node: SearchNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        node.incoming = Some((parent, action));
        self.nodes.push(node);
        self.nodes[parent.0].children.insert(action, id);
        id
    }

    /// Materializes the child reached by `action`.
    ///
    /// Returns `node` itself when no frontier action was selected or when the
    /// node is already decided. An action that was already expanded returns
    /// the existing child.
    pub fn expand(
        &mut self,
        env: &mut dyn HexEnvironment,
        node: NodeId,
        action: Option<usize>,
    ) -> Result<NodeId, MctsError> {
        let Some(action) = action else {
            return Ok(node);
        };

        let parent = self.get(node);
        if parent.winner.is_some() {
            return Ok(node);
        }
        if let Some(existing) = parent.child(action) {
            return Ok(existing);
        }
        let cell = *parent
            .valid_actions
            .get(action)
            .ok_or(MctsError::ActionOutOfRange {
                action,
                len: parent.valid_actions.len(),
            })?;

        env.reset(&parent.state, parent.active_player, parent.winner);
        env.make_move_on_board(cell.row, cell.col, parent.active_player)?;

        let child = SearchNode::new(
            env.board().clone(),
            env.turn(),
            env.valid_actions(),
            env.winner(),
            None,
        );
        Ok(self.add_child(node, action, child))
    }

    /// Edges from `leaf` up to the root as `(parent, action taken at parent)`
    pub fn path_to_root(&self, leaf: NodeId) -> Vec<(NodeId, usize)> {
        let mut path = Vec::new();
        let mut current = leaf;
        while let Some((parent, action)) = self.get(current).incoming {
            path.push((parent, action));
            current = parent;
        }
        path
    }

    /// Moves played inside the tree on the way from the root to `leaf`
    pub fn moves_to(&self, leaf: NodeId) -> Vec<(Player, Cell)> {
        self.path_to_root(leaf)
            .into_iter()
            .rev()
            .map(|(parent, action)| {
                let node = self.get(parent);
                (node.active_player, node.valid_actions[action])
            })
            .collect()
    }

    /// Cells each player occupied over a whole simulation, the in-tree moves
    /// down to `leaf` plus the rollout, indexed by [`Player::index`]
    pub fn played_cells(&self, leaf: NodeId, rollout: PlayerMoves) -> [HashSet<Cell>; 2] {
        let mut moves = rollout;
        for (player, cell) in self.moves_to(leaf) {
            moves.record(player, cell);
        }
        [
            moves.cells_of(Player::Player1),
            moves.cells_of(Player::Player2),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::board::create_board_empty;
    use crate::game::hex_game::HexGame;
    use assert_matches::assert_matches;

    fn tree_for(size: usize) -> (SearchTree, HexGame) {
        let game = HexGame::new(size, Player::Player1);
        let root = SearchNode::new(
            game.board().clone(),
            game.turn(),
            game.valid_actions(),
            game.winner(),
            None,
        );
        (SearchTree::new(root), game)
    }

    #[test]
    fn test_tree_creation() {
        let (tree, _) = tree_for(3);
        assert_eq!(tree.len(), 1);
        assert!(!tree.is_empty());
        assert_eq!(tree.root().valid_actions.len(), 9);
    }

    #[test]
    fn test_expand_creates_child_with_next_player() {
        let (mut tree, mut env) = tree_for(3);
        let child = tree.expand(&mut env, NodeId::ROOT, Some(4)).unwrap();

        assert_eq!(child, NodeId(1));
        let node = tree.get(child);
        assert_eq!(node.active_player, Player::Player2);
        assert_eq!(node.valid_actions.len(), 8);
        assert_eq!(node.state.player_at(Cell::new(1, 1)), Some(Player::Player1));
        assert_eq!(node.incoming, Some((NodeId::ROOT, 4)));
        assert_eq!(tree.root().child(4), Some(child));
        // Root snapshot is untouched
        assert!(tree.root().state.is_empty_cell(Cell::new(1, 1)));
    }

    #[test]
    fn test_expand_without_action_is_noop() {
        let (mut tree, mut env) = tree_for(3);
        let result = tree.expand(&mut env, NodeId::ROOT, None).unwrap();
        assert_eq!(result, NodeId::ROOT);
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_expand_decided_node_returns_itself() {
        let board = create_board_empty(2);
        let actions = board.empty_cells();
        let root = SearchNode::new(board, Player::Player1, actions, Some(Player::Player2), None);
        let mut tree = SearchTree::new(root);
        let mut env = HexGame::new(2, Player::Player1);

        assert_eq!(tree.expand(&mut env, NodeId::ROOT, Some(0)).unwrap(), NodeId::ROOT);
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_expand_out_of_range_is_an_error() {
        let (mut tree, mut env) = tree_for(2);
        assert_matches!(
            tree.expand(&mut env, NodeId::ROOT, Some(4)),
            Err(MctsError::ActionOutOfRange { action: 4, len: 4 })
        );
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_expand_twice_reuses_child() {
        let (mut tree, mut env) = tree_for(3);
        let first = tree.expand(&mut env, NodeId::ROOT, Some(0)).unwrap();
        let second = tree.expand(&mut env, NodeId::ROOT, Some(0)).unwrap();
        assert_eq!(first, second);
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn test_path_and_moves() {
        let (mut tree, mut env) = tree_for(3);
        let child = tree.expand(&mut env, NodeId::ROOT, Some(0)).unwrap();
        let grandchild = tree.expand(&mut env, child, Some(3)).unwrap();

        assert_eq!(
            tree.path_to_root(grandchild),
            vec![(child, 3), (NodeId::ROOT, 0)]
        );
        assert!(tree.path_to_root(NodeId::ROOT).is_empty());

        let second_cell = tree.get(child).valid_actions[3];
        assert_eq!(
            tree.moves_to(grandchild),
            vec![
                (Player::Player1, Cell::new(0, 0)),
                (Player::Player2, second_cell)
            ]
        );
    }

    #[test]
    fn test_played_cells_merge_tree_and_rollout() {
        let (mut tree, mut env) = tree_for(3);
        let child = tree.expand(&mut env, NodeId::ROOT, Some(0)).unwrap();
        let grandchild = tree.expand(&mut env, child, Some(0)).unwrap();
        let mut rollout = PlayerMoves::default();
        rollout.record(Player::Player1, Cell::new(2, 2));

        let played = tree.played_cells(grandchild, rollout);

        let player1: HashSet<Cell> = [Cell::new(0, 0), Cell::new(2, 2)].into_iter().collect();
        let player2: HashSet<Cell> = [Cell::new(0, 1)].into_iter().collect();
        assert_eq!(played[Player::Player1.index()], player1);
        assert_eq!(played[Player::Player2.index()], player2);
    }
}
