//! Search node and per-action statistics
//!
//! A node stores one game state and, for every legal action from that state,
//! the number of simulations routed through the action and how many of them
//! the player to move went on to win. Children are referenced by index into
//! the owning [`SearchTree`](crate::mcts::tree::SearchTree) arena.

use crate::game::board::Board;
use crate::game::cell::Cell;
use crate::game::player::Player;
use crate::mcts::error::MctsError;
use std::collections::HashMap;

/// Index of a node inside its tree arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);
}

/// Visit and win counters, one slot per valid action
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NodeStatistics {
    visits: Vec<u32>,
    wins: Vec<u32>,
}

impl NodeStatistics {
    pub fn new(len: usize) -> Self {
        NodeStatistics {
            visits: vec![0; len],
            wins: vec![0; len],
        }
    }

    /// Builds statistics from existing counters.
    ///
    /// Fails if the two arrays disagree in length or a slot records more wins
    /// than visits.
    pub fn from_counts(visits: Vec<u32>, wins: Vec<u32>) -> Result<Self, MctsError> {
        if visits.len() != wins.len() {
            return Err(MctsError::StatisticsMismatch {
                expected: visits.len(),
                actual: wins.len(),
            });
        }
        if let Some(action) = visits.iter().zip(&wins).position(|(v, w)| w > v) {
            return Err(MctsError::WinsExceedVisits {
                action,
                wins: wins[action],
                visits: visits[action],
            });
        }
        Ok(NodeStatistics { visits, wins })
    }

    pub fn len(&self) -> usize {
        self.visits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visits.is_empty()
    }

    pub fn visits(&self) -> &[u32] {
        &self.visits
    }

    pub fn wins(&self) -> &[u32] {
        &self.wins
    }

    pub fn total_visits(&self) -> u64 {
        self.visits.iter().map(|&v| u64::from(v)).sum()
    }

    /// Win rate of one action, `None` while unvisited
    pub fn win_rate(&self, action: usize) -> Option<f64> {
        match self.visits.get(action) {
            Some(&visits) if visits > 0 => Some(f64::from(self.wins[action]) / f64::from(visits)),
            _ => None,
        }
    }

    /// Counts one simulation through `action`, crediting a win if `won`
    pub fn record(&mut self, action: usize, won: bool) {
        self.visits[action] += 1;
        if won {
            self.wins[action] += 1;
        }
    }

    /// Adds another worker's counters slot by slot
    pub fn merge(&mut self, other: &NodeStatistics) -> Result<(), MctsError> {
        if other.len() != self.len() {
            return Err(MctsError::StatisticsMismatch {
                expected: self.len(),
                actual: other.len(),
            });
        }
        let visits = self.visits.iter().zip(&other.visits).map(|(a, b)| a + b).collect();
        let wins = self.wins.iter().zip(&other.wins).map(|(a, b)| a + b).collect();
        *self = NodeStatistics::from_counts(visits, wins)?;
        Ok(())
    }

    /// Visit-count distribution normalized to sum to one.
    ///
    /// Returns `None` when no simulation has been recorded yet.
    pub fn policy(&self) -> Option<Vec<f64>> {
        let total = self.total_visits();
        if total == 0 {
            return None;
        }
        Some(
            self.visits
                .iter()
                .map(|&v| f64::from(v) / total as f64)
                .collect(),
        )
    }
}

/// One decision point of the search tree
#[derive(Debug, Clone)]
pub struct SearchNode {
    /// Board snapshot, never modified after capture
    pub state: Board,
    pub active_player: Player,
    /// Legal moves, fixed at creation; `stats` is indexed against it
    pub valid_actions: Vec<Cell>,
    pub winner: Option<Player>,
    /// Parent node and the index of the parent's action that produced this node
    pub incoming: Option<(NodeId, usize)>,
    pub children: HashMap<usize, NodeId>,
    pub stats: NodeStatistics,
}

impl SearchNode {
    pub fn new(
        state: Board,
        active_player: Player,
        valid_actions: Vec<Cell>,
        winner: Option<Player>,
        incoming: Option<(NodeId, usize)>,
    ) -> Self {
        let stats = NodeStatistics::new(valid_actions.len());
        SearchNode {
            state,
            active_player,
            valid_actions,
            winner,
            incoming,
            children: HashMap::new(),
            stats,
        }
    }

    /// Builds a root node around existing statistics, failing fast if they are
    /// not sized to the valid actions.
    pub fn with_statistics(
        state: Board,
        active_player: Player,
        valid_actions: Vec<Cell>,
        winner: Option<Player>,
        stats: NodeStatistics,
    ) -> Result<Self, MctsError> {
        if stats.len() != valid_actions.len() {
            return Err(MctsError::StatisticsMismatch {
                expected: valid_actions.len(),
                actual: stats.len(),
            });
        }
        let mut node = SearchNode::new(state, active_player, valid_actions, winner, None);
        node.stats = stats;
        Ok(node)
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.incoming.map(|(parent, _)| parent)
    }

    pub fn action(&self) -> Option<usize> {
        self.incoming.map(|(_, action)| action)
    }

    pub fn child(&self, action: usize) -> Option<NodeId> {
        self.children.get(&action).copied()
    }

    /// Decided game or full board, selection never descends below it
    pub fn is_terminal(&self) -> bool {
        self.winner.is_some() || self.valid_actions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::board::create_board_empty;
    use assert_matches::assert_matches;

    fn root_node(size: usize) -> SearchNode {
        let board = create_board_empty(size);
        let actions = board.empty_cells();
        SearchNode::new(board, Player::Player1, actions, None, None)
    }

    #[test]
    fn test_new_node_statistics_match_actions() {
        let node = root_node(3);
        assert_eq!(node.stats.len(), 9);
        assert_eq!(node.stats.total_visits(), 0);
        assert!(node.children.is_empty());
        assert_eq!(node.parent(), None);
        assert!(!node.is_terminal());
    }

    #[test]
    fn test_with_statistics_rejects_wrong_length() {
        let board = create_board_empty(2);
        let actions = board.empty_cells();
        let result = SearchNode::with_statistics(
            board,
            Player::Player1,
            actions,
            None,
            NodeStatistics::new(3),
        );
        assert_matches!(
            result,
            Err(MctsError::StatisticsMismatch {
                expected: 4,
                actual: 3
            })
        );
    }

    #[test]
    fn test_from_counts_validation() {
        assert_matches!(
            NodeStatistics::from_counts(vec![1, 2], vec![0]),
            Err(MctsError::StatisticsMismatch { .. })
        );
        assert_matches!(
            NodeStatistics::from_counts(vec![1, 2], vec![2, 0]),
            Err(MctsError::WinsExceedVisits {
                action: 0,
                wins: 2,
                visits: 1
            })
        );
        let stats = NodeStatistics::from_counts(vec![4, 2], vec![1, 2]).unwrap();
        assert_eq!(stats.win_rate(0), Some(0.25));
        assert_eq!(stats.win_rate(1), Some(1.0));
    }

    #[test]
    fn test_record_and_policy() {
        let mut stats = NodeStatistics::new(3);
        assert_eq!(stats.policy(), None);
        assert_eq!(stats.win_rate(0), None);

        stats.record(0, true);
        stats.record(2, false);
        stats.record(2, true);
        stats.record(2, false);

        assert_eq!(stats.visits(), &[1, 0, 3]);
        assert_eq!(stats.wins(), &[1, 0, 1]);

        let policy = stats.policy().unwrap();
        assert!((policy.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        assert!((policy[2] - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_merge_sums_counters() {
        let mut a = NodeStatistics::from_counts(vec![1, 2], vec![1, 0]).unwrap();
        let b = NodeStatistics::from_counts(vec![3, 0], vec![1, 0]).unwrap();
        a.merge(&b).unwrap();
        assert_eq!(a.visits(), &[4, 2]);
        assert_eq!(a.wins(), &[2, 0]);

        assert_matches!(
            a.merge(&NodeStatistics::new(5)),
            Err(MctsError::StatisticsMismatch {
                expected: 2,
                actual: 5
            })
        );
        // A rejected merge leaves the counters untouched
        assert_eq!(a.visits(), &[4, 2]);
    }

    #[test]
    fn test_full_board_node_is_terminal() {
        let board = create_board_empty(1);
        let node = SearchNode::new(board, Player::Player2, Vec::new(), None, None);
        assert!(node.is_terminal());
    }
}
