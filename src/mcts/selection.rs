//! Selection helpers shared by every tree variant
//!
//! This module implements:
//! - the UCT bound computed over a node's statistics
//! - argmax with random tie-breaking
//! - the tree walk from the root down to the frontier

use crate::mcts::node::{NodeId, NodeStatistics, SearchNode};
use crate::mcts::tree::SearchTree;
use rand::seq::IndexedRandom;
use rand::Rng;

/// Outcome of the selection phase.
///
/// `action` is the frontier action to expand from `node`, or `None` when the
/// walk stopped on a decided state or a full board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionResult {
    pub node: NodeId,
    pub action: Option<usize>,
}

/// Computes the UCT score of every action of a node
///
/// Formula: W_i / N_i + c × sqrt(ln(N) / N_i)
///
/// # Arguments
/// * `stats` - Per-action statistics of the node
/// * `c` - Exploration constant, 0 for pure exploitation
///
/// # Returns
/// One score per action, `+inf` for actions never visited
pub fn upper_confidence_bounds(stats: &NodeStatistics, c: f64) -> Vec<f64> {
    let total = stats.total_visits() as f64;
    stats
        .visits()
        .iter()
        .zip(stats.wins())
        .map(|(&visits, &wins)| {
            if visits == 0 {
                return f64::INFINITY;
            }
            let visits = f64::from(visits);
            let exploitation = f64::from(wins) / visits;
            let exploration = c * (total.ln() / visits).sqrt();
            exploitation + exploration
        })
        .collect()
}

/// Index of the largest value, ties broken uniformly at random.
///
/// NaN entries are never selected. Returns `None` for an empty slice.
pub fn arg_max<R: Rng + ?Sized>(values: &[f64], rng: &mut R) -> Option<usize> {
    let best = values
        .iter()
        .copied()
        .filter(|v| !v.is_nan())
        .fold(f64::NEG_INFINITY, f64::max);

    let candidates: Vec<usize> = values
        .iter()
        .enumerate()
        .filter(|&(_, &v)| v == best)
        .map(|(i, _)| i)
        .collect();

    candidates.choose(rng).copied()
}

/// Walks from the root following the best-scored action at each node.
///
/// The walk stops on a terminal node (no frontier action) or on the first
/// action that has no child yet.
pub fn select_leaf<R, F>(tree: &SearchTree, rng: &mut R, mut score: F) -> SelectionResult
where
    R: Rng + ?Sized,
    F: FnMut(NodeId, &SearchNode) -> Vec<f64>,
{
    let mut current = NodeId::ROOT;
    loop {
        let node = tree.get(current);
        if node.is_terminal() {
            return SelectionResult {
                node: current,
                action: None,
            };
        }

        let scores = score(current, node);
        let Some(best_action) = arg_max(&scores, rng) else {
            return SelectionResult {
                node: current,
                action: None,
            };
        };

        match node.child(best_action) {
            Some(child) => current = child,
            None => {
                return SelectionResult {
                    node: current,
                    action: Some(best_action),
                }
            }
        }
    }
}
