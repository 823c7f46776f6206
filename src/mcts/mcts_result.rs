use crate::game::cell::Cell;
use std::time::Duration;

/// Summary of one move decision
#[derive(Debug, Clone, PartialEq)]
pub struct MCTSResult {
    /// Index into the caller's legal-move list, `None` when it is empty
    pub best_action: Option<usize>,
    pub best_move: Option<Cell>,
    /// Normalized root visit counts, `None` if no simulation ran
    pub policy: Option<Vec<f64>>,
    pub root_visits: Vec<u32>,
    pub num_simulations: usize,
    pub skipped_iterations: usize,
    pub elapsed: Duration,
}

impl MCTSResult {
    /// Share of root visits that went to the chosen action
    pub fn best_action_share(&self) -> Option<f64> {
        let policy = self.policy.as_ref()?;
        policy.get(self.best_action?).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_best_action_share() {
        let mut result = MCTSResult {
            best_action: Some(1),
            best_move: Some(Cell::new(0, 1)),
            policy: Some(vec![0.25, 0.75]),
            root_visits: vec![1, 3],
            num_simulations: 4,
            skipped_iterations: 0,
            elapsed: Duration::from_millis(3),
        };
        assert_eq!(result.best_action_share(), Some(0.75));

        result.policy = None;
        assert_eq!(result.best_action_share(), None);
    }
}
