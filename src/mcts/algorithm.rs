//! Time-budgeted search driver.
//!
//! [`MctsAgent`] synchronizes its scratch environment with the position to
//! play, grows a fresh tree of the configured variant until the wall-clock
//! budget (or the optional simulation cap) runs out, and maps the most visited
//! root action back onto the caller's legal-move list. The tree is discarded
//! after every decision.
//!
//! With more than one worker, independent trees are searched in parallel on
//! clones of the scratch environment and their root visit counts are summed
//! before the move is extracted.
use crate::agent::Agent;
use crate::game::cell::Cell;
use crate::game::hex_game::HexEnvironment;
use crate::mcts::error::MctsError;
use crate::mcts::factory::create_mcts_tree;
use crate::mcts::hyperparameters::MCTSHyperparameters;
use crate::mcts::mcts_result::MCTSResult;
use crate::mcts::mcts_tree::run_iteration;
use crate::mcts::node::{NodeStatistics, SearchNode};
use crate::mcts::selection::arg_max;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use std::time::{Duration, Instant};

/// MCTS player owning its rollout scratch environment
#[derive(Debug, Clone)]
pub struct MctsAgent<E> {
    params: MCTSHyperparameters,
    simulation_env: E,
    rng: StdRng,
}

/// What one worker brings back from its tree
#[derive(Debug, Clone)]
struct WorkerOutcome {
    root_stats: NodeStatistics,
    simulations: usize,
    skipped: usize,
}

impl<E: HexEnvironment + Clone + Send> MctsAgent<E> {
    /// Creates an agent, seeding its rng from `params.seed` or the OS
    pub fn new(params: MCTSHyperparameters, simulation_env: E) -> Result<Self, MctsError> {
        params.validate()?;
        let rng = match params.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Ok(MctsAgent {
            params,
            simulation_env,
            rng,
        })
    }

    pub fn params(&self) -> &MCTSHyperparameters {
        &self.params
    }

    pub fn simulation_env(&self) -> &E {
        &self.simulation_env
    }

    /// Picks a move for the position in `game` within `time_budget`.
    ///
    /// Returns `None` only when `game` has no legal move.
    pub fn choose_move(
        &mut self,
        game: &dyn HexEnvironment,
        time_budget: Duration,
    ) -> Result<Option<Cell>, MctsError> {
        Ok(self.search(game, time_budget)?.best_move)
    }

    /// Runs a full search and returns the root statistics with the decision
    pub fn search(
        &mut self,
        game: &dyn HexEnvironment,
        time_budget: Duration,
    ) -> Result<MCTSResult, MctsError> {
        let start = Instant::now();
        let legal_moves = game.valid_actions();

        self.simulation_env
            .reset(game.board(), game.turn(), game.winner());
        let root = SearchNode::new(
            game.board().clone(),
            game.turn(),
            legal_moves.clone(),
            game.winner(),
            None,
        );

        let outcome = if self.params.workers > 1 {
            self.search_parallel(&root, time_budget, start)?
        } else {
            search_worker(
                &self.params,
                root,
                &mut self.simulation_env,
                &mut self.rng,
                time_budget,
                start,
            )
        };

        // Scratch use leaves the environment mid-rollout
        self.simulation_env
            .reset(game.board(), game.turn(), game.winner());

        let decided = SearchNode::with_statistics(
            game.board().clone(),
            game.turn(),
            legal_moves,
            game.winner(),
            outcome.root_stats,
        )?;
        let legal_moves = &decided.valid_actions;

        let policy = decided.stats.policy();
        let best_action = match &policy {
            _ if legal_moves.is_empty() => None,
            Some(policy) => arg_max(policy, &mut self.rng),
            None => Some(0),
        };
        let best_move = best_action.map(|action| legal_moves[action]);

        let result = MCTSResult {
            best_action,
            best_move,
            policy,
            root_visits: decided.stats.visits().to_vec(),
            num_simulations: outcome.simulations,
            skipped_iterations: outcome.skipped,
            elapsed: start.elapsed(),
        };

        log::debug!(
            "[MCTS] {} {} simulations ({} skipped) in {:?}, move {} share {:.3}",
            self.params.node_type,
            result.num_simulations,
            result.skipped_iterations,
            result.elapsed,
            result
                .best_move
                .map_or_else(|| "none".to_string(), |cell| cell.to_string()),
            result.best_action_share().unwrap_or(0.0)
        );

        Ok(result)
    }

    fn search_parallel(
        &mut self,
        root: &SearchNode,
        time_budget: Duration,
        start: Instant,
    ) -> Result<WorkerOutcome, MctsError> {
        let workers = self.params.workers;
        let seeds: Vec<u64> = (0..workers).map(|_| self.rng.random()).collect();
        let envs = vec![self.simulation_env.clone(); workers];
        let params = &self.params;

        let outcomes: Vec<WorkerOutcome> = envs
            .into_par_iter()
            .zip(seeds.into_par_iter())
            .map(|(mut env, seed)| {
                let mut rng = StdRng::seed_from_u64(seed);
                search_worker(params, root.clone(), &mut env, &mut rng, time_budget, start)
            })
            .collect();

        let mut merged = WorkerOutcome {
            root_stats: NodeStatistics::new(root.valid_actions.len()),
            simulations: 0,
            skipped: 0,
        };
        for outcome in &outcomes {
            merged.root_stats.merge(&outcome.root_stats)?;
            merged.simulations += outcome.simulations;
            merged.skipped += outcome.skipped;
        }

        log::debug!(
            "[MCTS] merged {} worker trees, {} simulations",
            workers,
            merged.simulations
        );
        Ok(merged)
    }
}

/// Grows one tree until the budget runs out.
///
/// A failing iteration is logged and skipped; it still counts toward the
/// simulation cap so a persistent failure cannot stall a capped search.
fn search_worker(
    params: &MCTSHyperparameters,
    root: SearchNode,
    env: &mut dyn HexEnvironment,
    rng: &mut StdRng,
    time_budget: Duration,
    start: Instant,
) -> WorkerOutcome {
    let mut tree = create_mcts_tree(params.node_type, params, root);
    let mut simulations = 0;
    let mut skipped = 0;

    while start.elapsed() < time_budget && params.allows_simulation(simulations + skipped) {
        match run_iteration(tree.as_mut(), env, rng) {
            Ok(leaf) => {
                simulations += 1;
                if log::log_enabled!(log::Level::Trace) {
                    log::trace!(
                        "[MCTS] iteration={} leaf={} tree_size={}",
                        simulations,
                        leaf.0,
                        tree.tree().len()
                    );
                }
            }
            Err(e) => {
                skipped += 1;
                log::warn!("[MCTS] skipping iteration: {}", e);
            }
        }
    }

    WorkerOutcome {
        root_stats: tree.root_statistics().clone(),
        simulations,
        skipped,
    }
}

impl<E: HexEnvironment + Clone + Send> Agent for MctsAgent<E> {
    fn name(&self) -> String {
        format!("MCTS-{}", self.params.node_type)
    }

    fn get_move(&mut self, game: &dyn HexEnvironment) -> Result<Option<Cell>, MctsError> {
        let budget = self.params.time_budget();
        self.choose_move(game, budget)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::board::{create_board_empty, Board};
    use crate::game::error::GameError;
    use crate::game::hex_game::HexGame;
    use crate::game::player::Player;
    use crate::mcts::node_type::NodeType;
    use assert_matches::assert_matches;

    fn capped(node_type: NodeType, simulations: usize, seed: u64) -> MCTSHyperparameters {
        MCTSHyperparameters {
            node_type,
            max_simulations: Some(simulations),
            seed: Some(seed),
            ..MCTSHyperparameters::default()
        }
    }

    #[test]
    fn test_invalid_params_are_rejected() {
        let params = MCTSHyperparameters {
            workers: 0,
            ..MCTSHyperparameters::default()
        };
        assert_matches!(
            MctsAgent::new(params, HexGame::new(3, Player::Player1)),
            Err(MctsError::InvalidConfig(_))
        );
    }

    #[test]
    fn test_simulation_cap_is_respected() {
        let game = HexGame::new(4, Player::Player1);
        let mut agent = MctsAgent::new(capped(NodeType::Uct, 64, 3), game.clone()).unwrap();

        let result = agent.search(&game, Duration::from_secs(60)).unwrap();
        assert_eq!(result.num_simulations, 64);
        assert_eq!(result.skipped_iterations, 0);
        assert_eq!(result.root_visits.iter().map(|&v| u64::from(v)).sum::<u64>(), 64);
        let best = result.best_action.unwrap();
        assert_eq!(result.best_move, Some(game.valid_actions()[best]));
    }

    #[test]
    fn test_zero_budget_falls_back_to_first_move() {
        let game = HexGame::new(3, Player::Player2);
        let mut agent =
            MctsAgent::new(capped(NodeType::Rave, 10, 1), game.clone()).unwrap();

        let result = agent.search(&game, Duration::ZERO).unwrap();
        assert_eq!(result.num_simulations, 0);
        assert_eq!(result.policy, None);
        assert_eq!(result.best_action, Some(0));
        assert_eq!(result.best_move, Some(Cell::new(0, 0)));
    }

    #[test]
    fn test_full_board_has_no_move() {
        let mut board = create_board_empty(2);
        for cell in board.empty_cells() {
            board.set(cell, Player::Player1).unwrap();
        }
        let game = HexGame::from_state(board, Player::Player2, Some(Player::Player1));
        let mut agent =
            MctsAgent::new(capped(NodeType::Amaf, 10, 1), HexGame::new(2, Player::Player1))
                .unwrap();

        assert_eq!(agent.choose_move(&game, Duration::from_millis(20)).unwrap(), None);
    }

    #[test]
    fn test_scratch_env_is_restored_after_search() {
        let mut game = HexGame::new(4, Player::Player1);
        game.make_move_on_board(1, 1, Player::Player1).unwrap();
        let mut agent =
            MctsAgent::new(capped(NodeType::Amaf, 40, 9), HexGame::new(4, Player::Player1))
                .unwrap();

        agent.choose_move(&game, Duration::from_secs(60)).unwrap();
        assert_eq!(agent.simulation_env().board(), game.board());
        assert_eq!(agent.simulation_env().turn(), Player::Player2);
    }

    #[test]
    fn test_parallel_workers_merge_root_visits() {
        let game = HexGame::new(4, Player::Player1);
        let params = MCTSHyperparameters {
            workers: 3,
            ..capped(NodeType::Uct, 20, 5)
        };
        let mut agent = MctsAgent::new(params, game.clone()).unwrap();

        let result = agent.search(&game, Duration::from_secs(60)).unwrap();
        assert_eq!(result.num_simulations, 60);
        assert_eq!(result.root_visits.iter().map(|&v| u64::from(v)).sum::<u64>(), 60);
        assert_eq!(result.root_visits.len(), 16);
    }

    #[test]
    fn test_agent_name() {
        let agent =
            MctsAgent::new(capped(NodeType::Rave, 1, 1), HexGame::new(3, Player::Player1))
                .unwrap();
        assert_eq!(agent.name(), "MCTS-RAVE");
    }

    /// Rules engine that rejects every move
    #[derive(Debug, Clone)]
    struct RejectingGame(HexGame);

    impl HexEnvironment for RejectingGame {
        fn reset(&mut self, board: &Board, turn: Player, winner: Option<Player>) {
            self.0.reset(board, turn, winner);
        }

        fn board(&self) -> &Board {
            self.0.board()
        }

        fn turn(&self) -> Player {
            self.0.turn()
        }

        fn winner(&self) -> Option<Player> {
            self.0.winner()
        }

        fn valid_actions(&self) -> Vec<Cell> {
            self.0.valid_actions()
        }

        fn make_move_on_board(&mut self, row: usize, col: usize, _: Player) -> Result<(), GameError> {
            Err(GameError::CellOccupied { row, col })
        }

        fn find_winner_path(&self, board: &Board, start: Cell, player: Player) -> Vec<Cell> {
            self.0.find_winner_path(board, start, player)
        }
    }

    #[test]
    fn test_failing_iterations_are_skipped() {
        let game = HexGame::new(3, Player::Player1);
        for node_type in [NodeType::Uct, NodeType::Amaf, NodeType::Rave] {
            let scratch = RejectingGame(HexGame::new(3, Player::Player1));
            let mut agent = MctsAgent::new(capped(node_type, 25, 4), scratch).unwrap();

            let result = agent.search(&game, Duration::from_secs(60)).unwrap();
            assert_eq!(result.num_simulations, 0, "{}", node_type);
            assert_eq!(result.skipped_iterations, 25, "{}", node_type);
            assert_eq!(result.policy, None);
            let chosen = result.best_move.unwrap();
            assert!(game.valid_actions().contains(&chosen));
        }
    }
}
