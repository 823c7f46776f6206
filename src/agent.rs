use crate::game::cell::Cell;
use crate::game::hex_game::HexEnvironment;
use crate::mcts::error::MctsError;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;

/// Anything that can pick a move for the player whose turn it is in `game`
pub trait Agent {
    fn name(&self) -> String;

    /// Returns `None` when the position has no legal move
    fn get_move(&mut self, game: &dyn HexEnvironment) -> Result<Option<Cell>, MctsError>;
}

/// Uniform random baseline
#[derive(Debug, Clone)]
pub struct RandomAgent {
    rng: StdRng,
}

impl RandomAgent {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        RandomAgent { rng }
    }
}

impl Agent for RandomAgent {
    fn name(&self) -> String {
        "Random".to_string()
    }

    fn get_move(&mut self, game: &dyn HexEnvironment) -> Result<Option<Cell>, MctsError> {
        Ok(game.valid_actions().choose(&mut self.rng).copied())
    }
}
