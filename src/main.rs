//! Hex Arena - agent vs agent matches
//!
//! Plays a series of Hex games between two agents (an MCTS variant or the
//! random baseline) and reports each winner and the overall win rates.

use clap::Parser;
use std::error::Error;
use std::path::PathBuf;

use hex_mcts::logging::setup_logging;
use hex_mcts::{
    Agent, HexEnvironment, HexGame, MCTSHyperparameters, MctsAgent, NodeType, Player,
    RandomAgent,
};

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerKindCli {
    Uct,
    Amaf,
    Rave,
    Random,
}

impl PlayerKindCli {
    fn node_type(self) -> Option<NodeType> {
        match self {
            PlayerKindCli::Uct => Some(NodeType::Uct),
            PlayerKindCli::Amaf => Some(NodeType::Amaf),
            PlayerKindCli::Rave => Some(NodeType::Rave),
            PlayerKindCli::Random => None,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "hex_mcts",
    about = "Run agent vs agent Hex matches with MCTS players"
)]
struct Args {
    /// Board side length
    #[arg(long, default_value_t = 11)]
    size: usize,

    /// Agent playing first (connects top and bottom)
    #[arg(long, value_enum, default_value = "uct")]
    player1: PlayerKindCli,

    /// Agent playing second (connects left and right)
    #[arg(long, value_enum, default_value = "random")]
    player2: PlayerKindCli,

    /// Thinking time per move in milliseconds
    #[arg(long)]
    time_ms: Option<u64>,

    /// Cap on simulations per move (per worker)
    #[arg(long)]
    max_simulations: Option<usize>,

    /// Number of games to play
    #[arg(long, default_value_t = 10)]
    games: usize,

    /// Random seed for reproducible matches
    #[arg(long)]
    seed: Option<u64>,

    /// Parallel search trees per MCTS move
    #[arg(long)]
    workers: Option<usize>,

    /// JSON file with MCTS hyperparameters
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write rotating log files here instead of stderr
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Log level used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let _logger = setup_logging(&args.log_level, args.log_dir.as_deref())?;

    if args.size == 0 {
        return Err("board size must be at least 1".into());
    }

    let mut params = match &args.config {
        Some(path) => MCTSHyperparameters::from_json_file(path)?,
        None => MCTSHyperparameters::default(),
    };
    if let Some(time_ms) = args.time_ms {
        params.time_budget_ms = time_ms;
    }
    if args.max_simulations.is_some() {
        params.max_simulations = args.max_simulations;
    }
    if let Some(workers) = args.workers {
        params.workers = workers;
    }
    if args.seed.is_some() {
        params.seed = args.seed;
    }
    params.validate()?;

    log::info!("🏟️  Hex Arena");
    log::info!("Board: {}x{}", args.size, args.size);
    log::info!("Player 1: {:?}", args.player1);
    log::info!("Player 2: {:?}", args.player2);
    log::info!("Games: {}", args.games);
    log::info!("Search: {}", params.to_config_string());

    let mut agents: [Box<dyn Agent>; 2] = [
        build_agent(args.player1, &params, args.size, 0)?,
        build_agent(args.player2, &params, args.size, 1)?,
    ];

    let mut wins = [0usize; 2];
    for game_id in 1..=args.games {
        let game = play_game(&mut agents, args.size)?;
        let winner = game.winner().ok_or("game ended without a winner")?;
        wins[winner.index()] += 1;

        log::info!(
            "Game {}/{}: {} ({}) wins after {} moves",
            game_id,
            args.games,
            winner,
            agents[winner.index()].name(),
            args.size * args.size - game.valid_actions().len()
        );
        log::info!("Final board:\n{}", game.board());
    }

    log::info!("");
    log::info!("                      ARENA RESULTS");
    for player in [Player::Player1, Player::Player2] {
        let won = wins[player.index()];
        let rate = if args.games > 0 {
            won as f64 / args.games as f64 * 100.0
        } else {
            0.0
        };
        log::info!(
            "{} ({}): {} wins ({:.1}%)",
            player,
            agents[player.index()].name(),
            won,
            rate
        );
    }

    Ok(())
}

fn build_agent(
    kind: PlayerKindCli,
    params: &MCTSHyperparameters,
    size: usize,
    seat: u64,
) -> Result<Box<dyn Agent>, Box<dyn Error>> {
    // Distinct streams per seat so mirrored agents do not play identically
    let seed = params.seed.map(|seed| seed.wrapping_add(seat));
    match kind.node_type() {
        Some(node_type) => {
            let agent_params = MCTSHyperparameters {
                node_type,
                seed,
                ..params.clone()
            };
            let agent = MctsAgent::new(agent_params, HexGame::new(size, Player::Player1))?;
            Ok(Box::new(agent))
        }
        None => Ok(Box::new(RandomAgent::new(seed))),
    }
}

fn play_game(agents: &mut [Box<dyn Agent>; 2], size: usize) -> Result<HexGame, Box<dyn Error>> {
    let mut game = HexGame::new(size, Player::Player1);
    while !game.is_over() {
        let turn = game.turn();
        let Some(cell) = agents[turn.index()].get_move(&game)? else {
            break;
        };
        log::debug!("{} plays {}", turn, cell);
        game.make_move_on_board(cell.row, cell.col, turn)?;
    }
    Ok(game)
}
