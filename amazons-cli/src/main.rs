//! amazons - Monte Carlo tree search bot for the Game of the Amazons
//!
//! Reads the turn header and committed move history on stdin, searches until
//! the turn deadline, and writes exactly one move line on stdout. All
//! diagnostics go to stderr; stdout carries nothing but the protocol.

mod protocol;
mod turn;

use amazons_core::PhaseTable;
use amazons_mcts::{MctsConfig, Searcher};
use clap::Parser;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use turn::{TimeBudget, TurnController};

#[derive(Parser)]
#[command(name = "amazons")]
#[command(about = "Monte Carlo tree search bot for the Game of the Amazons")]
struct Cli {
    /// PRNG seed; search is reproducible given the same seed and inputs
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Wall-clock budget for the first turn, in milliseconds
    #[arg(long, default_value_t = 2_000)]
    first_budget_ms: u64,

    /// Wall-clock budget for each later turn, in milliseconds
    #[arg(long, default_value_t = 1_000)]
    budget_ms: u64,

    /// Safety margin subtracted from every budget, in milliseconds
    #[arg(long, default_value_t = 100)]
    safety_margin_ms: u64,

    /// Stay resident after the first turn and read one opponent move per
    /// turn, emitting the keep-running marker after each move
    #[arg(long)]
    keep_alive: bool,

    /// JSON file overriding the evaluation phase-weight table
    #[arg(long)]
    weights: Option<PathBuf>,

    /// Tree node pool capacity
    #[arg(long, default_value_t = 1 << 20)]
    node_capacity: usize,

    /// Untried-move pool capacity
    #[arg(long, default_value_t = 1 << 25)]
    move_capacity: usize,
}

fn main() -> anyhow::Result<()> {
    // The platform clock starts with the process; anchor the first-turn
    // deadline before doing anything else.
    let program_start = Instant::now();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let table = match &cli.weights {
        Some(path) => PhaseTable::load(path)?,
        None => PhaseTable::default(),
    };
    let config = MctsConfig {
        node_capacity: cli.node_capacity,
        move_capacity: cli.move_capacity,
        seed: cli.seed,
    };
    let budget = TimeBudget {
        first_turn: Duration::from_millis(cli.first_budget_ms),
        per_turn: Duration::from_millis(cli.budget_ms),
        safety_margin: Duration::from_millis(cli.safety_margin_ms),
    };

    let searcher = Searcher::new(&config, table);
    let mut controller = TurnController::new(searcher, budget, cli.keep_alive);

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    controller.run(stdin.lock(), stdout.lock(), program_start)
}
