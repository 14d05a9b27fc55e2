//! Search throughput benchmark
//!
//! Reports iterations completed per turn budget on an opening and a
//! mid-game position. Run with `cargo bench -p amazons-mcts`.

use amazons_core::board::square;
use amazons_core::{Board, Cell, PhaseTable, Side};
use amazons_mcts::{MctsConfig, Searcher};
use std::time::{Duration, Instant};

fn midgame_position() -> Board {
    let mut board = Board::new();
    for &(r, c) in &[(3, 3), (3, 4), (4, 2), (4, 5), (2, 2), (5, 5), (1, 4), (6, 3)] {
        board.set(square(r, c), Cell::Arrow);
    }
    board
}

fn bench_position(name: &str, board: &Board, side: Side, turn: u32) {
    println!("\n=== {} ===", name);
    for budget_ms in [50u64, 200, 1000] {
        let mut searcher = Searcher::new(&MctsConfig::default().with_seed(42), PhaseTable::default());
        let start = Instant::now();
        let deadline = start + Duration::from_millis(budget_ms);
        let mv = searcher.search(board, side, turn, deadline);
        let elapsed = start.elapsed();
        let stats = searcher.stats();

        println!(
            "  {:>5}ms budget: {:>8} iterations ({:>7.0}/s), {:>7} nodes, move {}{}",
            budget_ms,
            stats.iterations,
            stats.iterations as f64 / elapsed.as_secs_f64(),
            stats.nodes,
            mv,
            if stats.no_expand { " [no-expand]" } else { "" },
        );
        assert!(
            elapsed <= Duration::from_millis(budget_ms + 50),
            "deadline overrun: {:?}",
            elapsed
        );
    }
}

fn main() {
    bench_position("Opening (turn 1)", &Board::new(), Side::Black, 1);
    bench_position("Mid-game (turn 12)", &midgame_position(), Side::White, 12);
}
