//! Per-turn control: history replay, budget accounting, move emission
//!
//! The deadline for turn 1 is anchored at process start, not at the moment
//! the search begins: the platform's clock is already running while we parse
//! input and replay history. Keep-alive turns anchor at the arrival of the
//! opponent's move line.

use crate::protocol;
use amazons_core::{Board, Move, Side};
use amazons_mcts::Searcher;
use std::io::{BufRead, Write};
use std::time::{Duration, Instant};

/// Wall-clock budgets
#[derive(Clone, Copy, Debug)]
pub struct TimeBudget {
    /// Budget for the first turn (history replay included)
    pub first_turn: Duration,
    /// Budget for every later turn
    pub per_turn: Duration,
    /// Subtracted from each budget to cover output and scheduling jitter
    pub safety_margin: Duration,
}

impl Default for TimeBudget {
    fn default() -> Self {
        Self {
            first_turn: Duration::from_millis(2_000),
            per_turn: Duration::from_millis(1_000),
            safety_margin: Duration::from_millis(100),
        }
    }
}

impl TimeBudget {
    fn deadline(&self, anchor: Instant, first: bool) -> Instant {
        let budget = if first { self.first_turn } else { self.per_turn };
        anchor + budget.saturating_sub(self.safety_margin)
    }
}

/// Per-turn entry point: wires the protocol to the search driver
pub struct TurnController {
    searcher: Searcher,
    budget: TimeBudget,
    keep_alive: bool,
}

impl TurnController {
    pub fn new(searcher: Searcher, budget: TimeBudget, keep_alive: bool) -> Self {
        Self {
            searcher,
            budget,
            keep_alive,
        }
    }

    /// Play one turn (or, in keep-alive mode, every turn until the stream
    /// ends or the game is decided). Exactly one move line is emitted per
    /// turn, always within the deadline.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        mut input: R,
        mut output: W,
        program_start: Instant,
    ) -> anyhow::Result<()> {
        let Some(turn_id) = protocol::read_turn_id(&mut input)? else {
            return Ok(());
        };
        let history = protocol::read_history(&mut input, turn_id)?;

        // The first request line identifies our color: the all -1 sentinel
        // means we open as Black.
        let our_side = if history[0].is_none() {
            Side::Black
        } else {
            Side::White
        };
        let committed: Vec<Move> = history.into_iter().filter(|m| !m.is_none()).collect();
        let mut board = Board::from_history(&committed);

        let mut turn = turn_id;
        let mut deadline = self.budget.deadline(program_start, turn_id == 1);

        loop {
            let mv = self.searcher.search(&board, our_side, turn, deadline);
            let stats = self.searcher.stats();
            tracing::info!(
                turn,
                iterations = stats.iterations,
                nodes = stats.nodes,
                no_expand = stats.no_expand,
                %mv,
                "turn complete"
            );

            writeln!(output, "{}", mv)?;
            if !self.keep_alive {
                output.flush()?;
                return Ok(());
            }
            writeln!(output, "{}", protocol::KEEP_RUNNING_MARKER)?;
            output.flush()?;

            if mv.is_none() {
                // No legal move: we have conceded, nothing left to play
                return Ok(());
            }
            board.apply(mv, our_side);

            let Some(reply) = protocol::read_move_line(&mut input)? else {
                return Ok(());
            };
            let anchor = Instant::now();
            if reply.is_none() {
                return Ok(());
            }
            board.apply(reply, our_side.opponent());
            turn += 1;
            deadline = self.budget.deadline(anchor, false);
        }
    }
}
