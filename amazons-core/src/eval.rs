//! Multi-component positional evaluation
//!
//! Two BFS distance maps (one per side) feed a single pass over the 64
//! squares that accumulates territory, position, and mobility terms. The
//! weighted sum is squashed to (0,1) so search can treat it as a win
//! probability for the root side.

use crate::board::{Board, Cell, Side, NUM_SQUARES};
use crate::dist::{distances, UNREACHABLE};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 2^-d for the queen-position term, cut off at distance 10
const POW2_NEG: [f64; 10] = [
    1.0,
    0.5,
    0.25,
    0.125,
    0.0625,
    0.03125,
    0.015625,
    0.0078125,
    0.00390625,
    0.001953125,
];

/// 1/(d+1) for the king-position term, cut off at distance 6
const PROXIMITY: [f64; 6] = [
    1.0,
    0.5,
    1.0 / 3.0,
    0.25,
    0.2,
    1.0 / 6.0,
];

/// King-territory weighting horizon: squares at distance 3 or less count
const KING_TERRITORY_HORIZON: u8 = 4;

const SCALE: f64 = 0.20;

/// Anchor weight rows [w_Tq, w_Tk, w_Pq, w_Pk, w_M]
const OPENING_WEIGHTS: [f64; 5] = [0.14, 0.37, 0.13, 0.13, 0.23];
const ENDGAME_WEIGHTS: [f64; 5] = [0.65, 0.10, 0.05, 0.05, 0.15];

/// Turns covered by the default table; later turns clamp to the last row
const DEFAULT_ROWS: usize = 28;

/// Per-turn evaluation weights.
///
/// Row `t` holds the weights used on turn `t + 1`; turns past the end of the
/// table use the last row. Tables are a configuration input and can be
/// loaded from JSON.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PhaseTable {
    rows: Vec<[f64; 5]>,
}

impl Default for PhaseTable {
    fn default() -> Self {
        // Territory gains weight as the board fills in; positional and
        // mobility terms matter most while regions are still contested.
        let rows = (0..DEFAULT_ROWS)
            .map(|t| {
                let f = t as f64 / (DEFAULT_ROWS - 1) as f64;
                let mut row = [0.0; 5];
                for (i, w) in row.iter_mut().enumerate() {
                    *w = OPENING_WEIGHTS[i] + f * (ENDGAME_WEIGHTS[i] - OPENING_WEIGHTS[i]);
                }
                row
            })
            .collect();
        Self { rows }
    }
}

impl PhaseTable {
    /// Weights for a 1-based turn index, clamped to the last row
    pub fn weights(&self, turn: u32) -> &[f64; 5] {
        let row = (turn.saturating_sub(1) as usize).min(self.rows.len() - 1);
        &self.rows[row]
    }

    /// Load a table from a JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let table: PhaseTable = serde_json::from_str(&content)?;
        anyhow::ensure!(!table.rows.is_empty(), "weight table has no rows");
        anyhow::ensure!(
            table.rows.iter().flatten().all(|&w| w >= 0.0),
            "weight table contains a negative weight"
        );
        Ok(table)
    }
}

/// Position evaluator with fixed scratch buffers.
///
/// `evaluate` performs no allocation; the distance maps and BFS queue are
/// reused across calls.
pub struct Evaluator {
    table: PhaseTable,
    dist_mine: [u8; NUM_SQUARES],
    dist_opp: [u8; NUM_SQUARES],
}

impl Evaluator {
    pub fn new(table: PhaseTable) -> Self {
        Self {
            table,
            dist_mine: [UNREACHABLE; NUM_SQUARES],
            dist_opp: [UNREACHABLE; NUM_SQUARES],
        }
    }

    /// Estimated probability that `root_side` wins from this position,
    /// in (0,1). Deterministic: identical inputs yield identical bits.
    pub fn evaluate(&mut self, board: &Board, root_side: Side, turn: u32) -> f64 {
        distances(board, root_side, &mut self.dist_mine);
        distances(board, root_side.opponent(), &mut self.dist_opp);

        let mut queen_territory = 0.0;
        let mut king_territory = 0.0;
        let mut queen_position = 0.0;
        let mut king_position = 0.0;

        for sq in 0..NUM_SQUARES {
            if board.cell(sq as u8) != Cell::Empty {
                continue;
            }
            let dm = self.dist_mine[sq];
            let dopp = self.dist_opp[sq];

            if dm < dopp {
                queen_territory += 1.0;
                if dm < KING_TERRITORY_HORIZON {
                    king_territory += (KING_TERRITORY_HORIZON - dm) as f64;
                }
            } else if dopp < dm {
                queen_territory -= 1.0;
                if dopp < KING_TERRITORY_HORIZON {
                    king_territory -= (KING_TERRITORY_HORIZON - dopp) as f64;
                }
            }

            if (dm as usize) < POW2_NEG.len() {
                queen_position += POW2_NEG[dm as usize];
            }
            if (dopp as usize) < POW2_NEG.len() {
                queen_position -= POW2_NEG[dopp as usize];
            }
            if (dm as usize) < PROXIMITY.len() {
                king_position += PROXIMITY[dm as usize];
            }
            if (dopp as usize) < PROXIMITY.len() {
                king_position -= PROXIMITY[dopp as usize];
            }
        }

        let mobility =
            board.mobility(root_side) as f64 - board.mobility(root_side.opponent()) as f64;

        let w = self.table.weights(turn);
        let s = SCALE
            * (w[0] * queen_territory
                + w[1] * king_territory
                + w[2] * queen_position
                + w[3] * king_position
                + w[4] * mobility);
        squash(s)
    }
}

/// Rational squashing to (0,1); cheaper than a logistic and fixed across the
/// whole engine so backpropagation sums stay consistent
#[inline]
fn squash(s: f64) -> f64 {
    0.5 * (s / (1.0 + s.abs()) + 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{square, Board, Cell, Side};

    #[test]
    fn test_squash_bounds_and_monotonicity() {
        assert_eq!(squash(0.0), 0.5);
        assert!(squash(1e6) < 1.0);
        assert!(squash(-1e6) > 0.0);
        assert!(squash(1.0) > squash(0.5));
        assert!(squash(-1.0) < squash(-0.5));
    }

    #[test]
    fn test_initial_position_is_balanced() {
        let board = Board::new();
        let mut eval = Evaluator::new(PhaseTable::default());
        let black = eval.evaluate(&board, Side::Black, 1);
        let white = eval.evaluate(&board, Side::White, 1);

        assert!(black > 0.0 && black < 1.0);
        // The opening layout is mirror-symmetric, so the two perspectives
        // are exact complements.
        assert!((black + white - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_evaluate_is_deterministic() {
        let board = Board::new();
        let mut eval = Evaluator::new(PhaseTable::default());
        let a = eval.evaluate(&board, Side::Black, 5);
        let b = eval.evaluate(&board, Side::Black, 5);
        assert_eq!(a.to_bits(), b.to_bits());
    }

    #[test]
    fn test_dominant_territory_scores_high() {
        // White walled into the corner, Black free in the center
        let mut board = Board::empty();
        board.set(square(0, 0), Cell::Amazon(Side::White));
        board.set(square(0, 1), Cell::Arrow);
        board.set(square(1, 0), Cell::Arrow);
        board.set(square(1, 1), Cell::Arrow);
        board.set(square(4, 4), Cell::Amazon(Side::Black));

        let mut eval = Evaluator::new(PhaseTable::default());
        let score = eval.evaluate(&board, Side::Black, 10);
        assert!(score > 0.7, "score was {}", score);
        let flipped = eval.evaluate(&board, Side::White, 10);
        assert!(flipped < 0.3, "score was {}", flipped);
    }

    fn rows_close(a: &[f64; 5], b: &[f64; 5]) -> bool {
        a.iter().zip(b).all(|(x, y)| (x - y).abs() < 1e-9)
    }

    #[test]
    fn test_phase_table_clamps_to_last_row() {
        let table = PhaseTable::default();
        assert!(rows_close(table.weights(1), &OPENING_WEIGHTS));
        assert!(rows_close(table.weights(DEFAULT_ROWS as u32), &ENDGAME_WEIGHTS));
        assert_eq!(table.weights(1000), table.weights(DEFAULT_ROWS as u32));
    }

    #[test]
    fn test_phase_table_weights_nonnegative() {
        let table = PhaseTable::default();
        assert!(table.rows.iter().flatten().all(|&w| w >= 0.0));
    }

    #[test]
    fn test_phase_table_json_round_trip() {
        let table = PhaseTable::default();
        let json = serde_json::to_string(&table).unwrap();
        let back: PhaseTable = serde_json::from_str(&json).unwrap();
        assert_eq!(table.rows, back.rows);
    }
}
