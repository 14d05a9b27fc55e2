//! 8x8 board state and legal-move generation

use crate::moves::Move;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Board edge length
pub const BOARD_SIZE: i8 = 8;

/// Total number of squares
pub const NUM_SQUARES: usize = 64;

/// Amazons per side at the start of the game
pub const AMAZONS_PER_SIDE: usize = 4;

/// Upper bound on the number of legal moves from any position.
///
/// A queen on an empty 8x8 board reaches at most 27 squares, so one amazon
/// contributes at most 27 * 27 (move, shot) pairs.
pub const MAX_MOVES: usize = AMAZONS_PER_SIDE * 27 * 27;

/// Eight compass directions as (row, col) unit vectors
/// Index: 0=N, 1=NE, 2=E, 3=SE, 4=S, 5=SW, 6=W, 7=NW
pub const DIRECTIONS: [(i8, i8); 8] = [
    (-1, 0),  // N
    (-1, 1),  // NE
    (0, 1),   // E
    (1, 1),   // SE
    (1, 0),   // S
    (1, -1),  // SW
    (0, -1),  // W
    (-1, -1), // NW
];

/// Side color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Black = 0,
    White = 1,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::Black => Side::White,
            Side::White => Side::Black,
        }
    }
}

/// Contents of one square
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Amazon(Side),
    Arrow,
}

/// Pack (row, col) into a square index
#[inline]
pub fn square(row: i8, col: i8) -> u8 {
    (row * BOARD_SIZE + col) as u8
}

/// Unpack a square index into (row, col)
#[inline]
pub fn coords(sq: u8) -> (i8, i8) {
    ((sq as i8) / BOARD_SIZE, (sq as i8) % BOARD_SIZE)
}

#[inline]
fn on_board(row: i8, col: i8) -> bool {
    (0..BOARD_SIZE).contains(&row) && (0..BOARD_SIZE).contains(&col)
}

/// Initial amazon squares as (row, col)
const BLACK_START: [(i8, i8); AMAZONS_PER_SIDE] = [(0, 2), (2, 0), (5, 0), (7, 2)];
const WHITE_START: [(i8, i8); AMAZONS_PER_SIDE] = [(0, 5), (2, 7), (5, 7), (7, 5)];

/// Game state (copied by value into each simulation path)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Board {
    cells: [Cell; NUM_SQUARES],
}

impl Board {
    /// Starting position
    pub fn new() -> Self {
        let mut board = Self::empty();
        for &(r, c) in &BLACK_START {
            board.cells[square(r, c) as usize] = Cell::Amazon(Side::Black);
        }
        for &(r, c) in &WHITE_START {
            board.cells[square(r, c) as usize] = Cell::Amazon(Side::White);
        }
        board
    }

    /// Board with no pieces (test positions are built square by square)
    pub fn empty() -> Self {
        Self {
            cells: [Cell::Empty; NUM_SQUARES],
        }
    }

    /// Reconstruct a position by replaying committed history, Black first.
    ///
    /// History moves are authoritative and applied without validation.
    pub fn from_history(history: &[Move]) -> Self {
        let mut board = Self::new();
        let mut side = Side::Black;
        for &mv in history {
            board.apply(mv, side);
            side = side.opponent();
        }
        board
    }

    #[inline]
    pub fn cell(&self, sq: u8) -> Cell {
        self.cells[sq as usize]
    }

    #[inline]
    pub fn set(&mut self, sq: u8, cell: Cell) {
        self.cells[sq as usize] = cell;
    }

    /// Collect the side's amazon squares; returns how many were found
    pub fn amazons(&self, side: Side, out: &mut [u8; AMAZONS_PER_SIDE]) -> usize {
        let mut n = 0;
        for sq in 0..NUM_SQUARES as u8 {
            if self.cells[sq as usize] == Cell::Amazon(side) {
                out[n] = sq;
                n += 1;
                if n == AMAZONS_PER_SIDE {
                    break;
                }
            }
        }
        n
    }

    /// Apply a move in place. Assumes legality.
    pub fn apply(&mut self, mv: Move, side: Side) {
        self.cells[mv.from as usize] = Cell::Empty;
        self.cells[mv.to as usize] = Cell::Amazon(side);
        self.cells[mv.arrow as usize] = Cell::Arrow;
    }

    /// Enumerate every legal move for `side` into the caller's buffer.
    ///
    /// The buffer is cleared first; callers pre-reserve to avoid reallocation
    /// in the search loop. Output order is deterministic given the state. An
    /// empty result means `side` has lost.
    pub fn legal_moves_into(&self, side: Side, out: &mut Vec<Move>) {
        out.clear();
        let mut amazons = [0u8; AMAZONS_PER_SIDE];
        let n = self.amazons(side, &mut amazons);
        for &from in &amazons[..n] {
            let (fr, fc) = coords(from);
            for &(dr, dc) in &DIRECTIONS {
                let mut r = fr + dr;
                let mut c = fc + dc;
                while on_board(r, c) && self.cells[square(r, c) as usize] == Cell::Empty {
                    let to = square(r, c);
                    self.arrows_into(from, to, out);
                    r += dr;
                    c += dc;
                }
            }
        }
    }

    /// Convenience wrapper with a fresh pre-reserved buffer
    pub fn legal_moves(&self, side: Side) -> Vec<Move> {
        let mut out = Vec::with_capacity(MAX_MOVES);
        self.legal_moves_into(side, &mut out);
        out
    }

    /// Push one move per arrow square reachable from `to`, with the amazon's
    /// origin square treated as empty (the shot may land where it came from).
    fn arrows_into(&self, from: u8, to: u8, out: &mut Vec<Move>) {
        let (tr, tc) = coords(to);
        for &(dr, dc) in &DIRECTIONS {
            let mut r = tr + dr;
            let mut c = tc + dc;
            while on_board(r, c) {
                let sq = square(r, c);
                if sq != from && self.cells[sq as usize] != Cell::Empty {
                    break;
                }
                out.push(Move::new(from, to, sq));
                r += dr;
                c += dc;
            }
        }
    }

    /// Total queen-slide destination count over empty squares for `side`
    /// (the evaluator's mobility term)
    pub fn mobility(&self, side: Side) -> u32 {
        let mut amazons = [0u8; AMAZONS_PER_SIDE];
        let n = self.amazons(side, &mut amazons);
        let mut count = 0;
        for &from in &amazons[..n] {
            let (fr, fc) = coords(from);
            for &(dr, dc) in &DIRECTIONS {
                let mut r = fr + dr;
                let mut c = fc + dc;
                while on_board(r, c) && self.cells[square(r, c) as usize] == Cell::Empty {
                    count += 1;
                    r += dr;
                    c += dc;
                }
            }
        }
        count
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let glyph = match self.cells[square(row, col) as usize] {
                    Cell::Empty => '.',
                    Cell::Amazon(Side::Black) => 'b',
                    Cell::Amazon(Side::White) => 'w',
                    Cell::Arrow => 'x',
                };
                write!(f, "{}", glyph)?;
                if col + 1 < BOARD_SIZE {
                    write!(f, " ")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
