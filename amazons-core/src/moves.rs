//! Compact move encoding and the line wire format

use crate::board::{square, BOARD_SIZE};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A complete move: amazon source, destination, and arrow landing square.
///
/// Fields hold square indices 0..63, or all -1 for the "no legal move"
/// sentinel. Equality is componentwise.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub from: i8,
    pub to: i8,
    pub arrow: i8,
}

/// Wire-format parse failure (the history is otherwise applied unvalidated)
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseMoveError {
    #[error("expected 6 fields, got {0}")]
    FieldCount(usize),
    #[error("field {0:?} is not an integer")]
    NotAnInteger(String),
    #[error("coordinate {0} outside 0..8")]
    OutOfRange(i64),
    #[error("-1 coordinates must form a full sentinel line")]
    PartialSentinel,
}

impl Move {
    /// "No legal move" sentinel
    pub const NONE: Move = Move {
        from: -1,
        to: -1,
        arrow: -1,
    };

    pub fn new(from: u8, to: u8, arrow: u8) -> Self {
        Self {
            from: from as i8,
            to: to as i8,
            arrow: arrow as i8,
        }
    }

    pub fn is_none(self) -> bool {
        self.from < 0
    }

    /// Parse a move line: six whitespace-separated integers
    /// `r_from c_from r_to c_to r_arrow c_arrow`, or all -1 for the sentinel.
    pub fn parse_line(line: &str) -> Result<Self, ParseMoveError> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() != 6 {
            return Err(ParseMoveError::FieldCount(tokens.len()));
        }
        let mut fields = [0i64; 6];
        for (field, token) in fields.iter_mut().zip(&tokens) {
            *field = token
                .parse()
                .map_err(|_| ParseMoveError::NotAnInteger(token.to_string()))?;
        }

        if fields.iter().any(|&f| f < 0) {
            if fields.iter().all(|&f| f == -1) {
                return Ok(Move::NONE);
            }
            return Err(ParseMoveError::PartialSentinel);
        }
        for &f in &fields {
            if f >= BOARD_SIZE as i64 {
                return Err(ParseMoveError::OutOfRange(f));
            }
        }
        Ok(Move {
            from: square(fields[0] as i8, fields[1] as i8) as i8,
            to: square(fields[2] as i8, fields[3] as i8) as i8,
            arrow: square(fields[4] as i8, fields[5] as i8) as i8,
        })
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            return write!(f, "-1 -1 -1 -1 -1 -1");
        }
        let (fr, fc) = (self.from / BOARD_SIZE, self.from % BOARD_SIZE);
        let (tr, tc) = (self.to / BOARD_SIZE, self.to % BOARD_SIZE);
        let (ar, ac) = (self.arrow / BOARD_SIZE, self.arrow % BOARD_SIZE);
        write!(f, "{} {} {} {} {} {}", fr, fc, tr, tc, ar, ac)
    }
}
