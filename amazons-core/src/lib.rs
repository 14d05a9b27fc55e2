//! Amazons Core - Game rules and evaluation
//!
//! This crate provides the rules layer of the Amazons engine:
//! - Board state and legal-move generation (queen move + arrow shot)
//! - Compact move encoding and the six-integer line wire format
//! - Multi-source BFS distance maps over empty squares
//! - Multi-component positional evaluation with phase-dependent weights

pub mod board;
pub mod dist;
pub mod eval;
pub mod moves;

// Re-exports
pub use board::{Board, Cell, Side};
pub use dist::UNREACHABLE;
pub use eval::{Evaluator, PhaseTable};
pub use moves::{Move, ParseMoveError};
