//! Amazons MCTS - Deadline-bounded Monte Carlo Tree Search
//!
//! This crate provides the search layer of the Amazons engine:
//! - Fixed-capacity node and move pools (released wholesale per turn)
//! - UCB1 tree policy with a decaying exploration schedule
//! - Leaf evaluation through the positional evaluator
//! - A hard wall-clock deadline as the only cancellation signal

mod arena;
mod search;
mod tree;

pub use arena::{MoveArena, MoveSlot};
pub use search::{exploration_constant, SearchStats, Searcher};
pub use tree::{Node, NodeId, Tree};

/// Search configuration
#[derive(Clone, Debug)]
pub struct MctsConfig {
    /// Maximum tree nodes per turn
    pub node_capacity: usize,
    /// Maximum pooled untried-move entries per turn
    pub move_capacity: usize,
    /// PRNG seed; search is reproducible given the same seed and inputs,
    /// modulo clock-driven deadlines
    pub seed: u64,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            node_capacity: 1 << 20,
            move_capacity: 1 << 25,
            seed: 42,
        }
    }
}

impl MctsConfig {
    /// Create config with a specific seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = MctsConfig::default();
        assert_eq!(config.node_capacity, 1 << 20);
        assert_eq!(config.move_capacity, 1 << 25);
    }

    #[test]
    fn test_config_with_seed() {
        let config = MctsConfig::default().with_seed(99);
        assert_eq!(config.seed, 99);
    }
}
