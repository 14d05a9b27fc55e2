//! Deadline-bounded MCTS search loop
//!
//! One iteration runs the four phases:
//! 1. Selection - UCB1 descent with a simulation-private board copy
//! 2. Expansion - one random untried move becomes a new child
//! 3. Evaluation - terminal result or the positional evaluator
//! 4. Backpropagation - visit/win updates from leaf to root
//!
//! The loop is cancelled only by the deadline. Pool exhaustion flips the
//! driver into no-expand mode for the rest of the turn; it keeps deepening
//! the existing tree instead of aborting.

use crate::arena::{MoveArena, MoveSlot};
use crate::tree::{Node, NodeId, Tree};
use crate::MctsConfig;
use amazons_core::board::MAX_MOVES;
use amazons_core::{Board, Evaluator, Move, PhaseTable, Side};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::time::Instant;

/// Decaying exploration schedule: exploit more as the game progresses
#[inline]
pub fn exploration_constant(turn: u32) -> f64 {
    0.177 * (-0.008 * (turn as f64 - 1.41)).exp()
}

/// Counters from the most recent search, for logging
#[derive(Clone, Copy, Debug, Default)]
pub struct SearchStats {
    /// Completed simulations
    pub iterations: u64,
    /// Nodes allocated in the tree
    pub nodes: usize,
    /// Whether a pool ran out and expansion was disabled
    pub no_expand: bool,
}

/// Single-threaded MCTS driver owning the tree, the move pool, the
/// evaluator scratch space, and the PRNG stream.
///
/// Both pools are released wholesale at the start of every turn; the tree is
/// rebuilt rather than carried across turns.
pub struct Searcher {
    tree: Tree,
    moves: MoveArena,
    evaluator: Evaluator,
    rng: ChaCha8Rng,
    scratch: Vec<Move>,
    stats: SearchStats,
}

impl Searcher {
    pub fn new(config: &MctsConfig, table: PhaseTable) -> Self {
        Self {
            tree: Tree::new(config.node_capacity),
            moves: MoveArena::new(config.move_capacity),
            evaluator: Evaluator::new(table),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            scratch: Vec::with_capacity(MAX_MOVES),
            stats: SearchStats::default(),
        }
    }

    /// Counters from the most recent [`search`](Self::search) call
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Search the position until `deadline` and return the best move found.
    ///
    /// Returns [`Move::NONE`] when `root_side` has no legal move. Always
    /// returns by the deadline, falling back to an untried root move when
    /// not a single expansion completed in time.
    pub fn search(
        &mut self,
        root_board: &Board,
        root_side: Side,
        turn: u32,
        deadline: Instant,
    ) -> Move {
        self.tree.reset();
        self.moves.reset();
        self.stats = SearchStats::default();

        root_board.legal_moves_into(root_side, &mut self.scratch);
        if self.scratch.is_empty() {
            return Move::NONE;
        }
        let fallback = self.scratch[0];

        let root = match self.moves.alloc(&self.scratch) {
            Some(untried) => {
                let node = Node::new(
                    Move::NONE,
                    NodeId::NONE,
                    root_side.opponent(),
                    untried,
                    false,
                );
                match self.tree.alloc(node) {
                    Some(root) => root,
                    None => return fallback,
                }
            }
            None => {
                tracing::warn!("move pool cannot hold the root move list");
                return fallback;
            }
        };

        let c = exploration_constant(turn);
        let mut no_expand = false;

        while Instant::now() < deadline {
            // Phase A -- selection
            let mut board = *root_board;
            let mut node_id = root;
            loop {
                let node = self.tree.get(node_id);
                let descend = if no_expand {
                    node.has_children()
                } else {
                    node.untried.is_empty() && node.has_children()
                };
                if !descend {
                    break;
                }
                let chosen = self.select_child(node_id, c);
                let child = self.tree.get(chosen);
                board.apply(child.mv, child.player_just_moved);
                node_id = chosen;
            }

            // Phase B -- expansion
            if !no_expand && self.tree.len() == self.tree.capacity() {
                no_expand = true;
                tracing::debug!("node arena exhausted, switching to no-expand mode");
            }
            if !no_expand && !self.tree.get(node_id).untried.is_empty() {
                let mut slot = self.tree.get(node_id).untried;
                let idx = self.rng.gen_range(0..slot.len());
                let mv = self.moves.swap_remove(&mut slot, idx);
                self.tree.get_mut(node_id).untried = slot;

                let mover = self.tree.get(node_id).player_just_moved.opponent();
                board.apply(mv, mover);
                board.legal_moves_into(mover.opponent(), &mut self.scratch);
                let no_moves = self.scratch.is_empty();
                let untried = match self.moves.alloc(&self.scratch) {
                    Some(child_slot) => child_slot,
                    None => {
                        // The child stays a sterile leaf; its legality is
                        // unaffected, it just cannot expand.
                        no_expand = true;
                        tracing::debug!("move pool exhausted, switching to no-expand mode");
                        MoveSlot::EMPTY
                    }
                };
                if let Some(child) = self
                    .tree
                    .alloc(Node::new(mv, node_id, mover, untried, no_moves))
                {
                    self.tree.attach_child(node_id, child);
                    node_id = child;
                }
            }

            // Phase C -- evaluation
            let leaf = self.tree.get(node_id);
            let w = if leaf.no_moves {
                // The side to move here has no moves and loses; score for
                // the player who just moved.
                if leaf.player_just_moved == root_side {
                    1.0
                } else {
                    0.0
                }
            } else {
                self.evaluator.evaluate(&board, root_side, turn)
            };

            // Phase D -- backpropagation
            let mut cur = node_id;
            while !cur.is_none() {
                let node = self.tree.get_mut(cur);
                node.visits += 1;
                node.wins += if node.player_just_moved == root_side {
                    w
                } else {
                    1.0 - w
                };
                cur = node.parent;
            }

            self.stats.iterations += 1;
        }

        self.stats.nodes = self.tree.len();
        self.stats.no_expand = no_expand;

        // Most-visited root child; strict > over insertion order keeps the
        // earliest child on a tie
        let mut best = NodeId::NONE;
        let mut best_visits = 0u32;
        for child_id in self.tree.children(root) {
            let visits = self.tree.get(child_id).visits;
            if visits > best_visits {
                best_visits = visits;
                best = child_id;
            }
        }
        if !best.is_none() {
            return self.tree.get(best).mv;
        }
        // Deadline consumed before a single expansion
        let slot = self.tree.get(root).untried;
        if !slot.is_empty() {
            self.moves.get(slot)[0]
        } else {
            fallback
        }
    }

    /// UCB1 argmax over the expanded children of `parent`.
    ///
    /// An unvisited child scores infinity and is taken immediately; ties
    /// keep the earliest child in insertion order. Caller guarantees at
    /// least one child.
    fn select_child(&self, parent: NodeId, c: f64) -> NodeId {
        let log_visits = (self.tree.get(parent).visits as f64).ln();
        let mut best = NodeId::NONE;
        let mut best_score = f64::NEG_INFINITY;
        for child_id in self.tree.children(parent) {
            let child = self.tree.get(child_id);
            if child.visits == 0 {
                return child_id;
            }
            let v = child.visits as f64;
            let score = child.wins / v + c * (log_visits / v).sqrt();
            if score > best_score {
                best_score = score;
                best = child_id;
            }
        }
        best
    }
}
