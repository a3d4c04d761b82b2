//! Determinized Monte Carlo Tree Search for two-player games with hidden information.
//!
//! This crate provides a game-agnostic move selector that works with any game
//! implementing the `engine-core` [`GameState`](engine_core::GameState) trait.
//!
//! # Overview
//!
//! While part of the position is hidden from the mover
//! ([`Phase::Imperfect`](engine_core::Phase)), the selector samples
//! determinizations: complete positions consistent with what the mover can
//! see. Each determinization gets its own search tree, and each tree runs
//! simulations consisting of four phases:
//!
//! 1. **Selection**: Traverse the tree using UCB1 to balance exploration and
//!    exploitation
//! 2. **Expansion**: Add one child for a random untried move
//! 3. **Rollout**: Play random moves from the new child to the end of the game
//! 4. **Backpropagation**: Record the outcome along the path from the child to
//!    the root
//!
//! Root statistics of all trees are merged by move and the move with the best
//! win ratio is played.
//!
//! Once nothing is hidden ([`Phase::Perfect`](engine_core::Phase)), a
//! depth-limited alpha-beta search takes over.
//!
//! # Usage
//!
//! ```rust
//! use games_schnapsen::State;
//! use mcts::{select_move, SearchConfig};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha20Rng;
//!
//! let mut rng = ChaCha20Rng::seed_from_u64(42);
//! let state = State::deal(&mut rng);
//!
//! let config = SearchConfig::for_testing().with_seed(7);
//! let card = select_move(&state, &config).unwrap();
//! assert!(card.is_some());
//! ```
//!
//! # Configuration
//!
//! The [`SearchConfig`] struct controls search behavior:
//!
//! - `determinizations`: Number of sampled positions (default: 20)
//! - `rollouts_per_round`: Simulations per sampled position (default: 250)
//! - `exploration`: UCB1 exploration constant (default: 1/sqrt(2))
//! - `max_depth`: Alpha-beta depth limit (default: 8)
//! - `time_budget`: Optional wall-clock limit, checked between simulations
//!
//! # Architecture
//!
//! ```text
//! select_move
//!   |-- Imperfect --> DeterminizedMcts --(per round)--> MctsSearch --> MctsTree (arena)
//!   |                        |                              |
//!   |                 MoveAccumulator                 RolloutPolicy
//!   `-- Perfect ----> AlphaBeta
//! ```

pub mod config;
pub mod decision;
pub mod driver;
pub mod minimax;
pub mod node;
pub mod rollout;
pub mod search;
pub mod tree;

#[cfg(test)]
mod test_games;

// Re-export main types
pub use config::{ConfigError, SearchConfig, TieBreak};
pub use decision::{decide, select_move, Decision};
pub use driver::{run_mcts, stream_rng, DeterminizedMcts, MoveAccumulator, SearchResult};
pub use minimax::{heuristic, minimax, AlphaBeta};
pub use node::{MoveStats, NodeId, SearchNode};
pub use rollout::{RandomRollout, RolloutPolicy};
pub use search::{MctsSearch, SearchError};
pub use tree::{MctsTree, TreeStats};
