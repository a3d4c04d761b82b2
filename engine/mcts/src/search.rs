//! Single-tree MCTS over one determinized state.
//!
//! Every simulation runs the four phases in order:
//! 1. Selection: descend with UCB1 while nodes are fully expanded
//! 2. Expansion: add one child for a random untried move
//! 3. Rollout: play the new child out with the rollout policy
//! 4. Backpropagation: record the outcome from the child up to the root

use std::time::Instant;

use engine_core::{GameError, GameState};
use rand_chacha::ChaCha20Rng;
use thiserror::Error;
use tracing::trace;

use crate::config::ConfigError;
use crate::rollout::RolloutPolicy;
use crate::tree::MctsTree;

/// Errors that can occur during a search.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Invalid search configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    /// An unfinished position reported no legal moves.
    #[error("No legal moves available")]
    NoLegalMoves,

    #[error("Game contract violated: {0}")]
    ContractViolation(String),

    #[error("Game error: {0}")]
    Game(#[from] GameError),
}

/// MCTS search state for a single tree.
pub struct MctsSearch<'a, S: GameState, R: RolloutPolicy<S>> {
    tree: MctsTree<S>,
    rollout: &'a R,
    exploration: f64,
}

impl<'a, S: GameState, R: RolloutPolicy<S>> MctsSearch<'a, S, R> {
    /// Create a new search rooted at `state`.
    pub fn new(state: S, rollout: &'a R, exploration: f64) -> Self {
        Self {
            tree: MctsTree::new(state),
            rollout,
            exploration,
        }
    }

    /// Run up to `iterations` simulations, stopping early once `deadline` passes.
    ///
    /// The deadline is only checked between simulations. Returns the number
    /// of simulations completed.
    pub fn run(
        &mut self,
        iterations: u32,
        deadline: Option<Instant>,
        rng: &mut ChaCha20Rng,
    ) -> Result<u32, SearchError> {
        let mut completed = 0;
        for _ in 0..iterations {
            if deadline.is_some_and(|d| Instant::now() >= d) {
                break;
            }
            self.simulate(rng)?;
            completed += 1;
        }
        Ok(completed)
    }

    /// Run a single simulation (select -> expand -> rollout -> backpropagate).
    pub fn simulate(&mut self, rng: &mut ChaCha20Rng) -> Result<(), SearchError> {
        let leaf_id = self.tree.select(self.tree.root(), self.exploration);

        // Terminal leaves are scored directly; everything else grows by one child.
        let target = if self.tree.get(leaf_id).is_terminal() {
            leaf_id
        } else {
            self.tree.expand(leaf_id, rng)?
        };

        let outcome = self.rollout.rollout(&self.tree.get(target).state, rng)?;
        self.tree.backpropagate(target, &outcome);

        trace!(
            leaf = leaf_id.0,
            target = target.0,
            nodes = self.tree.len(),
            ?outcome,
            "simulation complete"
        );
        Ok(())
    }

    /// Get the search tree (for inspection/debugging).
    pub fn tree(&self) -> &MctsTree<S> {
        &self.tree
    }

    pub fn into_tree(self) -> MctsTree<S> {
        self.tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeId;
    use crate::rollout::RandomRollout;
    use crate::test_games::{DeadEnd, Liar};
    use engine_core::Player;
    use games_tictactoe::State;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn searched(state: State, iterations: u32, seed: u64) -> MctsTree<State> {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let mut search = MctsSearch::new(state, &RandomRollout, 1.0);
        let completed = search.run(iterations, None, &mut rng).unwrap();
        assert_eq!(completed, iterations);
        search.into_tree()
    }

    #[test]
    fn test_root_visits_equal_completed_simulations() {
        let tree = searched(State::new(), 300, 42);
        assert_eq!(tree.get(tree.root()).visits, 300);
        assert_eq!(tree.stats().root_visits, 300);
    }

    #[test]
    fn test_outcome_counts_are_conserved() {
        let tree = searched(State::new(), 500, 7);
        for node in tree.arena() {
            assert_eq!(
                node.wins(Player::One) + node.wins(Player::Two) + node.draws(),
                node.visits
            );
        }
    }

    #[test]
    fn test_visits_split_over_children() {
        let tree = searched(State::new(), 400, 11);
        for (idx, node) in tree.arena().iter().enumerate() {
            let child_visits: u32 = node.children.iter().map(|&c| tree.get(c).visits).sum();
            if node.is_terminal() {
                assert!(node.children.is_empty());
            } else if NodeId(idx as u32) == tree.root() {
                assert_eq!(node.visits, child_visits);
            } else {
                // One visit belongs to the rollout that created the node.
                assert_eq!(node.visits, child_visits + 1);
            }
        }
    }

    #[test]
    fn test_no_move_is_expanded_twice() {
        let tree = searched(State::new(), 400, 5);
        for node in tree.arena() {
            let moves: HashSet<u8> = node
                .children
                .iter()
                .filter_map(|&c| tree.get(c).move_played)
                .collect();
            assert_eq!(moves.len(), node.children.len());

            if let Some(untried) = node.untried_moves() {
                assert_eq!(
                    node.children.len() + untried.len(),
                    node.state.legal_moves().len()
                );
                assert!(untried.iter().all(|mv| !moves.contains(mv)));
            }
        }
    }

    #[test]
    fn test_same_seed_same_tree() {
        let a = searched(State::new(), 200, 99);
        let b = searched(State::new(), 200, 99);
        assert_eq!(a.root_move_stats(), b.root_move_stats());
        assert_eq!(a.stats(), b.stats());
    }

    #[test]
    fn test_winning_move_dominates() {
        // X | X | _
        // O | O | _
        // _ | _ | _
        let state = State::from_board([1, 1, 0, 2, 2, 0, 0, 0, 0]);
        let tree = searched(state, 800, 42);

        let stats = tree.root_move_stats();
        let (_, winning) = stats.iter().find(|(mv, _)| *mv == 2).unwrap();
        assert_eq!(winning.wins, winning.visits);
        let most_visited = stats.iter().max_by_key(|(_, s)| s.visits).map(|(mv, _)| *mv);
        assert_eq!(most_visited, Some(2));
    }

    #[test]
    fn test_single_simulation_adds_one_child() {
        let tree = searched(State::new(), 1, 0);
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.get(tree.root()).children.len(), 1);
        assert_eq!(tree.get(tree.root()).visits, 1);
    }

    #[test]
    fn test_expired_deadline_runs_nothing() {
        let mut rng = ChaCha20Rng::seed_from_u64(0);
        let mut search = MctsSearch::new(State::new(), &RandomRollout, 1.0);
        let completed = search.run(100, Some(Instant::now()), &mut rng).unwrap();
        assert_eq!(completed, 0);
        assert_eq!(search.tree().len(), 1);
    }

    #[test]
    fn test_dead_end_is_reported() {
        let mut rng = ChaCha20Rng::seed_from_u64(0);
        let mut search = MctsSearch::new(DeadEnd::new(), &RandomRollout, 1.0);
        let err = search.simulate(&mut rng).unwrap_err();
        assert!(matches!(err, SearchError::NoLegalMoves));
    }

    #[test]
    fn test_rejected_move_is_contract_violation() {
        let mut rng = ChaCha20Rng::seed_from_u64(0);
        let mut search = MctsSearch::new(Liar, &RandomRollout, 1.0);
        let err = search.simulate(&mut rng).unwrap_err();
        assert!(matches!(err, SearchError::ContractViolation(_)));
    }
}
