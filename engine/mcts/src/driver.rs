//! Determinized MCTS driver.
//!
//! The true state hides information from the mover, so the driver samples
//! `D` determinizations, searches each one with its own tree for `R`
//! simulations, and merges the root statistics of every tree by move. The
//! merged move with the best win ratio is played.

use std::time::{Duration, Instant};

use engine_core::{GameError, GameState};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::config::{SearchConfig, TieBreak};
use crate::node::MoveStats;
use crate::rollout::{RandomRollout, RolloutPolicy};
use crate::search::{MctsSearch, SearchError};

/// Stream reserved for choices made outside any round (tie breaks, fallback).
const CONTROL_STREAM: u64 = u64::MAX;

/// Random source for one stream of a seeded search.
///
/// Each round uses its own stream so rounds can run in any order, or in
/// parallel, and still draw the same numbers.
pub fn stream_rng(seed: u64, stream: u64) -> ChaCha20Rng {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    rng.set_stream(stream);
    rng
}

/// Per-move statistics merged across rounds, kept in first-seen order.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveAccumulator<M> {
    entries: Vec<(M, MoveStats)>,
}

impl<M> Default for MoveAccumulator<M> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<M: Clone + PartialEq> MoveAccumulator<M> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add statistics for `mv`, merging with any earlier entry for the same move.
    pub fn add(&mut self, mv: M, stats: MoveStats) {
        match self.entries.iter_mut().find(|(seen, _)| *seen == mv) {
            Some((_, total)) => total.merge(&stats),
            None => self.entries.push((mv, stats)),
        }
    }

    pub fn get(&self, mv: &M) -> Option<&MoveStats> {
        self.entries
            .iter()
            .find(|(seen, _)| seen == mv)
            .map(|(_, stats)| stats)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[(M, MoveStats)] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<(M, MoveStats)> {
        self.entries
    }

    /// Move with the highest win ratio among visited moves.
    ///
    /// Win ratios are compared exactly (`wins_a * visits_b` against
    /// `wins_b * visits_a`). Returns None when no move was visited.
    pub fn best(&self, tie_break: TieBreak, rng: &mut ChaCha20Rng) -> Option<M> {
        let mut tied: Vec<usize> = Vec::new();
        for (idx, (_, stats)) in self.entries.iter().enumerate() {
            if stats.visits == 0 {
                continue;
            }
            let Some(&leader) = tied.first() else {
                tied.push(idx);
                continue;
            };
            let lead = &self.entries[leader].1;
            let lhs = u64::from(stats.wins) * u64::from(lead.visits);
            let rhs = u64::from(lead.wins) * u64::from(stats.visits);
            match lhs.cmp(&rhs) {
                std::cmp::Ordering::Greater => {
                    tied.clear();
                    tied.push(idx);
                }
                std::cmp::Ordering::Equal => tied.push(idx),
                std::cmp::Ordering::Less => {}
            }
        }

        let pick = match (tie_break, tied.len()) {
            (_, 0) => return None,
            (TieBreak::Random, n) if n > 1 => tied[rng.gen_range(0..n)],
            _ => tied[0],
        };
        Some(self.entries[pick].0.clone())
    }
}

/// Result of a determinized search.
#[derive(Debug, Clone)]
pub struct SearchResult<M> {
    /// Move to play
    pub best_move: M,

    /// Merged root statistics for every legal root move, in legal-move order.
    /// Moves no round expanded have zero visits. Empty when the move was forced.
    pub stats: Vec<(M, MoveStats)>,

    /// Simulations completed across all rounds
    pub iterations: u64,

    /// Rounds that completed at least one simulation
    pub rounds: u32,

    /// True when the time budget ran out before any simulation finished and
    /// `best_move` is a random legal move
    pub fallback: bool,

    pub elapsed: Duration,
}

impl<M: PartialEq> SearchResult<M> {
    pub fn stats_for(&self, mv: &M) -> Option<&MoveStats> {
        self.stats
            .iter()
            .find(|(seen, _)| seen == mv)
            .map(|(_, stats)| stats)
    }
}

struct RoundSummary<M> {
    stats: Vec<(M, MoveStats)>,
    iterations: u32,
}

/// Determinized Monte Carlo Tree Search.
#[derive(Debug, Clone)]
pub struct DeterminizedMcts<R = RandomRollout> {
    config: SearchConfig,
    rollout: R,
}

impl DeterminizedMcts<RandomRollout> {
    /// Create a driver with uniformly random rollouts.
    pub fn new(config: SearchConfig) -> Result<Self, SearchError> {
        Self::with_rollout(config, RandomRollout)
    }
}

impl<R> DeterminizedMcts<R> {
    /// Create a driver with a custom rollout policy. Fails on invalid config.
    pub fn with_rollout(config: SearchConfig, rollout: R) -> Result<Self, SearchError> {
        config.validate()?;
        Ok(Self { config, rollout })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Search `state` from the point of view of its mover.
    ///
    /// A root with a single legal move returns it without searching.
    pub fn search<S>(&self, state: &S) -> Result<SearchResult<S::Move>, SearchError>
    where
        S: GameState,
        R: RolloutPolicy<S>,
    {
        let start = Instant::now();
        let deadline = self.config.time_budget.map(|budget| start + budget);

        if state.is_finished() {
            return Err(SearchError::Game(GameError::GameOver));
        }
        let mut root_moves = state.legal_moves();
        if root_moves.is_empty() {
            return Err(SearchError::NoLegalMoves);
        }
        if root_moves.len() == 1 {
            let best_move = root_moves.swap_remove(0);
            debug!(?best_move, "single legal move, search skipped");
            return Ok(SearchResult {
                best_move,
                stats: Vec::new(),
                iterations: 0,
                rounds: 0,
                fallback: false,
                elapsed: start.elapsed(),
            });
        }

        let summaries: Vec<RoundSummary<S::Move>> = if self.config.parallel_rounds {
            (0..self.config.determinizations)
                .into_par_iter()
                .map(|round| self.run_round(state, round, deadline))
                .collect::<Result<_, _>>()?
        } else {
            (0..self.config.determinizations)
                .map(|round| self.run_round(state, round, deadline))
                .collect::<Result<_, _>>()?
        };

        // Every legal root move gets an entry, unvisited ones with zero counts.
        let mut accumulator = MoveAccumulator::new();
        for mv in &root_moves {
            accumulator.add(mv.clone(), MoveStats::default());
        }
        let mut iterations = 0u64;
        let mut rounds = 0u32;
        for summary in summaries {
            if summary.iterations > 0 {
                rounds += 1;
            }
            iterations += u64::from(summary.iterations);
            for (mv, stats) in summary.stats {
                accumulator.add(mv, stats);
            }
        }

        let mut control = stream_rng(self.config.seed, CONTROL_STREAM);
        let (best_move, fallback) = match accumulator.best(self.config.tie_break, &mut control) {
            Some(mv) => (mv, false),
            None => {
                let idx = control.gen_range(0..root_moves.len());
                warn!(
                    budget_ms = self.config.time_budget.map(|b| b.as_millis() as u64),
                    "no simulation finished within the time budget, playing a random move"
                );
                (root_moves.swap_remove(idx), true)
            }
        };

        let elapsed = start.elapsed();
        debug!(
            ?best_move,
            iterations,
            rounds,
            moves = accumulator.len(),
            elapsed_ms = elapsed.as_millis() as u64,
            "determinized search complete"
        );

        Ok(SearchResult {
            best_move,
            stats: accumulator.into_entries(),
            iterations,
            rounds,
            fallback,
            elapsed,
        })
    }

    fn run_round<S>(
        &self,
        state: &S,
        round: u32,
        deadline: Option<Instant>,
    ) -> Result<RoundSummary<S::Move>, SearchError>
    where
        S: GameState,
        R: RolloutPolicy<S>,
    {
        if deadline.is_some_and(|d| Instant::now() >= d) {
            return Ok(RoundSummary {
                stats: Vec::new(),
                iterations: 0,
            });
        }

        let mut rng = stream_rng(self.config.seed, u64::from(round));
        let determinized = state.determinize(&mut rng);
        let mut search = MctsSearch::new(determinized, &self.rollout, self.config.exploration);
        let iterations = search.run(self.config.rollouts_per_round, deadline, &mut rng)?;

        let tree = search.tree();
        debug!(round, iterations, nodes = tree.len(), "determinization round complete");
        Ok(RoundSummary {
            stats: tree.root_move_stats(),
            iterations,
        })
    }
}

/// Convenience function to run a determinized search with random rollouts.
pub fn run_mcts<S: GameState>(
    state: &S,
    config: SearchConfig,
) -> Result<SearchResult<S::Move>, SearchError> {
    DeterminizedMcts::new(config)?.search(state)
}
