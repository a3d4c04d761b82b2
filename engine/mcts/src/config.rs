//! Search configuration parameters.

use std::time::Duration;
use thiserror::Error;

/// How ties between equally good root moves are broken at the end of a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TieBreak {
    /// First move in accumulation order wins.
    #[default]
    InsertionOrder,
    /// Uniformly random among the tied moves, drawn from the seeded source.
    Random,
}

impl std::str::FromStr for TieBreak {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "insertion" | "insertion_order" | "first" => Ok(TieBreak::InsertionOrder),
            "random" => Ok(TieBreak::Random),
            other => Err(ConfigError::UnknownTieBreak(other.to_string())),
        }
    }
}

/// Configuration rejected before any search starts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error(
        "search budget is empty: {determinizations} determinizations x {rollouts_per_round} rollouts"
    )]
    DegenerateBudget {
        determinizations: u32,
        rollouts_per_round: u32,
    },

    #[error("exploration constant must be finite and non-negative, got {0}")]
    InvalidExploration(f64),

    #[error("max_depth must be greater than 0")]
    ZeroDepth,

    #[error("unknown tie break '{0}', expected 'insertion' or 'random'")]
    UnknownTieBreak(String),
}

/// Configuration for a single move selection.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    /// Exploration constant `C` in the UCB1 formula.
    /// 0.0 is pure exploitation; values between 0.7 and sqrt(2) are common.
    pub exploration: f64,

    /// Number of independent determinization rounds (`D`).
    pub determinizations: u32,

    /// Select/expand/rollout/backpropagate iterations per round (`R`).
    pub rollouts_per_round: u32,

    /// Depth limit for the alpha-beta solver used once no information is hidden.
    pub max_depth: u32,

    /// Seed for every random choice made during the search.
    pub seed: u64,

    /// Tie breaking between root moves with the same win ratio.
    pub tie_break: TieBreak,

    /// Shuffle move order in the alpha-beta solver.
    pub randomize_minimax: bool,

    /// Wall-clock budget, checked between iterations.
    /// `None` runs the full `D x R` iterations.
    pub time_budget: Option<Duration>,

    /// Run determinization rounds on the rayon thread pool.
    /// Results are identical to sequential execution under an iteration budget.
    pub parallel_rounds: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            exploration: std::f64::consts::FRAC_1_SQRT_2,
            determinizations: 20,
            rollouts_per_round: 250,
            max_depth: 8,
            seed: 0,
            tie_break: TieBreak::InsertionOrder,
            randomize_minimax: true,
            time_budget: None,
            parallel_rounds: false,
        }
    }
}

impl SearchConfig {
    /// Create config for tournament play (bounded by wall-clock time).
    pub fn for_play() -> Self {
        Self {
            determinizations: 50,
            rollouts_per_round: 400,
            time_budget: Some(Duration::from_secs(1)),
            parallel_rounds: true,
            ..Self::default()
        }
    }

    /// Create a fast, fully deterministic config for testing.
    pub fn for_testing() -> Self {
        Self {
            determinizations: 4,
            rollouts_per_round: 50,
            randomize_minimax: false,
            ..Self::default()
        }
    }

    /// Builder pattern: set exploration constant.
    pub fn with_exploration(mut self, c: f64) -> Self {
        self.exploration = c;
        self
    }

    /// Builder pattern: set number of determinization rounds.
    pub fn with_determinizations(mut self, d: u32) -> Self {
        self.determinizations = d;
        self
    }

    /// Builder pattern: set iterations per round.
    pub fn with_rollouts_per_round(mut self, r: u32) -> Self {
        self.rollouts_per_round = r;
        self
    }

    /// Builder pattern: set alpha-beta depth limit.
    pub fn with_max_depth(mut self, depth: u32) -> Self {
        self.max_depth = depth;
        self
    }

    /// Builder pattern: set random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Builder pattern: set tie break.
    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    /// Builder pattern: toggle move shuffling in alpha-beta.
    pub fn with_randomized_minimax(mut self, randomize: bool) -> Self {
        self.randomize_minimax = randomize;
        self
    }

    /// Builder pattern: set wall-clock budget.
    pub fn with_time_budget(mut self, budget: Option<Duration>) -> Self {
        self.time_budget = budget;
        self
    }

    /// Builder pattern: toggle parallel determinization rounds.
    pub fn with_parallel_rounds(mut self, parallel: bool) -> Self {
        self.parallel_rounds = parallel;
        self
    }

    /// Total iterations the configured budget allows.
    pub fn total_iterations(&self) -> u64 {
        u64::from(self.determinizations) * u64::from(self.rollouts_per_round)
    }

    /// Reject configurations that could never produce a searched move.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.total_iterations() == 0 {
            return Err(ConfigError::DegenerateBudget {
                determinizations: self.determinizations,
                rollouts_per_round: self.rollouts_per_round,
            });
        }
        if !self.exploration.is_finite() || self.exploration < 0.0 {
            return Err(ConfigError::InvalidExploration(self.exploration));
        }
        if self.max_depth == 0 {
            return Err(ConfigError::ZeroDepth);
        }
        Ok(())
    }
}
