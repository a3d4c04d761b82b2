//! Search tree node representation.
//!
//! Each node holds the (determinized) game state reached by playing
//! `move_played` from its parent, together with the outcome counts of every
//! rollout that passed through it.

use engine_core::{GameState, Outcome, Player};
use rand::Rng;
use rand_chacha::ChaCha20Rng;

/// Index into the node arena. Using a newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const NONE: NodeId = NodeId(u32::MAX);

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    pub fn is_some(self) -> bool {
        !self.is_none()
    }
}

/// Outcome counts for one root move, seen from the player choosing it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveStats {
    /// Rollouts won by the player making the move
    pub wins: u32,
    pub draws: u32,
    pub visits: u32,
}

impl MoveStats {
    /// Fraction of visits that ended in a win. 0.0 when unvisited.
    #[inline]
    pub fn win_ratio(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            f64::from(self.wins) / f64::from(self.visits)
        }
    }

    pub fn merge(&mut self, other: &MoveStats) {
        self.wins += other.wins;
        self.draws += other.draws;
        self.visits += other.visits;
    }
}

/// A node in the search tree.
#[derive(Debug, Clone)]
pub struct SearchNode<S: GameState> {
    /// Parent node index (NONE for root)
    pub parent: NodeId,

    /// Move that led to this node from parent (None for root)
    pub move_played: Option<S::Move>,

    /// State at this node, owned by the node
    pub state: S,

    /// Moves not yet expanded. Filled from `legal_moves` on first expansion.
    untried_moves: Option<Vec<S::Move>>,

    /// Expanded children in creation order
    pub children: Vec<NodeId>,

    /// Number of rollouts backpropagated through this node
    pub visits: u32,

    /// Rollouts won, indexed by `Player::index`
    wins: [u32; 2],

    draws: u32,
}

impl<S: GameState> SearchNode<S> {
    /// Create a new root node.
    pub fn new_root(state: S) -> Self {
        Self::build(NodeId::NONE, None, state)
    }

    /// Create a new child node.
    pub fn new_child(parent: NodeId, move_played: S::Move, state: S) -> Self {
        Self::build(parent, Some(move_played), state)
    }

    fn build(parent: NodeId, move_played: Option<S::Move>, state: S) -> Self {
        Self {
            parent,
            move_played,
            state,
            untried_moves: None,
            children: Vec::new(),
            visits: 0,
            wins: [0; 2],
            draws: 0,
        }
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.state.is_finished()
    }

    /// Moves still waiting for expansion; `None` until the node is first expanded.
    pub fn untried_moves(&self) -> Option<&[S::Move]> {
        self.untried_moves.as_deref()
    }

    /// True once every legal move has a child.
    ///
    /// A node that was never expanded is not fully expanded, even when it has
    /// no legal moves at all.
    #[inline]
    pub fn is_fully_expanded(&self) -> bool {
        self.untried_moves.as_ref().is_some_and(|moves| moves.is_empty())
    }

    /// Remove a uniformly random untried move, enumerating legal moves on first use.
    pub fn take_untried(&mut self, rng: &mut ChaCha20Rng) -> Option<S::Move> {
        let state = &self.state;
        let moves = self.untried_moves.get_or_insert_with(|| state.legal_moves());
        if moves.is_empty() {
            return None;
        }
        let idx = rng.gen_range(0..moves.len());
        Some(moves.swap_remove(idx))
    }

    #[inline]
    pub fn wins(&self, player: Player) -> u32 {
        self.wins[player.index()]
    }

    #[inline]
    pub fn draws(&self) -> u32 {
        self.draws
    }

    /// Count one finished rollout.
    pub fn record(&mut self, outcome: &Outcome) {
        self.visits += 1;
        match outcome.winner() {
            Some(player) => self.wins[player.index()] += 1,
            None => self.draws += 1,
        }
    }

    /// Wins for `player` minus wins for the opponent.
    #[inline]
    pub fn value_for(&self, player: Player) -> i64 {
        i64::from(self.wins(player)) - i64::from(self.wins(player.other()))
    }

    /// UCB1 score from the perspective of `player`, the mover at the parent.
    ///
    /// Unvisited nodes score positive infinity.
    #[inline]
    pub fn ucb_score(&self, player: Player, ln_parent_visits: f64, exploration: f64) -> f64 {
        if self.visits == 0 {
            return f64::INFINITY;
        }
        let n = f64::from(self.visits);
        let exploit = self.value_for(player) as f64 / n;
        let explore = exploration * (2.0 * ln_parent_visits / n).sqrt();
        exploit + explore
    }

    /// Statistics of this node seen from `player`.
    pub fn stats_for(&self, player: Player) -> MoveStats {
        MoveStats {
            wins: self.wins(player),
            draws: self.draws,
            visits: self.visits,
        }
    }
}
