//! The game-state contract consumed by the search engine
//!
//! The search core never looks inside a game. Everything it needs (move
//! generation, transitions, terminal detection, scoring, phase and hidden
//! information sampling) goes through [`GameState`].

use rand_chacha::ChaCha20Rng;
use std::fmt;

/// One of the two seats at the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Player {
    One,
    Two,
}

impl Player {
    /// Both players, in seat order.
    pub const ALL: [Player; 2] = [Player::One, Player::Two];

    /// The opponent of this player.
    #[inline]
    pub fn other(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Zero-based seat index, usable for `[T; 2]` lookups.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::One => write!(f, "player 1"),
            Player::Two => write!(f, "player 2"),
        }
    }
}

/// Whether hidden information remains in a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Some cards are unknown to the acting player.
    Imperfect,
    /// Everything is observable.
    Perfect,
}

/// Terminal result of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// `player` won and scored `score` game points.
    Win { player: Player, score: u32 },
    /// Nobody won.
    Draw,
}

impl Outcome {
    /// The winning player, or `None` for a draw.
    #[inline]
    pub fn winner(&self) -> Option<Player> {
        match self {
            Outcome::Win { player, .. } => Some(*player),
            Outcome::Draw => None,
        }
    }

    /// Score signed so that positive values favor [`Player::One`].
    pub fn signed_score(&self) -> f64 {
        match self {
            Outcome::Win {
                player: Player::One,
                score,
            } => f64::from(*score),
            Outcome::Win {
                player: Player::Two,
                score,
            } => -f64::from(*score),
            Outcome::Draw => 0.0,
        }
    }
}

/// Errors a game reports back to its caller.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GameError {
    #[error("Illegal move: {0}")]
    IllegalMove(String),
    #[error("Game is already finished")]
    GameOver,
}

/// Main trait for games searched by the engine
///
/// A value of this type is one position. For an imperfect-information game
/// the *true* state holds everything, including cards the acting player
/// cannot see; the search only reads that hidden part through
/// [`GameState::determinize`].
///
/// # Contract
///
/// * `legal_moves` is non-empty unless `is_finished` returns true.
/// * `apply` is pure: it never mutates `self`.
/// * `winner` returns `Some` exactly when `is_finished` returns true.
/// * Every play sequence reaches a finished state in finitely many moves.
///
/// # Example
///
/// ```rust
/// # use engine_core::{GameError, GameState, Outcome, Phase, Player};
/// # use rand_chacha::ChaCha20Rng;
/// // A countdown: each move takes one or two sticks, taking the last wins.
/// #[derive(Debug, Clone)]
/// struct Sticks { left: u8, to_move: Player }
///
/// impl GameState for Sticks {
///     type Move = u8;
///
///     fn legal_moves(&self) -> Vec<u8> {
///         (1..=self.left.min(2)).collect()
///     }
///     fn apply(&self, mv: &u8) -> Result<Self, GameError> {
///         if *mv == 0 || *mv > self.left.min(2) {
///             return Err(GameError::IllegalMove(mv.to_string()));
///         }
///         Ok(Sticks { left: self.left - mv, to_move: self.to_move.other() })
///     }
///     fn is_finished(&self) -> bool { self.left == 0 }
///     fn winner(&self) -> Option<Outcome> {
///         self.is_finished().then(|| Outcome::Win { player: self.to_move.other(), score: 1 })
///     }
///     fn mover(&self) -> Player { self.to_move }
///     fn phase(&self) -> Phase { Phase::Perfect }
///     fn determinize(&self, _rng: &mut ChaCha20Rng) -> Self { self.clone() }
///     fn points(&self, _player: Player) -> u32 { 0 }
/// }
///
/// let start = Sticks { left: 3, to_move: Player::One };
/// assert_eq!(start.legal_moves(), vec![1, 2]);
/// ```
pub trait GameState: Clone + fmt::Debug + Send + Sync + 'static {
    /// Move type - small, comparable, cheap to clone
    type Move: Clone + PartialEq + fmt::Debug + Send + Sync + 'static;

    /// Moves available to the player to move, in a stable order.
    fn legal_moves(&self) -> Vec<Self::Move>;

    /// Position reached by playing `mv`.
    fn apply(&self, mv: &Self::Move) -> Result<Self, GameError>;

    /// Whether the game is over.
    fn is_finished(&self) -> bool;

    /// Terminal result; `None` while the game is still running.
    fn winner(&self) -> Option<Outcome>;

    /// Player whose decision it is.
    fn mover(&self) -> Player;

    /// Whether hidden information remains.
    fn phase(&self) -> Phase;

    /// Sample a fully observed position consistent with what the mover knows.
    ///
    /// Only meaningful while `phase()` is [`Phase::Imperfect`]; perfect
    /// information states may simply return a clone.
    fn determinize(&self, rng: &mut ChaCha20Rng) -> Self;

    /// Points scored so far by `player`, used by heuristic evaluation.
    fn points(&self, player: Player) -> u32;
}
