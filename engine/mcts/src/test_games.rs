//! Small synthetic games with known answers, used by the unit tests.

use engine_core::{GameError, GameState, Outcome, Phase, Player};
use rand::Rng;
use rand_chacha::ChaCha20Rng;

fn win(player: Player, score: u32) -> Outcome {
    Outcome::Win { player, score }
}

/// Player one picks a branch (0 or 1), player two answers (0 or 1).
///
/// ```text
/// branch 0: answer 0 -> one wins by 2, answer 1 -> two wins
/// branch 1: answer 0 -> one wins,      answer 1 -> one wins
/// ```
///
/// Optimal play is branch 1 with value +1.
#[derive(Debug, Clone, PartialEq)]
pub struct TwoPly {
    path: Vec<u8>,
}

impl TwoPly {
    pub fn new() -> Self {
        Self { path: Vec::new() }
    }

    pub fn after(path: &[u8]) -> Self {
        Self {
            path: path.to_vec(),
        }
    }
}

impl GameState for TwoPly {
    type Move = u8;

    fn legal_moves(&self) -> Vec<u8> {
        if self.is_finished() {
            Vec::new()
        } else {
            vec![0, 1]
        }
    }

    fn apply(&self, mv: &u8) -> Result<Self, GameError> {
        if self.is_finished() {
            return Err(GameError::GameOver);
        }
        if *mv > 1 {
            return Err(GameError::IllegalMove(format!("branch {mv}")));
        }
        let mut next = self.clone();
        next.path.push(*mv);
        Ok(next)
    }

    fn is_finished(&self) -> bool {
        self.path.len() == 2
    }

    fn winner(&self) -> Option<Outcome> {
        match self.path.as_slice() {
            [0, 0] => Some(win(Player::One, 2)),
            [0, _] => Some(win(Player::Two, 1)),
            [_, _] => Some(win(Player::One, 1)),
            _ => None,
        }
    }

    fn mover(&self) -> Player {
        if self.path.is_empty() {
            Player::One
        } else {
            Player::Two
        }
    }

    fn phase(&self) -> Phase {
        Phase::Perfect
    }

    fn determinize(&self, _rng: &mut ChaCha20Rng) -> Self {
        self.clone()
    }

    fn points(&self, _player: Player) -> u32 {
        0
    }
}

/// Two moves that both lead to an unfinished position without legal moves.
#[derive(Debug, Clone, PartialEq)]
pub struct DeadEnd {
    started: bool,
}

impl DeadEnd {
    pub fn new() -> Self {
        Self { started: false }
    }

    /// The broken position itself.
    pub fn stuck() -> Self {
        Self { started: true }
    }
}

impl GameState for DeadEnd {
    type Move = u8;

    fn legal_moves(&self) -> Vec<u8> {
        if self.started {
            Vec::new()
        } else {
            vec![0, 1]
        }
    }

    fn apply(&self, _mv: &u8) -> Result<Self, GameError> {
        Ok(Self::stuck())
    }

    fn is_finished(&self) -> bool {
        false
    }

    fn winner(&self) -> Option<Outcome> {
        None
    }

    fn mover(&self) -> Player {
        Player::One
    }

    fn phase(&self) -> Phase {
        Phase::Imperfect
    }

    fn determinize(&self, _rng: &mut ChaCha20Rng) -> Self {
        self.clone()
    }

    fn points(&self, _player: Player) -> u32 {
        0
    }
}

/// Reports two legal moves and rejects both.
#[derive(Debug, Clone, PartialEq)]
pub struct Liar;

impl GameState for Liar {
    type Move = u8;

    fn legal_moves(&self) -> Vec<u8> {
        vec![0, 1]
    }

    fn apply(&self, mv: &u8) -> Result<Self, GameError> {
        Err(GameError::IllegalMove(format!("{mv} is never legal")))
    }

    fn is_finished(&self) -> bool {
        false
    }

    fn winner(&self) -> Option<Outcome> {
        None
    }

    fn mover(&self) -> Player {
        Player::One
    }

    fn phase(&self) -> Phase {
        Phase::Imperfect
    }

    fn determinize(&self, _rng: &mut ChaCha20Rng) -> Self {
        Self
    }

    fn points(&self, _player: Player) -> u32 {
        0
    }
}

/// Exactly one legal move, which wins for player one.
#[derive(Debug, Clone, PartialEq)]
pub struct Forced {
    done: bool,
}

impl Forced {
    pub const MOVE: u8 = 7;

    pub fn new() -> Self {
        Self { done: false }
    }
}

impl GameState for Forced {
    type Move = u8;

    fn legal_moves(&self) -> Vec<u8> {
        if self.done {
            Vec::new()
        } else {
            vec![Self::MOVE]
        }
    }

    fn apply(&self, mv: &u8) -> Result<Self, GameError> {
        if self.done {
            return Err(GameError::GameOver);
        }
        if *mv != Self::MOVE {
            return Err(GameError::IllegalMove(mv.to_string()));
        }
        Ok(Self { done: true })
    }

    fn is_finished(&self) -> bool {
        self.done
    }

    fn winner(&self) -> Option<Outcome> {
        self.done.then(|| win(Player::One, 1))
    }

    fn mover(&self) -> Player {
        Player::One
    }

    fn phase(&self) -> Phase {
        Phase::Imperfect
    }

    fn determinize(&self, _rng: &mut ChaCha20Rng) -> Self {
        self.clone()
    }

    fn points(&self, _player: Player) -> u32 {
        0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    Heads,
    Tails,
    Concede,
}

/// Player one calls a coin that only player two has seen.
///
/// A correct call wins for player one, a wrong call or conceding loses.
#[derive(Debug, Clone, PartialEq)]
pub struct HiddenCoin {
    heads: bool,
    call: Option<Call>,
}

impl HiddenCoin {
    pub fn new(heads: bool) -> Self {
        Self { heads, call: None }
    }
}

impl GameState for HiddenCoin {
    type Move = Call;

    fn legal_moves(&self) -> Vec<Call> {
        if self.call.is_some() {
            Vec::new()
        } else {
            vec![Call::Heads, Call::Tails, Call::Concede]
        }
    }

    fn apply(&self, mv: &Call) -> Result<Self, GameError> {
        if self.call.is_some() {
            return Err(GameError::GameOver);
        }
        Ok(Self {
            heads: self.heads,
            call: Some(*mv),
        })
    }

    fn is_finished(&self) -> bool {
        self.call.is_some()
    }

    fn winner(&self) -> Option<Outcome> {
        let correct = match self.call? {
            Call::Heads => self.heads,
            Call::Tails => !self.heads,
            Call::Concede => false,
        };
        let winner = if correct { Player::One } else { Player::Two };
        Some(win(winner, 1))
    }

    fn mover(&self) -> Player {
        Player::One
    }

    fn phase(&self) -> Phase {
        if self.call.is_some() {
            Phase::Perfect
        } else {
            Phase::Imperfect
        }
    }

    /// Player one cannot see the coin, so it is flipped again.
    fn determinize(&self, rng: &mut ChaCha20Rng) -> Self {
        Self {
            heads: rng.gen_bool(0.5),
            call: self.call,
        }
    }

    fn points(&self, _player: Player) -> u32 {
        0
    }
}
