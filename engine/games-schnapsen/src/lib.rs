//! A compact Schnapsen variant for the Foresight engine
//!
//! Two players, a 20-card deck and two phases:
//!
//! 1. While the stock holds cards the opponent's hand and the face-down
//!    stock are hidden ([`Phase::Imperfect`]) and any card may be played.
//! 2. Once the stock is exhausted every remaining card is known
//!    ([`Phase::Perfect`]) and the follower must follow suit, or trump when
//!    unable to follow.
//!
//! Marriages, exchanging the trump jack and closing the stock are not
//! modelled.
//!
//! ```rust
//! use engine_core::{GameState, Phase};
//! use games_schnapsen::State;
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha20Rng;
//!
//! let mut rng = ChaCha20Rng::seed_from_u64(7);
//! let state = State::deal(&mut rng);
//! assert_eq!(state.phase(), Phase::Imperfect);
//! assert_eq!(state.legal_moves().len(), 5);
//! ```

mod card;

pub use card::{deck, Card, Rank, Suit};

use engine_core::{GameError, GameState, Outcome, Phase, Player};
use rand::seq::SliceRandom;
use rand_chacha::ChaCha20Rng;

/// Points needed to end the game early.
pub const WINNING_POINTS: u32 = 66;
/// Bonus for taking the last trick.
pub const LAST_TRICK_BONUS: u32 = 10;
/// Cards dealt to each player.
pub const HAND_SIZE: usize = 5;

/// A Schnapsen position, holding every card including the hidden ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    /// Cards in hand per seat, kept sorted
    hands: [Vec<Card>; 2],
    /// Stock; index 0 is the face-up trump card, draws come off the end
    stock: Vec<Card>,
    trump: Suit,
    /// Player leading the current trick
    leader: Player,
    /// Card led to the current trick, waiting for the follower
    lead_card: Option<Card>,
    points: [u32; 2],
    tricks_won: [u32; 2],
    outcome: Option<Outcome>,
}

impl State {
    /// Shuffle a fresh deck and deal a new game; player one leads.
    pub fn deal(rng: &mut ChaCha20Rng) -> Self {
        let mut cards = deck();
        cards.shuffle(rng);

        let stock = cards.split_off(2 * HAND_SIZE);
        let second = cards.split_off(HAND_SIZE);
        Self::with_cards([cards, second], stock, Player::One)
    }

    /// Build a position from explicit hands and stock.
    ///
    /// Trump is the suit of `stock[0]`; with an empty stock it falls back
    /// to hearts.
    pub fn with_cards(hands: [Vec<Card>; 2], stock: Vec<Card>, leader: Player) -> Self {
        let trump = stock.first().map(|card| card.suit).unwrap_or(Suit::Hearts);
        Self::with_trump(hands, stock, trump, leader)
    }

    /// Build a position with an explicit trump suit.
    pub fn with_trump(
        mut hands: [Vec<Card>; 2],
        stock: Vec<Card>,
        trump: Suit,
        leader: Player,
    ) -> Self {
        for hand in hands.iter_mut() {
            hand.sort();
        }
        Self {
            hands,
            stock,
            trump,
            leader,
            lead_card: None,
            points: [0; 2],
            tricks_won: [0; 2],
            outcome: None,
        }
    }

    pub fn hand(&self, player: Player) -> &[Card] {
        &self.hands[player.index()]
    }

    pub fn stock_len(&self) -> usize {
        self.stock.len()
    }

    pub fn trump(&self) -> Suit {
        self.trump
    }

    /// The face-up card under the stock, if the stock is not exhausted.
    pub fn trump_card(&self) -> Option<Card> {
        self.stock.first().copied()
    }

    pub fn lead_card(&self) -> Option<Card> {
        self.lead_card
    }

    pub fn tricks_won(&self, player: Player) -> u32 {
        self.tricks_won[player.index()]
    }

    /// Legal responses to `lead` from `hand`.
    fn follow_options(&self, hand: &[Card], lead: Card) -> Vec<Card> {
        if !self.stock.is_empty() {
            return hand.to_vec();
        }
        let same_suit: Vec<Card> = hand.iter().copied().filter(|c| c.suit == lead.suit).collect();
        if !same_suit.is_empty() {
            return same_suit;
        }
        let trumps: Vec<Card> = hand.iter().copied().filter(|c| c.suit == self.trump).collect();
        if !trumps.is_empty() {
            return trumps;
        }
        hand.to_vec()
    }

    /// Whether `follow` takes the trick led with `lead`.
    fn follower_wins(&self, lead: Card, follow: Card) -> bool {
        if follow.suit == lead.suit {
            follow.rank > lead.rank
        } else {
            follow.suit == self.trump
        }
    }

    fn draw(&mut self, player: Player) {
        if let Some(card) = self.stock.pop() {
            let hand = &mut self.hands[player.index()];
            hand.push(card);
            hand.sort();
        }
    }

    fn finish(&mut self, winner: Player) {
        let loser = winner.other();
        let score = if self.tricks_won[loser.index()] == 0 {
            3
        } else if self.points[loser.index()] < WINNING_POINTS / 2 {
            2
        } else {
            1
        };
        self.outcome = Some(Outcome::Win {
            player: winner,
            score,
        });
    }

    fn resolve_trick(&mut self, lead: Card, follow: Card) {
        let trick_winner = if self.follower_wins(lead, follow) {
            self.leader.other()
        } else {
            self.leader
        };
        let idx = trick_winner.index();
        self.points[idx] += lead.points() + follow.points();
        self.tricks_won[idx] += 1;
        self.leader = trick_winner;
        self.lead_card = None;

        if !self.stock.is_empty() {
            self.draw(trick_winner);
            self.draw(trick_winner.other());
        }

        let hands_empty = self.hands.iter().all(|hand| hand.is_empty());
        if hands_empty {
            self.points[idx] += LAST_TRICK_BONUS;
        }

        if self.points[idx] >= WINNING_POINTS {
            self.finish(trick_winner);
        } else if hands_empty {
            // Tied points go to whoever took the last trick.
            let other = trick_winner.other();
            let winner = if self.points[other.index()] > self.points[idx] {
                other
            } else {
                trick_winner
            };
            self.finish(winner);
        }
    }
}

impl GameState for State {
    type Move = Card;

    fn legal_moves(&self) -> Vec<Card> {
        if self.outcome.is_some() {
            return Vec::new();
        }
        let hand = self.hand(self.mover());
        match self.lead_card {
            None => hand.to_vec(),
            Some(lead) => self.follow_options(hand, lead),
        }
    }

    fn apply(&self, mv: &Card) -> Result<Self, GameError> {
        if self.outcome.is_some() {
            return Err(GameError::GameOver);
        }
        if !self.legal_moves().contains(mv) {
            return Err(GameError::IllegalMove(format!(
                "{} cannot be played by {}",
                mv,
                self.mover()
            )));
        }

        let mut next = self.clone();
        let mover = self.mover();
        next.hands[mover.index()].retain(|card| card != mv);

        match self.lead_card {
            None => next.lead_card = Some(*mv),
            Some(lead) => next.resolve_trick(lead, *mv),
        }
        Ok(next)
    }

    fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    fn winner(&self) -> Option<Outcome> {
        self.outcome
    }

    fn mover(&self) -> Player {
        match self.lead_card {
            Some(_) => self.leader.other(),
            None => self.leader,
        }
    }

    fn phase(&self) -> Phase {
        if self.stock.is_empty() {
            Phase::Perfect
        } else {
            Phase::Imperfect
        }
    }

    /// Redistribute the opponent's hand and the face-down stock.
    ///
    /// The mover's own hand, the card on the table and the face-up trump
    /// card stay where they are; so do the hand and stock sizes.
    fn determinize(&self, rng: &mut ChaCha20Rng) -> Self {
        if self.phase() == Phase::Perfect {
            return self.clone();
        }

        let opponent = self.mover().other();
        let mut next = self.clone();
        let hidden_stock = next.stock.split_off(1);
        let opponent_hand = std::mem::take(&mut next.hands[opponent.index()]);
        let hand_size = opponent_hand.len();

        let mut unknown: Vec<Card> = opponent_hand.into_iter().chain(hidden_stock).collect();
        unknown.shuffle(rng);

        let rest = unknown.split_off(hand_size);
        unknown.sort();
        next.hands[opponent.index()] = unknown;
        next.stock.extend(rest);
        next
    }

    fn points(&self, player: Player) -> u32 {
        self.points[player.index()]
    }
}
