//! TicTacToe implementation of the Foresight game-state contract
//!
//! A perfect-information reference game. It never hides anything, so
//! `determinize` is the identity and the search driver always routes it
//! to the alpha-beta solver unless the MCTS driver is called directly.
//!
//! # Usage
//!
//! ```rust
//! use engine_core::GameState;
//! use games_tictactoe::State;
//!
//! let state = State::new();
//! assert_eq!(state.legal_moves().len(), 9);
//! let next = state.apply(&4).unwrap();
//! assert_eq!(next.legal_moves().len(), 8);
//! ```

use engine_core::{GameError, GameState, Outcome, Phase, Player};
use rand_chacha::ChaCha20Rng;

/// A board position, 0-8 in row-major order.
pub type Move = u8;

/// TicTacToe game state
///
/// Represents the complete state of a TicTacToe game including the board,
/// current player, and winner information.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct State {
    /// Board representation: 0=empty, 1=X, 2=O
    board: [u8; 9],
    /// Current player: 1=X, 2=O
    current_player: u8,
    /// Winner: 0=none/ongoing, 1=X, 2=O, 3=draw
    winner: u8,
}

impl State {
    /// Create a new initial game state
    pub fn new() -> Self {
        Self {
            board: [0; 9],
            current_player: 1, // X goes first
            winner: 0,
        }
    }

    /// Build a position from a board (0=empty, 1=X, 2=O).
    ///
    /// The player to move is derived from the piece count, X moving first.
    pub fn from_board(board: [u8; 9]) -> Self {
        let xs = board.iter().filter(|&&cell| cell == 1).count();
        let os = board.iter().filter(|&&cell| cell == 2).count();
        Self {
            board,
            current_player: if xs > os { 2 } else { 1 },
            winner: Self::check_winner(&board),
        }
    }

    /// Check if the game is over
    pub fn is_done(&self) -> bool {
        self.winner != 0
    }

    /// Board cells (0=empty, 1=X, 2=O)
    pub fn board(&self) -> &[u8; 9] {
        &self.board
    }

    /// Get legal moves (empty positions)
    pub fn legal_positions(&self) -> Vec<u8> {
        if self.is_done() {
            return Vec::new();
        }

        (0..9u8)
            .filter(|&pos| self.board[pos as usize] == 0)
            .collect()
    }

    /// Make a move and return the new state
    pub fn make_move(&self, position: u8) -> Result<State, GameError> {
        if self.is_done() {
            return Err(GameError::GameOver);
        }
        if position >= 9 || self.board[position as usize] != 0 {
            return Err(GameError::IllegalMove(format!(
                "position {} is not available",
                position
            )));
        }

        let mut new_state = *self;
        new_state.board[position as usize] = self.current_player;

        // Check for winner
        new_state.winner = Self::check_winner(&new_state.board);

        // Switch player if game not over
        if new_state.winner == 0 {
            new_state.current_player = if self.current_player == 1 { 2 } else { 1 };
        }

        Ok(new_state)
    }

    /// Check for winner on the board
    fn check_winner(board: &[u8; 9]) -> u8 {
        // Winning positions (rows, columns, diagonals)
        const LINES: [[usize; 3]; 8] = [
            [0, 1, 2],
            [3, 4, 5],
            [6, 7, 8], // rows
            [0, 3, 6],
            [1, 4, 7],
            [2, 5, 8], // columns
            [0, 4, 8],
            [2, 4, 6], // diagonals
        ];

        for line in &LINES {
            let [a, b, c] = *line;
            if board[a] != 0 && board[a] == board[b] && board[b] == board[c] {
                return board[a]; // Return the winning player
            }
        }

        // Check for draw (board full but no winner)
        if board.iter().all(|&cell| cell != 0) {
            return 3; // Draw
        }

        0 // Game ongoing
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

fn player_of(cell: u8) -> Player {
    if cell == 1 {
        Player::One
    } else {
        Player::Two
    }
}

impl GameState for State {
    type Move = Move;

    fn legal_moves(&self) -> Vec<Move> {
        self.legal_positions()
    }

    fn apply(&self, mv: &Move) -> Result<Self, GameError> {
        self.make_move(*mv)
    }

    fn is_finished(&self) -> bool {
        self.is_done()
    }

    fn winner(&self) -> Option<Outcome> {
        match self.winner {
            0 => None,
            3 => Some(Outcome::Draw),
            cell => Some(Outcome::Win {
                player: player_of(cell),
                score: 1,
            }),
        }
    }

    fn mover(&self) -> Player {
        player_of(self.current_player)
    }

    fn phase(&self) -> Phase {
        Phase::Perfect
    }

    fn determinize(&self, _rng: &mut ChaCha20Rng) -> Self {
        *self
    }

    /// Pieces on the board.
    fn points(&self, player: Player) -> u32 {
        let cell = match player {
            Player::One => 1,
            Player::Two => 2,
        };
        self.board.iter().filter(|&&c| c == cell).count() as u32
    }
}
