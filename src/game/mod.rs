//! Core Gomoku logic: board representation, stone colors, and the match
//! state machine that alternates two players over one board.

mod board;
mod state;
mod stone;

pub use board::{legal_indices, Board, Cell, Judgement, Move, Point, WIN_LENGTH};
pub use state::{Game, GameOutcome, GamePhase};
pub use stone::Stone;
