pub mod board;
pub mod error;
pub mod game;
pub mod minimax;

pub use board::{Board, Cell, Player, Position};
pub use error::GameError;
pub use game::{Game, Outcome, COMPUTER, HUMAN};
pub use minimax::{best_move, evaluate, score};
