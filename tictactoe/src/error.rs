use thiserror::Error;

use crate::board::Position;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("cell {0} is already occupied")]
    Occupied(Position),

    #[error("cell ({row}, {col}) is outside of the 3x3 board")]
    OutOfBounds { row: usize, col: usize },

    #[error("game already over")]
    GameOver,

    #[error("it is not your turn")]
    NotYourTurn,

    #[error("invalid board: {0}")]
    InvalidBoard(String),
}
