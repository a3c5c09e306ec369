use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::{
    board::{Board, Player, Position},
    error::GameError,
    minimax::best_move,
};

/// The human always plays X and makes the first move
pub const HUMAN: Player = Player::X;
pub const COMPUTER: Player = Player::O;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Outcome {
    Win(Player),
    Tie,
}

impl Outcome {
    pub fn message(&self) -> &'static str {
        match self {
            Outcome::Win(Player::X) => "X wins!",
            Outcome::Win(Player::O) => "Computer wins!",
            Outcome::Tie => "It's a tie!",
        }
    }
}

/// A game of the human against the minimax player
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Game {
    board: Board,
    turn: Player,
    outcome: Option<Outcome>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            turn: HUMAN,
            outcome: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> Player {
        self.turn
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Place the human's mark
    pub fn play(&mut self, position: Position) -> Result<(), GameError> {
        self.check_turn(HUMAN)?;
        self.board.place(position, HUMAN)?;
        debug!("human played {}", position);
        self.end_turn(HUMAN);
        Ok(())
    }

    /// Let the computer pick and place its mark, returns where it played
    pub fn computer_move(&mut self) -> Result<Position, GameError> {
        self.check_turn(COMPUTER)?;
        let position = best_move(&self.board).ok_or(GameError::GameOver)?;
        self.board.place(position, COMPUTER)?;
        debug!("computer played {}", position);
        self.end_turn(COMPUTER);
        Ok(position)
    }

    fn check_turn(&self, player: Player) -> Result<(), GameError> {
        if self.is_over() {
            Err(GameError::GameOver)
        } else if self.turn != player {
            Err(GameError::NotYourTurn)
        } else {
            Ok(())
        }
    }

    fn end_turn(&mut self, player: Player) {
        self.outcome = if self.board.check_winner(player) {
            Some(Outcome::Win(player))
        } else if self.board.is_full() {
            Some(Outcome::Tie)
        } else {
            None
        };

        match self.outcome {
            Some(outcome) => info!("{}", outcome.message()),
            None => self.turn = player.opponent(),
        }
    }
}
