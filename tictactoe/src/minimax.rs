use std::ops::{Deref, DerefMut};

use log::debug;

use crate::board::{Board, Player, Position};

pub const X_WINS: i32 = -1;
pub const O_WINS: i32 = 1;
pub const TIE: i32 = 0;

/// Score of a finished game from the point of view of O, `None` while the game goes on
pub fn score(board: &Board) -> Option<i32> {
    if board.check_winner(Player::X) {
        Some(X_WINS)
    } else if board.check_winner(Player::O) {
        Some(O_WINS)
    } else if board.is_full() {
        Some(TIE)
    } else {
        None
    }
}

/// A mark placed on the board for the duration of one lookahead branch.
/// The cell is emptied again when the guard is dropped.
struct Speculative<'a> {
    board: &'a mut Board,
    position: Position,
}

impl<'a> Speculative<'a> {
    fn place(board: &'a mut Board, position: Position, player: Player) -> Option<Self> {
        board.place(position, player).ok()?;
        Some(Self { board, position })
    }
}

impl Deref for Speculative<'_> {
    type Target = Board;

    fn deref(&self) -> &Self::Target {
        self.board
    }
}

impl DerefMut for Speculative<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.board
    }
}

impl Drop for Speculative<'_> {
    fn drop(&mut self) {
        self.board.clear(self.position);
    }
}

/// Full-depth minimax: O maximizes, X minimizes, every outcome counts the same no matter
/// how many moves away it is.
///
/// The board is used as scratch space but is left exactly as it was passed in.
pub fn evaluate(board: &mut Board, maximizing: bool) -> i32 {
    if let Some(score) = score(board) {
        return score;
    }

    let player = if maximizing { Player::O } else { Player::X };
    let empty: Vec<Position> = board.empty_cells().collect();

    let scores = empty.into_iter().filter_map(|position| {
        let mut next = Speculative::place(board, position, player)?;
        let value = evaluate(&mut next, !maximizing);
        Some(value)
    });

    if maximizing {
        scores.max().unwrap_or(TIE)
    } else {
        scores.min().unwrap_or(TIE)
    }
}

/// Pick the move for O with the highest minimax value, the first one in row-major order
/// wins ties. Returns `None` when there is no empty cell left.
pub fn best_move(board: &Board) -> Option<Position> {
    let mut scratch = *board;
    let mut best: Option<(Position, i32)> = None;

    for position in board.empty_cells() {
        let Some(mut next) = Speculative::place(&mut scratch, position, Player::O) else {
            continue;
        };
        let value = evaluate(&mut next, false);

        if best.map_or(true, |(_, best_value)| value > best_value) {
            best = Some((position, value));
        }
    }

    if let Some((position, value)) = best {
        debug!("best move for O is {} with value {}", position, value);
    }

    best.map(|(position, _)| position)
}
