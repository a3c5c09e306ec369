use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::GameError;

pub const SIZE: usize = 3;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Default for Cell {
    fn default() -> Self {
        Self::Empty
    }
}

impl Cell {
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '.' | ' ' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::X),
            'O' | 'o' => Some(Cell::O),
            _ => None,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    pub fn to_cell(self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }
}

impl Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_cell().to_char())
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// All cells of the board in row-major order
    pub fn all() -> impl Iterator<Item = Position> {
        (0..SIZE).flat_map(|row| (0..SIZE).map(move |col| Position { row, col }))
    }

    pub fn is_on_board(self) -> bool {
        self.row < SIZE && self.col < SIZE
    }

    /// Map a click inside a `width` x `height` window to the cell under it.
    ///
    /// Every cell is one third of the window in each dimension; clicks outside of the
    /// window (or in the leftover pixels when the size is not divisible by three) give `None`.
    pub fn from_pixel(x: f32, y: f32, width: f32, height: f32) -> Option<Position> {
        if x < 0.0 || y < 0.0 {
            return None;
        }

        let cell_width = (width as usize) / SIZE;
        let cell_height = (height as usize) / SIZE;
        if cell_width == 0 || cell_height == 0 {
            return None;
        }

        let position = Position {
            row: y as usize / cell_height,
            col: x as usize / cell_width,
        };
        position.is_on_board().then_some(position)
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: [[Cell; SIZE]; SIZE],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, position: Position) -> Option<Cell> {
        self.cells.get(position.row)?.get(position.col).copied()
    }

    /// Put the mark of `player` on an empty cell
    pub fn place(&mut self, position: Position, player: Player) -> Result<(), GameError> {
        match self.get(position) {
            None => Err(GameError::OutOfBounds {
                row: position.row,
                col: position.col,
            }),
            Some(Cell::Empty) => {
                self.cells[position.row][position.col] = player.to_cell();
                Ok(())
            }
            Some(_) => Err(GameError::Occupied(position)),
        }
    }

    /// Empty the cell again, does nothing for positions outside of the board
    pub fn clear(&mut self, position: Position) {
        if position.is_on_board() {
            self.cells[position.row][position.col] = Cell::Empty;
        }
    }

    /// Check if the player owns a full row, column or diagonal
    pub fn check_winner(&self, player: Player) -> bool {
        let target = player.to_cell();
        let owns = |row: usize, col: usize| self.cells[row][col] == target;

        (0..SIZE).any(|row| (0..SIZE).all(|col| owns(row, col)))
            || (0..SIZE).any(|col| (0..SIZE).all(|row| owns(row, col)))
            || (0..SIZE).all(|i| owns(i, i))
            || (0..SIZE).all(|i| owns(i, SIZE - 1 - i))
    }

    /// X is checked first, a board where both players have a line is reported as a win for X
    pub fn winner(&self) -> Option<Player> {
        [Player::X, Player::O]
            .into_iter()
            .find(|player| self.check_winner(*player))
    }

    pub fn is_full(&self) -> bool {
        self.cells
            .iter()
            .all(|row| row.iter().all(|cell| *cell != Cell::Empty))
    }

    /// Empty cells in row-major order
    pub fn empty_cells(&self) -> impl Iterator<Item = Position> + '_ {
        Position::all().filter(|p| self.cells[p.row][p.col] == Cell::Empty)
    }

    pub fn occupied_count(&self) -> usize {
        SIZE * SIZE - self.empty_cells().count()
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in &self.cells {
            for cell in row {
                write!(f, "{}", cell.to_char())?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

impl FromStr for Board {
    type Err = GameError;

    /// Three lines of three characters each: `X`, `O` and `.` (or space) for an empty cell
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines: Vec<&str> = s.lines().collect();
        if lines.len() != SIZE {
            return Err(GameError::InvalidBoard(format!(
                "expected {} rows, got {}",
                SIZE,
                lines.len()
            )));
        }

        let mut board = Board::new();
        for (row, line) in lines.iter().enumerate() {
            let chars: Vec<char> = line.chars().collect();
            if chars.len() != SIZE {
                return Err(GameError::InvalidBoard(format!(
                    "row {} has {} cells",
                    row,
                    chars.len()
                )));
            }
            for (col, c) in chars.into_iter().enumerate() {
                board.cells[row][col] = Cell::from_char(c).ok_or_else(|| {
                    GameError::InvalidBoard(format!("invalid character '{}' at ({}, {})", c, row, col))
                })?;
            }
        }

        Ok(board)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_place_and_clear() {
        let mut board = Board::new();
        let center = Position::new(1, 1);

        board.place(center, Player::X).unwrap();
        assert_eq!(board.get(center), Some(Cell::X));
        assert_eq!(
            board.place(center, Player::O),
            Err(GameError::Occupied(center))
        );

        board.clear(center);
        assert_eq!(board.get(center), Some(Cell::Empty));
    }

    #[test]
    fn test_place_out_of_bounds() {
        let mut board = Board::new();
        assert_eq!(
            board.place(Position::new(0, 3), Player::X),
            Err(GameError::OutOfBounds { row: 0, col: 3 })
        );
        assert_eq!(board.get(Position::new(3, 0)), None);
    }

    #[test]
    fn test_check_winner_lines() {
        let winning = [
            "XXX\n...\n...",
            "...\nXXX\n...",
            "...\n...\nXXX",
            "X..\nX..\nX..",
            ".X.\n.X.\n.X.",
            "..X\n..X\n..X",
            "X..\n.X.\n..X",
            "..X\n.X.\nX..",
        ];

        for text in winning {
            let board: Board = text.parse().unwrap();
            assert!(board.check_winner(Player::X), "{text:?}");
            assert!(!board.check_winner(Player::O), "{text:?}");
            assert_eq!(board.winner(), Some(Player::X));
        }
    }

    #[test]
    fn test_check_winner_no_line() {
        for text in ["...\n...\n...", "XX.\n..X\nOO.", "XOX\nXOO\nOXX"] {
            let board: Board = text.parse().unwrap();
            assert!(!board.check_winner(Player::X), "{text:?}");
            assert!(!board.check_winner(Player::O), "{text:?}");
            assert_eq!(board.winner(), None);
        }
    }

    #[test]
    fn test_full_board() {
        let board: Board = "XOX\nXOO\nOXX".parse().unwrap();
        assert!(board.is_full());
        assert_eq!(board.empty_cells().count(), 0);
        assert_eq!(board.occupied_count(), 9);

        assert!(!Board::new().is_full());
    }

    #[test]
    fn test_empty_cells_row_major() {
        let board: Board = "X.O\n.X.\nOO.".parse().unwrap();
        let empty: Vec<_> = board.empty_cells().collect();
        assert_eq!(
            empty,
            vec![
                Position::new(0, 1),
                Position::new(1, 0),
                Position::new(1, 2),
                Position::new(2, 2),
            ]
        );
    }

    #[test]
    fn test_display_and_parse() {
        let board: Board = "X O\n.X.\nO..".parse().unwrap();
        assert_eq!(board.to_string(), "X.O\n.X.\nO..\n");
        assert_eq!(board.to_string().parse::<Board>().unwrap(), board);

        assert!(matches!(
            "XO\n...\n...".parse::<Board>(),
            Err(GameError::InvalidBoard(_))
        ));
        assert!(matches!(
            "...\n...".parse::<Board>(),
            Err(GameError::InvalidBoard(_))
        ));
        assert!(matches!(
            "..#\n...\n...".parse::<Board>(),
            Err(GameError::InvalidBoard(_))
        ));
    }

    #[test]
    fn test_from_pixel() {
        assert_eq!(
            Position::from_pixel(0.0, 0.0, 300.0, 300.0),
            Some(Position::new(0, 0))
        );
        assert_eq!(
            Position::from_pixel(150.0, 50.0, 300.0, 300.0),
            Some(Position::new(0, 1))
        );
        assert_eq!(
            Position::from_pixel(99.9, 250.0, 300.0, 300.0),
            Some(Position::new(2, 0))
        );
        assert_eq!(
            Position::from_pixel(299.0, 299.0, 300.0, 300.0),
            Some(Position::new(2, 2))
        );
        assert_eq!(Position::from_pixel(300.0, 10.0, 300.0, 300.0), None);
        assert_eq!(Position::from_pixel(-1.0, 10.0, 300.0, 300.0), None);
        assert_eq!(Position::from_pixel(1.0, 1.0, 2.0, 2.0), None);
    }

    #[test]
    fn test_opponent() {
        assert_eq!(Player::X.opponent(), Player::O);
        assert_eq!(Player::O.opponent(), Player::X);
        assert_eq!(Player::O.to_string(), "O");
    }
}
