use crate::error::MazeError;
use crate::find::{MapTrait, NodeReference};
use std::path::Path;
use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

pub const START_MARKER: char = 'A';
pub const GOAL_MARKER: char = 'B';

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Cell {
    Wall,
    Open,
}

impl Default for Cell {
    fn default() -> Self {
        Self::Open
    }
}

impl Cell {
    pub fn glyph(self) -> char {
        match self {
            Cell::Wall => '█',
            Cell::Open => ' ',
        }
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Direction::Up => "up",
                Direction::Down => "down",
                Direction::Left => "left",
                Direction::Right => "right",
            }
        )
    }
}

impl FromStr for Direction {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            _ => Err(anyhow::anyhow!("Invalid direction: {}", s)),
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct Point {
    pub row: usize,
    pub col: usize,
}

impl Point {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn manhattan_distance(self, other: Point) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

impl NodeReference for Point {}

/// A rectangular maze with exactly one start and one goal
#[derive(Clone, Debug)]
pub struct Maze {
    rows: usize,
    columns: usize,
    cells: Vec<Vec<Cell>>,
    start: Point,
    goal: Point,
}

impl Maze {
    /// Read and parse a maze text file
    pub fn open(path: impl AsRef<Path>) -> Result<Self, MazeError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| MazeError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        contents.parse()
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn goal(&self) -> Point {
        self.goal
    }

    pub fn cell(&self, point: Point) -> Option<Cell> {
        self.cells.get(point.row)?.get(point.col).copied()
    }

    /// Cells outside of the maze count as walls
    pub fn is_wall(&self, point: Point) -> bool {
        self.cell(point) != Some(Cell::Open)
    }

    /// Returns the open neighbors of the given point together with the move leading there,
    /// always in the order up, down, left, right
    pub fn neighbors(&self, node: Point) -> impl Iterator<Item = (Direction, Point)> {
        let mut points = Vec::with_capacity(4);

        if node.row > 0 {
            points.push((
                Direction::Up,
                Point {
                    row: node.row - 1,
                    col: node.col,
                },
            ));
        }
        if node.row + 1 < self.rows {
            points.push((
                Direction::Down,
                Point {
                    row: node.row + 1,
                    col: node.col,
                },
            ));
        }
        if node.col > 0 {
            points.push((
                Direction::Left,
                Point {
                    row: node.row,
                    col: node.col - 1,
                },
            ));
        }
        if node.col + 1 < self.columns {
            points.push((
                Direction::Right,
                Point {
                    row: node.row,
                    col: node.col + 1,
                },
            ));
        }

        // filter to only keep open cells
        points.retain(|(_, p)| !self.is_wall(*p));

        points.into_iter()
    }
}

impl FromStr for Maze {
    type Err = MazeError;

    fn from_str(contents: &str) -> Result<Self, Self::Err> {
        let lines: Vec<&str> = contents.lines().collect();
        let rows = lines.len();
        let columns = lines
            .iter()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0);

        // lines shorter than the widest one are padded with open cells
        let mut cells = vec![vec![Cell::default(); columns]; rows];
        let mut starts = Vec::new();
        let mut goals = Vec::new();

        for (row, line) in lines.iter().enumerate() {
            for (col, c) in line.chars().enumerate() {
                cells[row][col] = match c {
                    START_MARKER => {
                        starts.push(Point { row, col });
                        Cell::Open
                    }
                    GOAL_MARKER => {
                        goals.push(Point { row, col });
                        Cell::Open
                    }
                    ' ' => Cell::Open,
                    _ => Cell::Wall,
                };
            }
        }

        let start = single_marker(&starts, "start point", START_MARKER)?;
        let goal = single_marker(&goals, "goal", GOAL_MARKER)?;

        Ok(Self {
            rows,
            columns,
            cells,
            start,
            goal,
        })
    }
}

fn single_marker(found: &[Point], role: &'static str, marker: char) -> Result<Point, MazeError> {
    match found {
        [point] => Ok(*point),
        _ => Err(MazeError::MalformedMaze {
            role,
            marker,
            found: found.len(),
        }),
    }
}

impl Display for Maze {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (row, cells) in self.cells.iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                let point = Point { row, col };
                if point == self.start {
                    write!(f, "{}", START_MARKER)?;
                } else if point == self.goal {
                    write!(f, "{}", GOAL_MARKER)?;
                } else {
                    write!(f, "{}", cell)?;
                }
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

impl MapTrait for Maze {
    type Reference = Point;
    type Action = Direction;

    fn neighbors_of(
        &self,
        node: Self::Reference,
    ) -> impl Iterator<Item = (Self::Action, Self::Reference)> {
        self.neighbors(node)
    }
}
