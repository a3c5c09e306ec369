use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    error::MazeError,
    find::{Heuristic, NoHeuristic, PathFinder, SearchReport},
    frontier::{Frontier, PriorityFrontier, StackFrontier},
    grid::{Direction, Maze, Point},
};

/// Manhattan distance to the goal, admissible on a grid with unit steps in four directions
#[derive(Copy, Clone, Debug, Default)]
pub struct Manhattan;

impl Heuristic<Point> for Manhattan {
    fn estimate(&self, node: Point, goal: Point) -> usize {
        node.manhattan_distance(goal)
    }
}

pub type MazeFrontier = Box<dyn Frontier<Point, Direction>>;
pub type MazeHeuristic = Box<dyn Heuristic<Point>>;

/// A path finder over a [`Maze`] whose search strategy is picked at run time
pub type MazeFinder = PathFinder<Maze, MazeFrontier, MazeHeuristic>;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Algorithm {
    /// stack frontier, no heuristic; finds a path but not necessarily the shortest one
    #[serde(rename = "dfs")]
    DepthFirst,
    /// priority frontier ordered by cost + Manhattan distance
    #[serde(rename = "astar")]
    AStar,
}

impl Algorithm {
    pub const ALL: [Algorithm; 2] = [Algorithm::DepthFirst, Algorithm::AStar];

    pub fn label(&self) -> &'static str {
        match self {
            Algorithm::DepthFirst => "DFS",
            Algorithm::AStar => "A*",
        }
    }

    /// Name of the PNG file the rendered solution is written to
    pub fn image_file_name(&self) -> String {
        format!("maze_{}.png", self)
    }

    pub fn frontier(&self) -> MazeFrontier {
        match self {
            Algorithm::DepthFirst => Box::new(StackFrontier::new()),
            Algorithm::AStar => Box::new(PriorityFrontier::new()),
        }
    }

    pub fn heuristic(&self) -> MazeHeuristic {
        match self {
            Algorithm::DepthFirst => Box::new(NoHeuristic),
            Algorithm::AStar => Box::new(Manhattan),
        }
    }
}

impl Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Algorithm::DepthFirst => "dfs",
                Algorithm::AStar => "astar",
            }
        )
    }
}

impl FromStr for Algorithm {
    type Err = MazeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dfs" | "depth-first" => Ok(Algorithm::DepthFirst),
            "astar" | "a*" => Ok(Algorithm::AStar),
            _ => Err(MazeError::UnknownAlgorithm(s.to_string())),
        }
    }
}

impl Maze {
    /// Create a path finder from the start to the goal of this maze
    pub fn path_finder(&self, algorithm: Algorithm) -> MazeFinder {
        PathFinder::new(
            self.start(),
            self.goal(),
            algorithm.frontier(),
            algorithm.heuristic(),
        )
    }

    /// Search a path from the start to the goal
    pub fn solve(&self, algorithm: Algorithm) -> Result<SearchReport<Point, Direction>, MazeError> {
        self.path_finder(algorithm).finish(self)
    }
}
