pub mod algorithm;
pub mod error;
pub mod find;
pub mod frontier;
pub mod grid;
pub mod node;
pub mod render;

pub use algorithm::{Algorithm, Manhattan, MazeFinder};
pub use error::MazeError;
pub use find::{
    Heuristic, MapTrait, NoHeuristic, NodeReference, PathFinder, PathFinderState, SearchReport,
    Solution,
};
pub use frontier::{Frontier, PriorityFrontier, StackFrontier};
pub use grid::{Cell, Direction, Maze, Point};
pub use node::{NodeId, SearchNode};
pub use render::{render_image, render_text, save_image, RenderOptions};

/// The maze shipped with the repository, used when no other maze is given
pub const DEFAULT_MAZE: &str = include_str!("../../data/maze2.txt");
