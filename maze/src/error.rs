use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong while loading, solving or rendering a maze
#[derive(Debug, Error)]
pub enum MazeError {
    #[error("maze must have exactly one {role} ('{marker}'), found {found}")]
    MalformedMaze {
        role: &'static str,
        marker: char,
        found: usize,
    },

    #[error("empty frontier")]
    EmptyFrontier,

    #[error("no solution")]
    NoSolution,

    #[error("unknown algorithm '{0}' (expected 'dfs' or 'astar')")]
    UnknownAlgorithm(String),

    #[error("failed to read maze file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write image: {0}")]
    Image(#[from] image::ImageError),
}
