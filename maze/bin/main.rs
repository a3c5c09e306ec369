use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::{debug, info};
use maze::{render_text, save_image, Algorithm, Direction, Maze, Point, RenderOptions, SearchReport};
use serde::Serialize;

/// Solve a text maze with depth-first search and/or A*
#[derive(Parser)]
#[command(about, long_about = None, version)]
struct Args {
    /// Maze text file ('A' start, 'B' goal, space floor, anything else wall); uses the bundled maze if omitted
    maze: Option<PathBuf>,

    /// Only run this algorithm (dfs or astar) instead of both
    #[arg(short, long)]
    algorithm: Option<Algorithm>,

    /// Directory the maze_dfs.png / maze_astar.png images are written to
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Do not write any image
    #[arg(long, default_value_t = false)]
    no_image: bool,

    /// Color the explored cells in the images
    #[arg(short = 'e', long, default_value_t = false)]
    show_explored: bool,

    /// Print the search reports as JSON instead of drawing the maze
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Enable debug messages
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

#[derive(Serialize)]
struct Output {
    algorithm: Algorithm,
    #[serde(flatten)]
    report: SearchReport<Point, Direction>,
}

fn title(algorithm: Algorithm) -> &'static str {
    match algorithm {
        Algorithm::DepthFirst => "DFS",
        Algorithm::AStar => "A* with Manhattan Distance Heuristic",
    }
}

fn main() -> Result<(), anyhow::Error> {
    let args = Args::parse();

    let mut logger = env_logger::Builder::from_default_env();
    if args.debug {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();

    let maze = match &args.maze {
        Some(path) => Maze::open(path)?,
        None => {
            debug!("no maze given, using the bundled one");
            maze::DEFAULT_MAZE.parse()?
        }
    };
    info!(
        "loaded {}x{} maze, start {:?}, goal {:?}",
        maze.rows(),
        maze.columns(),
        maze.start(),
        maze.goal()
    );

    let algorithms = match args.algorithm {
        Some(algorithm) => vec![algorithm],
        None => Algorithm::ALL.to_vec(),
    };

    let options = RenderOptions {
        show_solution: true,
        show_explored: args.show_explored,
    };

    let mut outputs = Vec::with_capacity(algorithms.len());

    for algorithm in algorithms {
        if !args.json {
            println!("{}:", title(algorithm));
            print!("{}", maze);
            println!("Solving with {}...", algorithm.label());
        }

        let report = maze
            .solve(algorithm)
            .with_context(|| format!("{} search failed", algorithm.label()))?;
        let cells = report.solution.cells();

        if !args.json {
            println!("States Explored: {}", report.num_explored);
            println!("Solution:");
            println!("{}", render_text(&maze, Some(&cells)));
        }

        if !args.no_image {
            let filename = args.output_dir.join(algorithm.image_file_name());
            save_image(
                &maze,
                Some(&cells),
                Some(&report.explored),
                options,
                &filename,
            )
            .with_context(|| format!("could not save {}", filename.display()))?;
            info!("wrote {}", filename.display());
        }

        outputs.push(Output { algorithm, report });
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outputs)?);
    }

    Ok(())
}
