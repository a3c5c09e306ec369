use std::{collections::BTreeSet, path::Path};

use image::{Rgba, RgbaImage};
use log::debug;

use crate::{
    error::MazeError,
    grid::{Cell, Maze, Point, GOAL_MARKER, START_MARKER},
};

pub const CELL_SIZE: u32 = 50;
pub const CELL_BORDER: u32 = 2;

const BACKGROUND: Rgba<u8> = Rgba([0, 0, 0, 255]);
const WALL: Rgba<u8> = Rgba([40, 40, 40, 255]);
const START: Rgba<u8> = Rgba([255, 0, 0, 255]);
const GOAL: Rgba<u8> = Rgba([0, 171, 28, 255]);
const PATH: Rgba<u8> = Rgba([220, 235, 113, 255]);
const EXPLORED: Rgba<u8> = Rgba([212, 97, 85, 255]);
const OPEN: Rgba<u8> = Rgba([237, 240, 252, 255]);

pub const PATH_MARKER: char = '*';

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    pub show_solution: bool,
    pub show_explored: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            show_solution: true,
            show_explored: false,
        }
    }
}

/// Draw the maze as text, with the cells of the path (if any) marked by `*`
pub fn render_text(maze: &Maze, path: Option<&[Point]>) -> String {
    let mut out = String::with_capacity(maze.rows() * (maze.columns() + 1));

    for row in 0..maze.rows() {
        for col in 0..maze.columns() {
            let point = Point::new(row, col);
            let c = if maze.is_wall(point) {
                Cell::Wall.glyph()
            } else if point == maze.start() {
                START_MARKER
            } else if point == maze.goal() {
                GOAL_MARKER
            } else if path.is_some_and(|p| p.contains(&point)) {
                PATH_MARKER
            } else {
                ' '
            };
            out.push(c);
        }
        out.push('\n');
    }

    out
}

fn cell_color(
    maze: &Maze,
    point: Point,
    path: Option<&[Point]>,
    explored: Option<&BTreeSet<Point>>,
    options: RenderOptions,
) -> Rgba<u8> {
    if maze.is_wall(point) {
        WALL
    } else if point == maze.start() {
        START
    } else if point == maze.goal() {
        GOAL
    } else if options.show_solution && path.is_some_and(|p| p.contains(&point)) {
        PATH
    } else if options.show_explored && explored.is_some_and(|e| e.contains(&point)) {
        EXPLORED
    } else {
        OPEN
    }
}

/// Draw the maze as an image with one square of `CELL_SIZE` pixels per cell
pub fn render_image(
    maze: &Maze,
    path: Option<&[Point]>,
    explored: Option<&BTreeSet<Point>>,
    options: RenderOptions,
) -> RgbaImage {
    let width = maze.columns() as u32 * CELL_SIZE;
    let height = maze.rows() as u32 * CELL_SIZE;
    let mut img = RgbaImage::from_pixel(width, height, BACKGROUND);

    for row in 0..maze.rows() {
        for col in 0..maze.columns() {
            let point = Point::new(row, col);
            let color = cell_color(maze, point, path, explored, options);

            let x0 = col as u32 * CELL_SIZE + CELL_BORDER;
            let y0 = row as u32 * CELL_SIZE + CELL_BORDER;
            let x1 = (col as u32 + 1) * CELL_SIZE - CELL_BORDER;
            let y1 = (row as u32 + 1) * CELL_SIZE - CELL_BORDER;

            for y in y0..=y1 {
                for x in x0..=x1 {
                    img.put_pixel(x, y, color);
                }
            }
        }
    }

    img
}

/// Render the maze and write it to a PNG file
pub fn save_image(
    maze: &Maze,
    path: Option<&[Point]>,
    explored: Option<&BTreeSet<Point>>,
    options: RenderOptions,
    filename: impl AsRef<Path>,
) -> Result<(), MazeError> {
    let filename = filename.as_ref();
    let img = render_image(maze, path, explored, options);
    img.save(filename)?;
    debug!(
        "wrote {}x{} image to {}",
        img.width(),
        img.height(),
        filename.display()
    );
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Algorithm;

    fn center(point: Point) -> (u32, u32) {
        (
            point.col as u32 * CELL_SIZE + CELL_SIZE / 2,
            point.row as u32 * CELL_SIZE + CELL_SIZE / 2,
        )
    }

    fn pixel_at(img: &RgbaImage, point: Point) -> Rgba<u8> {
        let (x, y) = center(point);
        *img.get_pixel(x, y)
    }

    #[test]
    fn test_render_text_marks_path() {
        let maze: Maze = "A  \n## \nB  ".parse().unwrap();
        let report = maze.solve(Algorithm::AStar).unwrap();
        let cells = report.solution.cells();

        assert_eq!(render_text(&maze, None), "A  \n██ \nB  \n");
        assert_eq!(render_text(&maze, Some(&cells)), "A**\n██*\nB**\n");
    }

    #[test]
    fn test_image_size() {
        let maze: Maze = "A #\n  B".parse().unwrap();
        let img = render_image(&maze, None, None, RenderOptions::default());
        assert_eq!(img.dimensions(), (3 * CELL_SIZE, 2 * CELL_SIZE));
    }

    #[test]
    fn test_image_colors() {
        let maze: Maze = "A #\n  B\n   ".parse().unwrap();
        let report = maze.solve(Algorithm::DepthFirst).unwrap();
        let cells = report.solution.cells();
        let img = render_image(
            &maze,
            Some(&cells),
            Some(&report.explored),
            RenderOptions {
                show_solution: true,
                show_explored: true,
            },
        );

        assert_eq!(pixel_at(&img, maze.start()), START);
        assert_eq!(pixel_at(&img, maze.goal()), GOAL);
        assert_eq!(pixel_at(&img, Point::new(0, 2)), WALL);
        for cell in &cells[..cells.len() - 1] {
            assert_eq!(pixel_at(&img, *cell), PATH);
        }
        assert_eq!(pixel_at(&img, Point::new(2, 2)), OPEN);

        // the border between cells stays black
        assert_eq!(*img.get_pixel(0, 0), BACKGROUND);
        assert_eq!(*img.get_pixel(CELL_SIZE - 1, CELL_SIZE / 2), BACKGROUND);
        assert_eq!(*img.get_pixel(CELL_BORDER, CELL_BORDER), START);
        assert_eq!(
            *img.get_pixel(CELL_SIZE - CELL_BORDER, CELL_SIZE - CELL_BORDER),
            START
        );
    }

    #[test]
    fn test_explored_hidden_by_default() {
        let maze: Maze = "A  \n## \nB  ".parse().unwrap();
        let explored: BTreeSet<Point> = [Point::new(0, 1)].into_iter().collect();

        let hidden = render_image(&maze, None, Some(&explored), RenderOptions::default());
        assert_eq!(pixel_at(&hidden, Point::new(0, 1)), OPEN);

        let shown = render_image(
            &maze,
            None,
            Some(&explored),
            RenderOptions {
                show_solution: false,
                show_explored: true,
            },
        );
        assert_eq!(pixel_at(&shown, Point::new(0, 1)), EXPLORED);
    }

    #[test]
    fn test_save_image_to_missing_directory() {
        let maze: Maze = "AB".parse().unwrap();
        assert!(matches!(
            save_image(
                &maze,
                None,
                None,
                RenderOptions::default(),
                "does/not/exist/maze.png"
            ),
            Err(MazeError::Image(_))
        ));
    }
}
