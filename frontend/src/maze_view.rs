use std::time::Duration;

use anyhow::Context as _;
use egui::{ColorImage, TextureHandle, TextureOptions};
use log::info;
use maze::{
    render_image, render_text, save_image, Algorithm, Maze, MazeError, MazeFinder,
    PathFinderState, Point, RenderOptions, DEFAULT_MAZE,
};

use crate::app::Demo;

const SETTINGS_KEY: &str = "maze_demo";

#[derive(serde::Deserialize, serde::Serialize)]
#[serde(default)]
struct Settings {
    maze_path: String,
    algorithm: Algorithm,
    show_explored: bool,
    auto_step: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            maze_path: String::new(),
            algorithm: Algorithm::AStar,
            show_explored: true,
            auto_step: false,
        }
    }
}

/// Step through DFS or A* on a text maze and look at the result as text and as an image
pub struct MazeDemo {
    settings: Settings,
    maze: Option<Maze>,
    finder: Option<MazeFinder>,
    texture: Option<TextureHandle>,
    needs_redraw: bool,
    message: String,
}

impl MazeDemo {
    pub fn new(storage: Option<&dyn eframe::Storage>) -> Self {
        let settings = storage
            .and_then(|storage| eframe::get_value(storage, SETTINGS_KEY))
            .unwrap_or_default();

        Self {
            settings,
            maze: None,
            finder: None,
            texture: None,
            needs_redraw: false,
            message: String::new(),
        }
    }

    fn load(&mut self, maze: Maze) {
        info!(
            "loaded {}x{} maze, start {:?}, goal {:?}",
            maze.rows(),
            maze.columns(),
            maze.start(),
            maze.goal()
        );
        self.maze = Some(maze);
        self.reset();
    }

    fn reset(&mut self) {
        self.finder = self
            .maze
            .as_ref()
            .map(|maze| maze.path_finder(self.settings.algorithm));
        self.needs_redraw = true;
        self.message.clear();
    }

    fn is_done(&self) -> bool {
        self.finder
            .as_ref()
            .map_or(true, |finder| finder.state().is_done())
    }

    /// Expand one node, running out of nodes is reported once as an error
    fn step(&mut self) -> Result<(), MazeError> {
        let (Some(maze), Some(finder)) = (&self.maze, &mut self.finder) else {
            return Ok(());
        };
        if finder.state().is_done() {
            return Ok(());
        }

        let state = finder.step(maze)?;
        self.needs_redraw = true;

        match state {
            PathFinderState::NoPathFound => Err(MazeError::NoSolution),
            _ => Ok(()),
        }
    }

    fn finish(&mut self) -> Result<(), MazeError> {
        while !self.is_done() {
            self.step()?;
        }
        Ok(())
    }

    fn options(&self) -> RenderOptions {
        RenderOptions {
            show_solution: true,
            show_explored: self.settings.show_explored,
        }
    }

    fn export_image(&mut self) -> anyhow::Result<()> {
        let (Some(maze), Some(finder)) = (&self.maze, &self.finder) else {
            return Ok(());
        };

        let filename = self.settings.algorithm.image_file_name();
        let cells = solution_cells(finder);
        save_image(
            maze,
            cells.as_deref(),
            Some(finder.explored()),
            self.options(),
            &filename,
        )
        .with_context(|| format!("could not save {}", filename))?;

        info!("saved {}", filename);
        self.message = format!("Saved {}", filename);
        Ok(())
    }

    fn redraw(&mut self, ctx: &egui::Context) {
        let Some(maze) = &self.maze else {
            return;
        };

        let finder = self.finder.as_ref();
        let cells = finder.and_then(solution_cells);
        let img = render_image(
            maze,
            cells.as_deref(),
            finder.map(|finder| finder.explored()),
            self.options(),
        );
        let image = to_color_image(&img);

        match &mut self.texture {
            Some(texture) => texture.set(image, TextureOptions::NEAREST),
            None => self.texture = Some(ctx.load_texture("maze", image, TextureOptions::NEAREST)),
        }
        self.needs_redraw = false;
    }

    fn status(&self) -> String {
        let Some(finder) = &self.finder else {
            return String::new();
        };

        let state = match finder.state() {
            PathFinderState::Computing => "Solving...".to_owned(),
            PathFinderState::NoPathFound => "No solution".to_owned(),
            PathFinderState::PathFound(solution) => format!("Solution: {} steps", solution.len()),
        };
        format!("States Explored: {}\n{}", finder.num_explored(), state)
    }
}

impl Demo for MazeDemo {
    fn name(&self) -> &'static str {
        "Maze Solver"
    }

    fn run(&mut self, ui: &mut egui::Ui) -> anyhow::Result<()> {
        let mut load_default = false;
        let mut open = false;
        ui.horizontal(|ui| {
            load_default = ui.button("Default").clicked();
            ui.add(
                egui::TextEdit::singleline(&mut self.settings.maze_path)
                    .hint_text("path to a maze file"),
            );
            open = ui.button("Open").clicked();
        });

        if load_default {
            self.load(DEFAULT_MAZE.parse()?);
        }
        if open {
            let maze = Maze::open(self.settings.maze_path.trim())?;
            self.load(maze);
        }

        let previous = self.settings.algorithm;
        ui.horizontal(|ui| {
            ui.label("Algorithm:");
            for algorithm in Algorithm::ALL {
                ui.selectable_value(&mut self.settings.algorithm, algorithm, algorithm.label());
            }
        });
        if self.settings.algorithm != previous {
            self.reset();
        }

        if self.maze.is_none() {
            ui.label("Load the default maze or open a maze file.");
            return Ok(());
        }

        let (mut reset, mut step, mut finish, mut export) = (false, false, false, false);
        ui.horizontal(|ui| {
            reset = ui.button("Reset").clicked();
            step = ui.button("Step").clicked();
            finish = ui.button("Finish").clicked();
            ui.checkbox(&mut self.settings.auto_step, "Auto Step");
            if ui
                .checkbox(&mut self.settings.show_explored, "Show explored")
                .changed()
            {
                self.needs_redraw = true;
            }
            export = ui.button("Save image").clicked();
        });

        if reset {
            self.reset();
        }
        if step {
            self.step()?;
        }
        if finish {
            self.finish()?;
        }
        if self.settings.auto_step && !self.is_done() {
            self.step()?;
            ui.ctx().request_repaint_after(Duration::from_millis(20));
        }
        if export {
            self.export_image()?;
        }

        ui.label(self.status());
        if !self.message.is_empty() {
            ui.label(&self.message);
        }

        if self.needs_redraw {
            self.redraw(ui.ctx());
        }

        let (Some(maze), Some(finder)) = (&self.maze, &self.finder) else {
            return Ok(());
        };
        let cells = solution_cells(finder);
        egui::ScrollArea::vertical()
            .auto_shrink([false; 2])
            .show(ui, |ui| {
                ui.monospace(render_text(maze, cells.as_deref()));
                if let Some(texture) = &self.texture {
                    ui.add(egui::Image::new((texture.id(), texture.size_vec2())).shrink_to_fit());
                }
            });

        Ok(())
    }

    fn save(&self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, SETTINGS_KEY, &self.settings);
    }
}

fn solution_cells(finder: &MazeFinder) -> Option<Vec<Point>> {
    match finder.state() {
        PathFinderState::PathFound(solution) => Some(solution.cells()),
        _ => None,
    }
}

fn to_color_image(img: &image::RgbaImage) -> ColorImage {
    let size = [img.width() as _, img.height() as _];
    ColorImage::from_rgba_unmultiplied(size, img.as_flat_samples().as_slice())
}
