use log::{error, info};

use crate::{maze_view::MazeDemo, tictactoe_view::TicTacToeDemo};

/// One of the programs the launcher can start
pub trait Demo {
    fn name(&self) -> &'static str;

    /// Draw the demo and handle its input, called once per frame while it is selected
    fn run(&mut self, ui: &mut egui::Ui) -> anyhow::Result<()>;

    /// Called before shutdown to persist demo specific settings
    fn save(&self, _storage: &mut dyn eframe::Storage) {}
}

pub struct Launcher {
    state: State,
    demos: Vec<Box<dyn Demo>>,
    /// message of the last failure, shown in a window until dismissed
    error: Option<String>,
}

/// We derive Deserialize/Serialize so we can persist app state on shutdown.
#[derive(Default, serde::Deserialize, serde::Serialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
struct State {
    selected: Option<String>,
}

impl Launcher {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        // Load previous app state (if any).
        // Note that you must enable the `persistence` feature for this to work.
        let state: State = if let Some(storage) = cc.storage {
            eframe::get_value(storage, eframe::APP_KEY).unwrap_or_default()
        } else {
            Default::default()
        };

        Self {
            state,
            demos: vec![
                Box::new(MazeDemo::new(cc.storage)),
                Box::new(TicTacToeDemo::default()),
            ],
            error: None,
        }
    }

    fn show_error(&mut self, ctx: &egui::Context) {
        let Some(message) = &self.error else {
            return;
        };

        let mut open = true;
        let mut dismissed = false;
        egui::Window::new("Error")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .open(&mut open)
            .show(ctx, |ui| {
                ui.label(message);
                dismissed = ui.button("Ok").clicked();
            });

        if !open || dismissed {
            self.error = None;
        }
    }
}

impl eframe::App for Launcher {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &self.state);
        for demo in &self.demos {
            demo.save(storage);
        }
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
                ui.add_space(16.0);

                egui::widgets::global_dark_light_mode_buttons(ui);
            });
        });

        egui::SidePanel::left("side_panel").show(ctx, |ui| {
            ui.heading("Choose a game:");

            for demo in &self.demos {
                let selected = self.state.selected.as_deref() == Some(demo.name());
                if ui.selectable_label(selected, demo.name()).clicked() && !selected {
                    info!("starting {}", demo.name());
                    self.state.selected = Some(demo.name().to_owned());
                }
            }

            ui.with_layout(egui::Layout::bottom_up(egui::Align::LEFT), |ui| {
                powered_by_egui_and_eframe(ui);
                egui::warn_if_debug_build(ui);
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let selected = self.state.selected.as_deref();
            match self.demos.iter_mut().find(|d| Some(d.name()) == selected) {
                Some(demo) => {
                    if let Err(e) = demo.run(ui) {
                        error!("{} failed: {:#}", demo.name(), e);
                        self.error = Some(format!("{:#}", e));
                    }
                }
                None => {
                    ui.label("Pick a game on the left.");
                }
            }
        });

        self.show_error(ctx);
    }
}

fn powered_by_egui_and_eframe(ui: &mut egui::Ui) {
    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 0.0;
        ui.label("Powered by ");
        ui.hyperlink_to("egui", "https://github.com/emilk/egui");
        ui.label(" and ");
        ui.hyperlink_to(
            "eframe",
            "https://github.com/emilk/egui/tree/master/crates/eframe",
        );
        ui.label(".");
    });
}
