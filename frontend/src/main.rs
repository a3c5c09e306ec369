mod app;
mod maze_view;
mod tictactoe_view;

fn main() -> eframe::Result<()> {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Game Launcher")
            .with_inner_size([1000.0, 720.0])
            .with_min_inner_size([480.0, 360.0]),
        ..Default::default()
    };

    eframe::run_native(
        "launcher",
        native_options,
        Box::new(|cc| Box::new(app::Launcher::new(cc))),
    )
}
