mod app;
mod color;
mod data;
mod state;
mod ui;

use app::UdaraApp;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Udara – Air Quality Dashboard",
        options,
        Box::new(|_cc| {
            let mut app = UdaraApp::default();
            // Optional CSV path or URL on the command line.
            if let Some(source) = std::env::args().nth(1) {
                app.state.load_source(&source);
            }
            Ok(Box::new(app))
        }),
    )
}
