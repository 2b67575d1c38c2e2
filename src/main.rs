mod app;
mod color;
mod data;
mod state;
mod ui;

use std::path::PathBuf;

use app::DashboardApp;
use eframe::egui;

/// Default dataset looked for in the working directory at startup.
const DEFAULT_DATASET: &str = "customer_data.csv";

fn main() -> eframe::Result {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    // First CLI argument wins; otherwise pick up customer_data.csv if it is
    // sitting next to the binary's working directory.
    let startup_path: Option<PathBuf> = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| {
            let default = PathBuf::from(DEFAULT_DATASET);
            default.exists().then_some(default)
        });

    eframe::run_native(
        "Loyalty Dashboard – Customer Analytics",
        options,
        Box::new(move |_cc| {
            let mut app = DashboardApp::default();
            if let Some(path) = &startup_path {
                ui::panels::load_into_state(&mut app.state, path);
            }
            Ok(Box::new(app))
        }),
    )
}
