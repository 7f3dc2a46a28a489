mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use app::SeasonDashboardApp;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = match config::load_config() {
        Ok(config) => config,
        Err(e) => {
            log::error!("{e}; falling back to defaults");
            config::DashboardConfig::default()
        }
    };
    log::info!("Dataset path: {}", config.data_path.display());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window_width, config.window_height])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Season Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(SeasonDashboardApp::new(&config)))),
    )
}
