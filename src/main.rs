//! Tariff Dashboard - State-trading agricultural tariff rates
//!
//! Loads the aT (Korea Agro-Fisheries & Food Trade Corp.) tariff-rate CSV, lets
//! the user filter products, and charts recommended vs not-recommended rates.

mod charts;
mod config;
mod data;
mod gui;
mod logging;
mod stats;

use config::DashboardConfig;
use eframe::egui;
use gui::TariffDashboardApp;

fn main() -> eframe::Result<()> {
    logging::init();

    let config = DashboardConfig::load_or_default();
    tracing::info!(data_path = %config.data_path.display(), "starting tariff dashboard");

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([1000.0, 700.0])
            .with_title(config.window_title.clone()),
        ..Default::default()
    };

    // Run the application
    let app_name = config.window_title.clone();
    eframe::run_native(
        &app_name,
        options,
        Box::new(|cc| Ok(Box::new(TariffDashboardApp::new(cc, config)))),
    )
}
