//! Meal Dashboard - School Meal Coverage & Child Nutrition Viewer
//!
//! Desktop dashboard comparing meal coverage with stunting and underweight rates.

use eframe::egui;
use meal_dashboard::config::{DashboardConfig, DEFAULT_CONFIG_FILE};
use meal_dashboard::gui::DashboardApp;
use std::path::Path;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,meal_dashboard=debug".into()),
        )
        .init();

    let config = DashboardConfig::load_or_default(Path::new(DEFAULT_CONFIG_FILE))?;
    tracing::info!(
        meal_source = %config.data.meal_source,
        nutrition_source = %config.data.nutrition_source,
        "starting dashboard"
    );

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window.width, config.window.height])
            .with_min_inner_size([900.0, 600.0])
            .with_title(config.window.title.clone()),
        ..Default::default()
    };

    // Run the application
    let app_name = config.window.title.clone();
    eframe::run_native(
        &app_name,
        options,
        Box::new(move |cc| Ok(Box::new(DashboardApp::new(cc, config)))),
    )
    .map_err(|e| anyhow::anyhow!("dashboard window failed: {e}"))
}
