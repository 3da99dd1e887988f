//! Dashboard Main Application
//! Main window with control panel and region view.

use crate::config::DashboardConfig;
use crate::data::{DataLoader, FsFetcher};
use crate::export::ReportExporter;
use crate::gui::{ControlPanel, ControlPanelAction, RegionView};
use crate::state::{DashboardState, LoadStatus};
use crate::stats::RegionSummary;
use egui::SidePanel;
use std::sync::mpsc::{channel, Receiver};
use std::sync::Arc;
use std::thread;

/// Load cycle result from background thread
enum LoadResult {
    Complete(Vec<RegionSummary>),
    Error(String),
}

/// Main application window.
pub struct DashboardApp {
    config: DashboardConfig,
    loader: Arc<DataLoader<FsFetcher>>,
    state: DashboardState,
    control_panel: ControlPanel,
    region_view: RegionView,

    // Async loading
    load_rx: Option<Receiver<LoadResult>>,
}

impl DashboardApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: DashboardConfig) -> Self {
        let loader = Arc::new(DataLoader::new(
            FsFetcher::new(&config.data.base_dir),
            config.data.meal_source.clone(),
            config.data.nutrition_source.clone(),
        ));
        let mut state = DashboardState::new();
        let region_view = RegionView::new(&mut state);
        let control_panel =
            ControlPanel::new(loader.meal_source(), loader.nutrition_source());

        let mut app = Self {
            config,
            loader,
            state,
            control_panel,
            region_view,
            load_rx: None,
        };
        app.start_loading();
        app
    }

    /// Start a full load cycle in a background thread
    fn start_loading(&mut self) {
        if self.load_rx.is_some() {
            return; // Already loading
        }

        self.state.begin_loading();
        self.control_panel.message = None;

        let (tx, rx) = channel();
        self.load_rx = Some(rx);
        let loader = Arc::clone(&self.loader);

        tracing::info!("starting load cycle");
        thread::spawn(move || {
            let result = match crate::load_summaries(loader.as_ref()) {
                Ok(summaries) => LoadResult::Complete(summaries),
                Err(e) => LoadResult::Error(e.to_string()),
            };
            let _ = tx.send(result);
        });
    }

    /// Check for load results
    fn check_load_results(&mut self) {
        let Some(rx) = self.load_rx.take() else {
            return;
        };

        match rx.try_recv() {
            Ok(LoadResult::Complete(summaries)) => self.state.finish_loading(summaries),
            Ok(LoadResult::Error(error)) => self.state.fail_loading(error),
            Err(std::sync::mpsc::TryRecvError::Empty) => {
                // Put receiver back while still loading
                self.load_rx = Some(rx);
            }
            Err(std::sync::mpsc::TryRecvError::Disconnected) => {
                self.state.fail_loading("loader thread exited");
            }
        }
    }

    fn handle_select_region(&mut self, region: &str) {
        if let Err(e) = self.state.select_region(region) {
            tracing::warn!(error = %e, "region selection rejected");
            self.control_panel.set_message(format!("Error: {}", e));
        }
    }

    /// Handle JSON export
    fn handle_export_json(&mut self) {
        if !self.state.is_ready() {
            self.control_panel.set_message("No data to export");
            return;
        }

        // Ask user for output location
        let output_path = match rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .set_file_name("nutrition_report.json")
            .save_file()
        {
            Some(path) => path,
            None => return, // User cancelled
        };

        match ReportExporter::export_json(
            self.state.summaries(),
            &output_path,
            &self.config.window.title,
        ) {
            Ok(()) => self
                .control_panel
                .set_message(format!("Exported {}", output_path.display())),
            Err(e) => {
                tracing::warn!(error = %e, "export failed");
                self.control_panel.set_message(format!("Export error: {}", e));
            }
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for background results
        self.check_load_results();

        // Request repaint while loading
        if *self.state.status() == LoadStatus::Loading {
            ctx.request_repaint();
        }

        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(280.0)
            .max_width(340.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(ui, &self.state);

                    match action {
                        ControlPanelAction::SelectRegion(region) => {
                            self.handle_select_region(&region)
                        }
                        ControlPanelAction::Reload => self.start_loading(),
                        ControlPanelAction::ExportJson => self.handle_export_json(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Region View
        self.region_view.sync(&self.state);
        egui::CentralPanel::default().show(ctx, |ui| {
            self.region_view.show(ui, &self.state);
        });
    }
}
