//! Control Panel Widget
//! Left side panel with data sources, region selection and actions.

use crate::state::{DashboardState, LoadStatus};
use egui::{Color32, ComboBox, RichText};

/// Left side control panel.
pub struct ControlPanel {
    pub meal_source: String,
    pub nutrition_source: String,
    /// Last action message, e.g. export results.
    pub message: Option<String>,
}

impl ControlPanel {
    pub fn new(meal_source: impl Into<String>, nutrition_source: impl Into<String>) -> Self {
        Self {
            meal_source: meal_source.into(),
            nutrition_source: nutrition_source.into(),
            message: None,
        }
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui, state: &DashboardState) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🍲 Meals & Nutrition")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(
                RichText::new("District indicators by state")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Data Source Section =====
        ui.label(RichText::new("📁 Data Sources").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.label(RichText::new(format!("Meals: {}", self.meal_source)).size(12.0));
                ui.label(
                    RichText::new(format!("Nutrition: {}", self.nutrition_source)).size(12.0),
                );
                ui.add_space(4.0);
                let reload_enabled = *state.status() != LoadStatus::Loading;
                ui.add_enabled_ui(reload_enabled, |ui| {
                    if ui.button("🔄 Reload").clicked() {
                        action = ControlPanelAction::Reload;
                    }
                });
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Region Section =====
        ui.label(RichText::new("🗺 Region").size(14.0).strong());
        ui.add_space(5.0);

        let selected = state.selected_region().unwrap_or("").to_string();
        ui.add_enabled_ui(state.is_ready() && !state.summaries().is_empty(), |ui| {
            ComboBox::from_id_salt("region")
                .width(220.0)
                .selected_text(&selected)
                .show_ui(ui, |ui| {
                    for summary in state.summaries() {
                        if ui
                            .selectable_label(selected == summary.region, &summary.region)
                            .clicked()
                        {
                            action = ControlPanelAction::SelectRegion(summary.region.clone());
                        }
                    }
                });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Action Buttons =====
        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(state.is_ready(), |ui| {
                let button = egui::Button::new(RichText::new("📄 Export JSON").size(14.0))
                    .min_size(egui::vec2(150.0, 30.0));
                if ui.add(button).clicked() {
                    action = ControlPanelAction::ExportJson;
                }
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Status Section =====
        ui.label(RichText::new("📊 Status").size(14.0).strong());
        ui.add_space(5.0);

        let (status, status_color) = match state.status() {
            LoadStatus::Loading => ("Loading data...".to_string(), Color32::GRAY),
            LoadStatus::Ready => (
                format!("Ready: {} regions", state.summaries().len()),
                Color32::from_rgb(40, 167, 69),
            ),
            LoadStatus::Unavailable(reason) => (
                format!("Error: {}", reason),
                Color32::from_rgb(220, 53, 69),
            ),
        };
        ui.label(RichText::new(status).size(11.0).color(status_color));

        if let Some(message) = &self.message {
            ui.add_space(4.0);
            ui.label(RichText::new(message).size(11.0).color(Color32::GRAY));
        }

        action
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    SelectRegion(String),
    Reload,
    ExportJson,
}
