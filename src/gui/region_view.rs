//! Region View Widget
//! Central panel showing the selected region's averages, indicator chart
//! and district table.

use crate::charts::{format_value, Indicator, IndicatorPlotter, RegionChart};
use crate::state::{DashboardState, LoadStatus, StateEvent};
use egui::{Color32, RichText, ScrollArea};
use std::sync::mpsc::Receiver;

const CHART_HEIGHT: f32 = 360.0;

/// Central display area. Keeps a cached chart for the selected region and
/// refreshes it from state events.
pub struct RegionView {
    events: Receiver<StateEvent>,
    chart: Option<RegionChart>,
}

impl RegionView {
    pub fn new(state: &mut DashboardState) -> Self {
        Self {
            events: state.subscribe(),
            chart: None,
        }
    }

    /// Apply pending state events.
    pub fn sync(&mut self, state: &DashboardState) {
        while let Ok(event) = self.events.try_recv() {
            match event {
                StateEvent::Ready { .. } | StateEvent::SelectionChanged { .. } => {
                    self.chart = state.selected_summary().map(RegionChart::from_summary);
                }
                StateEvent::Loading | StateEvent::Unavailable { .. } => {
                    self.chart = None;
                }
            }
        }
    }

    pub fn chart(&self) -> Option<&RegionChart> {
        self.chart.as_ref()
    }

    pub fn show(&mut self, ui: &mut egui::Ui, state: &DashboardState) {
        match state.status() {
            LoadStatus::Loading => {
                ui.centered_and_justified(|ui| {
                    ui.spinner();
                    ui.label(RichText::new("Loading...").size(20.0));
                });
                return;
            }
            LoadStatus::Unavailable(_) => {
                ui.centered_and_justified(|ui| {
                    ui.label(
                        RichText::new("Data unavailable")
                            .size(20.0)
                            .color(Color32::from_rgb(220, 53, 69)),
                    );
                });
                return;
            }
            LoadStatus::Ready => {}
        }

        let (Some(summary), Some(chart)) = (state.selected_summary(), self.chart.as_ref()) else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        };

        ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
            ui.label(
                RichText::new(&summary.region)
                    .size(22.0)
                    .strong()
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(
                RichText::new(format!("{} districts", summary.sub_regions.len()))
                    .size(12.0)
                    .color(Color32::GRAY),
            );
            ui.add_space(10.0);

            // Averages strip
            ui.horizontal(|ui| {
                for indicator in Indicator::ALL {
                    Self::draw_average_card(ui, indicator, indicator.average(summary));
                    ui.add_space(10.0);
                }
            });

            ui.add_space(12.0);
            ui.label(RichText::new("Indicators by District").size(14.0).strong());
            IndicatorPlotter::draw_indicator_chart(ui, chart, CHART_HEIGHT);

            ui.add_space(12.0);
            IndicatorPlotter::draw_district_table(ui, summary);
        });
    }

    fn draw_average_card(ui: &mut egui::Ui, indicator: Indicator, value: f64) {
        egui::Frame::none()
            .rounding(8.0)
            .stroke(egui::Stroke::new(2.0, indicator.color()))
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.set_min_width(160.0);
                ui.vertical(|ui| {
                    ui.label(
                        RichText::new(format!("Avg {}", indicator.label()))
                            .size(12.0)
                            .color(indicator.color()),
                    );
                    ui.label(RichText::new(format_value(value)).size(24.0).strong());
                });
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{MealRecord, NutritionRecord};
    use crate::stats::merge_and_aggregate;

    fn ready_state() -> (DashboardState, RegionView) {
        let mut state = DashboardState::new();
        let view = RegionView::new(&mut state);
        state.finish_loading(merge_and_aggregate(
            &[
                MealRecord::new("Bihar", "A", 60.0),
                MealRecord::new("Kerala", "K", 90.0),
            ],
            &[
                NutritionRecord::new("Bihar", "A", 40.0, 30.0),
                NutritionRecord::new("Kerala", "K", 20.0, 10.0),
            ],
        ));
        (state, view)
    }

    #[test]
    fn chart_follows_selection() {
        let (mut state, mut view) = ready_state();
        view.sync(&state);
        assert_eq!(view.chart().unwrap().region, "Bihar");

        state.select_region("Kerala").unwrap();
        view.sync(&state);
        assert_eq!(view.chart().unwrap().region, "Kerala");
    }

    #[test]
    fn chart_clears_on_reload() {
        let (mut state, mut view) = ready_state();
        view.sync(&state);

        state.begin_loading();
        view.sync(&state);
        assert!(view.chart().is_none());
    }

    #[test]
    fn single_sync_sees_selection_made_earlier_in_frame() {
        let (mut state, mut view) = ready_state();

        state.select_region("Kerala").unwrap();
        view.sync(&state);

        assert_eq!(view.chart().unwrap().region, "Kerala");
        view.sync(&state);
        assert_eq!(view.chart().unwrap().region, "Kerala");
    }
}
