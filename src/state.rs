//! Dashboard State
//! Holds the loaded summaries and the selected state. All mutation goes
//! through the methods here; observers receive [`StateEvent`]s.

use crate::stats::RegionSummary;
use std::sync::mpsc::{channel, Receiver, Sender};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StateError {
    #[error("Data is not loaded")]
    NotReady,
    #[error("Unknown region: {0}")]
    UnknownRegion(String),
}

/// Where the current load cycle stands.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadStatus {
    Loading,
    Ready,
    /// Terminal for this cycle. Holds a message for display.
    Unavailable(String),
}

/// Change notifications sent to subscribers.
#[derive(Debug, Clone, PartialEq)]
pub enum StateEvent {
    Loading,
    Ready { regions: Vec<String> },
    Unavailable { reason: String },
    SelectionChanged { region: String },
}

pub struct DashboardState {
    status: LoadStatus,
    summaries: Vec<RegionSummary>,
    selected: Option<String>,
    subscribers: Vec<Sender<StateEvent>>,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardState {
    pub fn new() -> Self {
        Self {
            status: LoadStatus::Loading,
            summaries: Vec::new(),
            selected: None,
            subscribers: Vec::new(),
        }
    }

    /// Register an observer.
    pub fn subscribe(&mut self) -> Receiver<StateEvent> {
        let (tx, rx) = channel();
        self.subscribers.push(tx);
        rx
    }

    /// Start a fresh load cycle, discarding the previous data.
    pub fn begin_loading(&mut self) {
        self.status = LoadStatus::Loading;
        self.summaries.clear();
        self.selected = None;
        self.emit(StateEvent::Loading);
    }

    /// Install the summaries of a successful load. Selects the first region.
    pub fn finish_loading(&mut self, summaries: Vec<RegionSummary>) {
        self.selected = summaries.first().map(|s| s.region.clone());
        self.summaries = summaries;
        self.status = LoadStatus::Ready;
        let regions = self.region_names();
        tracing::info!(regions = regions.len(), "dashboard ready");
        self.emit(StateEvent::Ready { regions });
    }

    pub fn fail_loading(&mut self, reason: impl Into<String>) {
        let reason = reason.into();
        tracing::warn!(%reason, "dashboard data unavailable");
        self.status = LoadStatus::Unavailable(reason.clone());
        self.summaries.clear();
        self.selected = None;
        self.emit(StateEvent::Unavailable { reason });
    }

    /// Change the selected region. Re-selecting the current region is a no-op.
    pub fn select_region(&mut self, region: &str) -> Result<(), StateError> {
        if !self.is_ready() {
            return Err(StateError::NotReady);
        }
        if !self.summaries.iter().any(|s| s.region == region) {
            return Err(StateError::UnknownRegion(region.to_string()));
        }
        if self.selected.as_deref() == Some(region) {
            return Ok(());
        }

        self.selected = Some(region.to_string());
        tracing::debug!(region, "region selected");
        self.emit(StateEvent::SelectionChanged {
            region: region.to_string(),
        });
        Ok(())
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn is_ready(&self) -> bool {
        self.status == LoadStatus::Ready
    }

    pub fn summaries(&self) -> &[RegionSummary] {
        &self.summaries
    }

    pub fn selected_region(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn selected_summary(&self) -> Option<&RegionSummary> {
        let selected = self.selected.as_deref()?;
        self.summaries.iter().find(|s| s.region == selected)
    }

    pub fn region_names(&self) -> Vec<String> {
        self.summaries.iter().map(|s| s.region.clone()).collect()
    }

    fn emit(&mut self, event: StateEvent) {
        // Drop observers whose receiver is gone.
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{MealRecord, NutritionRecord};
    use crate::stats::merge_and_aggregate;

    fn summaries() -> Vec<RegionSummary> {
        merge_and_aggregate(
            &[
                MealRecord::new("Bihar", "A", 60.0),
                MealRecord::new("Kerala", "K", 90.0),
            ],
            &[
                NutritionRecord::new("Bihar", "A", 40.0, 30.0),
                NutritionRecord::new("Kerala", "K", 20.0, 10.0),
            ],
        )
    }

    #[test]
    fn starts_loading_with_no_selection() {
        let state = DashboardState::new();
        assert_eq!(state.status(), &LoadStatus::Loading);
        assert!(state.selected_summary().is_none());
    }

    #[test]
    fn ready_selects_first_region() {
        let mut state = DashboardState::new();
        state.finish_loading(summaries());

        assert!(state.is_ready());
        assert_eq!(state.selected_region(), Some("Bihar"));
        assert_eq!(state.selected_summary().unwrap().avg_meal_coverage, 60.0);
    }

    #[test]
    fn ready_with_no_regions_has_no_selection() {
        let mut state = DashboardState::new();
        state.finish_loading(Vec::new());

        assert!(state.is_ready());
        assert_eq!(state.selected_region(), None);
    }

    #[test]
    fn select_region_switches_summary() {
        let mut state = DashboardState::new();
        state.finish_loading(summaries());

        state.select_region("Kerala").unwrap();
        assert_eq!(state.selected_summary().unwrap().region, "Kerala");
    }

    #[test]
    fn unknown_region_is_rejected() {
        let mut state = DashboardState::new();
        state.finish_loading(summaries());

        assert_eq!(
            state.select_region("Goa"),
            Err(StateError::UnknownRegion("Goa".into()))
        );
        assert_eq!(state.selected_region(), Some("Bihar"));
    }

    #[test]
    fn selection_requires_ready_state() {
        let mut state = DashboardState::new();
        assert_eq!(state.select_region("Bihar"), Err(StateError::NotReady));

        state.fail_loading("boom");
        assert_eq!(state.select_region("Bihar"), Err(StateError::NotReady));
    }

    #[test]
    fn subscribers_receive_events_in_order() {
        let mut state = DashboardState::new();
        let rx = state.subscribe();

        state.finish_loading(summaries());
        state.select_region("Kerala").unwrap();
        state.select_region("Kerala").unwrap();
        state.begin_loading();
        state.fail_loading("missing file");

        let events: Vec<StateEvent> = rx.try_iter().collect();
        assert_eq!(
            events,
            vec![
                StateEvent::Ready {
                    regions: vec!["Bihar".into(), "Kerala".into()]
                },
                StateEvent::SelectionChanged {
                    region: "Kerala".into()
                },
                StateEvent::Loading,
                StateEvent::Unavailable {
                    reason: "missing file".into()
                },
            ]
        );
    }

    #[test]
    fn dropped_subscribers_are_pruned() {
        let mut state = DashboardState::new();
        drop(state.subscribe());
        let rx = state.subscribe();

        state.finish_loading(summaries());

        assert_eq!(state.subscribers.len(), 1);
        assert!(rx.try_recv().is_ok());
    }

    #[test]
    fn reload_clears_previous_data() {
        let mut state = DashboardState::new();
        state.finish_loading(summaries());
        state.begin_loading();

        assert!(state.summaries().is_empty());
        assert_eq!(state.selected_region(), None);
    }
}
