//! Meal Dashboard - school meal coverage joined with child nutrition indicators
//!
//! Loads two district-level CSV tables, joins them by (state, district) and
//! summarises each state for display in the desktop dashboard.

pub mod charts;
pub mod config;
pub mod data;
pub mod export;
pub mod gui;
pub mod state;
pub mod stats;

use data::{DataLoader, LoaderError, ResourceFetcher};
use stats::RegionSummary;

/// Run one full load cycle: fetch and parse both tables, then join and aggregate.
pub fn load_summaries<F: ResourceFetcher>(
    loader: &DataLoader<F>,
) -> Result<Vec<RegionSummary>, LoaderError> {
    let data = loader.load()?;
    let summaries = stats::merge_and_aggregate(&data.meals, &data.nutrition);
    tracing::info!(regions = summaries.len(), "aggregated region summaries");
    Ok(summaries)
}
