//! Charts module - Indicator chart and district table

mod plotter;

pub use plotter::{format_value, Indicator, IndicatorPlotter, IndicatorSeries, RegionChart};
