//! GUI module - User interface components

mod app;
mod control_panel;
mod region_view;

pub use app::DashboardApp;
pub use control_panel::{ControlPanel, ControlPanelAction};
pub use region_view::RegionView;
