//! GUI module - User interface components

mod app;
mod dashboard_view;
mod sidebar;

pub use app::TariffDashboardApp;
pub use dashboard_view::DashboardView;
pub use sidebar::{FilterSidebar, SidebarAction};
