//! Charts module - Chart rendering

mod plotter;
mod renderer;

pub use plotter::{color32, ChartData, ChartPlotter};
pub use renderer::StaticChartRenderer;
