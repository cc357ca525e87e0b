//! Chart Plotter Module
//! Interactive tariff charts using egui_plot: grouped rate bars per product and
//! the specific-duty line.

use crate::data::schema::{SeriesColor, SeriesSpec, RATE_SERIES, SPECIFIC_DUTY_SERIES};
use crate::data::{format_number, product_label, TariffTable};
use egui::{Align2, Color32, RichText};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoint, PlotPoints, Points, Text};

const BAR_GROUP_WIDTH: f64 = 0.8;

/// Category labels plus one value vector per series, ready to plot.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub categories: Vec<String>,
    pub series: Vec<(SeriesSpec, Vec<f64>)>,
}

impl ChartData {
    /// Extract the given series from `table`. Series whose column is absent are left out.
    pub fn from_table(table: &TariffTable, specs: &[SeriesSpec]) -> Self {
        let categories = table.product_column();
        let series = specs
            .iter()
            .filter_map(|spec| Some((*spec, table.numeric_series(spec.column)?)))
            .collect();
        Self { categories, series }
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() || self.series.is_empty()
    }

    /// Largest plotted value, or 0 when there is nothing to plot.
    pub fn max_value(&self) -> f64 {
        self.series
            .iter()
            .flat_map(|(_, values)| values.iter().copied())
            .fold(0.0, f64::max)
    }

    /// Horizontal offset of series `index` inside its category slot, and the bar width.
    pub fn bar_layout(&self, index: usize) -> (f64, f64) {
        let count = self.series.len().max(1) as f64;
        let width = BAR_GROUP_WIDTH / count;
        let offset = (index as f64 - (count - 1.0) / 2.0) * width;
        (offset, width)
    }
}

/// Category name for an axis position, blank between categories.
pub fn category_label(categories: &[String], position: f64) -> String {
    let rounded = position.round();
    if (position - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    categories
        .get(rounded as usize)
        .map(|name| product_label(name).to_string())
        .unwrap_or_default()
}

pub fn color32(color: SeriesColor) -> Color32 {
    Color32::from_rgb(color.r, color.g, color.b)
}

/// Creates the dashboard charts using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Grouped bars: recommended (low) vs not-recommended (high) rate per product.
    pub fn draw_rate_comparison(ui: &mut egui::Ui, table: &TariffTable) {
        let data = ChartData::from_table(table, &RATE_SERIES);
        if data.is_empty() {
            ui.label(RichText::new("No Data").color(Color32::GRAY));
            return;
        }

        let x_labels = data.categories.clone();

        Plot::new("rate_comparison")
            .height(380.0)
            .legend(Legend::default())
            .allow_scroll(false)
            .include_y(0.0)
            .y_axis_label("세율 (%)")
            .x_axis_formatter(move |mark, _range| category_label(&x_labels, mark.value))
            .show(ui, |plot_ui| {
                for (index, (spec, values)) in data.series.iter().enumerate() {
                    let (offset, width) = data.bar_layout(index);
                    let color = color32(spec.color);

                    let bars: Vec<Bar> = values
                        .iter()
                        .enumerate()
                        .map(|(i, &v)| {
                            Bar::new(i as f64 + offset, v)
                                .width(width)
                                .name(&data.categories[i])
                                .fill(color)
                        })
                        .collect();
                    plot_ui.bar_chart(BarChart::new(bars).color(color).name(spec.column));

                    // Value labels on top of each bar
                    for (i, &v) in values.iter().enumerate() {
                        plot_ui.text(
                            Text::new(
                                PlotPoint::new(i as f64 + offset, v),
                                RichText::new(format_number(v)).size(10.0),
                            )
                            .anchor(Align2::CENTER_BOTTOM)
                            .color(color),
                        );
                    }
                }
            });
    }

    /// Line of the specific duty (won/kg) per product.
    pub fn draw_specific_duty(ui: &mut egui::Ui, table: &TariffTable) {
        let data = ChartData::from_table(table, &[SPECIFIC_DUTY_SERIES]);
        let Some((spec, values)) = data.series.first() else {
            ui.label(RichText::new("No Data").color(Color32::GRAY));
            return;
        };
        if values.is_empty() {
            ui.label(RichText::new("No Data").color(Color32::GRAY));
            return;
        }

        let color = color32(spec.color);
        let x_labels = data.categories.clone();
        let points: Vec<[f64; 2]> = values
            .iter()
            .enumerate()
            .map(|(i, &v)| [i as f64, v])
            .collect();

        Plot::new("specific_duty")
            .height(260.0)
            .legend(Legend::default())
            .allow_scroll(false)
            .include_y(0.0)
            .y_axis_label("원/kg")
            .x_axis_formatter(move |mark, _range| category_label(&x_labels, mark.value))
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new(PlotPoints::from_iter(points.iter().copied()))
                        .color(color)
                        .width(1.5)
                        .name(spec.column),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from_iter(points.iter().copied()))
                        .radius(3.0)
                        .color(color),
                );
            });
    }
}
