//! Static Chart Renderer
//! Writes the rate comparison chart to a PNG file with plotters.
//!
//! Layout:
//! 1. Caption centered at the top
//! 2. Grouped bars per product (one bar per rate series), value axis in percent
//! 3. Series legend in the upper-right corner

use crate::charts::plotter::{category_label, ChartData};
use plotters::prelude::*;
use plotters::style::register_font;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;

const CAPTION: &str = "추천(저율) vs 미추천(고율) 관세율 비교";

/// Family the export font is registered under; plotters falls back to it for
/// any text without an explicit family.
const FONT: &str = "sans-serif";

/// Font file currently registered as `FONT`.
static REGISTERED_FONT: Mutex<Option<PathBuf>> = Mutex::new(None);

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("nothing to export: the current selection has no rows")]
    NoRows,
    #[error("no Hangul font found; set font_path in tariff_dashboard.json")]
    NoFont,
    #[error("failed to load font {}: {message}", path.display())]
    Font { path: PathBuf, message: String },
    #[error("failed to render chart: {0}")]
    Render(String),
}

fn render_error<E: std::fmt::Display>(e: E) -> ExportError {
    ExportError::Render(e.to_string())
}

/// Headroom above the tallest bar so value labels and the legend fit.
pub fn y_upper_bound(max_value: f64) -> f64 {
    if max_value > 0.0 {
        max_value * 1.15
    } else {
        1.0
    }
}

/// Register the font file at `path` with plotters, once per distinct file.
fn register_export_font(path: &Path) -> Result<(), ExportError> {
    let mut registered = REGISTERED_FONT
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    if registered.as_deref() == Some(path) {
        return Ok(());
    }

    let font_error = |message: String| ExportError::Font {
        path: path.to_path_buf(),
        message,
    };
    let bytes = std::fs::read(path).map_err(|e| font_error(e.to_string()))?;
    // plotters keeps registered fonts for the rest of the process.
    let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
    register_font(FONT, FontStyle::Normal, bytes)
        .map_err(|_| font_error("not a TrueType/OpenType font".to_string()))?;

    tracing::debug!(path = %path.display(), "registered export font");
    *registered = Some(path.to_path_buf());
    Ok(())
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render grouped rate bars to `path` as a `width` x `height` PNG, with
    /// all text drawn in the font at `font_path`.
    pub fn render_rate_comparison_png(
        data: &ChartData,
        path: &Path,
        (width, height): (u32, u32),
        font_path: Option<&Path>,
    ) -> Result<(), ExportError> {
        if data.is_empty() {
            return Err(ExportError::NoRows);
        }
        register_export_font(font_path.ok_or(ExportError::NoFont)?)?;

        let n = data.categories.len();
        let y_max = y_upper_bound(data.max_value());

        let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(render_error)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(CAPTION, (FONT, 24))
            .margin(20)
            .x_label_area_size(60)
            .y_label_area_size(70)
            .build_cartesian_2d(-0.5f64..(n as f64 - 0.5), 0f64..y_max)
            .map_err(render_error)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(n.min(40))
            .x_label_formatter(&|x: &f64| category_label(&data.categories, *x))
            .y_desc("세율 (%)")
            .label_style((FONT, 14))
            .draw()
            .map_err(render_error)?;

        for (index, (spec, values)) in data.series.iter().enumerate() {
            let (offset, bar_width) = data.bar_layout(index);
            let color = RGBColor(spec.color.r, spec.color.g, spec.color.b);

            chart
                .draw_series(values.iter().enumerate().map(|(i, &v)| {
                    let x0 = i as f64 + offset - bar_width / 2.0;
                    Rectangle::new([(x0, 0.0), (x0 + bar_width, v)], color.filled())
                }))
                .map_err(render_error)?
                .label(spec.column)
                .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .label_font((FONT, 14))
            .draw()
            .map_err(render_error)?;

        root.present().map_err(render_error)?;
        tracing::info!(path = %path.display(), products = n, "exported rate comparison chart");
        Ok(())
    }
}
