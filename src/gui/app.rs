//! Tariff Dashboard Main Application
//! Main window with the filter sidebar and the dashboard view.

use crate::charts::{ChartData, StaticChartRenderer};
use crate::config::DashboardConfig;
use crate::data::schema::RATE_SERIES;
use crate::data::{list_working_dir, TableCache, TariffTable};
use crate::gui::{DashboardView, FilterSidebar, SidebarAction};
use crate::stats::DashboardSummary;
use egui::SidePanel;
use std::path::{Path, PathBuf};
use std::sync::Arc;

const HANGUL_FONT: &str = "hangul";

/// What the central panel currently shows.
enum LoadState {
    Loaded {
        table: Arc<TariffTable>,
        filtered: TariffTable,
        summary: DashboardSummary,
    },
    Failed {
        message: String,
        not_found: bool,
        listing: Vec<String>,
    },
}

/// Main application window.
pub struct TariffDashboardApp {
    config: DashboardConfig,
    data_path: PathBuf,
    font_path: Option<PathBuf>,
    cache: TableCache,
    state: LoadState,
    sidebar: FilterSidebar,
}

impl TariffDashboardApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: DashboardConfig) -> Self {
        let font_path = config.resolved_font_path();
        match &font_path {
            Some(path) => install_font(&cc.egui_ctx, path),
            None => tracing::warn!("no Hangul font found; Korean text may not render"),
        }

        let mut app = Self {
            data_path: config.data_path.clone(),
            font_path,
            config,
            cache: TableCache::new(),
            state: LoadState::Failed {
                message: String::new(),
                not_found: true,
                listing: Vec::new(),
            },
            sidebar: FilterSidebar::new(),
        };
        app.reload();
        app
    }

    /// Fetch the table for the current path (cached unless the file changed).
    fn reload(&mut self) {
        match self.cache.get_or_load(&self.data_path) {
            Ok(table) => {
                self.sidebar.set_products(table.product_names());
                self.sidebar.set_status(format!(
                    "Loaded {} rows, {} columns",
                    table.row_count(),
                    table.column_names().len()
                ));
                let filtered = table.empty_like();
                self.state = LoadState::Loaded {
                    table,
                    filtered,
                    summary: DashboardSummary::default(),
                };
                self.apply_filter();
            }
            Err(e) => {
                self.sidebar.set_products(Vec::new());
                self.sidebar.set_status(format!("Error: {}", e));
                self.state = LoadState::Failed {
                    message: e.to_string(),
                    not_found: e.is_not_found(),
                    listing: list_working_dir(),
                };
            }
        }
    }

    /// Re-read the file even if its modification time is unchanged.
    fn force_reload(&mut self) {
        self.cache.invalidate(&self.data_path);
        self.reload();
    }

    /// Rebuild the filtered view and metrics from the sidebar selection.
    fn apply_filter(&mut self) {
        let LoadState::Loaded {
            table,
            filtered,
            summary,
        } = &mut self.state
        else {
            return;
        };

        let selected = self.sidebar.selected_products();
        *filtered = match table.filter_products(&selected) {
            Ok(view) => view,
            Err(e) => {
                tracing::error!("failed to filter tariff table: {}", e);
                table.empty_like()
            }
        };
        *summary = DashboardSummary::compute(filtered);
    }

    fn handle_open_csv(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        {
            tracing::info!(path = %path.display(), "switching data source");
            self.cache.clear();
            self.data_path = path;
            self.reload();
        }
    }

    /// Render the comparison chart for the current selection to a PNG file.
    fn handle_export_png(&mut self) {
        let LoadState::Loaded { filtered, .. } = &self.state else {
            return;
        };
        let data = ChartData::from_table(filtered, &RATE_SERIES);

        let Some(output_path) = rfd::FileDialog::new()
            .add_filter("PNG Image", &["png"])
            .set_file_name("tariff_comparison.png")
            .save_file()
        else {
            return; // User cancelled
        };

        let [width, height] = self.config.export_size;
        match StaticChartRenderer::render_rate_comparison_png(
            &data,
            &output_path,
            (width, height),
            self.font_path.as_deref(),
        ) {
            Ok(()) => {
                self.sidebar
                    .set_status(format!("Exported {}", output_path.display()));
                if let Err(e) = open::that(&output_path) {
                    tracing::warn!("could not open exported chart: {}", e);
                }
            }
            Err(e) => {
                tracing::error!("chart export failed: {}", e);
                self.sidebar.set_status(format!("Error: {}", e));
            }
        }
    }

    fn can_export(&self) -> bool {
        matches!(&self.state, LoadState::Loaded { filtered, .. } if !filtered.is_empty())
    }
}

impl eframe::App for TariffDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Left panel - filters
        SidePanel::left("filter_sidebar")
            .min_width(260.0)
            .max_width(340.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let can_export = self.can_export();
                    let action = self.sidebar.show(ui, &self.data_path, can_export);

                    match action {
                        SidebarAction::SelectionChanged => self.apply_filter(),
                        SidebarAction::OpenCsv => self.handle_open_csv(),
                        SidebarAction::Reload => self.force_reload(),
                        SidebarAction::ExportPng => self.handle_export_png(),
                        SidebarAction::None => {}
                    }
                });
            });

        // Central panel - dashboard
        egui::CentralPanel::default().show(ctx, |ui| {
            DashboardView::show_header(ui);
            match &self.state {
                LoadState::Loaded {
                    filtered, summary, ..
                } => DashboardView::show_loaded(ui, filtered, summary),
                LoadState::Failed {
                    message,
                    not_found,
                    listing,
                } => {
                    DashboardView::show_failure(ui, &self.data_path, message, *not_found, listing)
                }
            }
        });
    }
}

/// Add a Hangul-capable font as fallback for both egui font families.
fn install_font(ctx: &egui::Context, path: &Path) {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(path = %path.display(), "could not read font: {}", e);
            return;
        }
    };

    let mut fonts = egui::FontDefinitions::default();
    fonts.font_data.insert(
        HANGUL_FONT.to_owned(),
        Arc::new(egui::FontData::from_owned(bytes)),
    );
    for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
        fonts
            .families
            .entry(family)
            .or_default()
            .push(HANGUL_FONT.to_owned());
    }
    ctx.set_fonts(fonts);
    tracing::debug!(path = %path.display(), "installed Hangul font");
}
