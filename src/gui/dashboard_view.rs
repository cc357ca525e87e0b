//! Dashboard View
//! Central panel: headline metrics, rate charts, and the detail table, or the
//! diagnostics panel when the CSV could not be loaded.

use crate::charts::{color32, ChartPlotter};
use crate::data::schema::series_color;
use crate::data::{format_number, product_label, TariffTable};
use crate::stats::DashboardSummary;
use egui::{Color32, RichText, ScrollArea};
use std::path::Path;

const METRIC_WIDTH: f32 = 260.0;
const TABLE_MAX_HEIGHT: f32 = 420.0;

pub struct DashboardView;

impl DashboardView {
    /// Page title shown above everything else.
    pub fn show_header(ui: &mut egui::Ui) {
        ui.add_space(6.0);
        ui.heading(RichText::new("🌾 국영무역품목 양허세율 분석 서비스").size(24.0));
        ui.separator();
        ui.add_space(6.0);
    }

    /// Metrics, charts, and detail table for the current selection.
    pub fn show_loaded(ui: &mut egui::Ui, filtered: &TariffTable, summary: &DashboardSummary) {
        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                Self::show_metrics(ui, summary);
                ui.add_space(12.0);

                ui.label(
                    RichText::new("📊 추천(저율) vs 미추천(고율) 관세율 비교")
                        .size(16.0)
                        .strong(),
                );
                ChartPlotter::draw_rate_comparison(ui, filtered);
                ui.add_space(12.0);

                ui.label(RichText::new("📈 종량세 (미추천, 원/kg)").size(16.0).strong());
                ChartPlotter::draw_specific_duty(ui, filtered);
                ui.add_space(12.0);

                ui.label(RichText::new("📋 상세 데이터 정보").size(16.0).strong());
                Self::show_table(ui, filtered);
            });
    }

    fn show_metrics(ui: &mut egui::Ui, summary: &DashboardSummary) {
        ui.horizontal(|ui| {
            Self::metric(ui, "총 분석 품목", &summary.row_count_label(), None);

            // Nothing to show for an empty selection
            if let Some(top) = &summary.top_high_rate {
                Self::metric(
                    ui,
                    "최고 고율 품목",
                    product_label(&top.name),
                    Some(format!("{}%", format_number(top.rate))),
                );
            } else {
                Self::metric(ui, "최고 고율 품목", "-", None);
            }

            Self::metric(ui, "평균 저율관세", &summary.mean_low_rate_label(), None);
        });
    }

    fn metric(ui: &mut egui::Ui, title: &str, value: &str, delta: Option<String>) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(8.0)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.set_width(METRIC_WIDTH);
                ui.vertical(|ui| {
                    ui.label(RichText::new(title).size(12.0).color(Color32::GRAY));
                    ui.label(RichText::new(value).size(26.0).strong());
                    if let Some(delta) = delta {
                        ui.label(
                            RichText::new(format!("↑ {}", delta))
                                .size(12.0)
                                .color(Color32::from_rgb(40, 167, 69)),
                        );
                    }
                });
            });
    }

    fn show_table(ui: &mut egui::Ui, table: &TariffTable) {
        let columns = table.column_names();
        let rows = table.display_rows();

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ScrollArea::both()
                    .id_salt("detail_table")
                    .max_height(TABLE_MAX_HEIGHT)
                    .show(ui, |ui| {
                        egui::Grid::new("detail_table_grid")
                            .striped(true)
                            .min_col_width(60.0)
                            .spacing([12.0, 4.0])
                            .show(ui, |ui| {
                                let default_text_color = ui.visuals().text_color();
                                for name in &columns {
                                    let color = series_color(name)
                                        .map(color32)
                                        .unwrap_or(default_text_color);
                                    ui.label(RichText::new(name).strong().size(12.0).color(color));
                                }
                                ui.end_row();

                                for row in &rows {
                                    for cell in row {
                                        ui.label(RichText::new(cell).size(12.0));
                                    }
                                    ui.end_row();
                                }
                            });
                    });
            });

        if rows.is_empty() {
            ui.label(RichText::new("선택된 품목이 없습니다.").color(Color32::GRAY));
        }
    }

    /// Shown when the CSV could not be loaded at all.
    pub fn show_failure(
        ui: &mut egui::Ui,
        data_path: &Path,
        message: &str,
        not_found: bool,
        listing: &[String],
    ) {
        let error_color = Color32::from_rgb(220, 53, 69);

        egui::Frame::none()
            .stroke(egui::Stroke::new(2.0, error_color))
            .rounding(8.0)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.label(
                    RichText::new(format!(
                        "⚠️ '{}' 파일을 읽어올 수 없습니다.",
                        data_path.display()
                    ))
                    .size(16.0)
                    .strong()
                    .color(error_color),
                );
                ui.label(RichText::new(message).size(12.0).color(Color32::GRAY));
            });

        ui.add_space(10.0);
        let hint = if not_found {
            "CSV 파일이 업로드되어 있는지, 파일명이 설정과 정확히 일치하는지 확인해 주세요."
        } else {
            "파일이 UTF-8 또는 CP949로 인코딩된 쉼표 구분 CSV인지 확인해 주세요."
        };
        ui.label(RichText::new(format!("ℹ {}", hint)).size(13.0));

        ui.add_space(10.0);
        ui.label(RichText::new("현재 경로의 파일 목록:").strong());
        ScrollArea::vertical()
            .id_salt("cwd_listing")
            .max_height(300.0)
            .show(ui, |ui| {
                if listing.is_empty() {
                    ui.label(RichText::new("(비어 있음)").color(Color32::GRAY));
                }
                for name in listing {
                    ui.monospace(name);
                }
            });
    }
}
