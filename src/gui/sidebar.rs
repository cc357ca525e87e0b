//! Filter Sidebar Widget
//! Left side panel: product selection, data source, and export controls.

use crate::data::product_label;
use egui::{Color32, RichText, ScrollArea};
use std::collections::HashSet;
use std::path::Path;

/// Product multiselect and status line.
pub struct FilterSidebar {
    pub products: Vec<String>,
    pub selected: Vec<bool>,
    pub search: String,
    pub status: String,
}

impl Default for FilterSidebar {
    fn default() -> Self {
        Self {
            products: Vec::new(),
            selected: Vec::new(),
            search: String::new(),
            status: "Ready".to_string(),
        }
    }
}

impl FilterSidebar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the product list after a (re)load.
    ///
    /// New products start selected; products the user had deselected stay deselected.
    pub fn set_products(&mut self, products: Vec<String>) {
        let deselected: HashSet<&String> = self
            .products
            .iter()
            .zip(self.selected.iter())
            .filter(|(_, &selected)| !selected)
            .map(|(name, _)| name)
            .collect();
        let selected = products.iter().map(|p| !deselected.contains(p)).collect();

        self.selected = selected;
        self.products = products;
    }

    pub fn selected_products(&self) -> HashSet<String> {
        self.products
            .iter()
            .zip(self.selected.iter())
            .filter(|(_, &selected)| selected)
            .map(|(name, _)| name.clone())
            .collect()
    }

    pub fn selected_count(&self) -> usize {
        self.selected.iter().filter(|&&s| s).count()
    }

    /// Indices of products whose label matches the search box (case-insensitive substring).
    pub fn visible_indices(&self) -> Vec<usize> {
        let needle = self.search.trim().to_lowercase();
        self.products
            .iter()
            .enumerate()
            .filter(|(_, name)| {
                needle.is_empty() || product_label(name).to_lowercase().contains(&needle)
            })
            .map(|(i, _)| i)
            .collect()
    }

    /// Set every visible product to `value`.
    pub fn set_visible(&mut self, value: bool) {
        for i in self.visible_indices() {
            self.selected[i] = value;
        }
    }

    /// Draw the sidebar
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        data_path: &Path,
        can_export: bool,
    ) -> SidebarAction {
        let mut action = SidebarAction::None;

        ui.add_space(5.0);
        ui.heading("🔍 검색 및 필터");
        ui.add_space(8.0);

        // ===== Data Source Section =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                let file_name = data_path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| data_path.display().to_string());
                ui.label(RichText::new(file_name).size(12.0));
                ui.horizontal(|ui| {
                    if ui.button("📂 Open CSV").clicked() {
                        action = SidebarAction::OpenCsv;
                    }
                    if ui.button("🔄 Reload").clicked() {
                        action = SidebarAction::Reload;
                    }
                });
            });

        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Product Selection =====
        ui.label(RichText::new("분석할 품목을 선택하세요").size(14.0).strong());
        ui.label(
            RichText::new(format!(
                "{} / {} selected",
                self.selected_count(),
                self.products.len()
            ))
            .size(11.0)
            .color(Color32::GRAY),
        );
        ui.add_space(4.0);
        ui.add(egui::TextEdit::singleline(&mut self.search).hint_text("품명 검색"));
        ui.add_space(4.0);

        ui.horizontal(|ui| {
            if ui.small_button("Select All").clicked() {
                self.set_visible(true);
                action = SidebarAction::SelectionChanged;
            }
            if ui.small_button("Clear All").clicked() {
                self.set_visible(false);
                action = SidebarAction::SelectionChanged;
            }
        });

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(5.0)
            .show(ui, |ui| {
                ScrollArea::vertical().max_height(360.0).show(ui, |ui| {
                    for i in self.visible_indices() {
                        let label = product_label(&self.products[i]);
                        if ui.checkbox(&mut self.selected[i], label).changed() {
                            action = SidebarAction::SelectionChanged;
                        }
                    }
                });
            });

        ui.add_space(10.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Export =====
        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(can_export, |ui| {
                let button = egui::Button::new(RichText::new("💾 Export PNG").size(14.0))
                    .min_size(egui::vec2(150.0, 30.0));
                if ui.add(button).clicked() {
                    action = SidebarAction::ExportPng;
                }
            });
        });

        ui.add_space(10.0);

        let status_color = if self.status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }
}

/// Actions triggered by the sidebar
#[derive(Debug, Clone, PartialEq)]
pub enum SidebarAction {
    None,
    SelectionChanged,
    OpenCsv,
    Reload,
    ExportPng,
}
