//! Tariff Record Table
//! Immutable view over the cleaned tariff DataFrame. Filtering always builds a
//! new table; the loaded one is shared read-only.

use crate::data::schema::PRODUCT_COLUMN;
use polars::prelude::*;
use std::collections::HashSet;

const BLANK_PRODUCT_LABEL: &str = "(빈 품명)";

/// Cleaned tariff rows: trimmed headers, designated rate columns as `f64`,
/// every other column passed through as text.
#[derive(Debug, Clone)]
pub struct TariffTable {
    df: DataFrame,
}

impl TariffTable {
    pub fn new(df: DataFrame) -> Self {
        Self { df }
    }

    /// Zero-row table with the given column layout.
    pub fn empty_like(&self) -> Self {
        Self::new(self.df.clear())
    }

    pub fn row_count(&self) -> usize {
        self.df.height()
    }

    pub fn is_empty(&self) -> bool {
        self.df.height() == 0
    }

    pub fn column_names(&self) -> Vec<String> {
        self.df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    /// Product name of each row. Empty cells, and every row when the column is
    /// missing, map to the blank name `""` so they stay selectable.
    pub fn product_column(&self) -> Vec<String> {
        let Ok(ca) = self.df.column(PRODUCT_COLUMN).and_then(|col| col.str()) else {
            return vec![String::new(); self.df.height()];
        };
        ca.into_iter()
            .map(|v| v.map(str::to_string).unwrap_or_default())
            .collect()
    }

    /// Distinct product names in first-appearance order, blank name included.
    pub fn product_names(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.product_column()
            .into_iter()
            .filter(|name| seen.insert(name.clone()))
            .collect()
    }

    /// Rows whose product name is in `selected`, original order preserved.
    pub fn filter_products(&self, selected: &HashSet<String>) -> PolarsResult<TariffTable> {
        let mask: Vec<bool> = self
            .product_column()
            .iter()
            .map(|name| selected.contains(name))
            .collect();
        let mask = Series::new("mask".into(), mask);
        let df = self.df.filter(mask.bool()?)?;
        Ok(TariffTable::new(df))
    }

    /// Values of a numeric column; `None` when the column is absent or not numeric.
    pub fn numeric_series(&self, column: &str) -> Option<Vec<f64>> {
        let col = self.df.column(column).ok()?;
        let ca = col.f64().ok()?;
        Some(ca.into_iter().map(|v| v.unwrap_or(0.0)).collect())
    }

    /// Every cell rendered as display text, row-major.
    pub fn display_rows(&self) -> Vec<Vec<String>> {
        let columns = self.df.get_columns();
        (0..self.df.height())
            .map(|i| {
                columns
                    .iter()
                    .map(|col| col.get(i).map(|v| display_value(&v)).unwrap_or_default())
                    .collect()
            })
            .collect()
    }
}

impl PartialEq for TariffTable {
    fn eq(&self, other: &Self) -> bool {
        self.column_names() == other.column_names() && self.df.equals_missing(&other.df)
    }
}

/// Label shown for a product name; the blank name gets a placeholder.
pub fn product_label(name: &str) -> &str {
    if name.is_empty() {
        BLANK_PRODUCT_LABEL
    } else {
        name
    }
}

/// Format a number the way the dashboard shows it: no trailing `.0` on whole values.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{:.0}", value)
    } else {
        value.to_string()
    }
}

fn display_value(value: &AnyValue) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        AnyValue::Float64(v) => format_number(*v),
        other => other.to_string().trim_matches('"').to_string(),
    }
}
