//! Dashboard Summary Module
//! Headline metrics for the current selection: row count, the product with the
//! highest ad-valorem rate, and the mean recommended rate.

use crate::data::schema::{HIGH_RATE_COLUMN, LOW_RATE_COLUMN};
use crate::data::TariffTable;
use statrs::statistics::Statistics;

/// Product holding the highest not-recommended ad-valorem rate.
#[derive(Debug, Clone, PartialEq)]
pub struct TopProduct {
    pub name: String,
    pub rate: f64,
}

/// Metrics shown above the charts.
///
/// Aggregates over zero rows are `None` rather than NaN or a panic.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashboardSummary {
    pub row_count: usize,
    pub top_high_rate: Option<TopProduct>,
    pub mean_low_rate: Option<f64>,
}

impl DashboardSummary {
    pub fn compute(table: &TariffTable) -> Self {
        if table.is_empty() {
            return Self::default();
        }

        let top_high_rate = table.numeric_series(HIGH_RATE_COLUMN).and_then(|rates| {
            let idx = Self::first_max_index(&rates)?;
            let name = table.product_column().into_iter().nth(idx)?;
            Some(TopProduct {
                name,
                rate: rates[idx],
            })
        });

        let mean_low_rate = table
            .numeric_series(LOW_RATE_COLUMN)
            .filter(|rates| !rates.is_empty())
            .map(|rates| rates.iter().mean());

        Self {
            row_count: table.row_count(),
            top_high_rate,
            mean_low_rate,
        }
    }

    /// Index of the first maximum; ties resolve to the earliest row.
    fn first_max_index(values: &[f64]) -> Option<usize> {
        values
            .iter()
            .enumerate()
            .fold(None, |best: Option<(usize, f64)>, (i, &v)| match best {
                Some((_, b)) if v <= b => best,
                _ => Some((i, v)),
            })
            .map(|(i, _)| i)
    }

    /// `N개`
    pub fn row_count_label(&self) -> String {
        format!("{}개", self.row_count)
    }

    /// `{:.1}%`, or `-` when nothing is selected.
    pub fn mean_low_rate_label(&self) -> String {
        self.mean_low_rate
            .map(|mean| format!("{:.1}%", mean))
            .unwrap_or_else(|| "-".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::schema::PRODUCT_COLUMN;
    use polars::prelude::*;
    use std::collections::HashSet;

    fn table(products: &[&str], low: &[f64], high: &[f64]) -> TariffTable {
        let df = DataFrame::new(vec![
            Column::new(PRODUCT_COLUMN.into(), products.to_vec()),
            Column::new(LOW_RATE_COLUMN.into(), low.to_vec()),
            Column::new(HIGH_RATE_COLUMN.into(), high.to_vec()),
        ])
        .unwrap();
        TariffTable::new(df)
    }

    #[test]
    fn test_compute_summary() {
        let t = table(&["쌀", "참깨", "보리"], &[5.0, 40.0, 20.0], &[513.0, 630.0, 299.7]);
        let summary = DashboardSummary::compute(&t);

        assert_eq!(summary.row_count, 3);
        assert_eq!(
            summary.top_high_rate,
            Some(TopProduct {
                name: "참깨".to_string(),
                rate: 630.0
            })
        );
        assert!((summary.mean_low_rate.unwrap() - 65.0 / 3.0).abs() < 1e-9);
        assert_eq!(summary.row_count_label(), "3개");
        assert_eq!(summary.mean_low_rate_label(), "21.7%");
    }

    #[test]
    fn test_max_tie_takes_first_row() {
        let t = table(&["A", "B", "C"], &[0.0; 3], &[10.0, 30.0, 30.0]);
        let summary = DashboardSummary::compute(&t);
        assert_eq!(summary.top_high_rate.unwrap().name, "B");
    }

    #[test]
    fn test_blank_product_can_top_the_rates() {
        let df = DataFrame::new(vec![
            Column::new(PRODUCT_COLUMN.into(), vec![Some("쌀"), None]),
            Column::new(HIGH_RATE_COLUMN.into(), vec![513.0, 630.0]),
        ])
        .unwrap();
        let summary = DashboardSummary::compute(&TariffTable::new(df));
        assert_eq!(
            summary.top_high_rate,
            Some(TopProduct {
                name: String::new(),
                rate: 630.0
            })
        );
    }

    #[test]
    fn test_zero_rows_skips_aggregates() {
        let t = table(&["쌀"], &[5.0], &[513.0]);
        let empty = t.filter_products(&HashSet::new()).unwrap();
        let summary = DashboardSummary::compute(&empty);

        assert_eq!(summary, DashboardSummary::default());
        assert_eq!(summary.row_count_label(), "0개");
        assert_eq!(summary.mean_low_rate_label(), "-");
    }

    #[test]
    fn test_missing_rate_columns() {
        let df = DataFrame::new(vec![Column::new(PRODUCT_COLUMN.into(), vec!["쌀"])]).unwrap();
        let summary = DashboardSummary::compute(&TariffTable::new(df));

        assert_eq!(summary.row_count, 1);
        assert_eq!(summary.top_high_rate, None);
        assert_eq!(summary.mean_low_rate, None);
    }
}
