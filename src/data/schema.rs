//! Tariff Table Schema
//! Fixed column names of the state-trading tariff CSV and the series contract
//! handed to the chart and table renderers.

/// Product name column, used as filter key and chart category axis.
pub const PRODUCT_COLUMN: &str = "품명";

/// Recommended (low) tariff rate, percent.
pub const LOW_RATE_COLUMN: &str = "저율관세(추천, %)";

/// Not-recommended (high) ad-valorem rate, percent.
pub const HIGH_RATE_COLUMN: &str = "고율종가(미추천)";

/// Not-recommended specific duty, won per kg.
pub const SPECIFIC_DUTY_COLUMN: &str = "종량(미추천, 원/kg)";

/// Columns coerced from display text to `f64` on load.
pub const NUMERIC_COLUMNS: [&str; 3] = [LOW_RATE_COLUMN, HIGH_RATE_COLUMN, SPECIFIC_DUTY_COLUMN];

/// An sRGB display color for one value series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl SeriesColor {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `#rrggbb` form.
    #[cfg(test)]
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// One value series: which column it reads and how it is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesSpec {
    pub column: &'static str,
    pub color: SeriesColor,
}

pub const LOW_RATE_SERIES: SeriesSpec = SeriesSpec {
    column: LOW_RATE_COLUMN,
    color: SeriesColor::rgb(52, 152, 219), // #3498db
};

pub const HIGH_RATE_SERIES: SeriesSpec = SeriesSpec {
    column: HIGH_RATE_COLUMN,
    color: SeriesColor::rgb(231, 76, 60), // #e74c3c
};

pub const SPECIFIC_DUTY_SERIES: SeriesSpec = SeriesSpec {
    column: SPECIFIC_DUTY_COLUMN,
    color: SeriesColor::rgb(46, 204, 113), // #2ecc71
};

/// Percentage series compared side by side in the grouped bar chart.
pub const RATE_SERIES: [SeriesSpec; 2] = [LOW_RATE_SERIES, HIGH_RATE_SERIES];

/// Every value series, in display order.
pub const ALL_SERIES: [SeriesSpec; 3] = [LOW_RATE_SERIES, HIGH_RATE_SERIES, SPECIFIC_DUTY_SERIES];

/// Look up the display color assigned to a series column.
pub fn series_color(column: &str) -> Option<SeriesColor> {
    ALL_SERIES
        .iter()
        .find(|spec| spec.column == column)
        .map(|spec| spec.color)
}
