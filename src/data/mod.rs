//! Data module - tariff CSV loading, cleaning, filtering, and caching

mod cache;
mod encoding;
mod listing;
mod loader;
pub mod schema;
mod table;

pub use cache::TableCache;
pub use listing::list_working_dir;
pub use table::{format_number, product_label, TariffTable};
