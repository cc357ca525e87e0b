//! Stats module - dashboard metrics over the filtered table

mod summary;

pub use summary::DashboardSummary;
