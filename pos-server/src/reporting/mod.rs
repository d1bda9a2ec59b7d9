//! Sales reporting

pub mod aggregator;

pub use aggregator::{DailyReport, DailyReportGroup, ProductSales, daily_report};
